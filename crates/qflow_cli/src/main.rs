//! QFlow CLI - headless widget simulation
//!
//! Builds notifications, a dialog and a toggle switch against a simulated
//! parent window and runs them to completion on the virtual event loop.
//! Useful for checking a qflow.toml before wiring it into an application.

mod config;
mod simulate;

use anyhow::Result;
use clap::Parser;
use qflow_widgets::{NotifyType, Position};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::QFlowConfig;

/// Run QFlow widgets headlessly on virtual time
#[derive(Parser, Debug)]
#[command(name = "qflow")]
#[command(about = "Run QFlow widgets headlessly on virtual time")]
#[command(version)]
struct Args {
    /// Configuration file, or a directory containing qflow.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of notifications to spawn
    #[arg(short = 'n', long, default_value = "3")]
    count: u32,

    /// Notification message
    #[arg(short, long, default_value = "Hello from QFlow")]
    message: String,

    /// Notification type (success, error, info)
    #[arg(short = 't', long = "type")]
    kind: Option<NotifyType>,

    /// Corner to stack in (top-right, top-left, bottom-right, bottom-left)
    #[arg(short, long)]
    position: Option<Position>,

    #[arg(long)]
    duration_ms: Option<u64>,

    #[arg(long)]
    delay_ms: Option<u64>,

    /// Maximum notifications per window
    #[arg(long)]
    limit: Option<u32>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command line flags win over the configuration file
    fn apply(&self, config: &mut QFlowConfig) {
        if let Some(kind) = self.kind {
            config.notify.kind = kind;
        }
        if let Some(position) = self.position {
            config.notify.position = position;
        }
        if let Some(duration_ms) = self.duration_ms {
            config.notify.duration_ms = duration_ms;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.notify.delay_ms = delay_ms;
        }
        if let Some(limit) = self.limit {
            config.notify.notifications_limit = limit;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG takes precedence over --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = match &args.config {
        Some(path) => QFlowConfig::load(path)?,
        None => QFlowConfig::default(),
    };
    args.apply(&mut config);
    config.notify.validate()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    tracing::info!(
        count = args.count,
        kind = %config.notify.kind,
        position = %config.notify.position,
        "starting simulation"
    );

    let summary = simulate::run(&config, args.count, &args.message)?;

    tracing::info!(
        admitted = summary.admitted,
        rejected = summary.rejected,
        remaining = summary.remaining,
        virtual_time = ?summary.virtual_time,
        dialog_dismissed = summary.dialog_dismissed,
        switch_checked = summary.switch_checked,
        "simulation complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "qflow",
            "--type",
            "info",
            "--position",
            "bottom-right",
            "--duration-ms",
            "900",
            "--limit",
            "2",
        ]);
        let mut config = QFlowConfig::default();
        args.apply(&mut config);

        assert_eq!(config.notify.kind, NotifyType::Info);
        assert_eq!(config.notify.position, Position::BottomRight);
        assert_eq!(config.notify.duration_ms, 900);
        assert_eq!(config.notify.notifications_limit, 2);
        assert_eq!(config.notify.delay_ms, 0);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(Args::try_parse_from(["qflow", "--type", "warning"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
