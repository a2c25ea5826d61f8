//! Progress curves

/// Polynomial degree of an eased curve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curve {
    Quad,
    Cubic,
}

impl Curve {
    fn degree(self) -> i32 {
        match self {
            Curve::Quad => 2,
            Curve::Cubic => 3,
        }
    }
}

/// Maps linear progress in `0.0..=1.0` onto an eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow
    In(Curve),
    /// Ends slow
    Out(Curve),
    /// Slow at both ends
    InOut(Curve),
}

impl Easing {
    /// Progress outside `0.0..=1.0` is clamped first
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::In(curve) => t.powi(curve.degree()),
            Easing::Out(curve) => 1.0 - (1.0 - t).powi(curve.degree()),
            Easing::InOut(curve) => {
                let n = curve.degree();
                if t < 0.5 {
                    (2.0 * t).powi(n) / 2.0
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(n) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<Easing> {
        let mut easings = vec![Easing::Linear];
        for curve in [Curve::Quad, Curve::Cubic] {
            easings.extend([Easing::In(curve), Easing::Out(curve), Easing::InOut(curve)]);
        }
        easings
    }

    #[test]
    fn test_endpoints_are_exact() {
        for easing in all() {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_in_out_is_symmetric_at_midpoint() {
        assert_eq!(Easing::InOut(Curve::Quad).apply(0.5), 0.5);
        assert_eq!(Easing::InOut(Curve::Cubic).apply(0.5), 0.5);
        assert!(Easing::In(Curve::Cubic).apply(0.5) < 0.5);
        assert!(Easing::Out(Curve::Cubic).apply(0.5) > 0.5);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Out(Curve::Quad).apply(1.5), 1.0);
    }
}
