macro_rules! assert_approx_eq {
    (@inner $lhs:expr, $rhs:expr, $approx:expr) => {
        match (&($lhs), &($rhs)) {
            (lhs, rhs) => assert!(
                $approx.eq(*lhs, *rhs),
                r#"assertion failed: `({} ≈ {})`
  left: `{:?}`,
 right: `{:?}`"#,
                stringify!($lhs),
                stringify!($rhs),
                lhs,
                rhs,
            ),
        }
    };
    ($lhs:expr, $rhs:expr, epsilon = $epsilon:expr) => {
        assert_approx_eq!(@inner $lhs, $rhs, $crate::approx::Approx::absolute($epsilon))
    };
    ($lhs:expr, $rhs:expr, relative = $epsilon:expr) => {
        assert_approx_eq!(@inner $lhs, $rhs, $crate::approx::Approx::relative($epsilon))
    };
}

/// Floating point comparison, either on an absolute scale or relative to the larger operand.
///
/// Relative comparisons are needed for genome-wide π, which is typically on the order of 1e-8.
#[derive(Clone, Copy, Debug)]
pub enum Approx {
    Absolute(f64),
    Relative(f64),
}

impl Approx {
    pub fn absolute(epsilon: f64) -> Self {
        Self::Absolute(epsilon)
    }

    pub fn relative(epsilon: f64) -> Self {
        Self::Relative(epsilon)
    }

    pub fn eq(self, lhs: f64, rhs: f64) -> bool {
        let diff = (lhs - rhs).abs();

        match self {
            Approx::Absolute(epsilon) => diff < epsilon,
            Approx::Relative(epsilon) => diff <= epsilon * lhs.abs().max(rhs.abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_handles_small_magnitudes() {
        assert!(Approx::relative(1e-6).eq(1.3627e-8, 1.36270001e-8));
        assert!(!Approx::relative(1e-6).eq(1.3627e-8, 1.3628e-8));

        // An absolute epsilon of this size is meaningless at this scale
        assert!(Approx::absolute(1e-6).eq(1.3627e-8, 2.0e-8));
    }
}
