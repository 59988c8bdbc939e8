/// Point in the orbital plane, body centre at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Cartesian point at `radius` and polar angle `angle`.
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Vector2D::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_from_polar_round_trip() {
        let point = Vector2D::from_polar(6.378e6, 0.3);
        assert_abs_diff_eq!(point.magnitude(), 6.378e6, epsilon = 1e-6);
        assert_abs_diff_eq!(point.angle(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_from_polar_quarter_turn() {
        let point = Vector2D::from_polar(2.0, FRAC_PI_2);
        assert_abs_diff_eq!(point.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(point.y, 2.0, epsilon = 1e-12);
    }
}
