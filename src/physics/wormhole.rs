use std::f64::consts::PI;

/// Static, spherically-symmetric wormhole described by its embedding-diagram
/// shape function. `l` is the signed proper distance from the throat; negative
/// values lie on the far side.
#[derive(Debug, Clone, Copy)]
pub struct Wormhole {
    pub rho: f64, // throat radius, > 0
    pub a: f64,   // half-length of the flat throat region, >= 0
    pub m: f64,   // mass-like steepness of the flare-out, > 0
}

impl Wormhole {
    /// Create a wormhole with throat radius `rho`, transition length `a`
    /// and mass parameter `m`. Ranges are the caller's contract; the model
    /// performs no validation of its own.
    pub fn new(rho: f64, a: f64, m: f64) -> Self {
        Wormhole { rho, a, m }
    }

    /// Areal radius r(l). Flat throat of radius `rho` for |l| <= a, then an
    /// asymptotically conical flare governed by `m`.
    pub fn radius(&self, l: f64) -> f64 {
        if l.abs() > self.a {
            let x = self.flare_coordinate(l);
            self.rho + self.m * (x * x.atan2(1.0) - 0.5 * (1.0 + x * x).ln())
        } else {
            self.rho
        }
    }

    /// dr/dl. Zero across the whole throat region, including l = 0 where the
    /// naive sign(l) form would divide by zero.
    pub fn radius_derivative(&self, l: f64) -> f64 {
        if l.abs() > self.a {
            let x = self.flare_coordinate(l);
            l.signum() * (2.0 / PI) * x.atan2(1.0)
        } else {
            0.0
        }
    }

    #[inline]
    fn flare_coordinate(&self, l: f64) -> f64 {
        2.0 * (l.abs() - self.a) / (PI * self.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throat_region_is_flat() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        for l in [-2.0, -1.3, -0.5, 0.0, 0.7, 2.0] {
            assert_eq!(wh.radius(l), 1.0);
            assert_eq!(wh.radius_derivative(l), 0.0);
        }
    }

    #[test]
    fn shape_is_symmetric_in_l() {
        let wh = Wormhole::new(0.5, 1.0, 0.2);
        for l in [1.1, 2.0, 5.0, 37.5] {
            assert_eq!(wh.radius(l), wh.radius(-l));
            assert_eq!(wh.radius_derivative(l), -wh.radius_derivative(-l));
        }
    }

    #[test]
    fn radius_grows_outside_the_throat() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        let mut prev = wh.radius(2.0);
        for i in 1..200 {
            let r = wh.radius(2.0 + i as f64 * 0.1);
            assert!(r > prev, "r must grow with |l| outside the throat");
            assert!(r >= wh.rho);
            prev = r;
        }
    }

    #[test]
    fn radius_is_continuous_at_the_transition() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        let eps = 1e-9;
        let inner = wh.radius(wh.a - eps);
        let outer = wh.radius(wh.a + eps);
        assert!((inner - outer).abs() < 1e-6);
        let inner = wh.radius(-wh.a + eps);
        let outer = wh.radius(-wh.a - eps);
        assert!((inner - outer).abs() < 1e-6);
    }

    #[test]
    fn derivative_defined_at_origin() {
        // a = 0 puts l = 0 right on the transition boundary
        let wh = Wormhole::new(0.1, 0.0, 0.01);
        assert_eq!(wh.radius_derivative(0.0), 0.0);
    }
}
