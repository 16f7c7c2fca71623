use std::f64::consts::PI;

use crate::physics::{GeodesicState, Wormhole};

/// Fixed observer sitting at (l, theta, phi) in the wormhole's coordinates.
/// Converts viewport coordinates into launch-ready geodesic states; the two
/// pipelines use opposite viewing conventions (see the per-method docs).
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub l: f64,
    pub theta: f64,
    pub phi: f64,
    pub vfov: f64, // vertical field of view, radians
}

impl Observer {
    pub fn new(l: f64, theta: f64, phi: f64, vfov_deg: f64) -> Self {
        Observer {
            l,
            theta,
            phi,
            vfov: vfov_deg.to_radians(),
        }
    }

    /// Render-pipeline ray for screen pixel (x, y): forward-looking, local
    /// azimuth centered on phi_local = 0.
    pub fn pixel_ray(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        wormhole: &Wormhole,
    ) -> GeodesicState {
        let (u, v) = self.viewport_ndc(x as f64, y as f64, width as f64, height as f64);
        self.launch(u, v, 0.0, wormhole)
    }

    /// Path-pipeline ray for grid cell (i, j): outward-looking, local
    /// azimuth offset by pi so the fan points away from the throat.
    pub fn grid_ray(
        &self,
        i: usize,
        j: usize,
        grid_w: usize,
        grid_h: usize,
        wormhole: &Wormhole,
    ) -> GeodesicState {
        let (u, v) = self.viewport_ndc(i as f64, j as f64, grid_w as f64, grid_h as f64);
        self.launch(u, v, PI, wormhole)
    }

    /// Viewport coordinate to NDC, centered and scaled by half the viewport
    /// height and tan(vfov/2).
    fn viewport_ndc(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        let tan_half = (self.vfov * 0.5).tan();
        let u = (x - 0.5 * width) / (0.5 * height) * tan_half;
        let v = (y - 0.5 * height) / (0.5 * height) * tan_half;
        (u, v)
    }

    /// Build the initial state: local direction from (u, v), momentum is the
    /// negated direction with the angular components scaled by the metric
    /// coefficients at the observer (r and -r sin theta).
    fn launch(&self, u: f64, v: f64, base_azimuth: f64, wormhole: &Wormhole) -> GeodesicState {
        let theta_local = PI / 2.0 + v.atan2(1.0);
        let phi_local = base_azimuth + u.atan2(1.0);
        let (sin_t, cos_t) = theta_local.sin_cos();
        let (sin_p, cos_p) = phi_local.sin_cos();
        let n = [sin_t * cos_p, sin_t * sin_p, cos_t];

        let r = wormhole.radius(self.l);
        let p_l = -n[0];
        let p_theta = -n[1] * r;
        let p_phi = -n[2] * (-r * self.theta.sin());
        GeodesicState::new(self.l, self.theta, self.phi, p_l, p_theta, p_phi)
    }
}
