use std::f64::consts::PI;

use crate::physics::constants::POLE_EPSILON;
use crate::physics::wormhole::Wormhole;

/// Photon state in the wormhole's spherical coordinates: position
/// (l, theta, phi) and conjugate momentum (p_l, p_theta, p_phi).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicState {
    pub l: f64,
    pub theta: f64,
    pub phi: f64,
    pub p_l: f64,
    pub p_theta: f64,
    pub p_phi: f64,
}

impl GeodesicState {
    /// Build a state, pinning theta into (0, pi) so the sin-theta terms of
    /// the equations of motion stay finite.
    pub fn new(l: f64, theta: f64, phi: f64, p_l: f64, p_theta: f64, p_phi: f64) -> Self {
        GeodesicState {
            l,
            theta: clamp_polar(theta),
            phi,
            p_l,
            p_theta,
            p_phi,
        }
    }

    /// Embed the position in Cartesian space for line rendering, using the
    /// signed throat distance as the radial scale.
    pub fn cartesian(&self) -> [f64; 3] {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        [
            self.l * sin_t * cos_p,
            self.l * sin_t * sin_p,
            self.l * cos_t,
        ]
    }
}

/// Explicit fixed-step integrator for the null-geodesic equations of motion.
/// No adaptive control and no early exit: every ray runs the full step count,
/// which keeps per-frame cost flat for interactive use.
#[derive(Debug, Clone, Copy)]
pub struct GeodesicIntegrator {
    pub step: f64,
    pub iterations: usize,
}

impl GeodesicIntegrator {
    pub fn new(step: f64, iterations: usize) -> Self {
        GeodesicIntegrator { step, iterations }
    }

    /// One forward-Euler step. r, dr/dl and the transverse momentum terms are
    /// evaluated at the incoming state; the position components are then
    /// advanced in place, so the phi and p_theta updates read the freshly
    /// advanced theta. This sequential ordering is what produces the rendered
    /// trajectories and must not be reordered into a staged scheme.
    pub fn advance(&self, state: &mut GeodesicState, wormhole: &Wormhole) {
        let dt = self.step;
        let r = wormhole.radius(state.l);
        let dr_dl = wormhole.radius_derivative(state.l);
        let b = state.p_phi;
        let sin_t = state.theta.sin();
        let b_sq = state.p_theta * state.p_theta + (b * b) / (sin_t * sin_t);
        let r_sq = r * r;

        state.l += state.p_l * dt;
        state.theta = clamp_polar(state.theta + dt * state.p_theta / r_sq);
        let sin_t = state.theta.sin();
        state.phi += dt * b / (r_sq * sin_t * sin_t);
        state.p_l += dt * b_sq * dr_dl / (r_sq * r);
        state.p_theta += dt * b * b * state.theta.cos() / (r_sq * sin_t * sin_t * sin_t);
    }

    /// Run the full step count and return only the terminal state
    /// (render pipeline).
    pub fn final_state(&self, initial: GeodesicState, wormhole: &Wormhole) -> GeodesicState {
        let mut state = initial;
        for _ in 0..self.iterations {
            self.advance(&mut state, wormhole);
        }
        state
    }

    /// Record the whole trajectory, initial state included, as `iterations`
    /// samples (path pipeline).
    pub fn trace(&self, initial: GeodesicState, wormhole: &Wormhole) -> Vec<GeodesicState> {
        let mut states = Vec::with_capacity(self.iterations);
        let mut state = initial;
        states.push(state);
        for _ in 1..self.iterations {
            self.advance(&mut state, wormhole);
            states.push(state);
        }
        states
    }
}

#[inline]
fn clamp_polar(theta: f64) -> f64 {
    theta.clamp(POLE_EPSILON, PI - POLE_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radial_state(l: f64, p_l: f64) -> GeodesicState {
        GeodesicState::new(l, PI / 2.0, PI / 2.0, p_l, 0.0, 0.0)
    }

    #[test]
    fn radial_rays_stay_radial() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        let integrator = GeodesicIntegrator::new(0.01, 500);
        let states = integrator.trace(radial_state(3.0, -1.0), &wh);
        for s in &states {
            assert_eq!(s.theta, PI / 2.0);
            assert_eq!(s.phi, PI / 2.0);
            assert_eq!(s.p_theta, 0.0);
            assert_eq!(s.p_phi, 0.0);
        }
    }

    #[test]
    fn integration_is_deterministic() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        let integrator = GeodesicIntegrator::new(0.05, 300);
        let initial = GeodesicState::new(3.0, 1.2, 0.4, -1.0, 0.3, 0.2);
        let first = integrator.trace(initial, &wh);
        let second = integrator.trace(initial, &wh);
        assert_eq!(first, second);
    }

    #[test]
    fn inbound_radial_ray_traverses_the_throat() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        let integrator = GeodesicIntegrator::new(0.1, 100);
        let states = integrator.trace(radial_state(3.0, -1.0), &wh);

        // Radial momentum feels no transverse coupling, so l falls linearly
        // through the throat and out the far side.
        assert!(states.iter().any(|s| s.l.abs() <= wh.a));
        let last = states.last().unwrap();
        assert!(last.l < 0.0, "ray should emerge on the far side");

        // Exactly one sign flip, at the step where l crosses zero.
        let flips = states
            .windows(2)
            .filter(|w| (w[0].l > 0.0) != (w[1].l > 0.0))
            .count();
        assert_eq!(flips, 1);
    }

    #[test]
    fn theta_is_kept_off_the_poles() {
        let wh = Wormhole::new(0.5, 0.5, 0.01);
        let integrator = GeodesicIntegrator::new(0.1, 2000);
        // Strong polar momentum drives theta toward zero
        let initial = GeodesicState::new(2.0, 0.3, 0.0, 0.0, -5.0, 0.1);
        let final_state = integrator.final_state(initial, &wh);
        assert!(final_state.theta >= POLE_EPSILON);
        assert!(final_state.theta <= PI - POLE_EPSILON);
        assert!(final_state.phi.is_finite());
        assert!(final_state.p_theta.is_finite());
    }

    #[test]
    fn final_state_matches_end_of_trace() {
        let wh = Wormhole::new(1.0, 2.0, 0.01);
        let initial = GeodesicState::new(3.0, 1.4, 0.2, -0.8, 0.1, 0.4);
        // trace() stores the initial state as sample 0, so N samples span
        // N - 1 advances.
        let trace = GeodesicIntegrator::new(0.02, 101).trace(initial, &wh);
        let final_state = GeodesicIntegrator::new(0.02, 100).final_state(initial, &wh);
        assert_eq!(*trace.last().unwrap(), final_state);
    }
}
