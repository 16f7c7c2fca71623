use std::f64::consts::PI;
use std::path::Path;

use image::RgbImage;

use crate::physics::GeodesicState;
use crate::rendering::{RenderError, RenderResult};

/// Asymptotic region a ray position belongs to, keyed by the sign of l.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThroatSide {
    /// l > 0: the observer's side of the throat.
    Near,
    /// l <= 0: the far side.
    Far,
}

impl ThroatSide {
    pub fn of(l: f64) -> Self {
        if l > 0.0 {
            ThroatSide::Near
        } else {
            ThroatSide::Far
        }
    }

    /// Contrasting polyline colors for the path pipeline.
    pub fn line_color(self) -> [f32; 3] {
        match self {
            ThroatSide::Near => [1.0, 1.0, 0.0],
            ThroatSide::Far => [1.0, 0.0, 1.0],
        }
    }
}

/// Equirectangular background pair: one sky per side of the throat, sampled
/// by the terminal (phi, theta) of each rendered ray.
pub struct Skybox {
    near: RgbImage,
    far: RgbImage,
}

impl Skybox {
    pub fn new(near: RgbImage, far: RgbImage) -> Self {
        Skybox { near, far }
    }

    /// Load both sides from disk. Image dimensions are taken as-is; the two
    /// sides do not need to match each other.
    pub fn load(near: &Path, far: &Path) -> RenderResult<Self> {
        Ok(Skybox {
            near: load_sky_image(near)?,
            far: load_sky_image(far)?,
        })
    }

    /// Color seen by a ray that terminated at `state`.
    pub fn sample(&self, state: &GeodesicState) -> [u8; 3] {
        let side = ThroatSide::of(state.l);
        let img = match side {
            ThroatSide::Near => &self.near,
            ThroatSide::Far => &self.far,
        };
        let (u, v) = equirect_texel(state.phi, state.theta, img.width(), img.height());
        img.get_pixel(u, v).0
    }
}

/// Map terminal angles to integer texel coordinates. Floored modulo keeps
/// negative angles in range; the clamp absorbs the phi == 2*pi style edge
/// that floating-point reduction can still produce.
pub(crate) fn equirect_texel(phi: f64, theta: f64, width: u32, height: u32) -> (u32, u32) {
    let phi = phi.rem_euclid(2.0 * PI);
    let theta = theta.rem_euclid(PI);
    let u = (phi * width as f64 / (2.0 * PI)) as u32;
    let v = (theta * height as f64 / PI) as u32;
    (u.min(width - 1), v.min(height - 1))
}

fn load_sky_image(path: &Path) -> RenderResult<RgbImage> {
    let img = image::open(path)?.into_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(RenderError::Sky {
            path: path.display().to_string(),
            reason: "empty image".into(),
        });
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(color))
    }

    #[test]
    fn forward_equator_maps_to_left_center() {
        assert_eq!(equirect_texel(0.0, PI / 2.0, 2048, 1024), (0, 512));
    }

    #[test]
    fn negative_angles_wrap_with_floored_modulo() {
        let (u, _) = equirect_texel(-PI / 2.0, PI / 2.0, 2048, 1024);
        // -pi/2 wraps to 3pi/2; rounding in the reduction may move one texel
        assert!((i64::from(u) - 1536).abs() <= 1);
        let (_, v) = equirect_texel(0.0, -0.1, 2048, 1024);
        assert!(v < 1024, "negative theta must wrap into range");
    }

    #[test]
    fn indices_stay_in_bounds_at_the_seam() {
        let (u, v) = equirect_texel(2.0 * PI - 1e-12, PI - 1e-13, 2048, 1024);
        assert!(u < 2048);
        assert!(v < 1024);
    }

    #[test]
    fn terminal_side_selects_the_matching_sky() {
        let sky = Skybox::new(solid(8, 4, [255, 0, 0]), solid(8, 4, [0, 0, 255]));
        let mut state = GeodesicState::new(3.0, PI / 2.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(sky.sample(&state), [255, 0, 0]);
        state.l = -3.0;
        assert_eq!(sky.sample(&state), [0, 0, 255]);
    }

    #[test]
    fn side_flips_exactly_at_zero() {
        assert_eq!(ThroatSide::of(1e-300), ThroatSide::Near);
        assert_eq!(ThroatSide::of(0.0), ThroatSide::Far);
        assert_eq!(ThroatSide::of(-1e-300), ThroatSide::Far);
    }
}
