//! Rendering module for the wormhole visualisation
//!
//! Hosts the two pipelines that share the geodesic core: line-based ray
//! paths and full-frame image rendering against an equirectangular sky.

pub mod camera;
pub mod ray_paths;
pub mod renderer;
pub mod sky;

// Re-export commonly used items
pub use camera::Observer;
pub use ray_paths::RayBundle;
pub use renderer::{render_frame, FrameParams};
pub use sky::{Skybox, ThroatSide};

/// Line-segment vertex emitted by the ray-path pipeline: interleaved
/// position and color, ready for upload to any line renderer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("sky image {path}: {reason}")]
    Sky { path: String, reason: String },
}

pub type RenderResult<T> = Result<T, RenderError>;
