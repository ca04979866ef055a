//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into flat-colored triangles and drawn
//! with a single pipeline. Overlay text lives in the DOM (see `ui`).

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, RendererError};
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;
