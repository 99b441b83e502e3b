//! WebGPU rendering module
//!
//! Sprites are drawn as flat-colored quads sized from the atlas. Geometry is
//! built on the CPU in screen pixels and mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use vertex::Vertex;
