//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles each frame and
//! drawn with a single flat-color pipeline, letterboxed to the arena's aspect
//! ratio.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, Viewport};
pub use scene::build_frame;
pub use vertex::Vertex;
