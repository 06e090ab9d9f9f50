//! 2D rendering module
//!
//! `scene` turns simulation state into draw commands; `canvas` replays them
//! on an HTML canvas.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{DrawCmd, SceneOptions, background, entities};
