//! # Physics Frame
//!
//! Per-frame driver for the physics visualizations. Each scene owns its
//! state explicitly, reads one parameter group from [`FrameParams`] and
//! hands `bytemuck` vertex records to the renderer.
//!
//! A configuration rejected by the core is logged and returned as an error;
//! the scene keeps its last valid output.

pub mod barrier_scene;
pub mod body_scene;
pub mod field_scene;
pub mod params;
pub mod spacetime_scene;
pub mod vertex;
pub mod wave_scene;

pub use barrier_scene::*;
pub use body_scene::*;
pub use field_scene::*;
pub use params::*;
pub use spacetime_scene::*;
pub use vertex::*;
pub use wave_scene::*;
