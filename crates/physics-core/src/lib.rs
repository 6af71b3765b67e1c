//! # Physics Core
//!
//! Numerical routines behind the interactive visualizations: electric field
//! streamlines, wave interference, quantum barrier tunneling, Lorentz boosts
//! and two-body collision response.
//!
//! Every routine is synchronous and takes its inputs by value or reference,
//! returning fresh data. The only owned state is the bounded
//! [`TrailBuffer`] and the [`ChangeDetector`] cache.

pub mod cache;
pub mod collision;
pub mod constants;
pub mod error;
pub mod field;
pub mod quantum;
pub mod relativity;
pub mod trail;
pub mod wave;

pub use cache::*;
pub use collision::*;
pub use constants::*;
pub use error::*;
pub use field::*;
pub use quantum::*;
pub use relativity::*;
pub use trail::*;
pub use wave::*;
