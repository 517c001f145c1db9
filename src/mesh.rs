//! Provides the discrete mesh, [`MeshCoord`], [`MeshNode`] and [`MeshCell`].
//!
//! We note that [`MeshCoord`] supports non-negative latitude and longitude only.
//! Therefore, [`MeshNode`] and [`MeshCell`] have the same restriction of [`MeshCoord`].
//!
//! The third digit of [`MeshCoord`] depends on mesh.
//! If the mesh unit is [`MeshUnit::Five`], it takes 0 or 5 only.
//! Hence, the methods that relate with [`MeshCoord`] return [`Err`],
//! if [`MeshUnit::Five`] is given even though the third digit is neither 0 nor 5,
//! in general.
pub use cell::MeshCell;
pub use coord::MeshCoord;
pub use node::MeshNode;
pub use unit::MeshUnit;

mod cell;
mod coord;
mod node;
mod unit;
