//! House design data: the fixed vocabularies, the live [`DesignModel`] the
//! session mutates, and the [`Design`] snapshots that get saved and shared.

pub mod model;
pub mod vocabulary;

pub use model::{Design, DesignModel, Position};
pub use vocabulary::{Category, Layer, WALL_PARTS};
