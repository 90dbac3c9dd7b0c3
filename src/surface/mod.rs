//! # Visual Surface
//!
//! The rendering surface (a document or scene graph owned by the host UI) is
//! reached only through [`VisualSurface`]. Nodes carry string attributes used
//! for lookup, at most one tag per tag group (so material classes are mutually
//! exclusive), an optional position and optional text.
//!
//! [`MemorySurface`] is the in-process implementation: it keeps the node tree
//! and records every call so tests can assert on exactly what was rendered.

pub mod memory;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::design::Position;
use crate::errors::SurfaceError;

pub use memory::{MemorySurface, SurfaceCall};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    House,
    Layer,
    WallPart,
    FurnishingsLayer,
    Furnishing,
    PlacementGrid,
    Mascot,
    Message,
    Sparkle,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub type Attributes = BTreeMap<String, String>;

/// Attribute keys the synchronizer writes and queries.
pub mod attr {
    pub const LAYER: &str = "layer";
    pub const PART: &str = "part";
    pub const FURNISHING: &str = "data-type";
    pub const CATEGORY: &str = "data-category";
    pub const ROLE: &str = "role";
}

/// Tag groups. A node holds at most one tag per group.
pub mod tags {
    pub const MATERIAL: &str = "material";
    pub const FURNISHING: &str = "furnishing";
    pub const TRANSITION: &str = "transition";
    pub const STATE: &str = "state";
    pub const ANIMATION: &str = "animation";
    pub const EFFECT: &str = "effect";
    pub const FEEDBACK: &str = "feedback";
}

/// Build an attribute map from pairs.
pub fn attributes<const N: usize>(pairs: [(&str, &str); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Host rendering capability.
pub trait VisualSurface {
    fn create_node(&mut self, parent: Option<NodeId>, kind: NodeKind, attributes: Attributes) -> NodeId;

    /// Remove a node and everything under it.
    fn remove_node(&mut self, id: NodeId) -> Result<(), SurfaceError>;

    /// Assign `tag` in `group`, replacing whatever the group held.
    fn set_tag(&mut self, id: NodeId, group: &str, tag: &str) -> Result<(), SurfaceError>;

    fn clear_tag(&mut self, id: NodeId, group: &str) -> Result<(), SurfaceError>;

    fn set_position(&mut self, id: NodeId, at: Position) -> Result<(), SurfaceError>;

    fn position(&self, id: NodeId) -> Result<Position, SurfaceError>;

    fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), SurfaceError>;

    /// Live nodes whose attribute `key` equals `value`, in creation order.
    fn query_nodes(&self, key: &str, value: &str) -> Vec<NodeId>;
}
