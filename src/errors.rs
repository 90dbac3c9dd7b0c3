use thiserror::Error;

use crate::surface::NodeId;

/// A sharing token or history record that could not be turned back into a design.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty design token")]
    Empty,

    #[error("design token exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// The token is not valid base64.
    #[error("token is not validly encoded: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a design document.
    #[error("token is not a valid design: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised by a visual surface when an operation targets a node that is gone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("visual node {0} does not exist")]
    NodeMissing(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// A key outside the fixed vocabulary found while applying a design.
/// Reported and skipped, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownKey {
    #[error("unknown layer or material {layer}={material}")]
    Layer { layer: String, material: String },

    #[error("unknown furnishing category {0}")]
    Category(String),

    #[error("unknown furnishing {category}/{furnishing}")]
    Furnishing {
        category: String,
        furnishing: String,
    },
}
