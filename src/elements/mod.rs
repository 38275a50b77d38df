//! serde models of the JSON scene description exchanged with the host.
//!
//! These carry the fabrication data around the resolver: mesh payloads for
//! the parts, the stock of bent planks whose curves become [`Polyline3`]s, and
//! the inventory of members whose spans become [`EndpointPair`]s.
//!
//! [`Polyline3`]: crate::geom::Polyline3
//! [`EndpointPair`]: crate::priority::EndpointPair

mod inventory;
mod mesh;
mod stock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use inventory::{Inventory, MemberData};
pub use mesh::{MeshData, MultipleMeshes};
pub use stock::{BendedGeo, Constraints, Plank, Stock};

#[derive(Debug, thiserror::Error)]
pub enum ElementError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("face {face} has {vertex_count} vertices, expected 3")]
    NonTriangularFace { face: usize, vertex_count: usize },

    #[error("face {face} refers to vertex {index} but the mesh has {vertex_count}")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("bent geometry declares {count} curves but has {ids} curve ids")]
    CurveCountMismatch { count: usize, ids: usize },

    #[error("{points} curve points cannot be split evenly into {count} curves")]
    UnevenCurvePoints { points: usize, count: usize },
}

/// Width, height and length of a part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub length: f64,
}

/// Parse any of the element models from JSON.
///
/// # Errors
/// Returns [`ElementError::Json`] when the document does not match `T`.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, ElementError> {
    Ok(serde_json::from_str(json)?)
}
