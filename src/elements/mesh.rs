use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Vec3};

use super::{Dimensions, ElementError};

/// Triangle mesh payload of a single part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshData {
    pub name: String,
    pub dimensions: Option<Dimensions>,
    /// RGBA in `[0, 1]`.
    pub color: Vec<f64>,
    pub faces: Vec<Vec<u32>>,
    pub vertices: Vec<Point3>,
    pub normals: Vec<Vec3>,
    pub uv: Vec<[f64; 2]>,
}

impl MeshData {
    /// Flattens the faces into a triangle index buffer.
    ///
    /// # Errors
    /// Fails when a face is not a triangle or points past the vertex list.
    pub fn triangles(&self) -> Result<Vec<u32>, ElementError> {
        let mut indices = Vec::with_capacity(self.faces.len() * 3);
        for (face, corners) in self.faces.iter().enumerate() {
            if corners.len() != 3 {
                return Err(ElementError::NonTriangularFace {
                    face,
                    vertex_count: corners.len(),
                });
            }
            if let Some(&index) = corners
                .iter()
                .find(|&&index| index as usize >= self.vertices.len())
            {
                return Err(ElementError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
            indices.extend_from_slice(corners);
        }
        Ok(indices)
    }

    /// Whether normals need to be recomputed by the renderer.
    #[must_use]
    pub fn needs_normals(&self) -> bool {
        self.normals.len() != self.vertices.len()
    }
}

/// A named collection of meshes, e.g. every part of one assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultipleMeshes {
    pub uid: String,
    pub elements: BTreeMap<String, MeshData>,
}
