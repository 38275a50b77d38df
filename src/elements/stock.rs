use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Polyline3};

use super::{Dimensions, ElementError};

/// Planks available for fabrication, with their current priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stock {
    pub priority: Vec<String>,
    pub priority_lengths: Vec<f64>,
    pub planks: BTreeMap<String, Plank>,
}

impl Stock {
    /// Every bent curve of every plank, planks in key order.
    ///
    /// # Errors
    /// Fails when a plank's bent geometry is inconsistent.
    pub fn polylines(&self) -> Result<Vec<Polyline3>, ElementError> {
        let mut polylines = Vec::new();
        for plank in self.planks.values() {
            if let Some(geo) = &plank.bended_geo {
                polylines.extend(geo.polylines()?);
            }
        }
        Ok(polylines)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plank {
    pub dimensions: Dimensions,
    pub color: Vec<f64>,
    pub constraints: Option<Constraints>,
    pub bended_geo: Option<BendedGeo>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum curvature the plank tolerates.
    #[serde(default)]
    pub curvature: f64,
}

/// The curves a plank is bent along, stored as one flattened point list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BendedGeo {
    pub count: usize,
    pub curves: Vec<Point3>,
    pub curves_id: Vec<String>,
    pub curves_lengths: Vec<f64>,
}

impl BendedGeo {
    /// Splits the flattened points into `count` equally sized open polylines,
    /// each identified by the matching entry of `curves_id`.
    ///
    /// # Errors
    /// Fails when the number of ids differs from `count` or the points do not
    /// divide evenly.
    pub fn polylines(&self) -> Result<Vec<Polyline3>, ElementError> {
        if self.curves_id.len() != self.count {
            return Err(ElementError::CurveCountMismatch {
                count: self.count,
                ids: self.curves_id.len(),
            });
        }
        if self.count == 0 {
            return Ok(Vec::new());
        }
        if self.curves.len() % self.count != 0 {
            return Err(ElementError::UnevenCurvePoints {
                points: self.curves.len(),
                count: self.count,
            });
        }

        let per_curve = self.curves.len() / self.count;
        if per_curve == 0 {
            return Ok(self
                .curves_id
                .iter()
                .map(|id| Polyline3::new(id.clone(), Vec::new()))
                .collect());
        }

        Ok(self
            .curves
            .chunks(per_curve)
            .zip(&self.curves_id)
            .map(|(points, id)| Polyline3::new(id.clone(), points.to_vec()))
            .collect())
    }
}
