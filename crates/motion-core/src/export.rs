//! Serializable views of coordinate tables and traces for external renderers.
//!
//! Arrays are written frame-major as nested lists so a consumer can index
//! `x[frame]` to get the chain's horizontal coordinates at that frame.

use gaitrig_skeleton_model::AxisPair;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::actor::{CoordinateTable, LimbCoordinates};
use crate::trace::{Trace, TraceSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateTableExport {
    pub axes: AxisPair,
    pub reference: String,
    pub frame_count: usize,
    pub limbs: Vec<LimbExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimbExport {
    pub group: String,
    pub chain: Vec<String>,
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceExport {
    pub axes: AxisPair,
    pub reference: String,
    pub traces: Vec<TraceSeriesExport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSeriesExport {
    pub segment: String,
    pub group: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

fn rows(array: &Array2<f64>) -> Vec<Vec<f64>> {
    array.rows().into_iter().map(|row| row.to_vec()).collect()
}

impl From<&LimbCoordinates> for LimbExport {
    fn from(limb: &LimbCoordinates) -> Self {
        Self {
            group: limb.group.clone(),
            chain: limb.chain.clone(),
            x: rows(&limb.x),
            y: rows(&limb.y),
        }
    }
}

impl From<&CoordinateTable> for CoordinateTableExport {
    fn from(table: &CoordinateTable) -> Self {
        Self {
            axes: table.axes(),
            reference: table.reference().to_string(),
            frame_count: table.frame_count(),
            limbs: table.iter().map(LimbExport::from).collect(),
        }
    }
}

impl From<&Trace> for TraceSeriesExport {
    fn from(trace: &Trace) -> Self {
        Self {
            segment: trace.segment.clone(),
            group: trace.group.clone(),
            x: trace.x.clone(),
            y: trace.y.clone(),
        }
    }
}

impl TraceExport {
    /// Export a trace query; traces inherit the table's projection.
    pub fn new(table: &CoordinateTable, traces: &TraceSet) -> Self {
        Self {
            axes: table.axes(),
            reference: table.reference().to_string(),
            traces: traces.iter().map(TraceSeriesExport::from).collect(),
            unresolved: traces.unresolved.clone(),
        }
    }
}
