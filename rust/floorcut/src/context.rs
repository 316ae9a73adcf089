// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor context shared with shape matchers

use floorcut_geometry::Loop;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Opening type classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OpeningType {
    Door,
    Window,
    Unknown,
}

/// Door or window in the room boundary
///
/// The engine never inspects openings; they are handed to matchers, which
/// may use them (e.g. to recognize a door hall).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opening {
    pub position: Point2<f64>,
    pub width: f64,
    pub opening_type: OpeningType,
    /// Index into the outline curves, when known
    pub host_curve_index: Option<usize>,
}

impl Opening {
    pub fn new(position: Point2<f64>, width: f64, opening_type: OpeningType) -> Self {
        Self {
            position,
            width,
            opening_type,
            host_curve_index: None,
        }
    }
}

/// Read-only context passed to every matcher call
#[derive(Debug, Clone)]
pub struct FloorContext {
    pub openings: Vec<Opening>,
    pub hint_boxes: Vec<Loop>,
    pub min_box_dimension: f64,
}

impl FloorContext {
    pub fn new(openings: Vec<Opening>) -> Self {
        Self {
            openings,
            hint_boxes: Vec::new(),
            min_box_dimension: f64::INFINITY,
        }
    }
}

impl Default for FloorContext {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
