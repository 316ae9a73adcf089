// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape matchers and the features they produce
//!
//! A [`ShapeMatcher`] recognizes one kind of sub-shape in a polygon and says
//! how to cut it ([`MatchedRegion`]). Applying the cut yields a
//! [`ShapeFeature`]: the matched region, the remainder, and the kind. How a
//! particular shape is recognized is up to the matcher; the engine only
//! drives matchers and consumes features.

use crate::context::FloorContext;
use crate::error::Result;
use crate::kernel::GeometryKernel;
use crate::polygon::{CutOperation, Polygon};
use floorcut_geometry::Line2d;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-shape classification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKind {
    ConcaveUShape,
    ConvexUShape,
    ConvexRightHalfUShape,
    ConvexLeftHalfUShape,
    ConvexLShape,
    ConvexHallway,
    ConvexBalcony,
    ConvexDoorHall,
    /// Kinds defined by custom matchers
    Other(String),
}

impl FeatureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FeatureKind::ConcaveUShape => "concaveUShape",
            FeatureKind::ConvexUShape => "convexUShape",
            FeatureKind::ConvexRightHalfUShape => "convexRightHalfUShape",
            FeatureKind::ConvexLeftHalfUShape => "convexLeftHalfUShape",
            FeatureKind::ConvexLShape => "convexLShape",
            FeatureKind::ConvexHallway => "convexHallway",
            FeatureKind::ConvexBalcony => "convexBalcony",
            FeatureKind::ConvexDoorHall => "convexDoorHall",
            FeatureKind::Other(name) => name,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region found by a matcher and how to apply it
#[derive(Debug, Clone)]
pub struct MatchedRegion {
    pub polygon: Polygon,
    pub operation: CutOperation,
}

impl MatchedRegion {
    pub fn new(polygon: Polygon, operation: CutOperation) -> Self {
        Self { polygon, operation }
    }
}

/// Recognizer for one kind of sub-shape.
///
/// `find_match` must not assume it is called once: extractors call it
/// repeatedly on successively cut polygons until it returns `None`.
pub trait ShapeMatcher: Send + Sync {
    fn kind(&self) -> FeatureKind;

    fn find_match(&self, polygon: &Polygon, context: &FloorContext) -> Option<MatchedRegion>;
}

/// Where a feature meets the floor outline
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureOverlap {
    /// Shared stretch, oriented along `floor_curve`
    pub overlap_curve: Line2d,
    /// Outline curve the feature sits on
    pub floor_curve: Line2d,
}

/// One applied match: the region, what is left after the cut, and the kind
#[derive(Debug, Clone)]
pub struct ShapeFeature {
    kind: FeatureKind,
    operation: CutOperation,
    self_polygon: Polygon,
    to_polygon: Polygon,
    from_area: f64,
}

impl ShapeFeature {
    /// Apply `region` to `from`
    pub fn new(
        kernel: &dyn GeometryKernel,
        from: &Polygon,
        kind: FeatureKind,
        region: MatchedRegion,
    ) -> Result<Self> {
        let to_polygon = from.cut(kernel, &region.polygon, region.operation)?;
        Ok(Self {
            kind,
            operation: region.operation,
            self_polygon: region.polygon,
            to_polygon,
            from_area: from.area(),
        })
    }

    pub fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    pub fn operation(&self) -> CutOperation {
        self.operation
    }

    /// The matched region
    pub fn self_polygon(&self) -> &Polygon {
        &self.self_polygon
    }

    /// The polygon after the cut
    pub fn to_polygon(&self) -> &Polygon {
        &self.to_polygon
    }

    /// Area of the polygon the feature was cut from
    pub fn from_area(&self) -> f64 {
        self.from_area
    }

    /// Area change caused by the cut (positive when a recess was filled)
    pub fn area_delta(&self) -> f64 {
        self.to_polygon.area() - self.from_area
    }

    /// Longest collinear contact between this feature's region and `curves`
    pub fn overlap_with(
        &self,
        kernel: &dyn GeometryKernel,
        curves: &[Line2d],
    ) -> Option<FeatureOverlap> {
        let mut best: Option<FeatureOverlap> = None;
        for floor_curve in curves {
            for own in self.self_polygon.curves() {
                let Some(overlap_curve) = kernel.overlap_segment(floor_curve, own) else {
                    continue;
                };
                let longer = best
                    .as_ref()
                    .map_or(true, |b| overlap_curve.length() > b.overlap_curve.length());
                if longer {
                    best = Some(FeatureOverlap {
                        overlap_curve,
                        floor_curve: *floor_curve,
                    });
                }
            }
        }
        best
    }
}
