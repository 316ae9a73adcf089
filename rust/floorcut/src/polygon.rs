// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value-semantic floor polygon and boolean cutting

use crate::error::{Error, Result};
use crate::kernel::GeometryKernel;
use floorcut_geometry::{BooleanOp, CurveOverlap, Line2d, Loop};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Direction alignment threshold when orienting a cutter curve (radians)
const SPLIT_ALIGNMENT_ANGLE: f64 = 0.25;

/// Split pieces shorter than this are merged into their neighbor
const MIN_SPLIT_LENGTH: f64 = 0.001;

/// How a matched region is applied to the polygon it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutOperation {
    /// Add the region (fill a recess)
    Union,
    /// Keep only the region
    Intersect,
    /// Remove the region
    Different,
    /// Remove the region, then split result curves at the region's boundary
    RawDifferent,
}

impl CutOperation {
    fn boolean_op(self) -> BooleanOp {
        match self {
            CutOperation::Union => BooleanOp::Union,
            CutOperation::Intersect => BooleanOp::Intersect,
            CutOperation::Different | CutOperation::RawDifferent => BooleanOp::Difference,
        }
    }
}

/// Closed floor boundary owning its curves
///
/// Curves are copied on construction and the outer loop is normalized to
/// counter-clockwise, so [`Polygon::area`] is positive for valid outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    outer_loop: Loop,
}

impl Polygon {
    /// Build a polygon from a curve chain
    ///
    /// Closure and simplicity are not validated: a malformed chain yields
    /// undefined geometry downstream, not an error.
    pub fn new(curves: &[Line2d]) -> Result<Self> {
        if curves.is_empty() {
            return Err(Error::EmptyPolygon);
        }
        Ok(Self::from_loop(Loop::from_chain(curves.to_vec())))
    }

    /// Build a polygon through `points` (closed automatically)
    pub fn from_points(points: &[Point2<f64>]) -> Result<Self> {
        Ok(Self::from_loop(Loop::from_points(points)?))
    }

    pub fn from_loop(outer_loop: Loop) -> Self {
        Self {
            outer_loop: outer_loop.into_ccw(),
        }
    }

    pub fn curves(&self) -> &[Line2d] {
        self.outer_loop.curves()
    }

    pub fn curve_count(&self) -> usize {
        self.outer_loop.len()
    }

    pub fn outer_loop(&self) -> &Loop {
        &self.outer_loop
    }

    /// Signed area of the outer loop
    pub fn area(&self) -> f64 {
        self.outer_loop.signed_area()
    }

    /// Apply `cutter` to this polygon, returning a new polygon
    ///
    /// The first ring the kernel returns is kept. When the kernel returns
    /// nothing the result is a copy of this polygon.
    pub fn cut(
        &self,
        kernel: &dyn GeometryKernel,
        cutter: &Polygon,
        operation: CutOperation,
    ) -> Result<Polygon> {
        let rings = kernel.boolean(
            operation.boolean_op(),
            std::slice::from_ref(&self.outer_loop),
            std::slice::from_ref(&cutter.outer_loop),
        )?;

        let Some(ring) = rings.into_iter().next() else {
            tracing::warn!(
                ?operation,
                area = self.area(),
                "Boolean cut produced no geometry, keeping original outline"
            );
            return Ok(self.clone());
        };

        let polygon = Polygon::from_loop(ring);
        match operation {
            CutOperation::RawDifferent => polygon.split_along(kernel, cutter),
            _ => Ok(polygon),
        }
    }

    /// Split curves that share only part of their length with the cutter boundary
    fn split_along(&self, kernel: &dyn GeometryKernel, cutter: &Polygon) -> Result<Polygon> {
        let mut curves = Vec::with_capacity(self.curve_count() + 4);
        for curve in self.curves() {
            let partner = cutter.curves().iter().find(|c| {
                matches!(
                    kernel.curve_curve_overlap(curve, c),
                    CurveOverlap::Partial | CurveOverlap::SecondInFirst
                )
            });
            match partner {
                Some(partner) => curves.extend(split_curve_at_overlap(curve, partner)),
                None => curves.push(*curve),
            }
        }
        Ok(Polygon {
            outer_loop: Loop::from_curves(curves)?,
        })
    }
}

/// Split `curve` at the endpoints of its overlap with `cutter`
///
/// Produces up to three collinear pieces covering `curve` exactly. Split
/// points closer than [`MIN_SPLIT_LENGTH`] to a previous split point or to
/// the curve end are dropped, so no sliver piece is emitted and the pieces
/// stay connected.
pub(crate) fn split_curve_at_overlap(curve: &Line2d, cutter: &Line2d) -> SmallVec<[Line2d; 3]> {
    let aligned = if curve.angle_to(cutter) < SPLIT_ALIGNMENT_ANGLE {
        *cutter
    } else {
        cutter.reversed()
    };

    let range = curve.range();
    let t0 = range.clamp(curve.param_at(&aligned.start()));
    let t1 = range.clamp(curve.param_at(&aligned.end()));
    let length = range.length();

    let mut params: SmallVec<[f64; 4]> = SmallVec::new();
    params.push(0.0);
    for t in [t0.min(t1), t0.max(t1)] {
        let last = params[params.len() - 1];
        if t - last >= MIN_SPLIT_LENGTH && length - t >= MIN_SPLIT_LENGTH {
            params.push(t);
        }
    }
    params.push(length);

    let point = |i: usize| -> Point2<f64> {
        if i == 0 {
            curve.start()
        } else if i == params.len() - 1 {
            curve.end()
        } else {
            curve.point_at(params[i])
        }
    };

    (0..params.len() - 1)
        .map(|i| Line2d::new(point(i), point(i + 1)))
        .collect()
}
