// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry kernel capability injected into a decomposition run
//!
//! Every geometric decision the engine makes (boolean cuts, intersection
//! tests, wall lookup, host ordering) goes through [`GeometryKernel`], so a
//! caller can swap in another engine or a test fake. [`PlanarKernel`] is the
//! default, backed by `floorcut-geometry`.

use crate::error::Result;
use crate::host_info::FeatureHostInfo;
use floorcut_geometry::{
    boolean_2d, curve_curve_overlap, find_line_group_in_curves, loop_to_loop, overlap_segment,
    BooleanOp, CurveOverlap, Line2d, LineGroup, Loop, LoopLoopPosition, LENGTH_EPS,
};

/// Geometry operations the decomposition engine depends on.
///
/// Implementations must be pure: the same inputs always give the same
/// outputs, and no call mutates shared state. That is what makes separate
/// runs safe to execute in parallel.
pub trait GeometryKernel: Send + Sync {
    /// Planar boolean over loop arrays; outer rings of the result, the
    /// preferred ring first. An empty vector means no geometry was produced.
    fn boolean(&self, op: BooleanOp, subject: &[Loop], clip: &[Loop]) -> Result<Vec<Loop>>;

    /// Loop relation; boundary contact within `tolerance` is an intersection.
    fn loop_to_loop(&self, a: &Loop, b: &Loop, tolerance: f64) -> LoopLoopPosition;

    /// Collinear overlap relation of two curves.
    fn curve_curve_overlap(&self, a: &Line2d, b: &Line2d) -> CurveOverlap;

    /// Stretch of `a` shared with `b`, oriented along `a`.
    fn overlap_segment(&self, a: &Line2d, b: &Line2d) -> Option<Line2d>;

    /// Wall line within `curves` carrying `curve`.
    fn find_line_group_in_curves(&self, curve: &Line2d, curves: &[Line2d]) -> Option<LineGroup>;

    /// Canonical ordering of host infos before prefix snapshots are built.
    ///
    /// The default keeps extraction order, so every prefix ends with the most
    /// recent cut and snapshots go from least-cut to most-cut.
    fn sort_host_infos(&self, infos: &mut [FeatureHostInfo]) {
        infos.sort_by_key(|info| info.sequence);
    }
}

/// Default kernel: straight curves, i_overlay booleans
#[derive(Debug, Clone, Copy)]
pub struct PlanarKernel {
    tolerance: f64,
}

impl PlanarKernel {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for PlanarKernel {
    fn default() -> Self {
        Self::new(LENGTH_EPS)
    }
}

impl GeometryKernel for PlanarKernel {
    fn boolean(&self, op: BooleanOp, subject: &[Loop], clip: &[Loop]) -> Result<Vec<Loop>> {
        Ok(boolean_2d(op, subject, clip))
    }

    fn loop_to_loop(&self, a: &Loop, b: &Loop, tolerance: f64) -> LoopLoopPosition {
        loop_to_loop(a, b, tolerance)
    }

    fn curve_curve_overlap(&self, a: &Line2d, b: &Line2d) -> CurveOverlap {
        curve_curve_overlap(a, b, self.tolerance)
    }

    fn overlap_segment(&self, a: &Line2d, b: &Line2d) -> Option<Line2d> {
        overlap_segment(a, b, self.tolerance)
    }

    fn find_line_group_in_curves(&self, curve: &Line2d, curves: &[Line2d]) -> Option<LineGroup> {
        find_line_group_in_curves(curve, curves, self.tolerance)
    }
}
