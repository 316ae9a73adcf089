// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Position predicates between loops and curves

use crate::bool2d::{bounds_overlap, point_in_contour};
use crate::curve::{segment_distance, Interval, Line2d};
use crate::loops::Loop;

/// Relation of loop `a` to loop `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopLoopPosition {
    /// Disjoint interiors and no boundary contact
    Out,
    /// Boundaries cross or touch (within tolerance)
    Intersect,
    /// `a` lies strictly inside `b`
    Inside,
    /// `b` lies strictly inside `a`
    Contains,
}

/// Collinear overlap relation of curve `a` to curve `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveOverlap {
    /// Not collinear, or collinear sharing at most a point
    None,
    /// Collinear with a shared stretch, neither contains the other
    Partial,
    /// Same extent
    Equal,
    /// `a` is covered by `b`
    FirstInSecond,
    /// `b` is covered by `a`
    SecondInFirst,
}

impl CurveOverlap {
    /// Any variant with a shared stretch of positive length
    pub fn is_overlap(self) -> bool {
        !matches!(self, CurveOverlap::None)
    }
}

/// Classify two loops; boundary touching counts as intersection
pub fn loop_to_loop(a: &Loop, b: &Loop, tolerance: f64) -> LoopLoopPosition {
    let (a_min, a_max) = a.bounds();
    let (b_min, b_max) = b.bounds();
    if !bounds_overlap(&a_min, &a_max, &b_min, &b_max, tolerance) {
        return LoopLoopPosition::Out;
    }

    let touching = a.curves().iter().any(|ca| {
        b.curves()
            .iter()
            .any(|cb| segment_distance(ca, cb) <= tolerance)
    });
    if touching {
        return LoopLoopPosition::Intersect;
    }

    // No boundary contact: containment is decided by any single vertex
    let a_vertices = a.vertices();
    let b_vertices = b.vertices();
    if a_vertices.first().is_some_and(|p| point_in_contour(p, &b_vertices)) {
        LoopLoopPosition::Inside
    } else if b_vertices.first().is_some_and(|p| point_in_contour(p, &a_vertices)) {
        LoopLoopPosition::Contains
    } else {
        LoopLoopPosition::Out
    }
}

/// Classify the collinear overlap of two curves
pub fn curve_curve_overlap(a: &Line2d, b: &Line2d, tolerance: f64) -> CurveOverlap {
    let Some((shared, b_range)) = shared_interval(a, b, tolerance) else {
        return CurveOverlap::None;
    };
    let a_length = a.length();
    if shared.length() <= tolerance {
        return CurveOverlap::None;
    }

    let a_in_b = b_range.min <= tolerance && b_range.max >= a_length - tolerance;
    let b_in_a = b_range.min >= -tolerance && b_range.max <= a_length + tolerance;
    match (a_in_b, b_in_a) {
        (true, true) => CurveOverlap::Equal,
        (true, false) => CurveOverlap::FirstInSecond,
        (false, true) => CurveOverlap::SecondInFirst,
        (false, false) => CurveOverlap::Partial,
    }
}

/// The stretch of `a` shared with `b`, oriented along `a`
pub fn overlap_segment(a: &Line2d, b: &Line2d, tolerance: f64) -> Option<Line2d> {
    let (shared, _) = shared_interval(a, b, tolerance)?;
    if shared.length() <= tolerance {
        return None;
    }
    Some(Line2d::new(a.point_at(shared.min), a.point_at(shared.max)))
}

/// Shared parameter interval on `a` plus `b`'s extent in `a`'s parameters
fn shared_interval(a: &Line2d, b: &Line2d, tolerance: f64) -> Option<(Interval, Interval)> {
    if a.length() <= tolerance || b.length() <= tolerance {
        return None;
    }
    if !a.is_collinear_with(b, tolerance) {
        return None;
    }
    let b_range = Interval::new(a.param_at(&b.start()), a.param_at(&b.end()));
    let shared = a.range().intersection(&b_range)?;
    Some((shared, b_range))
}
