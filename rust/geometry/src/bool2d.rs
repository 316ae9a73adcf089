// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations on Outline Loops
//!
//! This module provides planar polygon boolean operations using the i_overlay crate,
//! plus the contour helpers (winding, area, containment) the loop layer builds on.
//! Results come back as outer rings only, ordered by descending area, so callers that
//! want "the" result can take the first ring.

use crate::loops::Loop;
use crate::tolerance::{COLLINEAR_EPS, LENGTH_EPS, MIN_AREA};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Planar set operation applied to subject and clip loops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Intersect,
    Difference,
}

impl BooleanOp {
    fn overlay_rule(self) -> OverlayRule {
        match self {
            BooleanOp::Union => OverlayRule::Union,
            BooleanOp::Intersect => OverlayRule::Intersect,
            BooleanOp::Difference => OverlayRule::Difference,
        }
    }
}

/// Perform a 2D boolean operation between two sets of loops
///
/// # Arguments
/// * `op` - The set operation
/// * `subject` - Loops the operation is applied to
/// * `clip` - Loops applied against the subject
///
/// # Returns
/// The outer ring of every resulting shape, counter-clockwise and simplified,
/// largest area first. Holes are dropped. An empty vector means the operation
/// produced no geometry (e.g. intersecting disjoint loops).
pub fn boolean_2d(op: BooleanOp, subject: &[Loop], clip: &[Loop]) -> Vec<Loop> {
    let subject_paths: Vec<Vec<[f64; 2]>> = subject
        .iter()
        .map(|l| contour_to_path(&ensure_ccw(&l.vertices())))
        .collect();
    let clip_paths: Vec<Vec<[f64; 2]>> = clip
        .iter()
        .map(|l| contour_to_path(&ensure_ccw(&l.vertices())))
        .collect();

    if subject_paths.is_empty() {
        return Vec::new();
    }

    // Result is Vec<Vec<Vec<[f64; 2]>>> - Vec of shapes, each shape is Vec of contours
    let shapes = subject_paths.overlay(&clip_paths, op.overlay_rule(), FillRule::EvenOdd);

    shapes_to_loops(&shapes)
}

/// Check if a contour is valid (has area, not degenerate)
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let area = compute_signed_area(contour).abs();
    area > MIN_AREA
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let area = compute_signed_area(contour);
    if area < 0.0 {
        // Clockwise - reverse to make counter-clockwise
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Simplify a contour by dropping repeated points and collinear vertices
///
/// `epsilon` is compared against the cross product of the two unit edge
/// directions meeting at a vertex, so it is independent of coordinate scale.
pub fn simplify_contour(contour: &[Point2<f64>], epsilon: f64) -> Vec<Point2<f64>> {
    let mut deduped: Vec<Point2<f64>> = Vec::with_capacity(contour.len());
    for p in contour {
        if deduped
            .last()
            .map_or(true, |last| (p - last).norm() > LENGTH_EPS)
        {
            deduped.push(*p);
        }
    }
    while deduped.len() > 1 && (deduped[0] - deduped[deduped.len() - 1]).norm() <= LENGTH_EPS {
        deduped.pop();
    }

    if deduped.len() <= 3 {
        return deduped;
    }

    let mut result = Vec::with_capacity(deduped.len());
    let n = deduped.len();

    for i in 0..n {
        let prev = &deduped[(i + n - 1) % n];
        let curr = &deduped[i];
        let next = &deduped[(i + 1) % n];

        let incoming = (curr - prev).normalize();
        let outgoing = (next - curr).normalize();
        let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;

        if cross.abs() > epsilon {
            result.push(*curr);
        }
    }

    // Ensure we have at least 3 points
    if result.len() < 3 {
        return deduped;
    }

    result
}

/// Check if a point is inside a contour using ray casting
pub fn point_in_contour(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = contour.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &contour[i];
        let pj = &contour[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Compute bounding box of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    if contour.is_empty() {
        return None;
    }

    let mut min = contour[0];
    let mut max = contour[0];

    for p in contour.iter().skip(1) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    Some((min, max))
}

/// Check if two bounding boxes overlap, allowing a gap of `tolerance`
pub fn bounds_overlap(
    a_min: &Point2<f64>,
    a_max: &Point2<f64>,
    b_min: &Point2<f64>,
    b_max: &Point2<f64>,
    tolerance: f64,
) -> bool {
    a_min.x <= b_max.x + tolerance
        && a_max.x + tolerance >= b_min.x
        && a_min.y <= b_max.y + tolerance
        && a_max.y + tolerance >= b_min.y
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

/// Convert i_overlay result shapes back to loops
///
/// i_overlay returns Vec<Vec<Vec<[f64; 2]>>> where:
/// - Outer Vec: list of shapes
/// - Middle Vec: list of contours per shape (first is outer, rest are holes)
/// - Inner Vec: list of points per contour
fn shapes_to_loops(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Loop> {
    let mut rings: Vec<(f64, Loop)> = shapes
        .iter()
        .filter_map(|shape| shape.first())
        .filter_map(|outer| {
            let points: Vec<Point2<f64>> = outer.iter().map(|p| Point2::new(p[0], p[1])).collect();
            let points = ensure_ccw(&simplify_contour(&points, COLLINEAR_EPS));
            if !is_valid_contour(&points) {
                return None;
            }
            let ring = Loop::from_points(&points).ok()?;
            Some((ring.area(), ring))
        })
        .collect();

    rings.sort_by(|a, b| b.0.total_cmp(&a.0));
    rings.into_iter().map(|(_, ring)| ring).collect()
}
