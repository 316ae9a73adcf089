// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed curve loops

use crate::bool2d::{compute_signed_area, contour_bounds, point_in_contour};
use crate::curve::Line2d;
use crate::error::{Error, Result};
use crate::tolerance::{LENGTH_EPS, LOOP_CLOSURE_EPS};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Where a point sits relative to a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLoopPosition {
    Inside,
    OnBoundary,
    Outside,
}

/// Closed, ordered sequence of curves
///
/// Consecutive curves share endpoints (checked by `from_curves`, not by
/// `from_chain`). Simplicity of the loop is assumed, not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    curves: Vec<Line2d>,
}

impl Loop {
    /// Build a loop through `points`, closing back to the first point
    ///
    /// Repeated consecutive points (and a repeated closing point) are dropped.
    pub fn from_points(points: &[Point2<f64>]) -> Result<Self> {
        let mut unique: Vec<Point2<f64>> = Vec::with_capacity(points.len());
        for p in points {
            if unique.last().map_or(true, |last| (p - last).norm() > LENGTH_EPS) {
                unique.push(*p);
            }
        }
        if unique.len() > 1 && (unique[0] - unique[unique.len() - 1]).norm() <= LENGTH_EPS {
            unique.pop();
        }
        if unique.len() < 3 {
            return Err(Error::InvalidLoop(format!(
                "need at least 3 distinct points, got {}",
                unique.len()
            )));
        }

        let n = unique.len();
        let curves = (0..n)
            .map(|i| Line2d::new(unique[i], unique[(i + 1) % n]))
            .collect();
        Ok(Self { curves })
    }

    /// Build a loop from an ordered curve chain
    pub fn from_curves(curves: Vec<Line2d>) -> Result<Self> {
        if curves.is_empty() {
            return Err(Error::InvalidLoop("loop has no curves".to_string()));
        }
        let n = curves.len();
        for i in 0..n {
            let gap = (curves[i].end() - curves[(i + 1) % n].start()).norm();
            if gap > LOOP_CLOSURE_EPS {
                return Err(Error::InvalidLoop(format!(
                    "curve {} does not meet curve {} (gap {:.6})",
                    i,
                    (i + 1) % n,
                    gap
                )));
            }
        }
        Ok(Self { curves })
    }

    /// Wrap a curve chain as-is; closure is not checked
    ///
    /// Shoelace area and containment treat the chain as implicitly closed,
    /// so an open chain still yields (meaningless) geometry instead of an error.
    pub fn from_chain(curves: Vec<Line2d>) -> Self {
        Self { curves }
    }

    pub fn curves(&self) -> &[Line2d] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Start point of every curve, in order
    pub fn vertices(&self) -> Vec<Point2<f64>> {
        self.curves.iter().map(Line2d::start).collect()
    }

    /// Shoelace area; positive for counter-clockwise loops
    pub fn signed_area(&self) -> f64 {
        compute_signed_area(&self.vertices())
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() >= 0.0
    }

    pub fn reversed(&self) -> Self {
        Self {
            curves: self.curves.iter().rev().map(Line2d::reversed).collect(),
        }
    }

    /// Counter-clockwise version of this loop
    pub fn into_ccw(self) -> Self {
        if self.is_ccw() {
            self
        } else {
            self.reversed()
        }
    }

    /// Average of the vertices
    pub fn centroid(&self) -> Point2<f64> {
        let sum = self
            .curves
            .iter()
            .fold(Vector2::zeros(), |acc, c| acc + c.start().coords);
        Point2::from(sum / self.curves.len().max(1) as f64)
    }

    /// Scale every vertex toward `center` by `factor`
    pub fn scale(&self, factor: f64, center: &Point2<f64>) -> Self {
        Self {
            curves: self.curves.iter().map(|c| c.scaled(factor, center)).collect(),
        }
    }

    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        let origin = Point2::origin();
        contour_bounds(&self.vertices()).unwrap_or((origin, origin))
    }

    pub fn contains_point(&self, pt: &Point2<f64>, tolerance: f64) -> PointLoopPosition {
        if self.curves.iter().any(|c| c.contains_point(pt, tolerance)) {
            return PointLoopPosition::OnBoundary;
        }
        if point_in_contour(pt, &self.vertices()) {
            PointLoopPosition::Inside
        } else {
            PointLoopPosition::Outside
        }
    }
}
