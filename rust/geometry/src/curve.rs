// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight 2D curves and their parametric ranges
//!
//! A [`Line2d`] is parameterized by arc length from its start point, so its
//! range is always `[0, length]`. Parameters of points off the segment are
//! still defined (they are projections onto the infinite carrier line), which
//! is what host-position derivation relies on.

use crate::error::{Error, Result};
use crate::tolerance::LENGTH_EPS;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Closed parameter interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create an interval from two bounds in any order
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a value into the interval
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.min - tolerance && value <= self.max + tolerance
    }

    /// Overlapping part of two intervals, if any
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Interval { min, max })
    }
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Straight line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2d {
    start: Point2<f64>,
    end: Point2<f64>,
}

impl Line2d {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    /// Create a segment, rejecting zero-length input
    pub fn try_new(start: Point2<f64>, end: Point2<f64>) -> Result<Self> {
        let line = Self::new(start, end);
        let length = line.length();
        if length < LENGTH_EPS {
            return Err(Error::DegenerateCurve(length));
        }
        Ok(line)
    }

    pub fn start(&self) -> Point2<f64> {
        self.start
    }

    pub fn end(&self) -> Point2<f64> {
        self.end
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction; zero vector for degenerate segments
    pub fn direction(&self) -> Vector2<f64> {
        let delta = self.end - self.start;
        let length = delta.norm();
        if length < f64::EPSILON {
            Vector2::zeros()
        } else {
            delta / length
        }
    }

    /// Parametric range of the segment, `[0, length]`
    pub fn range(&self) -> Interval {
        Interval::new(0.0, self.length())
    }

    /// Arc-length parameter of the projection of `pt` onto the carrier line
    pub fn param_at(&self, pt: &Point2<f64>) -> f64 {
        (pt - self.start).dot(&self.direction())
    }

    pub fn point_at(&self, param: f64) -> Point2<f64> {
        self.start + self.direction() * param
    }

    /// Distance from `pt` to the infinite carrier line
    pub fn distance_to_line(&self, pt: &Point2<f64>) -> f64 {
        let dir = self.direction();
        if dir == Vector2::zeros() {
            return (pt - self.start).norm();
        }
        cross(&dir, &(pt - self.start)).abs()
    }

    /// Distance from `pt` to the segment itself
    pub fn distance_to_point(&self, pt: &Point2<f64>) -> f64 {
        let closest = self.point_at(self.range().clamp(self.param_at(pt)));
        (pt - closest).norm()
    }

    /// True when the projection of `pt` falls within the segment's range
    pub fn contains_projected_pt(&self, pt: &Point2<f64>, tolerance: f64) -> bool {
        self.range().contains(self.param_at(pt), tolerance)
    }

    pub fn contains_point(&self, pt: &Point2<f64>, tolerance: f64) -> bool {
        self.distance_to_point(pt) <= tolerance
    }

    /// Both endpoints of `other` lie on this segment's carrier line
    pub fn is_collinear_with(&self, other: &Line2d, tolerance: f64) -> bool {
        self.distance_to_line(&other.start) <= tolerance
            && self.distance_to_line(&other.end) <= tolerance
    }

    /// Angle between the two directions, in `[0, π]`
    pub fn angle_to(&self, other: &Line2d) -> f64 {
        let a = self.direction();
        let b = other.direction();
        cross(&a, &b).atan2(a.dot(&b)).abs()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Scale both endpoints toward `center`
    pub fn scaled(&self, factor: f64, center: &Point2<f64>) -> Self {
        let scale = |p: Point2<f64>| center + (p - center) * factor;
        Self::new(scale(self.start), scale(self.end))
    }

    /// Endpoint-wise comparison (same orientation)
    pub fn approx_eq(&self, other: &Line2d, tolerance: f64) -> bool {
        (self.start - other.start).norm() <= tolerance && (self.end - other.end).norm() <= tolerance
    }
}

/// Shortest distance between two segments
pub fn segment_distance(a: &Line2d, b: &Line2d) -> f64 {
    if segments_cross(a, b) {
        return 0.0;
    }
    a.distance_to_point(&b.start)
        .min(a.distance_to_point(&b.end))
        .min(b.distance_to_point(&a.start))
        .min(b.distance_to_point(&a.end))
}

/// Proper crossing test: each segment strictly separates the other's endpoints
fn segments_cross(a: &Line2d, b: &Line2d) -> bool {
    let d1 = cross(&(a.end - a.start), &(b.start - a.start));
    let d2 = cross(&(a.end - a.start), &(b.end - a.start));
    let d3 = cross(&(b.end - b.start), &(a.start - b.start));
    let d4 = cross(&(b.end - b.start), &(a.end - b.start));
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
