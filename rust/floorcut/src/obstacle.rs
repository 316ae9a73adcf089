// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Obstacles that seed forbidden areas

use crate::error::Result;
use crate::polygon::Polygon;
use floorcut_geometry::Loop;
use nalgebra::Point2;

/// Something a cut must not pass through (column, duct, fixed cabinet)
pub trait Obstacle {
    fn corner_pts(&self) -> Vec<Point2<f64>>;

    fn center(&self) -> Point2<f64>;

    /// Corner loop shrunk toward the center by `scale`
    fn forbidden_loop(&self, scale: f64) -> Result<Loop> {
        let center = self.center();
        let points: Vec<_> = self
            .corner_pts()
            .iter()
            .map(|p| center + (*p - center) * scale)
            .collect();
        Ok(Loop::from_points(&points)?)
    }
}

impl Obstacle for Loop {
    fn corner_pts(&self) -> Vec<Point2<f64>> {
        self.vertices()
    }

    fn center(&self) -> Point2<f64> {
        self.centroid()
    }
}

impl Obstacle for Polygon {
    fn corner_pts(&self) -> Vec<Point2<f64>> {
        self.outer_loop().vertices()
    }

    fn center(&self) -> Point2<f64> {
        self.outer_loop().centroid()
    }
}
