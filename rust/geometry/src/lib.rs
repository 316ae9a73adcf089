// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorcut Geometry
//!
//! Straight-curve 2D primitives for floor outline processing: curves with
//! arc-length parameters, closed loops, loop/curve position predicates,
//! collinear wall grouping, and planar booleans backed by i_overlay.

pub mod bool2d;
pub mod curve;
pub mod error;
pub mod line_group;
pub mod loops;
pub mod position;
pub mod tolerance;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use bool2d::{boolean_2d, compute_signed_area, BooleanOp};
pub use curve::{Interval, Line2d};
pub use error::{Error, Result};
pub use line_group::{find_line_group_in_curves, group_collinear_curves, LineGroup};
pub use loops::{Loop, PointLoopPosition};
pub use position::{curve_curve_overlap, loop_to_loop, overlap_segment, CurveOverlap, LoopLoopPosition};
pub use tolerance::LENGTH_EPS;
