// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared numeric tolerances

/// Length tolerance for coincidence and contact tests
pub const LENGTH_EPS: f64 = 1e-6;

/// Maximum gap between consecutive curve endpoints inside a loop
pub const LOOP_CLOSURE_EPS: f64 = 1e-4;

/// Minimum absolute area for a contour to count as non-degenerate
pub const MIN_AREA: f64 = 1e-10;

/// Normalized cross product below which three points are treated as collinear
pub const COLLINEAR_EPS: f64 = 1e-7;
