// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grouping of consecutive collinear curves into wall lines
//!
//! Outlines produced by splitting cuts often carry several collinear curves
//! along one physical wall. Host positions are measured along the whole wall,
//! so curves are grouped before parameterization.

use crate::curve::Line2d;
use crate::position::curve_curve_overlap;

/// A wall line and the curve that was looked up on it
#[derive(Debug, Clone, PartialEq)]
pub struct LineGroup {
    /// Line from the first member's start to the last member's end
    pub line: Line2d,
    /// Group number, in walk order
    pub group: usize,
    /// Index of the looked-up curve in the input list
    pub index: usize,
}

/// Partition a closed curve list into runs of collinear, same-direction curves
///
/// Runs are cyclic: a run may wrap from the end of the list to its start.
/// Each run lists curve indices in walk order.
pub fn group_collinear_curves(curves: &[Line2d], tolerance: f64) -> Vec<Vec<usize>> {
    let n = curves.len();
    if n == 0 {
        return Vec::new();
    }

    let continues = |prev: usize, next: usize| -> bool {
        let a = &curves[prev];
        let b = &curves[next];
        (a.end() - b.start()).norm() <= tolerance
            && a.is_collinear_with(b, tolerance)
            && a.direction().dot(&b.direction()) > 0.0
    };

    // Start the walk at a curve that opens a run
    let start = (0..n)
        .find(|&i| !continues((i + n - 1) % n, i))
        .unwrap_or(0);

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for k in 0..n {
        let idx = (start + k) % n;
        let prev = (idx + n - 1) % n;
        match groups.last_mut() {
            Some(group) if k > 0 && continues(prev, idx) => group.push(idx),
            _ => groups.push(vec![idx]),
        }
    }
    groups
}

/// Locate the wall line that carries `curve` within `curves`
///
/// The curve is matched by endpoint equality first, then by any collinear
/// overlap. Returns `None` when no curve of the list carries it.
pub fn find_line_group_in_curves(
    curve: &Line2d,
    curves: &[Line2d],
    tolerance: f64,
) -> Option<LineGroup> {
    let index = curves
        .iter()
        .position(|c| c.approx_eq(curve, tolerance))
        .or_else(|| {
            curves
                .iter()
                .position(|c| curve_curve_overlap(c, curve, tolerance).is_overlap())
        })?;

    let groups = group_collinear_curves(curves, tolerance);
    let (group, members) = groups
        .iter()
        .enumerate()
        .find(|(_, members)| members.contains(&index))?;

    let first = &curves[*members.first()?];
    let last = &curves[*members.last()?];

    Some(LineGroup {
        line: Line2d::new(first.start(), last.end()),
        group,
        index,
    })
}
