// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared matchers and outlines for integration tests

#![allow(dead_code)]

use floorcut::{
    CutOperation, FeatureKind, FloorContext, Line2d, MatchedRegion, Point2, Polygon, ShapeMatcher,
};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn outline(points: &[(f64, f64)]) -> Vec<Line2d> {
    let pts: Vec<_> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
    (0..pts.len())
        .map(|i| Line2d::new(pts[i], pts[(i + 1) % pts.len()]))
        .collect()
}

pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::from_points(&[
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ])
    .unwrap()
}

pub fn rectangle_outline() -> Vec<Line2d> {
    outline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 6.0), (0.0, 6.0)])
}

/// 10 x 6 room with a 2 x 3 notch in the top wall
pub fn u_outline() -> Vec<Line2d> {
    outline(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 6.0),
        (6.0, 6.0),
        (6.0, 3.0),
        (4.0, 3.0),
        (4.0, 6.0),
        (0.0, 6.0),
    ])
}

/// 12 x 6 room with two 2 x 3 notches in the top wall
pub fn two_notch_outline() -> Vec<Line2d> {
    outline(&[
        (0.0, 0.0),
        (12.0, 0.0),
        (12.0, 6.0),
        (10.0, 6.0),
        (10.0, 3.0),
        (8.0, 3.0),
        (8.0, 6.0),
        (4.0, 6.0),
        (4.0, 3.0),
        (2.0, 3.0),
        (2.0, 6.0),
        (0.0, 6.0),
    ])
}

/// Fills a rectangular notch: a curve with both ends reflex, flanked by
/// equal-length curves
pub struct NotchFiller {
    pub kind: FeatureKind,
}

impl NotchFiller {
    pub fn new() -> Self {
        Self {
            kind: FeatureKind::ConcaveUShape,
        }
    }

    pub fn with_kind(kind: FeatureKind) -> Self {
        Self { kind }
    }
}

fn is_reflex(incoming: &Line2d, outgoing: &Line2d) -> bool {
    let a = incoming.direction();
    let b = outgoing.direction();
    a.x * b.y - a.y * b.x < -1e-9
}

impl ShapeMatcher for NotchFiller {
    fn kind(&self) -> FeatureKind {
        self.kind.clone()
    }

    fn find_match(&self, polygon: &Polygon, _: &FloorContext) -> Option<MatchedRegion> {
        let curves = polygon.curves();
        let n = curves.len();
        if n < 8 {
            return None;
        }
        (0..n).find_map(|i| {
            let a = &curves[(i + n - 1) % n];
            let b = &curves[i];
            let c = &curves[(i + 1) % n];
            let notch = is_reflex(a, b)
                && is_reflex(b, c)
                && (a.length() - c.length()).abs() < 1e-6;
            notch.then(|| {
                let region = Polygon::from_points(&[a.start(), b.start(), b.end(), c.end()])
                    .unwrap();
                MatchedRegion::new(region, CutOperation::Union)
            })
        })
    }
}

/// Returns its regions one per call, then nothing
pub struct ScriptedMatcher {
    kind: FeatureKind,
    regions: Vec<MatchedRegion>,
    calls: AtomicUsize,
}

impl ScriptedMatcher {
    pub fn new(kind: FeatureKind, regions: Vec<MatchedRegion>) -> Self {
        Self {
            kind,
            regions,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ShapeMatcher for ScriptedMatcher {
    fn kind(&self) -> FeatureKind {
        self.kind.clone()
    }

    fn find_match(&self, _: &Polygon, _: &FloorContext) -> Option<MatchedRegion> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.regions.get(call).cloned()
    }
}

/// Always matches a region far outside the outline
pub struct StuckMatcher;

impl ShapeMatcher for StuckMatcher {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Other("stuck".into())
    }

    fn find_match(&self, _: &Polygon, _: &FloorContext) -> Option<MatchedRegion> {
        Some(MatchedRegion::new(
            rect(100.0, 100.0, 101.0, 101.0),
            CutOperation::Different,
        ))
    }
}
