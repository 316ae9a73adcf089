// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Repeated application of one shape matcher

use crate::context::FloorContext;
use crate::error::Result;
use crate::feature::{FeatureKind, ShapeFeature, ShapeMatcher};
use crate::kernel::GeometryKernel;
use crate::polygon::Polygon;

/// Area change below which a cut counts as no progress
const AREA_PROGRESS_EPS: f64 = 1e-6;

/// Default cap on matches applied in one pass
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Why an extraction pass ended
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// The matcher found nothing more
    Exhausted,
    /// The matcher returned a region whose cut left the area unchanged
    NoProgress { kind: FeatureKind, area: f64 },
    /// The per-pass iteration cap was reached
    IterationCap,
}

/// Features produced by one pass, in application order
#[derive(Debug, Clone)]
pub struct Extraction {
    pub features: Vec<ShapeFeature>,
    pub stop: StopReason,
}

/// Drives a single [`ShapeMatcher`] against a polygon
pub struct FeatureExtractor {
    matcher: Box<dyn ShapeMatcher>,
    max_iterations: usize,
}

impl FeatureExtractor {
    pub fn new(matcher: Box<dyn ShapeMatcher>) -> Self {
        Self {
            matcher,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub(crate) fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn kind(&self) -> FeatureKind {
        self.matcher.kind()
    }

    /// Match and cut until the matcher is exhausted.
    ///
    /// Each feature is cut from the previous feature's remainder. `polygon`
    /// itself is never modified.
    pub fn extract_from(
        &self,
        polygon: &Polygon,
        context: &FloorContext,
        kernel: &dyn GeometryKernel,
    ) -> Result<Extraction> {
        let kind = self.matcher.kind();
        let mut current = polygon.clone();
        let mut features = Vec::new();

        let stop = loop {
            if features.len() >= self.max_iterations {
                break StopReason::IterationCap;
            }
            let Some(region) = self.matcher.find_match(&current, context) else {
                break StopReason::Exhausted;
            };

            let feature = ShapeFeature::new(kernel, &current, kind.clone(), region)?;
            let area = current.area();
            if (feature.to_polygon().area() - area).abs() <= AREA_PROGRESS_EPS {
                tracing::warn!(
                    kind = %kind,
                    area,
                    iteration = features.len(),
                    "Matcher region did not change polygon area, stopping extraction"
                );
                break StopReason::NoProgress {
                    kind: kind.clone(),
                    area,
                };
            }

            current = feature.to_polygon().clone();
            features.push(feature);
        };

        tracing::debug!(
            kind = %kind,
            count = features.len(),
            stop = ?stop,
            "Extraction pass complete"
        );

        Ok(Extraction { features, stop })
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("kind", &self.matcher.kind())
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}
