// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Round-based decomposition of a floor outline
//!
//! A [`Floorcutter`] runs its extractors in priority order, round after
//! round, against an accumulating [`CutterState`]. Features whose region
//! touches a forbidden area are rejected and become forbidden themselves;
//! the rest are applied to the current outline. After the run, every
//! accepted feature is located on its host wall and one [`FloorResult`] is
//! emitted per prefix of the ordered host infos, from least-cut to most-cut.

use crate::config::CutterConfig;
use crate::context::{FloorContext, Opening};
use crate::error::Result;
use crate::extractor::{FeatureExtractor, StopReason};
use crate::feature::{FeatureKind, ShapeFeature, ShapeMatcher};
use crate::host_info::{feature_host_info, filter_non_adjacent, FeatureHostInfo, FeatureHostInfos};
use crate::kernel::{GeometryKernel, PlanarKernel};
use crate::obstacle::Obstacle;
use crate::polygon::Polygon;
use floorcut_geometry::{Line2d, Loop, LoopLoopPosition};
use nalgebra::Point2;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// Orchestrator flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CutterVariant {
    Floorcutter,
    RegionCutter,
    /// Accepts every extracted feature: no forbidden-area test, no area guard
    RegionDivider,
}

impl CutterVariant {
    pub fn respects_forbidden_areas(self) -> bool {
        !matches!(self, CutterVariant::RegionDivider)
    }

    /// Whether `min_remaining_area_ratio` can end an extractor's pass
    pub fn applies_area_guard(self) -> bool {
        !matches!(self, CutterVariant::RegionDivider)
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    /// The input outline has too few curves to cut
    OutlineTooSimple,
    /// The last round accepted nothing
    NoFeatures,
    /// The current outline has too few curves left
    PolygonTooSimple,
    /// `max_rounds` rounds were run
    RoundLimit,
}

/// What happened in one round
#[derive(Debug, Clone, Default)]
pub struct RoundRecord {
    pub accepted: Vec<Arc<ShapeFeature>>,
    pub rejected: Vec<Arc<ShapeFeature>>,
    /// Extraction passes ended by the non-progress guard
    pub stalled: Vec<StopReason>,
}

/// Accumulator threaded through rounds
#[derive(Debug, Clone)]
pub struct CutterState {
    pub current: Polygon,
    /// Grows monotonically during a run
    pub forbidden: Vec<Loop>,
    pub rounds: Vec<RoundRecord>,
}

impl CutterState {
    /// Accepted features of all rounds, in acceptance order
    pub fn accepted_features(&self) -> impl Iterator<Item = &Arc<ShapeFeature>> {
        self.rounds.iter().flat_map(|r| r.accepted.iter())
    }
}

/// Final state of a run and why it stopped
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub state: CutterState,
    pub termination: TerminationReason,
}

/// One decomposition snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorResult {
    pub floor_outer_loop: Loop,
    pub feature_host_infos: FeatureHostInfos,
}

impl FloorResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone)]
struct ObstacleShape {
    corners: Vec<Point2<f64>>,
    center: Point2<f64>,
}

impl Obstacle for ObstacleShape {
    fn corner_pts(&self) -> Vec<Point2<f64>> {
        self.corners.clone()
    }

    fn center(&self) -> Point2<f64> {
        self.center
    }
}

/// Feature decomposition engine for one floor outline
pub struct Floorcutter {
    variant: CutterVariant,
    kernel: Arc<dyn GeometryKernel>,
    config: CutterConfig,
    target: Polygon,
    context: FloorContext,
    extractors: Vec<FeatureExtractor>,
    obstacles: Vec<ObstacleShape>,
}

impl Floorcutter {
    /// Create a cutter for `outline`; `matchers` are in priority order
    pub fn new(
        outline: &[Line2d],
        openings: Vec<Opening>,
        matchers: Vec<Box<dyn ShapeMatcher>>,
    ) -> Result<Self> {
        let config = CutterConfig::default();
        let extractors = matchers
            .into_iter()
            .map(|m| FeatureExtractor::new(m).with_max_iterations(config.max_extractions_per_pass))
            .collect();
        Ok(Self {
            variant: CutterVariant::Floorcutter,
            kernel: Arc::new(PlanarKernel::default()),
            config,
            target: Polygon::new(outline)?,
            context: FloorContext::new(openings),
            extractors,
            obstacles: Vec::new(),
        })
    }

    pub fn region_cutter(
        outline: &[Line2d],
        openings: Vec<Opening>,
        matchers: Vec<Box<dyn ShapeMatcher>>,
    ) -> Result<Self> {
        Ok(Self::new(outline, openings, matchers)?.with_variant(CutterVariant::RegionCutter))
    }

    pub fn region_divider(
        outline: &[Line2d],
        openings: Vec<Opening>,
        matchers: Vec<Box<dyn ShapeMatcher>>,
    ) -> Result<Self> {
        Ok(Self::new(outline, openings, matchers)?.with_variant(CutterVariant::RegionDivider))
    }

    pub fn with_variant(mut self, variant: CutterVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_kernel(mut self, kernel: Arc<dyn GeometryKernel>) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_config(mut self, config: CutterConfig) -> Result<Self> {
        config.validate()?;
        for extractor in &mut self.extractors {
            extractor.set_max_iterations(config.max_extractions_per_pass);
        }
        self.config = config;
        Ok(self)
    }

    pub fn with_obstacle(mut self, obstacle: &dyn Obstacle) -> Self {
        self.obstacles.push(ObstacleShape {
            corners: obstacle.corner_pts(),
            center: obstacle.center(),
        });
        self
    }

    pub fn with_hint_boxes(mut self, hint_boxes: Vec<Loop>) -> Self {
        self.context.hint_boxes = hint_boxes;
        self
    }

    pub fn variant(&self) -> CutterVariant {
        self.variant
    }

    pub fn config(&self) -> &CutterConfig {
        &self.config
    }

    pub fn target(&self) -> &Polygon {
        &self.target
    }

    pub fn context(&self) -> &FloorContext {
        &self.context
    }

    /// State before the first round: the target outline and scaled obstacles
    pub fn initial_state(&self) -> Result<CutterState> {
        let forbidden = self
            .obstacles
            .iter()
            .map(|o| o.forbidden_loop(self.config.forbidden_area_scale))
            .collect::<Result<Vec<_>>>()?;
        Ok(CutterState {
            current: self.target.clone(),
            forbidden,
            rounds: Vec::new(),
        })
    }

    /// Run every extractor once against `state.current`
    pub fn run_round(&self, mut state: CutterState) -> Result<CutterState> {
        let kernel = self.kernel.as_ref();
        let min_area = self
            .config
            .min_remaining_area_ratio
            .filter(|_| self.variant.applies_area_guard())
            .map(|ratio| ratio * self.target.area());
        let mut record = RoundRecord::default();

        for extractor in &self.extractors {
            let extraction = extractor.extract_from(&state.current, &self.context, kernel)?;
            if matches!(extraction.stop, StopReason::NoProgress { .. }) {
                record.stalled.push(extraction.stop.clone());
            }

            for feature in extraction.features {
                let feature = Arc::new(feature);
                if self.variant.respects_forbidden_areas()
                    && self.intersects_forbidden(&state.forbidden, &feature)
                {
                    tracing::debug!(
                        kind = %feature.kind(),
                        forbidden = state.forbidden.len(),
                        "Rejecting feature intersecting forbidden area"
                    );
                    state
                        .forbidden
                        .push(feature.self_polygon().outer_loop().clone());
                    record.rejected.push(feature);
                    continue;
                }

                if let Some(min_area) = min_area {
                    if !(feature.to_polygon().area() > min_area) {
                        tracing::debug!(
                            kind = %feature.kind(),
                            area = feature.to_polygon().area(),
                            min_area,
                            "Cut leaves too little area, ending pass"
                        );
                        break;
                    }
                }

                state.current = feature.to_polygon().clone();
                record.accepted.push(feature);
            }
        }

        tracing::debug!(
            round = state.rounds.len(),
            accepted = record.accepted.len(),
            rejected = record.rejected.len(),
            curves = state.current.curve_count(),
            "Round complete"
        );
        state.rounds.push(record);
        Ok(state)
    }

    /// Whether the run is over after the rounds recorded in `state`
    pub fn termination(&self, state: &CutterState) -> Option<TerminationReason> {
        let min_curves = self.config.min_curve_count;
        if self.target.curve_count() < min_curves {
            return Some(TerminationReason::OutlineTooSimple);
        }
        let last = state.rounds.last()?;
        if last.accepted.is_empty() {
            Some(TerminationReason::NoFeatures)
        } else if state.current.curve_count() < min_curves {
            Some(TerminationReason::PolygonTooSimple)
        } else if state.rounds.len() >= self.config.max_rounds {
            Some(TerminationReason::RoundLimit)
        } else {
            None
        }
    }

    /// Run rounds until a termination condition holds
    pub fn decompose(&self) -> Result<Decomposition> {
        let mut state = self.initial_state()?;
        let termination = loop {
            if let Some(reason) = self.termination(&state) {
                break reason;
            }
            state = self.run_round(state)?;
        };

        let mut counts: FxHashMap<&FeatureKind, usize> = FxHashMap::default();
        for feature in state.accepted_features() {
            *counts.entry(feature.kind()).or_insert(0) += 1;
        }
        tracing::info!(
            variant = ?self.variant,
            rounds = state.rounds.len(),
            ?termination,
            ?counts,
            forbidden = state.forbidden.len(),
            area = state.current.area(),
            "Floor decomposition complete"
        );

        Ok(Decomposition { state, termination })
    }

    /// Decompose and derive one snapshot per host-info prefix
    pub fn execute(&self) -> Result<Vec<FloorResult>> {
        let decomposition = self.decompose()?;
        Ok(self.results(&decomposition.state))
    }

    fn results(&self, state: &CutterState) -> Vec<FloorResult> {
        let kernel = self.kernel.as_ref();
        let mut infos: Vec<FeatureHostInfo> = state
            .accepted_features()
            .enumerate()
            .filter_map(|(sequence, feature)| {
                feature_host_info(
                    kernel,
                    feature,
                    sequence,
                    feature.to_polygon().curves(),
                    &self.config,
                )
            })
            .collect();
        kernel.sort_host_infos(&mut infos);

        (1..=infos.len())
            .filter_map(|len| {
                let filtered = filter_non_adjacent(kernel, &self.config, &infos[..len]);
                let floor_outer_loop = filtered.last()?.feature.to_polygon().outer_loop().clone();
                Some(FloorResult {
                    floor_outer_loop,
                    feature_host_infos: FeatureHostInfos::aggregate(filtered),
                })
            })
            .collect()
    }

    fn intersects_forbidden(&self, forbidden: &[Loop], feature: &ShapeFeature) -> bool {
        let region = feature.self_polygon().outer_loop();
        forbidden.iter().any(|f| {
            self.kernel
                .loop_to_loop(f, region, self.config.forbidden_tolerance)
                != LoopLoopPosition::Out
        })
    }
}

/// Execute independent cutters (e.g. one per room) in parallel
pub fn execute_all(cutters: &[Floorcutter]) -> Vec<Result<Vec<FloorResult>>> {
    cutters.par_iter().map(Floorcutter::execute).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::MatchedRegion;
    use crate::polygon::CutOperation;

    fn outline(points: &[(f64, f64)]) -> Vec<Line2d> {
        let pts: Vec<_> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        (0..pts.len())
            .map(|i| Line2d::new(pts[i], pts[(i + 1) % pts.len()]))
            .collect()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::from_points(&[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    /// Fills the 2x3 notch of the test outline once
    struct Once;

    impl ShapeMatcher for Once {
        fn kind(&self) -> FeatureKind {
            FeatureKind::ConcaveUShape
        }

        fn find_match(&self, polygon: &Polygon, _: &FloorContext) -> Option<MatchedRegion> {
            (polygon.curve_count() > 4)
                .then(|| MatchedRegion::new(rect(4.0, 3.0, 6.0, 6.0), CutOperation::Union))
        }
    }

    fn notched() -> Vec<Line2d> {
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

    #[test]
    fn test_variant_forbidden_policy() {
        assert!(CutterVariant::Floorcutter.respects_forbidden_areas());
        assert!(CutterVariant::RegionCutter.respects_forbidden_areas());
        assert!(!CutterVariant::RegionDivider.respects_forbidden_areas());
        assert!(CutterVariant::Floorcutter.applies_area_guard());
        assert!(CutterVariant::RegionCutter.applies_area_guard());
        assert!(!CutterVariant::RegionDivider.applies_area_guard());
    }

    #[test]
    fn test_simple_outline_terminates_before_first_round() {
        let cutter = Floorcutter::new(
            &outline(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]),
            Vec::new(),
            vec![Box::new(Once)],
        )
        .unwrap();
        let state = cutter.initial_state().unwrap();
        assert_eq!(
            cutter.termination(&state),
            Some(TerminationReason::OutlineTooSimple)
        );
    }

    #[test]
    fn test_run_round_is_a_pure_step() {
        let cutter = Floorcutter::new(&notched(), Vec::new(), vec![Box::new(Once)]).unwrap();
        let initial = cutter.initial_state().unwrap();
        assert_eq!(cutter.termination(&initial), None);

        let after = cutter.run_round(initial.clone()).unwrap();
        assert_eq!(after.rounds.len(), 1);
        assert_eq!(after.rounds[0].accepted.len(), 1);
        assert_eq!(after.current.curve_count(), 4);
        assert_eq!(
            cutter.termination(&after),
            Some(TerminationReason::PolygonTooSimple)
        );
        // Input state is untouched
        assert_eq!(initial.current.curve_count(), 8);
        assert!(initial.rounds.is_empty());
    }

    #[test]
    fn test_area_guard_ends_pass() {
        let config = CutterConfig {
            min_remaining_area_ratio: Some(0.99),
            ..CutterConfig::default()
        };
        let cutter = Floorcutter::new(&notched(), Vec::new(), vec![Box::new(Once)])
            .unwrap()
            .with_config(config)
            .unwrap();
        // Filling the notch grows the area, so the guard does not fire
        let state = cutter.run_round(cutter.initial_state().unwrap()).unwrap();
        assert_eq!(state.rounds[0].accepted.len(), 1);
    }

    /// Fills whatever the first hint box covers
    struct FromHints;

    impl ShapeMatcher for FromHints {
        fn kind(&self) -> FeatureKind {
            FeatureKind::ConcaveUShape
        }

        fn find_match(&self, polygon: &Polygon, context: &FloorContext) -> Option<MatchedRegion> {
            let hint = context.hint_boxes.first()?;
            (polygon.curve_count() > 4).then(|| {
                MatchedRegion::new(Polygon::from_loop(hint.clone()), CutOperation::Union)
            })
        }
    }

    #[test]
    fn test_hint_boxes_reach_matchers() {
        let cutter = Floorcutter::new(&notched(), Vec::new(), vec![Box::new(FromHints)]).unwrap();
        assert_eq!(
            cutter.decompose().unwrap().termination,
            TerminationReason::NoFeatures
        );

        let hint = rect(4.0, 3.0, 6.0, 6.0).outer_loop().clone();
        let cutter = Floorcutter::new(&notched(), Vec::new(), vec![Box::new(FromHints)])
            .unwrap()
            .with_hint_boxes(vec![hint]);
        assert_eq!(cutter.context().hint_boxes.len(), 1);
        let decomposition = cutter.decompose().unwrap();
        assert_eq!(decomposition.state.accepted_features().count(), 1);
        assert_eq!(decomposition.state.current.curve_count(), 4);
    }

    #[test]
    fn test_with_config_validates() {
        let config = CutterConfig {
            max_rounds: 0,
            ..CutterConfig::default()
        };
        let result = Floorcutter::new(&notched(), Vec::new(), Vec::new())
            .unwrap()
            .with_config(config);
        assert!(result.is_err());
    }
}
