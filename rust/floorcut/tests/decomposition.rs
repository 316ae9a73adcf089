// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end decomposition runs over small synthetic rooms

mod common;

use approx::assert_relative_eq;
use common::*;
use floorcut::{
    execute_all, CutOperation, CutterConfig, FeatureKind, Floorcutter, Loop, MatchedRegion,
    Point2, ShapeMatcher, StopReason, TerminationReason,
};

fn column(x0: f64, y0: f64, x1: f64, y1: f64) -> Loop {
    Loop::from_points(&[
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ])
    .unwrap()
}

#[test]
fn test_rectangle_yields_no_results() {
    init_tracing();
    let cutter =
        Floorcutter::new(&rectangle_outline(), Vec::new(), vec![Box::new(NotchFiller::new())])
            .unwrap();

    let decomposition = cutter.decompose().unwrap();
    assert_eq!(decomposition.termination, TerminationReason::OutlineTooSimple);
    assert!(decomposition.state.rounds.is_empty());
    assert!(cutter.execute().unwrap().is_empty());
}

#[test]
fn test_u_outline_single_result() {
    init_tracing();
    let cutter =
        Floorcutter::new(&u_outline(), Vec::new(), vec![Box::new(NotchFiller::new())]).unwrap();

    let results = cutter.execute().unwrap();
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result.floor_outer_loop.len(), 4);
    assert_relative_eq!(result.floor_outer_loop.area(), 60.0, epsilon = 1e-6);

    let infos = &result.feature_host_infos;
    assert_eq!(infos.count, 1);
    let info = &infos.host_infos[0];
    assert_eq!(info.kind, FeatureKind::ConcaveUShape);
    assert_relative_eq!(info.host_curve_length, 10.0, epsilon = 1e-6);
    assert_relative_eq!(info.pos_param.start_param, 0.4, epsilon = 1e-6);
    assert_relative_eq!(info.pos_param.end_param, 0.6, epsilon = 1e-6);
    assert_relative_eq!(info.pos_param.center_param, 0.5, epsilon = 1e-6);
    assert_eq!(info.z_bottom, 0.0);
    assert_eq!(info.z_top, 2.8);
}

#[test]
fn test_first_registered_matcher_wins() {
    let matchers: Vec<Box<dyn ShapeMatcher>> = vec![
        Box::new(NotchFiller::new()),
        Box::new(NotchFiller::with_kind(FeatureKind::ConvexUShape)),
    ];
    let cutter = Floorcutter::new(&u_outline(), Vec::new(), matchers).unwrap();

    let decomposition = cutter.decompose().unwrap();
    let kinds: Vec<_> = decomposition
        .state
        .accepted_features()
        .map(|f| f.kind().clone())
        .collect();
    assert_eq!(kinds, vec![FeatureKind::ConcaveUShape]);
}

#[test]
fn test_floorcutter_rejects_feature_over_obstacle() {
    let obstacle = column(4.5, 3.5, 5.5, 5.5);
    let cutter =
        Floorcutter::new(&u_outline(), Vec::new(), vec![Box::new(NotchFiller::new())])
            .unwrap()
            .with_obstacle(&obstacle);

    let decomposition = cutter.decompose().unwrap();
    assert_eq!(decomposition.termination, TerminationReason::NoFeatures);
    let round = &decomposition.state.rounds[0];
    assert!(round.accepted.is_empty());
    assert_eq!(round.rejected.len(), 1);
    // Obstacle plus the rejected region
    assert_eq!(decomposition.state.forbidden.len(), 2);
    // Outline untouched
    assert_eq!(decomposition.state.current.curve_count(), 8);

    assert!(cutter.execute().unwrap().is_empty());
}

#[test]
fn test_region_cutter_matches_floorcutter() {
    let obstacle = column(4.5, 3.5, 5.5, 5.5);
    let cutter =
        Floorcutter::region_cutter(&u_outline(), Vec::new(), vec![Box::new(NotchFiller::new())])
            .unwrap()
            .with_obstacle(&obstacle);
    assert!(cutter.execute().unwrap().is_empty());
}

#[test]
fn test_region_divider_ignores_obstacles() {
    let obstacle = column(4.5, 3.5, 5.5, 5.5);
    let cutter =
        Floorcutter::region_divider(&u_outline(), Vec::new(), vec![Box::new(NotchFiller::new())])
            .unwrap()
            .with_obstacle(&obstacle);

    let results = cutter.execute().unwrap();
    assert_eq!(results.len(), 1);
    assert_relative_eq!(results[0].floor_outer_loop.area(), 60.0, epsilon = 1e-6);
}

#[test]
fn test_region_divider_skips_area_guard() {
    // Leaves 18 of 60, below the default 0.5 ratio
    let divide = || {
        vec![Box::new(ScriptedMatcher::new(
            FeatureKind::ConvexBalcony,
            vec![MatchedRegion::new(rect(0.0, 0.0, 8.0, 6.0), CutOperation::Different)],
        )) as Box<dyn ShapeMatcher>]
    };

    let divider = Floorcutter::region_divider(&two_notch_outline(), Vec::new(), divide()).unwrap();
    let decomposition = divider.decompose().unwrap();
    assert_eq!(decomposition.state.rounds[0].accepted.len(), 1);
    assert_relative_eq!(decomposition.state.current.area(), 18.0, epsilon = 1e-6);

    let cutter = Floorcutter::new(&two_notch_outline(), Vec::new(), divide()).unwrap();
    let decomposition = cutter.decompose().unwrap();
    assert!(decomposition.state.rounds[0].accepted.is_empty());
    assert_eq!(decomposition.termination, TerminationReason::NoFeatures);
    assert_relative_eq!(decomposition.state.current.area(), 60.0, epsilon = 1e-6);
}

#[test]
fn test_difference_cuts_shrink_snapshots() {
    let strips = vec![
        MatchedRegion::new(rect(0.0, 0.0, 1.0, 6.0), CutOperation::Different),
        MatchedRegion::new(rect(9.0, 0.0, 10.0, 6.0), CutOperation::Different),
    ];
    let matchers: Vec<Box<dyn ShapeMatcher>> =
        vec![Box::new(ScriptedMatcher::new(FeatureKind::ConvexHallway, strips))];
    let cutter = Floorcutter::new(&u_outline(), Vec::new(), matchers).unwrap();

    let decomposition = cutter.decompose().unwrap();
    let accepted: Vec<_> = decomposition.state.accepted_features().collect();
    assert_eq!(accepted.len(), 2);
    for feature in &accepted {
        assert!(feature.to_polygon().area() < feature.from_area());
    }

    let results = cutter.execute().unwrap();
    assert_eq!(results.len(), 2);
    let areas: Vec<_> = results.iter().map(|r| r.floor_outer_loop.area()).collect();
    assert_relative_eq!(areas[0], 48.0, epsilon = 1e-6);
    assert_relative_eq!(areas[1], 42.0, epsilon = 1e-6);
    assert!(areas.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(results[0].feature_host_infos.count, 1);
    assert_eq!(results[1].feature_host_infos.count, 2);
}

#[test]
fn test_open_outline_is_not_rejected() {
    let mut curves = u_outline();
    curves.pop();
    let cutter =
        Floorcutter::new(&curves, Vec::new(), vec![Box::new(NotchFiller::new())]).unwrap();

    assert_eq!(cutter.target().curve_count(), 7);
    let decomposition = cutter.decompose().unwrap();
    assert_eq!(decomposition.termination, TerminationReason::NoFeatures);
    assert!(cutter.execute().unwrap().is_empty());
}

#[test]
fn test_non_progress_is_reported() {
    init_tracing();
    let matchers: Vec<Box<dyn ShapeMatcher>> =
        vec![Box::new(StuckMatcher), Box::new(NotchFiller::new())];
    let cutter = Floorcutter::new(&u_outline(), Vec::new(), matchers).unwrap();

    let decomposition = cutter.decompose().unwrap();
    let round = &decomposition.state.rounds[0];
    assert_eq!(round.stalled.len(), 1);
    assert!(matches!(
        &round.stalled[0],
        StopReason::NoProgress { kind, .. } if kind.as_str() == "stuck"
    ));
    // The stuck matcher does not block later extractors
    assert_eq!(round.accepted.len(), 1);
}

#[test]
fn test_two_notches_give_nested_snapshots() {
    let cutter = Floorcutter::new(
        &two_notch_outline(),
        Vec::new(),
        vec![Box::new(NotchFiller::new())],
    )
    .unwrap();

    let decomposition = cutter.decompose().unwrap();
    assert_eq!(decomposition.state.accepted_features().count(), 2);
    assert_eq!(decomposition.termination, TerminationReason::PolygonTooSimple);

    let results = cutter.execute().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].floor_outer_loop.len(), 8);
    assert_relative_eq!(results[0].floor_outer_loop.area(), 66.0, epsilon = 1e-6);
    assert_eq!(results[0].feature_host_infos.count, 1);

    assert_eq!(results[1].floor_outer_loop.len(), 4);
    assert_relative_eq!(results[1].floor_outer_loop.area(), 72.0, epsilon = 1e-6);
    assert_eq!(results[1].feature_host_infos.count, 2);

    let sequences: Vec<_> = results[1]
        .feature_host_infos
        .host_infos
        .iter()
        .map(|i| i.sequence)
        .collect();
    assert_eq!(sequences, vec![0, 1]);
}

#[test]
fn test_round_limit() {
    let config = CutterConfig {
        max_rounds: 1,
        max_extractions_per_pass: 1,
        ..CutterConfig::default()
    };
    let cutter = Floorcutter::new(
        &two_notch_outline(),
        Vec::new(),
        vec![Box::new(NotchFiller::new())],
    )
    .unwrap()
    .with_config(config)
    .unwrap();

    let decomposition = cutter.decompose().unwrap();
    assert_eq!(decomposition.termination, TerminationReason::RoundLimit);
    assert_eq!(decomposition.state.rounds.len(), 1);
    assert_eq!(decomposition.state.current.curve_count(), 8);
    assert_eq!(cutter.execute().unwrap().len(), 1);
}

#[test]
fn test_rejected_feature_leaves_later_extractors_running() {
    // The strip covers the column and is rejected; both notches still fill
    let strip = MatchedRegion::new(rect(0.0, 0.0, 1.0, 6.0), CutOperation::Different);
    let scripted = ScriptedMatcher::new(FeatureKind::ConvexHallway, vec![strip]);
    let obstacle = column(0.2, 2.0, 0.8, 3.0);
    let matchers: Vec<Box<dyn ShapeMatcher>> =
        vec![Box::new(scripted), Box::new(NotchFiller::new())];
    let cutter = Floorcutter::new(&two_notch_outline(), Vec::new(), matchers)
        .unwrap()
        .with_obstacle(&obstacle);

    let decomposition = cutter.decompose().unwrap();
    let first = &decomposition.state.rounds[0];
    assert_eq!(first.rejected.len(), 1);
    assert_eq!(first.accepted.len(), 2);
    assert!(decomposition
        .state
        .accepted_features()
        .all(|f| f.kind() == &FeatureKind::ConcaveUShape));
    assert_eq!(decomposition.state.forbidden.len(), 2);
}

#[test]
fn test_results_serialize_to_json() {
    let cutter =
        Floorcutter::new(&u_outline(), Vec::new(), vec![Box::new(NotchFiller::new())]).unwrap();
    let results = cutter.execute().unwrap();

    let json: serde_json::Value = serde_json::from_str(&results[0].to_json().unwrap()).unwrap();
    let infos = &json["featureHostInfos"];
    assert_eq!(infos["count"], 1);
    assert_eq!(infos["normalizedType"], "centroid");
    assert_eq!(infos["hostInfos"][0]["type"], "concaveUShape");
    assert_eq!(infos["hostInfos"][0]["contentType"], "feature");
    assert!(infos["hostInfos"][0]["posParam"]["centerParam"].is_number());
    assert!(infos["hostInfos"][0].get("feature").is_none());
    assert!(json["floorOuterLoop"]["curves"].is_array());
}

#[test]
fn test_execute_all_runs_rooms_independently() {
    let cutters = vec![
        Floorcutter::new(&rectangle_outline(), Vec::new(), vec![Box::new(NotchFiller::new())])
            .unwrap(),
        Floorcutter::new(&u_outline(), Vec::new(), vec![Box::new(NotchFiller::new())]).unwrap(),
        Floorcutter::new(
            &two_notch_outline(),
            Vec::new(),
            vec![Box::new(NotchFiller::new())],
        )
        .unwrap(),
    ];

    let counts: Vec<_> = execute_all(&cutters)
        .into_iter()
        .map(|r| r.unwrap().len())
        .collect();
    assert_eq!(counts, vec![0, 1, 2]);
}
