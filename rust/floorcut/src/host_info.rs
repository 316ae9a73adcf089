// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-wall derivation for accepted features
//!
//! Downstream placement logic positions furniture relative to walls, so each
//! accepted feature is mapped onto the wall line it sits on, with its extent
//! expressed as normalized parameters along that line.

use crate::config::CutterConfig;
use crate::feature::{FeatureKind, ShapeFeature};
use crate::kernel::GeometryKernel;
use floorcut_geometry::{Line2d, LoopLoopPosition, LENGTH_EPS};
use serde::Serialize;
use std::sync::Arc;

pub const FEATURE_CONTENT_TYPE: &str = "feature";
pub const FEATURE_CATEGORY_ID: &str = "feature-category";
pub const FEATURE_OPENING_TYPE: &str = "feature";
pub const NO_LINK_ROOM_TYPE: &str = "none";
pub const CENTROID_NORMALIZATION: &str = "centroid";

/// Normalized extent along the host line, each value in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosParam {
    pub start_param: f64,
    pub end_param: f64,
    pub center_param: f64,
}

impl PosParam {
    /// Project `overlap` onto `line`; `None` for a degenerate line
    pub fn along(line: &Line2d, overlap: &Line2d) -> Option<Self> {
        let range = line.range();
        let length = range.length();
        if length <= LENGTH_EPS {
            return None;
        }
        let start = (range.clamp(line.param_at(&overlap.start())) - range.min) / length;
        let end = (range.clamp(line.param_at(&overlap.end())) - range.min) / length;
        let (min, max) = (start.min(end), start.max(end));
        Some(Self {
            start_param: min,
            end_param: max,
            center_param: (min + max) / 2.0,
        })
    }
}

/// An accepted feature located on its host wall
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureHostInfo {
    pub group: usize,
    pub host_curve_index: usize,
    /// Features are not openings
    pub opening_index: Option<usize>,
    pub pos_param: PosParam,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(skip)]
    pub feature: Arc<ShapeFeature>,
    pub opening_floor_overlap_curve: Line2d,
    pub content_type: String,
    pub category_id: String,
    pub host_curve_length: f64,
    pub link_room_type: String,
    pub z_bottom: f64,
    pub z_top: f64,
    pub opening_type: String,
    /// Position of the feature in extraction order
    pub sequence: usize,
}

/// Aggregated host infos of one decomposition snapshot
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureHostInfos {
    pub count: usize,
    pub host_infos: Vec<FeatureHostInfo>,
    pub normalized_type: String,
    pub opening_type: String,
    // Filled by downstream exporters
    #[serde(rename = "bottomProfileGeomCollectionWKT")]
    pub bottom_profile_geom_collection_wkt: String,
    #[serde(rename = "centerPtsGeomCollectionWKT")]
    pub center_pts_geom_collection_wkt: String,
    #[serde(rename = "centerPtsMultiPointWKT")]
    pub center_pts_multi_point_wkt: String,
    pub host_curve_index_str: String,
}

impl FeatureHostInfos {
    pub fn aggregate(host_infos: Vec<FeatureHostInfo>) -> Self {
        Self {
            count: host_infos.len(),
            host_infos,
            normalized_type: CENTROID_NORMALIZATION.to_string(),
            opening_type: FEATURE_OPENING_TYPE.to_string(),
            bottom_profile_geom_collection_wkt: String::new(),
            center_pts_geom_collection_wkt: String::new(),
            center_pts_multi_point_wkt: String::new(),
            host_curve_index_str: String::new(),
        }
    }
}

/// Locate `feature` on the wall of `curves` it overlaps most.
///
/// Returns `None` when the overlap is missing or not longer than
/// `config.min_overlap_length`, or when no wall line carries it.
pub fn feature_host_info(
    kernel: &dyn GeometryKernel,
    feature: &Arc<ShapeFeature>,
    sequence: usize,
    curves: &[Line2d],
    config: &CutterConfig,
) -> Option<FeatureHostInfo> {
    let overlap = feature.overlap_with(kernel, curves)?;
    if overlap.overlap_curve.length() <= config.min_overlap_length {
        return None;
    }

    let group = kernel.find_line_group_in_curves(&overlap.floor_curve, curves)?;
    let pos_param = PosParam::along(&group.line, &overlap.overlap_curve)?;

    Some(FeatureHostInfo {
        group: group.group,
        host_curve_index: group.index,
        opening_index: None,
        pos_param,
        kind: feature.kind().clone(),
        feature: Arc::clone(feature),
        opening_floor_overlap_curve: overlap.overlap_curve,
        content_type: FEATURE_CONTENT_TYPE.to_string(),
        category_id: FEATURE_CATEGORY_ID.to_string(),
        host_curve_length: group.line.length(),
        link_room_type: NO_LINK_ROOM_TYPE.to_string(),
        z_bottom: config.z_bottom,
        z_top: config.z_top,
        opening_type: FEATURE_OPENING_TYPE.to_string(),
        sequence,
    })
}

/// Keep the entries of `prefix` adjacent to its most-cut outline.
///
/// The reference outline is the last entry's remainder. Entries whose
/// matched region does not touch it are dropped; the last entry is always
/// kept. A survivor whose overlap curve runs past the reference curve it
/// lies on gets its `pos_param` recomputed against the reference outline.
pub fn filter_non_adjacent(
    kernel: &dyn GeometryKernel,
    config: &CutterConfig,
    prefix: &[FeatureHostInfo],
) -> Vec<FeatureHostInfo> {
    let Some((last, _)) = prefix.split_last() else {
        return Vec::new();
    };
    if prefix.len() < 2 {
        return prefix.to_vec();
    }

    let reference = last.feature.to_polygon();
    let reference_curves = reference.curves();

    let mut adjacent = Vec::with_capacity(prefix.len());
    for (i, info) in prefix.iter().enumerate() {
        let is_last = i + 1 == prefix.len();
        let position = kernel.loop_to_loop(
            info.feature.self_polygon().outer_loop(),
            reference.outer_loop(),
            config.forbidden_tolerance,
        );
        if !is_last && position != LoopLoopPosition::Intersect {
            tracing::debug!(
                kind = %info.kind,
                sequence = info.sequence,
                ?position,
                "Dropping feature not adjacent to reference outline"
            );
            continue;
        }

        let mut info = info.clone();
        let overlap = info.opening_floor_overlap_curve;
        let matching = reference_curves
            .iter()
            .find(|c| kernel.curve_curve_overlap(c, &overlap).is_overlap());
        if let Some(curve) = matching {
            let covered = curve.contains_projected_pt(&overlap.start(), LENGTH_EPS)
                && curve.contains_projected_pt(&overlap.end(), LENGTH_EPS);
            if !covered {
                if let Some(updated) = feature_host_info(
                    kernel,
                    &info.feature,
                    info.sequence,
                    reference_curves,
                    config,
                ) {
                    info.pos_param = updated.pos_param;
                }
            }
        }
        adjacent.push(info);
    }
    adjacent
}
