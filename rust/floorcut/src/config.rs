// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cutter configuration

use crate::error::{Error, Result};
use floorcut_geometry::LENGTH_EPS;
use serde::{Deserialize, Serialize};

/// Tunables for a decomposition run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutterConfig {
    /// Hard cap on extraction rounds
    pub max_rounds: usize,
    /// Outlines with fewer curves than this are not cut further
    pub min_curve_count: usize,
    /// Host overlaps must be strictly longer than this
    pub min_overlap_length: f64,
    /// Obstacles shrink toward their center by this factor before use
    pub forbidden_area_scale: f64,
    /// A cut leaving no more than this share of the target area ends an
    /// extractor's pass for the round; `None` disables the guard
    pub min_remaining_area_ratio: Option<f64>,
    /// Matches one extractor may apply in a single pass
    pub max_extractions_per_pass: usize,
    /// Length tolerance of the forbidden-area intersection test
    pub forbidden_tolerance: f64,
    /// Feature bottom elevation reported in host infos (meters)
    pub z_bottom: f64,
    /// Feature top elevation reported in host infos (meters)
    pub z_top: f64,
}

impl Default for CutterConfig {
    fn default() -> Self {
        Self {
            max_rounds: 100,
            min_curve_count: 5,
            min_overlap_length: 0.5,
            forbidden_area_scale: 0.99,
            min_remaining_area_ratio: Some(0.5),
            max_extractions_per_pass: 100,
            forbidden_tolerance: LENGTH_EPS,
            z_bottom: 0.0,
            z_top: 2.8,
        }
    }
}

impl CutterConfig {
    /// Load configuration from `FLOORCUT_*` environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults. Setting
    /// `FLOORCUT_MIN_REMAINING_AREA_RATIO` to `none` disables the area guard.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_rounds: env_or("FLOORCUT_MAX_ROUNDS", defaults.max_rounds),
            min_curve_count: env_or("FLOORCUT_MIN_CURVE_COUNT", defaults.min_curve_count),
            min_overlap_length: env_or("FLOORCUT_MIN_OVERLAP_LENGTH", defaults.min_overlap_length),
            forbidden_area_scale: env_or(
                "FLOORCUT_FORBIDDEN_AREA_SCALE",
                defaults.forbidden_area_scale,
            ),
            min_remaining_area_ratio: match std::env::var("FLOORCUT_MIN_REMAINING_AREA_RATIO") {
                Ok(v) if v.trim().eq_ignore_ascii_case("none") => None,
                Ok(v) => v.trim().parse().ok().or(defaults.min_remaining_area_ratio),
                Err(_) => defaults.min_remaining_area_ratio,
            },
            max_extractions_per_pass: env_or(
                "FLOORCUT_MAX_EXTRACTIONS_PER_PASS",
                defaults.max_extractions_per_pass,
            ),
            forbidden_tolerance: env_or(
                "FLOORCUT_FORBIDDEN_TOLERANCE",
                defaults.forbidden_tolerance,
            ),
            z_bottom: env_or("FLOORCUT_Z_BOTTOM", defaults.z_bottom),
            z_top: env_or("FLOORCUT_Z_TOP", defaults.z_top),
        }
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(Error::InvalidConfig("max_rounds must be at least 1".into()));
        }
        if self.max_extractions_per_pass == 0 {
            return Err(Error::InvalidConfig(
                "max_extractions_per_pass must be at least 1".into(),
            ));
        }
        if !(self.forbidden_area_scale > 0.0 && self.forbidden_area_scale <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "forbidden_area_scale must be in (0, 1], got {}",
                self.forbidden_area_scale
            )));
        }
        if let Some(ratio) = self.min_remaining_area_ratio {
            if !(0.0..1.0).contains(&ratio) {
                return Err(Error::InvalidConfig(format!(
                    "min_remaining_area_ratio must be in [0, 1), got {}",
                    ratio
                )));
            }
        }
        if self.min_overlap_length < 0.0 || self.forbidden_tolerance < 0.0 {
            return Err(Error::InvalidConfig("tolerances must not be negative".into()));
        }
        if self.z_top < self.z_bottom {
            return Err(Error::InvalidConfig(format!(
                "z_top ({}) is below z_bottom ({})",
                self.z_top, self.z_bottom
            )));
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
