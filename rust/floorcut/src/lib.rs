// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorcut
//!
//! Feature decomposition of floor outlines. Shape matchers recognize
//! sub-shapes (U-shapes, L-shapes, hallways, balconies) in a room outline;
//! the engine cuts them out round by round while keeping clear of
//! obstacles, then reports each cut on its host wall for downstream
//! placement logic.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorcut::{Floorcutter, ShapeMatcher};
//!
//! let matchers: Vec<Box<dyn ShapeMatcher>> = vec![Box::new(MyUShapeMatcher)];
//! let cutter = Floorcutter::new(&outline_curves, openings, matchers)?
//!     .with_obstacle(&column_loop);
//!
//! for result in cutter.execute()? {
//!     println!("{} features", result.feature_host_infos.count);
//! }
//! ```

pub mod config;
pub mod context;
pub mod cutter;
pub mod error;
pub mod extractor;
pub mod feature;
pub mod host_info;
pub mod kernel;
pub mod obstacle;
pub mod polygon;

pub use config::CutterConfig;
pub use context::{FloorContext, Opening, OpeningType};
pub use cutter::{
    execute_all, CutterState, CutterVariant, Decomposition, FloorResult, Floorcutter,
    RoundRecord, TerminationReason,
};
pub use error::{Error, Result};
pub use extractor::{Extraction, FeatureExtractor, StopReason};
pub use feature::{FeatureKind, FeatureOverlap, MatchedRegion, ShapeFeature, ShapeMatcher};
pub use host_info::{
    feature_host_info, filter_non_adjacent, FeatureHostInfo, FeatureHostInfos, PosParam,
};
pub use kernel::{GeometryKernel, PlanarKernel};
pub use obstacle::Obstacle;
pub use polygon::{CutOperation, Polygon};

pub use floorcut_geometry::{Line2d, Loop, Point2};
