// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Behavioral and structural drift detection for kinetic models.
//!
//! Two independent cores: the dynamic side aligns simulation output of
//! an original and a revised model and classifies each variable's
//! trajectory pair as changed or unchanged through a set of similarity
//! filters; the static side inspects a parsed model for structural
//! problems like uninitialized parameters and unreachable species.

#![forbid(unsafe_code)]

pub mod common;
pub mod datamodel;
pub mod filter;
pub mod matcher;
pub mod results;
pub mod static_check;
pub mod time_series;

pub use self::common::{canonicalize, Error, ErrorCode, ErrorKind, Result};
pub use self::filter::{
    dtw_distance, frechet_distance, Distance, DtwDistance, Filter, FilterResult,
    FilterResultCollection, FilterSet, FrechetDistance, DEFAULT_FRECHET_TOL,
};
pub use self::matcher::{MatchResult, MatchResultCollection, TimeSeriesMatcher};
pub use self::results::Results;
pub use self::static_check::{StaticChecker, StaticReport};
pub use self::time_series::{TimeSeries, TimeSeriesCollection, DEFAULT_TIME_EPSILON};
