// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Similarity filters for trajectory pairs.
//!
//! A `Filter` is a distance function plus a tolerance: the pair is
//! flagged when the score is strictly greater than the tolerance.  The
//! distance functions themselves live behind the `Distance` trait so
//! callers can plug in their own.

use std::collections::BTreeMap;

use crate::common::Result;
use crate::match_err;
use crate::time_series::TimeSeries;

/// Default tolerance for the built-in Fréchet filter.
pub const DEFAULT_FRECHET_TOL: f64 = 0.5;

/// A dissimilarity measure over a pair of trajectories.  Larger scores
/// mean more different; scores are non-negative.
pub trait Distance {
    fn name(&self) -> &'static str;
    fn evaluate(&self, a: &TimeSeries, b: &TimeSeries) -> Result<f64>;
}

/// Discrete Fréchet-type distance over equal-length value arrays:
/// `max_i |a[i] - b[i]|`.
pub fn frechet_distance(original: &[f64], revised: &[f64]) -> Result<f64> {
    if original.len() != revised.len() {
        return match_err!(
            LengthMismatch,
            format!("{} values vs {}", original.len(), revised.len())
        );
    }
    let mut score: f64 = 0.0;
    for (a, b) in original.iter().zip(revised.iter()) {
        score = score.max((a - b).abs());
    }
    Ok(score)
}

pub struct FrechetDistance;

impl Distance for FrechetDistance {
    fn name(&self) -> &'static str {
        "frechet_distance"
    }

    fn evaluate(&self, a: &TimeSeries, b: &TimeSeries) -> Result<f64> {
        frechet_distance(a.values_ref(), b.values_ref())
    }
}

/// Dynamic time warping distance with absolute-difference cost.  Unlike
/// the Fréchet measure this tolerates unequal lengths, warping one
/// series onto the other.
pub fn dtw_distance(original: &[f64], revised: &[f64]) -> Result<f64> {
    if original.is_empty() || revised.is_empty() {
        return match_err!(EmptyInput, "cannot warp an empty series".to_string());
    }
    let m = revised.len();
    // two-row DP over the full cost matrix
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;
    for &a in original {
        curr[0] = f64::INFINITY;
        for j in 1..=m {
            let cost = (a - revised[j - 1]).abs();
            curr[j] = cost + prev[j].min(curr[j - 1]).min(prev[j - 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    Ok(prev[m])
}

pub struct DtwDistance;

impl Distance for DtwDistance {
    fn name(&self) -> &'static str {
        "dtw_distance"
    }

    fn evaluate(&self, a: &TimeSeries, b: &TimeSeries) -> Result<f64> {
        dtw_distance(a.values_ref(), b.values_ref())
    }
}

/// The outcome of one filter run against one trajectory pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FilterResult {
    score: f64,
    tol: f64,
    flagged: bool,
}

impl FilterResult {
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    pub fn flagged(&self) -> bool {
        self.flagged
    }
}

/// A distance function paired with a tolerance threshold.
pub struct Filter {
    distance: Box<dyn Distance>,
    tol: f64,
}

impl Filter {
    pub fn new(distance: Box<dyn Distance>, tol: f64) -> Filter {
        Filter { distance, tol }
    }

    pub fn frechet(tol: f64) -> Filter {
        Filter::new(Box::new(FrechetDistance), tol)
    }

    pub fn dtw(tol: f64) -> Filter {
        Filter::new(Box::new(DtwDistance), tol)
    }

    pub fn name(&self) -> &'static str {
        self.distance.name()
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Set a new tolerance, returning the old one.
    pub fn set_tol(&mut self, new_tol: f64) -> f64 {
        std::mem::replace(&mut self.tol, new_tol)
    }

    /// Evaluate the distance and apply the threshold.  The boundary case
    /// `score == tol` is not flagged; downstream classification depends
    /// on the strict comparison.
    pub fn run(&self, a: &TimeSeries, b: &TimeSeries) -> Result<FilterResult> {
        let score = self.distance.evaluate(a, b)?;
        Ok(FilterResult {
            score,
            tol: self.tol,
            flagged: score > self.tol,
        })
    }
}

/// Per-filter outcomes for one trajectory pair, keyed by filter name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterResultCollection {
    results: BTreeMap<String, FilterResult>,
}

impl FilterResultCollection {
    pub fn new() -> FilterResultCollection {
        Default::default()
    }

    pub fn add(&mut self, filter_name: impl Into<String>, result: FilterResult) {
        self.results.insert(filter_name.into(), result);
    }

    pub fn get(&self, filter_name: &str) -> Option<FilterResult> {
        self.results.get(filter_name).copied()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn any_flagged(&self) -> bool {
        self.results.values().any(|r| r.flagged)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FilterResult)> {
        self.results.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// An explicit, ordered registry of uniquely-named filters.  Passed to
/// the matcher at construction; there is no process-wide filter state.
#[derive(Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> FilterSet {
        Default::default()
    }

    /// The stock configuration: the Fréchet filter at its default
    /// tolerance.
    pub fn standard() -> FilterSet {
        let mut set = FilterSet::new();
        set.add(Filter::frechet(DEFAULT_FRECHET_TOL))
            .expect("empty set cannot collide");
        set
    }

    pub fn add(&mut self, filter: Filter) -> Result<()> {
        if self.filters.iter().any(|f| f.name() == filter.name()) {
            return match_err!(DuplicateFilter, filter.name().to_string());
        }
        self.filters.push(filter);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filters in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }
}
