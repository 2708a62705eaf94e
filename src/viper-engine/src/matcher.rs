// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Alignment of two simulation runs.
//!
//! The matcher pairs variables by name across the original and revised
//! collections, runs every registered filter on each pair, and splits
//! the variables into a flagged and a non-flagged collection.

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::common::Result;
use crate::filter::{FilterResult, FilterResultCollection, FilterSet};
use crate::match_err;
use crate::time_series::{TimeSeries, TimeSeriesCollection};

/// One variable's original/revised trajectory pair.  Either side may be
/// absent when the variable only exists in one version of the model;
/// both absent is invalid.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    original: Option<TimeSeries>,
    revised: Option<TimeSeries>,
    filter_results: FilterResultCollection,
}

impl MatchResult {
    pub fn new(original: Option<TimeSeries>, revised: Option<TimeSeries>) -> Result<MatchResult> {
        if original.is_none() && revised.is_none() {
            return match_err!(BadInput, "a match needs at least one trajectory".to_string());
        }
        Ok(MatchResult {
            original,
            revised,
            filter_results: FilterResultCollection::new(),
        })
    }

    pub fn original(&self) -> Option<&TimeSeries> {
        self.original.as_ref()
    }

    pub fn revised(&self) -> Option<&TimeSeries> {
        self.revised.as_ref()
    }

    /// True when the variable exists on both sides.
    pub fn is_paired(&self) -> bool {
        self.original.is_some() && self.revised.is_some()
    }

    pub fn filter_results(&self) -> &FilterResultCollection {
        &self.filter_results
    }

    fn record(&mut self, filter_name: &str, result: FilterResult) {
        self.filter_results.add(filter_name, result);
    }
}

/// Match results keyed by variable name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchResultCollection {
    results: BTreeMap<String, MatchResult>,
}

impl MatchResultCollection {
    pub fn new() -> MatchResultCollection {
        Default::default()
    }

    pub fn add(&mut self, variable: impl Into<String>, result: MatchResult) {
        self.results.insert(variable.into(), result);
    }

    pub fn get(&self, variable: &str) -> Option<&MatchResult> {
        self.results.get(variable)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.results.contains_key(variable)
    }

    pub fn variables(&self) -> Vec<&str> {
        self.results.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchResult)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Aligns two collections across a set of filters.
pub struct TimeSeriesMatcher {
    original: TimeSeriesCollection,
    revised: TimeSeriesCollection,
    filters: FilterSet,
}

impl TimeSeriesMatcher {
    pub fn new(
        original: TimeSeriesCollection,
        revised: TimeSeriesCollection,
        filters: FilterSet,
    ) -> TimeSeriesMatcher {
        TimeSeriesMatcher {
            original,
            revised,
            filters,
        }
    }

    /// Partition every variable present in either collection into
    /// `(flagged, non_flagged)`.
    ///
    /// A variable present on only one side always lands in the
    /// non-flagged collection with an empty filter-result set; the flag
    /// logic only applies to pairs that exist on both sides.  Every
    /// registered filter runs on every pair even once one has already
    /// flagged it, so the full per-filter score breakdown is available
    /// downstream.
    pub fn run(&self) -> Result<(MatchResultCollection, MatchResultCollection)> {
        let mut flagged = MatchResultCollection::new();
        let mut non_flagged = MatchResultCollection::new();
        let mut visited: HashSet<&str> = HashSet::new();

        for (variable, original_ts) in self.original.iter() {
            visited.insert(variable);
            let revised_ts = match self.revised.get(variable) {
                Some(revised_ts) => revised_ts,
                None => {
                    non_flagged.add(variable, MatchResult::new(Some(original_ts.clone()), None)?);
                    continue;
                }
            };

            let mut result =
                MatchResult::new(Some(original_ts.clone()), Some(revised_ts.clone()))?;
            let mut any_flagged = false;
            for filter in self.filters.iter() {
                let filter_result = filter.run(original_ts, revised_ts)?;
                any_flagged = any_flagged || filter_result.flagged();
                result.record(filter.name(), filter_result);
            }

            if any_flagged {
                flagged.add(variable, result);
            } else {
                non_flagged.add(variable, result);
            }
        }

        for (variable, revised_ts) in self.revised.iter() {
            if visited.contains(variable) {
                continue;
            }
            non_flagged.add(variable, MatchResult::new(None, Some(revised_ts.clone()))?);
        }

        Ok((flagged, non_flagged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorCode;
    use crate::filter::Filter;

    fn ts(values: &[f64]) -> TimeSeries {
        let times: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        TimeSeries::new("v", times, values.to_vec()).unwrap()
    }

    fn collection(entries: &[(&str, &[f64])]) -> TimeSeriesCollection {
        let mut c = TimeSeriesCollection::new();
        for (variable, values) in entries {
            c.add(*variable, ts(values)).unwrap();
        }
        c
    }

    #[test]
    fn match_result_rejects_double_absence() {
        let err = MatchResult::new(None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadInput);
    }

    #[test]
    fn changed_variable_is_flagged() {
        let original = collection(&[("A", &[1.0, 2.0, 3.0])]);
        let revised = collection(&[("A", &[1.0, 2.0, 5.0])]);
        let matcher = TimeSeriesMatcher::new(original, revised, FilterSet::standard());

        let (flagged, non_flagged) = matcher.run().unwrap();
        assert!(flagged.contains("A"));
        assert!(!non_flagged.contains("A"));
        let result = flagged.get("A").unwrap();
        assert!(result.is_paired());
        assert_eq!(
            result.filter_results().get("frechet_distance").unwrap().score(),
            2.0
        );
    }

    #[test]
    fn unchanged_variable_is_not_flagged() {
        let original = collection(&[("A", &[1.0, 2.0, 3.0])]);
        let revised = collection(&[("A", &[1.0, 2.0, 3.0])]);
        let matcher = TimeSeriesMatcher::new(original, revised, FilterSet::standard());

        let (flagged, non_flagged) = matcher.run().unwrap();
        assert!(flagged.is_empty());
        assert!(non_flagged.contains("A"));
    }

    #[test]
    fn one_sided_variables_go_to_non_flagged() {
        let original = collection(&[("A", &[1.0])]);
        let revised = collection(&[("B", &[1.0])]);
        let matcher = TimeSeriesMatcher::new(original, revised, FilterSet::standard());

        let (flagged, non_flagged) = matcher.run().unwrap();
        assert!(flagged.is_empty());
        assert_eq!(non_flagged.variables(), vec!["A", "B"]);

        let a = non_flagged.get("A").unwrap();
        assert!(a.original().is_some());
        assert!(a.revised().is_none());
        assert!(a.filter_results().is_empty());

        let b = non_flagged.get("B").unwrap();
        assert!(b.original().is_none());
        assert!(b.revised().is_some());
        assert!(b.filter_results().is_empty());
    }

    #[test]
    fn every_filter_runs_even_after_a_flag() {
        let mut filters = FilterSet::new();
        // the first filter flags this pair, the second does not
        filters.add(Filter::frechet(0.5)).unwrap();
        filters.add(Filter::dtw(100.0)).unwrap();

        let original = collection(&[("A", &[1.0, 2.0, 3.0])]);
        let revised = collection(&[("A", &[1.0, 2.0, 5.0])]);
        let matcher = TimeSeriesMatcher::new(original, revised, filters);

        let (flagged, _) = matcher.run().unwrap();
        let results = flagged.get("A").unwrap().filter_results();
        assert_eq!(results.len(), 2);
        assert!(results.get("frechet_distance").unwrap().flagged());
        assert!(!results.get("dtw_distance").unwrap().flagged());
    }

    #[test]
    fn completeness_over_both_collections() {
        let original = collection(&[("A", &[1.0]), ("B", &[2.0]), ("C", &[3.0])]);
        let revised = collection(&[("B", &[2.0]), ("C", &[9.0]), ("D", &[4.0])]);
        let matcher = TimeSeriesMatcher::new(original, revised, FilterSet::standard());

        let (flagged, non_flagged) = matcher.run().unwrap();
        for variable in ["A", "B", "C", "D"] {
            let in_flagged = flagged.contains(variable);
            let in_non_flagged = non_flagged.contains(variable);
            assert!(
                in_flagged != in_non_flagged,
                "{variable} must appear in exactly one collection"
            );
        }
        assert_eq!(flagged.len() + non_flagged.len(), 4);
        assert!(flagged.contains("C"));
    }

    #[test]
    fn mismatched_sampling_propagates_error() {
        let original = collection(&[("A", &[1.0, 2.0])]);
        let revised = collection(&[("A", &[1.0, 2.0, 3.0])]);
        let matcher = TimeSeriesMatcher::new(original, revised, FilterSet::standard());

        let err = matcher.run().unwrap_err();
        assert_eq!(err.code, ErrorCode::LengthMismatch);
    }
}
