// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Trajectories and named collections of them.
//!
//! A `TimeSeries` is one variable's simulated trajectory; a
//! `TimeSeriesCollection` is everything a single simulation run
//! produced, keyed by variable name.  Time points are floating-point
//! simulator output, so lookup by time is tolerance-based rather than
//! exact.

use std::collections::BTreeMap;

use float_cmp::approx_eq;

use crate::common::{canonicalize, Result};
use crate::results::Results;
use crate::series_err;

/// Absolute tolerance used when comparing time points.  Simulators emit
/// times like 0.41666667, so exact float equality is useless here.
pub const DEFAULT_TIME_EPSILON: f64 = 3e-5;

#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    variable: String,
    time_points: Box<[f64]>,
    values: Box<[f64]>,
    epsilon: f64,
}

impl TimeSeries {
    /// Build a series from parallel time/value arrays.  Time points must
    /// be strictly increasing — binary search depends on it.
    pub fn new(
        variable: impl Into<String>,
        time_points: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<TimeSeries> {
        if time_points.len() != values.len() {
            return series_err!(
                LengthMismatch,
                format!(
                    "{} time points vs {} values",
                    time_points.len(),
                    values.len()
                )
            );
        }
        if !time_points.windows(2).all(|w| w[0] < w[1]) {
            return series_err!(BadInput, "time points must be strictly increasing".to_string());
        }
        Ok(TimeSeries {
            variable: variable.into(),
            time_points: time_points.into_boxed_slice(),
            values: values.into_boxed_slice(),
            epsilon: DEFAULT_TIME_EPSILON,
        })
    }

    /// Override the time-point comparison tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> TimeSeries {
        self.epsilon = epsilon;
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The time points, as an owned copy.  Mutating the returned vec
    /// cannot corrupt the stored trajectory.
    pub fn time_points(&self) -> Vec<f64> {
        self.time_points.to_vec()
    }

    /// The values, as an owned copy.
    pub fn values(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    pub(crate) fn values_ref(&self) -> &[f64] {
        &self.values
    }

    /// Midpoint search with tolerance-based equality.  If several points
    /// fall within epsilon of the target, any one of them may be found.
    fn binary_search(array: &[f64], target: f64, epsilon: f64) -> Option<usize> {
        let mut lo = 0;
        let mut hi = array.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if approx_eq!(f64, array[mid], target, epsilon = epsilon) {
                return Some(mid);
            } else if array[mid] > target {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        None
    }

    /// Look up the value at a time point, within tolerance.
    pub fn get_value_at_time(&self, time_point: f64) -> Result<f64> {
        match Self::binary_search(&self.time_points, time_point, self.epsilon) {
            Some(index) => Ok(self.values[index]),
            None => series_err!(
                NotFound,
                format!("no time point within {} of {}", self.epsilon, time_point)
            ),
        }
    }

    /// Replace the values at a contiguous ascending run of the series'
    /// own time points.  The whole run is validated before any value is
    /// written, so a failed call leaves the series untouched.
    pub fn replace_values_at_times(
        &mut self,
        time_points: &[f64],
        new_values: &[f64],
    ) -> Result<()> {
        if time_points.is_empty() || new_values.is_empty() {
            return series_err!(EmptyInput, "input data cannot be empty".to_string());
        }
        if time_points.len() != new_values.len() {
            return series_err!(
                LengthMismatch,
                format!(
                    "{} time points vs {} replacement values",
                    time_points.len(),
                    new_values.len()
                )
            );
        }
        let start = match Self::binary_search(&self.time_points, time_points[0], self.epsilon) {
            Some(index) => index,
            None => {
                return series_err!(
                    NotFound,
                    format!("time point {} does not exist in the series", time_points[0])
                )
            }
        };
        for (i, &t) in time_points.iter().enumerate() {
            let index = start + i;
            if index >= self.time_points.len()
                || !approx_eq!(f64, self.time_points[index], t, epsilon = self.epsilon)
            {
                return series_err!(
                    NonContiguousTimes,
                    format!("time point {t} does not continue the run at offset {i}")
                );
            }
        }
        self.values[start..start + new_values.len()].copy_from_slice(new_values);
        Ok(())
    }
}

/// All trajectories from one simulation run, keyed by variable name.
/// A `BTreeMap` keeps iteration (and so matcher output) deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeriesCollection {
    series: BTreeMap<String, TimeSeries>,
}

impl TimeSeriesCollection {
    pub fn new() -> TimeSeriesCollection {
        Default::default()
    }

    /// Build a collection from a simulation-result table.  Column names
    /// are stripped of bracket decoration; the `time` column becomes the
    /// shared time axis and is never stored as an entry.
    pub fn from_results(results: &Results) -> Result<TimeSeriesCollection> {
        let time = match results.column("time") {
            Some(time) => time,
            None => {
                return import_err_missing_time(results);
            }
        };

        let mut columns: Vec<(&str, usize)> = results
            .offsets
            .iter()
            .map(|(name, &off)| (name.as_str(), off))
            .collect();
        columns.sort_unstable_by_key(|&(_, off)| off);

        let mut collection = TimeSeriesCollection::new();
        for (name, off) in columns {
            if name == "time" {
                continue;
            }
            let variable = canonicalize(name);
            let values: Vec<f64> = results.iter().map(|row| row[off]).collect();
            if collection.contains(&variable) {
                eprintln!(
                    "warning, columns collapse to the same variable '{variable}', keeping the last"
                );
            }
            let ts = TimeSeries::new(variable.clone(), time.clone(), values)?;
            collection.series.insert(variable, ts);
        }
        Ok(collection)
    }

    /// Build a collection straight from a CSV file of simulation output.
    #[cfg(feature = "file_io")]
    pub fn from_csv(path: &str) -> Result<TimeSeriesCollection> {
        let results = Results::from_csv(path, b',')?;
        Self::from_results(&results)
    }

    pub fn add(&mut self, variable: impl Into<String>, ts: TimeSeries) -> Result<()> {
        let variable = variable.into();
        if variable.is_empty() {
            return series_err!(BadInput, "variable name cannot be empty".to_string());
        }
        self.series.insert(variable, ts);
        Ok(())
    }

    pub fn get(&self, variable: &str) -> Option<&TimeSeries> {
        self.series.get(variable)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.series.contains_key(variable)
    }

    pub fn variables(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimeSeries)> {
        self.series.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn import_err_missing_time(results: &Results) -> Result<TimeSeriesCollection> {
    let mut names: Vec<&str> = results.offsets.keys().map(String::as_str).collect();
    names.sort_unstable();
    crate::import_err!(
        MissingTimeColumn,
        format!("columns present: [{}]", names.join(", "))
    )
}
