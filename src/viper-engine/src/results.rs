// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::HashMap;

#[cfg(feature = "file_io")]
use crate::common::{Error, ErrorCode, ErrorKind, Result};

/// Raw simulation output: a table with one column per variable plus a
/// `time` column, stored as a single flat allocation in row-major order.
///
/// This is the shape both simulation engines and the CSV loader hand us;
/// `TimeSeriesCollection::from_results` is the usual next step.
#[derive(Clone, Debug, PartialEq)]
pub struct Results {
    pub offsets: HashMap<String, usize>,
    // one large allocation
    pub data: Box<[f64]>,
    pub step_size: usize,
    pub step_count: usize,
}

impl Results {
    pub fn iter(&self) -> std::iter::Take<std::slice::Chunks<'_, f64>> {
        self.data.chunks(self.step_size).take(self.step_count)
    }

    /// Extract one column by name, or `None` if no such column.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let off = *self.offsets.get(name)?;
        Some(self.iter().map(|row| row[off]).collect())
    }
}

#[cfg(feature = "file_io")]
impl Results {
    /// Load a delimited table from disk.  The header row names the
    /// columns; every cell must parse as a float.
    pub fn from_csv(file_path: &str, delimiter: u8) -> Result<Results> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_path(file_path)
            .map_err(|err| {
                Error::new(
                    ErrorKind::Import,
                    ErrorCode::FileNotFound,
                    Some(format!("{file_path}: {err}")),
                )
            })?;

        let offsets: HashMap<String, usize> = rdr
            .headers()
            .map_err(|err| {
                Error::new(ErrorKind::Import, ErrorCode::Generic, Some(err.to_string()))
            })?
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();

        let step_size = offsets.len();
        let mut data: Vec<f64> = Vec::new();
        let mut step_count = 0;

        for record in rdr.records() {
            let record = record.map_err(|err| {
                Error::new(ErrorKind::Import, ErrorCode::Generic, Some(err.to_string()))
            })?;
            for field in record.iter() {
                let value: f64 = field.trim().parse().map_err(|_| {
                    Error::new(
                        ErrorKind::Import,
                        ErrorCode::ExpectedNumber,
                        Some(format!("row {}: '{}'", step_count + 1, field)),
                    )
                })?;
                data.push(value);
            }
            step_count += 1;
        }

        Ok(Results {
            offsets,
            data: data.into_boxed_slice(),
            step_size,
            step_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_results() -> Results {
        let offsets: HashMap<String, usize> =
            [("time".to_string(), 0), ("S1".to_string(), 1)].into();

        // 2 columns, 3 steps
        let data: Box<[f64]> = vec![
            0.0, 10.0, // step 0
            1.0, 20.0, // step 1
            2.0, 30.0, // step 2
        ]
        .into_boxed_slice();

        Results {
            offsets,
            data,
            step_size: 2,
            step_count: 3,
        }
    }

    #[test]
    fn iter_yields_correct_steps() {
        let results = two_column_results();
        let steps: Vec<&[f64]> = results.iter().collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], &[0.0, 10.0]);
        assert_eq!(steps[1], &[1.0, 20.0]);
        assert_eq!(steps[2], &[2.0, 30.0]);
    }

    #[test]
    fn column_extraction() {
        let results = two_column_results();
        assert_eq!(results.column("time"), Some(vec![0.0, 1.0, 2.0]));
        assert_eq!(results.column("S1"), Some(vec![10.0, 20.0, 30.0]));
        assert_eq!(results.column("S2"), None);
    }
}
