// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! File-format front door for the engine: CSV simulation results and
//! JSON model documents.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use viper_engine::datamodel::Model;
pub use viper_engine::{
    self as engine, Error, ErrorCode, ErrorKind, Result, Results, TimeSeriesCollection,
};

/// Load a delimited simulation-result table from disk.
pub fn load_csv(file_path: &str, delimiter: u8) -> Result<Results> {
    Results::from_csv(file_path, delimiter)
}

/// Load a CSV of simulation output straight into a collection of
/// trajectories, one per non-time column.
pub fn open_collection_csv(file_path: &str) -> Result<TimeSeriesCollection> {
    let results = load_csv(file_path, b',')?;
    TimeSeriesCollection::from_results(&results)
}

/// Read a JSON model document into the engine's model representation.
pub fn open_model(reader: &mut dyn BufRead) -> Result<Model> {
    serde_json::from_reader(reader).map_err(|err| {
        Error::new(
            ErrorKind::Import,
            ErrorCode::JsonDeserialization,
            Some(err.to_string()),
        )
    })
}

/// Open and read a JSON model document from a path.
pub fn open_model_file(path: &str) -> Result<Model> {
    if !Path::new(path).is_file() {
        return Err(Error::new(
            ErrorKind::Import,
            ErrorCode::FileNotFound,
            Some(path.to_string()),
        ));
    }
    let f = File::open(path).map_err(|err| {
        Error::new(
            ErrorKind::Import,
            ErrorCode::FileNotFound,
            Some(format!("{path}: {err}")),
        )
    })?;
    let mut reader = BufReader::new(f);
    open_model(&mut reader)
}
