// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    DoesNotExist,
    NotFound,
    BadInput,
    EmptyInput,
    LengthMismatch,
    NonContiguousTimes,
    FileNotFound,
    ExpectedNumber,
    MissingTimeColumn,
    DuplicateFilter,
    JsonDeserialization,
    Generic,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            DoesNotExist => "does_not_exist",
            NotFound => "not_found",
            BadInput => "bad_input",
            EmptyInput => "empty_input",
            LengthMismatch => "length_mismatch",
            NonContiguousTimes => "non_contiguous_times",
            FileNotFound => "file_not_found",
            ExpectedNumber => "expected_number",
            MissingTimeColumn => "missing_time_column",
            DuplicateFilter => "duplicate_filter",
            JsonDeserialization => "json_deserialization",
            Generic => "generic",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Import,
    Series,
    Match,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Import => "ImportError",
            ErrorKind::Series => "SeriesError",
            ErrorKind::Match => "MatchError",
            ErrorKind::Model => "ModelError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! series_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Series, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Series, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! match_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Match, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Match, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! import_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Import, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Import, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! model_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Model, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Model, ErrorCode::$code, None))
    }};
}

/// Strip the bracket decoration simulators put around concentration
/// columns (`[S1]` -> `S1`) and trim surrounding whitespace.
pub fn canonicalize(name: &str) -> String {
    let name = name.trim();
    let name = name
        .strip_prefix('[')
        .and_then(|n| n.strip_suffix(']'))
        .unwrap_or(name);
    name.trim().to_string()
}

#[test]
fn test_canonicalize() {
    assert_eq!("S1", canonicalize("[S1]"));
    assert_eq!("S1", canonicalize("S1"));
    assert_eq!("S1", canonicalize("  [S1]  "));
    assert_eq!("S1", canonicalize("[ S1 ]"));
    assert_eq!("time", canonicalize("time"));
    // unbalanced brackets are left alone
    assert_eq!("[S1", canonicalize("[S1"));
    assert_eq!("S1]", canonicalize("S1]"));
    assert_eq!("", canonicalize(""));
}

#[test]
fn test_error_display() {
    let err = Error::new(
        ErrorKind::Series,
        ErrorCode::NotFound,
        Some("t=1.5".to_string()),
    );
    assert_eq!("SeriesError{not_found: t=1.5}", format!("{err}"));

    let err = Error::new(ErrorKind::Import, ErrorCode::FileNotFound, None);
    assert_eq!("ImportError{file_not_found}", format!("{err}"));
}

#[test]
fn test_err_macros() {
    let result: Result<()> = series_err!(EmptyInput, "no time points".to_string());
    let err = result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Series);
    assert_eq!(err.code, ErrorCode::EmptyInput);
    assert_eq!(err.get_details(), Some("no time points".to_string()));

    let result: Result<()> = match_err!(LengthMismatch);
    let err = result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Match);
    assert!(err.get_details().is_none());
}
