//! Golden vectors: fixed source/expected pairs for parsing and evaluation.
//!
//! A vector file is line oriented:
//!
//! ```text
//! # comment
//! [parse]
//! a + b * c => +(a,*(b,c))
//! (a +      => error
//!
//! [eval]
//! 2 + 3 * 4 => i(14)
//! ```
//!
//! Each entry splits at its last `=>`, so sources may contain `=>`
//! themselves. A `[parse]` entry compares the rendered tree; the expected
//! text `error` instead requires the source to fail to parse. An `[eval]`
//! entry compares the rendered value against [`fixed_context`].

mod runner;

pub use runner::{run_vectors, VectorOutcome, VectorResult, VectorSummary};

use std::path::{Path, PathBuf};
use std::{fmt, io};

use exl_eval::MapContext;
use thiserror::Error;

/// Which table a vector belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Parse,
    Eval,
}

impl Section {
    fn from_header(name: &str) -> Option<Section> {
        match name {
            "parse" => Some(Section::Parse),
            "eval" => Some(Section::Eval),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Parse => f.write_str("parse"),
            Section::Eval => f.write_str("eval"),
        }
    }
}

/// One source/expected pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector {
    pub section: Section,
    pub source: String,
    pub expected: String,
    /// 1-based line in the vector file.
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VectorFormatError {
    #[error("line {line}: entry before any `[parse]` or `[eval]` header")]
    NoSection { line: usize },

    #[error("line {line}: unknown section `[{name}]`")]
    UnknownSection { line: usize, name: String },

    #[error("line {line}: expected `source => expected`")]
    MissingArrow { line: usize },
}

/// Failure to load a vector file from disk.
#[derive(Debug, Error)]
pub enum VectorFileError {
    #[error("cannot find file '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("'{}' is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("error reading '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Format {
        path: PathBuf,
        source: VectorFormatError,
    },
}

/// Read and parse a vector file.
pub fn load_vector_file(path: impl AsRef<Path>) -> Result<Vec<Vector>, VectorFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => VectorFileError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => VectorFileError::NotUtf8 {
            path: path.to_path_buf(),
        },
        _ => VectorFileError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_vectors(&text).map_err(|source| VectorFileError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the text of a vector file.
pub fn parse_vectors(text: &str) -> Result<Vec<Vector>, VectorFormatError> {
    let mut section = None;
    let mut vectors = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|name| name.chars().all(|c| c.is_ascii_alphabetic()))
        {
            section = Some(Section::from_header(name).ok_or_else(|| {
                VectorFormatError::UnknownSection {
                    line,
                    name: name.to_string(),
                }
            })?);
            continue;
        }
        let section = section.ok_or(VectorFormatError::NoSection { line })?;
        let (source, expected) = trimmed
            .rsplit_once("=>")
            .ok_or(VectorFormatError::MissingArrow { line })?;
        vectors.push(Vector {
            section,
            source: source.trim().to_string(),
            expected: expected.trim().to_string(),
            line,
        });
    }
    Ok(vectors)
}

/// Context every `[eval]` vector runs against: `i`=42, `f`=123.0,
/// `b`=true, `s`="a value". Everything else is unbound.
pub fn fixed_context() -> MapContext {
    MapContext::new()
        .with("i", 42i64)
        .with("f", 123.0)
        .with("b", true)
        .with("s", "a value")
}

#[cfg(test)]
mod tests;
