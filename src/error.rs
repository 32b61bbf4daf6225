//! Errors raised while loading a scene description.
//!
//! Every error is fatal at load time: a malformed description never yields a
//! partial scene.

use std::path::PathBuf;

use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("scene file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read scene file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: scene description ends before the {record} record")]
    MissingRecord { line: usize, record: &'static str },

    #[error("line {line}: expected {expected} tab-separated fields, found {actual}")]
    MalformedRecord {
        line: usize,
        expected: &'static str,
        actual: usize,
    },

    #[error("line {line}, field {field}: cannot parse {value:?} as {kind}")]
    NumericParse {
        line: usize,
        field: usize,
        value: String,
        kind: &'static str,
    },

    #[error("line {line}: moon declared before any planet")]
    OrphanMoon { line: usize },

    #[error("line {line}: {source}")]
    InvalidBody {
        line: usize,
        #[source]
        source: BodyError,
    },

    #[error("failed to load resource {name}: {reason}")]
    ResourceLoad { name: String, reason: String },
}

/// Construction-time validation failures for a single body.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BodyError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("rotation period must be non-zero")]
    ZeroRotationPeriod,

    #[error("orbital period must be non-zero")]
    ZeroOrbitalPeriod,

    #[error("distance must not be negative, got {0}")]
    NegativeDistance(f32),

    #[error("specular shine must not be negative, got {0}")]
    NegativeSpecularShine(f32),

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}
