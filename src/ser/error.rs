use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Context markers used when reporting serialization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerKind {
    /// Fixed-width scalar argument.
    Scalar,
    /// Length-prefixed homogeneous array.
    Array,
    /// Opaque data type tag.
    Dtype,
    /// Shape tuple with its optional chunk suffix.
    Shape,
    /// Typed or untyped point.
    Point,
    /// Deferred region-field reference.
    RegionField,
    /// Affine transform block of a region-field reference.
    Transform,
    /// Store prologue (future flag, rank, dtype, shape).
    Store,
    /// Whole argument buffer framing.
    Buffer,
}

impl fmt::Display for SerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerKind::Scalar => write!(f, "scalar"),
            SerKind::Array => write!(f, "array"),
            SerKind::Dtype => write!(f, "dtype"),
            SerKind::Shape => write!(f, "shape"),
            SerKind::Point => write!(f, "point"),
            SerKind::RegionField => write!(f, "region field"),
            SerKind::Transform => write!(f, "transform"),
            SerKind::Store => write!(f, "store"),
            SerKind::Buffer => write!(f, "buffer"),
        }
    }
}

/// Canonical serialization error surfaced while encoding or decoding arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum SerError {
    /// Input ended before the expected number of bytes were read.
    #[error("unexpected end of {kind} while reading `{field}`")]
    UnexpectedEnd {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// A length prefix exceeded the `u32` range or the remaining buffer.
    #[error("invalid length for `{field}` in {kind}")]
    InvalidLength {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Encountered an unexpected discriminant or sentinel.
    #[error("invalid value for `{field}` in {kind}")]
    InvalidValue {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// Additional bytes remained after consuming the expected payload.
    #[error("{remaining} trailing bytes after {kind} at offset {consumed}")]
    TrailingBytes {
        /// Structure or section that failed to decode.
        kind: SerKind,
        /// Position reached by the decoder.
        consumed: usize,
        /// Number of remaining bytes.
        remaining: usize,
    },
}

impl SerError {
    /// Creates an unexpected-end error helper.
    pub fn unexpected_end(kind: SerKind, field: &'static str) -> Self {
        SerError::UnexpectedEnd { kind, field }
    }

    /// Creates an invalid-length error helper.
    pub fn invalid_length(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidLength { kind, field }
    }

    /// Creates an invalid-value error helper.
    pub fn invalid_value(kind: SerKind, field: &'static str) -> Self {
        SerError::InvalidValue { kind, field }
    }

    /// Creates a trailing-bytes error helper.
    pub fn trailing_bytes(kind: SerKind, consumed: usize, remaining: usize) -> Self {
        SerError::TrailingBytes {
            kind,
            consumed,
            remaining,
        }
    }

    /// Returns the serialization context associated with the error.
    pub fn kind(&self) -> SerKind {
        match *self {
            SerError::UnexpectedEnd { kind, .. }
            | SerError::InvalidLength { kind, .. }
            | SerError::InvalidValue { kind, .. }
            | SerError::TrailingBytes { kind, .. } => kind,
        }
    }
}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;
