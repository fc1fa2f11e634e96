//! Error types for the verscan-core library.
//!
//! Errors fall into two groups: construction errors, which mean the field
//! scheme itself is broken, and scan errors, which mean the version string
//! could not be coerced into the scheme. See [`Error::is_construction_error`].

use crate::descriptor::FieldKind;
use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for verscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all verscan operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Two descriptors claim the same index
    #[error("field '{name}': index {index} is already in use")]
    DuplicateIndex {
        /// Field that tried to claim the index
        name: String,
        /// The contested index
        index: usize,
    },

    /// Kind tag is neither `number` nor `string`
    #[error("field '{name}': unknown field kind '{value}'")]
    UnknownFieldKind {
        /// Field carrying the bad tag
        name: String,
        /// The unrecognized tag
        value: String,
    },

    /// Route element has no delimiter or its target is not a non-negative integer
    #[error("field '{name}': invalid route '{route}'")]
    InvalidRouteTarget {
        /// Field declaring the route
        name: String,
        /// The raw route element
        route: String,
    },

    /// Route points at an index no descriptor claims
    #[error("field '{name}': route '{delimiter}' points to missing index {target}")]
    DanglingRoute {
        /// Field declaring the route
        name: String,
        /// Delimiter of the route
        delimiter: char,
        /// Index the route points to
        target: usize,
    },

    /// No descriptor has index 0
    #[error("no entry field: index 0 is not declared")]
    MissingEntryField,

    /// Declaration lacks the index or kind element
    #[error("field '{name}': declaration '{declaration}' needs at least an index and a kind")]
    IncompleteDeclaration {
        /// Field being declared
        name: String,
        /// The raw declaration
        declaration: String,
    },

    /// Index element is not a non-negative integer
    #[error("field '{name}': invalid index '{value}'")]
    InvalidIndex {
        /// Field being declared
        name: String,
        /// The raw index element
        value: String,
    },

    /// Two routes of one field share a delimiter
    #[error("field '{name}': delimiter '{delimiter}' is routed more than once")]
    DuplicateRoute {
        /// Field declaring the routes
        name: String,
        /// The repeated delimiter
        delimiter: char,
    },

    /// Bound target cannot hold the declared kind
    #[error("field '{name}': declared as {declared} but bound to a {bound} target")]
    TargetMismatch {
        /// Field being declared
        name: String,
        /// Kind from the declaration
        declared: FieldKind,
        /// Kind the target accepts
        bound: FieldKind,
    },

    /// Segment of a numeric field is not a base-10 integer
    #[error("field '{name}': invalid number '{segment}': {source}")]
    InvalidNumber {
        /// Field the segment belongs to
        name: String,
        /// The offending segment
        segment: String,
        /// Underlying integer parse error
        #[source]
        source: ParseIntError,
    },

    /// Input exceeds the configured length limit
    #[error("input is {len} bytes, limit is {max}")]
    InputTooLong {
        /// Input length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new duplicate index error
    pub fn duplicate_index(name: impl Into<String>, index: usize) -> Self {
        Self::DuplicateIndex {
            name: name.into(),
            index,
        }
    }

    /// Creates a new unknown field kind error
    pub fn unknown_field_kind(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownFieldKind {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new invalid route target error
    pub fn invalid_route_target(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self::InvalidRouteTarget {
            name: name.into(),
            route: route.into(),
        }
    }

    /// Creates a new dangling route error
    pub fn dangling_route(name: impl Into<String>, delimiter: char, target: usize) -> Self {
        Self::DanglingRoute {
            name: name.into(),
            delimiter,
            target,
        }
    }

    /// Creates a new incomplete declaration error
    pub fn incomplete_declaration(
        name: impl Into<String>,
        declaration: impl Into<String>,
    ) -> Self {
        Self::IncompleteDeclaration {
            name: name.into(),
            declaration: declaration.into(),
        }
    }

    /// Creates a new invalid index error
    pub fn invalid_index(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidIndex {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new duplicate route error
    pub fn duplicate_route(name: impl Into<String>, delimiter: char) -> Self {
        Self::DuplicateRoute {
            name: name.into(),
            delimiter,
        }
    }

    /// Creates a new invalid number error
    pub fn invalid_number(
        name: impl Into<String>,
        segment: impl Into<String>,
        source: ParseIntError,
    ) -> Self {
        Self::InvalidNumber {
            name: name.into(),
            segment: segment.into(),
            source,
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the error points at a broken scheme rather than bad input
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIndex { .. }
                | Self::UnknownFieldKind { .. }
                | Self::InvalidRouteTarget { .. }
                | Self::DanglingRoute { .. }
                | Self::MissingEntryField
                | Self::IncompleteDeclaration { .. }
                | Self::InvalidIndex { .. }
                | Self::DuplicateRoute { .. }
                | Self::TargetMismatch { .. }
        )
    }
}
