//! # verscan-core
//!
//! A table-driven parser for version identifiers.
//!
//! Instead of hard-coding a grammar such as semantic versioning, a version
//! scheme is described as a small routing graph of fields. Each field has
//! a kind (number or text) and a set of delimiter characters; the delimiter
//! that ends a field decides which field comes next.
//!
//! ## Architecture
//!
//! - [`descriptor`]: Field descriptors, their declaration format, and the
//!   validated [`DescriptorTable`]
//! - [`scanner`]: The single-pass [`Scanner`] that walks the input
//! - [`scheme`]: The [`Versioned`] adapter trait and the built-in [`SemVersion`]
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use verscan_core::{parse, FieldDescriptor, Target};
//!
//! let mut major = 0;
//! let mut minor = 0;
//! let mut build = String::new();
//!
//! parse(
//!     [
//!         FieldDescriptor::from_declaration(
//!             "major",
//!             "0,number,.1,+2",
//!             Target::number(&mut major),
//!         )?,
//!         FieldDescriptor::from_declaration("minor", "1,number,+2", Target::number(&mut minor))?,
//!         FieldDescriptor::from_declaration("build", "2,string", Target::text(&mut build))?,
//!     ],
//!     "1.2+3",
//! )?;
//!
//! assert_eq!((major, minor, build.as_str()), (1, 2, "3"));
//! # Ok::<(), verscan_core::Error>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`Target`]: Bind a field to any storage through a setter closure
//! - [`Versioned`]: Let a type describe and bind its own fields
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod descriptor;
pub mod error;
pub mod scanner;
pub mod scheme;

// Re-export primary types for convenience
pub use descriptor::{DescriptorTable, FieldDescriptor, FieldKind, Target, ENTRY_INDEX};
pub use error::{Error, Result};
pub use scanner::{parse, Scanner, ScannerConfig};
pub use scheme::{parse_into, SemVersion, Versioned};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
