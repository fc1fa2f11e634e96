//! Types that describe their own version scheme.
//!
//! The scanner only sees descriptors. [`Versioned`] is the seam where a
//! concrete type hands out descriptors bound to its own fields, so it can
//! be filled with [`parse_into`]:
//!
//! ```
//! use verscan_core::{parse_into, FieldDescriptor, Result, Target, Versioned};
//!
//! #[derive(Default)]
//! struct Calver {
//!     year: i64,
//!     month: i64,
//!     tag: Option<String>,
//! }
//!
//! impl Versioned for Calver {
//!     fn fields(&mut self) -> Result<Vec<FieldDescriptor<'_>>> {
//!         Ok(vec![
//!             FieldDescriptor::from_declaration(
//!                 "year",
//!                 "0,number,.1",
//!                 Target::number(&mut self.year),
//!             )?,
//!             FieldDescriptor::from_declaration(
//!                 "month",
//!                 "1,number,-2",
//!                 Target::number(&mut self.month),
//!             )?,
//!             FieldDescriptor::from_declaration(
//!                 "tag",
//!                 "2,string",
//!                 Target::optional_text(&mut self.tag),
//!             )?,
//!         ])
//!     }
//! }
//!
//! let mut version = Calver::default();
//! parse_into(&mut version, "2024.10-lts")?;
//! assert_eq!((version.year, version.month), (2024, 10));
//! assert_eq!(version.tag.as_deref(), Some("lts"));
//! # Ok::<(), verscan_core::Error>(())
//! ```

mod semver;

use crate::descriptor::FieldDescriptor;
use crate::error::Result;
use crate::scanner::Scanner;

pub use semver::SemVersion;

/// A type whose fields form a version scheme
pub trait Versioned {
    /// Returns one descriptor per field, each bound to that field's storage
    fn fields(&mut self) -> Result<Vec<FieldDescriptor<'_>>>;
}

/// Parses `input` into `version` with the default scanner
pub fn parse_into<V: Versioned + ?Sized>(version: &mut V, input: &str) -> Result<()> {
    Scanner::new().parse_into(version, input)
}
