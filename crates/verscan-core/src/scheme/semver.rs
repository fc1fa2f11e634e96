//! Semantic versions as a built-in scheme.

use super::{parse_into, Versioned};
use crate::descriptor::{FieldDescriptor, Target};
use crate::error::{Error, Result};
use std::str::FromStr;

/// A `major.minor.patch[-pre_release][+build]` version.
///
/// Routing:
///
/// | field         | declaration        |
/// | ------------- | ------------------ |
/// | `major`       | `0,number,.1`      |
/// | `minor`       | `1,number,.2`      |
/// | `patch`       | `2,number,+4,-3`   |
/// | `pre_release` | `3,string,+4`      |
/// | `build`       | `4,string`         |
///
/// Fields that the input never reaches keep their defaults, so `"1.2"`
/// parses with `patch == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemVersion {
    /// Major version
    pub major: i64,
    /// Minor version
    pub minor: i64,
    /// Patch version
    pub patch: i64,
    /// Pre-release identifiers, e.g. `alpha.1`
    pub pre_release: String,
    /// Build metadata, e.g. `20240101.sha`
    pub build: String,
}

impl SemVersion {
    /// Parses a semantic version string
    pub fn parse(input: &str) -> Result<Self> {
        let mut version = Self::default();
        parse_into(&mut version, input)?;
        Ok(version)
    }
}

impl Versioned for SemVersion {
    fn fields(&mut self) -> Result<Vec<FieldDescriptor<'_>>> {
        Ok(vec![
            FieldDescriptor::from_declaration(
                "major",
                "0,number,.1",
                Target::number(&mut self.major),
            )?,
            FieldDescriptor::from_declaration(
                "minor",
                "1,number,.2",
                Target::number(&mut self.minor),
            )?,
            FieldDescriptor::from_declaration(
                "patch",
                "2,number,+4,-3",
                Target::number(&mut self.patch),
            )?,
            FieldDescriptor::from_declaration(
                "pre_release",
                "3,string,+4",
                Target::text(&mut self.pre_release),
            )?,
            FieldDescriptor::from_declaration("build", "4,string", Target::text(&mut self.build))?,
        ])
    }
}

impl FromStr for SemVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
