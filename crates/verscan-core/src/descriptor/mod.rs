//! Field descriptors and the declaration format that produces them.
//!
//! A descriptor names one slot of a version scheme: its index in the routing
//! graph, the kind of value it holds, the delimiters that end it and where
//! each of them leads, and the [`Target`] that receives the parsed value.
//!
//! ## Declaration format
//!
//! Descriptors can be built by hand or parsed from a compact declaration:
//!
//! ```text
//! <index>,<kind>[,<delimiter><target-index>]*
//! ```
//!
//! `"0,number,.1,+2"` declares index 0 as a number that hands over to
//! index 1 on `.` and to index 2 on `+`. The kind is `number` or `string`.
//!
//! ```
//! use verscan_core::{FieldDescriptor, FieldKind, Target};
//!
//! let mut major = 0;
//! let field =
//!     FieldDescriptor::from_declaration("major", "0,number,.1,+2", Target::number(&mut major))?;
//! assert_eq!(field.index(), 0);
//! assert_eq!(field.kind(), FieldKind::Number);
//! assert_eq!(field.route('+'), Some(2));
//! # Ok::<(), verscan_core::Error>(())
//! ```

mod table;
mod target;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

pub use table::{DescriptorTable, ENTRY_INDEX};
pub use target::Target;

/// Kind tag for numeric fields in declarations
const NUMBER_TAG: &str = "number";

/// Kind tag for textual fields in declarations
const TEXT_TAG: &str = "string";

/// How a segment is coerced before it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Base-10 signed 64-bit integer
    Number,
    /// Segment text, unchanged
    Text,
}

impl FieldKind {
    /// Returns the declaration tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Number => NUMBER_TAG,
            FieldKind::Text => TEXT_TAG,
        }
    }

    /// Looks up a kind by its declaration tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            NUMBER_TAG => Some(FieldKind::Number),
            TEXT_TAG => Some(FieldKind::Text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a version scheme
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    name: String,
    index: usize,
    kind: FieldKind,
    routes: HashMap<char, usize>,
    target: Target<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Creates a descriptor with no routes
    pub fn new(name: impl Into<String>, index: usize, kind: FieldKind, target: Target<'a>) -> Self {
        Self {
            name: name.into(),
            index,
            kind,
            routes: HashMap::new(),
            target,
        }
    }

    /// Adds a route taken when `delimiter` ends this field
    pub fn with_route(mut self, delimiter: char, target: usize) -> Result<Self> {
        if self.routes.insert(delimiter, target).is_some() {
            return Err(Error::duplicate_route(self.name, delimiter));
        }
        Ok(self)
    }

    /// Parses a declaration such as `"0,number,.1,+2"`
    pub fn from_declaration(
        name: impl Into<String>,
        declaration: &str,
        target: Target<'a>,
    ) -> Result<Self> {
        let name = name.into();
        let mut elements = declaration.split(',');

        let (Some(index), Some(kind)) = (elements.next(), elements.next()) else {
            return Err(Error::incomplete_declaration(name, declaration));
        };

        let index = index
            .parse::<usize>()
            .map_err(|_| Error::invalid_index(&name, index))?;
        let kind = FieldKind::from_tag(kind).ok_or_else(|| Error::unknown_field_kind(&name, kind))?;

        let mut field = Self::new(name, index, kind, target);
        for route in elements {
            let (delimiter, target) = parse_route(route)
                .ok_or_else(|| Error::invalid_route_target(&field.name, route))?;
            field = field.with_route(delimiter, target)?;
        }

        Ok(field)
    }

    /// Diagnostic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the routing graph
    pub fn index(&self) -> usize {
        self.index
    }

    /// Declared kind
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Index reached when `delimiter` ends this field
    pub fn route(&self, delimiter: char) -> Option<usize> {
        self.routes.get(&delimiter).copied()
    }

    /// All routes, sorted by delimiter
    pub fn routes(&self) -> Vec<(char, usize)> {
        let mut routes: Vec<_> = self.routes.iter().map(|(&d, &t)| (d, t)).collect();
        routes.sort_unstable();
        routes
    }

    /// Coerces `segment` to the field's kind and writes it to the target
    pub(crate) fn assign(&mut self, segment: &str) -> Result<()> {
        // Kind and target agree once the descriptor is in a built table
        match &mut self.target {
            Target::Number(set) => {
                let value = segment
                    .parse::<i64>()
                    .map_err(|e| Error::invalid_number(&self.name, segment, e))?;
                set(value);
            }
            Target::Text(set) => set(segment),
        }
        Ok(())
    }

    pub(crate) fn target_kind(&self) -> FieldKind {
        self.target.kind()
    }
}

/// Splits a route element into its delimiter and target index
fn parse_route(route: &str) -> Option<(char, usize)> {
    let mut chars = route.chars();
    let delimiter = chars.next()?;
    let target = chars.as_str().parse::<usize>().ok()?;
    Some((delimiter, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn declare(declaration: &str) -> Result<FieldDescriptor<'static>> {
        FieldDescriptor::from_declaration("field", declaration, Target::discard(FieldKind::Number))
    }

    #[test]
    fn test_field_kind_tags() {
        assert_eq!(FieldKind::from_tag("number"), Some(FieldKind::Number));
        assert_eq!(FieldKind::from_tag("string"), Some(FieldKind::Text));
        assert_eq!(FieldKind::from_tag("text"), None);
        assert_eq!(FieldKind::Text.to_string(), "string");
    }

    #[test]
    fn test_declaration_with_routes() {
        let field = declare("0,number,.1,+2").unwrap();
        assert_eq!(field.name(), "field");
        assert_eq!(field.index(), 0);
        assert_eq!(field.kind(), FieldKind::Number);
        assert_eq!(field.routes(), vec![('+', 2), ('.', 1)]);
        assert_eq!(field.route('-'), None);
    }

    #[test]
    fn test_declaration_without_routes() {
        let field = FieldDescriptor::from_declaration(
            "build",
            "4,string",
            Target::discard(FieldKind::Text),
        )
        .unwrap();
        assert_eq!(field.kind(), FieldKind::Text);
        assert!(field.routes().is_empty());
    }

    #[test]
    fn test_multibyte_delimiter() {
        let field = declare("3,number,→12").unwrap();
        assert_eq!(field.route('→'), Some(12));
    }

    #[test]
    fn test_incomplete_declaration() {
        assert!(matches!(declare("0"), Err(Error::IncompleteDeclaration { .. })));
        assert!(matches!(declare(""), Err(Error::IncompleteDeclaration { .. })));
    }

    #[test]
    fn test_invalid_index() {
        assert_eq!(
            declare("x,number").unwrap_err(),
            Error::invalid_index("field", "x")
        );
        assert!(matches!(declare("-1,number"), Err(Error::InvalidIndex { .. })));
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            declare("0,float").unwrap_err(),
            Error::unknown_field_kind("field", "float")
        );
    }

    #[test]
    fn test_invalid_route_target() {
        assert_eq!(
            declare("0,number,.x").unwrap_err(),
            Error::invalid_route_target("field", ".x")
        );
        assert!(matches!(declare("0,number,."), Err(Error::InvalidRouteTarget { .. })));
        assert!(matches!(declare("0,number,"), Err(Error::InvalidRouteTarget { .. })));
        assert!(matches!(declare("0,number,.-1"), Err(Error::InvalidRouteTarget { .. })));
    }

    #[test]
    fn test_duplicate_route() {
        assert_eq!(
            declare("0,number,.1,.2").unwrap_err(),
            Error::duplicate_route("field", '.')
        );
    }

    #[test]
    fn test_assign_number() {
        let mut value = 0;
        let mut field =
            FieldDescriptor::new("major", 0, FieldKind::Number, Target::number(&mut value));
        field.assign("0012").unwrap();
        assert!(matches!(field.assign("12x"), Err(Error::InvalidNumber { .. })));
        assert!(matches!(field.assign(""), Err(Error::InvalidNumber { .. })));
        drop(field);
        assert_eq!(value, 12);
    }

    #[test]
    fn test_assign_text() {
        let mut value = String::new();
        let mut field = FieldDescriptor::new("build", 0, FieldKind::Text, Target::text(&mut value));
        field.assign("").unwrap();
        field.assign("beta.2").unwrap();
        drop(field);
        assert_eq!(value, "beta.2");
    }
}
