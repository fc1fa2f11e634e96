//! Single-pass scanning engine.
//!
//! The scanner walks a version string once, left to right, treating the
//! descriptor table as a state machine: the current field owns every
//! character up to the first one that matches one of its routes.
//!
//! ## Algorithm Overview
//!
//! 1. Start in the entry field (index 0) at offset 0
//! 2. Advance until a character matches a route of the current field, or
//!    the input ends
//! 3. Coerce the segment since the last boundary to the field's kind and
//!    write it to the field's target
//! 4. At end of input, stop; otherwise skip the delimiter and continue in
//!    the field the route points to
//!
//! A character that matches no route is part of the segment, so a field
//! without routes takes the rest of the input. The first error stops the
//! scan; values written before it are kept.
//!
//! ```
//! use verscan_core::{FieldDescriptor, Scanner, Target};
//!
//! let (mut major, mut minor, mut build) = (0, 0, String::new());
//! Scanner::new().parse(
//!     [
//!         FieldDescriptor::from_declaration("major", "0,number,.1", Target::number(&mut major))?,
//!         FieldDescriptor::from_declaration("minor", "1,number,+2", Target::number(&mut minor))?,
//!         FieldDescriptor::from_declaration("build", "2,string", Target::text(&mut build))?,
//!     ],
//!     "12.7+beta",
//! )?;
//! assert_eq!((major, minor, build.as_str()), (12, 7, "beta"));
//! # Ok::<(), verscan_core::Error>(())
//! ```

use crate::descriptor::{DescriptorTable, FieldDescriptor, ENTRY_INDEX};
use crate::error::{Error, Result};
use crate::scheme::Versioned;
use tracing::{debug, trace};

/// Configuration for the scanner
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Maximum input length in bytes (0 = unlimited)
    pub max_input_len: usize,
}

impl ScannerConfig {
    /// Creates a new scanner config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum input length
    pub fn max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = max;
        self
    }
}

/// Parses version strings against descriptor tables
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    /// Creates a new scanner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Builds a table from `descriptors` and scans `input` into it
    pub fn parse<'a>(
        &self,
        descriptors: impl IntoIterator<Item = FieldDescriptor<'a>>,
        input: &str,
    ) -> Result<()> {
        let table = DescriptorTable::build(descriptors)?;
        self.scan(table, input)
    }

    /// Parses `input` into a type that describes its own fields
    pub fn parse_into<V: Versioned + ?Sized>(&self, version: &mut V, input: &str) -> Result<()> {
        let descriptors = version.fields()?;
        self.parse(descriptors, input)
    }

    /// Scans `input` into the targets of an already built table
    pub fn scan(&self, mut table: DescriptorTable<'_>, input: &str) -> Result<()> {
        if self.config.max_input_len > 0 && input.len() > self.config.max_input_len {
            return Err(Error::InputTooLong {
                len: input.len(),
                max: self.config.max_input_len,
            });
        }

        if table.get(ENTRY_INDEX).is_none() {
            return Err(Error::MissingEntryField);
        }

        debug!("Scanning {} bytes against {} fields", input.len(), table.len());

        let mut chars = input.char_indices();
        let mut start = 0;
        let mut current = ENTRY_INDEX;
        let mut segments = 0usize;

        loop {
            // Unreachable: `build` guarantees every route target and the entry exist
            let field = table.get_mut(current).ok_or_else(|| {
                Error::internal(format!("index {current} missing from built table"))
            })?;

            // (offset, delimiter, next index) of the first routed character
            let boundary = chars
                .by_ref()
                .find_map(|(offset, c)| field.route(c).map(|next| (offset, c, next)));

            let end = boundary.map_or(input.len(), |(offset, _, _)| offset);
            let segment = &input[start..end];
            trace!("Field '{}' takes segment {:?} at {}..{}", field.name(), segment, start, end);

            field.assign(segment)?;
            segments += 1;

            let Some((offset, delimiter, next)) = boundary else {
                break;
            };
            trace!("Delimiter {:?} at {} routes to index {}", delimiter, offset, next);
            start = offset + delimiter.len_utf8();
            current = next;
        }

        debug!("Scan complete: wrote {} segments", segments);
        Ok(())
    }
}

/// Builds a table from `descriptors` and scans `input` with the default scanner
pub fn parse<'a>(
    descriptors: impl IntoIterator<Item = FieldDescriptor<'a>>,
    input: &str,
) -> Result<()> {
    Scanner::new().parse(descriptors, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldKind, Target};
    use pretty_assertions::assert_eq;

    /// Values of the three-field test scheme, seeded with sentinels
    #[derive(Debug, PartialEq)]
    struct Fields {
        first: i64,
        second: i64,
        third: String,
    }

    impl Default for Fields {
        fn default() -> Self {
            Self {
                first: -1,
                second: -1,
                third: "untouched".into(),
            }
        }
    }

    fn scan_three(scanner: &Scanner, input: &str) -> (Fields, Result<()>) {
        let mut out = Fields::default();
        let result = scanner.parse(
            [
                FieldDescriptor::new("first", 0, FieldKind::Number, Target::number(&mut out.first))
                    .with_route('.', 1)
                    .unwrap(),
                FieldDescriptor::new(
                    "second",
                    1,
                    FieldKind::Number,
                    Target::number(&mut out.second),
                )
                .with_route('+', 2)
                .unwrap(),
                FieldDescriptor::new("third", 2, FieldKind::Text, Target::text(&mut out.third)),
            ],
            input,
        );
        (out, result)
    }

    #[test]
    fn test_full_match() {
        let (out, result) = scan_three(&Scanner::new(), "12.7+beta");
        result.unwrap();
        assert_eq!(
            out,
            Fields {
                first: 12,
                second: 7,
                third: "beta".into(),
            }
        );
    }

    #[test]
    fn test_unvisited_field_is_untouched() {
        let (out, result) = scan_three(&Scanner::new(), "12.7");
        result.unwrap();
        assert_eq!(out.first, 12);
        assert_eq!(out.second, 7);
        assert_eq!(out.third, "untouched");
    }

    #[test]
    fn test_invalid_number_stops_scan() {
        let (out, result) = scan_three(&Scanner::new(), "12x.7");
        match result.unwrap_err() {
            Error::InvalidNumber { name, segment, .. } => {
                assert_eq!(name, "first");
                assert_eq!(segment, "12x");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(out, Fields::default());
    }

    #[test]
    fn test_earlier_writes_are_kept_on_error() {
        let (out, result) = scan_three(&Scanner::new(), "3.x+rc");
        assert!(matches!(result, Err(Error::InvalidNumber { .. })));
        assert_eq!(out.first, 3);
        assert_eq!(out.second, -1);
        assert_eq!(out.third, "untouched");
    }

    #[test]
    fn test_trailing_delimiter_leaves_empty_number() {
        let (out, result) = scan_three(&Scanner::new(), "12.");
        assert!(matches!(
            result,
            Err(Error::InvalidNumber { ref segment, .. }) if segment.is_empty()
        ));
        assert_eq!(out.first, 12);
    }

    #[test]
    fn test_empty_input() {
        let (_, result) = scan_three(&Scanner::new(), "");
        assert!(matches!(result, Err(Error::InvalidNumber { .. })));

        let mut text = String::from("x");
        parse(
            [FieldDescriptor::new("only", 0, FieldKind::Text, Target::text(&mut text))],
            "",
        )
        .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_field_without_routes_absorbs_rest() {
        let (out, result) = scan_three(&Scanner::new(), "1.2+rc.1+build.5-x");
        result.unwrap();
        assert_eq!(out.third, "rc.1+build.5-x");
    }

    #[test]
    fn test_unrouted_delimiter_is_segment_content() {
        // '+' is not a route of the first field
        let (out, result) = scan_three(&Scanner::new(), "1+2.3");
        assert!(matches!(
            result,
            Err(Error::InvalidNumber { ref segment, .. }) if segment == "1+2"
        ));
        assert_eq!(out.second, -1);
    }

    #[test]
    fn test_signed_and_padded_numbers() {
        let (out, result) = scan_three(&Scanner::new(), "007.-4+");
        result.unwrap();
        assert_eq!(out.first, 7);
        assert_eq!(out.second, -4);
        assert_eq!(out.third, "");
    }

    #[test]
    fn test_number_round_trip() {
        for (first, second) in [(0, 0), (1, 22), (4096, 9_007_199_254_740_993_i64)] {
            let input = format!("{first}.{second}");
            let (out, result) = scan_three(&Scanner::new(), &input);
            result.unwrap();
            assert_eq!(out.first.to_string(), first.to_string());
            assert_eq!(out.second.to_string(), second.to_string());
        }
    }

    #[test]
    fn test_cycle_revisits_field() {
        let mut seen = Vec::new();
        parse(
            [FieldDescriptor::new(
                "part",
                0,
                FieldKind::Number,
                Target::number_with(|n| seen.push(n)),
            )
            .with_route('.', 0)
            .unwrap()],
            "1.2.3.4",
        )
        .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_multibyte_input() {
        let mut words = Vec::new();
        parse(
            [FieldDescriptor::new(
                "word",
                0,
                FieldKind::Text,
                Target::text_with(|s| words.push(s.to_owned())),
            )
            .with_route('·', 0)
            .unwrap()],
            "größe·ñ·日本",
        )
        .unwrap();
        assert_eq!(words, ["größe", "ñ", "日本"]);
    }

    #[test]
    fn test_build_errors_come_before_scan() {
        let mut first = -1;
        let err = parse(
            [
                FieldDescriptor::new("first", 0, FieldKind::Number, Target::number(&mut first))
                    .with_route('.', 1)
                    .unwrap(),
            ],
            "5",
        )
        .unwrap_err();
        assert_eq!(err, Error::dangling_route("first", '.', 1));
        assert_eq!(first, -1);
    }

    #[test]
    fn test_input_too_long() {
        let scanner = Scanner::with_config(ScannerConfig::new().max_input_len(4));
        let (out, result) = scan_three(&scanner, "12.7+beta");
        assert_eq!(result.unwrap_err(), Error::InputTooLong { len: 9, max: 4 });
        assert_eq!(out, Fields::default());

        let (_, result) = scan_three(&scanner, "12.7");
        assert!(result.is_ok());
    }

    #[test]
    fn test_scanner_config_builder() {
        let config = ScannerConfig::new().max_input_len(64);
        assert_eq!(config.max_input_len, 64);
        assert_eq!(ScannerConfig::default().max_input_len, 0);
    }
}
