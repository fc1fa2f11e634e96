//! Write capabilities bound to descriptors.
//!
//! A [`Target`] is the only way the scanner touches caller storage. It is
//! either a numeric setter or a text setter; which one is fixed when the
//! target is created, so a text segment can never reach an integer slot.

use super::FieldKind;
use std::fmt;

/// Setter through which a parsed segment is written
pub enum Target<'a> {
    /// Receives the value of a `number` field
    Number(Box<dyn FnMut(i64) + 'a>),
    /// Receives the segment of a `string` field
    Text(Box<dyn FnMut(&str) + 'a>),
}

impl<'a> Target<'a> {
    /// Binds to an integer slot
    pub fn number(slot: &'a mut i64) -> Self {
        Self::Number(Box::new(move |value| *slot = value))
    }

    /// Binds to a string slot, replacing its contents on write
    pub fn text(slot: &'a mut String) -> Self {
        Self::Text(Box::new(move |value: &str| {
            slot.clear();
            slot.push_str(value);
        }))
    }

    /// Binds to an optional integer slot; a write sets it to `Some`
    pub fn optional_number(slot: &'a mut Option<i64>) -> Self {
        Self::Number(Box::new(move |value| *slot = Some(value)))
    }

    /// Binds to an optional string slot; a write sets it to `Some`
    pub fn optional_text(slot: &'a mut Option<String>) -> Self {
        Self::Text(Box::new(move |value: &str| *slot = Some(value.to_owned())))
    }

    /// Wraps an arbitrary numeric setter
    pub fn number_with(setter: impl FnMut(i64) + 'a) -> Self {
        Self::Number(Box::new(setter))
    }

    /// Wraps an arbitrary text setter
    pub fn text_with(setter: impl FnMut(&str) + 'a) -> Self {
        Self::Text(Box::new(setter))
    }

    /// A target of the given kind that drops every value
    pub fn discard(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Number => Self::Number(Box::new(|_: i64| {})),
            FieldKind::Text => Self::Text(Box::new(|_: &str| {})),
        }
    }

    /// The kind of value this target accepts
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Number(_) => FieldKind::Number,
            Self::Text(_) => FieldKind::Text,
        }
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.kind()).finish()
    }
}
