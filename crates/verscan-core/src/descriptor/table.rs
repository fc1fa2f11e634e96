//! Validated mapping from field index to descriptor.

use super::FieldDescriptor;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Index of the field every scan starts in
pub const ENTRY_INDEX: usize = 0;

/// A closed routing graph of field descriptors.
///
/// Building a table checks that:
///
/// - no two descriptors share an index
/// - every descriptor's target accepts its declared kind
/// - every route points at a declared index
/// - index [`ENTRY_INDEX`] exists
///
/// Cycles and fields unreachable from the entry are accepted.
#[derive(Debug)]
pub struct DescriptorTable<'a> {
    fields: BTreeMap<usize, FieldDescriptor<'a>>,
}

impl<'a> DescriptorTable<'a> {
    /// Validates `descriptors` and assembles them into a table
    pub fn build(descriptors: impl IntoIterator<Item = FieldDescriptor<'a>>) -> Result<Self> {
        let mut fields = BTreeMap::new();

        for field in descriptors {
            if fields.contains_key(&field.index()) {
                return Err(Error::duplicate_index(field.name, field.index));
            }
            fields.insert(field.index(), field);
        }

        // Duplicate indices take precedence over kind mismatches
        if let Some(field) = fields.values().find(|f| f.target_kind() != f.kind()) {
            return Err(Error::TargetMismatch {
                name: field.name.clone(),
                declared: field.kind,
                bound: field.target_kind(),
            });
        }

        // Checked table-wide, whether or not a scan could ever take the route
        for field in fields.values() {
            for (delimiter, target) in field.routes() {
                if !fields.contains_key(&target) {
                    return Err(Error::dangling_route(field.name(), delimiter, target));
                }
            }
        }

        if !fields.contains_key(&ENTRY_INDEX) {
            return Err(Error::MissingEntryField);
        }

        debug!("Built descriptor table with {} fields", fields.len());
        Ok(Self { fields })
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the table has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by index
    pub fn get(&self, index: usize) -> Option<&FieldDescriptor<'a>> {
        self.fields.get(&index)
    }

    /// Fields in index order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor<'a>> {
        self.fields.values()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut FieldDescriptor<'a>> {
        self.fields.get_mut(&index)
    }
}
