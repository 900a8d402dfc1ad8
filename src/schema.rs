//! Schema: resolved, immutable description of a record's fields, offsets,
//! and total size. Use [`Schema::resolve`] to build one from [`FieldSpec`]s,
//! then construct or decode [`crate::record::Record`]s against it.

use std::collections::BTreeSet;

use crate::{
    errors::DefinitionError,
    field::{ByteOrder, FieldSpec},
    layout::{Packing, ResolvedField, assign_offsets},
};

/// A resolved schema. Immutable after [`Schema::resolve`]; share it via
/// `Arc` across records and threads.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Resolved fields, ancestors first, then own fields in declaration
    /// order.
    pub fields: Vec<ResolvedField>,
    byte_order: ByteOrder,
    packing: Packing,
    total_size: usize,
}

impl Schema {
    /// Resolves a schema from its own field declarations plus an optional
    /// ancestor.
    ///
    /// The ancestor's resolved fields are copied (never mutated), then
    /// `own_fields` are appended in declaration order. A duplicate name
    /// anywhere in the merged chain fails resolution. When `declared_order`
    /// is `None` the order is inherited from the ancestor, falling back to
    /// native. Offsets are recomputed for the merged sequence under
    /// `packing`. This runs once per schema; every record reuses the result.
    pub fn resolve(
        own_fields: &[FieldSpec],
        ancestor: Option<&Schema>,
        declared_order: Option<ByteOrder>,
        packing: Packing,
    ) -> Result<Self, DefinitionError> {
        let byte_order = declared_order
            .unwrap_or_else(|| ancestor.map_or(ByteOrder::Native, |a| a.byte_order));

        let mut fields: Vec<ResolvedField> =
            ancestor.map_or_else(Vec::new, |a| a.fields.clone());
        fields.reserve(own_fields.len());

        for spec in own_fields {
            fields.push(ResolvedField::resolve(spec, byte_order)?);
        }

        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DefinitionError::DuplicateFieldName(field.name.clone()));
            }
        }

        let total_size = assign_offsets(&mut fields, packing);

        Ok(Schema {
            fields,
            byte_order,
            packing,
            total_size,
        })
    }

    /// Derives a new schema appending `own_fields` after this schema's
    /// fields, inheriting its byte order and packing.
    pub fn extend(&self, own_fields: &[FieldSpec]) -> Result<Self, DefinitionError> {
        Schema::resolve(own_fields, Some(self), None, self.packing)
    }

    /// Exact encoded size in bytes, padding included.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// The schema's declared byte order (`Native` when none was declared
    /// anywhere in the chain).
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn packing(&self) -> Packing {
        self.packing
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
