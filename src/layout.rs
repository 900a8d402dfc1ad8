//! Resolved layout: validated fields with byte offsets and sizes.
//!
//! [`ResolvedField`]s are produced once per schema by
//! [`crate::schema::Schema::resolve`] and reused for every record.

use crate::{
    errors::DefinitionError,
    field::{ByteOrder, FieldKind, FieldSpec},
};

/// Whether inter-field padding is inserted for alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packing {
    /// Each field starts at the next multiple of its natural alignment and
    /// the total size is rounded up to the widest field's alignment.
    #[default]
    Natural,
    /// Byte-contiguous, no padding. Total size is the exact sum of field
    /// sizes.
    Packed,
}

/// A schema field after resolution: concrete byte order, byte offset, and
/// wire size.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub name: String,
    pub kind: FieldKind,
    /// Order the field was resolved with: its own override if declared,
    /// otherwise the owning schema's order.
    pub byte_order: ByteOrder,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Encoded size in bytes.
    pub size: usize,
}

impl ResolvedField {
    /// Validates a declaration and fixes its byte order. The offset is filled
    /// in afterwards by [`assign_offsets`].
    pub fn resolve(spec: &FieldSpec, schema_order: ByteOrder) -> Result<Self, DefinitionError> {
        let size = match &spec.kind {
            FieldKind::Scalar(kind) => kind.size(),
            FieldKind::Array(element, count) => {
                if *count == 0 {
                    return Err(DefinitionError::InvalidArrayCount);
                }
                element.size() * count
            }
            FieldKind::Bits(bits) => {
                if bits.members.is_empty() {
                    return Err(DefinitionError::EmptyBitField);
                }

                let storage_bits = bits.storage.bit_width();
                let mut declared_bits = 0usize;
                for member in &bits.members {
                    if member.width == 0 {
                        return Err(DefinitionError::InvalidBitWidth);
                    }
                    // Checked sum: a pathological member width must not wrap
                    // past the storage check.
                    declared_bits = match declared_bits.checked_add(member.width) {
                        Some(sum) if sum <= storage_bits => sum,
                        _ => {
                            return Err(DefinitionError::BitWidthOverflow {
                                storage_bits,
                                declared_bits: declared_bits.saturating_add(member.width),
                            });
                        }
                    };
                }

                bits.storage.size()
            }
        };

        Ok(ResolvedField {
            name: spec.name.clone(),
            kind: spec.kind.clone(),
            byte_order: spec.byte_order.unwrap_or(schema_order),
            offset: 0,
            size,
        })
    }

    /// Natural alignment: the scalar's own width, element width for arrays,
    /// storage width for bit-fields.
    pub fn alignment(&self) -> usize {
        match &self.kind {
            FieldKind::Scalar(kind) => kind.alignment(),
            FieldKind::Array(element, _) => element.alignment(),
            FieldKind::Bits(bits) => bits.storage.alignment(),
        }
    }
}

fn round_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

/// Assigns each field's offset under `packing` and returns the total record
/// size. Pure: depends only on the field sequence.
pub fn assign_offsets(fields: &mut [ResolvedField], packing: Packing) -> usize {
    let mut cursor = 0;
    let mut max_alignment = 1;

    for field in fields.iter_mut() {
        field.offset = match packing {
            Packing::Natural => {
                let alignment = field.alignment();
                max_alignment = max_alignment.max(alignment);
                round_up(cursor, alignment)
            }
            Packing::Packed => cursor,
        };
        cursor = field.offset + field.size;
    }

    match packing {
        Packing::Natural => round_up(cursor, max_alignment),
        Packing::Packed => cursor,
    }
}
