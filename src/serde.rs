//! JSON-deserializable schema description.
//!
//! These types describe the *shape* of a fixed-layout record. They are
//! intended to be loaded from JSON (for example a schema file shipped with
//! your application) and then resolved into a [`crate::schema::Schema`] via
//! [`crate::schema::Schema::from_def`].

use serde::{Deserialize, Serialize};

/// Top-level schema definition: declared byte order, packing mode, and the
/// field list.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchemaDef {
    /// Declared byte order; omitted means native (no transformation).
    #[serde(default)]
    pub byte_order: Option<ByteOrderDef>,
    /// Packing mode; defaults to natural alignment.
    #[serde(default)]
    pub packing: PackingDef,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Field name; must be unique within the schema.
    pub name: String,
    /// Scalar, array, or bit-field group.
    pub kind: FieldKindDef,
    /// Optional per-field byte order override.
    #[serde(default)]
    pub byte_order: Option<ByteOrderDef>,
}

/// Kind of field in the schema.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum FieldKindDef {
    /// Single fixed-width scalar.
    Scalar { kind: KindDef },
    /// Fixed-size array of one scalar kind.
    Array { kind: KindDef, count: usize },
    /// Named sub-fields packed into one storage unit.
    Bits {
        storage: KindDef,
        members: Vec<BitMemberDef>,
    },
}

/// One named sub-field of a bit-field group.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BitMemberDef {
    pub name: String,
    pub width: usize,
}

/// Primitive kind names as they appear in schema files.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum KindDef {
    U8,
    U16,
    U32,
    U64,
    S8,
    S16,
    S32,
    S64,
    F32,
    F64,
}

impl From<KindDef> for crate::kind::PrimitiveKind {
    fn from(value: KindDef) -> Self {
        match value {
            KindDef::U8 => crate::kind::PrimitiveKind::U8,
            KindDef::U16 => crate::kind::PrimitiveKind::U16,
            KindDef::U32 => crate::kind::PrimitiveKind::U32,
            KindDef::U64 => crate::kind::PrimitiveKind::U64,
            KindDef::S8 => crate::kind::PrimitiveKind::S8,
            KindDef::S16 => crate::kind::PrimitiveKind::S16,
            KindDef::S32 => crate::kind::PrimitiveKind::S32,
            KindDef::S64 => crate::kind::PrimitiveKind::S64,
            KindDef::F32 => crate::kind::PrimitiveKind::F32,
            KindDef::F64 => crate::kind::PrimitiveKind::F64,
        }
    }
}

/// Byte order names as they appear in schema files.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrderDef {
    Native,
    Little,
    Big,
}

impl From<ByteOrderDef> for crate::field::ByteOrder {
    fn from(value: ByteOrderDef) -> Self {
        match value {
            ByteOrderDef::Native => crate::field::ByteOrder::Native,
            ByteOrderDef::Little => crate::field::ByteOrder::Little,
            ByteOrderDef::Big => crate::field::ByteOrder::Big,
        }
    }
}

/// Packing mode names as they appear in schema files.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackingDef {
    #[default]
    Natural,
    Packed,
}

impl From<PackingDef> for crate::layout::Packing {
    fn from(value: PackingDef) -> Self {
        match value {
            PackingDef::Natural => crate::layout::Packing::Natural,
            PackingDef::Packed => crate::layout::Packing::Packed,
        }
    }
}

impl crate::schema::Schema {
    /// Resolves a schema from a deserialized definition.
    pub fn from_def(def: SchemaDef) -> Result<Self, crate::errors::DefinitionError> {
        let fields: Vec<crate::field::FieldSpec> =
            def.fields.into_iter().map(Into::into).collect();
        crate::schema::Schema::resolve(
            &fields,
            None,
            def.byte_order.map(Into::into),
            def.packing.into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::field::ByteOrder;

    use super::*;

    #[test]
    fn test_from_def_resolves_layout() {
        let def = SchemaDef {
            byte_order: Some(ByteOrderDef::Little),
            packing: PackingDef::Packed,
            fields: vec![
                FieldDef {
                    name: "id".to_string(),
                    kind: FieldKindDef::Scalar { kind: KindDef::U32 },
                    byte_order: None,
                },
                FieldDef {
                    name: "payload".to_string(),
                    kind: FieldKindDef::Array {
                        kind: KindDef::U8,
                        count: 3,
                    },
                    byte_order: Some(ByteOrderDef::Big),
                },
            ],
        };

        let schema = crate::schema::Schema::from_def(def).unwrap();
        assert_eq!(schema.total_size(), 7);
        assert_eq!(schema.byte_order(), ByteOrder::Little);
        assert_eq!(schema.field("payload").unwrap().offset, 4);
        assert_eq!(schema.field("payload").unwrap().byte_order, ByteOrder::Big);
    }
}
