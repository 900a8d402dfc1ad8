//! Declaration of schema fields: scalars, fixed-size arrays, and bit-field
//! groups, each with an optional per-field byte order.

use crate::kind::PrimitiveKind;

/// Byte order of a multi-byte scalar on the wire. `Native` means the host's
/// order, i.e. no transformation is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    /// The host platform's byte order.
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Resolves `Native` to the host's concrete order.
    pub fn concrete(self) -> Self {
        match self {
            ByteOrder::Native => Self::host(),
            other => other,
        }
    }
}

/// A single named field in a schema declaration.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Name used for named construction and value lookup. Must be unique
    /// across the whole inherited field chain.
    pub name: String,
    /// Scalar, fixed-size array, or bit-field group.
    pub kind: FieldKind,
    /// Byte order override; `None` inherits the owning schema's order.
    pub byte_order: Option<ByteOrder>,
}

impl FieldSpec {
    /// A scalar field using the owning schema's byte order.
    pub fn scalar(name: &str, kind: PrimitiveKind) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Scalar(kind),
            byte_order: None,
        }
    }

    /// A fixed-size array field of `count` elements.
    pub fn array(name: &str, element: PrimitiveKind, count: usize) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Array(element, count),
            byte_order: None,
        }
    }

    /// A bit-field group packed into one `storage` unit.
    pub fn bits(name: &str, storage: PrimitiveKind, members: Vec<BitMember>) -> Self {
        FieldSpec {
            name: name.to_string(),
            kind: FieldKind::Bits(BitFieldSpec { storage, members }),
            byte_order: None,
        }
    }

    /// Overrides the byte order for this field only.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = Some(byte_order);
        self
    }
}

/// Distinguishes scalar fields, fixed-size arrays, and bit-field groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single fixed-width value.
    Scalar(PrimitiveKind),
    /// `count` consecutive elements of one kind. Count is fixed at
    /// definition time.
    Array(PrimitiveKind, usize),
    /// Named sub-fields packed into a single storage unit.
    Bits(BitFieldSpec),
}

/// A group of sub-fields whose bit widths pack into one storage unit. The
/// widths may sum to less than the storage width; unused bits encode as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitFieldSpec {
    /// Integer kind providing the storage width and wire size.
    pub storage: PrimitiveKind,
    /// Sub-fields in declaration order.
    pub members: Vec<BitMember>,
}

/// One named sub-field of a bit-field group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMember {
    pub name: String,
    /// Width in bits; must be non-zero.
    pub width: usize,
}

impl BitMember {
    pub fn new(name: &str, width: usize) -> Self {
        BitMember {
            name: name.to_string(),
            width,
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for FieldSpec {
    fn from(value: crate::serde::FieldDef) -> Self {
        FieldSpec {
            name: value.name,
            kind: value.kind.into(),
            byte_order: value.byte_order.map(Into::into),
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldKindDef> for FieldKind {
    fn from(value: crate::serde::FieldKindDef) -> Self {
        match value {
            crate::serde::FieldKindDef::Scalar { kind } => FieldKind::Scalar(kind.into()),
            crate::serde::FieldKindDef::Array { kind, count } => {
                FieldKind::Array(kind.into(), count)
            }
            crate::serde::FieldKindDef::Bits { storage, members } => {
                FieldKind::Bits(BitFieldSpec {
                    storage: storage.into(),
                    members: members
                        .into_iter()
                        .map(|m| BitMember {
                            name: m.name,
                            width: m.width,
                        })
                        .collect(),
                })
            }
        }
    }
}
