//! Catalog of fixed-width primitive kinds a field can hold.

/// Maximum alignment a field is ever given under natural packing. Fixed at 8
/// bytes so resolved layouts are identical across host platforms.
pub const MAX_NATIVE_ALIGNMENT: usize = 8;

/// A fixed-width scalar kind: unsigned/signed integers of 8..64 bits, or an
/// IEEE 754 single/double float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
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

impl PrimitiveKind {
    /// Width of the encoded representation in bits.
    pub fn bit_width(&self) -> usize {
        match self {
            PrimitiveKind::U8 | PrimitiveKind::S8 => 8,
            PrimitiveKind::U16 | PrimitiveKind::S16 => 16,
            PrimitiveKind::U32 | PrimitiveKind::S32 | PrimitiveKind::F32 => 32,
            PrimitiveKind::U64 | PrimitiveKind::S64 | PrimitiveKind::F64 => 64,
        }
    }

    /// Width of the encoded representation in bytes.
    pub fn size(&self) -> usize {
        self.bit_width() / 8
    }

    /// Natural alignment under [`crate::layout::Packing::Natural`]: the kind's
    /// own size, capped at [`MAX_NATIVE_ALIGNMENT`].
    pub fn alignment(&self) -> usize {
        self.size().min(MAX_NATIVE_ALIGNMENT)
    }

    /// True for the two's-complement signed integer kinds.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::S8 | PrimitiveKind::S16 | PrimitiveKind::S32 | PrimitiveKind::S64
        )
    }

    /// True for the IEEE 754 float kinds. Float values are never
    /// integer-truncated.
    pub fn is_float(&self) -> bool {
        matches!(self, PrimitiveKind::F32 | PrimitiveKind::F64)
    }
}
