//! Error types for schema definition, record construction, decoding, and
//! element access. Each phase surfaces its own enum to the immediate caller;
//! nothing is logged or retried inside the library.

/// Errors produced while resolving a [`crate::schema::Schema`] from field
/// declarations. No partial schema is produced on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Field name occurs twice across the inherited field chain.
    DuplicateFieldName(String),
    /// Array field declared with zero elements.
    InvalidArrayCount,
    /// Bit-field group declared with no members.
    EmptyBitField,
    /// Bit-field member declared with zero width.
    InvalidBitWidth,
    /// Bit-field member widths sum past the storage unit's width.
    BitWidthOverflow {
        storage_bits: usize,
        declared_bits: usize,
    },
}

/// Errors produced when constructing or mutating a [`crate::record::Record`].
/// Integer truncation is wraparound semantics, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// Field supplied both positionally and by name.
    DuplicateArgument(String),
    /// Field supplied neither positionally nor by name. Every field of a
    /// fixed-size record must be initialized.
    MissingField(String),
    /// Named value does not match any field in the schema.
    UnknownField(String),
    /// More positional values than the schema has fields.
    TooManyValues { expected: usize, given: usize },
    /// Value shape does not fit the field's kind (e.g. a float supplied to an
    /// integer field, or a scalar supplied to an array field).
    TypeMismatch(String),
    /// Array value length differs from the declared element count.
    ArrayLengthMismatch {
        field: String,
        expected: usize,
        given: usize,
    },
}

/// Errors produced when decoding a record from bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input is shorter than the schema's total size. Excess trailing bytes
    /// are not an error.
    BufferTooShort { needed: usize, got: usize },
}

/// Errors produced by element access on an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Array or bit-field element index outside the declared count.
    IndexOutOfRange { index: usize, count: usize },
    /// Indexed access on a scalar field.
    NotAnArray(String),
    /// No field with this name in the schema.
    UnknownField(String),
}
