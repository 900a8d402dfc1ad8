//! Field values and the truncating coercion applied on record construction
//! and assignment.

use crate::{
    bytes::{mask_to_width, sign_extend},
    errors::ConstructError,
    field::{BitFieldSpec, ByteOrder, FieldKind},
    kind::PrimitiveKind,
};

/// A concrete field value. Integers are carried widened to 64 bits; the
/// field's kind decides how many of those bits reach the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Array field elements, or bit-field members in declaration order.
    Array(Vec<Value>),
}

impl Value {
    fn raw_int(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            Value::I64(v) => Some(*v as u64),
            _ => None,
        }
    }

    /// Raw wire bits of an already-coerced scalar value.
    pub(crate) fn to_bits(&self, kind: PrimitiveKind) -> u64 {
        match self {
            Value::F32(v) => v.to_bits() as u64,
            Value::F64(v) => v.to_bits(),
            Value::U64(v) => mask_to_width(*v, kind.bit_width()),
            Value::I64(v) => mask_to_width(*v as u64, kind.bit_width()),
            Value::Array(_) => unreachable!("arrays are encoded element-wise"),
        }
    }

    /// Reinterprets raw wire bits as a value of `kind`.
    pub(crate) fn from_bits(bits: u64, kind: PrimitiveKind) -> Value {
        match kind {
            PrimitiveKind::F32 => Value::F32(f32::from_bits(bits as u32)),
            PrimitiveKind::F64 => Value::F64(f64::from_bits(bits)),
            _ if kind.is_signed() => Value::I64(sign_extend(bits, kind.bit_width())),
            _ => Value::U64(mask_to_width(bits, kind.bit_width())),
        }
    }
}

/// Coerces a supplied scalar into `kind`, truncating integers to the kind's
/// bit width with wraparound. Assigning 4000 to a u8 field stores 160;
/// assigning -2 to a u16 field stores 0xFFFE. A float supplied to an integer
/// field is a [`ConstructError::TypeMismatch`], never a truncation.
fn coerce_scalar(value: Value, kind: PrimitiveKind, field: &str) -> Result<Value, ConstructError> {
    if kind.is_float() {
        let wide = match value {
            Value::F32(v) => v as f64,
            Value::F64(v) => v,
            Value::I64(v) => v as f64,
            Value::U64(v) => v as f64,
            Value::Array(_) => return Err(ConstructError::TypeMismatch(field.to_string())),
        };
        return Ok(match kind {
            PrimitiveKind::F32 => Value::F32(wide as f32),
            _ => Value::F64(wide),
        });
    }

    let bits = value
        .raw_int()
        .ok_or_else(|| ConstructError::TypeMismatch(field.to_string()))?;
    let bits = mask_to_width(bits, kind.bit_width());

    if kind.is_signed() {
        Ok(Value::I64(sign_extend(bits, kind.bit_width())))
    } else {
        Ok(Value::U64(bits))
    }
}

/// Coerces a supplied value into a field's kind. Arrays and bit-field groups
/// expect a [`Value::Array`] of exactly the declared length; each element is
/// coerced (and truncated) individually.
pub(crate) fn coerce(value: Value, kind: &FieldKind, field: &str) -> Result<Value, ConstructError> {
    match kind {
        FieldKind::Scalar(scalar) => coerce_scalar(value, *scalar, field),
        FieldKind::Array(element, count) => {
            let Value::Array(values) = value else {
                return Err(ConstructError::TypeMismatch(field.to_string()));
            };
            if values.len() != *count {
                return Err(ConstructError::ArrayLengthMismatch {
                    field: field.to_string(),
                    expected: *count,
                    given: values.len(),
                });
            }

            let mut out = Vec::with_capacity(values.len());
            for v in values {
                out.push(coerce_scalar(v, *element, field)?);
            }
            Ok(Value::Array(out))
        }
        FieldKind::Bits(bits) => {
            let Value::Array(values) = value else {
                return Err(ConstructError::TypeMismatch(field.to_string()));
            };
            if values.len() != bits.members.len() {
                return Err(ConstructError::ArrayLengthMismatch {
                    field: field.to_string(),
                    expected: bits.members.len(),
                    given: values.len(),
                });
            }

            let mut out = Vec::with_capacity(values.len());
            for (v, member) in values.into_iter().zip(&bits.members) {
                let raw = v
                    .raw_int()
                    .ok_or_else(|| ConstructError::TypeMismatch(field.to_string()))?;
                out.push(Value::U64(mask_to_width(raw, member.width)));
            }
            Ok(Value::Array(out))
        }
    }
}

/// Packs coerced bit-field members into one storage unit. Big byte order
/// packs the first member most-significant-first; little order packs it
/// least-significant-first.
pub(crate) fn pack_bits(members: &[Value], spec: &BitFieldSpec, order: ByteOrder) -> u64 {
    let storage_bits = spec.storage.bit_width();
    let mut bits = 0u64;
    let mut consumed = 0;

    for (value, member) in members.iter().zip(&spec.members) {
        let raw = mask_to_width(value.raw_int().unwrap_or(0), member.width);
        let shift = match order.concrete() {
            ByteOrder::Big => storage_bits - consumed - member.width,
            _ => consumed,
        };
        bits |= raw << shift;
        consumed += member.width;
    }

    bits
}

/// Extracts bit-field members from one storage unit, mirroring [`pack_bits`].
pub(crate) fn unpack_bits(bits: u64, spec: &BitFieldSpec, order: ByteOrder) -> Vec<Value> {
    let storage_bits = spec.storage.bit_width();
    let mut members = Vec::with_capacity(spec.members.len());
    let mut consumed = 0;

    for member in &spec.members {
        let shift = match order.concrete() {
            ByteOrder::Big => storage_bits - consumed - member.width,
            _ => consumed,
        };
        members.push(Value::U64(mask_to_width(bits >> shift, member.width)));
        consumed += member.width;
    }

    members
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U64(v as u64)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U64(v as u64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U64(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::I64(v as i64)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::I64(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I64(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use crate::field::BitMember;

    use super::*;

    #[test]
    fn test_unsigned_truncation_wraps() {
        let v = coerce_scalar(Value::U64(4000), PrimitiveKind::U8, "f").unwrap();
        assert_eq!(v, Value::U64(160));
    }

    #[test]
    fn test_negative_into_unsigned_wraps() {
        let v = coerce_scalar(Value::I64(-2), PrimitiveKind::U16, "f").unwrap();
        assert_eq!(v, Value::U64(0xFFFE));
    }

    #[test]
    fn test_signed_truncation_sign_extends() {
        let v = coerce_scalar(Value::U64(0xFF), PrimitiveKind::S8, "f").unwrap();
        assert_eq!(v, Value::I64(-1));
    }

    #[test]
    fn test_float_into_integer_is_type_mismatch() {
        assert_eq!(
            coerce_scalar(Value::F64(1.5), PrimitiveKind::U32, "f").unwrap_err(),
            ConstructError::TypeMismatch("f".to_string())
        );
    }

    #[test]
    fn test_integer_into_float_converts() {
        let v = coerce_scalar(Value::I64(2), PrimitiveKind::F64, "f").unwrap();
        assert_eq!(v, Value::F64(2.0));
    }

    #[test]
    fn test_array_length_must_match() {
        let kind = FieldKind::Array(PrimitiveKind::U8, 4);
        let err = coerce(Value::Array(vec![Value::U64(1)]), &kind, "version").unwrap_err();
        assert_eq!(
            err,
            ConstructError::ArrayLengthMismatch {
                field: "version".to_string(),
                expected: 4,
                given: 1,
            }
        );
    }

    #[test]
    fn test_array_elements_truncate() {
        let kind = FieldKind::Array(PrimitiveKind::U8, 4);
        let v = coerce(
            Value::Array(vec![
                Value::U64(1),
                Value::U64(2),
                Value::U64(3),
                Value::U64(4000),
            ]),
            &kind,
            "version",
        )
        .unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::U64(1),
                Value::U64(2),
                Value::U64(3),
                Value::U64(160),
            ])
        );
    }

    #[test]
    fn test_float_bits_round_trip() {
        let bits = Value::F32(1.0).to_bits(PrimitiveKind::F32);
        assert_eq!(bits, 0x3F800000);
        assert_eq!(Value::from_bits(bits, PrimitiveKind::F32), Value::F32(1.0));
    }

    #[test]
    fn test_pack_bits_big_is_msb_first() {
        let spec = BitFieldSpec {
            storage: PrimitiveKind::U8,
            members: vec![BitMember::new("hi", 4), BitMember::new("lo", 4)],
        };
        let members = vec![Value::U64(0xA), Value::U64(0xB)];
        assert_eq!(pack_bits(&members, &spec, ByteOrder::Big), 0xAB);
        assert_eq!(pack_bits(&members, &spec, ByteOrder::Little), 0xBA);
    }

    #[test]
    fn test_unpack_bits_mirrors_pack() {
        let spec = BitFieldSpec {
            storage: PrimitiveKind::U16,
            members: vec![
                BitMember::new("a", 3),
                BitMember::new("b", 6),
                BitMember::new("c", 5),
            ],
        };
        let members = vec![Value::U64(0b101), Value::U64(0b110011), Value::U64(0b10101)];

        for order in [ByteOrder::Little, ByteOrder::Big, ByteOrder::Native] {
            let packed = pack_bits(&members, &spec, order);
            assert_eq!(unpack_bits(packed, &spec, order), members);
        }
    }
}
