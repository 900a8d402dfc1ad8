//! Record: a concrete value of a schema, plus the byte codec.
//!
//! Encoding walks the resolved layout and writes each field at its offset
//! with its byte order; decoding mirrors it. Both are pure and bounded by
//! the schema's field count and total size.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    bytes::{read_scalar, write_scalar},
    errors::{AccessError, ConstructError, DecodeError},
    field::FieldKind,
    schema::Schema,
    value::{Value, coerce, pack_bits, unpack_bits},
};

/// A fully-initialized record. Every field of the schema holds a value;
/// partially constructed records do not exist.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    values: BTreeMap<String, Value>,
}

/// Two records are equal when they share the same schema resolution (pointer
/// identity of the `Arc`, matching the one-`Schema`-many-records ownership
/// model) and hold equal field values. Records of structurally identical but
/// separately resolved schemas compare unequal.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}

impl Record {
    /// Constructs a record from positional and named values.
    ///
    /// Positional values map onto the schema's resolved field order
    /// (ancestor fields first). A field supplied both ways is a
    /// [`ConstructError::DuplicateArgument`]; a field supplied neither way is
    /// a [`ConstructError::MissingField`]. Integer values are truncated to
    /// their field's bit width with wraparound.
    pub fn new(
        schema: Arc<Schema>,
        positional: Vec<Value>,
        named: &[(&str, Value)],
    ) -> Result<Self, ConstructError> {
        if positional.len() > schema.fields.len() {
            return Err(ConstructError::TooManyValues {
                expected: schema.fields.len(),
                given: positional.len(),
            });
        }

        let mut values: BTreeMap<String, Value> = BTreeMap::new();

        for (field, value) in schema.fields.iter().zip(positional) {
            values.insert(field.name.clone(), coerce(value, &field.kind, &field.name)?);
        }

        for (name, value) in named {
            let field = schema
                .field(name)
                .ok_or_else(|| ConstructError::UnknownField(name.to_string()))?;
            if values.contains_key(*name) {
                return Err(ConstructError::DuplicateArgument(name.to_string()));
            }
            values.insert(
                field.name.clone(),
                coerce(value.clone(), &field.kind, &field.name)?,
            );
        }

        for field in &schema.fields {
            if !values.contains_key(&field.name) {
                return Err(ConstructError::MissingField(field.name.clone()));
            }
        }

        Ok(Record { schema, values })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The value of a field, if the schema has one by this name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// An array element or bit-field member by index. Indexing outside the
    /// declared count is an error, never clamped.
    pub fn element(&self, name: &str, index: usize) -> Result<&Value, AccessError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| AccessError::UnknownField(name.to_string()))?;

        let count = match &field.kind {
            FieldKind::Array(_, count) => *count,
            FieldKind::Bits(bits) => bits.members.len(),
            FieldKind::Scalar(_) => return Err(AccessError::NotAnArray(name.to_string())),
        };

        if index >= count {
            return Err(AccessError::IndexOutOfRange { index, count });
        }

        match &self.values[&field.name] {
            Value::Array(items) => Ok(&items[index]),
            _ => Err(AccessError::NotAnArray(name.to_string())),
        }
    }

    /// Assigns a field, truncating integer values to the field's declared
    /// width. Truncation is silent wraparound, never an error.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ConstructError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| ConstructError::UnknownField(name.to_string()))?;
        let coerced = coerce(value, &field.kind, &field.name)?;
        self.values.insert(field.name.clone(), coerced);
        Ok(())
    }

    /// Encodes the record to exactly `schema.total_size()` bytes. Padding
    /// bytes introduced by natural packing are zero.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.schema.total_size()];

        for field in &self.schema.fields {
            let value = &self.values[&field.name];
            let span = &mut buf[field.offset..field.offset + field.size];

            match (&field.kind, value) {
                (FieldKind::Scalar(kind), value) => {
                    write_scalar(span, value.to_bits(*kind), kind.size(), field.byte_order);
                }
                (FieldKind::Array(element, _), Value::Array(items)) => {
                    let size = element.size();
                    for (i, item) in items.iter().enumerate() {
                        write_scalar(
                            &mut span[i * size..],
                            item.to_bits(*element),
                            size,
                            field.byte_order,
                        );
                    }
                }
                (FieldKind::Bits(bits), Value::Array(members)) => {
                    let packed = pack_bits(members, bits, field.byte_order);
                    write_scalar(span, packed, bits.storage.size(), field.byte_order);
                }
                // Construction coerces every value to its field's shape.
                _ => unreachable!("value shape checked at construction"),
            }
        }

        buf
    }

    /// Decodes a record from `data`. Fails if `data` is shorter than the
    /// schema's total size; excess trailing bytes are ignored so a record
    /// can be read out of a larger buffer.
    pub fn decode(schema: Arc<Schema>, data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < schema.total_size() {
            return Err(DecodeError::BufferTooShort {
                needed: schema.total_size(),
                got: data.len(),
            });
        }

        let mut values: BTreeMap<String, Value> = BTreeMap::new();

        for field in &schema.fields {
            let span = &data[field.offset..field.offset + field.size];

            let value = match &field.kind {
                FieldKind::Scalar(kind) => {
                    Value::from_bits(read_scalar(span, kind.size(), field.byte_order), *kind)
                }
                FieldKind::Array(element, count) => {
                    let size = element.size();
                    let mut items = Vec::with_capacity(*count);
                    for i in 0..*count {
                        let bits = read_scalar(&span[i * size..], size, field.byte_order);
                        items.push(Value::from_bits(bits, *element));
                    }
                    Value::Array(items)
                }
                FieldKind::Bits(bits) => {
                    let packed = read_scalar(span, bits.storage.size(), field.byte_order);
                    Value::Array(unpack_bits(packed, bits, field.byte_order))
                }
            };

            values.insert(field.name.clone(), value);
        }

        Ok(Record { schema, values })
    }
}
