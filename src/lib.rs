//! # bytecraft
//!
//! Byte-exact encoding and decoding of fixed-layout binary records described
//! by declarative schemas.
//!
//! Declare named fixed-width fields (scalars, fixed-size arrays, bit-field
//! groups), pick a byte order and a packing mode, and resolve them into an
//! immutable [`schema::Schema`] carrying every field's offset and the total
//! record size. Records constructed or decoded against the schema encode to
//! exactly that layout; undersized integer assignments truncate with
//! wraparound. Schemas compose linearly: a derived schema appends its fields
//! after all inherited ones.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use bytecraft::field::{ByteOrder, FieldSpec};
//! use bytecraft::kind::PrimitiveKind;
//! use bytecraft::layout::Packing;
//! use bytecraft::record::Record;
//! use bytecraft::schema::Schema;
//! use bytecraft::value::Value;
//!
//! let schema = Arc::new(Schema::resolve(
//!     &[
//!         FieldSpec::scalar("id", PrimitiveKind::U16),
//!         FieldSpec::scalar("level", PrimitiveKind::U8),
//!     ],
//!     None,
//!     Some(ByteOrder::Little),
//!     Packing::Packed,
//! ).unwrap());
//!
//! let record = Record::new(
//!     Arc::clone(&schema),
//!     vec![Value::U64(0xFFFE), Value::U64(4000)],
//!     &[],
//! ).unwrap();
//!
//! // 4000 truncates to 160 (0xA0) in the 8-bit field.
//! assert_eq!(record.encode(), [0xFE, 0xFF, 0xA0]);
//! assert_eq!(Record::decode(schema, &[0xFE, 0xFF, 0xA0]).unwrap(), record);
//! ```

pub mod bytes;
pub mod errors;
pub mod field;
pub mod kind;
pub mod layout;
pub mod record;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;
