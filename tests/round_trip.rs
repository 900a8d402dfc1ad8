use std::sync::Arc;

use bytecraft::{
    field::{BitMember, ByteOrder, FieldSpec},
    kind::PrimitiveKind,
    layout::Packing,
    record::Record,
    schema::Schema,
    value::Value,
};
use proptest::prelude::*;

fn mixed_schema(order: ByteOrder, packing: Packing) -> Arc<Schema> {
    Arc::new(
        Schema::resolve(
            &[
                FieldSpec::scalar("magicnumber", PrimitiveKind::U32),
                FieldSpec::array("version", PrimitiveKind::U8, 4),
                FieldSpec::scalar("value", PrimitiveKind::U16),
                FieldSpec::scalar("delta", PrimitiveKind::S32),
                FieldSpec::scalar("fvalue", PrimitiveKind::F32),
                FieldSpec::scalar("dvalue", PrimitiveKind::F64),
                FieldSpec::bits(
                    "flags",
                    PrimitiveKind::U16,
                    vec![
                        BitMember::new("a", 3),
                        BitMember::new("b", 6),
                        BitMember::new("c", 5),
                    ],
                ),
            ],
            None,
            Some(order),
            packing,
        )
        .unwrap(),
    )
}

fn byte_orders() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![
        Just(ByteOrder::Native),
        Just(ByteOrder::Little),
        Just(ByteOrder::Big),
    ]
}

fn packings() -> impl Strategy<Value = Packing> {
    prop_oneof![Just(Packing::Natural), Just(Packing::Packed)]
}

fn finite_f32() -> impl Strategy<Value = f32> {
    prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO
}

fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn mixed_values() -> impl Strategy<Value = Vec<Value>> {
    (
        any::<u64>(),
        prop::array::uniform4(any::<i64>()),
        any::<i64>(),
        any::<i64>(),
        finite_f32(),
        finite_f64(),
        prop::array::uniform3(any::<u64>()),
    )
        .prop_map(|(magic, version, value, delta, fvalue, dvalue, flags)| {
            vec![
                Value::U64(magic),
                Value::Array(version.iter().map(|&v| Value::I64(v)).collect()),
                Value::I64(value),
                Value::I64(delta),
                Value::F32(fvalue),
                Value::F64(dvalue),
                Value::Array(flags.iter().map(|&v| Value::U64(v)).collect()),
            ]
        })
}

proptest! {
    /// decode(encode(r)) reproduces every field value, and re-encoding the
    /// decoded record reproduces the same bytes, for every byte order and
    /// packing mode.
    #[test]
    fn round_trip(order in byte_orders(), packing in packings(), values in mixed_values()) {
        let schema = mixed_schema(order, packing);
        let record = Record::new(Arc::clone(&schema), values, &[]).unwrap();

        let bytes = record.encode();
        prop_assert_eq!(bytes.len(), schema.total_size());

        let decoded = Record::decode(Arc::clone(&schema), &bytes).unwrap();
        prop_assert_eq!(&decoded, &record);
        prop_assert_eq!(decoded.encode(), bytes);
    }

    /// The byte order changes the wire bytes of multi-byte fields only; the
    /// decoded values are identical under the matching order.
    #[test]
    fn order_independent_values(packing in packings(), values in mixed_values()) {
        let little = mixed_schema(ByteOrder::Little, packing);
        let big = mixed_schema(ByteOrder::Big, packing);

        let little_record = Record::new(Arc::clone(&little), values.clone(), &[]).unwrap();
        let big_record = Record::new(Arc::clone(&big), values, &[]).unwrap();

        let little_back = Record::decode(little, &little_record.encode()).unwrap();
        let big_back = Record::decode(big, &big_record.encode()).unwrap();

        for field in ["magicnumber", "version", "value", "delta", "fvalue", "dvalue", "flags"] {
            prop_assert_eq!(little_back.get(field), big_back.get(field));
        }
    }

    /// Wraparound truncation: an 8-bit unsigned field stores `v mod 256`,
    /// regardless of byte order.
    #[test]
    fn truncation_is_mod_width(order in byte_orders(), v in any::<u64>()) {
        let schema = Arc::new(Schema::resolve(
            &[FieldSpec::scalar("b", PrimitiveKind::U8)],
            None,
            Some(order),
            Packing::Natural,
        ).unwrap());

        let record = Record::new(schema, vec![Value::U64(v)], &[]).unwrap();
        prop_assert_eq!(record.get("b"), Some(&Value::U64(v % 256)));
        prop_assert_eq!(record.encode(), vec![(v % 256) as u8]);
    }

    /// Any buffer shorter than the schema's total size fails to decode; a
    /// longer one succeeds using only the leading bytes.
    #[test]
    fn short_buffers_fail_long_buffers_decode(
        order in byte_orders(),
        packing in packings(),
        data in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let schema = mixed_schema(order, packing);

        if data.len() < schema.total_size() {
            prop_assert!(Record::decode(schema, &data).is_err());
        } else {
            let decoded = Record::decode(Arc::clone(&schema), &data).unwrap();
            prop_assert_eq!(
                decoded.encode().len(),
                schema.total_size()
            );
        }
    }
}
