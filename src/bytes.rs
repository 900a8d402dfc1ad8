//! Low-level fixed-width scalar I/O on byte slices.
//!
//! Values travel through here as raw `u64` bit patterns; signedness and float
//! reinterpretation happen in [`crate::value`]. A scalar's bytes are reversed
//! when the wire order differs from host order and are otherwise copied as-is.

use crate::field::ByteOrder;

/// Truncates `value` to its low `bits`, i.e. two's-complement wraparound.
pub fn mask_to_width(value: u64, bits: usize) -> u64 {
    if bits >= 64 {
        value
    } else {
        value & ((1u64 << bits) - 1)
    }
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Writes the low `size` bytes of `bits` into `buf[..size]` in `order`.
pub fn write_scalar(buf: &mut [u8], bits: u64, size: usize, order: ByteOrder) {
    match order.concrete() {
        ByteOrder::Little => buf[..size].copy_from_slice(&bits.to_le_bytes()[..size]),
        ByteOrder::Big => buf[..size].copy_from_slice(&bits.to_be_bytes()[8 - size..]),
        ByteOrder::Native => unreachable!("concrete() never yields Native"),
    }
}

/// Reads a `size`-byte scalar from `buf[..size]` in `order` as raw bits.
pub fn read_scalar(buf: &[u8], size: usize, order: ByteOrder) -> u64 {
    let mut raw = [0u8; 8];
    match order.concrete() {
        ByteOrder::Little => {
            raw[..size].copy_from_slice(&buf[..size]);
            u64::from_le_bytes(raw)
        }
        ByteOrder::Big => {
            raw[8 - size..].copy_from_slice(&buf[..size]);
            u64::from_be_bytes(raw)
        }
        ByteOrder::Native => unreachable!("concrete() never yields Native"),
    }
}
