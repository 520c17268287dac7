//! Bit layout of a [`BizId`](crate::BizId).
//!
//! ```text
//! | business (4) | time since epoch, ms (44) | sequence (16) |
//!   bit 63..60     bit 59..16                  bit 15..0
//! ```
//!
//! Business type sits in the highest bits so ids group by entity kind under a
//! plain integer sort; inside one business type they sort by creation time.

pub const BUSINESS_BITS: u32 = 4;
pub const TIME_BITS: u32 = 44;
pub const SEQUENCE_BITS: u32 = 16;

const _: () = assert!(BUSINESS_BITS + TIME_BITS + SEQUENCE_BITS == u64::BITS);

pub const SEQUENCE_SHIFT: u32 = 0;
pub const TIME_SHIFT: u32 = SEQUENCE_BITS;
pub const BUSINESS_SHIFT: u32 = SEQUENCE_BITS + TIME_BITS;

/// Right-aligned masks, applied after shifting a field down.
pub const SEQUENCE_MASK: u64 = (1_u64 << SEQUENCE_BITS) - 1;
pub const TIME_MASK: u64 = (1_u64 << TIME_BITS) - 1;
pub const BUSINESS_MASK: u64 = (1_u64 << BUSINESS_BITS) - 1;

pub const MAX_SEQUENCE: u16 = SEQUENCE_MASK as u16;
/// Largest representable number of milliseconds since the epoch (~557 years).
pub const MAX_TIME_PART: u64 = TIME_MASK;
pub const MAX_BUSINESS_TYPE: u8 = BUSINESS_MASK as u8;

/// Packs the three fields into a raw identifier. Each field is masked to its
/// width, so out-of-range input never bleeds into a neighbouring field.
pub const fn pack(business_type: u8, time_part: u64, sequence: u16) -> u64 {
    ((business_type as u64 & BUSINESS_MASK) << BUSINESS_SHIFT)
        | ((time_part & TIME_MASK) << TIME_SHIFT)
        | ((sequence as u64 & SEQUENCE_MASK) << SEQUENCE_SHIFT)
}

pub const fn business_bits() -> u32 {
    BUSINESS_BITS
}

pub const fn time_bits() -> u32 {
    TIME_BITS
}

pub const fn sequence_bits() -> u32 {
    SEQUENCE_BITS
}
