use crate::error::Error;
use modular_bitfield::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A minted identifier. Opaque to callers; store it as a `BIGINT UNSIGNED`
/// or render it as decimal or hex.
///
/// Fields are listed from the least significant bit up; see
/// [`layout`](crate::layout) for the shifts and masks.
#[bitfield(bits = 64)]
#[repr(u64)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BizId {
    /// 16 bits for the per-millisecond sequence.
    pub sequence: B16,
    /// 44 bits for milliseconds since the generator's epoch.
    pub time_part: B44,
    /// 4 bits for the business type. Not validated when built from an
    /// arbitrary integer, so zero is possible here.
    pub business_type: B4,
}

impl BizId {
    pub fn from_raw(raw: u64) -> Self {
        Self::from(raw)
    }

    pub fn as_u64(self) -> u64 {
        u64::from(self)
    }
}

// Byte-wise comparison of the little-endian storage would not match the
// integer order, so compare through `u64`.
impl Ord for BizId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_u64().cmp(&other.as_u64())
    }
}

impl PartialOrd for BizId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BizId")
            .field("business_type", &self.business_type())
            .field("time_part", &self.time_part())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl fmt::Display for BizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_u64(), f)
    }
}

impl fmt::LowerHex for BizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.as_u64(), f)
    }
}

impl fmt::UpperHex for BizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.as_u64(), f)
    }
}

impl Serialize for BizId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_u64().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BizId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Self::from)
    }
}

impl FromStr for BizId {
    type Err = Error;

    /// Parses decimal, or hexadecimal with a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(Self::from)
            .map_err(|err| Error::InvalidId(format!("{s:?}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{self, MAX_BUSINESS_TYPE, MAX_SEQUENCE, MAX_TIME_PART};

    #[test]
    fn bitfield_matches_layout_constants() {
        let cases = [
            (1, 0, 0),
            (3, 1_000, 7),
            (MAX_BUSINESS_TYPE, MAX_TIME_PART, MAX_SEQUENCE),
            (0, MAX_TIME_PART, 0),
            (9, 0x0ABC_DEF0_1234, 0x8001),
        ];
        for (business_type, time_part, sequence) in cases {
            let id = BizId::new()
                .with_sequence(sequence)
                .with_time_part(time_part)
                .with_business_type(business_type);
            assert_eq!(id.as_u64(), layout::pack(business_type, time_part, sequence));
        }
    }

    #[test]
    fn business_type_sits_in_the_top_nibble() {
        let id = BizId::new().with_business_type(MAX_BUSINESS_TYPE);
        assert_eq!(id.as_u64(), 0xF000_0000_0000_0000);
        assert_eq!(u64::from(id) >> layout::BUSINESS_SHIFT, 0xF);
    }

    #[test]
    fn accessors_read_each_field() {
        let id = BizId::from_raw(layout::pack(3, 1_000, 7));
        assert_eq!(id.business_type(), 3);
        assert_eq!(id.time_part(), 1_000);
        assert_eq!(id.sequence(), 7);
    }

    #[test]
    fn orders_like_the_integer() {
        // differ only in the low byte vs. the high byte of the storage
        let low = BizId::from_raw(0x0000_0000_0000_00FF);
        let high = BizId::from_raw(0x0100_0000_0000_0000);
        assert!(low < high);
        assert!(BizId::from_raw(1) < BizId::from_raw(2));
    }

    #[test]
    fn renders_as_decimal_and_hex() {
        let id = BizId::from_raw(0x1000_0000_0001_0002);
        assert_eq!(id.to_string(), "1152921504606912514");
        assert_eq!(format!("{id:x}"), "1000000000010002");
        assert_eq!(format!("{id:#X}"), "0x1000000000010002");
    }

    #[test]
    fn parses_decimal_and_hex() {
        let id = BizId::from_raw(0x1000_0000_0001_0002);
        assert_eq!("1152921504606912514".parse::<BizId>().unwrap(), id);
        assert_eq!("0x1000000000010002".parse::<BizId>().unwrap(), id);
        assert_eq!(" 0X1000000000010002 ".parse::<BizId>().unwrap(), id);
        assert_eq!(
            u64::MAX.to_string().parse::<BizId>().unwrap().as_u64(),
            u64::MAX
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!("".parse::<BizId>(), Err(Error::InvalidId(_))));
        assert!(matches!("-1".parse::<BizId>(), Err(Error::InvalidId(_))));
        assert!(matches!("0xZZ".parse::<BizId>(), Err(Error::InvalidId(_))));
        assert!(matches!(
            "18446744073709551616".parse::<BizId>(),
            Err(Error::InvalidId(_))
        ));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = BizId::from_raw(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<BizId>("42").unwrap(), id);
    }
}
