//! Reverses the bit layout. Every `u64` decodes; whether the result is a
//! plausible record key is up to the caller.

use crate::clock::DEFAULT_EPOCH;
use crate::id::BizId;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp, Zoned};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Creation instant, in UTC.
    pub timestamp: Timestamp,
    pub business_type: u8,
    pub sequence: u16,
}

/// [`Decoded`] with the instant expressed in a particular time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDecoded {
    pub zoned: Zoned,
    pub business_type: u8,
    pub sequence: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    epoch: Timestamp,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_EPOCH)
    }
}

impl Decoder {
    pub const fn new(epoch: Timestamp) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    pub fn decode(&self, id: impl Into<BizId>) -> Decoded {
        let id = id.into();
        let elapsed = SignedDuration::from_millis(id.time_part() as i64);
        Decoded {
            // Saturates only for epochs within ~557 years of jiff's upper bound.
            timestamp: self.epoch.checked_add(elapsed).unwrap_or(Timestamp::MAX),
            business_type: id.business_type(),
            sequence: id.sequence(),
        }
    }

    pub fn decode_local(&self, id: impl Into<BizId>, tz: &TimeZone) -> LocalDecoded {
        let decoded = self.decode(id);
        LocalDecoded {
            zoned: decoded.timestamp.to_zoned(tz.clone()),
            business_type: decoded.business_type,
            sequence: decoded.sequence,
        }
    }
}

/// Decodes an id minted against [`DEFAULT_EPOCH`].
pub fn decode(id: impl Into<BizId>) -> Decoded {
    Decoder::default().decode(id)
}

/// Like [`decode`], with the instant shown in `tz`.
pub fn decode_local(id: impl Into<BizId>, tz: &TimeZone) -> LocalDecoded {
    Decoder::default().decode_local(id, tz)
}

/// Like [`decode`], with the instant shown in the host's configured zone.
pub fn decode_system_local(id: impl Into<BizId>) -> LocalDecoded {
    decode_local(id, &TimeZone::system())
}
