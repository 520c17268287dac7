//! Time-ordered 64-bit identifiers for domain records.
//!
//! An id packs a 4-bit business type, a 44-bit millisecond offset from a
//! fixed epoch, and a 16-bit per-millisecond sequence. See [`layout`].

mod bizflake;
pub mod business;
mod clock;
pub mod decode;
pub mod error;
mod id;
pub mod layout;

pub use bizflake::{Bizflake, BizflakeSettings};
pub use business::BusinessType;
pub use clock::{Clock, SystemClock, DEFAULT_EPOCH};
pub use decode::{decode, decode_local, decode_system_local, Decoded, Decoder, LocalDecoded};
pub use error::Error;
pub use id::BizId;
