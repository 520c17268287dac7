use crate::{
    clock::{Clock, SystemClock, DEFAULT_EPOCH},
    decode::Decoder,
    error::{Error, Result},
    layout::{MAX_BUSINESS_TYPE, MAX_TIME_PART},
    BizId,
};
use jiff::{SignedDuration, Timestamp};
use std::sync::Mutex;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Configures a Bizflake generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct BizflakeSettings {
    /// Zero point of the 44-bit millisecond time field.
    ///
    /// Ids minted against a custom epoch must be decoded with
    /// [`Bizflake::decoder`] (or a [`Decoder`] built from the same epoch).
    #[builder(default = DEFAULT_EPOCH)]
    pub epoch: Timestamp,
}

impl Default for BizflakeSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Default)]
struct GeneratorState {
    /// Unix milliseconds of the last clock sample used for an id.
    last_timestamp_ms: Option<i64>,
    sequence: u16,
}

/// Snowflake-style generator of [`BizId`]s.
///
/// Each instance owns its own state; share one instance (by reference or
/// `Arc`) between threads that must not collide.
pub struct Bizflake<C: Clock> {
    epoch: Timestamp,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl Bizflake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: BizflakeSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl Default for Bizflake<SystemClock> {
    fn default() -> Self {
        Self::new(BizflakeSettings::default())
    }
}

impl<C: Clock> Bizflake<C> {
    /// Creates a generator that samples time from `clock`.
    pub fn with_clock(settings: BizflakeSettings, clock: C) -> Self {
        Self {
            epoch: settings.epoch,
            clock,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    pub fn epoch(&self) -> Timestamp {
        self.epoch
    }

    /// A decoder matching this generator's epoch.
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.epoch)
    }

    /// Mints the next id for `business_type`.
    ///
    /// Within one millisecond the sequence counts up from 0. When all
    /// 65,536 values of a millisecond are taken the call blocks until the
    /// clock reaches the next millisecond. A clock that steps backwards
    /// restarts the sequence at 0 without waiting.
    pub fn generate(&self, business_type: impl Into<u8>) -> Result<BizId> {
        let business_type = business_type.into();
        if business_type == 0 || business_type > MAX_BUSINESS_TYPE {
            return Err(Error::InvalidBusinessType {
                value: business_type,
                max: MAX_BUSINESS_TYPE,
            });
        }

        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        let now = self.clock.now();
        let now_ms = now.as_millisecond();
        let time_part = self.time_part(now)?;

        // State is written back only once the sample it belongs to is valid.
        let (now_ms, time_part, sequence) = match state.last_timestamp_ms {
            Some(last) if now_ms == last => match state.sequence.wrapping_add(1) {
                0 => {
                    debug!(
                        last_timestamp_ms = last,
                        "sequence exhausted, waiting for next millisecond"
                    );
                    let now = self.wait_past(last)?;
                    (now.as_millisecond(), self.time_part(now)?, 0)
                }
                next => (now_ms, time_part, next),
            },
            Some(last) => {
                if now_ms < last {
                    warn!(
                        last_timestamp_ms = last,
                        now_ms,
                        "clock moved backwards, restarting sequence"
                    );
                }
                (now_ms, time_part, 0)
            }
            None => (now_ms, time_part, 0),
        };

        state.last_timestamp_ms = Some(now_ms);
        state.sequence = sequence;

        Ok(BizId::new()
            .with_sequence(sequence)
            .with_time_part(time_part)
            .with_business_type(business_type))
    }

    /// Milliseconds elapsed since the epoch, validated against the time field.
    fn time_part(&self, now: Timestamp) -> Result<u64> {
        let elapsed_ms = now.as_millisecond() - self.epoch.as_millisecond();
        if elapsed_ms < 0 {
            return Err(Error::ClockBeforeEpoch {
                epoch: self.epoch,
                now,
            });
        }
        if elapsed_ms as u64 > MAX_TIME_PART {
            return Err(Error::TimeOverflow {
                elapsed_ms,
                max_ms: MAX_TIME_PART,
            });
        }
        Ok(elapsed_ms as u64)
    }

    /// Blocks until the clock reads a millisecond strictly after `last_ms`.
    fn wait_past(&self, last_ms: i64) -> Result<Timestamp> {
        let target = Timestamp::from_millisecond(last_ms)
            .and_then(|last| last.checked_add(SignedDuration::from_millis(1)))
            .map_err(|_| Error::TimeOverflow {
                elapsed_ms: last_ms - self.epoch.as_millisecond(),
                max_ms: MAX_TIME_PART,
            })?;
        loop {
            let now = self.clock.now();
            if now.as_millisecond() > last_ms {
                return Ok(now);
            }
            self.clock.wait_until(target);
        }
    }
}
