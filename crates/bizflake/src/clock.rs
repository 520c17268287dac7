use jiff::Timestamp;

/// 2023-01-01T00:00:00Z, the zero point of the time field.
pub const DEFAULT_EPOCH: Timestamp = Timestamp::constant(1_672_531_200, 0);

pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
    /// Block and wait until the clock reaches the target time.
    fn wait_until(&self, target: Timestamp);
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn wait_until(&self, target: Timestamp) {
        // The generator only waits for the next millisecond boundary, which is
        // shorter than a scheduler sleep quantum, so yield between samples.
        while Timestamp::now() < target {
            std::hint::spin_loop();
            std::thread::yield_now();
        }
    }
}
