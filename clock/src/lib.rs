pub mod clock {
    use embedded_hal::delay::DelayNs;
    use std::cell::Cell;
    use std::rc::Rc;

    const MILLIS_PER_SECOND: u32 = 1000;

    /// Blocking time source for the tracker.
    ///
    /// Wraps any `DelayNs` so the controller can sleep through long idle
    /// periods without handing the underlying delay one huge value.
    pub struct Clock<D> {
        delay: D,
    }

    impl<D> Clock<D>
    where
        D: DelayNs,
    {
        pub fn new(delay: D) -> Clock<D> {
            Clock { delay }
        }

        /// Method to block for a number of milliseconds
        pub fn delay_ms(&mut self, ms: u32) {
            self.delay.delay_ms(ms);
        }

        /// Sleeps one second at a time for `seconds` seconds
        pub fn sleep_secs(&mut self, seconds: u32) {
            log::debug!("Sleeping for {} s", seconds);
            for _ in 0..seconds {
                self.delay.delay_ms(MILLIS_PER_SECOND);
            }
        }

        pub fn into_inner(self) -> D {
            self.delay
        }
    }

    impl<D: DelayNs> DelayNs for Clock<D> {
        fn delay_ns(&mut self, ns: u32) {
            self.delay.delay_ns(ns);
        }

        fn delay_us(&mut self, us: u32) {
            self.delay.delay_us(us);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delay.delay_ms(ms);
        }
    }

    #[derive(Debug, Default)]
    struct Elapsed {
        nanos: Cell<u64>,
        calls: Cell<usize>,
        longest_ms: Cell<u32>,
    }

    /// A `DelayNs` that returns immediately and only counts virtual time.
    ///
    /// Clones share the same counter.
    #[derive(Debug, Clone, Default)]
    pub struct VirtualClock {
        elapsed: Rc<Elapsed>,
    }

    impl VirtualClock {
        pub fn new() -> VirtualClock {
            VirtualClock::default()
        }

        pub fn elapsed_ms(&self) -> u64 {
            self.elapsed.nanos.get() / 1_000_000
        }

        /// Number of delay calls made so far
        pub fn calls(&self) -> usize {
            self.elapsed.calls.get()
        }

        /// Longest single millisecond delay requested
        pub fn longest_ms(&self) -> u32 {
            self.elapsed.longest_ms.get()
        }

        fn advance(&self, nanos: u64) {
            let elapsed = &self.elapsed;
            elapsed.nanos.set(elapsed.nanos.get() + nanos);
            elapsed.calls.set(elapsed.calls.get() + 1);
        }
    }

    impl DelayNs for VirtualClock {
        fn delay_ns(&mut self, ns: u32) {
            self.advance(ns as u64);
        }

        fn delay_us(&mut self, us: u32) {
            self.advance(us as u64 * 1_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.advance(ms as u64 * 1_000_000);
            if ms > self.elapsed.longest_ms.get() {
                self.elapsed.longest_ms.set(ms);
            }
        }
    }

}

pub use clock::{Clock, VirtualClock};
