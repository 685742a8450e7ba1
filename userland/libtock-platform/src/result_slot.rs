// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Single-slot channel filled by an upcall and drained by a waiting call.
//!
//! A `ResultSlot` goes through the following states:
//!
//! ```text
//!   Idle --arm()--> Requested --fulfill()--> Fulfilled --wait()--> Idle
//! ```
//!
//! `wait` is the blocking receive: it yields to the kernel until an upcall
//! has fulfilled the slot and then hands out that value exactly once. The
//! most recent value stays readable through [`ResultSlot::latest`] after it
//! has been consumed.

use core::cell::Cell;

use crate::Syscalls;

pub struct ResultSlot<T: Copy> {
    value: Cell<Option<T>>,
    ready: Cell<bool>,
}

impl<T: Copy> ResultSlot<T> {
    pub const fn new() -> ResultSlot<T> {
        ResultSlot {
            value: Cell::new(None),
            ready: Cell::new(false),
        }
    }

    /// Forget any fulfilment that has not been consumed yet. Must be called
    /// before issuing the request whose answer will be waited for.
    pub fn arm(&self) {
        self.ready.set(false);
    }

    /// Store a value and mark the slot ready.
    pub fn fulfill(&self, value: T) {
        self.value.set(Some(value));
        self.ready.set(true);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// The last value stored, consumed or not.
    pub fn latest(&self) -> Option<T> {
        self.value.get()
    }

    fn consume(&self) -> Option<T> {
        if self.ready.replace(false) {
            self.value.get()
        } else {
            None
        }
    }

    /// Yield until the slot has been fulfilled, then consume the value.
    ///
    /// Upcalls for other subscriptions may be delivered by the same yields;
    /// they do not wake this call.
    pub fn wait<'a, S: Syscalls<'a> + ?Sized>(&self, syscalls: &S) -> T {
        loop {
            if let Some(value) = self.consume() {
                return value;
            }
            syscalls.yield_wait();
        }
    }

    /// Like [`ResultSlot::wait`] but gives up after `max_yields` yields,
    /// returning `None`. The slot stays in the `Requested` state.
    pub fn wait_bounded<'a, S: Syscalls<'a> + ?Sized>(
        &self,
        syscalls: &S,
        max_yields: usize,
    ) -> Option<T> {
        for _ in 0..max_yields {
            if let Some(value) = self.consume() {
                return Some(value);
            }
            syscalls.yield_wait();
        }
        self.consume()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::ResultSlot;
    use crate::{Syscalls, Upcall};

    /// Fulfils `slot` with `value` on the `after`-th yield.
    struct DelayedFulfil<'s> {
        slot: &'s ResultSlot<u32>,
        value: u32,
        after: usize,
        yields: Cell<usize>,
    }

    impl<'a> Syscalls<'a> for DelayedFulfil<'_> {
        fn command(&self, _: usize, _: usize, _: usize) -> isize {
            0
        }

        fn subscribe(&self, _: usize, _: usize, _: &'a dyn Upcall) -> isize {
            0
        }

        fn yield_wait(&self) {
            let n = self.yields.get() + 1;
            self.yields.set(n);
            if n == self.after {
                self.slot.fulfill(self.value);
            }
        }
    }

    #[test]
    fn wait_returns_only_after_fulfil() {
        let slot = ResultSlot::new();
        slot.arm();
        let kernel = DelayedFulfil {
            slot: &slot,
            value: 512,
            after: 3,
            yields: Cell::new(0),
        };

        assert_eq!(slot.wait(&kernel), 512);
        assert_eq!(kernel.yields.get(), 3);
        assert!(!slot.is_ready());
        assert_eq!(slot.latest(), Some(512));
    }

    #[test]
    fn arm_discards_unconsumed_value() {
        let slot = ResultSlot::new();
        slot.fulfill(1);
        slot.arm();
        assert!(!slot.is_ready());

        let kernel = DelayedFulfil {
            slot: &slot,
            value: 2,
            after: 1,
            yields: Cell::new(0),
        };
        assert_eq!(slot.wait(&kernel), 2);
    }

    #[test]
    fn ready_value_needs_no_yield() {
        let slot = ResultSlot::new();
        slot.fulfill(9);
        let kernel = DelayedFulfil {
            slot: &slot,
            value: 0,
            after: usize::MAX,
            yields: Cell::new(0),
        };
        assert_eq!(slot.wait(&kernel), 9);
        assert_eq!(kernel.yields.get(), 0);
    }

    #[test]
    fn bounded_wait_gives_up() {
        let slot = ResultSlot::new();
        slot.arm();
        let kernel = DelayedFulfil {
            slot: &slot,
            value: 5,
            after: 10,
            yields: Cell::new(0),
        };

        assert_eq!(slot.wait_bounded(&kernel, 4), None);
        assert_eq!(kernel.yields.get(), 4);
        assert_eq!(slot.wait_bounded(&kernel, 10), Some(5));
    }
}
