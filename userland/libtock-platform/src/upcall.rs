// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Receiving side of a subscription.

/// Type to uniquely identify a subscription slot across all drivers.
///
/// This contains the driver number and the subscribe number within the driver.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct UpcallId {
    pub driver_num: usize,
    pub subscribe_num: usize,
}

impl UpcallId {
    pub const fn new(driver_num: usize, subscribe_num: usize) -> UpcallId {
        UpcallId {
            driver_num,
            subscribe_num,
        }
    }
}

/// Object the kernel calls back into when a subscribed event fires.
///
/// This replaces the `(function pointer, appdata)` pair of the raw
/// `subscribe` system call: the implementing object is the context, so it
/// carries whatever state the handler writes into.
///
/// Upcalls are only ever delivered from inside `yield`, on the single
/// application thread, and each one runs to completion before the next is
/// delivered.
pub trait Upcall {
    /// The three arguments are driver specific. Most drivers pass a kind or
    /// status in `arg0` and their payload in `arg1` and `arg2`.
    fn upcall(&self, arg0: usize, arg1: usize, arg2: usize);
}
