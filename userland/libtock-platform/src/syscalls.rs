// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! System call interface as seen from a process.
//!
//! Driver clients use three of the Tock system calls:
//!
//!   * `subscribe` registers an [`Upcall`] that the driver invokes later,
//!   when an event has occurred or data of interest is available. Each
//!   `(driver, subscribe_num)` pair holds at most one upcall; subscribing
//!   again replaces the previous one.
//!
//!   * `command` tells the driver to do something immediately and returns a
//!   status right away. Results that take time arrive through the upcall.
//!
//!   * `yield` suspends the process until the kernel has delivered one
//!   upcall. It is the only point at which upcalls run.
//!
//! The runtime (or a test double) implements [`Syscalls`]; the encoding of
//! the calls into registers is not visible here.

use log::trace;

use crate::config;
use crate::{ErrorCode, ReturnCode, Upcall};

/// The raw system calls needed by driver clients.
///
/// `'a` bounds the upcall objects the kernel may hold on to. A driver client
/// borrowed for `'a` can register itself as the upcall context.
pub trait Syscalls<'a> {
    /// Issue a command and return its raw status.
    fn command(&self, driver_num: usize, command_num: usize, arg: usize) -> isize;

    /// Install `upcall` in the given subscription slot and return the raw
    /// status.
    fn subscribe(&self, driver_num: usize, subscribe_num: usize, upcall: &'a dyn Upcall) -> isize;

    /// Block until the kernel has delivered an upcall.
    fn yield_wait(&self);

    /// `command`, with the status decoded. A success value, if any, is
    /// returned in `Ok`.
    fn command_result(
        &self,
        driver_num: usize,
        command_num: usize,
        arg: usize,
    ) -> Result<usize, ErrorCode> {
        let rc = ReturnCode::from(self.command(driver_num, command_num, arg));
        if config::CONFIG.trace_syscalls {
            trace!(
                "command[{:#x}:{}]({:#x}) = {:?}",
                driver_num,
                command_num,
                arg,
                rc
            );
        }
        rc.into_result()
    }

    /// `subscribe`, with the status decoded.
    fn subscribe_result(
        &self,
        driver_num: usize,
        subscribe_num: usize,
        upcall: &'a dyn Upcall,
    ) -> Result<(), ErrorCode> {
        let rc = ReturnCode::from(self.subscribe(driver_num, subscribe_num, upcall));
        if config::CONFIG.trace_syscalls {
            trace!("subscribe[{:#x}:{}] = {:?}", driver_num, subscribe_num, rc);
        }
        rc.into_result().map(|_| ())
    }
}
