// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Platform layer shared by the userland driver clients.
//!
//! This crate holds what every driver client needs regardless of the
//! peripheral: the [`Syscalls`] interface to the kernel, the [`Upcall`]
//! trait through which the kernel calls back, the status types and the
//! [`ResultSlot`] used to turn an upcall into the return value of a
//! blocking call.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod syscalls;

mod errorcode;
mod result_slot;
mod returncode;
mod upcall;

pub use errorcode::ErrorCode;
pub use result_slot::ResultSlot;
pub use returncode::ReturnCode;
pub use syscalls::Syscalls;
pub use upcall::{Upcall, UpcallId};
