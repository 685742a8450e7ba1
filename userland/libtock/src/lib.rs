// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Userland driver clients.
//!
//! Each module wraps one kernel driver behind blocking and streaming calls
//! built on [`libtock_platform`].

#![no_std]

#[cfg(test)]
extern crate std;

pub mod adc;
pub mod driver;

pub use libtock_platform::{ErrorCode, ReturnCode, Syscalls};
