// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Mapping of driver clients to their syscall driver number.

use libtock_platform::Syscalls;

// syscall driver numbers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NUM {
    Adc = 7,
}

/// Command 0 of every driver succeeds if the driver is present.
pub const COMMAND_EXISTS: usize = 0;

/// Ask the kernel whether `driver_num` is installed on this board.
pub fn exists<'a, S: Syscalls<'a> + ?Sized>(syscalls: &S, driver_num: usize) -> bool {
    syscalls
        .command_result(driver_num, COMMAND_EXISTS, 0)
        .is_ok()
}
