// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

/// One system call as seen by the [`FakeKernel`](crate::FakeKernel).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallLog {
    Command {
        driver_num: usize,
        command_num: usize,
        arg: usize,
    },
    Subscribe {
        driver_num: usize,
        subscribe_num: usize,
    },
    Yield,
}
