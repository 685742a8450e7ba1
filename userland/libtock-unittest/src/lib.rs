// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Test support for userland driver clients.
//!
//! [`FakeKernel`] implements [`libtock_platform::Syscalls`] on the host, so
//! driver clients can be exercised without a board: tests register drivers,
//! script the upcalls the kernel would deliver, and inspect the system calls
//! the client made.

mod fake_kernel;
mod syscall_log;

pub use fake_kernel::{FakeKernel, IDLE_YIELD_LIMIT};
pub use syscall_log::SyscallLog;
