// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Compile-time configuration options for the userland libraries.
//!
//! Options live in a `const` object rather than behind `#[cfg]` attributes so
//! that every code path is type-checked whether or not it is enabled. The
//! compiler folds the constant, so a disabled option costs nothing in the
//! resulting binary.

/// Data structure holding compile-time configuration options.
///
/// To change the configuration, enable the matching cargo feature of this
/// crate from the application's manifest.
pub struct Config {
    /// Whether every system call and upcall is traced through the `log`
    /// facade at `trace` level.
    ///
    /// The trace includes the driver number, the command or subscribe number,
    /// the argument and the decoded status.
    pub trace_syscalls: bool,
}

/// The unique instance of `Config`. This is the only place in the userland
/// libraries where `cfg!(feature = ...)` is consulted.
pub const CONFIG: Config = Config {
    trace_syscalls: cfg!(feature = "trace_syscalls"),
};
