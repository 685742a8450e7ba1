// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Status values returned by `command` and `subscribe`.
//!
//! The kernel reports the outcome of a system call as a single signed integer:
//! zero for success, a positive number for success carrying a value, and a
//! small negative number identifying the error.

use crate::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnCode {
    SuccessWithValue { value: usize }, // Success value must be positive
    SUCCESS,
    FAIL,         // Generic failure condition
    EBUSY,        // Underlying system is busy; retry
    EALREADY,     // The state requested is already set
    EOFF,         // The component is powered down
    ERESERVE,     // Reservation required before use
    EINVAL,       // An invalid parameter was passed
    ESIZE,        // Parameter passed was too large
    ECANCEL,      // Operation canceled by a call
    ENOMEM,       // Memory required not available
    ENOSUPPORT,   // Operation or command is unsupported
    ENODEVICE,    // Device does not exist
    EUNINSTALLED, // Device is not physically installed
    ENOACK,       // Packet transmission not acknowledged
}

impl ReturnCode {
    /// Split the status into the success value (zero for plain `SUCCESS`)
    /// or the error it carries.
    pub fn into_result(self) -> Result<usize, ErrorCode> {
        match self {
            ReturnCode::SuccessWithValue { value } => Ok(value),
            ReturnCode::SUCCESS => Ok(0),
            // Every remaining variant is a failure.
            rc => Err(ErrorCode::try_from(rc).unwrap_or(ErrorCode::FAIL)),
        }
    }

    pub fn is_success(self) -> bool {
        matches!(
            self,
            ReturnCode::SUCCESS | ReturnCode::SuccessWithValue { .. }
        )
    }
}

impl From<isize> for ReturnCode {
    /// Decode a raw status. Negative values outside the known range are
    /// reported as `FAIL`.
    fn from(status: isize) -> ReturnCode {
        match status {
            0 => ReturnCode::SUCCESS,
            -1 => ReturnCode::FAIL,
            -2 => ReturnCode::EBUSY,
            -3 => ReturnCode::EALREADY,
            -4 => ReturnCode::EOFF,
            -5 => ReturnCode::ERESERVE,
            -6 => ReturnCode::EINVAL,
            -7 => ReturnCode::ESIZE,
            -8 => ReturnCode::ECANCEL,
            -9 => ReturnCode::ENOMEM,
            -10 => ReturnCode::ENOSUPPORT,
            -11 => ReturnCode::ENODEVICE,
            -12 => ReturnCode::EUNINSTALLED,
            -13 => ReturnCode::ENOACK,
            value if value > 0 => ReturnCode::SuccessWithValue {
                value: value as usize,
            },
            _ => ReturnCode::FAIL,
        }
    }
}

impl From<ReturnCode> for isize {
    fn from(original: ReturnCode) -> isize {
        match original {
            ReturnCode::SuccessWithValue { value } => value as isize,
            ReturnCode::SUCCESS => 0,
            ReturnCode::FAIL => -1,
            ReturnCode::EBUSY => -2,
            ReturnCode::EALREADY => -3,
            ReturnCode::EOFF => -4,
            ReturnCode::ERESERVE => -5,
            ReturnCode::EINVAL => -6,
            ReturnCode::ESIZE => -7,
            ReturnCode::ECANCEL => -8,
            ReturnCode::ENOMEM => -9,
            ReturnCode::ENOSUPPORT => -10,
            ReturnCode::ENODEVICE => -11,
            ReturnCode::EUNINSTALLED => -12,
            ReturnCode::ENOACK => -13,
        }
    }
}

impl From<ErrorCode> for ReturnCode {
    fn from(err: ErrorCode) -> ReturnCode {
        match err {
            ErrorCode::FAIL => ReturnCode::FAIL,
            ErrorCode::BUSY => ReturnCode::EBUSY,
            ErrorCode::ALREADY => ReturnCode::EALREADY,
            ErrorCode::OFF => ReturnCode::EOFF,
            ErrorCode::RESERVE => ReturnCode::ERESERVE,
            ErrorCode::INVAL => ReturnCode::EINVAL,
            ErrorCode::SIZE => ReturnCode::ESIZE,
            ErrorCode::CANCEL => ReturnCode::ECANCEL,
            ErrorCode::NOMEM => ReturnCode::ENOMEM,
            ErrorCode::NOSUPPORT => ReturnCode::ENOSUPPORT,
            ErrorCode::NODEVICE => ReturnCode::ENODEVICE,
            ErrorCode::UNINSTALLED => ReturnCode::EUNINSTALLED,
            ErrorCode::NOACK => ReturnCode::ENOACK,
        }
    }
}
