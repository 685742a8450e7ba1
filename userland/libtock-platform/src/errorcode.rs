// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Standard error enum for failed system calls

use core::fmt;

use crate::ReturnCode;

/// Standard errors in Tock.
///
/// In contrast to [`ReturnCode`](crate::ReturnCode) this does not
/// feature any success cases, so driver clients can return
/// `Result<T, ErrorCode>` and use `?` on every system call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 1,
    /// Underlying system is busy; retry
    BUSY = 2,
    /// The state requested is already set
    ALREADY = 3,
    /// The component is powered down
    OFF = 4,
    /// Reservation required before use
    RESERVE = 5,
    /// An invalid parameter was passed
    INVAL = 6,
    /// Parameter passed was too large
    SIZE = 7,
    /// Operation canceled by a call
    CANCEL = 8,
    /// Memory required not available
    NOMEM = 9,
    /// Operation or command is unsupported
    NOSUPPORT = 10,
    /// Device does not exist
    NODEVICE = 11,
    /// Device is not physically installed
    UNINSTALLED = 12,
    /// Packet transmission not acknowledged
    NOACK = 13,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

/// The negative status a C caller would have seen for this error.
impl From<ErrorCode> for isize {
    fn from(err: ErrorCode) -> isize {
        -(err as isize)
    }
}

impl TryFrom<ReturnCode> for ErrorCode {
    type Error = ();

    fn try_from(rc: ReturnCode) -> Result<Self, Self::Error> {
        match rc {
            ReturnCode::SuccessWithValue { .. } => Err(()),
            ReturnCode::SUCCESS => Err(()),
            ReturnCode::FAIL => Ok(ErrorCode::FAIL),
            ReturnCode::EBUSY => Ok(ErrorCode::BUSY),
            ReturnCode::EALREADY => Ok(ErrorCode::ALREADY),
            ReturnCode::EOFF => Ok(ErrorCode::OFF),
            ReturnCode::ERESERVE => Ok(ErrorCode::RESERVE),
            ReturnCode::EINVAL => Ok(ErrorCode::INVAL),
            ReturnCode::ESIZE => Ok(ErrorCode::SIZE),
            ReturnCode::ECANCEL => Ok(ErrorCode::CANCEL),
            ReturnCode::ENOMEM => Ok(ErrorCode::NOMEM),
            ReturnCode::ENOSUPPORT => Ok(ErrorCode::NOSUPPORT),
            ReturnCode::ENODEVICE => Ok(ErrorCode::NODEVICE),
            ReturnCode::EUNINSTALLED => Ok(ErrorCode::UNINSTALLED),
            ReturnCode::ENOACK => Ok(ErrorCode::NOACK),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ErrorCode::FAIL => "generic failure",
            ErrorCode::BUSY => "busy",
            ErrorCode::ALREADY => "already in requested state",
            ErrorCode::OFF => "powered down",
            ErrorCode::RESERVE => "reservation required",
            ErrorCode::INVAL => "invalid parameter",
            ErrorCode::SIZE => "parameter too large",
            ErrorCode::CANCEL => "canceled",
            ErrorCode::NOMEM => "out of memory",
            ErrorCode::NOSUPPORT => "unsupported",
            ErrorCode::NODEVICE => "no such device",
            ErrorCode::UNINSTALLED => "device not installed",
            ErrorCode::NOACK => "not acknowledged",
        };
        f.write_str(reason)
    }
}
