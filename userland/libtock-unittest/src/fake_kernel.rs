// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! In-process stand-in for the kernel side of the system call interface.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use libtock_platform::{ErrorCode, ReturnCode, Syscalls, Upcall, UpcallId};

use crate::SyscallLog;

/// Number of consecutive yields with nothing to deliver after which the
/// fake assumes the caller would block forever and panics.
pub const IDLE_YIELD_LIMIT: usize = 1000;

/// A scripted kernel.
///
/// Drivers must be registered with [`FakeKernel::add_driver`]; system calls
/// to any other driver number fail with `ENODEVICE`. Commands and
/// subscriptions succeed unless a different return value has been set for
/// them. Upcalls are queued with [`FakeKernel::schedule_upcall`] and each
/// `yield_wait` delivers the oldest one to whatever upcall is subscribed to
/// its slot at that moment. An upcall whose slot has no subscriber is
/// dropped, as the kernel does with a null upcall.
pub struct FakeKernel<'a> {
    drivers: RefCell<Vec<usize>>,
    subscriptions: RefCell<Vec<(UpcallId, &'a dyn Upcall)>>,
    pending: RefCell<VecDeque<(UpcallId, [usize; 3])>>,
    command_returns: RefCell<Vec<((usize, usize), ReturnCode)>>,
    subscribe_returns: RefCell<Vec<(UpcallId, ReturnCode)>>,
    log: RefCell<Vec<SyscallLog>>,
    idle_yields: Cell<usize>,
    dropped: Cell<usize>,
}

impl<'a> FakeKernel<'a> {
    pub fn new() -> FakeKernel<'a> {
        FakeKernel {
            drivers: RefCell::new(Vec::new()),
            subscriptions: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            command_returns: RefCell::new(Vec::new()),
            subscribe_returns: RefCell::new(Vec::new()),
            log: RefCell::new(Vec::new()),
            idle_yields: Cell::new(0),
            dropped: Cell::new(0),
        }
    }

    pub fn add_driver(&self, driver_num: usize) {
        let mut drivers = self.drivers.borrow_mut();
        if !drivers.contains(&driver_num) {
            drivers.push(driver_num);
        }
    }

    /// Make every later `command(driver_num, command_num, _)` return `rc`.
    pub fn set_command_return(&self, driver_num: usize, command_num: usize, rc: ReturnCode) {
        let mut returns = self.command_returns.borrow_mut();
        returns.retain(|(key, _)| *key != (driver_num, command_num));
        returns.push(((driver_num, command_num), rc));
    }

    /// Make every later `subscribe` to `id` return `rc`. A failing subscribe
    /// leaves the existing subscription in place.
    pub fn set_subscribe_return(&self, id: UpcallId, rc: ReturnCode) {
        let mut returns = self.subscribe_returns.borrow_mut();
        returns.retain(|(key, _)| *key != id);
        returns.push((id, rc));
    }

    /// Queue an upcall for delivery on a later yield.
    pub fn schedule_upcall(&self, id: UpcallId, args: [usize; 3]) {
        self.pending.borrow_mut().push_back((id, args));
    }

    pub fn pending_upcalls(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Upcalls that were due but found no subscriber.
    pub fn dropped_upcalls(&self) -> usize {
        self.dropped.get()
    }

    pub fn is_subscribed(&self, id: UpcallId) -> bool {
        self.subscriber(id).is_some()
    }

    /// Return the system calls made so far and clear the record.
    pub fn take_syscall_log(&self) -> Vec<SyscallLog> {
        self.log.replace(Vec::new())
    }

    fn subscriber(&self, id: UpcallId) -> Option<&'a dyn Upcall> {
        self.subscriptions
            .borrow()
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, upcall)| *upcall)
    }

    fn driver_present(&self, driver_num: usize) -> bool {
        self.drivers.borrow().contains(&driver_num)
    }
}

impl<'a> Syscalls<'a> for FakeKernel<'a> {
    fn command(&self, driver_num: usize, command_num: usize, arg: usize) -> isize {
        self.log.borrow_mut().push(SyscallLog::Command {
            driver_num,
            command_num,
            arg,
        });
        if !self.driver_present(driver_num) {
            return ErrorCode::NODEVICE.into();
        }
        self.command_returns
            .borrow()
            .iter()
            .find(|(key, _)| *key == (driver_num, command_num))
            .map_or(0, |(_, rc)| isize::from(*rc))
    }

    fn subscribe(&self, driver_num: usize, subscribe_num: usize, upcall: &'a dyn Upcall) -> isize {
        self.log.borrow_mut().push(SyscallLog::Subscribe {
            driver_num,
            subscribe_num,
        });
        if !self.driver_present(driver_num) {
            return ErrorCode::NODEVICE.into();
        }
        let id = UpcallId::new(driver_num, subscribe_num);
        let rc = self
            .subscribe_returns
            .borrow()
            .iter()
            .find(|(key, _)| *key == id)
            .map_or(ReturnCode::SUCCESS, |(_, rc)| *rc);
        if rc.is_success() {
            let mut subscriptions = self.subscriptions.borrow_mut();
            subscriptions.retain(|(slot, _)| *slot != id);
            subscriptions.push((id, upcall));
        }
        rc.into()
    }

    fn yield_wait(&self) {
        self.log.borrow_mut().push(SyscallLog::Yield);
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some((id, [arg0, arg1, arg2])) => {
                self.idle_yields.set(0);
                // Borrows are released before the upcall runs so that it may
                // issue system calls of its own.
                match self.subscriber(id) {
                    Some(upcall) => upcall.upcall(arg0, arg1, arg2),
                    None => self.dropped.set(self.dropped.get() + 1),
                }
            }
            None => {
                let idle = self.idle_yields.get() + 1;
                self.idle_yields.set(idle);
                if idle >= IDLE_YIELD_LIMIT {
                    panic!("yield_wait: no upcall pending after {idle} yields, caller would block forever");
                }
            }
        }
    }
}
