// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Userspace client for the ADC driver.
//!
//! Turns the asynchronous ADC capsule interface into three usage modes:
//! a blocking single-sample read, a continuous stream delivered to a
//! [`SampleClient`], and a blocking query for the nearest sampling frequency
//! the hardware can achieve.
//!
//! Driver Interface
//! ----------------
//!
//! ### `subscribe` System Call
//!
//! Subscribe number `0` is the only slot. Its upcall carries
//! `(kind, channel, value)`, where `value` is a sample or, after a
//! compute-frequency command, the achievable frequency in Hz.
//!
//! ### `command` System Call
//!
//! * `0`: check whether the driver exists
//! * `1`: initialize the ADC
//! * `2`: sample the channel given in `arg` once
//! * `3`: sample continuously; `arg` packs channel and frequency, see
//!   [`pack_channel_frequency`]
//! * `4`: stop continuous sampling
//! * `5`: compute the achievable frequency nearest to `arg` Hz
//!
//! Shared subscription slot
//! ------------------------
//!
//! All modes receive their results through the same slot, so each blocking
//! call re-subscribes before issuing its command and the modes displace each
//! other:
//!
//! * [`Adc::read_single`] ends an active continuous stream.
//! * [`Adc::nearest_frequency`] also ends an active continuous stream. The
//!   stream's handler is cleared and any samples the hardware still produces
//!   are not delivered to it. Callers that need both must negotiate the
//!   frequency before starting the stream.
//! * A sample upcall that arrives after [`Adc::cancel_continuous`] is
//!   absorbed; the cancelled handler is never invoked.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! let adc = Adc::new(&syscalls);
//! adc.initialize()?;
//! let reading = adc.read_single(0)?;
//!
//! let hz = adc.nearest_frequency(1000)?;
//! adc.start_continuous(0, hz, &|sample| process(sample))?;
//! ```

use core::cell::Cell;

use log::{debug, trace, warn};

use libtock_platform::{config, ErrorCode, ResultSlot, Syscalls, Upcall};

use crate::driver;

/// Syscall driver number.
pub const DRIVER_NUM: usize = driver::NUM::Adc as usize;

/// Command numbers of the ADC driver.
pub mod command {
    pub const EXISTS: usize = crate::driver::COMMAND_EXISTS;
    pub const INITIALIZE: usize = 1;
    pub const SINGLE_SAMPLE: usize = 2;
    pub const CONTINUOUS_SAMPLE: usize = 3;
    pub const STOP_SAMPLING: usize = 4;
    pub const COMPUTE_FREQUENCY: usize = 5;
}

/// The subscription slot shared by every mode.
pub const SUBSCRIBE_SAMPLE: usize = 0;

/// Bits of the continuous-sample argument holding the channel.
pub const CHANNEL_BITS: u32 = 8;
/// Bits of the continuous-sample argument holding the frequency.
pub const FREQUENCY_BITS: u32 = u32::BITS - CHANNEL_BITS;
/// Highest frequency, in Hz, that survives packing.
pub const MAX_FREQUENCY: u32 = (1 << FREQUENCY_BITS) - 1;

const CHANNEL_MASK: u32 = (1 << CHANNEL_BITS) - 1;

/// Encode the argument of the continuous-sample command.
///
/// The command takes a single 32-bit argument: the channel occupies the low
/// [`CHANNEL_BITS`] and the frequency the remaining [`FREQUENCY_BITS`].
/// Frequency bits above that width are discarded, not rounded and not
/// reported as an error.
pub const fn pack_channel_frequency(channel: u8, frequency: u32) -> u32 {
    (frequency << CHANNEL_BITS) | channel as u32
}

/// Inverse of [`pack_channel_frequency`]: `(channel, frequency)`.
pub const fn unpack_channel_frequency(arg: u32) -> (u8, u32) {
    ((arg & CHANNEL_MASK) as u8, arg >> CHANNEL_BITS)
}

/// Receiver of continuously sampled values.
pub trait SampleClient {
    /// Called once per sample, from inside a yield, in the order the kernel
    /// delivered them.
    fn sample_ready(&self, sample: u32);
}

impl<F: Fn(u32)> SampleClient for F {
    fn sample_ready(&self, sample: u32) {
        self(sample)
    }
}

/// What an upcall on the shared slot resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Sample { channel: u8, value: u32 },
    Frequency(u32),
}

/// Which request the shared slot is currently subscribed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Sample,
    Frequency,
}

struct Negotiation {
    achieved: ResultSlot<u32>,
    completed: Cell<Option<(u32, u32)>>,
}

/// Upcall target registered on the shared slot.
///
/// Every upcall is tagged according to the current route and the tag picks
/// the result slot it fills. Sample results additionally fan out to the
/// continuous client, if one is installed.
struct Dispatch<'a> {
    route: Cell<Route>,
    pending: ResultSlot<u32>,
    negotiation: Negotiation,
    continuous: Cell<Option<&'a dyn SampleClient>>,
}

impl<'a> Dispatch<'a> {
    const fn new() -> Dispatch<'a> {
        Dispatch {
            route: Cell::new(Route::Sample),
            pending: ResultSlot::new(),
            negotiation: Negotiation {
                achieved: ResultSlot::new(),
                completed: Cell::new(None),
            },
            continuous: Cell::new(None),
        }
    }

    fn completion(&self, channel: usize, value: usize) -> Completion {
        match self.route.get() {
            Route::Sample => Completion::Sample {
                channel: channel as u8,
                value: value as u32,
            },
            Route::Frequency => Completion::Frequency(value as u32),
        }
    }

    fn deliver(&self, completion: Completion) {
        match completion {
            Completion::Sample { value, .. } => {
                self.pending.fulfill(value);
                if let Some(client) = self.continuous.get() {
                    client.sample_ready(value);
                }
            }
            Completion::Frequency(hz) => self.negotiation.achieved.fulfill(hz),
        }
    }
}

impl Upcall for Dispatch<'_> {
    fn upcall(&self, kind: usize, channel: usize, value: usize) {
        let completion = self.completion(channel, value);
        if config::CONFIG.trace_syscalls {
            trace!("adc upcall({}, {}, {}) -> {:?}", kind, channel, value, completion);
        }
        self.deliver(completion);
    }
}

/// ADC driver client.
///
/// Owns the pending sample, the frequency negotiation and the continuous
/// client for one ADC driver. Blocking calls take `&'a self` because the
/// client registers itself with the kernel as the upcall context.
pub struct Adc<'a, S: Syscalls<'a>> {
    syscalls: &'a S,
    dispatch: Dispatch<'a>,
}

impl<'a, S: Syscalls<'a>> Adc<'a, S> {
    pub fn new(syscalls: &'a S) -> Adc<'a, S> {
        Adc {
            syscalls,
            dispatch: Dispatch::new(),
        }
    }

    pub fn exists(&self) -> bool {
        driver::exists(self.syscalls, DRIVER_NUM)
    }

    pub fn initialize(&self) -> Result<(), ErrorCode> {
        self.command(command::INITIALIZE, 0)
    }

    /// Start one conversion on `channel` without waiting for it.
    pub fn sample(&self, channel: u8) -> Result<(), ErrorCode> {
        self.command(command::SINGLE_SAMPLE, channel as usize)
    }

    /// Start continuous conversions without touching the subscription.
    ///
    /// `frequency` is truncated to [`FREQUENCY_BITS`], see
    /// [`pack_channel_frequency`].
    pub fn sample_continuous(&self, channel: u8, frequency: u32) -> Result<(), ErrorCode> {
        let arg = pack_channel_frequency(channel, frequency);
        if frequency > MAX_FREQUENCY {
            debug!(
                "adc: frequency {} Hz exceeds {} bits, driver sees {} Hz",
                frequency,
                FREQUENCY_BITS,
                unpack_channel_frequency(arg).1
            );
        }
        self.command(command::CONTINUOUS_SAMPLE, arg as usize)
    }

    pub fn stop_sampling(&self) -> Result<(), ErrorCode> {
        self.command(command::STOP_SAMPLING, 0)
    }

    /// Ask the driver for the achievable frequency nearest to `frequency`.
    /// The answer arrives through the subscription.
    pub fn compute_frequency(&self, frequency: u32) -> Result<(), ErrorCode> {
        self.command(command::COMPUTE_FREQUENCY, frequency as usize)
    }

    /// Take one sample of `channel` and block until it arrives.
    ///
    /// Ends any continuous stream. The channel is not range checked here; an
    /// invalid channel is reported by the driver.
    pub fn read_single(&'a self, channel: u8) -> Result<u32, ErrorCode> {
        self.request_sample(channel)?;
        Ok(self.dispatch.pending.wait(self.syscalls))
    }

    /// [`Adc::read_single`] that returns `BUSY` if the sample has not arrived
    /// within `max_yields` yields.
    ///
    /// The conversion is not cancelled. If its sample arrives later it only
    /// updates [`Adc::latest_sample`]; the next blocking read discards it.
    pub fn read_single_bounded(&'a self, channel: u8, max_yields: usize) -> Result<u32, ErrorCode> {
        self.request_sample(channel)?;
        self.dispatch
            .pending
            .wait_bounded(self.syscalls, max_yields)
            .ok_or(ErrorCode::BUSY)
    }

    fn request_sample(&'a self, channel: u8) -> Result<(), ErrorCode> {
        debug!("adc: single sample on channel {}", channel);
        self.dispatch.pending.arm();
        self.submit(Route::Sample, || self.sample(channel))?;
        self.end_stream("single sample");
        Ok(())
    }

    /// Sample `channel` at `frequency` Hz and hand every sample to `client`.
    ///
    /// Replaces any client installed by an earlier call. `frequency` is
    /// truncated as described for [`pack_channel_frequency`]. If the
    /// subscription or the command fails, the earlier client stays installed.
    pub fn start_continuous(
        &'a self,
        channel: u8,
        frequency: u32,
        client: &'a dyn SampleClient,
    ) -> Result<(), ErrorCode> {
        debug!(
            "adc: continuous sampling on channel {} at {} Hz",
            channel, frequency
        );
        let previous = self.dispatch.continuous.replace(Some(client));
        let result = self.submit(Route::Sample, || {
            self.sample_continuous(channel, frequency)
        });
        if let Err(err) = result {
            self.dispatch.continuous.set(previous);
            return Err(err);
        }
        if previous.is_some() {
            debug!("adc: replaced the active continuous client");
        }
        Ok(())
    }

    /// Stop continuous sampling.
    ///
    /// The client is detached before the driver is told to stop and stays
    /// detached whatever the driver answers, so a sample that is already in
    /// flight is never delivered to it.
    pub fn cancel_continuous(&self) -> Result<(), ErrorCode> {
        debug!("adc: cancel continuous sampling");
        self.dispatch.continuous.set(None);
        self.stop_sampling()
    }

    /// Block until the driver reports the achievable sampling frequency
    /// nearest to `requested` Hz.
    ///
    /// Takes over the shared subscription: an active continuous stream loses
    /// its client and receives no further samples. If the driver rejects the
    /// request the stream is left as it was.
    pub fn nearest_frequency(&'a self, requested: u32) -> Result<u32, ErrorCode> {
        debug!("adc: nearest frequency to {} Hz", requested);
        let negotiation = &self.dispatch.negotiation;
        negotiation.achieved.arm();
        self.submit(Route::Frequency, || self.compute_frequency(requested))?;
        self.end_stream("frequency negotiation");
        let achieved = negotiation.achieved.wait(self.syscalls);
        negotiation.completed.set(Some((requested, achieved)));
        Ok(achieved)
    }

    pub fn is_streaming(&self) -> bool {
        self.dispatch.continuous.get().is_some()
    }

    /// Most recent sample delivered in any mode.
    pub fn latest_sample(&self) -> Option<u32> {
        self.dispatch.pending.latest()
    }

    /// `(requested, achieved)` of the last frequency negotiation that
    /// completed.
    pub fn last_negotiation(&self) -> Option<(u32, u32)> {
        self.dispatch.negotiation.completed.get()
    }

    fn end_stream(&self, reason: &str) {
        if self.dispatch.continuous.take().is_some() {
            warn!("adc: {} ends the active continuous stream", reason);
        }
    }

    /// Subscribe the shared slot for `route` and issue `request`.
    ///
    /// Upcalls only run inside a yield, so the route can change after the
    /// kernel has accepted the subscription. If `request` is rejected the
    /// previous route is restored.
    fn submit<F>(&'a self, route: Route, request: F) -> Result<(), ErrorCode>
    where
        F: FnOnce() -> Result<(), ErrorCode>,
    {
        let previous = self.dispatch.route.get();
        self.syscalls
            .subscribe_result(DRIVER_NUM, SUBSCRIBE_SAMPLE, &self.dispatch)?;
        self.dispatch.route.set(route);
        request().map_err(|err| {
            self.dispatch.route.set(previous);
            err
        })
    }

    fn command(&self, command_num: usize, arg: usize) -> Result<(), ErrorCode> {
        self.syscalls
            .command_result(DRIVER_NUM, command_num, arg)
            .map(|_| ())
    }
}
