//! Mock implementations for testing
//!
//! Recording doubles for [`PlatformClock`] and [`CodecDai`]. Both write into
//! one shared [`CallLog`] so tests can assert ordering *across* the clock and
//! the codec, and either can be told to fail a chosen operation.

#![cfg(any(test, feature = "std"))]

use core::cell::RefCell;

use crate::clock::PlatformClock;
use crate::clock_config::{ClockDirection, PllConfig, SysclkSource};
use crate::config::PRIMARY_CODEC_DAI;
use crate::dai::{CodecDai, DaiFormat, TdmSlots};

/// Maximum number of calls a [`CallLog`] keeps.
pub const CALL_LOG_CAPACITY: usize = 64;

/// One hardware call observed by a mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    /// [`PlatformClock::enable`]
    ClockEnable,
    /// [`PlatformClock::disable`]
    ClockDisable,
    /// [`CodecDai::configure_synthesizer`]
    Synthesizer(PllConfig),
    /// [`CodecDai::select_clock_source`]
    ClockSource {
        /// Requested SYSCLK source.
        source: SysclkSource,
        /// Declared frequency.
        freq_hz: u32,
        /// Declared direction.
        direction: ClockDirection,
    },
    /// [`CodecDai::configure_tdm`]
    Tdm(TdmSlots),
    /// [`CodecDai::set_interface_format`]
    Format(DaiFormat),
}

impl HwCall {
    /// Operation kind of this call, used for failure injection.
    pub fn op(&self) -> HwOp {
        match self {
            Self::ClockEnable => HwOp::ClockEnable,
            Self::ClockDisable => HwOp::ClockDisable,
            Self::Synthesizer(_) => HwOp::Synthesizer,
            Self::ClockSource { .. } => HwOp::ClockSource,
            Self::Tdm(_) => HwOp::Tdm,
            Self::Format(_) => HwOp::Format,
        }
    }
}

/// Kind of hardware operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwOp {
    /// Clock enable.
    ClockEnable,
    /// Clock disable.
    ClockDisable,
    /// PLL programming.
    Synthesizer,
    /// SYSCLK source switch.
    ClockSource,
    /// TDM slot programming.
    Tdm,
    /// DAI format programming.
    Format,
}

/// Error returned by a mock when its injected failure fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub HwOp);

/// Ordered record of hardware calls, shared by reference between mocks.
#[derive(Debug, Default)]
pub struct CallLog {
    calls: RefCell<heapless::Vec<HwCall, CALL_LOG_CAPACITY>>,
}

impl CallLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call; calls beyond capacity are dropped.
    pub fn record(&self, call: HwCall) {
        let mut calls = self.calls.borrow_mut();
        if calls.len() < calls.capacity() {
            let _ = calls.push(call);
        }
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> heapless::Vec<HwCall, CALL_LOG_CAPACITY> {
        self.calls.borrow().clone()
    }

    /// Snapshot of the operation kinds, in order.
    pub fn ops(&self) -> heapless::Vec<HwOp, CALL_LOG_CAPACITY> {
        self.calls.borrow().iter().map(HwCall::op).collect()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Mock platform clock. Records calls and tracks the enabled flag.
pub struct MockClock<'a> {
    log: &'a CallLog,
    /// Whether the clock is currently enabled.
    pub enabled: bool,
    /// Make [`PlatformClock::enable`] fail.
    pub fail_enable: bool,
    /// Make [`PlatformClock::disable`] fail.
    pub fail_disable: bool,
}

impl<'a> MockClock<'a> {
    /// Create a disabled clock recording into `log`.
    pub fn new(log: &'a CallLog) -> Self {
        Self {
            log,
            enabled: false,
            fail_enable: false,
            fail_disable: false,
        }
    }
}

impl PlatformClock for MockClock<'_> {
    type Error = MockError;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.log.record(HwCall::ClockEnable);
        if self.fail_enable {
            return Err(MockError(HwOp::ClockEnable));
        }
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.log.record(HwCall::ClockDisable);
        if self.fail_disable {
            return Err(MockError(HwOp::ClockDisable));
        }
        self.enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> Option<bool> {
        Some(self.enabled)
    }
}

/// Mock codec DAI. Records calls and keeps the last programmed state.
pub struct MockCodecDai<'a> {
    name: &'static str,
    log: &'a CallLog,
    /// Operation that fails when attempted.
    pub fail_on: Option<HwOp>,
    /// Last PLL configuration accepted.
    pub pll: Option<PllConfig>,
    /// Last SYSCLK source accepted.
    pub sysclk: Option<SysclkSource>,
    /// Last TDM layout accepted.
    pub tdm: Option<TdmSlots>,
    /// Last format accepted.
    pub format: Option<DaiFormat>,
}

impl<'a> MockCodecDai<'a> {
    /// Mock of the primary codec DAI (`rt5659-aif1`).
    pub fn new(log: &'a CallLog) -> Self {
        Self::named(PRIMARY_CODEC_DAI, log)
    }

    /// Mock of an arbitrary codec DAI.
    pub fn named(name: &'static str, log: &'a CallLog) -> Self {
        Self {
            name,
            log,
            fail_on: None,
            pll: None,
            sysclk: None,
            tdm: None,
            format: None,
        }
    }

    fn attempt(&self, call: HwCall) -> Result<(), MockError> {
        self.log.record(call);
        match self.fail_on {
            Some(op) if op == call.op() => Err(MockError(op)),
            _ => Ok(()),
        }
    }
}

impl CodecDai for MockCodecDai<'_> {
    type Error = MockError;

    fn name(&self) -> &str {
        self.name
    }

    fn configure_synthesizer(&mut self, pll: PllConfig) -> Result<(), Self::Error> {
        self.attempt(HwCall::Synthesizer(pll))?;
        self.pll = Some(pll);
        Ok(())
    }

    fn select_clock_source(
        &mut self,
        source: SysclkSource,
        freq_hz: u32,
        direction: ClockDirection,
    ) -> Result<(), Self::Error> {
        self.attempt(HwCall::ClockSource {
            source,
            freq_hz,
            direction,
        })?;
        self.sysclk = Some(source);
        Ok(())
    }

    fn configure_tdm(&mut self, slots: TdmSlots) -> Result<(), Self::Error> {
        self.attempt(HwCall::Tdm(slots))?;
        self.tdm = Some(slots);
        Ok(())
    }

    fn set_interface_format(&mut self, format: DaiFormat) -> Result<(), Self::Error> {
        self.attempt(HwCall::Format(format))?;
        self.format = Some(format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_and_codec_share_one_ordered_log() {
        let log = CallLog::new();
        let mut clock = MockClock::new(&log);
        let mut dai = MockCodecDai::new(&log);

        clock.enable().unwrap();
        dai.select_clock_source(SysclkSource::Rcclk, 1, ClockDirection::In)
            .unwrap();
        clock.disable().unwrap();

        assert_eq!(
            log.ops().as_slice(),
            &[HwOp::ClockEnable, HwOp::ClockSource, HwOp::ClockDisable]
        );
        assert_eq!(clock.is_enabled(), Some(false));
    }

    #[test]
    fn injected_failure_is_recorded_but_not_applied() {
        let log = CallLog::new();
        let mut dai = MockCodecDai::new(&log);
        dai.fail_on = Some(HwOp::ClockSource);

        let err = dai
            .select_clock_source(SysclkSource::Pll1, 1, ClockDirection::In)
            .unwrap_err();

        assert_eq!(err, MockError(HwOp::ClockSource));
        assert_eq!(dai.sysclk, None);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn failed_enable_leaves_clock_off() {
        let log = CallLog::new();
        let mut clock = MockClock::new(&log);
        clock.fail_enable = true;
        assert!(clock.enable().is_err());
        assert!(!clock.enabled);
    }
}
