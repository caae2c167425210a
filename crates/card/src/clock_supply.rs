//! Platform clock supply sequencing.
//!
//! Keeps the codec's reference clock and SYSCLK source in step with the
//! power state of the audio path:
//!
//! ```text
//!            PowerUp: enable MCLK → lock PLL1 to MCLK → SYSCLK = PLL1
//!     ┌─────┐ ───────────────────────────────────────────────────► ┌────┐
//!     │ Off │                                                       │ On │
//!     └─────┘ ◄─────────────────────────────────────────────────── └────┘
//!            PowerDown: SYSCLK = RCCLK → disable MCLK
//! ```
//!
//! The codec is never left without a clock: on the way down the SYSCLK moves
//! to the internal RC oscillator before MCLK is gated, so jack and button
//! detection keep running. On the way up MCLK is running before anything
//! that depends on it is programmed.
//!
//! Failed steps are not rolled back. A failed PLL lock leaves MCLK enabled and
//! the state `Off`; the next `PowerUp` re-enables (a no-op for the PMC clock)
//! and tries again. A failed MCLK disable leaves the state `On`, so the state
//! never claims the clock is gated while it still runs.

use platform::clock_config::{BASE_RATE_HZ, BASE_SYSCLK_HZ};
use platform::{ClockDirection, CodecDai, NoPlatformClock, PlatformClock, PllConfig, SysclkSource};

use crate::error::CardError;
use crate::fmt::Dbg;
use crate::routing::SupplyEvents;

/// Power state of the platform clock supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockState {
    /// Codec runs from its internal RC oscillator; MCLK may be gated.
    Off,
    /// MCLK enabled and the codec SYSCLK runs from PLL1.
    On,
}

/// Power edge delivered to the supply widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    /// The path is about to power up.
    PowerUp,
    /// The path has powered down.
    PowerDown,
}

impl PowerEvent {
    /// Whether a widget subscribed to `events` receives this edge.
    pub fn is_subscribed(self, events: SupplyEvents) -> bool {
        match self {
            Self::PowerUp => events.pre_power_up,
            Self::PowerDown => events.post_power_down,
        }
    }
}

/// Sequencer for the "Platform Clock" supply widget.
///
/// Owns the optional platform clock handle. All transitions take `&mut self`,
/// so one card's transitions cannot interleave.
#[derive(Debug)]
pub struct ClockSupplyController<C: PlatformClock> {
    clock: Option<C>,
    state: ClockState,
}

impl ClockSupplyController<NoPlatformClock> {
    /// Controller for boards without a gateable platform clock.
    ///
    /// Enable and disable steps are skipped; PLL and SYSCLK steps still run.
    pub fn without_clock() -> Self {
        Self::from_option(None)
    }
}

impl<C: PlatformClock> ClockSupplyController<C> {
    /// Controller gating `clock`, initially `Off`.
    pub fn new(clock: C) -> Self {
        Self::from_option(Some(clock))
    }

    /// Controller with or without a platform clock, initially `Off`.
    pub fn from_option(clock: Option<C>) -> Self {
        Self {
            clock,
            state: ClockState::Off,
        }
    }

    /// Current state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Whether a platform clock handle is present.
    pub fn has_platform_clock(&self) -> bool {
        self.clock.is_some()
    }

    /// Platform clock handle, if present.
    pub fn clock(&self) -> Option<&C> {
        self.clock.as_ref()
    }

    /// Mutable access to the platform clock, if one is attached.
    pub fn clock_mut(&mut self) -> Option<&mut C> {
        self.clock.as_mut()
    }

    /// Apply a power edge, programming `dai` (the primary codec DAI).
    ///
    /// A repeated edge (`PowerUp` while `On`, `PowerDown` while `Off`) does
    /// nothing and succeeds.
    pub fn handle<D: CodecDai>(&mut self, dai: &mut D, event: PowerEvent) -> Result<(), CardError> {
        match (self.state, event) {
            (ClockState::Off, PowerEvent::PowerUp) => self.power_up(dai),
            (ClockState::On, PowerEvent::PowerDown) => self.power_down(dai),
            (state, event) => {
                debug!(
                    "clock supply: ignoring {} while {}",
                    Dbg(&event),
                    Dbg(&state)
                );
                Ok(())
            }
        }
    }

    fn power_up<D: CodecDai>(&mut self, dai: &mut D) -> Result<(), CardError> {
        if let Some(clock) = self.clock.as_mut() {
            clock.enable().map_err(|e| {
                error!("clock supply: could not enable platform clock: {}", Dbg(&e));
                CardError::ClockAcquisitionFailed
            })?;
        }

        let pll = PllConfig::from_platform_clock(BASE_RATE_HZ);
        dai.configure_synthesizer(pll).map_err(|e| {
            error!("clock supply: PLL1 lock to MCLK failed: {}", Dbg(&e));
            CardError::ClockConfigurationFailed
        })?;

        dai.select_clock_source(SysclkSource::Pll1, BASE_SYSCLK_HZ, ClockDirection::In)
            .map_err(|e| {
                error!("clock supply: SYSCLK switch to PLL1 failed: {}", Dbg(&e));
                CardError::ClockSourceSwitchFailed
            })?;

        self.state = ClockState::On;
        info!("clock supply: on, SYSCLK {} Hz from PLL1", BASE_SYSCLK_HZ);
        Ok(())
    }

    fn power_down<D: CodecDai>(&mut self, dai: &mut D) -> Result<(), CardError> {
        // Move off MCLK first; the codec must keep a clock for jack sensing.
        dai.select_clock_source(SysclkSource::Rcclk, BASE_SYSCLK_HZ, ClockDirection::In)
            .map_err(|e| {
                error!("clock supply: SYSCLK switch to RCCLK failed: {}", Dbg(&e));
                CardError::ClockSourceSwitchFailed
            })?;

        // State stays On until MCLK is really gated; a retry repeats the
        // RCCLK switch, which is harmless.
        if let Some(clock) = self.clock.as_mut() {
            clock.disable().map_err(|e| {
                error!("clock supply: could not disable platform clock: {}", Dbg(&e));
                CardError::ClockReleaseFailed
            })?;
        }

        self.state = ClockState::Off;
        info!("clock supply: off, SYSCLK from RCCLK");
        Ok(())
    }
}
