//! Platform reference-clock gating.
//!
//! The codec MCLK comes from a PMC platform clock that the machine driver
//! switches on and off with the audio path. Some boards expose no such clock
//! (MCLK is left free-running); [`NoPlatformClock`] stands in for them.

/// Gate for the external reference clock feeding the codec.
pub trait PlatformClock {
    /// Error type
    type Error: core::fmt::Debug;

    /// Prepare and enable the clock output.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Disable and unprepare the clock output.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Whether the clock is currently running, if the provider can tell.
    fn is_enabled(&self) -> Option<bool> {
        None
    }
}

/// Placeholder for boards without a gateable platform clock.
///
/// Cannot be constructed: an `Option<NoPlatformClock>` is always `None`, so a
/// controller holding one skips every gating step.
#[derive(Debug)]
pub enum NoPlatformClock {}

impl PlatformClock for NoPlatformClock {
    type Error = core::convert::Infallible;

    fn enable(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }
}

impl<T: PlatformClock + ?Sized> PlatformClock for &mut T {
    type Error = T::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        (**self).enable()
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        (**self).disable()
    }

    fn is_enabled(&self) -> Option<bool> {
        (**self).is_enabled()
    }
}
