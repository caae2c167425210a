//! Codec digital audio interface (DAI) abstraction
//!
//! The machine driver never touches codec registers. It asks the codec DAI to
//! lock its PLL, pick a SYSCLK source, and lay out the serial frame; the codec
//! driver turns those requests into register writes.
//!
//! Format words follow the ASoC `SND_SOC_DAIFMT_*` layout:
//!
//! ```text
//!  bits 0..4   protocol      (I2S, LEFT_J, DSP_A, DSP_B, ...)
//!  bits 8..12  inversion     (NB_NF, NB_IF, IB_NF, IB_IF)
//!  bits 12..16 clock roles   (who drives BCLK / FSYNC)
//! ```

use crate::clock_config::{ClockDirection, PllConfig, SysclkSource};

/// Codec DAI operations used by the machine driver.
pub trait CodecDai {
    /// Error type
    type Error: core::fmt::Debug;

    /// DAI name as registered by the codec driver (e.g. `"rt5659-aif1"`).
    fn name(&self) -> &str;

    /// Lock a codec PLL to a reference clock and set its output frequency.
    fn configure_synthesizer(&mut self, pll: PllConfig) -> Result<(), Self::Error>;

    /// Select the SYSCLK source and declare its frequency.
    fn select_clock_source(
        &mut self,
        source: SysclkSource,
        freq_hz: u32,
        direction: ClockDirection,
    ) -> Result<(), Self::Error>;

    /// Program TDM slot masks, slot count and slot width.
    fn configure_tdm(&mut self, slots: TdmSlots) -> Result<(), Self::Error>;

    /// Program frame protocol, clock polarity and clock roles.
    fn set_interface_format(&mut self, format: DaiFormat) -> Result<(), Self::Error>;
}

impl<T: CodecDai + ?Sized> CodecDai for &mut T {
    type Error = T::Error;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn configure_synthesizer(&mut self, pll: PllConfig) -> Result<(), Self::Error> {
        (**self).configure_synthesizer(pll)
    }

    fn select_clock_source(
        &mut self,
        source: SysclkSource,
        freq_hz: u32,
        direction: ClockDirection,
    ) -> Result<(), Self::Error> {
        (**self).select_clock_source(source, freq_hz, direction)
    }

    fn configure_tdm(&mut self, slots: TdmSlots) -> Result<(), Self::Error> {
        (**self).configure_tdm(slots)
    }

    fn set_interface_format(&mut self, format: DaiFormat) -> Result<(), Self::Error> {
        (**self).set_interface_format(format)
    }
}

/// TDM slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TdmSlots {
    /// Active transmit slots, one bit per slot.
    pub tx_mask: u32,
    /// Active receive slots, one bit per slot.
    pub rx_mask: u32,
    /// Number of slots per frame.
    pub slots: u8,
    /// Slot width value handed to the codec driver.
    pub slot_width: u32,
}

/// Serial frame protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum DaiProtocol {
    /// Philips I2S.
    I2s = 1,
    /// Right justified.
    RightJ = 2,
    /// Left justified.
    LeftJ = 3,
    /// DSP mode A: data MSB one bit clock after the frame sync edge.
    DspA = 4,
    /// DSP mode B: data MSB on the frame sync edge.
    DspB = 5,
}

/// Bit clock / frame sync polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ClockInversion {
    /// Normal bit clock, normal frame.
    NormalBitNormalFrame = 0,
    /// Normal bit clock, inverted frame.
    NormalBitInvertedFrame = 2,
    /// Inverted bit clock, normal frame.
    InvertedBitNormalFrame = 3,
    /// Inverted bit clock, inverted frame.
    InvertedBitInvertedFrame = 4,
}

/// Which side drives the bit clock and frame sync, seen from the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ClockProvider {
    /// Codec drives both clocks.
    CodecProvider = 1,
    /// Codec consumes BCLK, drives FSYNC.
    CodecBitConsumer = 2,
    /// Codec drives BCLK, consumes FSYNC.
    CodecFrameConsumer = 3,
    /// Codec consumes both clocks (SSP is provider).
    CodecConsumer = 4,
}

/// Complete DAI format word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaiFormat {
    /// Frame protocol.
    pub protocol: DaiProtocol,
    /// Clock polarity.
    pub inversion: ClockInversion,
    /// Clock roles.
    pub provider: ClockProvider,
}

impl DaiFormat {
    /// Assemble a format word.
    pub const fn new(
        protocol: DaiProtocol,
        inversion: ClockInversion,
        provider: ClockProvider,
    ) -> Self {
        Self {
            protocol,
            inversion,
            provider,
        }
    }

    /// Packed `SND_SOC_DAIFMT_*` value.
    #[allow(clippy::arithmetic_side_effects)] // fixed shifts of 3-bit discriminants
    pub const fn bits(self) -> u32 {
        (self.protocol as u32) | ((self.inversion as u32) << 8) | ((self.provider as u32) << 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dsp_b_ib_nf_consumer_packs_like_asoc() {
        let fmt = DaiFormat::new(
            DaiProtocol::DspB,
            ClockInversion::InvertedBitNormalFrame,
            ClockProvider::CodecConsumer,
        );
        // SND_SOC_DAIFMT_DSP_B | SND_SOC_DAIFMT_IB_NF | SND_SOC_DAIFMT_CBS_CFS
        assert_eq!(fmt.bits(), 5 | (3 << 8) | (4 << 12));
    }

    #[test]
    fn i2s_nb_nf_consumer_packs_like_asoc() {
        let fmt = DaiFormat::new(
            DaiProtocol::I2s,
            ClockInversion::NormalBitNormalFrame,
            ClockProvider::CodecConsumer,
        );
        assert_eq!(fmt.bits(), 0x4001);
    }
}
