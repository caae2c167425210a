//! Codec clock-tree identifiers and fixed board frequencies.
//!
//! The RT5659 derives its system clock (SYSCLK) from one of three places:
//!
//! ```text
//!  PMC_PLT_CLK_3 (19.2 MHz) ──► MCLK pin ──► PLL1 ──┐
//!                                   │               ├──► SYSCLK ──► AIF1/ADC/DAC
//!                                   └───────────────┤
//!  RC oscillator (internal, always running) ────────┘
//! ```
//!
//! While the audio path is powered SYSCLK runs from PLL1 locked to MCLK at
//! 512 × fs. When the path is idle the codec is parked on the RC oscillator so
//! jack detection and button sensing keep working with MCLK gated off.
//!
//! # Sources
//!
//! - Cherry Trail PMC: platform clock 3 is the codec MCLK, fixed at 19.2 MHz
//! - RT5659 datasheet §8 (clock tree, `RT5659_SCLK_S_*`, `RT5659_PLL1_S_*`)

/// Frequency of the platform clock wired to the codec MCLK pin (Hz).
pub const PLATFORM_CLOCK_HZ: u32 = 19_200_000;

/// Sample rate the DSP always converts the back end to (Hz).
pub const BASE_RATE_HZ: u32 = 48_000;

/// SYSCLK / fs ratio used for every PLL target.
pub const SYSCLK_FS_RATIO: u32 = 512;

/// SYSCLK at the base rate: 512 × 48 kHz = 24.576 MHz.
pub const BASE_SYSCLK_HZ: u32 = BASE_RATE_HZ * SYSCLK_FS_RATIO;

/// Input selector of the codec PLL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PllSource {
    /// MCLK pin (the platform clock).
    Mclk = 0,
    /// Bit clock of AIF1.
    Bclk1 = 1,
    /// Bit clock of AIF2.
    Bclk2 = 2,
}

impl PllSource {
    /// Register encoding of the selector.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Short label for log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mclk => "MCLK",
            Self::Bclk1 => "BCLK1",
            Self::Bclk2 => "BCLK2",
        }
    }
}

/// Identifier of a codec PLL instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllId(pub u8);

impl PllId {
    /// PLL1, the only PLL the RT5659 exposes to the machine driver.
    pub const PLL1: Self = Self(0);
}

/// Source of the codec system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SysclkSource {
    /// MCLK pin directly.
    Mclk = 0,
    /// PLL1 output.
    Pll1 = 1,
    /// Internal free-running RC oscillator.
    Rcclk = 2,
}

impl SysclkSource {
    /// Register encoding of the selector.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// `true` if this source stops when the platform clock is gated.
    pub const fn requires_platform_clock(self) -> bool {
        match self {
            Self::Mclk | Self::Pll1 => true,
            Self::Rcclk => false,
        }
    }

    /// Short label for log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mclk => "MCLK",
            Self::Pll1 => "PLL1",
            Self::Rcclk => "RCCLK",
        }
    }
}

/// Direction of a clock relative to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDirection {
    /// Clock is consumed by the codec.
    In,
    /// Clock is driven by the codec.
    Out,
}

/// PLL programming request: lock `source` at `freq_in` and produce `freq_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllConfig {
    /// PLL instance.
    pub pll: PllId,
    /// Reference input.
    pub source: PllSource,
    /// Reference frequency in Hz.
    pub freq_in: u32,
    /// Target output frequency in Hz.
    pub freq_out: u32,
}

impl PllConfig {
    /// PLL1 locked to the platform clock, producing 512 × `rate_hz`.
    pub fn from_platform_clock(rate_hz: u32) -> Self {
        Self {
            pll: PllId::PLL1,
            source: PllSource::Mclk,
            freq_in: PLATFORM_CLOCK_HZ,
            freq_out: rate_hz.saturating_mul(SYSCLK_FS_RATIO),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
