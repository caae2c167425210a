//! PCM stream value types shared by the machine driver and its collaborators.
//!
//! These mirror the pieces of an ALSA `hw_params` set that the card touches:
//! - `Interval`: an inclusive `[min, max]` range (rate, channel count)
//! - `PcmFormat`: sample format, carrying the ALSA format code
//! - `HwParams`: the per-stream working set a back-end fixup narrows in place
//! - `SampleRateHz`: validated sample rate used for clock derivation

use thiserror_no_std::Error;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside [{min}, {max}]")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── StreamDirection ──────────────────────────────────────────────────────────

/// Direction of a PCM substream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamDirection {
    /// Host → codec (DAC side).
    Playback,
    /// Codec → host (ADC side).
    Capture,
}

impl StreamDirection {
    /// Short lowercase label for log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playback => "playback",
            Self::Capture => "capture",
        }
    }
}

// ── Interval ─────────────────────────────────────────────────────────────────

/// Inclusive `[min, max]` range of a negotiable hardware parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    /// Lower bound (inclusive).
    pub min: u32,
    /// Upper bound (inclusive).
    pub max: u32,
}

impl Interval {
    /// Range covering `min..=max`.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Range containing exactly one value.
    pub const fn single(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Pin the range to exactly `value`.
    pub fn set_single(&mut self, value: u32) {
        self.min = value;
        self.max = value;
    }

    /// `true` once the range has been narrowed to a single value.
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    /// `true` if `value` lies inside the range.
    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }
}

// ── PcmFormat ────────────────────────────────────────────────────────────────

/// PCM sample format.
///
/// Discriminants are the ALSA `SNDRV_PCM_FORMAT_*` codes, which is also what
/// some codec drivers expect where a format tag is passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum PcmFormat {
    /// Signed 16-bit little-endian.
    S16Le = 2,
    /// Signed 24-bit in 32-bit container, little-endian.
    S24Le = 6,
    /// Signed 32-bit little-endian.
    S32Le = 10,
    /// GSM 06.10 encoded frames.
    Gsm = 24,
}

impl PcmFormat {
    /// The ALSA format code.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Significant bits per sample, `None` for encoded formats.
    pub const fn sample_bits(self) -> Option<u8> {
        match self {
            Self::S16Le => Some(16),
            Self::S24Le => Some(24),
            Self::S32Le => Some(32),
            Self::Gsm => None,
        }
    }

    /// ALSA-style short name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::S16Le => "S16_LE",
            Self::S24Le => "S24_LE",
            Self::S32Le => "S32_LE",
            Self::Gsm => "GSM",
        }
    }
}

// ── HwParams ─────────────────────────────────────────────────────────────────

/// Working set of hardware parameters for one stream.
///
/// Owned by the negotiation call; fixups mutate it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwParams {
    /// Sample rate range in Hz.
    pub rate: Interval,
    /// Channel count range.
    pub channels: Interval,
    /// Sample format.
    pub format: PcmFormat,
}

impl HwParams {
    /// Parameter set with the given ranges.
    pub const fn new(rate: Interval, channels: Interval, format: PcmFormat) -> Self {
        Self {
            rate,
            channels,
            format,
        }
    }

    /// The negotiated sample rate (lower bound of the rate interval).
    pub fn rate(&self) -> u32 {
        self.rate.min
    }

    /// The negotiated channel count (lower bound of the channel interval).
    pub fn channels(&self) -> u32 {
        self.channels.min
    }
}

// ── SampleRateHz ─────────────────────────────────────────────────────────────

/// Sample rate in Hz, validated to the range the RT5659 PLL can serve.
///
/// Valid range: 8000–192000 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SampleRateHz(u32);

impl SampleRateHz {
    /// Minimum supported sample rate: 8000 Hz.
    pub const MIN_HZ: u32 = 8_000;

    /// Maximum supported sample rate: 192000 Hz.
    pub const MAX_HZ: u32 = 192_000;

    /// Create a `SampleRateHz`, returning an error if out of 8000–192000 Hz.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `hz < 8000` or `hz > 192000`.
    pub fn new(hz: u32) -> Result<Self, OutOfRangeError> {
        if hz < Self::MIN_HZ || hz > Self::MAX_HZ {
            Err(OutOfRangeError {
                value: hz,
                min: Self::MIN_HZ,
                max: Self::MAX_HZ,
            })
        } else {
            Ok(Self(hz))
        }
    }

    /// Return the sample rate in Hz.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// System clock for this rate at `ratio` × fs.
    ///
    /// Saturates rather than wrapping; every valid rate × 512 fits in `u32`.
    #[must_use]
    pub fn sysclk_hz(self, ratio: u32) -> u32 {
        self.0.saturating_mul(ratio)
    }
}
