//! Board configuration and naming constants
//!
//! The machine driver is parameterised by a [`PlatformDescriptor`] built once
//! per device from whatever the platform layer resolved (ACPI codec HID, SOC
//! type, DSP parent). All naming should reference the constants below rather
//! than hardcoding strings.

use thiserror_no_std::Error;

/// Card name registered with the sound core.
pub const CARD_NAME: &str = "cht-bsw-rt5659";

/// Card name when the DSP is driven by SOF (card id becomes `sof-bytcht rt5659`).
pub const SOF_CARD_NAME: &str = "bytcht rt5659";

/// Driver name when the DSP is driven by SOF.
pub const SOF_DRIVER_NAME: &str = "SOF";

/// Codec I2C device name used until ACPI resolution says otherwise.
pub const DEFAULT_CODEC_NAME: &str = "i2c-10EC5659:00";

/// Codec DAI that carries the SSP back end.
pub const PRIMARY_CODEC_DAI: &str = "rt5659-aif1";

/// Codec DAI wired to the speaker amplifier.
pub const SPEAKER_CODEC_DAI: &str = "rt5659-aif2";

/// DSP platform component.
pub const DEFAULT_PLATFORM_NAME: &str = "sst-mfld-platform";

/// Clock consumer id of the PMC clock feeding MCLK.
pub const PLATFORM_CLOCK_ID: &str = "pmc_plt_clk_3";

/// Capacity of every name held by the descriptor.
pub const NAME_CAPACITY: usize = 32;

/// Bounded name string.
pub type Name = heapless::String<NAME_CAPACITY>;

/// A name did not fit in [`NAME_CAPACITY`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("name of {len} bytes exceeds capacity of {capacity}")]
pub struct NameTooLong {
    /// Length of the rejected name.
    pub len: usize,
    /// Maximum accepted length.
    pub capacity: usize,
}

/// Copy `s` into a bounded [`Name`].
///
/// # Errors
///
/// Returns [`NameTooLong`] if `s` exceeds [`NAME_CAPACITY`] bytes.
pub fn bounded_name(s: &str) -> Result<Name, NameTooLong> {
    let mut name = Name::new();
    name.push_str(s).map_err(|_| NameTooLong {
        len: s.len(),
        capacity: NAME_CAPACITY,
    })?;
    Ok(name)
}

/// Per-device platform description consumed once at card assembly.
///
/// Owned by the card; there is no shared or static copy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlatformDescriptor {
    /// Board routes the back end through SSP0 at 16 bits (Bay Trail CR).
    pub use_legacy_transport: bool,
    /// Codec component name (`i2c-<ACPI name>`).
    pub codec_name: Name,
    /// Codec DAI on which back-end link configuration is performed.
    pub primary_dai: Name,
    /// DSP platform component bound to every link that uses one.
    pub platform_name: Name,
    /// DSP is driven by SOF rather than the SST driver.
    pub sof_parent: bool,
}

impl PlatformDescriptor {
    /// Descriptor for a standard Cherry Trail board.
    pub fn new() -> Self {
        Self {
            use_legacy_transport: false,
            codec_name: bounded_name(DEFAULT_CODEC_NAME).unwrap_or_default(),
            primary_dai: bounded_name(PRIMARY_CODEC_DAI).unwrap_or_default(),
            platform_name: bounded_name(DEFAULT_PLATFORM_NAME).unwrap_or_default(),
            sof_parent: false,
        }
    }

    /// Select the legacy SSP0 transport.
    #[must_use]
    pub fn with_legacy_transport(mut self, legacy: bool) -> Self {
        self.use_legacy_transport = legacy;
        self
    }

    /// Mark the DSP as SOF-driven.
    #[must_use]
    pub fn with_sof_parent(mut self, sof: bool) -> Self {
        self.sof_parent = sof;
        self
    }

    /// Override the codec component name.
    pub fn with_codec_name(mut self, name: &str) -> Result<Self, NameTooLong> {
        self.codec_name = bounded_name(name)?;
        Ok(self)
    }

    /// Override the primary codec DAI name.
    pub fn with_primary_dai(mut self, name: &str) -> Result<Self, NameTooLong> {
        self.primary_dai = bounded_name(name)?;
        Ok(self)
    }

    /// Override the DSP platform component name.
    pub fn with_platform_name(mut self, name: &str) -> Result<Self, NameTooLong> {
        self.platform_name = bounded_name(name)?;
        Ok(self)
    }

    /// Card name for this board.
    pub fn card_name(&self) -> &'static str {
        if self.sof_parent {
            SOF_CARD_NAME
        } else {
            CARD_NAME
        }
    }

    /// Driver name for this board, `None` to reuse the card name.
    pub fn driver_name(&self) -> Option<&'static str> {
        self.sof_parent.then_some(SOF_DRIVER_NAME)
    }
}

impl Default for PlatformDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
