//! Error types for the machine driver.

use thiserror_no_std::Error;

/// Failure of a clock-supply transition or a back-end link configuration.
///
/// Driver errors from the clock provider or codec are logged where they
/// occur and mapped to the kind of the step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CardError {
    /// Platform clock could not be enabled.
    #[error("platform clock could not be enabled")]
    ClockAcquisitionFailed,

    /// Codec PLL programming was rejected.
    #[error("codec PLL configuration failed")]
    ClockConfigurationFailed,

    /// Codec SYSCLK source switch was rejected.
    #[error("codec SYSCLK source switch failed")]
    ClockSourceSwitchFailed,

    /// Platform clock could not be disabled after SYSCLK left it.
    #[error("platform clock could not be disabled")]
    ClockReleaseFailed,

    /// Codec DAI rejected part of the interface layout.
    #[error("codec DAI interface configuration failed at {0}")]
    InterfaceConfigurationFailed(InterfaceStep),
}

/// Interface-layout step of a back-end link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceStep {
    /// TDM slot masks, count and width.
    TdmSlots,
    /// Frame protocol, polarity and clock roles.
    Format,
}

impl core::fmt::Display for InterfaceStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TdmSlots => f.write_str("TDM slot setup"),
            Self::Format => f.write_str("DAI format setup"),
        }
    }
}

/// Successful result of a back-end link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkOutcome {
    /// The primary codec DAI was fully configured.
    Configured,
    /// The DAI is not the primary codec DAI; nothing was touched.
    UnsupportedInterfaceInstance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_error_names_the_step() {
        let e = CardError::InterfaceConfigurationFailed(InterfaceStep::Format);
        assert_eq!(
            format!("{e}"),
            "codec DAI interface configuration failed at DAI format setup"
        );
    }
}
