//! Back-end stream negotiation.
//!
//! The SSP back end runs a fixed 4-slot TDM frame at 48 kHz whatever the
//! front end asked for; the DSP converts. [`StreamNegotiator::fixup`] pins the
//! back-end parameters, [`StreamNegotiator::configure_link`] programs the
//! codec side of the link.

use platform::clock_config::{BASE_RATE_HZ, SYSCLK_FS_RATIO};
use platform::{
    ClockDirection, ClockInversion, ClockProvider, CodecDai, DaiFormat, DaiProtocol, HwParams,
    Name, PcmFormat, PllConfig, SampleRateHz, SysclkSource, TdmSlots,
};

use crate::error::{CardError, InterfaceStep, LinkOutcome};
use crate::fmt::Dbg;
use crate::topology::Topology;

/// Channel count of the back-end TDM frame.
pub const BACK_END_CHANNELS: u32 = 4;

/// TDM layout: four active slots both ways.
///
/// The slot width carries the GSM format code, which the codec driver
/// interprets as its 24-bit slot setting.
pub const BACK_END_TDM: TdmSlots = TdmSlots {
    tx_mask: 0xF,
    rx_mask: 0xF,
    slots: 4,
    slot_width: PcmFormat::Gsm.code(),
};

/// DSP mode B, inverted bit clock, SSP provides both clocks.
pub const BACK_END_FORMAT: DaiFormat = DaiFormat::new(
    DaiProtocol::DspB,
    ClockInversion::InvertedBitNormalFrame,
    ClockProvider::CodecConsumer,
);

/// Fixes back-end parameters and configures the primary codec DAI.
#[derive(Debug, Clone)]
pub struct StreamNegotiator {
    topology: Topology,
    primary_dai: Name,
}

impl StreamNegotiator {
    /// Negotiator for `topology`, configuring only the DAI named `primary_dai`.
    pub fn new(topology: Topology, primary_dai: Name) -> Self {
        Self {
            topology,
            primary_dai,
        }
    }

    /// Topology the negotiator was built for.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Force the back-end parameters to 48 kHz, 4 channels and the
    /// topology's sample format. Idempotent.
    pub fn fixup(&self, params: &mut HwParams) {
        params.rate.set_single(BASE_RATE_HZ);
        params.channels.set_single(BACK_END_CHANNELS);
        params.format = self.topology.sample_format();
    }

    /// Restrict a front-end stream to the single rate the back end runs at.
    pub fn constrain_front_end(&self, params: &mut HwParams) {
        params.rate.set_single(BASE_RATE_HZ);
    }

    /// Whether `dai` is the codec DAI this negotiator configures.
    ///
    /// Matched on the configured name as a prefix, so instance suffixes
    /// appended by the codec driver still match. An empty configured name
    /// matches nothing.
    pub fn is_primary(&self, dai: &str) -> bool {
        !self.primary_dai.is_empty() && dai.starts_with(self.primary_dai.as_str())
    }

    /// Program the back-end link on `dai` for `params`.
    ///
    /// Runs TDM layout, interface format, PLL lock and SYSCLK selection in that
    /// order and stops at the first failure; earlier steps are not undone.
    /// A DAI other than the primary one is left untouched.
    ///
    /// The rate must lie in 8 kHz..=192 kHz to derive a PLL target; anything
    /// else fails with [`CardError::ClockConfigurationFailed`] before the PLL
    /// is touched. After [`fixup`](Self::fixup) the rate is always 48 kHz.
    pub fn configure_link<D: CodecDai>(
        &self,
        dai: &mut D,
        params: &HwParams,
    ) -> Result<LinkOutcome, CardError> {
        if !self.is_primary(dai.name()) {
            debug!("negotiator: skipping link setup on {}", dai.name());
            return Ok(LinkOutcome::UnsupportedInterfaceInstance);
        }

        dai.configure_tdm(BACK_END_TDM).map_err(|e| {
            error!("negotiator: TDM slot setup failed: {}", Dbg(&e));
            CardError::InterfaceConfigurationFailed(InterfaceStep::TdmSlots)
        })?;

        dai.set_interface_format(BACK_END_FORMAT).map_err(|e| {
            error!("negotiator: DAI format setup failed: {}", Dbg(&e));
            CardError::InterfaceConfigurationFailed(InterfaceStep::Format)
        })?;

        let rate = SampleRateHz::new(params.rate()).map_err(|e| {
            error!("negotiator: no PLL target for rate: {}", Dbg(&e));
            CardError::ClockConfigurationFailed
        })?;
        let sysclk = rate.sysclk_hz(SYSCLK_FS_RATIO);

        dai.configure_synthesizer(PllConfig::from_platform_clock(rate.get()))
            .map_err(|e| {
                error!("negotiator: PLL1 lock failed: {}", Dbg(&e));
                CardError::ClockConfigurationFailed
            })?;

        dai.select_clock_source(SysclkSource::Pll1, sysclk, ClockDirection::In)
            .map_err(|e| {
                error!("negotiator: SYSCLK switch to PLL1 failed: {}", Dbg(&e));
                CardError::ClockSourceSwitchFailed
            })?;

        debug!(
            "negotiator: {} configured, SYSCLK {} Hz",
            self.topology.back_end_link_name(),
            sysclk
        );
        Ok(LinkOutcome::Configured)
    }
}
