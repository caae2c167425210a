//! Platform wiring topology.
//!
//! Selected once from the platform descriptor and never changed for the
//! lifetime of the card. The topology fixes the SSP port, its DSP-side
//! widgets, the back-end sample format and whether codec streams depend on
//! the platform clock supply.

use platform::{PcmFormat, StreamDirection};

use crate::routing::Route;

/// Supply widget gating MCLK.
pub const PLATFORM_CLOCK_WIDGET: &str = "Platform Clock";

/// Codec stream widget for playback.
pub const CODEC_PLAYBACK_STREAM: &str = "AIF1 Playback";

/// Codec stream widget for capture.
pub const CODEC_CAPTURE_STREAM: &str = "AIF1 Capture";

/// Wiring between DSP and codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Topology {
    /// SSP0 carrying the DSP modem ports, 16-bit samples.
    TransportA,
    /// SSP2 carrying the DSP codec ports, 24-bit samples.
    TransportB,
}

static TRANSPORT_A_ROUTES: [Route; 4] = [
    Route::new(CODEC_PLAYBACK_STREAM, "ssp0 Tx"),
    Route::new("ssp0 Tx", "modem_out"),
    Route::new("modem_in", "ssp0 Rx"),
    Route::new("ssp0 Rx", CODEC_CAPTURE_STREAM),
];

static TRANSPORT_B_ROUTES: [Route; 8] = [
    Route::new(CODEC_PLAYBACK_STREAM, "ssp2 Tx"),
    Route::new("ssp2 Tx", "codec_out0"),
    Route::new("ssp2 Tx", "codec_out1"),
    Route::new("codec_in0", "ssp2 Rx"),
    Route::new("codec_in1", "ssp2 Rx"),
    Route::new("ssp2 Rx", CODEC_CAPTURE_STREAM),
    Route::new(CODEC_PLAYBACK_STREAM, PLATFORM_CLOCK_WIDGET),
    Route::new(CODEC_CAPTURE_STREAM, PLATFORM_CLOCK_WIDGET),
];

static TRANSPORT_A_ENDPOINTS: [&str; 4] = ["ssp0 Tx", "ssp0 Rx", "modem_out", "modem_in"];

static TRANSPORT_B_ENDPOINTS: [&str; 6] = [
    "ssp2 Tx",
    "ssp2 Rx",
    "codec_out0",
    "codec_out1",
    "codec_in0",
    "codec_in1",
];

impl Topology {
    /// Pick the topology from the descriptor flag; `true` selects TransportA.
    pub const fn select(use_legacy_transport: bool) -> Self {
        if use_legacy_transport {
            Self::TransportA
        } else {
            Self::TransportB
        }
    }

    /// Edge-set merged into the routing graph.
    pub fn routes(self) -> &'static [Route] {
        match self {
            Self::TransportA => &TRANSPORT_A_ROUTES,
            Self::TransportB => &TRANSPORT_B_ROUTES,
        }
    }

    /// DSP and SSP widgets this topology's routes refer to.
    pub fn dsp_endpoints(self) -> &'static [&'static str] {
        match self {
            Self::TransportA => &TRANSPORT_A_ENDPOINTS,
            Self::TransportB => &TRANSPORT_B_ENDPOINTS,
        }
    }

    /// DSP widgets where front-end streams enter (playback) or leave
    /// (capture) the routing graph.
    pub fn front_end_endpoints(self, direction: StreamDirection) -> &'static [&'static str] {
        match (self, direction) {
            (Self::TransportA, StreamDirection::Playback) => &["modem_out"],
            (Self::TransportA, StreamDirection::Capture) => &["modem_in"],
            (Self::TransportB, StreamDirection::Playback) => &["codec_out0", "codec_out1"],
            (Self::TransportB, StreamDirection::Capture) => &["codec_in0", "codec_in1"],
        }
    }

    /// Sample format of the back-end link.
    pub const fn sample_format(self) -> PcmFormat {
        match self {
            Self::TransportA => PcmFormat::S16Le,
            Self::TransportB => PcmFormat::S24Le,
        }
    }

    /// Name of the back-end DAI link.
    pub const fn back_end_link_name(self) -> &'static str {
        match self {
            Self::TransportA => "SSP0-Codec",
            Self::TransportB => "SSP2-Codec",
        }
    }

    /// CPU DAI of the back-end link.
    pub const fn cpu_dai_name(self) -> &'static str {
        match self {
            Self::TransportA => "ssp0-port",
            Self::TransportB => "ssp2-port",
        }
    }

    /// Codec streams depend on the platform clock supply widget.
    pub const fn streams_need_platform_clock(self) -> bool {
        matches!(self, Self::TransportB)
    }

    /// Short label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TransportA => "ssp0/s16",
            Self::TransportB => "ssp2/s24",
        }
    }
}
