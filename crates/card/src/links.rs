//! DAI link table.
//!
//! Two DSP front ends, the SSP back end to the RT5659, and a codec-to-codec
//! link from the codec's second interface to the speaker amplifier.

use platform::config::{bounded_name, SPEAKER_CODEC_DAI};
use platform::{
    ClockInversion, ClockProvider, DaiFormat, DaiProtocol, Name, PcmFormat, PlatformDescriptor,
};

use crate::topology::Topology;

/// Number of links on the card.
pub const LINK_COUNT: usize = 4;

/// Component name of the dummy codec bound to front-end links.
pub const DUMMY_CODEC: &str = "snd-soc-dummy";

/// DAI of the dummy codec.
pub const DUMMY_CODEC_DAI: &str = "snd-soc-dummy-dai";

/// Speaker amplifier component.
pub const SPEAKER_AMP_CODEC: &str = "i2c-tfa9890:00";

/// Speaker amplifier DAI.
pub const SPEAKER_AMP_DAI: &str = "tfa989x-hifi";

/// Role of a link in the DPCM graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkKind {
    /// DSP front end exposed to user space.
    FrontEnd,
    /// Hardware back end (SSP to codec).
    BackEnd,
    /// Codec-to-codec link with fixed stream parameters.
    CodecToCodec,
}

/// Machine callbacks attached to a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkHooks {
    /// Front-end start-up constraint and path probe.
    pub startup: bool,
    /// Back-end parameter fixup.
    pub hw_params_fixup: bool,
    /// Back-end link configuration.
    pub hw_params: bool,
}

/// Fixed stream parameters of a codec-to-codec link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamParams {
    /// Sample format.
    pub format: PcmFormat,
    /// Sample rate in Hz.
    pub rate: u32,
    /// Channel count.
    pub channels: u32,
    /// Significant bits per sample.
    pub sig_bits: u8,
}

/// One DAI link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaiLink {
    /// Link name.
    pub name: &'static str,
    /// PCM stream name, if exposed.
    pub stream_name: Option<&'static str>,
    /// Role of the link.
    pub kind: LinkKind,
    /// CPU-side DAI.
    pub cpu_dai: &'static str,
    /// Codec component.
    pub codec: Name,
    /// Codec DAI.
    pub codec_dai: Name,
    /// DSP platform component, if the link uses one.
    pub platform: Option<Name>,
    /// Carries playback.
    pub playback: bool,
    /// Carries capture.
    pub capture: bool,
    /// Front end routed to back ends at runtime.
    pub dynamic: bool,
    /// Triggers may sleep.
    pub nonatomic: bool,
    /// No PCM device is created for this link.
    pub no_pcm: bool,
    /// Kept powered across system suspend.
    pub ignore_suspend: bool,
    /// Powered down without the usual delay.
    pub ignore_pmdown_time: bool,
    /// Format applied by the core at link start, if any.
    pub dai_format: Option<DaiFormat>,
    /// Fixed parameters of a codec-to-codec link.
    pub c2c_params: Option<StreamParams>,
    /// Machine callbacks.
    pub hooks: LinkHooks,
}

impl DaiLink {
    fn front_end(
        name: &'static str,
        stream_name: &'static str,
        cpu_dai: &'static str,
        capture: bool,
        dsp: &Name,
    ) -> Self {
        Self {
            name,
            stream_name: Some(stream_name),
            kind: LinkKind::FrontEnd,
            cpu_dai,
            codec: fixed_name(DUMMY_CODEC),
            codec_dai: fixed_name(DUMMY_CODEC_DAI),
            platform: Some(dsp.clone()),
            playback: true,
            capture,
            dynamic: true,
            nonatomic: true,
            no_pcm: false,
            ignore_suspend: false,
            ignore_pmdown_time: false,
            dai_format: None,
            c2c_params: None,
            hooks: LinkHooks {
                startup: true,
                ..LinkHooks::default()
            },
        }
    }
}

// Names below are all shorter than `NAME_CAPACITY`.
fn fixed_name(s: &str) -> Name {
    bounded_name(s).unwrap_or_default()
}

/// Build the card's links for `descriptor` on `topology`.
pub fn build_links(descriptor: &PlatformDescriptor, topology: Topology) -> [DaiLink; LINK_COUNT] {
    let dsp = &descriptor.platform_name;
    [
        DaiLink::front_end("Audio Port", "Audio", "media-cpu-dai", true, dsp),
        DaiLink::front_end(
            "Deep-Buffer Audio Port",
            "Deep-Buffer Audio",
            "deepbuffer-cpu-dai",
            false,
            dsp,
        ),
        DaiLink {
            name: topology.back_end_link_name(),
            stream_name: None,
            kind: LinkKind::BackEnd,
            cpu_dai: topology.cpu_dai_name(),
            codec: descriptor.codec_name.clone(),
            codec_dai: descriptor.primary_dai.clone(),
            platform: Some(dsp.clone()),
            playback: true,
            capture: true,
            dynamic: false,
            nonatomic: false,
            no_pcm: true,
            ignore_suspend: true,
            ignore_pmdown_time: true,
            dai_format: None,
            c2c_params: None,
            hooks: LinkHooks {
                startup: false,
                hw_params_fixup: true,
                hw_params: true,
            },
        },
        DaiLink {
            name: "rt5659_AIF2-TFA989x_Speaker_L",
            stream_name: Some("aif2-spk_l"),
            kind: LinkKind::CodecToCodec,
            cpu_dai: SPEAKER_CODEC_DAI,
            codec: fixed_name(SPEAKER_AMP_CODEC),
            codec_dai: fixed_name(SPEAKER_AMP_DAI),
            platform: None,
            playback: true,
            capture: true,
            dynamic: false,
            nonatomic: false,
            no_pcm: false,
            ignore_suspend: false,
            ignore_pmdown_time: false,
            dai_format: Some(DaiFormat::new(
                DaiProtocol::I2s,
                ClockInversion::NormalBitNormalFrame,
                ClockProvider::CodecConsumer,
            )),
            c2c_params: Some(StreamParams {
                format: PcmFormat::S16Le,
                rate: 48_000,
                channels: 2,
                sig_bits: 16,
            }),
            hooks: LinkHooks::default(),
        },
    ]
}
