//! Back-end stream negotiation (run with `cargo test -p card --test stream_negotiation`)
#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use card::negotiator::{BACK_END_FORMAT, BACK_END_TDM};
use card::{CardError, InterfaceStep, LinkOutcome, StreamNegotiator, Topology};
use platform::config::bounded_name;
use platform::mocks::{CallLog, HwCall, HwOp, MockCodecDai};
use platform::{
    ClockDirection, ClockInversion, ClockProvider, DaiProtocol, HwParams, Interval, PcmFormat,
    SysclkSource,
};
use proptest::prelude::*;

fn negotiator(topology: Topology) -> StreamNegotiator {
    StreamNegotiator::new(topology, bounded_name("rt5659-aif1").unwrap())
}

fn stream(rate: u32) -> HwParams {
    HwParams::new(Interval::single(rate), Interval::single(4), PcmFormat::S24Le)
}

// ── Fixup ────────────────────────────────────────────────────────────────────

#[test]
fn transport_a_fixup_narrows_a_wide_request() {
    let mut params = HwParams::new(
        Interval::new(44_100, 96_000),
        Interval::new(1, 2),
        PcmFormat::S24Le,
    );

    negotiator(Topology::TransportA).fixup(&mut params);

    assert_eq!(params.rate, Interval::single(48_000));
    assert_eq!(params.channels, Interval::single(4));
    assert_eq!(params.format, PcmFormat::S16Le, "SSP0 carries 16-bit samples");
}

fn format() -> impl Strategy<Value = PcmFormat> {
    prop_oneof![
        Just(PcmFormat::S16Le),
        Just(PcmFormat::S24Le),
        Just(PcmFormat::S32Le),
    ]
}

fn any_params() -> impl Strategy<Value = HwParams> {
    (any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>(), format()).prop_map(
        |(r1, r2, c1, c2, f)| {
            HwParams::new(
                Interval::new(r1.min(r2), r1.max(r2)),
                Interval::new(c1.min(c2), c1.max(c2)),
                f,
            )
        },
    )
}

proptest! {
    #[test]
    fn fixup_is_idempotent(params in any_params(), legacy in any::<bool>()) {
        let n = negotiator(Topology::select(legacy));
        let mut once = params;
        n.fixup(&mut once);
        let mut twice = once;
        n.fixup(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn fixup_output_ignores_the_input(a in any_params(), b in any_params(), legacy in any::<bool>()) {
        let n = negotiator(Topology::select(legacy));
        let (mut a, mut b) = (a, b);
        n.fixup(&mut a);
        n.fixup(&mut b);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.format, Topology::select(legacy).sample_format());
    }
}

// ── Link configuration ──────────────────────────────────────────────────────

#[test]
fn primary_dai_gets_the_full_call_sequence() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);

    let outcome = negotiator(Topology::TransportB)
        .configure_link(&mut dai, &stream(48_000))
        .unwrap();

    assert_eq!(outcome, LinkOutcome::Configured);
    let calls = log.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], HwCall::Tdm(BACK_END_TDM));
    assert_eq!(calls[1], HwCall::Format(BACK_END_FORMAT));
    match calls[2] {
        HwCall::Synthesizer(pll) => assert_eq!((pll.freq_in, pll.freq_out), (19_200_000, 24_576_000)),
        other => panic!("expected PLL programming, got {other:?}"),
    }
    assert_eq!(
        calls[3],
        HwCall::ClockSource {
            source: SysclkSource::Pll1,
            freq_hz: 24_576_000,
            direction: ClockDirection::In,
        }
    );
}

#[test]
fn tdm_layout_is_four_slots_with_format_tag_width() {
    assert_eq!((BACK_END_TDM.tx_mask, BACK_END_TDM.rx_mask), (0xF, 0xF));
    assert_eq!(BACK_END_TDM.slots, 4);
    assert_eq!(BACK_END_TDM.slot_width, PcmFormat::Gsm.code());
    assert_eq!(BACK_END_FORMAT.protocol, DaiProtocol::DspB);
    assert_eq!(BACK_END_FORMAT.inversion, ClockInversion::InvertedBitNormalFrame);
    assert_eq!(BACK_END_FORMAT.provider, ClockProvider::CodecConsumer);
}

#[test]
fn non_primary_dai_is_untouched() {
    for name in ["rt5659-aif2", "tfa989x-hifi", "snd-soc-dummy-dai"] {
        let log = CallLog::new();
        let mut dai = MockCodecDai::named(name, &log);

        let outcome = negotiator(Topology::TransportB)
            .configure_link(&mut dai, &stream(48_000))
            .unwrap();

        assert_eq!(outcome, LinkOutcome::UnsupportedInterfaceInstance, "{name}");
        assert!(log.is_empty(), "{name} must see no calls");
    }
}

#[test]
fn each_failing_step_maps_to_its_error_and_stops() {
    let cases = [
        (
            HwOp::Tdm,
            CardError::InterfaceConfigurationFailed(InterfaceStep::TdmSlots),
            1,
        ),
        (
            HwOp::Format,
            CardError::InterfaceConfigurationFailed(InterfaceStep::Format),
            2,
        ),
        (HwOp::Synthesizer, CardError::ClockConfigurationFailed, 3),
        (HwOp::ClockSource, CardError::ClockSourceSwitchFailed, 4),
    ];

    for (op, expected, calls_made) in cases {
        let log = CallLog::new();
        let mut dai = MockCodecDai::new(&log);
        dai.fail_on = Some(op);

        let err = negotiator(Topology::TransportA)
            .configure_link(&mut dai, &stream(48_000))
            .unwrap_err();

        assert_eq!(err, expected, "failure at {op:?}");
        assert_eq!(log.len(), calls_made, "nothing may run after {op:?} fails");
    }
}

#[test]
fn earlier_steps_are_not_undone() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    dai.fail_on = Some(HwOp::Synthesizer);

    let _ = negotiator(Topology::TransportB).configure_link(&mut dai, &stream(48_000));

    assert_eq!(dai.tdm, Some(BACK_END_TDM));
    assert_eq!(dai.format, Some(BACK_END_FORMAT));
    assert_eq!(dai.pll, None);
}
