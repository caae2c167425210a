//! Clock supply sequencing (run with `cargo test -p card --test clock_sequencing`)
#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
//!
//! Exercises the "Platform Clock" supply controller against the recording
//! mocks: exact call order, failure handling without rollback, and the rule
//! that the codec SYSCLK never runs from PLL1 while MCLK is gated.

use card::{CardError, ClockState, ClockSupplyController, PowerEvent};
use platform::mocks::{CallLog, HwCall, HwOp, MockClock, MockCodecDai};
use platform::{ClockDirection, PlatformClock, PllConfig, PllId, PllSource, SysclkSource};
use proptest::prelude::*;

const SYSCLK_48K: u32 = 24_576_000;

fn pll1_from_mclk() -> HwCall {
    HwCall::Synthesizer(PllConfig {
        pll: PllId::PLL1,
        source: PllSource::Mclk,
        freq_in: 19_200_000,
        freq_out: SYSCLK_48K,
    })
}

fn sysclk(source: SysclkSource) -> HwCall {
    HwCall::ClockSource {
        source,
        freq_hz: SYSCLK_48K,
        direction: ClockDirection::In,
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn power_up_from_off_enables_mclk_before_the_pll() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    let mut supply = ClockSupplyController::new(MockClock::new(&log));

    supply.handle(&mut dai, PowerEvent::PowerUp).unwrap();

    assert_eq!(
        log.calls().as_slice(),
        &[HwCall::ClockEnable, pll1_from_mclk(), sysclk(SysclkSource::Pll1)],
        "power-up must enable MCLK, lock PLL1 to it, then switch SYSCLK"
    );
    assert_eq!(supply.state(), ClockState::On);
}

#[test]
fn power_down_from_on_moves_sysclk_before_gating_mclk() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    let mut supply = ClockSupplyController::new(MockClock::new(&log));
    supply.handle(&mut dai, PowerEvent::PowerUp).unwrap();
    log.clear();

    supply.handle(&mut dai, PowerEvent::PowerDown).unwrap();

    assert_eq!(
        log.calls().as_slice(),
        &[sysclk(SysclkSource::Rcclk), HwCall::ClockDisable],
        "power-down must switch to RCCLK before disabling MCLK"
    );
    assert_eq!(supply.state(), ClockState::Off);
}

#[test]
fn pll_failure_leaves_mclk_enabled_and_state_off() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    dai.fail_on = Some(HwOp::Synthesizer);
    let mut supply = ClockSupplyController::new(MockClock::new(&log));

    let result = supply.handle(&mut dai, PowerEvent::PowerUp);

    assert_eq!(result, Err(CardError::ClockConfigurationFailed));
    assert_eq!(supply.state(), ClockState::Off);
    assert_eq!(
        supply.clock().and_then(|c| c.is_enabled()),
        Some(true),
        "a failed PLL lock is not rolled back"
    );
    assert!(
        !log.ops().contains(&HwOp::ClockSource),
        "SYSCLK must not move to a PLL that failed to lock"
    );
}

#[test]
fn power_up_retries_after_pll_failure() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    dai.fail_on = Some(HwOp::Synthesizer);
    let mut supply = ClockSupplyController::new(MockClock::new(&log));
    let _ = supply.handle(&mut dai, PowerEvent::PowerUp);

    dai.fail_on = None;
    supply.handle(&mut dai, PowerEvent::PowerUp).unwrap();

    assert_eq!(supply.state(), ClockState::On);
    assert_eq!(dai.sysclk, Some(SysclkSource::Pll1));
}

#[test]
fn sysclk_switch_failure_on_power_up_reports_switch_error() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    dai.fail_on = Some(HwOp::ClockSource);
    let mut supply = ClockSupplyController::new(MockClock::new(&log));

    assert_eq!(
        supply.handle(&mut dai, PowerEvent::PowerUp),
        Err(CardError::ClockSourceSwitchFailed)
    );
    assert_eq!(supply.state(), ClockState::Off);
}

#[test]
fn failed_disable_is_reported_and_state_stays_on() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    let mut clock = MockClock::new(&log);
    clock.fail_disable = true;
    let mut supply = ClockSupplyController::new(clock);
    supply.handle(&mut dai, PowerEvent::PowerUp).unwrap();

    let result = supply.handle(&mut dai, PowerEvent::PowerDown);

    assert_eq!(result, Err(CardError::ClockReleaseFailed));
    assert_eq!(supply.state(), ClockState::On);
    assert_eq!(
        supply.clock().and_then(|c| c.is_enabled()),
        Some(true),
        "state must not read Off while MCLK still runs"
    );
    assert_eq!(
        dai.sysclk,
        Some(SysclkSource::Rcclk),
        "SYSCLK has already left PLL1"
    );
}

#[test]
fn missing_platform_clock_skips_only_the_gating() {
    let log = CallLog::new();
    let mut dai = MockCodecDai::new(&log);
    let mut supply = ClockSupplyController::without_clock();

    supply.handle(&mut dai, PowerEvent::PowerUp).unwrap();
    assert_eq!(
        log.calls().as_slice(),
        &[pll1_from_mclk(), sysclk(SysclkSource::Pll1)]
    );

    log.clear();
    supply.handle(&mut dai, PowerEvent::PowerDown).unwrap();
    assert_eq!(log.calls().as_slice(), &[sysclk(SysclkSource::Rcclk)]);
}

// ── Properties ───────────────────────────────────────────────────────────────

fn fault() -> impl Strategy<Value = Option<HwOp>> {
    prop_oneof![
        4 => Just(None),
        1 => Just(Some(HwOp::Synthesizer)),
        1 => Just(Some(HwOp::ClockSource)),
    ]
}

fn event() -> impl Strategy<Value = PowerEvent> {
    prop_oneof![Just(PowerEvent::PowerUp), Just(PowerEvent::PowerDown)]
}

proptest! {
    /// Replays the recorded calls and checks that the codec never selects
    /// PLL1 while MCLK is off, and MCLK is never gated under a PLL1 SYSCLK.
    #[test]
    fn codec_is_never_left_clockless(
        steps in proptest::collection::vec((event(), fault()), 1..40)
    ) {
        let log = CallLog::new();
        let mut dai = MockCodecDai::new(&log);
        let mut supply = ClockSupplyController::new(MockClock::new(&log));
        let mut mclk_on = false;
        let mut on_pll1 = false;

        for (event, fail_on) in steps {
            dai.fail_on = fail_on;
            let _ = supply.handle(&mut dai, event);

            // A failed call is recorded but has no effect on the hardware.
            let failed = dai.fail_on;
            for call in log.calls() {
                if Some(call.op()) == failed {
                    continue;
                }
                match call {
                    HwCall::ClockEnable => mclk_on = true,
                    HwCall::ClockDisable => {
                        prop_assert!(!on_pll1, "MCLK gated while SYSCLK runs from PLL1");
                        mclk_on = false;
                    }
                    HwCall::ClockSource { source: SysclkSource::Pll1, .. } => {
                        prop_assert!(mclk_on, "PLL1 selected without MCLK");
                        on_pll1 = true;
                    }
                    HwCall::ClockSource { .. } => on_pll1 = false,
                    _ => {}
                }
            }
            log.clear();
        }
    }

    #[test]
    fn state_is_on_only_after_a_complete_power_up(
        steps in proptest::collection::vec((event(), fault()), 1..20)
    ) {
        let log = CallLog::new();
        let mut dai = MockCodecDai::new(&log);
        let mut supply = ClockSupplyController::new(MockClock::new(&log));

        for (event, fail_on) in steps {
            dai.fail_on = fail_on;
            let before = supply.state();
            let result = supply.handle(&mut dai, event);

            match (before, event, result) {
                (ClockState::Off, PowerEvent::PowerUp, Ok(())) => {
                    prop_assert_eq!(supply.state(), ClockState::On);
                    prop_assert_eq!(dai.sysclk, Some(SysclkSource::Pll1));
                }
                (ClockState::On, PowerEvent::PowerDown, Ok(())) => {
                    prop_assert_eq!(supply.state(), ClockState::Off);
                    prop_assert_eq!(dai.sysclk, Some(SysclkSource::Rcclk));
                }
                (_, _, Err(_)) => prop_assert_eq!(supply.state(), before),
                _ => prop_assert_eq!(supply.state(), before),
            }
            log.clear();
        }
    }
}
