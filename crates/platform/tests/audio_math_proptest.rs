//! Property-based tests for stream and clock math.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.

use platform::{Interval, PllConfig, SampleRateHz};

proptest::proptest! {
    /// SampleRateHz::new never panics for any u32 input.
    #[test]
    fn sample_rate_hz_new_never_panics(hz in 0u32..=u32::MAX) {
        let _ = SampleRateHz::new(hz);
    }

    /// Every valid rate yields a 512 fs SYSCLK without saturating.
    #[test]
    fn sysclk_of_valid_rate_is_exact(hz in 8_000u32..=192_000u32) {
        let sr = SampleRateHz::new(hz).unwrap();
        assert_eq!(u64::from(sr.sysclk_hz(512)), u64::from(hz) * 512);
    }

    /// PLL target is always 512 × rate (saturating for absurd rates).
    #[test]
    fn pll_target_is_512_fs(hz in 0u32..=u32::MAX) {
        let cfg = PllConfig::from_platform_clock(hz);
        let expected = u64::from(hz) * 512;
        assert_eq!(u64::from(cfg.freq_out), expected.min(u64::from(u32::MAX)));
    }

    /// After set_single the interval contains exactly that value.
    #[test]
    fn set_single_collapses_any_interval(a in 0u32..=u32::MAX, b in 0u32..=u32::MAX, v in 0u32..=u32::MAX) {
        let mut i = Interval::new(a.min(b), a.max(b));
        i.set_single(v);
        assert!(i.is_single());
        assert!(i.contains(v));
    }
}
