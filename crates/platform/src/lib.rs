//! Hardware Abstraction Layer (HAL) for the Cherry Trail RT5659 machine driver
//!
//! This crate provides trait-based abstractions for the hardware the machine
//! driver controls, enabling development and testing without a board.
//!
//! # Architecture Layers
//!
//! ```text
//! Machine driver (card crate: routing, clock supply, negotiation)
//!         ↓
//! Platform HAL (this crate - trait abstractions + value types)
//!         ↓
//! Codec driver / PMC clock provider
//! ```
//!
//! # Abstractions
//!
//! - [`PlatformClock`] - Gate for the external reference clock (MCLK)
//! - [`CodecDai`] - Codec digital audio interface programming
//! - [`clock_config`] - Codec clock-tree identifiers and board frequencies
//! - [`audio_types`] - PCM parameter sets and stream directions
//! - [`config`] - Per-device platform descriptor
//!
//! # Features
//!
//! - `std`: Enable the recording mocks in [`mocks`] (for testing)
//! - `defmt`: Enable defmt logging derives
//! - `serde`: Deserialize [`PlatformDescriptor`] from configuration files
//!
//! # Example
//!
//! ```no_run
//! use platform::{CodecDai, PllConfig};
//!
//! fn lock_pll<D: CodecDai>(dai: &mut D) -> Result<(), D::Error> {
//!     dai.configure_synthesizer(PllConfig::from_platform_clock(48_000))
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::must_use_candidate)] // plain accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod audio_types;
pub mod clock;
pub mod clock_config;
pub mod config;
pub mod dai;
pub mod mocks;

// Re-export main high-level traits
pub use clock::{NoPlatformClock, PlatformClock};
pub use dai::{ClockInversion, ClockProvider, CodecDai, DaiFormat, DaiProtocol, TdmSlots};

// Re-export value types
pub use audio_types::{HwParams, Interval, OutOfRangeError, PcmFormat, SampleRateHz, StreamDirection};
pub use clock_config::{ClockDirection, PllConfig, PllId, PllSource, SysclkSource};
pub use config::{Name, NameTooLong, PlatformDescriptor};
