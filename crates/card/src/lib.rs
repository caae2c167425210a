//! Cherry Trail / Braswell RT5659 machine driver core
//!
//! Control logic of the sound card that joins the Atom SST/SOF DSP to a
//! Realtek RT5659 codec over an SSP port.
//!
//! # Architecture
//!
//! ```text
//! PlatformDescriptor ──► CardAssembly ──► CardTables (widgets, routes, controls, links)
//!                              │
//!                              ▼
//!                         MachineCard
//!          ┌──────────────────┼───────────────────┐
//!          ▼                  ▼                   ▼
//!  ClockSupplyController  StreamNegotiator   probe (connected path)
//!          │                  │
//!          ▼                  ▼
//!   PlatformClock + CodecDai (platform crate traits)
//! ```
//!
//! # Features
//!
//! - `defmt` - Log through defmt (hardware builds)
//! - `tracing` - Log through tracing (host builds)
//! - `std` - Enable the platform mocks for downstream tests
//!
//! # Example
//!
//! ```
//! use card::{MachineCard, PowerEvent};
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use platform::mocks::{CallLog, MockClock, MockCodecDai};
//! use platform::PlatformDescriptor;
//!
//! let log = CallLog::new();
//! let mut codec = MockCodecDai::new(&log);
//! let card: MachineCard<NoopRawMutex, _> =
//!     MachineCard::new(PlatformDescriptor::new(), Some(MockClock::new(&log))).unwrap();
//!
//! card.on_supply_event(&mut codec, PowerEvent::PowerUp).unwrap();
//! assert_eq!(card.clock_state(), card::ClockState::On);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)] // all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)] // widget and port names in doc comments
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::panic,
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects
    )
)]

// Must stay first: the logging macros reach later modules by textual scope.
#[macro_use]
mod fmt;

pub mod assembly;
pub mod clock_supply;
pub mod controls;
pub mod error;
pub mod links;
pub mod machine;
pub mod negotiator;
pub mod probe;
pub mod routing;
pub mod topology;

pub use assembly::{CardAssembly, CardTables};
pub use clock_supply::{ClockState, ClockSupplyController, PowerEvent};
pub use controls::{PinSwitch, PinSwitches};
pub use error::{CardError, InterfaceStep, LinkOutcome};
pub use links::{DaiLink, LinkKind};
pub use machine::MachineCard;
pub use negotiator::StreamNegotiator;
pub use probe::{describe_connected_path, ConnectedPath, PathNode};
pub use routing::{Endpoint, Route, RouteError, RoutingGraph, Widget, WidgetKind};
pub use topology::Topology;
