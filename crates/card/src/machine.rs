//! Runtime card: the assembled tables plus the state power and stream
//! callbacks act on.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use platform::{CodecDai, HwParams, PlatformClock, PlatformDescriptor, StreamDirection};

use crate::assembly::{CardAssembly, CardTables};
use crate::clock_supply::{ClockState, ClockSupplyController, PowerEvent};
use crate::controls::PinSwitches;
use crate::error::{CardError, LinkOutcome};
use crate::negotiator::StreamNegotiator;
use crate::probe::{self, ConnectedPath};
use crate::routing::RouteError;
use crate::topology::{Topology, PLATFORM_CLOCK_WIDGET};

/// One registered card.
///
/// Shared by reference between the power framework and stream callbacks.
/// Clock-supply transitions and pin changes are serialised by `M`
/// (`CriticalSectionRawMutex` on target, `NoopRawMutex` when all callers run
/// in one context).
pub struct MachineCard<M: RawMutex, C: PlatformClock> {
    tables: CardTables,
    negotiator: StreamNegotiator,
    supply: Mutex<M, RefCell<ClockSupplyController<C>>>,
    pins: Mutex<M, RefCell<PinSwitches>>,
}

impl<M: RawMutex, C: PlatformClock> MachineCard<M, C> {
    /// Assemble the card for `descriptor`, gating `clock` if present.
    pub fn new(descriptor: PlatformDescriptor, clock: Option<C>) -> Result<Self, RouteError> {
        let tables = CardAssembly::new(descriptor.clone()).assemble()?;
        let negotiator = StreamNegotiator::new(tables.topology, descriptor.primary_dai);
        let pins = tables.controls.clone();
        Ok(Self {
            tables,
            negotiator,
            supply: Mutex::new(RefCell::new(ClockSupplyController::from_option(clock))),
            pins: Mutex::new(RefCell::new(pins)),
        })
    }

    /// Assembled tables.
    pub fn tables(&self) -> &CardTables {
        &self.tables
    }

    /// Topology fixed at assembly.
    pub fn topology(&self) -> Topology {
        self.tables.topology
    }

    /// Current clock-supply state.
    pub fn clock_state(&self) -> ClockState {
        self.supply.lock(|s| s.borrow().state())
    }

    /// Whether the platform clock is running, if a clock is present and can
    /// tell.
    pub fn platform_clock_enabled(&self) -> Option<bool> {
        self.supply
            .lock(|s| s.borrow().clock().and_then(|c| c.is_enabled()))
    }

    /// Power event on the "Platform Clock" supply widget.
    pub fn on_supply_event<D: CodecDai>(&self, dai: &mut D, event: PowerEvent) -> Result<(), CardError> {
        let subscribed = self
            .tables
            .graph
            .widget(PLATFORM_CLOCK_WIDGET)
            .is_some_and(|w| event.is_subscribed(w.events));
        if !subscribed {
            return Ok(());
        }
        self.supply.lock(|s| s.borrow_mut().handle(dai, event))
    }

    /// Back-end parameter fixup.
    pub fn be_hw_params_fixup(&self, params: &mut HwParams) {
        debug!("card: fixup for {}", self.tables.topology.back_end_link_name());
        self.negotiator.fixup(params);
    }

    /// Back-end link configuration on `dai`.
    pub fn be_hw_params<D: CodecDai>(&self, dai: &mut D, params: &HwParams) -> Result<LinkOutcome, CardError> {
        self.negotiator.configure_link(dai, params)
    }

    /// Front-end stream start-up: logs the connected path and restricts the
    /// stream to 48 kHz.
    pub fn fe_startup(&self, direction: StreamDirection, params: &mut HwParams) -> ConnectedPath {
        let path = self.describe_connected_path(direction);
        info!("card: {} start-up, {} endpoints connected", direction.as_str(), path.len());
        for node in &path {
            debug!("card:   {}", node.name);
        }
        self.negotiator.constrain_front_end(params);
        path
    }

    /// Endpoints currently reachable from the front end.
    pub fn describe_connected_path(&self, direction: StreamDirection) -> ConnectedPath {
        self.pins
            .lock(|p| probe::describe_connected_path(&self.tables.graph, &p.borrow(), direction))
    }

    /// Connect or disconnect a pin. Returns `false` if `pin` has no switch.
    pub fn set_pin(&self, pin: &str, enabled: bool) -> bool {
        self.pins.lock(|p| p.borrow_mut().set(pin, enabled))
    }

    /// Whether `pin` is connected.
    pub fn pin_enabled(&self, pin: &str) -> bool {
        self.pins.lock(|p| p.borrow().is_enabled(pin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use platform::mocks::{CallLog, MockClock, MockCodecDai};
    use platform::{Interval, PcmFormat};

    #[test]
    fn supply_events_drive_the_controller() {
        let log = CallLog::new();
        let mut dai = MockCodecDai::new(&log);
        let card: MachineCard<NoopRawMutex, _> =
            MachineCard::new(PlatformDescriptor::new(), Some(MockClock::new(&log))).unwrap();

        card.on_supply_event(&mut dai, PowerEvent::PowerUp).unwrap();
        assert_eq!(card.clock_state(), ClockState::On);
        assert_eq!(card.platform_clock_enabled(), Some(true));

        card.on_supply_event(&mut dai, PowerEvent::PowerDown).unwrap();
        assert_eq!(card.clock_state(), ClockState::Off);
        assert_eq!(card.platform_clock_enabled(), Some(false));
    }

    #[test]
    fn fe_startup_constrains_rate_and_reports_path() {
        let log = CallLog::new();
        let card: MachineCard<NoopRawMutex, _> =
            MachineCard::new(PlatformDescriptor::new(), Some(MockClock::new(&log))).unwrap();
        let mut params = HwParams::new(Interval::new(8_000, 96_000), Interval::new(1, 2), PcmFormat::S16Le);

        let path = card.fe_startup(StreamDirection::Playback, &mut params);

        assert_eq!(params.rate, Interval::single(48_000));
        assert!(path.contains("codec_out0"));
        assert!(path.contains("AIF1 Playback"));
    }

    #[test]
    fn pin_changes_are_visible_to_the_probe() {
        let card: MachineCard<NoopRawMutex, MockClock<'_>> =
            MachineCard::new(PlatformDescriptor::new(), None).unwrap();
        assert!(card.describe_connected_path(StreamDirection::Capture).contains("ssp2 Rx"));

        assert!(card.set_pin("Headphone", false));
        assert!(!card.pin_enabled("Headphone"));
        assert!(!card.set_pin("HPOL", false));
    }
}
