//! Pin switches: user controls that connect or disconnect a card endpoint.

/// Maximum number of pin switches on a card.
pub const MAX_PIN_SWITCHES: usize = 8;

/// One pin switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSwitch {
    /// Widget the switch controls.
    pub pin: &'static str,
    /// Whether the pin is connected.
    pub enabled: bool,
}

/// Table of pin switches, all enabled at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinSwitches {
    switches: heapless::Vec<PinSwitch, MAX_PIN_SWITCHES>,
}

impl PinSwitches {
    /// Switches for `pins`; names beyond [`MAX_PIN_SWITCHES`] are dropped.
    pub fn new(pins: &[&'static str]) -> Self {
        let mut switches = heapless::Vec::new();
        for pin in pins {
            if switches.len() < switches.capacity() {
                let _ = switches.push(PinSwitch {
                    pin: *pin,
                    enabled: true,
                });
            }
        }
        Self { switches }
    }

    /// Set a pin's state. Returns `false` if `pin` has no switch.
    pub fn set(&mut self, pin: &str, enabled: bool) -> bool {
        match self.switches.iter_mut().find(|s| s.pin == pin) {
            Some(switch) => {
                switch.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Whether `pin` is connected. Endpoints without a switch always are.
    pub fn is_enabled(&self, pin: &str) -> bool {
        self.switches
            .iter()
            .find(|s| s.pin == pin)
            .map_or(true, |s| s.enabled)
    }

    /// All switches in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &PinSwitch> {
        self.switches.iter()
    }

    /// Number of switches.
    pub fn len(&self) -> usize {
        self.switches.len()
    }

    /// `true` if the card has no switches.
    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}
