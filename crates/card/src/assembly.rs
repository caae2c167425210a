//! Card assembly.
//!
//! Runs once per device: selects the topology from the descriptor, installs
//! the fixed widgets and routes, merges the topology edge-set and builds the
//! control and link tables. The result is plain data owned by the card.

use platform::PlatformDescriptor;

use crate::controls::PinSwitches;
use crate::links::{build_links, DaiLink, LINK_COUNT};
use crate::routing::{Merged, Route, RouteError, RoutingGraph, SupplyEvents, Widget};
use crate::topology::{Topology, CODEC_CAPTURE_STREAM, CODEC_PLAYBACK_STREAM, PLATFORM_CLOCK_WIDGET};

/// Card-level widgets.
pub static CARD_WIDGETS: [Widget; 5] = [
    Widget::headphone("Headphone"),
    Widget::mic("Headset Mic"),
    Widget::mic("Int Mic"),
    Widget::speaker("Ext Spk"),
    Widget::supply(PLATFORM_CLOCK_WIDGET, SupplyEvents::BOTH),
];

/// Codec pins and stream widgets the card routes refer to.
pub static CODEC_ENDPOINTS: [&str; 14] = [
    "IN1P",
    "IN1N",
    "IN3P",
    "IN3N",
    "IN4P",
    "IN4N",
    "MICBIAS2",
    "MICBIAS3",
    "HPOL",
    "HPOR",
    "SPOL",
    "SPOR",
    CODEC_PLAYBACK_STREAM,
    CODEC_CAPTURE_STREAM,
];

/// Routes installed on every board.
pub static CARD_ROUTES: [Route; 12] = [
    Route::new("IN1P", "Headset Mic"),
    Route::new("IN1N", "Headset Mic"),
    Route::new("IN3P", "Int Mic"),
    Route::new("IN3N", "Int Mic"),
    Route::new("IN4P", "Int Mic"),
    Route::new("IN4N", "Int Mic"),
    Route::new("Int Mic", "MICBIAS2"),
    Route::new("Int Mic", "MICBIAS3"),
    Route::new("Headphone", "HPOL"),
    Route::new("Headphone", "HPOR"),
    Route::new("Ext Spk", "SPOL"),
    Route::new("Ext Spk", "SPOR"),
];

/// Widgets exposed as pin switches.
pub static PIN_SWITCH_PINS: [&str; 4] = ["Headphone", "Headset Mic", "Int Mic", "Ext Spk"];

/// Codec outputs kept powered across suspend.
pub static IGNORE_SUSPEND_ENDPOINTS: [&str; 4] = ["HPOL", "HPOR", "SPOL", "SPOR"];

/// Everything the card registers, built once.
#[derive(Debug)]
pub struct CardTables {
    /// Card name.
    pub name: &'static str,
    /// Driver name, if it differs from the card name.
    pub driver_name: Option<&'static str>,
    /// Selected topology.
    pub topology: Topology,
    /// Widgets and routes with the topology merged.
    pub graph: RoutingGraph<Merged>,
    /// Pin switches in their initial (all enabled) state.
    pub controls: PinSwitches,
    /// DAI links.
    pub links: [DaiLink; LINK_COUNT],
    /// Endpoints kept powered across suspend.
    pub ignore_suspend: &'static [&'static str],
}

/// Builds [`CardTables`] from a platform descriptor.
#[derive(Debug, Clone)]
pub struct CardAssembly {
    descriptor: PlatformDescriptor,
}

impl CardAssembly {
    /// Assembly for `descriptor`.
    pub fn new(descriptor: PlatformDescriptor) -> Self {
        Self { descriptor }
    }

    /// Descriptor the card is built from.
    pub fn descriptor(&self) -> &PlatformDescriptor {
        &self.descriptor
    }

    /// Topology this descriptor selects.
    pub fn topology(&self) -> Topology {
        Topology::select(self.descriptor.use_legacy_transport)
    }

    /// Build the card tables.
    ///
    /// Fails only if the fixed tables are inconsistent with the routing graph.
    pub fn assemble(&self) -> Result<CardTables, RouteError> {
        let topology = self.topology();

        let mut graph = RoutingGraph::new();
        graph.add_widgets(&CARD_WIDGETS)?;
        graph.declare_external(&CODEC_ENDPOINTS)?;
        graph.add_routes(&CARD_ROUTES)?;
        let graph = graph.merge_routes(topology)?;

        let name = self.descriptor.card_name();
        info!(
            "card {}: {} routes over {}, codec {}",
            name,
            graph.routes().len(),
            topology.back_end_link_name(),
            self.descriptor.codec_name.as_str()
        );

        Ok(CardTables {
            name,
            driver_name: self.descriptor.driver_name(),
            topology,
            graph,
            controls: PinSwitches::new(&PIN_SWITCH_PINS),
            links: build_links(&self.descriptor, topology),
            ignore_suspend: &IGNORE_SUSPEND_ENDPOINTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_assembles_transport_b() {
        let tables = CardAssembly::new(PlatformDescriptor::new())
            .assemble()
            .unwrap();

        assert_eq!(tables.topology, Topology::TransportB);
        assert_eq!(tables.name, "cht-bsw-rt5659");
        assert_eq!(tables.graph.routes().len(), CARD_ROUTES.len() + 8);
        assert_eq!(tables.graph.widgets().len(), 5);
        assert_eq!(tables.controls.len(), 4);
    }

    #[test]
    fn legacy_board_gets_only_ssp0_routes() {
        let tables = CardAssembly::new(PlatformDescriptor::new().with_legacy_transport(true))
            .assemble()
            .unwrap();

        assert_eq!(tables.graph.topology(), Some(Topology::TransportA));
        assert!(tables.graph.routes().iter().all(|r| !r.source.starts_with("ssp2")
            && !r.sink.starts_with("ssp2")));
        assert!(tables
            .graph
            .routes()
            .iter()
            .any(|r| r.sink == "ssp0 Tx" && r.source == "modem_out"));
    }

    #[test]
    fn static_routes_are_installed_for_both_topologies() {
        for legacy in [false, true] {
            let tables = CardAssembly::new(PlatformDescriptor::new().with_legacy_transport(legacy))
                .assemble()
                .unwrap();
            for route in &CARD_ROUTES {
                assert!(tables.graph.routes().contains(route), "missing {route:?}");
            }
        }
    }

    #[test]
    fn sof_parent_renames_the_card() {
        let tables = CardAssembly::new(PlatformDescriptor::new().with_sof_parent(true))
            .assemble()
            .unwrap();
        assert_eq!(tables.name, "bytcht rt5659");
        assert_eq!(tables.driver_name, Some("SOF"));
    }
}
