//! Diagnostic walk of the connected audio path.
//!
//! Starting from the front-end endpoints of the active topology, collects
//! every endpoint reachable along routes: downstream (source to sink) for
//! playback, upstream (sink to source) for capture. Endpoints whose pin
//! switch is off are neither listed nor walked through.

use platform::StreamDirection;

use crate::controls::PinSwitches;
use crate::routing::{Endpoint, Merged, RoutingGraph};

/// Maximum number of endpoints reported for one path.
pub const MAX_PATH_LEN: usize = 24;

/// One endpoint on a connected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PathNode {
    /// Endpoint name.
    pub name: &'static str,
    /// What the name resolves to.
    pub endpoint: Endpoint,
}

/// Endpoints reachable from the front end, in breadth-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedPath {
    direction: StreamDirection,
    nodes: heapless::Vec<PathNode, MAX_PATH_LEN>,
}

impl ConnectedPath {
    /// Direction the path was walked for.
    pub fn direction(&self) -> StreamDirection {
        self.direction
    }

    /// Endpoints in visit order.
    pub fn iter(&self) -> core::slice::Iter<'_, PathNode> {
        self.nodes.iter()
    }

    /// Number of endpoints.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if no front-end endpoint was reachable.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `name` is on the path.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }

    fn visit(&mut self, graph: &RoutingGraph<Merged>, pins: &PinSwitches, name: &'static str) {
        if self.contains(name) || !pins.is_enabled(name) {
            return;
        }
        let Some(endpoint) = graph.resolve(name) else {
            return;
        };
        if self.nodes.push(PathNode { name, endpoint }).is_err() {
            warn!("probe: path truncated at {}", name);
        }
    }
}

impl<'a> IntoIterator for &'a ConnectedPath {
    type Item = &'a PathNode;
    type IntoIter = core::slice::Iter<'a, PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walk `graph` from its topology's front-end endpoints in `direction`.
pub fn describe_connected_path(
    graph: &RoutingGraph<Merged>,
    pins: &PinSwitches,
    direction: StreamDirection,
) -> ConnectedPath {
    let mut path = ConnectedPath {
        direction,
        nodes: heapless::Vec::new(),
    };
    let Some(topology) = graph.topology() else {
        return path;
    };

    for &name in topology.front_end_endpoints(direction) {
        path.visit(graph, pins, name);
    }

    // The node list doubles as the BFS queue.
    let mut cursor = 0_usize;
    while let Some(current) = path.nodes.get(cursor).map(|n| n.name) {
        match direction {
            StreamDirection::Playback => {
                for next in graph.sinks_of(current) {
                    path.visit(graph, pins, next);
                }
            }
            StreamDirection::Capture => {
                for next in graph.sources_of(current) {
                    path.visit(graph, pins, next);
                }
            }
        }
        cursor = cursor.saturating_add(1);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Route, Widget, WidgetKind};
    use crate::topology::Topology;

    fn graph() -> RoutingGraph<Merged> {
        let mut g = RoutingGraph::new();
        g.add_widgets(&[Widget::headphone("Headphone")]).unwrap();
        g.declare_external(&["AIF1 Playback", "AIF1 Capture", "HPOL"])
            .unwrap();
        g.add_widgets(&[Widget::supply(
            "Platform Clock",
            crate::routing::SupplyEvents::BOTH,
        )])
        .unwrap();
        // Lets the walk continue past the codec stream for this test.
        g.add_routes(&[
            Route::new("HPOL", "AIF1 Playback"),
            Route::new("Headphone", "HPOL"),
        ])
        .unwrap();
        g.merge_routes(Topology::TransportB).unwrap()
    }

    #[test]
    fn playback_walks_downstream_to_the_headphone() {
        let pins = PinSwitches::new(&["Headphone"]);
        let path = describe_connected_path(&graph(), &pins, StreamDirection::Playback);

        let names: heapless::Vec<&str, MAX_PATH_LEN> = path.iter().map(|n| n.name).collect();
        assert_eq!(
            names.as_slice(),
            &["codec_out0", "codec_out1", "ssp2 Tx", "AIF1 Playback", "HPOL", "Headphone"]
        );
        assert_eq!(
            path.iter().last().map(|n| n.endpoint),
            Some(Endpoint::Widget(WidgetKind::Headphone))
        );
    }

    #[test]
    fn disabled_pin_is_excluded() {
        let mut pins = PinSwitches::new(&["Headphone"]);
        pins.set("Headphone", false);
        let path = describe_connected_path(&graph(), &pins, StreamDirection::Playback);
        assert!(!path.contains("Headphone"));
        assert!(path.contains("HPOL"));
    }

    #[test]
    fn capture_walks_upstream_to_the_supply() {
        let path = describe_connected_path(&graph(), &PinSwitches::default(), StreamDirection::Capture);
        assert!(path.contains("ssp2 Rx"));
        assert!(path.contains("AIF1 Capture"));
        assert!(path.contains("Platform Clock"));
        assert!(!path.contains("ssp2 Tx"));
    }

    #[test]
    fn path_can_be_iterated_twice() {
        let path = describe_connected_path(&graph(), &PinSwitches::default(), StreamDirection::Playback);
        let first = path.iter().count();
        let copy = path.clone();
        assert_eq!(first, (&copy).into_iter().count());
        assert_eq!(first, path.len());
    }
}
