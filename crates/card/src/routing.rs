//! Card routing graph
//!
//! Holds the card widgets, the external endpoints they connect to (codec pins,
//! codec stream widgets, DSP/SSP widgets) and the directed routes between
//! them. Every route endpoint must be declared before the route is added.
//!
//! The graph is built in two phases tracked at the type level:
//!
//! ```text
//! RoutingGraph<Static>  --merge_routes(topology)-->  RoutingGraph<Merged>
//! ```
//!
//! `merge_routes` consumes the static graph, so the topology edge-set can only
//! be installed once.

use core::marker::PhantomData;

use thiserror_no_std::Error;

use crate::topology::Topology;

/// Maximum number of card widgets.
pub const MAX_WIDGETS: usize = 8;

/// Maximum number of declared external endpoints.
pub const MAX_EXTERNAL_ENDPOINTS: usize = 32;

/// Maximum number of routes (static plus topology).
pub const MAX_ROUTES: usize = 32;

/// Kind of a card widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetKind {
    /// Headphone output.
    Headphone,
    /// Microphone input.
    Microphone,
    /// Speaker output.
    Speaker,
    /// Power supply with power-event notifications.
    Supply,
}

impl WidgetKind {
    /// Short label for logs and tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Headphone => "headphone",
            Self::Microphone => "mic",
            Self::Speaker => "speaker",
            Self::Supply => "supply",
        }
    }
}

/// Power events a supply widget subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupplyEvents {
    /// Notify before the path powers up.
    pub pre_power_up: bool,
    /// Notify after the path powered down.
    pub post_power_down: bool,
}

impl SupplyEvents {
    /// Both edges.
    pub const BOTH: Self = Self {
        pre_power_up: true,
        post_power_down: true,
    };
}

/// A card-level widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Widget {
    /// Unique widget name.
    pub name: &'static str,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Subscribed power events (supply widgets only).
    pub events: SupplyEvents,
}

impl Widget {
    /// Headphone widget.
    pub const fn headphone(name: &'static str) -> Self {
        Self::plain(name, WidgetKind::Headphone)
    }

    /// Microphone widget.
    pub const fn mic(name: &'static str) -> Self {
        Self::plain(name, WidgetKind::Microphone)
    }

    /// Speaker widget.
    pub const fn speaker(name: &'static str) -> Self {
        Self::plain(name, WidgetKind::Speaker)
    }

    /// Supply widget notified on `events`.
    pub const fn supply(name: &'static str, events: SupplyEvents) -> Self {
        Self {
            name,
            kind: WidgetKind::Supply,
            events,
        }
    }

    const fn plain(name: &'static str, kind: WidgetKind) -> Self {
        Self {
            name,
            kind,
            events: SupplyEvents {
                pre_power_up: false,
                post_power_down: false,
            },
        }
    }
}

/// Directed route: audio (or supply) flows from `source` into `sink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Route {
    /// Destination endpoint.
    pub sink: &'static str,
    /// Origin endpoint.
    pub source: &'static str,
}

impl Route {
    /// Route from `source` into `sink`.
    pub const fn new(sink: &'static str, source: &'static str) -> Self {
        Self { sink, source }
    }
}

/// What a route endpoint name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    /// A card widget.
    Widget(WidgetKind),
    /// Declared outside the card (codec pin, codec stream, DSP widget).
    External,
}

/// Routing table construction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RouteError {
    /// A route names an endpoint that was never declared.
    #[error("route endpoint `{0}` is not declared")]
    UnknownEndpoint(&'static str),

    /// Two widgets or endpoints share a name.
    #[error("endpoint `{0}` declared twice")]
    DuplicateWidget(&'static str),

    /// A fixed-capacity table is full.
    #[error("routing table capacity exceeded")]
    CapacityExceeded,
}

/// Graph state before the topology edge-set is merged.
#[derive(Debug)]
pub struct Static;

/// Graph state after the topology edge-set is merged.
#[derive(Debug)]
pub struct Merged;

/// Widgets, declared endpoints and routes of one card.
#[derive(Debug)]
pub struct RoutingGraph<State> {
    widgets: heapless::Vec<Widget, MAX_WIDGETS>,
    externals: heapless::Vec<&'static str, MAX_EXTERNAL_ENDPOINTS>,
    routes: heapless::Vec<Route, MAX_ROUTES>,
    topology: Option<Topology>,
    _state: PhantomData<State>,
}

impl RoutingGraph<Static> {
    /// Empty graph.
    pub fn new() -> Self {
        Self {
            widgets: heapless::Vec::new(),
            externals: heapless::Vec::new(),
            routes: heapless::Vec::new(),
            topology: None,
            _state: PhantomData,
        }
    }

    /// Add card widgets.
    ///
    /// Nothing is added if any name is already taken or the table would
    /// overflow.
    pub fn add_widgets(&mut self, widgets: &[Widget]) -> Result<(), RouteError> {
        self.check_new_names(
            widgets.iter().map(|w| w.name),
            widgets.len(),
            self.widgets.len(),
            MAX_WIDGETS,
        )?;
        for widget in widgets {
            self.widgets
                .push(*widget)
                .map_err(|_| RouteError::CapacityExceeded)?;
        }
        Ok(())
    }

    /// Declare endpoints owned by other components (codec pins, streams).
    pub fn declare_external(&mut self, names: &[&'static str]) -> Result<(), RouteError> {
        self.declare(names)
    }

    /// Add routes whose endpoints are all declared.
    ///
    /// Nothing is added if any endpoint is unknown or the table would overflow.
    pub fn add_routes(&mut self, routes: &[Route]) -> Result<(), RouteError> {
        self.extend_routes(routes)
    }

    /// Install the topology edge-set and freeze the graph.
    ///
    /// Declares the topology's DSP endpoints first, then adds its routes.
    pub fn merge_routes(mut self, topology: Topology) -> Result<RoutingGraph<Merged>, RouteError> {
        self.declare(topology.dsp_endpoints())?;
        self.extend_routes(topology.routes())?;
        debug!(
            "routing: merged {} edges for {}",
            topology.routes().len(),
            topology.as_str()
        );
        Ok(RoutingGraph {
            widgets: self.widgets,
            externals: self.externals,
            routes: self.routes,
            topology: Some(topology),
            _state: PhantomData,
        })
    }

    fn declare(&mut self, names: &[&'static str]) -> Result<(), RouteError> {
        self.check_new_names(
            names.iter().copied(),
            names.len(),
            self.externals.len(),
            MAX_EXTERNAL_ENDPOINTS,
        )?;
        for name in names {
            self.externals
                .push(*name)
                .map_err(|_| RouteError::CapacityExceeded)?;
        }
        Ok(())
    }

    fn extend_routes(&mut self, routes: &[Route]) -> Result<(), RouteError> {
        if routes.len() > MAX_ROUTES.saturating_sub(self.routes.len()) {
            error!("routing: {} routes do not fit", routes.len());
            return Err(RouteError::CapacityExceeded);
        }
        for route in routes {
            for name in [route.sink, route.source] {
                if self.resolve(name).is_none() {
                    error!("routing: undeclared endpoint {}", name);
                    return Err(RouteError::UnknownEndpoint(name));
                }
            }
        }
        for route in routes {
            self.routes
                .push(*route)
                .map_err(|_| RouteError::CapacityExceeded)?;
        }
        Ok(())
    }

    fn check_new_names(
        &self,
        names: impl Iterator<Item = &'static str> + Clone,
        count: usize,
        used: usize,
        capacity: usize,
    ) -> Result<(), RouteError> {
        if count > capacity.saturating_sub(used) {
            error!("routing: {} endpoints do not fit", count);
            return Err(RouteError::CapacityExceeded);
        }
        for (i, name) in names.clone().enumerate() {
            let repeated_in_batch = names.clone().take(i).any(|n| n == name);
            if repeated_in_batch || self.resolve(name).is_some() {
                error!("routing: duplicate endpoint {}", name);
                return Err(RouteError::DuplicateWidget(name));
            }
        }
        Ok(())
    }
}

impl Default for RoutingGraph<Static> {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingGraph<Merged> {
    /// Topology whose edge-set was merged.
    pub fn topology(&self) -> Option<Topology> {
        self.topology
    }
}

impl<State> RoutingGraph<State> {
    /// Card widgets, in insertion order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Declared external endpoints, in insertion order.
    pub fn external_endpoints(&self) -> &[&'static str] {
        &self.externals
    }

    /// All routes, in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a card widget by name.
    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    /// Resolve an endpoint name.
    pub fn resolve(&self, name: &str) -> Option<Endpoint> {
        if let Some(w) = self.widget(name) {
            return Some(Endpoint::Widget(w.kind));
        }
        self.externals
            .iter()
            .any(|n| *n == name)
            .then_some(Endpoint::External)
    }

    /// Endpoints fed directly by `source`.
    pub fn sinks_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.routes
            .iter()
            .filter(move |r| r.source == source)
            .map(|r| r.sink)
    }

    /// Endpoints feeding `sink` directly.
    pub fn sources_of<'a>(&'a self, sink: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.routes
            .iter()
            .filter(move |r| r.sink == sink)
            .map(|r| r.source)
    }
}
