//! Router records and the state store that owns them.

use std::fmt;
use std::net::Ipv4Addr;

use routersim_types::config::{RouterSimConfig, is_valid_hostname};
use routersim_types::error::{Result, RouterSimError};

use crate::addr::Ipv4Net;

/// A physical interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub address: Option<Ipv4Net>,
    pub description: Option<String>,
    /// Administrative state. Interfaces boot shut down.
    pub up: bool,
}

impl Interface {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            address: None,
            description: None,
            up: false,
        }
    }

    /// The connected subnet, if the interface is up and addressed.
    pub fn connected(&self) -> Option<Ipv4Net> {
        if self.up { self.address } else { None }
    }
}

/// Where a static route forwards traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextHop {
    Address(Ipv4Addr),
    Interface(String),
}

impl fmt::Display for NextHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextHop::Address(ip) => write!(f, "{ip}"),
            NextHop::Interface(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    /// Destination subnet, host bits cleared.
    pub network: Ipv4Net,
    pub next_hop: NextHop,
}

/// A `network <address> <wildcard> area <id>` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OspfNetwork {
    pub address: Ipv4Addr,
    pub wildcard: Ipv4Addr,
    pub area: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OspfProcess {
    pub process_id: u32,
    pub router_id: Option<Ipv4Addr>,
    pub networks: Vec<OspfNetwork>,
}

impl OspfProcess {
    fn new(process_id: u32) -> Self {
        Self {
            process_id,
            router_id: None,
            networks: Vec::new(),
        }
    }

    /// Add a network statement. Returns `false` if it was already present.
    pub fn add_network(&mut self, network: OspfNetwork) -> bool {
        if self.networks.contains(&network) {
            return false;
        }
        self.networks.push(network);
        true
    }

    /// Remove a network statement. Returns `false` if it was not configured.
    pub fn remove_network(&mut self, network: &OspfNetwork) -> bool {
        let before = self.networks.len();
        self.networks.retain(|n| n != network);
        self.networks.len() != before
    }
}

/// An OSPF adjacency as shown by `show ip ospf neighbor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OspfNeighbor {
    pub neighbor_id: Ipv4Addr,
    pub priority: u8,
    pub state: String,
    pub address: Ipv4Addr,
    pub interface: String,
}

/// `line console 0` settings. Stored and rendered, never enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineConsole {
    pub password: Option<String>,
    pub login: bool,
}

/// Origin of a routing table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RouteSource {
    Connected,
    Local,
    Static,
}

impl RouteSource {
    /// Single-letter code used by `show ip route`.
    pub fn code(&self) -> char {
        match self {
            RouteSource::Connected => 'C',
            RouteSource::Local => 'L',
            RouteSource::Static => 'S',
        }
    }
}

/// One line of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub source: RouteSource,
    pub network: Ipv4Net,
    pub via: Option<Ipv4Addr>,
    pub interface: Option<String>,
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}        {}", self.source.code(), self.network)?;
        match (&self.via, &self.interface) {
            (Some(via), _) => write!(f, " [1/0] via {via}"),
            (None, Some(iface)) => write!(f, " is directly connected, {iface}"),
            (None, None) => Ok(()),
        }
    }
}

/// The simulated router: every configurable record plus the saved startup
/// configuration.
#[derive(Debug, Clone)]
pub struct RouterCore {
    pub(crate) hostname: String,
    pub(crate) version: String,
    pub(crate) interfaces: Vec<Interface>,
    pub(crate) static_routes: Vec<StaticRoute>,
    pub(crate) ospf: Vec<OspfProcess>,
    pub(crate) ospf_neighbors: Vec<OspfNeighbor>,
    pub(crate) line_console: LineConsole,
    pub(crate) enable_secret: Option<String>,
    pub(crate) banner_motd: Option<String>,
    pub(crate) startup_config: Option<String>,
}

impl RouterCore {
    /// Build the boot-time state described by a configuration.
    pub fn new(config: &RouterSimConfig) -> Self {
        Self {
            hostname: config.hostname.clone(),
            version: config.version.clone(),
            interfaces: config.interfaces.iter().map(|n| Interface::new(n)).collect(),
            static_routes: Vec::new(),
            ospf: Vec::new(),
            ospf_neighbors: Vec::new(),
            line_console: LineConsole::default(),
            enable_secret: None,
            banner_motd: config.banner_motd.clone(),
            startup_config: None,
        }
    }

    // -- Identity --

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Rename the router. Uses the same rule as the configuration file.
    pub fn set_hostname(&mut self, name: &str) -> Result<()> {
        if !is_valid_hostname(name) {
            return Err(RouterSimError::Command(
                "Hostname contains one or more illegal characters.".to_string(),
            ));
        }
        self.hostname = name.to_string();
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn enable_secret(&self) -> Option<&str> {
        self.enable_secret.as_deref()
    }

    pub fn set_enable_secret(&mut self, secret: Option<String>) {
        self.enable_secret = secret;
    }

    pub fn banner_motd(&self) -> Option<&str> {
        self.banner_motd.as_deref()
    }

    pub fn set_banner_motd(&mut self, banner: Option<String>) {
        self.banner_motd = banner;
    }

    pub fn line_console(&self) -> &LineConsole {
        &self.line_console
    }

    pub fn line_console_mut(&mut self) -> &mut LineConsole {
        &mut self.line_console
    }

    // -- Interfaces --

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// Find an interface by full name or IOS-style abbreviation.
    ///
    /// The alphabetic type prefix is matched case-insensitively against the
    /// start of each interface type (`g`, `gig`, `GigabitEthernet`); the
    /// numeric suffix must match exactly. Ambiguous prefixes resolve to
    /// nothing.
    pub fn resolve_interface(&self, name: &str) -> Option<&Interface> {
        if let Some(exact) = self
            .interfaces
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name))
        {
            return Some(exact);
        }

        let (kind, number) = split_interface_name(name);
        if kind.is_empty() || number.is_empty() {
            return None;
        }
        let kind = kind.to_ascii_lowercase();
        let mut candidates = self.interfaces.iter().filter(|i| {
            let (iface_kind, iface_number) = split_interface_name(&i.name);
            iface_number == number && iface_kind.to_ascii_lowercase().starts_with(&kind)
        });
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Look up an interface by its exact (canonical) name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    fn interface_mut(&mut self, name: &str) -> Result<&mut Interface> {
        self.interfaces
            .iter_mut()
            .find(|i| i.name == name)
            .ok_or_else(|| RouterSimError::Command(format!("Invalid interface: {name}")))
    }

    /// Assign an address, rejecting subnets that overlap another interface.
    pub fn set_interface_address(&mut self, name: &str, address: Ipv4Net) -> Result<()> {
        let is_network_address = address.address == address.network() && address.prefix_len() < 31;
        if address.prefix_len() == 0 || is_network_address {
            return Err(RouterSimError::Command(format!(
                "Bad mask /{} for address {}",
                address.prefix_len(),
                address.address
            )));
        }
        if let Some(other) = self.interfaces.iter().find(|i| {
            i.name != name && i.address.is_some_and(|existing| existing.overlaps(&address))
        }) {
            return Err(RouterSimError::Command(format!(
                "{} overlaps with {}",
                address.network(),
                other.name
            )));
        }
        self.interface_mut(name)?.address = Some(address);
        Ok(())
    }

    pub fn clear_interface_address(&mut self, name: &str) -> Result<()> {
        self.interface_mut(name)?.address = None;
        Ok(())
    }

    pub fn set_interface_state(&mut self, name: &str, up: bool) -> Result<()> {
        let iface = self.interface_mut(name)?;
        if iface.up != up {
            log::info!(
                "Interface {} changed state to {}",
                iface.name,
                if up { "up" } else { "administratively down" }
            );
        }
        iface.up = up;
        Ok(())
    }

    pub fn set_interface_description(&mut self, name: &str, text: Option<String>) -> Result<()> {
        self.interface_mut(name)?.description = text;
        Ok(())
    }

    // -- Static routes --

    pub fn static_routes(&self) -> &[StaticRoute] {
        &self.static_routes
    }

    /// Add a static route. Returns `false` if an identical route exists.
    pub fn add_static_route(&mut self, network: Ipv4Net, next_hop: NextHop) -> bool {
        let route = StaticRoute {
            network: network.normalized(),
            next_hop,
        };
        if self.static_routes.contains(&route) {
            return false;
        }
        self.static_routes.push(route);
        true
    }

    /// Remove static routes to `network`, optionally only those through
    /// `next_hop`. Returns the number removed.
    pub fn remove_static_route(&mut self, network: Ipv4Net, next_hop: Option<&NextHop>) -> usize {
        let network = network.normalized();
        let before = self.static_routes.len();
        self.static_routes
            .retain(|r| !(r.network == network && next_hop.is_none_or(|hop| &r.next_hop == hop)));
        before - self.static_routes.len()
    }

    // -- OSPF --

    pub fn ospf_processes(&self) -> &[OspfProcess] {
        &self.ospf
    }

    pub fn ospf_process(&self, process_id: u32) -> Option<&OspfProcess> {
        self.ospf.iter().find(|p| p.process_id == process_id)
    }

    /// Get an OSPF process, creating it on first use.
    pub fn ospf_process_mut(&mut self, process_id: u32) -> &mut OspfProcess {
        let idx = match self.ospf.iter().position(|p| p.process_id == process_id) {
            Some(idx) => idx,
            None => {
                log::debug!("Creating OSPF process {process_id}");
                self.ospf.push(OspfProcess::new(process_id));
                self.ospf.len() - 1
            },
        };
        &mut self.ospf[idx]
    }

    pub fn ospf_neighbors(&self) -> &[OspfNeighbor] {
        &self.ospf_neighbors
    }

    pub fn add_ospf_neighbor(&mut self, neighbor: OspfNeighbor) {
        self.ospf_neighbors.retain(|n| n.neighbor_id != neighbor.neighbor_id);
        self.ospf_neighbors.push(neighbor);
    }

    // -- Routing --

    /// Connected, local, and static routes, ordered by destination.
    pub fn routing_table(&self) -> Vec<RouteEntry> {
        let mut entries = Vec::new();
        for iface in &self.interfaces {
            let Some(net) = iface.connected() else {
                continue;
            };
            entries.push(RouteEntry {
                source: RouteSource::Connected,
                network: net.normalized(),
                via: None,
                interface: Some(iface.name.clone()),
            });
            entries.push(RouteEntry {
                source: RouteSource::Local,
                network: Ipv4Net {
                    address: net.address,
                    mask: Ipv4Addr::BROADCAST,
                },
                via: None,
                interface: Some(iface.name.clone()),
            });
        }
        for route in &self.static_routes {
            let (via, interface) = match &route.next_hop {
                NextHop::Address(ip) => (Some(*ip), None),
                NextHop::Interface(name) => (None, Some(name.clone())),
            };
            entries.push(RouteEntry {
                source: RouteSource::Static,
                network: route.network,
                via,
                interface,
            });
        }
        entries.sort_by_key(|e| (u32::from(e.network.network()), e.network.prefix_len(), e.source));
        entries
    }

    /// Whether a packet to `ip` would leave the router.
    ///
    /// True for addresses inside an up interface's subnet, or covered by a
    /// static route whose next hop is itself on a connected subnet (or names
    /// an up interface).
    pub fn is_reachable(&self, ip: Ipv4Addr) -> bool {
        if self.is_connected(ip) {
            return true;
        }
        self.static_routes
            .iter()
            .filter(|r| r.network.contains(ip))
            .any(|r| match &r.next_hop {
                NextHop::Address(hop) => self.is_connected(*hop),
                NextHop::Interface(name) => self.interface(name).is_some_and(|i| i.up),
            })
    }

    fn is_connected(&self, ip: Ipv4Addr) -> bool {
        self.interfaces
            .iter()
            .filter_map(Interface::connected)
            .any(|net| net.contains(ip))
    }

    // -- Startup configuration --

    pub fn startup_config(&self) -> Option<&str> {
        self.startup_config.as_deref()
    }

    /// Snapshot the running configuration as the startup configuration.
    pub fn save_startup_config(&mut self) {
        let text = self.running_config();
        log::info!("Saved startup-config ({} bytes)", text.len());
        self.startup_config = Some(text);
    }

    /// Discard the startup configuration. Returns `false` if none was saved.
    pub fn erase_startup_config(&mut self) -> bool {
        self.startup_config.take().is_some()
    }
}

impl Default for RouterCore {
    fn default() -> Self {
        Self::new(&RouterSimConfig::default())
    }
}

/// Split `GigabitEthernet0/0` into `("GigabitEthernet", "0/0")`.
fn split_interface_name(name: &str) -> (&str, &str) {
    let idx = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    name.split_at(idx)
}
