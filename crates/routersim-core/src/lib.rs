//! Simulated router state.
//!
//! `RouterCore` holds every record the CLI can configure (interfaces, static
//! routes, OSPF processes, the console line) and renders them back as a
//! running configuration. Nothing here touches a real network; reachability
//! is answered from the configured subnets alone.

pub mod addr;
mod render;
mod router;


pub use addr::{Ipv4Net, parse_ipv4};
pub use router::{
    Interface, LineConsole, NextHop, OspfNeighbor, OspfNetwork, OspfProcess, RouteEntry,
    RouteSource, RouterCore, StaticRoute,
};
