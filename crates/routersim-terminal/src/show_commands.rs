//! `show` commands.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use routersim_core::{NextHop, RouterCore};
use routersim_types::error::{Result, RouterSimError};

use crate::interpreter::{Command, CommandOutput, Environment, arguments};
use crate::trie::CommandTrie;

/// Register `show` commands. Configuration and OSPF views are privileged
/// only.
pub fn register_show_commands(trie: &mut CommandTrie, privileged: bool) {
    trie.register(
        &["show", "version"],
        "System hardware and software status",
        Box::new(ShowVersionCmd),
    );
    trie.register(
        &["show", "ip", "interface", "brief"],
        "Brief summary of IP status and configuration",
        Box::new(ShowIpInterfaceBriefCmd),
    );
    trie.register(
        &["show", "ip", "route"],
        "IP routing table",
        Box::new(ShowIpRouteCmd),
    );
    if !privileged {
        return;
    }
    trie.register(
        &["show", "running-config"],
        "Current operating configuration",
        Box::new(ShowRunningConfigCmd),
    );
    trie.register(
        &["show", "startup-config"],
        "Contents of startup configuration",
        Box::new(ShowStartupConfigCmd),
    );
    trie.register(
        &["show", "ip", "ospf", "neighbor"],
        "OSPF neighbor list",
        Box::new(ShowIpOspfNeighborCmd),
    );
}

// ---------------------------------------------------------------------------
// show version
// ---------------------------------------------------------------------------

struct ShowVersionCmd;
impl Command for ShowVersionCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 2, 0, 0)?;
        Ok(CommandOutput::Text(show_version(env.router)))
    }
}

fn show_version(router: &RouterCore) -> String {
    let mut lines = vec![
        router.version().to_string(),
        "ROM: RouterSim bootstrap".to_string(),
        String::new(),
        format!("{} uptime is 0 minutes", router.hostname()),
        "System image file is \"flash:routersim.bin\"".to_string(),
        String::new(),
    ];

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for iface in router.interfaces() {
        let end = iface
            .name
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(iface.name.len());
        *kinds.entry(&iface.name[..end]).or_default() += 1;
    }
    for (kind, count) in &kinds {
        lines.push(format!("{count} {kind} interface(s)"));
    }
    lines.push(String::new());
    lines.push("Configuration register is 0x2102".to_string());
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// show running-config / show startup-config
// ---------------------------------------------------------------------------

struct ShowRunningConfigCmd;
impl Command for ShowRunningConfigCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 2, 0, 0)?;
        let config = env.router.running_config();
        Ok(CommandOutput::Text(format!(
            "Building configuration...\n\nCurrent configuration : {} bytes\n{}",
            config.len(),
            config.trim_end()
        )))
    }
}

struct ShowStartupConfigCmd;
impl Command for ShowStartupConfigCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 2, 0, 0)?;
        match env.router.startup_config() {
            Some(config) => Ok(CommandOutput::Text(format!(
                "Using {} bytes\n{}",
                config.len(),
                config.trim_end()
            ))),
            None => Err(RouterSimError::Command(
                "startup-config is not present".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// show ip interface brief
// ---------------------------------------------------------------------------

struct ShowIpInterfaceBriefCmd;
impl Command for ShowIpInterfaceBriefCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 4, 0, 0)?;
        let mut lines = vec![format!(
            "{:<22} {:<15} {:<3} {:<6} {:<21} {}",
            "Interface", "IP-Address", "OK?", "Method", "Status", "Protocol"
        )];
        for iface in env.router.interfaces() {
            let (address, method) = match &iface.address {
                Some(net) => (net.address.to_string(), "manual"),
                None => ("unassigned".to_string(), "unset"),
            };
            let (status, protocol) = if iface.up {
                ("up", "up")
            } else {
                ("administratively down", "down")
            };
            lines.push(format!(
                "{:<22} {:<15} {:<3} {:<6} {:<21} {}",
                iface.name, address, "YES", method, status, protocol
            ));
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// show ip route
// ---------------------------------------------------------------------------

struct ShowIpRouteCmd;
impl Command for ShowIpRouteCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 3, 0, 0)?;
        let router = &*env.router;
        let mut lines = vec![
            "Codes: L - local, C - connected, S - static, O - OSPF".to_string(),
            String::new(),
        ];

        let default_hop = router.static_routes().iter().find_map(|r| {
            (r.network.prefix_len() == 0).then_some(&r.next_hop)
        });
        lines.push(match default_hop {
            Some(NextHop::Address(ip)) => {
                format!("Gateway of last resort is {ip} to network {}", Ipv4Addr::UNSPECIFIED)
            },
            Some(NextHop::Interface(name)) => format!(
                "Gateway of last resort is 0.0.0.0 to network 0.0.0.0 via {name}"
            ),
            None => "Gateway of last resort is not set".to_string(),
        });
        lines.push(String::new());

        for entry in router.routing_table() {
            lines.push(entry.to_string());
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// show ip ospf neighbor
// ---------------------------------------------------------------------------

struct ShowIpOspfNeighborCmd;
impl Command for ShowIpOspfNeighborCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 4, 0, 0)?;
        let mut lines = vec![format!(
            "{:<15} {:>3}   {:<15} {:<11} {:<15} {}",
            "Neighbor ID", "Pri", "State", "Dead Time", "Address", "Interface"
        )];
        for n in env.router.ospf_neighbors() {
            lines.push(format!(
                "{:<15} {:>3}   {:<15} {:<11} {:<15} {}",
                n.neighbor_id.to_string(),
                n.priority,
                n.state,
                "00:00:35",
                n.address.to_string(),
                n.interface
            ));
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}
