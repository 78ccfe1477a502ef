//! Global configuration commands.

use routersim_core::{Ipv4Net, NextHop, parse_ipv4};
use routersim_types::error::{Result, RouterSimError};

use crate::interpreter::{Command, CommandOutput, Environment, ModeChange, arguments, invalid_input};
use crate::mode::CliMode;
use crate::trie::CommandTrie;

/// Register global configuration commands (everything except `exit`/`end`).
pub fn register_config_commands(trie: &mut CommandTrie) {
    trie.register(&["hostname"], "Set system's network name", Box::new(HostnameCmd));
    trie.register(
        &["interface"],
        "Select an interface to configure",
        Box::new(InterfaceCmd),
    );
    trie.register(
        &["router", "ospf"],
        "Open Shortest Path First (OSPF)",
        Box::new(RouterOspfCmd),
    );
    trie.register(
        &["line", "console"],
        "Configure the console line",
        Box::new(LineConsoleCmd),
    );
    trie.register(
        &["ip", "route"],
        "Establish static routes",
        Box::new(IpRouteCmd { negate: false }),
    );
    trie.register(
        &["no", "ip", "route"],
        "Remove static routes",
        Box::new(IpRouteCmd { negate: true }),
    );
    trie.register(
        &["enable", "secret"],
        "Assign the privileged level secret",
        Box::new(EnableSecretCmd { negate: false }),
    );
    trie.register(
        &["no", "enable", "secret"],
        "Remove the privileged level secret",
        Box::new(EnableSecretCmd { negate: true }),
    );
    trie.register(
        &["banner", "motd"],
        "Set Message of the Day banner",
        Box::new(BannerMotdCmd { negate: false }),
    );
    trie.register(
        &["no", "banner", "motd"],
        "Remove the Message of the Day banner",
        Box::new(BannerMotdCmd { negate: true }),
    );
}

// ---------------------------------------------------------------------------
// hostname
// ---------------------------------------------------------------------------

struct HostnameCmd;
impl Command for HostnameCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let args = arguments(tokens, 1, 1, 1)?;
        env.router.set_hostname(args[0])?;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// interface
// ---------------------------------------------------------------------------

struct InterfaceCmd;
impl Command for InterfaceCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        // `interface GigabitEthernet 0/0` is the same as `interface Gi0/0`.
        let args = arguments(tokens, 1, 1, 2)?;
        let requested = args.concat();
        let name = env
            .router
            .resolve_interface(&requested)
            .map(|i| i.name.clone())
            .ok_or_else(|| RouterSimError::Command(format!("Invalid interface: {requested}")))?;
        Ok(CommandOutput::Mode {
            change: ModeChange::Interface(name),
            text: None,
        })
    }
}

// ---------------------------------------------------------------------------
// router ospf
// ---------------------------------------------------------------------------

struct RouterOspfCmd;
impl Command for RouterOspfCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let args = arguments(tokens, 2, 1, 1)?;
        let process_id = args[0]
            .parse::<u32>()
            .ok()
            .filter(|id| (1..=65535).contains(id))
            .ok_or_else(|| {
                RouterSimError::Command(format!(
                    "Invalid OSPF process id: {} (expected 1-65535)",
                    args[0]
                ))
            })?;
        env.router.ospf_process_mut(process_id);
        Ok(CommandOutput::Mode {
            change: ModeChange::Ospf(process_id),
            text: None,
        })
    }
}

// ---------------------------------------------------------------------------
// line console 0
// ---------------------------------------------------------------------------

struct LineConsoleCmd;
impl Command for LineConsoleCmd {
    fn execute(&self, tokens: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let args = arguments(tokens, 2, 1, 1)?;
        if args[0] != "0" {
            return Err(invalid_input(args[0]));
        }
        Ok(CommandOutput::Mode {
            change: ModeChange::Enter(CliMode::LineConfig),
            text: None,
        })
    }
}

// ---------------------------------------------------------------------------
// [no] ip route
// ---------------------------------------------------------------------------

struct IpRouteCmd {
    negate: bool,
}
impl Command for IpRouteCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (keywords, min) = if self.negate { (3, 2) } else { (2, 3) };
        let args = arguments(tokens, keywords, min, 3)?;
        let network = Ipv4Net::parse(args[0], args[1])?;
        let next_hop = match args.get(2) {
            Some(hop) => Some(parse_next_hop(hop, env)?),
            None => None,
        };

        if self.negate {
            if env.router.remove_static_route(network, next_hop.as_ref()) == 0 {
                return Err(RouterSimError::Command(
                    "No matching route to delete".to_string(),
                ));
            }
            return Ok(CommandOutput::None);
        }

        // Presence checked by the argument count above.
        let Some(next_hop) = next_hop else {
            return Err(RouterSimError::IncompleteCommand);
        };
        if network.address != network.network() {
            return Err(RouterSimError::Command(format!(
                "Inconsistent address and mask: {} {}",
                network.address, network.mask
            )));
        }
        env.router.add_static_route(network, next_hop);
        Ok(CommandOutput::None)
    }
}

/// A next hop is either an address or an interface name.
fn parse_next_hop(text: &str, env: &Environment<'_>) -> Result<NextHop> {
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(NextHop::Address(parse_ipv4(text)?));
    }
    env.router
        .resolve_interface(text)
        .map(|i| NextHop::Interface(i.name.clone()))
        .ok_or_else(|| invalid_input(text))
}

// ---------------------------------------------------------------------------
// [no] enable secret
// ---------------------------------------------------------------------------

struct EnableSecretCmd {
    negate: bool,
}
impl Command for EnableSecretCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if self.negate {
            arguments(tokens, 3, 0, 0)?;
            env.router.set_enable_secret(None);
        } else {
            let args = arguments(tokens, 2, 1, 1)?;
            env.router.set_enable_secret(Some(args[0].to_string()));
        }
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// [no] banner motd
// ---------------------------------------------------------------------------

struct BannerMotdCmd {
    negate: bool,
}
impl Command for BannerMotdCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if self.negate {
            arguments(tokens, 3, 0, 0)?;
            env.router.set_banner_motd(None);
            return Ok(CommandOutput::None);
        }
        let args = arguments(tokens, 2, 1, usize::MAX)?;
        let text = strip_delimiter(&args.join(" "));
        if text.is_empty() {
            return Err(RouterSimError::IncompleteCommand);
        }
        env.router.set_banner_motd(Some(text));
        Ok(CommandOutput::None)
    }
}

/// `#Authorized only#` becomes `Authorized only`: a leading punctuation
/// character is a delimiter when the text also ends with it.
fn strip_delimiter(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && first.is_ascii_punctuation() => {
            chars.as_str().trim().to_string()
        },
        _ => text.to_string(),
    }
}
