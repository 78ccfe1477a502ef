//! OSPF router configuration commands. All act on the process selected by
//! `router ospf <id>`.

use std::net::Ipv4Addr;

use routersim_core::addr::is_contiguous_mask;
use routersim_core::{OspfNetwork, parse_ipv4};
use routersim_types::error::{Result, RouterSimError};

use crate::interpreter::{Command, CommandOutput, Environment, arguments, invalid_input};
use crate::trie::CommandTrie;

pub fn register_ospf_commands(trie: &mut CommandTrie) {
    trie.register(
        &["network"],
        "Enable routing on an IP network",
        Box::new(NetworkCmd { negate: false }),
    );
    trie.register(
        &["no", "network"],
        "Disable routing on an IP network",
        Box::new(NetworkCmd { negate: true }),
    );
    trie.register(
        &["router-id"],
        "Override the configured router identifier",
        Box::new(RouterIdCmd),
    );
}

// ---------------------------------------------------------------------------
// [no] network <address> <wildcard> area <id>
// ---------------------------------------------------------------------------

struct NetworkCmd {
    negate: bool,
}
impl Command for NetworkCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let process_id = env.current_ospf_process()?;
        let args = arguments(tokens, if self.negate { 2 } else { 1 }, 4, 4)?;
        let network = parse_network(args)?;

        let process = env.router.ospf_process_mut(process_id);
        if self.negate {
            if !process.remove_network(&network) {
                return Err(RouterSimError::Command(
                    "Specified network statement not found".to_string(),
                ));
            }
        } else {
            process.add_network(network);
        }
        Ok(CommandOutput::None)
    }
}

/// Parse `<address> <wildcard> area <id>`.
fn parse_network(args: &[&str]) -> Result<OspfNetwork> {
    let address = parse_ipv4(args[0])?;
    let wildcard = parse_ipv4(args[1])?;
    if !is_contiguous_mask(Ipv4Addr::from(!u32::from(wildcard))) {
        return Err(RouterSimError::Command(format!(
            "Invalid wildcard mask: {wildcard}"
        )));
    }
    if !"area".starts_with(args[2]) {
        return Err(invalid_input(args[2]));
    }
    Ok(OspfNetwork {
        address,
        wildcard,
        area: parse_area(args[3])?,
    })
}

/// Areas are written either as a number or in dotted-quad form.
fn parse_area(text: &str) -> Result<u32> {
    if let Ok(area) = text.parse::<u32>() {
        return Ok(area);
    }
    text.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| RouterSimError::Command(format!("Invalid OSPF area: {text}")))
}

// ---------------------------------------------------------------------------
// router-id
// ---------------------------------------------------------------------------

struct RouterIdCmd;
impl Command for RouterIdCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let process_id = env.current_ospf_process()?;
        let args = arguments(tokens, 1, 1, 1)?;
        let router_id = parse_ipv4(args[0])?;
        env.router.ospf_process_mut(process_id).router_id = Some(router_id);
        Ok(CommandOutput::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_formats() {
        assert_eq!(parse_area("0").unwrap(), 0);
        assert_eq!(parse_area("0.0.0.1").unwrap(), 1);
        assert!(parse_area("backbone").is_err());
    }

    #[test]
    fn network_statement_parsing() {
        let n = parse_network(&["10.0.0.0", "0.0.0.255", "a", "0"]).unwrap();
        assert_eq!(n.wildcard, Ipv4Addr::new(0, 0, 0, 255));
        assert!(parse_network(&["10.0.0.0", "0.255.0.255", "area", "0"]).is_err());
        assert!(parse_network(&["10.0.0.0", "0.0.0.255", "zone", "0"]).is_err());
        assert!(parse_network(&["10.0.0.0", "0.0.0.255", "area", "x"]).is_err());
    }
}
