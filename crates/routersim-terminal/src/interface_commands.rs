//! Interface configuration commands. All act on the interface selected by
//! `interface <name>`.

use routersim_core::Ipv4Net;
use routersim_types::error::{Result, RouterSimError};

use crate::interpreter::{Command, CommandOutput, Environment, arguments};
use crate::trie::CommandTrie;

pub fn register_interface_commands(trie: &mut CommandTrie) {
    trie.register(
        &["ip", "address"],
        "Set the IP address of an interface",
        Box::new(IpAddressCmd { negate: false }),
    );
    trie.register(
        &["no", "ip", "address"],
        "Remove the IP address of an interface",
        Box::new(IpAddressCmd { negate: true }),
    );
    trie.register(
        &["shutdown"],
        "Shutdown the selected interface",
        Box::new(ShutdownCmd { up: false }),
    );
    trie.register(
        &["no", "shutdown"],
        "Enable the selected interface",
        Box::new(ShutdownCmd { up: true }),
    );
    trie.register(
        &["description"],
        "Interface specific description",
        Box::new(DescriptionCmd { negate: false }),
    );
    trie.register(
        &["no", "description"],
        "Remove the interface description",
        Box::new(DescriptionCmd { negate: true }),
    );
}

// ---------------------------------------------------------------------------
// [no] ip address
// ---------------------------------------------------------------------------

struct IpAddressCmd {
    negate: bool,
}
impl Command for IpAddressCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = env.current_interface()?.to_string();
        if self.negate {
            arguments(tokens, 3, 0, 0)?;
            env.router.clear_interface_address(&name)?;
        } else {
            let args = arguments(tokens, 2, 2, 2)?;
            let address = Ipv4Net::parse(args[0], args[1])?;
            env.router.set_interface_address(&name, address)?;
        }
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// [no] shutdown
// ---------------------------------------------------------------------------

struct ShutdownCmd {
    up: bool,
}
impl Command for ShutdownCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, if self.up { 2 } else { 1 }, 0, 0)?;
        let name = env.current_interface()?.to_string();
        let was_up = env
            .router
            .interface(&name)
            .map(|i| i.up)
            .ok_or_else(|| RouterSimError::Command(format!("Invalid interface: {name}")))?;
        env.router.set_interface_state(&name, self.up)?;
        if was_up == self.up {
            return Ok(CommandOutput::None);
        }
        let state = if self.up {
            "up"
        } else {
            "administratively down"
        };
        Ok(CommandOutput::Text(format!(
            "%LINK-5-CHANGED: Interface {name}, changed state to {state}"
        )))
    }
}

// ---------------------------------------------------------------------------
// [no] description
// ---------------------------------------------------------------------------

struct DescriptionCmd {
    negate: bool,
}
impl Command for DescriptionCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = env.current_interface()?.to_string();
        let text = if self.negate {
            arguments(tokens, 2, 0, 0)?;
            None
        } else {
            Some(arguments(tokens, 1, 1, usize::MAX)?.join(" "))
        };
        env.router.set_interface_description(&name, text)?;
        Ok(CommandOutput::None)
    }
}
