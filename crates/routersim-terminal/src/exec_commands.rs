//! EXEC-mode commands: ping and configuration file management.

use routersim_core::parse_ipv4;
use routersim_types::error::Result;

use crate::interpreter::{Command, CommandOutput, Environment, arguments};
use crate::trie::CommandTrie;

/// Number of echo requests `ping` sends.
const PING_COUNT: usize = 5;

/// Register EXEC commands. Configuration management is privileged only.
pub fn register_exec_commands(trie: &mut CommandTrie, privileged: bool) {
    trie.register(&["ping"], "Send echo messages", Box::new(PingCmd));
    if !privileged {
        return;
    }
    trie.register(
        &["copy", "running-config", "startup-config"],
        "Copy the running configuration to the startup configuration",
        Box::new(SaveConfigCmd { keywords: 3 }),
    );
    trie.register(
        &["write", "memory"],
        "Write the running configuration to memory",
        Box::new(SaveConfigCmd { keywords: 2 }),
    );
    trie.register(
        &["erase", "startup-config"],
        "Erase the startup configuration",
        Box::new(EraseStartupCmd),
    );
}

// ---------------------------------------------------------------------------
// ping
// ---------------------------------------------------------------------------

struct PingCmd;
impl Command for PingCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let args = arguments(tokens, 1, 1, 1)?;
        let target = parse_ipv4(args[0])?;
        let reachable = env.router.is_reachable(target);
        log::debug!("ping {target}: reachable={reachable}");

        let (marks, received) = if reachable {
            ("!".repeat(PING_COUNT), PING_COUNT)
        } else {
            (".".repeat(PING_COUNT), 0)
        };
        let mut lines = vec![
            "Type escape sequence to abort.".to_string(),
            format!("Sending {PING_COUNT}, 100-byte ICMP Echos to {target}, timeout is 2 seconds:"),
            marks,
        ];
        let percent = received * 100 / PING_COUNT;
        if received > 0 {
            lines.push(format!(
                "Success rate is {percent} percent ({received}/{PING_COUNT}), round-trip min/avg/max = 1/1/1 ms"
            ));
        } else {
            lines.push(format!(
                "Success rate is {percent} percent ({received}/{PING_COUNT})"
            ));
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// copy running-config startup-config / write memory
// ---------------------------------------------------------------------------

struct SaveConfigCmd {
    keywords: usize,
}
impl Command for SaveConfigCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, self.keywords, 0, 0)?;
        env.router.save_startup_config();
        Ok(CommandOutput::Text(
            "Building configuration...\n[OK]".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// erase startup-config
// ---------------------------------------------------------------------------

struct EraseStartupCmd;
impl Command for EraseStartupCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 2, 0, 0)?;
        let text = if env.router.erase_startup_config() {
            "[OK]\nErase of nvram: complete"
        } else {
            "Startup configuration not present; nothing to erase"
        };
        Ok(CommandOutput::Text(text.to_string()))
    }
}
