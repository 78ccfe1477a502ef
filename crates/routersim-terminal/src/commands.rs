//! Built-in command registration and the mode-transition commands shared
//! by every mode.

use routersim_types::error::Result;

use crate::dispatcher::Dispatcher;
use crate::interpreter::{Command, CommandOutput, Environment, ModeChange, arguments};
use crate::mode::CliMode;
use crate::trie::CommandTrie;

/// Register every built-in command into the dispatcher's per-mode tries.
pub fn register_builtins(dispatcher: &mut Dispatcher) {
    // User EXEC.
    let trie = dispatcher.trie_mut(CliMode::UserExec);
    trie.register(
        &["enable"],
        "Turn on privileged commands",
        enter(CliMode::PrivilegedExec),
    );
    trie.register(&["exit"], "Exit from the EXEC", Box::new(LogoutCmd));
    crate::register_exec_commands(trie, false);
    crate::register_show_commands(trie, false);

    // Privileged EXEC.
    let trie = dispatcher.trie_mut(CliMode::PrivilegedExec);
    trie.register(
        &["disable"],
        "Turn off privileged commands",
        enter(CliMode::UserExec),
    );
    trie.register(&["exit"], "Exit to user EXEC", enter(CliMode::UserExec));
    trie.register(
        &["configure", "terminal"],
        "Configure from the terminal",
        Box::new(EnterModeCmd {
            mode: CliMode::GlobalConfig,
            keywords: 2,
            text: Some("Enter configuration commands, one per line.  End with CNTL/Z."),
        }),
    );
    crate::register_exec_commands(trie, true);
    crate::register_show_commands(trie, true);

    // Global configuration.
    let trie = dispatcher.trie_mut(CliMode::GlobalConfig);
    register_exit_end(trie, CliMode::PrivilegedExec);
    crate::register_config_commands(trie);

    // Configuration submodes.
    let trie = dispatcher.trie_mut(CliMode::InterfaceConfig);
    register_exit_end(trie, CliMode::GlobalConfig);
    crate::register_interface_commands(trie);

    let trie = dispatcher.trie_mut(CliMode::LineConfig);
    register_exit_end(trie, CliMode::GlobalConfig);
    crate::register_line_commands(trie);

    let trie = dispatcher.trie_mut(CliMode::OspfConfig);
    register_exit_end(trie, CliMode::GlobalConfig);
    crate::register_ospf_commands(trie);
}

/// `exit` goes up one level to `parent`; `end` always returns to privileged
/// EXEC.
fn register_exit_end(trie: &mut CommandTrie, parent: CliMode) {
    let help = if parent == CliMode::PrivilegedExec {
        "Exit from configure mode"
    } else {
        "Exit from the current configuration submode"
    };
    trie.register(&["exit"], help, enter(parent));
    trie.register(
        &["end"],
        "Exit to privileged EXEC mode",
        enter(CliMode::PrivilegedExec),
    );
}

fn enter(mode: CliMode) -> Box<dyn Command> {
    Box::new(EnterModeCmd {
        mode,
        keywords: 1,
        text: None,
    })
}

// ---------------------------------------------------------------------------
// enable / disable / exit / end / configure terminal
// ---------------------------------------------------------------------------

struct EnterModeCmd {
    mode: CliMode,
    keywords: usize,
    text: Option<&'static str>,
}
impl Command for EnterModeCmd {
    fn execute(&self, tokens: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, self.keywords, 0, 0)?;
        Ok(CommandOutput::Mode {
            change: ModeChange::Enter(self.mode),
            text: self.text.map(str::to_string),
        })
    }
}

// ---------------------------------------------------------------------------
// exit (user EXEC)
// ---------------------------------------------------------------------------

struct LogoutCmd;
impl Command for LogoutCmd {
    fn execute(&self, tokens: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, 1, 0, 0)?;
        Ok(CommandOutput::Logout)
    }
}
