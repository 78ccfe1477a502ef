//! Mode-scoped dispatch: one command trie per CLI mode plus session state.

use routersim_core::RouterCore;
use routersim_types::error::Result;

use crate::interpreter::{CommandOutput, Environment, ModeChange};
use crate::mode::CliMode;
use crate::trie::CommandTrie;

/// Per-session state: the current mode and the ambient selections made by
/// `interface` and `router ospf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub mode: CliMode,
    pub interface: Option<String>,
    pub ospf_process: Option<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            mode: CliMode::UserExec,
            interface: None,
            ospf_process: None,
        }
    }

    /// Apply a transition requested by a handler.
    ///
    /// Leaving interface or OSPF mode clears the corresponding selection.
    pub fn apply(&mut self, change: ModeChange) {
        let from = self.mode;
        match change {
            ModeChange::Enter(mode) => {
                self.mode = mode;
                if mode != CliMode::InterfaceConfig {
                    self.interface = None;
                }
                if mode != CliMode::OspfConfig {
                    self.ospf_process = None;
                }
            },
            ModeChange::Interface(name) => {
                self.mode = CliMode::InterfaceConfig;
                self.interface = Some(name);
                self.ospf_process = None;
            },
            ModeChange::Ospf(process_id) => {
                self.mode = CliMode::OspfConfig;
                self.ospf_process = Some(process_id);
                self.interface = None;
            },
        }
        log::info!("Mode {from} -> {}", self.mode);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes input lines to the trie of the current mode.
#[derive(Debug)]
pub struct Dispatcher {
    tries: [CommandTrie; CliMode::COUNT],
    session: Session,
}

impl Dispatcher {
    /// Create a dispatcher with an empty trie for every mode.
    pub fn new() -> Self {
        Self {
            tries: std::array::from_fn(|_| CommandTrie::new()),
            session: Session::new(),
        }
    }

    /// Create a dispatcher with every built-in command registered.
    pub fn with_builtins() -> Self {
        let mut dispatcher = Self::new();
        crate::register_builtins(&mut dispatcher);
        dispatcher
    }

    pub fn trie(&self, mode: CliMode) -> &CommandTrie {
        &self.tries[mode.index()]
    }

    /// The trie for `mode`, for registration.
    pub fn trie_mut(&mut self, mode: CliMode) -> &mut CommandTrie {
        &mut self.tries[mode.index()]
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> CliMode {
        self.session.mode
    }

    /// Prompt for the current mode. The hostname is read from the router on
    /// every call so renames show up immediately.
    pub fn prompt(&self, router: &RouterCore) -> String {
        format!("{}{}", router.hostname(), self.session.mode.prompt_suffix())
    }

    /// Execute one input line in the current mode.
    ///
    /// A `?` on its own lists the mode's commands. Mode changes requested by
    /// the handler are applied before returning; the output is passed back
    /// so the caller can print any accompanying text. Errors leave the
    /// session untouched.
    pub fn dispatch(&mut self, router: &mut RouterCore, line: &str) -> Result<CommandOutput> {
        if line.trim() == "?" {
            return Ok(self.help());
        }

        let output = {
            let mut env = Environment {
                mode: self.session.mode,
                interface: self.session.interface.as_deref(),
                ospf_process: self.session.ospf_process,
                router,
            };
            self.tries[self.session.mode.index()].run(&mut env, line)?
        };

        if let CommandOutput::Mode { change, .. } = &output {
            self.session.apply(change.clone());
        }
        Ok(output)
    }

    fn help(&self) -> CommandOutput {
        let commands = self.trie(self.session.mode).commands();
        let width = commands.iter().map(|(path, _)| path.len()).max().unwrap_or(0);
        let lines: Vec<String> = commands
            .iter()
            .map(|(path, help)| format!("  {path:width$}  {help}"))
            .collect();
        CommandOutput::Text(lines.join("\n"))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
