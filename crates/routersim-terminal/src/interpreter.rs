//! Command trait, command output, and the per-line execution environment.

use routersim_core::RouterCore;
use routersim_types::error::{Result, RouterSimError};

use crate::mode::CliMode;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Request a mode transition, optionally printing a message first.
    Mode {
        change: ModeChange,
        text: Option<String>,
    },
    /// Signal to the input loop to end the session.
    Logout,
}

/// A mode transition requested by a handler. The dispatcher applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    /// Move to a mode that carries no extra session state.
    Enter(CliMode),
    /// Enter interface configuration for the named interface.
    Interface(String),
    /// Enter OSPF configuration for a process id.
    Ospf(u32),
}

/// State handed to a handler for the duration of one line.
///
/// The session fields are read-only snapshots; handlers change mode by
/// returning [`CommandOutput::Mode`].
pub struct Environment<'a> {
    /// Mode the line was dispatched in.
    pub mode: CliMode,
    /// Interface selected by `interface <name>`, in interface mode.
    pub interface: Option<&'a str>,
    /// Process selected by `router ospf <id>`, in OSPF mode.
    pub ospf_process: Option<u32>,
    /// The simulated router.
    pub router: &'a mut RouterCore,
}

impl Environment<'_> {
    /// The interface being configured, or an error outside interface mode.
    pub fn current_interface(&self) -> Result<&str> {
        self.interface
            .ok_or_else(|| RouterSimError::Command("No interface selected".to_string()))
    }

    /// The OSPF process being configured, or an error outside OSPF mode.
    pub fn current_ospf_process(&self) -> Result<u32> {
        self.ospf_process
            .ok_or_else(|| RouterSimError::Command("No OSPF process selected".to_string()))
    }
}

/// A handler bound to a command path.
pub trait Command {
    /// Execute the command.
    ///
    /// `tokens` is the whole input line split on whitespace, keyword tokens
    /// included, exactly as the user typed them.
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Adapter so closures can be registered as commands.
struct FnCommand<F>(F);

impl<F> Command for FnCommand<F>
where
    F: Fn(&[&str], &mut Environment<'_>) -> Result<CommandOutput>,
{
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        (self.0)(tokens, env)
    }
}

/// Box a closure as a command handler.
pub fn command_fn<F>(f: F) -> Box<dyn Command>
where
    F: Fn(&[&str], &mut Environment<'_>) -> Result<CommandOutput> + 'static,
{
    Box::new(FnCommand(f))
}

/// Slice off the arguments that follow `keywords` keyword tokens, checking
/// the count.
///
/// Too few arguments is an incomplete command; extra arguments are reported
/// at the first unexpected token.
pub(crate) fn arguments<'t>(
    tokens: &'t [&'t str],
    keywords: usize,
    min: usize,
    max: usize,
) -> Result<&'t [&'t str]> {
    let args = tokens.get(keywords..).unwrap_or_default();
    if args.len() < min {
        return Err(RouterSimError::IncompleteCommand);
    }
    if args.len() > max {
        return Err(invalid_input(args[max]));
    }
    Ok(args)
}

pub(crate) fn invalid_input(token: &str) -> RouterSimError {
    RouterSimError::Command(format!("Invalid input detected at \"{token}\""))
}
