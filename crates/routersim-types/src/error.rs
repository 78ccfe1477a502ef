//! Error types for routersim.

use std::io;

/// Errors produced by the routersim crates.
///
/// None of these are fatal: the input loop prints them prefixed with `% `
/// and returns to the prompt in the same mode.
#[derive(Debug, thiserror::Error)]
pub enum RouterSimError {
    /// A token matched no keyword before any command path was established.
    #[error("Invalid input detected: unrecognized command \"{0}\"")]
    CommandNotFound(String),

    /// A token is a prefix of two or more sibling keywords.
    #[error("Ambiguous command: \"{0}\"")]
    AmbiguousCommand(String),

    /// All tokens were consumed but the matched node is not a command.
    #[error("Incomplete command.")]
    IncompleteCommand,

    /// A terminal node was reached that has no handler bound.
    #[error("Command not implemented: \"{0}\"")]
    UnimplementedCommand(String),

    /// A handler rejected its arguments.
    #[error("{0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RouterSimError>;
