//! IOS-style command interpreter.
//!
//! Every CLI mode owns a [`CommandTrie`] of keyword paths. Input is split on
//! whitespace and each token is matched against the keywords at its level by
//! prefix, so `sh ip int br` reaches `show ip interface brief`. The
//! [`Dispatcher`] picks the trie for the current mode and applies any mode
//! change the handler asks for.

mod commands;
mod config_commands;
mod dispatcher;
mod exec_commands;
mod interface_commands;
mod interpreter;
mod line_commands;
mod mode;
mod ospf_commands;
mod show_commands;
mod trie;


/// Register all built-in commands into a dispatcher's per-mode tries.
pub use commands::register_builtins;
/// Register global configuration commands into a trie.
pub use config_commands::register_config_commands;
/// Mode-scoped dispatcher and its session state.
pub use dispatcher::{Dispatcher, Session};
/// Register EXEC commands (ping, configuration save/erase) into a trie.
pub use exec_commands::register_exec_commands;
/// Register interface configuration commands into a trie.
pub use interface_commands::register_interface_commands;
/// Handler trait, its output and the per-line environment.
pub use interpreter::{Command, CommandOutput, Environment, ModeChange, command_fn};
/// Register console line commands into a trie.
pub use line_commands::register_line_commands;
/// The CLI modes.
pub use mode::CliMode;
/// Register OSPF router configuration commands into a trie.
pub use ospf_commands::register_ospf_commands;
/// Register `show` commands into a trie.
pub use show_commands::register_show_commands;
/// Prefix-matching command trie.
pub use trie::{CommandTrie, Match, TrieNode, tokenize};
