//! Keyword trie with abbreviation matching.
//!
//! Commands are stored as keyword paths (`["show", "ip", "route"]`). A line
//! is matched one token at a time: each token must be a literal prefix of
//! exactly one child keyword. Once a complete command has been reached, a
//! token that matches no child ends the path and it and every later token
//! become arguments for the handler.

use std::collections::BTreeMap;

use routersim_types::error::{Result, RouterSimError};

use crate::interpreter::{Command, CommandOutput, Environment};

/// One keyword position in a command path.
#[derive(Default)]
pub struct TrieNode {
    keyword: String,
    help: String,
    terminal: bool,
    handler: Option<Box<dyn Command>>,
    children: BTreeMap<String, TrieNode>,
}

impl TrieNode {
    fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            ..Self::default()
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Help text. Empty unless the node is terminal.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Whether this node is a complete, invokable command.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn handler(&self) -> Option<&dyn Command> {
        self.handler.as_deref()
    }
}

impl std::fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieNode")
            .field("keyword", &self.keyword)
            .field("terminal", &self.terminal)
            .field("has_handler", &self.handler.is_some())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A successfully matched command.
#[derive(Debug)]
pub struct Match<'t> {
    /// The terminal node reached.
    pub node: &'t TrieNode,
    /// Full keyword spellings of the matched path.
    pub path: Vec<&'t str>,
}

/// A tree of command keywords for one CLI mode.
#[derive(Debug, Default)]
pub struct CommandTrie {
    root: TrieNode,
}

impl CommandTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `path`.
    ///
    /// Intermediate nodes are created as needed. Registering the same path
    /// again replaces the previous help text and handler.
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty.
    pub fn register(&mut self, path: &[&str], help: &str, handler: Box<dyn Command>) {
        let node = self.leaf_mut(path, help);
        node.handler = Some(handler);
    }

    /// Register a command path with no handler. Invoking it fails with
    /// [`RouterSimError::UnimplementedCommand`].
    ///
    /// # Panics
    ///
    /// Panics if `path` is empty.
    pub fn register_unbound(&mut self, path: &[&str], help: &str) {
        let node = self.leaf_mut(path, help);
        node.handler = None;
    }

    fn leaf_mut(&mut self, path: &[&str], help: &str) -> &mut TrieNode {
        assert!(!path.is_empty(), "command path must not be empty");
        log::debug!("Registering command: {}", path.join(" "));

        let mut node = &mut self.root;
        for keyword in path {
            node = node
                .children
                .entry((*keyword).to_string())
                .or_insert_with(|| TrieNode::new(keyword));
        }
        node.terminal = true;
        node.help = help.to_string();
        node
    }

    /// Resolve a token sequence to a terminal node.
    ///
    /// Every sibling is checked, so a token that prefixes two keywords is
    /// always reported as ambiguous regardless of iteration order.
    pub fn match_tokens(&self, tokens: &[&str]) -> Result<Match<'_>> {
        let mut node = &self.root;
        let mut path: Vec<&str> = Vec::new();

        for token in tokens {
            let mut candidates = node
                .children
                .values()
                .filter(|child| child.keyword.starts_with(token));
            match (candidates.next(), candidates.next()) {
                (Some(child), None) => {
                    node = child;
                    path.push(&child.keyword);
                },
                (Some(_), Some(_)) => {
                    return Err(RouterSimError::AmbiguousCommand((*token).to_string()));
                },
                // A complete command takes the remaining tokens as arguments.
                (None, _) if node.terminal => break,
                (None, _) => {
                    return Err(RouterSimError::CommandNotFound((*token).to_string()));
                },
            }
        }

        if path.is_empty() {
            let token = tokens.first().copied().unwrap_or_default();
            return Err(RouterSimError::CommandNotFound(token.to_string()));
        }
        if !node.terminal {
            return Err(RouterSimError::IncompleteCommand);
        }
        log::debug!("Matched command: {}", path.join(" "));
        Ok(Match { node, path })
    }

    /// Tokenize and execute a raw input line.
    ///
    /// Blank lines succeed without doing anything. The handler receives
    /// every token of the line, keywords included.
    pub fn run(&self, env: &mut Environment<'_>, line: &str) -> Result<CommandOutput> {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            return Ok(CommandOutput::None);
        }

        let matched = self.match_tokens(&tokens)?;
        match matched.node.handler() {
            Some(handler) => handler.execute(&tokens, env),
            None => {
                let path = matched.path.join(" ");
                log::warn!("Command has no handler: {path}");
                Err(RouterSimError::UnimplementedCommand(path))
            },
        }
    }

    /// Every registered command as `(full path, help)`, sorted by path.
    pub fn commands(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect_commands(&self.root, &mut prefix, &mut out);
        out
    }
}

fn collect_commands<'t>(
    node: &'t TrieNode,
    prefix: &mut Vec<&'t str>,
    out: &mut Vec<(String, &'t str)>,
) {
    for child in node.children.values() {
        prefix.push(child.keyword());
        if child.is_terminal() {
            out.push((prefix.join(" "), child.help()));
        }
        collect_commands(child, prefix, out);
        prefix.pop();
    }
}

/// Split a line on runs of whitespace. No quoting or escaping.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use routersim_core::RouterCore;

    use super::*;
    use crate::interpreter::command_fn;
    use crate::mode::CliMode;

    type Calls = Rc<RefCell<Vec<(&'static str, Vec<String>)>>>;

    /// A handler that records its label and the tokens it received.
    fn recorder(calls: &Calls, label: &'static str) -> Box<dyn Command> {
        let calls = Rc::clone(calls);
        command_fn(move |tokens, _env| {
            calls
                .borrow_mut()
                .push((label, tokens.iter().map(|t| t.to_string()).collect()));
            Ok(CommandOutput::None)
        })
    }

    fn env(router: &mut RouterCore) -> Environment<'_> {
        Environment {
            mode: CliMode::PrivilegedExec,
            interface: None,
            ospf_process: None,
            router,
        }
    }

    fn show_trie(calls: &Calls) -> CommandTrie {
        let mut trie = CommandTrie::new();
        trie.register(&["show", "version"], "Show version", recorder(calls, "H1"));
        trie.register(
            &["show", "running-config"],
            "Show running config",
            recorder(calls, "H2"),
        );
        trie.register(&["ping"], "Send echo messages", recorder(calls, "H3"));
        trie
    }

    fn kind(result: Result<Match<'_>>) -> String {
        match result {
            Ok(m) => format!("ok:{}", m.path.join(" ")),
            Err(RouterSimError::CommandNotFound(t)) => format!("not-found:{t}"),
            Err(RouterSimError::AmbiguousCommand(t)) => format!("ambiguous:{t}"),
            Err(RouterSimError::IncompleteCommand) => "incomplete".to_string(),
            Err(e) => format!("other:{e}"),
        }
    }

    #[test]
    fn exact_path_matches() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        assert_eq!(kind(trie.match_tokens(&["show", "version"])), "ok:show version");
        assert_eq!(kind(trie.match_tokens(&["ping"])), "ok:ping");
    }

    #[test]
    fn abbreviated_path_matches() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        assert_eq!(kind(trie.match_tokens(&["sh", "ver"])), "ok:show version");
        assert_eq!(kind(trie.match_tokens(&["s", "r"])), "ok:show running-config");
        assert_eq!(kind(trie.match_tokens(&["p"])), "ok:ping");
    }

    #[test]
    fn sh_ver_invokes_h1() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        let mut router = RouterCore::default();
        trie.run(&mut env(&mut router), "sh ver").unwrap();
        assert_eq!(calls.borrow()[0].0, "H1");
        assert_eq!(calls.borrow()[0].1, vec!["sh", "ver"]);
    }

    #[test]
    fn non_terminal_prefix_is_incomplete() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        assert_eq!(kind(trie.match_tokens(&["sh"])), "incomplete");
        assert_eq!(kind(trie.match_tokens(&["show"])), "incomplete");
    }

    #[test]
    fn unknown_token_after_non_terminal_is_not_found() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        assert_eq!(kind(trie.match_tokens(&["sh", "xyz"])), "not-found:xyz");
    }

    #[test]
    fn unknown_first_token_is_not_found() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        assert_eq!(kind(trie.match_tokens(&["reload"])), "not-found:reload");
    }

    #[test]
    fn empty_trie_reports_not_found() {
        let trie = CommandTrie::new();
        assert_eq!(kind(trie.match_tokens(&["anything"])), "not-found:anything");
        assert_eq!(kind(trie.match_tokens(&[])), "not-found:");
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&["enable"], "", recorder(&calls, "enable"));
        trie.register(&["end"], "", recorder(&calls, "end"));
        trie.register(&["exit"], "", recorder(&calls, "exit"));
        assert_eq!(kind(trie.match_tokens(&["en"])), "ambiguous:en");
        assert_eq!(kind(trie.match_tokens(&["e"])), "ambiguous:e");
        assert_eq!(kind(trie.match_tokens(&["ena"])), "ok:enable");
        assert_eq!(kind(trie.match_tokens(&["end"])), "ok:end");
        assert_eq!(kind(trie.match_tokens(&["ex"])), "ok:exit");
    }

    #[test]
    fn ambiguity_found_beyond_first_two_siblings() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&["alpha"], "", recorder(&calls, "a"));
        trie.register(&["beta"], "", recorder(&calls, "b"));
        trie.register(&["zeta"], "", recorder(&calls, "z"));
        trie.register(&["zebra"], "", recorder(&calls, "z2"));
        assert_eq!(kind(trie.match_tokens(&["ze"])), "ambiguous:ze");
        assert_eq!(kind(trie.match_tokens(&["zeb"])), "ok:zebra");
    }

    #[test]
    fn ambiguity_deeper_in_path() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&["show", "ip", "route"], "", recorder(&calls, "r"));
        trie.register(&["show", "ip", "rip"], "", recorder(&calls, "rip"));
        assert_eq!(kind(trie.match_tokens(&["sh", "ip", "r"])), "ambiguous:r");
        assert_eq!(kind(trie.match_tokens(&["sh", "ip", "ro"])), "ok:show ip route");
    }

    #[test]
    fn arguments_pass_through_to_handler() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        let mut router = RouterCore::default();
        trie.run(&mut env(&mut router), "ping 10.0.0.1").unwrap();
        let recorded = calls.borrow();
        assert_eq!(recorded[0].0, "H3");
        assert_eq!(recorded[0].1, vec!["ping", "10.0.0.1"]);
    }

    #[test]
    fn argument_matching_no_child_stops_path() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&["debug"], "", recorder(&calls, "debug"));
        trie.register(&["debug", "ip"], "", recorder(&calls, "debug ip"));
        assert_eq!(kind(trie.match_tokens(&["debug", "all"])), "ok:debug");
        assert_eq!(kind(trie.match_tokens(&["debug", "i"])), "ok:debug ip");
    }

    #[test]
    fn blank_line_is_noop() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        let mut router = RouterCore::default();
        for line in ["", "   ", "\t \t"] {
            assert!(matches!(
                trie.run(&mut env(&mut router), line),
                Ok(CommandOutput::None)
            ));
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn whitespace_runs_are_collapsed() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        let mut router = RouterCore::default();
        trie.run(&mut env(&mut router), "  ping \t 10.0.0.1   ").unwrap();
        assert_eq!(calls.borrow()[0].1, vec!["ping", "10.0.0.1"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        assert_eq!(kind(trie.match_tokens(&["SHOW", "version"])), "not-found:SHOW");
    }

    #[test]
    fn reregistration_replaces_handler() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&["ping"], "old", recorder(&calls, "old"));
        trie.register(&["ping"], "new", recorder(&calls, "new"));
        let mut router = RouterCore::default();
        trie.run(&mut env(&mut router), "ping").unwrap();
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(calls.borrow()[0].0, "new");
        assert_eq!(trie.commands(), vec![("ping".to_string(), "new")]);
    }

    #[test]
    fn registering_longer_path_keeps_prefix_command() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&["exit"], "", recorder(&calls, "exit"));
        trie.register(&["exit", "global"], "", recorder(&calls, "exit global"));
        assert_eq!(kind(trie.match_tokens(&["exit"])), "ok:exit");
        assert_eq!(kind(trie.match_tokens(&["exit", "g"])), "ok:exit global");
    }

    #[test]
    fn unbound_command_is_unimplemented() {
        let mut trie = CommandTrie::new();
        trie.register_unbound(&["reload"], "Halt and perform a cold restart");
        let mut router = RouterCore::default();
        match trie.run(&mut env(&mut router), "rel") {
            Err(RouterSimError::UnimplementedCommand(path)) => assert_eq!(path, "reload"),
            other => panic!("expected unimplemented, got {other:?}"),
        }
    }

    #[test]
    fn handler_errors_propagate() {
        let mut trie = CommandTrie::new();
        trie.register(
            &["fail"],
            "",
            command_fn(|_, _| Err(RouterSimError::Command("usage: fail".into()))),
        );
        let mut router = RouterCore::default();
        let err = trie.run(&mut env(&mut router), "fail").unwrap_err();
        assert_eq!(format!("{err}"), "usage: fail");
    }

    #[test]
    #[should_panic(expected = "command path must not be empty")]
    fn empty_path_panics() {
        let calls = Calls::default();
        let mut trie = CommandTrie::new();
        trie.register(&[], "", recorder(&calls, "nothing"));
    }

    #[test]
    fn commands_lists_terminals_sorted() {
        let calls = Calls::default();
        let trie = show_trie(&calls);
        let names: Vec<String> = trie.commands().into_iter().map(|(p, _)| p).collect();
        assert_eq!(names, vec!["ping", "show running-config", "show version"]);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_paths() -> impl Strategy<Value = Vec<Vec<String>>> {
            proptest::collection::vec(proptest::collection::vec("[a-z]{3,8}", 1..4), 1..8)
        }

        /// True when no keyword is a prefix of a different keyword at the
        /// same position under the same parent, so every exact spelling is
        /// unambiguous.
        fn no_sibling_prefixes(paths: &[Vec<String>]) -> bool {
            paths.iter().all(|a| {
                paths.iter().all(|b| {
                    let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
                    match (a.get(shared), b.get(shared)) {
                        (Some(x), Some(y)) => !x.starts_with(y.as_str()) && !y.starts_with(x.as_str()),
                        _ => true,
                    }
                })
            })
        }

        proptest! {
            #[test]
            fn every_registered_path_runs_its_own_handler(paths in arb_paths()) {
                prop_assume!(no_sibling_prefixes(&paths));

                let hits: Rc<RefCell<Vec<usize>>> = Rc::default();
                let mut trie = CommandTrie::new();
                for (index, path) in paths.iter().enumerate() {
                    let keywords: Vec<&str> = path.iter().map(String::as_str).collect();
                    let hits = Rc::clone(&hits);
                    trie.register(&keywords, "", command_fn(move |_, _| {
                        hits.borrow_mut().push(index);
                        Ok(CommandOutput::None)
                    }));
                }

                let mut router = RouterCore::default();
                for path in &paths {
                    let tokens: Vec<&str> = path.iter().map(String::as_str).collect();
                    let matched = trie.match_tokens(&tokens);
                    prop_assert!(matched.is_ok(), "{:?} did not match: {:?}", tokens, matched);
                    if let Ok(m) = matched {
                        prop_assert_eq!(m.path, tokens.clone());
                    }

                    // Re-registration wins, so duplicates run the last handler.
                    let expected = paths.iter().rposition(|p| p == path);
                    hits.borrow_mut().clear();
                    prop_assert!(trie.run(&mut env(&mut router), &path.join(" ")).is_ok());
                    prop_assert_eq!(hits.borrow().first().copied(), expected);
                    prop_assert_eq!(hits.borrow().len(), 1);
                }
            }

            #[test]
            fn unique_prefix_resolves_like_full_keyword(
                words in proptest::collection::btree_set("[a-z]{2,8}", 1..10),
                cut in 1usize..8,
            ) {
                let calls = Calls::default();
                let mut trie = CommandTrie::new();
                for word in &words {
                    trie.register(&[word.as_str()], "", recorder(&calls, "w"));
                }
                for word in &words {
                    let abbrev = &word[..cut.min(word.len())];
                    let sharing = words.iter().filter(|w| w.starts_with(abbrev)).count();
                    let result = trie.match_tokens(&[abbrev]);
                    if sharing == 1 {
                        prop_assert_eq!(result.unwrap().path, vec![word.as_str()]);
                    } else {
                        let is_ambiguous = matches!(result, Err(RouterSimError::AmbiguousCommand(_)));
                        prop_assert!(is_ambiguous);
                    }
                }
            }
        }
    }
}
