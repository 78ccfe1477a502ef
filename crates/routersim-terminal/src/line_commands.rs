//! Console line configuration commands.

use routersim_types::error::Result;

use crate::interpreter::{Command, CommandOutput, Environment, arguments};
use crate::trie::CommandTrie;

pub fn register_line_commands(trie: &mut CommandTrie) {
    trie.register(&["password"], "Set a password", Box::new(PasswordCmd { negate: false }));
    trie.register(
        &["no", "password"],
        "Remove the line password",
        Box::new(PasswordCmd { negate: true }),
    );
    trie.register(&["login"], "Enable password checking", Box::new(LoginCmd { enable: true }));
    trie.register(
        &["no", "login"],
        "Disable password checking",
        Box::new(LoginCmd { enable: false }),
    );
}

struct PasswordCmd {
    negate: bool,
}
impl Command for PasswordCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let password = if self.negate {
            arguments(tokens, 2, 0, 0)?;
            None
        } else {
            Some(arguments(tokens, 1, 1, 1)?[0].to_string())
        };
        env.router.line_console_mut().password = password;
        Ok(CommandOutput::None)
    }
}

struct LoginCmd {
    enable: bool,
}
impl Command for LoginCmd {
    fn execute(&self, tokens: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        arguments(tokens, if self.enable { 1 } else { 2 }, 0, 0)?;
        let line = env.router.line_console_mut();
        line.login = self.enable;
        if self.enable && line.password.is_none() {
            return Ok(CommandOutput::Text(
                "% Login disabled on line 0, until 'password' is set".to_string(),
            ));
        }
        Ok(CommandOutput::None)
    }
}
