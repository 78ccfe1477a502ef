//! The line-oriented input loop.

use std::io::{self, BufRead, Write};

use routersim_core::RouterCore;
use routersim_terminal::{CommandOutput, Dispatcher};

/// Prompt, read, dispatch, print, until `exit` from user EXEC or end of
/// input.
pub fn run<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    router: &mut RouterCore,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    if let Some(banner) = router.banner_motd() {
        writeln!(out, "{banner}")?;
        writeln!(out)?;
    }

    let mut buf = Vec::new();
    loop {
        write!(out, "{}", dispatcher.prompt(router))?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        // Undecodable bytes become U+FFFD and fail matching like any typo.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);

        match dispatcher.dispatch(router, line) {
            Ok(CommandOutput::Text(text)) => writeln!(out, "{text}")?,
            Ok(CommandOutput::Mode {
                text: Some(text), ..
            }) => writeln!(out, "{text}")?,
            Ok(CommandOutput::Mode { text: None, .. }) | Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Logout) => return Ok(()),
            Err(e) => writeln!(out, "% {e}")?,
        }
    }
}
