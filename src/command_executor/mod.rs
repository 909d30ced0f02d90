//! Command Executor Module
//!
//! Runs the external tools this crate drives. Processes are spawned directly
//! with an argv array, never through a shell, and block until they exit.
//! stdout and stderr share one pipe, so the captured text keeps the order the
//! tool wrote it in; a non-zero exit turns that text into
//! [`KeytrustError::CommandFailed`] verbatim.

pub mod security;

pub use security::SecurityTool;

use crate::{KeytrustError, Result};
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, trace, warn};

/// Run `program` with `args` and return its combined output.
pub fn run_captured<I, A>(program: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    let command_line = render_command_line(program, &args);
    debug!("Executing: {}", command_line);

    let (mut reader, writer) = std::io::pipe()?;
    let mut child = {
        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        command.spawn().map_err(|source| KeytrustError::Spawn {
            program: program.to_path_buf(),
            source,
        })?
        // `command` drops here, closing the parent's write ends
    };

    let mut captured = Vec::new();
    reader.read_to_end(&mut captured)?;
    let status = child.wait()?;
    let text = String::from_utf8_lossy(&captured).into_owned();

    if !status.success() {
        warn!(
            "Command exited with {}: {}\n{}",
            status,
            command_line,
            text.trim_end()
        );
        return Err(KeytrustError::CommandFailed(text));
    }

    trace!("Command output: {}", text.trim_end());
    Ok(text)
}

/// Shell-quoted rendering of a command line, for logs only
fn render_command_line(program: &Path, args: &[std::ffi::OsString]) -> String {
    let words = std::iter::once(program.as_os_str())
        .chain(args.iter().map(|a| a.as_os_str()))
        .map(|w| w.to_string_lossy().into_owned());
    shell_words::join(words)
}
