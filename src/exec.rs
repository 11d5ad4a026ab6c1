//! Subprocess plumbing: spawn, stream, reap.

use std::ffi::OsStr;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{ChildStderr, ChildStdout, Command, ExitStatus, Stdio};

use crate::error::Error;

/// Which of the child's pipes carries the per-line payload.
///
/// `tar` reports per-file progress on stderr, `unzip` on stdout; the
/// caller names the one it wants streamed and the other is forwarded
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Run `program` with `args`, feeding each line of the primary stream
/// to `on_line` and forwarding the other stream to this process's
/// stderr, even when `on_line` is a no-op.
///
/// The child's stdin is null; nothing is ever written to it. Both pipe
/// handles are owned by this call and close on every exit path,
/// including when `on_line` fails. The child is always reaped.
///
/// The primary stream is consumed first. The non-primary pipe only
/// reaches EOF once the child exits, so draining it first would block
/// against a child stuck on a full primary pipe; its few diagnostic
/// lines sit in the pipe buffer until we get to them.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] when `program` is not on `PATH`,
/// [`Error::Io`] on spawn or pipe faults, and whatever `on_line`
/// returns. A non-zero exit status is not an error at this layer: the
/// status is handed back for the caller to judge, since the listing
/// path tolerates failure and the extraction path does not.
pub fn run_streaming<I, S, F>(
    program: &str,
    args: I,
    primary: Stream,
    on_line: F,
) -> Result<ExitStatus, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    F: FnMut(&str) -> Result<(), Error>,
{
    let resolved = which::which(program).map_err(|_| Error::ToolNotFound {
        tool: program.to_string(),
    })?;

    let mut child = Command::new(resolved)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let streamed = drain(stdout, stderr, primary, on_line);

    // Reap before propagating stream errors so a failed callback can't
    // leave a zombie behind; dropping the pipes above already unblocked
    // the child.
    let status = child.wait()?;
    streamed?;
    Ok(status)
}

fn drain<F>(
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    primary: Stream,
    mut on_line: F,
) -> Result<(), Error>
where
    F: FnMut(&str) -> Result<(), Error>,
{
    let (primary_pipe, mut forwarded): (Box<dyn Read>, Box<dyn Read>) =
        match (primary, stdout, stderr) {
            (Stream::Stdout, Some(out), Some(err)) => (Box::new(out), Box::new(err)),
            (Stream::Stderr, Some(out), Some(err)) => (Box::new(err), Box::new(out)),
            _ => {
                return Err(Error::Io(io::Error::other(
                    "child spawned without captured pipes",
                )))
            }
        };

    for line in BufReader::new(primary_pipe).lines() {
        on_line(&line?)?;
    }

    io::copy(&mut forwarded, &mut io::stderr())?;
    Ok(())
}
