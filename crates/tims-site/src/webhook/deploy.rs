//! Deployment script launcher.
//!
//! Launching is fire-and-forget: the script runs detached from the request
//! and its outcome is only logged.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::error::LaunchError;

/// One-way "launch and detach" capability.
pub trait Launcher: Send + Sync {
    /// Start a deployment without waiting for it to finish.
    fn launch(&self) -> Result<Launched, LaunchError>;
}

/// A started deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launched {
    /// OS process id, if the process was still running when queried.
    pub pid: Option<u32>,
}

/// Runs a fixed script through a shell interpreter.
///
/// The script receives no arguments; nothing from the request reaches the
/// child process.
#[derive(Debug, Clone)]
pub struct ScriptLauncher {
    shell: String,
    script: PathBuf,
}

impl ScriptLauncher {
    /// `script` is run as `<shell> <script>`. It should already be resolved
    /// to its final location.
    pub fn new(shell: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
            script: script.into(),
        }
    }
}

impl Launcher for ScriptLauncher {
    fn launch(&self) -> Result<Launched, LaunchError> {
        let is_file = std::fs::metadata(&self.script).is_ok_and(|m| m.is_file());
        if !is_file {
            return Err(LaunchError::ScriptMissing {
                path: self.script.clone(),
            });
        }

        let child = Command::new(&self.shell)
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                path: self.script.clone(),
                source,
            })?;

        let pid = child.id();
        debug!(pid = ?pid, script = %self.script.display(), "deployment script started");

        tokio::spawn(drain(child));

        Ok(Launched { pid })
    }
}

/// Stream the child's output away as it is produced so it never blocks on a
/// full pipe, then reap it.
async fn drain(mut child: Child) {
    let pid = child.id();
    let (stdout_lines, stderr_lines) = tokio::join!(
        count_lines(child.stdout.take()),
        count_lines(child.stderr.take())
    );

    match child.wait().await {
        Ok(status) => debug!(
            pid = ?pid,
            status = %status,
            stdout_lines,
            stderr_lines,
            "deployment script exited"
        ),
        Err(e) => warn!(pid = ?pid, error = %e, "failed to wait for deployment script"),
    }
}

/// Count newline-terminated segments until EOF. Output may be arbitrary
/// bytes, so segments are never decoded.
async fn count_lines<R>(pipe: Option<R>) -> usize
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return 0;
    };

    let mut reader = BufReader::new(pipe);
    let mut lines = 0;
    loop {
        let len = match reader.fill_buf().await {
            Ok(buf) => {
                lines += buf.iter().filter(|&&b| b == b'\n').count();
                buf.len()
            }
            Err(e) => {
                warn!(error = %e, "error reading deployment script output");
                // Keep the pipe empty so the child can finish.
                let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                return lines;
            }
        };
        if len == 0 {
            return lines;
        }
        reader.consume(len);
    }
}
