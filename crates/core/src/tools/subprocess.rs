//! Subprocess management for external tools.
//!
//! [`run_command`] spawns a prepared [`tokio::process::Command`], captures
//! stdout/stderr and waits for the process, optionally under a timeout.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ToolError, ToolInput, ToolOutput};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// SHETRAN reports progress on stdout for every timestep; anything past
/// this limit is read and discarded.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Spawn `cmd` with the arguments from `input`, capture its output and wait
/// for it to exit.
///
/// The caller sets the program before calling. Arguments, environment
/// variables and working directory from [`ToolInput`] are applied here.
pub async fn run_command(cmd: &mut Command, input: ToolInput) -> Result<ToolOutput, ToolError> {
    // `kill_on_drop(true)` ensures the child is killed when dropped (e.g. on timeout).
    cmd.args(&input.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for (key, value) in &input.env_vars {
        cmd.env(key, value);
    }

    if let Some(dir) = &input.working_directory {
        cmd.current_dir(dir);
    }

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let start = Instant::now();

    let mut child = cmd.spawn().map_err(ToolError::IoError)?;

    // Drain the pipes in spawned tasks so a chatty tool cannot block on a
    // full pipe while we wait on it.
    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();

    let stdout_task = tokio::spawn(async move { read_stream(stdout_handle).await });
    let stderr_task = tokio::spawn(async move { read_stream(stderr_handle).await });

    let status = match input.timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(waited) => waited.map_err(ToolError::IoError)?,
            // `child` is dropped on return, which kills the process.
            Err(_elapsed) => {
                return Err(ToolError::Timeout {
                    program,
                    elapsed_ms: start.elapsed().as_millis() as u64,
                });
            }
        },
        None => child.wait().await.map_err(ToolError::IoError)?,
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    let stdout_bytes = stdout_task.await.unwrap_or_default();
    let stderr_bytes = stderr_task.await.unwrap_or_default();

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
        exit_code: status.code().unwrap_or(-1),
        duration_ms,
    })
}

/// Read an output stream to EOF, keeping at most [`MAX_OUTPUT_BYTES`].
///
/// Bytes past the cap are drained and dropped; the pipe stays open so the
/// tool never sees `SIGPIPE`.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
        let _ = tokio::io::copy(&mut h, &mut tokio::io::sink()).await;
    }
    buf
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script).arg("sh");
        cmd
    }

    #[tokio::test]
    async fn captures_stdout_and_args() {
        let output = run_command(&mut sh("echo \"$1-$2\""), ToolInput::with_args(["-f", "run"]))
            .await
            .expect("run");
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "-f-run");
    }

    #[tokio::test]
    async fn nonzero_exit_is_reported_not_raised() {
        let output = run_command(&mut sh("echo oops >&2; exit 3"), ToolInput::default())
            .await
            .expect("run");
        assert_eq!(output.exit_code, 3);
        assert!(!output.success());
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn env_and_working_directory_applied() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = ToolInput {
            env_vars: vec![("CATCHMENT".to_string(), "2002".to_string())],
            working_directory: Some(dir.path().to_path_buf()),
            ..ToolInput::default()
        };
        let output = run_command(&mut sh("echo $CATCHMENT > marker.txt"), input)
            .await
            .expect("run");
        assert!(output.success());
        let marker = std::fs::read_to_string(dir.path().join("marker.txt")).expect("marker");
        assert_eq!(marker.trim(), "2002");
    }

    #[tokio::test]
    async fn output_past_cap_is_drained_and_tool_finishes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = format!(
            "head -c {} /dev/zero | tr '\\0' x; echo; touch done.txt",
            MAX_OUTPUT_BYTES + 2 * 1024 * 1024
        );
        let input = ToolInput {
            working_directory: Some(dir.path().to_path_buf()),
            ..ToolInput::default()
        };

        let output = run_command(&mut sh(&script), input).await.expect("run");

        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.len(), MAX_OUTPUT_BYTES);
        assert!(dir.path().join("done.txt").exists());
    }

    #[tokio::test]
    async fn timeout_kills_tool() {
        let input = ToolInput::default().timeout(Some(Duration::from_millis(200)));
        let result = run_command(&mut sh("sleep 60"), input).await;
        assert_matches!(result, Err(ToolError::Timeout { program, .. }) if program == "sh");
    }

    #[tokio::test]
    async fn spawn_failure_is_io_error() {
        let mut cmd = Command::new("/nonexistent/shetran-linux");
        let result = run_command(&mut cmd, ToolInput::default()).await;
        assert_matches!(result, Err(ToolError::IoError(_)));
    }
}
