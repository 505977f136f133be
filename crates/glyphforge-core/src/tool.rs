//! External tool invocation with a hard deadline.
//!
//! Platform profiles shell out to system utilities (`fc-list`, `reg`) to
//! augment the filesystem sweep. Those calls must never hang a scan, so
//! every invocation runs under a kill-on-timeout wrapper. Callers treat
//! every error from here as recoverable and fall back to the directory walk.

use crate::error::{CoreError, CoreResult};
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Run `program` with `args`, capturing stdout. The process is killed if it
/// does not exit within `timeout`.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> CoreResult<String> {
    debug!("running `{}` {:?} with {:?} deadline", program, args, timeout);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                CoreError::ToolUnavailable(program.to_string())
            } else {
                CoreError::Io(err)
            }
        })?;

    // Drain the pipes off-thread; a chatty tool would otherwise fill the
    // pipe buffer and never exit, defeating the deadline poll below.
    let stdout_pipe = child.stdout.take();
    let stdout_reader = std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = stdout_pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });
    let stderr_pipe = child.stderr.take();
    let stderr_reader = std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = stderr_pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CoreError::ToolTimeout {
                tool: program.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    if !status.success() {
        let message = if stderr.trim().is_empty() {
            status.to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(CoreError::ToolFailed {
            tool: program.to_string(),
            message,
        });
    }

    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_reports_unavailable() {
        let result = run_with_timeout(
            "glyphforge-no-such-tool",
            &[],
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(CoreError::ToolUnavailable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout() {
        let out = run_with_timeout("echo", &["hello"], Duration::from_secs(5)).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn kills_on_deadline() {
        let start = Instant::now();
        let result = run_with_timeout("sleep", &["10"], Duration::from_millis(200));
        assert!(matches!(result, Err(CoreError::ToolTimeout { .. })));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_reports_failure() {
        let result = run_with_timeout("false", &[], Duration::from_secs(5));
        assert!(matches!(result, Err(CoreError::ToolFailed { .. })));
    }
}
