use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::domain::{ProbeOutcome, Target};
use crate::ports::ProbeTransport;

use super::PROCESS_GRACE;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to execute `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("ping exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("no result within {0:?}")]
    TimedOut(Duration),

    #[error("refusing to probe target {0:?}")]
    InvalidTarget(String),
}

/// Probe transport backed by the system `ping` utility
#[derive(Debug, Clone)]
pub struct SystemPing {
    program: String,
    /// Time the process gets past the probe timeout before it is killed
    grace: Duration,
}

impl SystemPing {
    pub fn new() -> Self {
        Self::with_program("ping")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            grace: PROCESS_GRACE,
        }
    }

    /// Arguments for a single echo request with a bounded wait
    fn build_args(target: &Target, timeout: Duration) -> Vec<String> {
        let wait_secs = timeout.as_secs().max(1).to_string();
        // macOS takes the overall deadline as -t, Linux as -W
        let wait_flag = if cfg!(target_os = "macos") { "-t" } else { "-W" };

        vec![
            "-n".to_string(),
            "-c".to_string(),
            "1".to_string(),
            wait_flag.to_string(),
            wait_secs,
            target.as_str().to_string(),
        ]
    }

    async fn run(&self, target: &Target, timeout: Duration) -> Result<String, ProbeError> {
        let host = target.as_str().trim();
        if host.is_empty() || host.starts_with('-') {
            return Err(ProbeError::InvalidTarget(host.to_string()));
        }

        let output = Command::new(&self.program)
            .args(Self::build_args(target, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let deadline = timeout + self.grace;
        let output = tokio::time::timeout(deadline, output)
            .await
            .map_err(|_| ProbeError::TimedOut(deadline))?
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeTransport for SystemPing {
    async fn execute(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        match self.run(target, timeout).await {
            Ok(output) => ProbeOutcome::reply(output),
            Err(e) => {
                debug!(host = %target, error = %e, "Probe failed");
                ProbeOutcome::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[test]
    fn test_build_args_single_packet_with_timeout() {
        let args = SystemPing::build_args(&Target::new("google.com"), TIMEOUT);
        assert_eq!(args[..3], ["-n", "-c", "1"]);
        assert_eq!(args[4], "2");
        assert_eq!(args.last().map(String::as_str), Some("google.com"));
    }

    #[test]
    fn test_build_args_rounds_subsecond_timeout_up() {
        let args = SystemPing::build_args(&Target::new("1.1.1.1"), Duration::from_millis(300));
        assert_eq!(args[4], "1");
    }

    #[tokio::test]
    async fn test_missing_program_is_failure() {
        let ping = SystemPing::with_program("pingmon-no-such-binary");
        let outcome = ping.execute(&Target::default(), TIMEOUT).await;
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_option_like_target_is_rejected() {
        let ping = SystemPing::new();
        let outcome = ping.execute(&Target::new("-f"), TIMEOUT).await;
        assert!(matches!(outcome, ProbeOutcome::Failure { reason } if reason.contains("refusing")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let ping = SystemPing::with_program("false");
        assert!(ping.execute(&Target::default(), TIMEOUT).await.is_failure());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clean_exit_without_reply_is_unreachable_reply() {
        let ping = SystemPing::with_program("true");
        let outcome = ping.execute(&Target::default(), TIMEOUT).await;
        assert_eq!(outcome, ProbeOutcome::reply(""));
        assert_eq!(outcome.classify(), crate::domain::Status::Unreachable);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hung_process_is_killed_after_deadline() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("hung-ping");
        std::fs::write(&script, "#!/bin/sh\nsleep 10\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let ping = SystemPing {
            program: script.to_string_lossy().into_owned(),
            grace: Duration::from_millis(100),
        };
        let started = std::time::Instant::now();
        let outcome = ping
            .execute(&Target::default(), Duration::from_millis(200))
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(
            matches!(&outcome, ProbeOutcome::Failure { reason } if reason.contains("no result within")),
            "unexpected outcome: {:?}",
            outcome
        );
    }
}
