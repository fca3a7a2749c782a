//! Audible cue on reachability transitions.
//!
//! Plays a short sound through the desktop's sound player:
//! - Linux: `canberra-gtk-play` with the freedesktop connectivity sound ids
//! - macOS: `afplay` with a system sound
//!
//! Playback is best-effort; the player runs detached and is reaped in the
//! background so a slow sound server never delays the probe cycle.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::{CycleReport, Status};
use crate::ports::{Notifier, NotifyError};

/// Which sound to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Online,
    Offline,
}

impl Cue {
    pub fn for_status(status: &Status) -> Self {
        if status.is_reachable() {
            Self::Online
        } else {
            Self::Offline
        }
    }

    /// Cue to play for a report, if any: only on a transition with sound on
    pub fn for_report(report: &CycleReport) -> Option<Self> {
        (report.significant && report.sound_enabled).then(|| Self::for_status(&report.status))
    }

    fn sound_id(self) -> &'static str {
        match self {
            Self::Online => "network-connectivity-established",
            Self::Offline => "network-connectivity-lost",
        }
    }

    fn system_sound(self) -> &'static str {
        match self {
            Self::Online => "/System/Library/Sounds/Glass.aiff",
            Self::Offline => "/System/Library/Sounds/Basso.aiff",
        }
    }
}

/// Notifier that plays a cue when the target goes up or down
#[derive(Debug, Clone)]
pub struct SoundNotifier {
    player: String,
}

impl SoundNotifier {
    pub fn new() -> Self {
        let player = if cfg!(target_os = "macos") {
            "afplay"
        } else {
            "canberra-gtk-play"
        };
        Self::with_player(player)
    }

    pub fn with_player(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
        }
    }

    fn player_args(cue: Cue) -> Vec<&'static str> {
        if cfg!(target_os = "macos") {
            vec![cue.system_sound()]
        } else {
            vec!["--id", cue.sound_id(), "--description", "pingmon"]
        }
    }

    fn play(&self, cue: Cue) -> Result<(), NotifyError> {
        let mut child = Command::new(&self.player)
            .args(Self::player_args(cue))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NotifyError::Launch {
                program: self.player.clone(),
                source,
            })?;

        tokio::spawn(async move {
            if let Err(e) = child.wait().await {
                debug!(error = %e, "Sound player did not exit cleanly");
            }
        });

        Ok(())
    }
}

impl Default for SoundNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for SoundNotifier {
    fn name(&self) -> &str {
        "sound"
    }

    async fn notify(&self, report: &CycleReport) -> Result<(), NotifyError> {
        let Some(cue) = Cue::for_report(report) else {
            return Ok(());
        };

        info!(host = %report.target, cue = ?cue, "Playing transition cue");
        self.play(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::Target;

    fn report(status: Status, significant: bool, sound_enabled: bool) -> CycleReport {
        CycleReport {
            cycle: 1,
            target: Target::default(),
            status,
            significant,
            sound_enabled,
            started_at: Utc::now(),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_cue_only_on_significant_transition() {
        assert_eq!(Cue::for_report(&report(Status::reachable(10), false, true)), None);
        assert_eq!(
            Cue::for_report(&report(Status::reachable(10), true, true)),
            Some(Cue::Online)
        );
        assert_eq!(
            Cue::for_report(&report(Status::Unreachable, true, true)),
            Some(Cue::Offline)
        );
    }

    #[test]
    fn test_cue_gated_by_sound_enabled() {
        assert_eq!(Cue::for_report(&report(Status::Unreachable, true, false)), None);
    }

    #[tokio::test]
    async fn test_quiet_report_never_launches_player() {
        let notifier = SoundNotifier::with_player("pingmon-no-such-player");
        let quiet = report(Status::reachable(3), false, true);
        assert!(notifier.notify(&quiet).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_player_is_reported() {
        let notifier = SoundNotifier::with_player("pingmon-no-such-player");
        let loud = report(Status::Unreachable, true, true);
        assert!(matches!(
            notifier.notify(&loud).await,
            Err(NotifyError::Launch { .. })
        ));
    }
}
