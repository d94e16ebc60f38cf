// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::core::session::SessionState;
use crate::core::utils::format_duration;

/// Default keep-alive cycle length, in seconds.
pub const DEFAULT_CYCLE_SECONDS: u64 = 300;

/// Fully-computed status value distributed to observers.
///
/// The camelCase names are the stable JSON contract consumed by UI
/// collaborators. Timestamps are epoch milliseconds. Snapshots are
/// recomputed from session state, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub is_active: bool,
    pub start_time: Option<u64>,
    pub last_toggle: Option<u64>,
    pub session_duration: u64,
    pub next_toggle_in: u64,
}

impl StatusSnapshot {
    /// Snapshot for an idle session: every field at its inactive default.
    pub fn inactive(cycle_seconds: u64) -> Self {
        Self {
            is_active: false,
            start_time: None,
            last_toggle: None,
            session_duration: 0,
            next_toggle_in: cycle_seconds,
        }
    }

    /// Compute the snapshot for `session` as of `now_ms`.
    pub fn compute(session: &SessionState, cycle_seconds: u64, now_ms: u64) -> Self {
        let Some(started_at_ms) = session.started_at_ms() else {
            return Self::inactive(cycle_seconds);
        };

        let session_duration = now_ms.saturating_sub(started_at_ms) / 1000;
        let into_cycle = session_duration % cycle_seconds;

        Self {
            is_active: true,
            start_time: Some(started_at_ms),
            // Most recent completed cycle boundary; the start instant until
            // the first cycle completes.
            last_toggle: Some(now_ms.saturating_sub(into_cycle * 1000)),
            session_duration,
            // On an exact boundary this is a full cycle, never 0: the
            // countdown always shows the next cue, not a terminator.
            next_toggle_in: cycle_seconds - into_cycle,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// CLI-facing rendering for `staygreen status`.
    pub fn pretty_text(&self) -> String {
        if !self.is_active {
            return "Stay Green: idle".to_string();
        }

        format!(
            "Stay Green: active\n  Started:     {}\n  Duration:    {}\n  Last nudge:  {}\n  Next nudge:  in {}",
            format_timestamp(self.start_time),
            format_duration(Duration::from_secs(self.session_duration)),
            format_timestamp(self.last_toggle),
            format_duration(Duration::from_secs(self.next_toggle_in)),
        )
    }
}

fn format_timestamp(ms: Option<u64>) -> String {
    ms.and_then(|ms| Local.timestamp_millis_opt(ms as i64).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_the_ui_field_names() {
        let snap = StatusSnapshot::inactive(DEFAULT_CYCLE_SECONDS);
        let v: serde_json::Value = serde_json::from_str(&snap.to_json()).unwrap();

        assert_eq!(v["isActive"], false);
        assert!(v["startTime"].is_null());
        assert!(v["lastToggle"].is_null());
        assert_eq!(v["sessionDuration"], 0);
        assert_eq!(v["nextToggleIn"], 300);
    }

    #[test]
    fn compute_respects_a_custom_cycle() {
        let mut session = SessionState::new();
        session.begin(0);

        let snap = StatusSnapshot::compute(&session, 10, 25_000);
        assert_eq!(snap.session_duration, 25);
        assert_eq!(snap.next_toggle_in, 5);
        assert_eq!(snap.last_toggle, Some(20_000));

        let snap = StatusSnapshot::compute(&session, 10, 30_000);
        assert_eq!(snap.next_toggle_in, 10);
        assert_eq!(snap.last_toggle, Some(30_000));
    }

    #[test]
    fn sub_second_elapsed_time_truncates_to_zero() {
        let mut session = SessionState::new();
        session.begin(1_000);

        let snap = StatusSnapshot::compute(&session, 300, 1_999);
        assert_eq!(snap.session_duration, 0);
        assert_eq!(snap.next_toggle_in, 300);
    }
}
