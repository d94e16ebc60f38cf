// Author: Dustin Pilgrim
// License: MIT

use std::sync::{Arc, Mutex};

use crate::core::controller::SessionController;
use crate::core::error::{DriverError, Error, StateError};
use crate::core::status::{DEFAULT_CYCLE_SECONDS, StatusSnapshot};
use crate::driver::{ActivityDriver, NullDriver};

/// Scripted driver: counts start/stop calls and fails on demand.
#[derive(Debug, Clone, Default)]
struct FakeDriver {
    inner: Arc<Mutex<FakeDriverState>>,
}

#[derive(Debug, Default)]
struct FakeDriverState {
    starts: u32,
    stops: u32,
    fail_start: bool,
    fail_stop: bool,
}

impl FakeDriver {
    fn new() -> Self {
        Self::default()
    }

    fn failing_start() -> Self {
        let driver = Self::default();
        driver.inner.lock().unwrap().fail_start = true;
        driver
    }

    fn failing_stop() -> Self {
        let driver = Self::default();
        driver.inner.lock().unwrap().fail_stop = true;
        driver
    }

    fn starts(&self) -> u32 {
        self.inner.lock().unwrap().starts
    }

    fn stops(&self) -> u32 {
        self.inner.lock().unwrap().stops
    }
}

impl ActivityDriver for FakeDriver {
    fn start(&mut self) -> Result<(), DriverError> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_start {
            return Err(DriverError::StartFailed("scripted failure".to_string()));
        }
        state.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DriverError> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_stop {
            return Err(DriverError::StopFailed("scripted failure".to_string()));
        }
        state.stops += 1;
        Ok(())
    }
}

fn controller() -> SessionController {
    SessionController::new(DEFAULT_CYCLE_SECONDS, Box::new(NullDriver))
}

fn controller_with(driver: FakeDriver) -> SessionController {
    SessionController::new(DEFAULT_CYCLE_SECONDS, Box::new(driver))
}

#[test]
fn start_twice_reports_already_running() {
    let mut ctl = controller();

    assert!(ctl.start(1_000).is_ok());
    assert_eq!(
        ctl.start(2_000),
        Err(Error::InvalidState(StateError::AlreadyRunning))
    );
    assert!(ctl.is_running());
}

#[test]
fn stop_twice_reports_not_running() {
    let mut ctl = controller();

    assert!(ctl.start(1_000).is_ok());
    assert!(ctl.stop(2_000).is_ok());
    assert_eq!(
        ctl.stop(3_000),
        Err(Error::InvalidState(StateError::NotRunning))
    );
}

#[test]
fn stop_before_any_start_is_a_no_op() {
    let mut ctl = controller();

    assert_eq!(ctl.stop(0), Err(Error::InvalidState(StateError::NotRunning)));
    assert!(!ctl.is_running());
}

#[test]
fn active_iff_start_time_present() {
    let mut ctl = controller();

    let snap = ctl.status(0);
    assert_eq!(snap.is_active, snap.start_time.is_some());

    ctl.start(5_000).unwrap();
    let snap = ctl.status(6_000);
    assert_eq!(snap.is_active, snap.start_time.is_some());
    assert!(snap.is_active);

    ctl.stop(7_000).unwrap();
    let snap = ctl.status(8_000);
    assert_eq!(snap.is_active, snap.start_time.is_some());
    assert!(!snap.is_active);
}

#[test]
fn countdown_table() {
    // duration -> seconds until the next cycle cue. Boundaries report a
    // full cycle, never 0.
    let cases = [
        (0u64, 300u64),
        (149, 151),
        (150, 150),
        (300, 300),
        (301, 299),
        (450, 150),
        (600, 300),
    ];

    let mut ctl = controller();
    ctl.start(0).unwrap();

    for (duration, expected) in cases {
        let snap = ctl.status(duration * 1000);
        assert_eq!(snap.session_duration, duration);
        assert_eq!(snap.next_toggle_in, expected, "duration {duration}s");
    }
}

#[test]
fn start_snapshot_is_immediate() {
    let mut ctl = controller();

    let snap = ctl.start(10_000).unwrap();
    assert!(snap.is_active);
    assert_eq!(snap.session_duration, 0);
    assert_eq!(snap.next_toggle_in, DEFAULT_CYCLE_SECONDS);
    assert_eq!(snap.start_time, Some(10_000));
    assert_eq!(snap.last_toggle, Some(10_000));

    // No tick needed: an immediate query agrees with the transition.
    assert_eq!(ctl.status(10_000), snap);
}

#[test]
fn stop_restores_inactive_defaults() {
    let mut ctl = controller();

    ctl.start(0).unwrap();
    let _ = ctl.status(4_000_000); // long session

    let snap = ctl.stop(4_000_000).unwrap();
    assert_eq!(snap, StatusSnapshot::inactive(DEFAULT_CYCLE_SECONDS));

    assert_eq!(
        ctl.status(9_999_000),
        StatusSnapshot::inactive(DEFAULT_CYCLE_SECONDS)
    );
}

#[test]
fn failed_driver_start_stays_idle() {
    let mut ctl = controller_with(FakeDriver::failing_start());

    let res = ctl.start(1_000);
    assert!(matches!(res, Err(Error::Driver(DriverError::StartFailed(_)))));

    assert!(!ctl.is_running());
    assert!(!ctl.status(2_000).is_active);
}

#[test]
fn failed_driver_stop_still_reaches_idle() {
    let mut ctl = controller_with(FakeDriver::failing_stop());

    ctl.start(1_000).unwrap();
    let snap = ctl.stop(2_000).unwrap();

    assert!(!snap.is_active);
    assert!(!ctl.is_running());
}

#[test]
fn driver_started_and_stopped_once_per_session() {
    let driver = FakeDriver::new();
    let mut ctl = controller_with(driver.clone());

    ctl.start(0).unwrap();
    let _ = ctl.start(1_000);
    assert_eq!(driver.starts(), 1);

    ctl.stop(2_000).unwrap();
    let _ = ctl.stop(3_000);
    assert_eq!(driver.stops(), 1);
}

#[test]
fn last_toggle_tracks_cycle_boundaries() {
    let mut ctl = controller();
    ctl.start(0).unwrap();

    // Mid-first-cycle: the boundary is still the session start.
    assert_eq!(ctl.status(149_000).last_toggle, Some(0));

    // One second past the first boundary.
    assert_eq!(ctl.status(301_000).last_toggle, Some(300_000));

    // Exactly on a boundary the cue has just fired.
    assert_eq!(ctl.status(600_000).last_toggle, Some(600_000));
}

#[test]
fn session_scenario_end_to_end() {
    let mut ctl = controller();

    let snap = ctl.start(0).unwrap();
    assert_eq!(snap.session_duration, 0);
    assert_eq!(snap.next_toggle_in, 300);

    let snap = ctl.status(1_000);
    assert_eq!(snap.session_duration, 1);
    assert_eq!(snap.next_toggle_in, 299);

    let snap = ctl.status(300_000);
    assert_eq!(snap.session_duration, 300);
    assert_eq!(snap.next_toggle_in, 300);

    let snap = ctl.stop(305_000).unwrap();
    assert_eq!(snap, StatusSnapshot::inactive(300));
}

#[test]
fn restarting_begins_a_fresh_session() {
    let mut ctl = controller();

    ctl.start(0).unwrap();
    ctl.stop(250_000).unwrap();

    let snap = ctl.start(400_000).unwrap();
    assert_eq!(snap.start_time, Some(400_000));
    assert_eq!(snap.session_duration, 0);
    assert_eq!(snap.next_toggle_in, 300);
}
