//! The replay engine.
//!
//! Takes a planned [`CarProfile`] and pushes its key stream through a
//! [`KeyEmitter`], one event at a time, with a fixed pause between
//! consecutive events. There is no feedback channel from the game menu:
//! every event goes out regardless of what happened to the previous one,
//! and a trigger that lands mid-replay is dropped.

use crate::profile::{CarProfile, ReplayKey};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Sink for synthetic key events.
///
/// Delivery is fire-and-forget. Implementations must not fail the run;
/// logging a rejected event is as far as error handling goes.
pub trait KeyEmitter {
    fn emit(&mut self, key: ReplayKey);
}

/// The engine is either waiting for a trigger or replaying. Nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    Idle,
    Running,
}

/// What a trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The full stream went out.
    Completed { keys_sent: usize },
    /// A replay was already in flight; this trigger was dropped.
    Ignored,
}

/// Lifetime totals, for the exit summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayTotals {
    pub runs: u64,
    pub keys_sent: u64,
}

pub struct ReplayEngine<E: KeyEmitter> {
    emitter: E,
    inter_key_delay: Duration,
    running: Arc<AtomicBool>,
    totals: ReplayTotals,
}

impl<E: KeyEmitter> ReplayEngine<E> {
    pub fn new(emitter: E, inter_key_delay: Duration) -> Self {
        Self {
            emitter,
            inter_key_delay,
            running: Arc::new(AtomicBool::new(false)),
            totals: ReplayTotals::default(),
        }
    }

    pub fn state(&self) -> ReplayState {
        if self.running.load(Ordering::SeqCst) {
            ReplayState::Running
        } else {
            ReplayState::Idle
        }
    }

    /// Shared handle to the Running flag, observable from other threads.
    pub fn running_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn totals(&self) -> ReplayTotals {
        self.totals
    }

    /// Replays the profile's full key stream, blocking until done.
    ///
    /// Each consecutive pair of events is separated by the configured
    /// delay; the pause is pure scheduling, not a wait on anything. The
    /// profile is read-only here, so back-to-back runs emit identical
    /// streams.
    pub fn run(&mut self, profile: &CarProfile) -> RunOutcome {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(car = %profile.car, "Replay already in flight, trigger ignored");
            return RunOutcome::Ignored;
        }

        let events = profile.key_events();
        tracing::info!(car = %profile.car, events = events.len(), "Replay started");

        for (i, key) in events.iter().enumerate() {
            if i > 0 && !self.inter_key_delay.is_zero() {
                thread::sleep(self.inter_key_delay);
            }
            self.emitter.emit(*key);
        }

        self.running.store(false, Ordering::SeqCst);
        self.totals.runs += 1;
        self.totals.keys_sent += events.len() as u64;
        tracing::info!(car = %profile.car, keys_sent = events.len(), "Replay finished");

        RunOutcome::Completed {
            keys_sent: events.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{catalog, AdjustKey};
    use std::sync::Mutex;

    /// Emitter that records everything it is asked to send.
    struct RecordingEmitter {
        keys: Arc<Mutex<Vec<ReplayKey>>>,
    }

    impl RecordingEmitter {
        fn new() -> (Self, Arc<Mutex<Vec<ReplayKey>>>) {
            let keys = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    keys: Arc::clone(&keys),
                },
                keys,
            )
        }
    }

    impl KeyEmitter for RecordingEmitter {
        fn emit(&mut self, key: ReplayKey) {
            self.keys.lock().unwrap().push(key);
        }
    }

    /// The full 15-row setup exercised end to end: load, plan, replay.
    const ALPHA_GP: &str = r#"{
        "car": "Alpha GP Mk. II",
        "settings": {
            "final_drive": 12,
            "front_power_distrib": 40,
            "grip_front": -5,
            "grip_rear": -20,
            "front_brake_balance": 90,
            "brake_power": -7,
            "load_front": -20,
            "load_rear": -7,
            "spring_front": -7,
            "spring_rear": -20,
            "compression_front": 10,
            "compression_rear": 10,
            "rebound_front": -25,
            "rebound_rear": -15,
            "arb_front": 0
        }
    }"#;

    fn alpha_gp() -> CarProfile {
        CarProfile::from_json_str(ALPHA_GP).unwrap()
    }

    fn expected_alpha_gp_stream() -> Vec<ReplayKey> {
        // (direction, presses) per menu row, in menu order.
        let rows: [(AdjustKey, u32); 15] = [
            (AdjustKey::Right, 12),
            (AdjustKey::Right, 20),
            (AdjustKey::Left, 5),
            (AdjustKey::Left, 20),
            (AdjustKey::Left, 10),
            (AdjustKey::Left, 7),
            (AdjustKey::Left, 20),
            (AdjustKey::Left, 7),
            (AdjustKey::Left, 7),
            (AdjustKey::Left, 20),
            (AdjustKey::Right, 10),
            (AdjustKey::Right, 10),
            (AdjustKey::Left, 25),
            (AdjustKey::Left, 15),
            (AdjustKey::Right, 0),
        ];

        let mut events = Vec::new();
        for (i, (key, presses)) in rows.iter().enumerate() {
            if i > 0 {
                events.push(ReplayKey::Down);
            }
            for _ in 0..*presses {
                events.push(ReplayKey::from(*key));
            }
        }
        events
    }

    #[test]
    fn test_run_emits_exact_stream() {
        let profile = alpha_gp();
        assert_eq!(profile.adjust_count(), 188);
        assert_eq!(profile.down_count(), 14);
        assert_eq!(profile.total_events(), 202);

        let (emitter, recorded) = RecordingEmitter::new();
        let mut engine = ReplayEngine::new(emitter, Duration::ZERO);

        let outcome = engine.run(&profile);
        assert_eq!(outcome, RunOutcome::Completed { keys_sent: 202 });
        assert_eq!(*recorded.lock().unwrap(), expected_alpha_gp_stream());
        assert_eq!(engine.state(), ReplayState::Idle);
    }

    #[test]
    fn test_run_twice_is_idempotent() {
        let profile = alpha_gp();
        let (emitter, recorded) = RecordingEmitter::new();
        let mut engine = ReplayEngine::new(emitter, Duration::ZERO);

        engine.run(&profile);
        let first = recorded.lock().unwrap().clone();
        recorded.lock().unwrap().clear();

        engine.run(&profile);
        let second = recorded.lock().unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(
            engine.totals(),
            ReplayTotals {
                runs: 2,
                keys_sent: 404
            }
        );
    }

    #[test]
    fn test_trigger_while_running_is_ignored() {
        let profile = alpha_gp();
        let (emitter, recorded) = RecordingEmitter::new();
        let mut engine = ReplayEngine::new(emitter, Duration::ZERO);

        // Simulate a replay in flight.
        engine.running_handle().store(true, Ordering::SeqCst);
        assert_eq!(engine.state(), ReplayState::Running);

        assert_eq!(engine.run(&profile), RunOutcome::Ignored);
        assert!(recorded.lock().unwrap().is_empty());
        assert_eq!(engine.totals(), ReplayTotals::default());

        engine.running_handle().store(false, Ordering::SeqCst);
        assert_eq!(engine.run(&profile), RunOutcome::Completed { keys_sent: 202 });
    }

    #[test]
    fn test_empty_profile_completes_with_nothing_sent() {
        let profile = CarProfile {
            car: "Empty".to_string(),
            settings: vec![],
            skipped: vec![],
        };
        let (emitter, recorded) = RecordingEmitter::new();
        let mut engine = ReplayEngine::new(emitter, Duration::ZERO);

        assert_eq!(engine.run(&profile), RunOutcome::Completed { keys_sent: 0 });
        assert!(recorded.lock().unwrap().is_empty());
    }

    /// Bench model of the pro-settings menu: a cursor over the planned
    /// rows and one value per row that reacts to Left/Right the way the
    /// game does. Lets a test observe where an open-loop replay actually
    /// lands.
    struct MenuSimulator {
        rows: Vec<MenuRow>,
        cursor: usize,
    }

    struct MenuRow {
        name: String,
        value: f64,
        increment: f64,
        right_decreases: bool,
    }

    impl MenuSimulator {
        fn for_profile(profile: &CarProfile) -> Self {
            let rows = profile
                .settings
                .iter()
                .map(|s| MenuRow {
                    name: s.name.clone(),
                    value: s.menu_start.unwrap_or(0.0),
                    increment: catalog::find(&s.name).unwrap().increment,
                    right_decreases: s.menu_start.is_some(),
                })
                .collect();
            Self { rows, cursor: 0 }
        }
    }

    impl KeyEmitter for MenuSimulator {
        fn emit(&mut self, key: ReplayKey) {
            match key {
                ReplayKey::Down => {
                    if self.cursor + 1 < self.rows.len() {
                        self.cursor += 1;
                    }
                }
                ReplayKey::Left | ReplayKey::Right => {
                    let row = &mut self.rows[self.cursor];
                    if (key == ReplayKey::Right) != row.right_decreases {
                        row.value += row.increment;
                    } else {
                        row.value -= row.increment;
                    }
                }
            }
        }
    }

    #[test]
    fn test_replay_drives_simulated_menu_to_targets() {
        let profile = alpha_gp();
        let mut engine =
            ReplayEngine::new(MenuSimulator::for_profile(&profile), Duration::ZERO);
        engine.run(&profile);

        for (row, setting) in engine.emitter.rows.iter().zip(&profile.settings) {
            assert!(
                (row.value - setting.target).abs() < 1e-9,
                "{} ended at {} instead of {}",
                row.name,
                row.value,
                setting.target
            );
        }
    }

    #[test]
    fn test_simulated_camber_lands_on_hundredths() {
        let profile = CarProfile::from_json_str(
            r#"{"car": "Sim", "settings": {"camber_front": -0.12, "camber_rear": 0.08}}"#,
        )
        .unwrap();

        let mut engine =
            ReplayEngine::new(MenuSimulator::for_profile(&profile), Duration::ZERO);
        engine.run(&profile);

        let rows = &engine.emitter.rows;
        assert!((rows[0].value - -0.12).abs() < 1e-9);
        assert!((rows[1].value - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_state_is_running_during_emission() {
        struct ProbeEmitter {
            running: Arc<AtomicBool>,
            observed: Arc<Mutex<Vec<bool>>>,
        }
        impl KeyEmitter for ProbeEmitter {
            fn emit(&mut self, _key: ReplayKey) {
                self.observed
                    .lock()
                    .unwrap()
                    .push(self.running.load(Ordering::SeqCst));
            }
        }

        let profile = CarProfile::from_json_str(
            r#"{"car": "Probe", "settings": {"final_drive": 2}}"#,
        )
        .unwrap();

        let observed = Arc::new(Mutex::new(Vec::new()));
        // Wire the probe to the engine's own flag after construction.
        let placeholder = Arc::new(AtomicBool::new(false));
        let mut engine = ReplayEngine::new(
            ProbeEmitter {
                running: Arc::clone(&placeholder),
                observed: Arc::clone(&observed),
            },
            Duration::ZERO,
        );
        let flag = engine.running_handle();
        engine.emitter.running = flag;

        engine.run(&profile);
        let observed = observed.lock().unwrap();
        assert_eq!(observed.len(), 2);
        assert!(observed.iter().all(|seen| *seen));
    }
}
