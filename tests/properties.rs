//! Property tests for the interval controller

use std::sync::{Arc, Mutex};

use pomodoro_clock::{
    output::{Notifier, Presenter, View},
    state::{IntervalController, Mode, SettingsInput, TickOutcome},
};
use proptest::prelude::*;

#[derive(Default)]
struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _view: &View) {}
}

#[derive(Clone, Default)]
struct CountingNotifier {
    alerts: Arc<Mutex<usize>>,
}

impl Notifier for CountingNotifier {
    fn alert(&mut self) {
        *self.alerts.lock().unwrap() += 1;
    }
}

type Controller = IntervalController<NullPresenter, CountingNotifier>;

#[derive(Debug, Clone)]
enum Action {
    Start,
    Pause,
    Reset,
    Toggle,
    Ticks(u16),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Start),
        Just(Action::Pause),
        Just(Action::Reset),
        Just(Action::Toggle),
        (1u16..200).prop_map(Action::Ticks),
    ]
}

fn controller() -> (Controller, CountingNotifier) {
    let notifier = CountingNotifier::default();
    (IntervalController::new(NullPresenter, notifier.clone()), notifier)
}

proptest! {
    #[test]
    fn fresh_start_begins_first_study(study in 1u64..120, rest in 1u64..60, cycles in 1u32..10) {
        let (mut c, _) = controller();
        let input = SettingsInput::new(&study.to_string(), &rest.to_string(), &cycles.to_string());
        c.start(&input);

        prop_assert_eq!(c.state().mode(), Mode::Study);
        prop_assert_eq!(c.state().current_cycle(), 1);
        prop_assert_eq!(c.state().cycle_count(), cycles);
        prop_assert_eq!(c.state().remaining_seconds(), study as i64 * 60);
    }

    #[test]
    fn invariants_hold_after_every_step(
        actions in prop::collection::vec(action(), 1..60),
        cycles in 1u32..4,
    ) {
        let (mut c, _) = controller();
        let input = SettingsInput::new("1", "1", &cycles.to_string());
        prop_assert!(c.state().invariants_hold());

        for action in actions {
            match action {
                Action::Start => { c.start(&input); }
                Action::Pause => { c.pause(); }
                Action::Reset => c.reset(),
                Action::Toggle => { c.toggle(&input); }
                Action::Ticks(n) => {
                    for _ in 0..n {
                        c.tick();
                        prop_assert!(c.state().invariants_hold(), "after tick: {:?}", c.state());
                    }
                }
            }
            prop_assert!(c.state().invariants_hold(), "after {:?}: {:?}", action, c.state());
        }
    }

    #[test]
    fn repeated_pause_and_start_change_nothing(ticks in 0usize..59) {
        let (mut c, _) = controller();
        let input = SettingsInput::new("1", "1", "1");
        c.start(&input);
        for _ in 0..ticks {
            c.tick();
        }

        let running = c.snapshot();
        c.start(&input);
        prop_assert_eq!(&c.snapshot(), &running);

        c.pause();
        let paused = c.snapshot();
        c.pause();
        prop_assert_eq!(&c.snapshot(), &paused);
        prop_assert_eq!(paused.remaining_seconds(), running.remaining_seconds());
    }

    #[test]
    fn full_run_has_one_rest_per_cycle(cycles in 1u32..6) {
        let (mut c, notifier) = controller();
        c.start(&SettingsInput::new("1", "1", &cycles.to_string()));

        let mut rests = 0;
        let mut studies_after_first = 0;
        let mut finished = 0;
        let mut ticks = 0u64;
        loop {
            ticks += 1;
            match c.tick() {
                TickOutcome::PhaseChanged(Mode::Rest) => rests += 1,
                TickOutcome::PhaseChanged(Mode::Study) => studies_after_first += 1,
                TickOutcome::Finished => {
                    finished += 1;
                    break;
                }
                TickOutcome::Skipped => prop_assert!(false, "skipped while running"),
                _ => {}
            }
        }

        prop_assert_eq!(rests, cycles);
        prop_assert_eq!(studies_after_first, cycles - 1);
        prop_assert_eq!(finished, 1);
        prop_assert_eq!(ticks, u64::from(cycles) * 2 * 61);
        prop_assert_eq!(*notifier.alerts.lock().unwrap(), cycles as usize * 2);
        prop_assert_eq!(c.state().mode(), Mode::Idle);
        prop_assert_eq!(c.tick(), TickOutcome::Skipped);
    }
}
