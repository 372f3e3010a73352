//! End-to-end scenarios over the public API: engine, view and animation.

use std::time::{Duration, Instant};

use spark_storyboard::animate::{AnimatedList, Target};
use spark_storyboard::pipeline::{Command, Storyboard};
use spark_storyboard::progress::TickDriver;
use spark_storyboard::theme::{self, MemoryThemeStore, ThemeMode};
use spark_storyboard::view::ItemKey;
use spark_storyboard::{
    demo_steps, render_view, Catalog, EngineState, ProgressEngine, RevealPolicy, Step, StepStatus,
    StepType, TickOutcome,
};

fn fast_steps(n: usize) -> Vec<Step> {
    (0..n)
        .map(|i| Step::new(format!("persist {i}"), StepType::Persist))
        .collect()
}

fn engine(steps: &[Step]) -> ProgressEngine {
    ProgressEngine::new(steps, &Catalog::builtin()).unwrap()
}

#[test]
fn test_full_autoplay_run_of_two_fast_steps() {
    let steps = fast_steps(2);
    let mut engine = engine(&steps);
    engine.toggle_autoplay();

    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.state(), EngineState::new(0, 100, true, 1));

    engine.tick();
    assert_eq!(engine.state(), EngineState::new(1, 0, true, 2));

    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.state().progress(), 100);

    assert_eq!(engine.tick(), TickOutcome::Finished);
    assert!(!engine.state().autoplay());
    assert_eq!(engine.state().active_index(), 1);
}

#[test]
fn test_toggle_mid_flight_resumes() {
    let steps = fast_steps(3);
    let mut engine = engine(&steps);
    engine.toggle_autoplay();
    for _ in 0..14 {
        engine.tick();
    }
    let paused_at = engine.state();

    engine.toggle_autoplay();
    assert_eq!(engine.tick(), TickOutcome::Idle);
    engine.toggle_autoplay();

    assert_eq!(engine.state().active_index(), paused_at.active_index());
    assert_eq!(engine.state().progress(), paused_at.progress());
    engine.tick();
    assert_eq!(engine.state().progress(), paused_at.progress() + 10);
}

#[test]
fn test_reset_is_idempotent() {
    let steps = demo_steps();
    let mut engine = engine(&steps);
    engine.toggle_autoplay();
    for _ in 0..37 {
        engine.tick();
    }

    engine.reset();
    let once = engine.state();
    engine.reset();
    assert_eq!(engine.state(), once);
    assert_eq!(once, EngineState::INITIAL);
}

#[test]
fn test_progress_is_monotonic_until_advance() {
    let steps = demo_steps();
    let mut engine = engine(&steps);
    engine.toggle_autoplay();

    let mut previous = engine.state();
    loop {
        let outcome = engine.tick();
        let state = engine.state();
        match outcome {
            TickOutcome::Progressed { .. } => {
                assert_eq!(state.active_index(), previous.active_index());
                assert!(state.progress() > previous.progress());
            }
            TickOutcome::Advanced { active_index } => {
                assert_eq!(active_index, previous.active_index() + 1);
                assert_eq!(previous.progress(), 100);
                assert_eq!(state.progress(), 0);
            }
            TickOutcome::Finished => break,
            other => panic!("unexpected {other:?}"),
        }
        previous = state;
    }
    assert_eq!(engine.state().active_index(), steps.len() - 1);
}

#[test]
fn test_every_demo_step_takes_eleven_ticks() {
    let steps = demo_steps();
    let mut engine = engine(&steps);
    engine.toggle_autoplay();

    let mut ticks = 0;
    while engine.tick() != TickOutcome::Finished {
        ticks += 1;
    }
    // Ten progress ticks per step plus one advance between steps.
    assert_eq!(ticks, steps.len() * 10 + (steps.len() - 1));
}

#[test]
fn test_driver_follows_engine_schedule() {
    let steps = vec![
        Step::new("slow", StepType::External),
        Step::new("fast", StepType::Persist),
    ];
    let mut engine = engine(&steps);
    let mut driver = TickDriver::default();
    let t0 = Instant::now();

    engine.toggle_autoplay();
    driver.sync(engine.schedule(), t0);
    assert_eq!(driver.due(), Some(t0 + Duration::from_millis(400)));

    let mut now = t0;
    for _ in 0..11 {
        now = driver.due().unwrap();
        let token = driver.take_due(now).unwrap();
        engine.fire(token);
        driver.sync(engine.schedule(), now);
    }
    assert_eq!(engine.state().active_index(), 1);
    assert_eq!(driver.due(), Some(now + Duration::from_millis(200)));
}

#[test]
fn test_view_ordering_examples() {
    let steps = fast_steps(5);
    let items = render_view(&steps, EngineState::new(2, 40, true, 3), RevealPolicy::StatusOrdered);
    let order: Vec<_> = items.iter().map(|i| (i.index, i.status, i.display_progress)).collect();
    assert_eq!(
        order,
        vec![
            (2, StepStatus::Active, 40),
            (1, StepStatus::Completed, 100),
            (0, StepStatus::Completed, 100),
        ]
    );

    let steps = fast_steps(3);
    let items = render_view(&steps, EngineState::new(3, 0, false, 3), RevealPolicy::StatusOrdered);
    let order: Vec<_> = items.iter().map(|i| i.index).collect();
    assert_eq!(order, vec![2, 1, 0]);
    assert!(items.iter().all(|i| i.status == StepStatus::Completed && i.display_progress == 100));
}

#[test]
fn test_animation_identity_across_a_run() {
    let steps = fast_steps(3);
    let mut engine = engine(&steps);
    let mut list: AnimatedList<ItemKey, StepStatus> = AnimatedList::new();

    let reconcile = |list: &mut AnimatedList<ItemKey, StepStatus>, state: EngineState| {
        let targets = render_view(&steps, state, RevealPolicy::StatusOrdered)
            .iter()
            .enumerate()
            .map(|(slot, item)| Target::new(item.key(), item.status, slot as f32 * 6.0))
            .collect();
        list.reconcile(targets);
    };

    reconcile(&mut list, engine.state());
    let first_key = ItemKey::for_step(0, &steps[0]);
    let mount_id = list.get(&first_key).unwrap().mount_id();

    engine.toggle_autoplay();
    while engine.tick() != TickOutcome::Finished {
        reconcile(&mut list, engine.state());
        list.advance(Duration::from_millis(16));
    }

    let entry = list.get(&first_key).unwrap();
    assert_eq!(entry.mount_id(), mount_id);
    assert_eq!(*entry.item(), StepStatus::Completed);

    list.advance(Duration::from_secs(3));
    assert!(!list.is_animating());
    assert_eq!(list.entries().len(), 3);
}

#[test]
fn test_progressive_storyboard_reveals_one_card_per_step() {
    theme::reset_theme_state();
    theme::init_theme(Box::new(MemoryThemeStore::new()), ThemeMode::Dark);

    let steps = vec![
        Step::new("Check stock", StepType::Validate),
        Step::new("Charge card", StepType::Payment),
        Step::new("Send receipt", StepType::Notify),
    ];
    let mut board = Storyboard::new(steps, Catalog::builtin(), RevealPolicy::ProgressiveReveal).unwrap();
    assert_eq!(board.cards().len(), 1);

    board.dispatch(Command::TogglePlay).unwrap();
    for _ in 0..11 {
        let token = board.schedule().unwrap().token;
        board.fire_timer(token).unwrap();
    }
    assert_eq!(board.state().revealed_count(), 2);
    assert_eq!(board.cards().len(), 2);

    board.advance(Duration::from_secs(3));
    let text = board.compose().to_text();
    assert!(text.contains("Charge card"));
    assert!(!text.contains("Send receipt"));

    board.dispatch(Command::Reset).unwrap();
    assert_eq!(board.state(), EngineState::INITIAL);
    assert_eq!(board.schedule(), None);
}
