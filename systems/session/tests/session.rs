use std::time::Duration;

use grid_snake_core::{Command, ControlAction, Direction, Event, RunPhase};
use grid_snake_system_session::Session;
use grid_snake_world::{self as world, query, Config, World};

const START: Event = Event::RunStarted {
    tick_interval: Duration::from_millis(100),
};

fn frame_commands(session: &mut Session, dt: Duration) -> Vec<Command> {
    let mut commands = Vec::new();
    session.frame(dt, &mut commands);
    commands
}

#[test]
fn timer_stays_disarmed_until_a_run_starts() {
    let mut session = Session::new(Duration::from_millis(100));

    assert!(!session.is_armed());
    assert!(frame_commands(&mut session, Duration::from_secs(5)).is_empty());
}

#[test]
fn frame_emits_one_tick_per_elapsed_interval() {
    let mut session = Session::new(Duration::from_millis(100));
    session.handle(&[START]);

    assert!(frame_commands(&mut session, Duration::from_millis(60)).is_empty());
    assert_eq!(
        frame_commands(&mut session, Duration::from_millis(40)),
        vec![Command::Tick]
    );
    assert_eq!(
        frame_commands(&mut session, Duration::from_millis(350)),
        vec![Command::Tick, Command::Tick, Command::Tick],
        "large deltas catch up with multiple ticks"
    );
}

#[test]
fn pause_disarms_and_drops_partial_progress() {
    let mut session = Session::new(Duration::from_millis(100));
    session.handle(&[START]);
    assert!(frame_commands(&mut session, Duration::from_millis(90)).is_empty());

    session.handle(&[Event::RunPaused]);
    assert!(!session.is_armed());
    assert_eq!(session.phase(), RunPhase::Paused);
    assert!(frame_commands(&mut session, Duration::from_secs(1)).is_empty());

    session.handle(&[START]);
    assert!(
        frame_commands(&mut session, Duration::from_millis(90)).is_empty(),
        "resume starts a fresh interval instead of inheriting the paused remainder"
    );
    assert_eq!(
        frame_commands(&mut session, Duration::from_millis(10)),
        vec![Command::Tick]
    );
}

#[test]
fn game_over_disarms_the_timer() {
    let mut session = Session::new(Duration::from_millis(100));
    session.handle(&[START]);

    session.handle(&[Event::GameEnded {
        score: grid_snake_core::Score::new(3),
        cause: grid_snake_core::GameOverCause::WallCollision,
    }]);

    assert_eq!(session.phase(), RunPhase::GameOver);
    assert!(!session.is_armed());
    assert!(frame_commands(&mut session, Duration::from_secs(1)).is_empty());
}

#[test]
fn reset_disarms_and_adopts_the_fresh_interval() {
    let mut session = Session::new(Duration::from_millis(100));
    session.handle(&[START]);
    assert!(frame_commands(&mut session, Duration::from_millis(60)).is_empty());

    session.handle(&[Event::SessionReset {
        tick_interval: Duration::from_millis(180),
    }]);

    assert_eq!(session.phase(), RunPhase::Idle);
    assert!(!session.is_armed());
    assert_eq!(session.tick_interval(), Duration::from_millis(180));
    assert!(frame_commands(&mut session, Duration::from_secs(1)).is_empty());
}

#[test]
fn speed_change_rearms_at_the_new_cadence() {
    let mut session = Session::new(Duration::from_millis(100));
    session.handle(&[START]);
    assert!(frame_commands(&mut session, Duration::from_millis(90)).is_empty());

    session.handle(&[Event::SpeedChanged {
        tick_interval: Duration::from_millis(80),
    }]);

    assert!(session.is_armed());
    assert_eq!(session.tick_interval(), Duration::from_millis(80));
    assert!(
        frame_commands(&mut session, Duration::from_millis(70)).is_empty(),
        "no tick from the old interval may fire after the rearm"
    );
    assert_eq!(
        frame_commands(&mut session, Duration::from_millis(10)),
        vec![Command::Tick]
    );
}

#[test]
fn control_actions_map_onto_world_commands() {
    let session = Session::new(Duration::from_millis(100));
    let mut commands = Vec::new();

    session.control(ControlAction::Start, &mut commands);
    session.control(ControlAction::TogglePause, &mut commands);
    session.control(ControlAction::Reset, &mut commands);
    session.control(ControlAction::Steer(Direction::North), &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::StartRun,
            Command::TogglePause,
            Command::ResetRun,
            Command::SetDirection {
                direction: Direction::North,
            },
        ]
    );
}

#[test]
fn scheduler_drives_the_world_through_a_session() {
    let mut world = World::new(Config::default()).expect("default config is valid");
    let mut session = Session::new(query::tick_interval(&world));
    let mut commands = Vec::new();
    let mut events = Vec::new();

    session.control(ControlAction::Start, &mut commands);
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    session.handle(&events);
    assert!(session.is_armed());

    let head_before = query::snapshot(&world).head();
    session.frame(Duration::from_millis(180), &mut commands);
    events.clear();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    session.handle(&events);

    assert_ne!(query::snapshot(&world).head(), head_before);

    session.control(ControlAction::Reset, &mut commands);
    events.clear();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    session.handle(&events);

    assert!(!session.is_armed());
    assert_eq!(query::phase(&world), RunPhase::Idle);
    assert!(frame_commands(&mut session, Duration::from_secs(2)).is_empty());
}

#[test]
fn stale_ticks_never_touch_a_reset_world() {
    let mut world = World::new(Config::default()).expect("default config is valid");
    let mut session = Session::new(query::tick_interval(&world));
    let mut events = Vec::new();

    world::apply(&mut world, Command::StartRun, &mut events);
    session.handle(&events);

    // Two ticks and a reset queued within the same frame: the reset is
    // applied first, so the already-queued ticks hit a world that is no
    // longer running and must be discarded by the engine's phase guard.
    let mut commands = vec![Command::ResetRun];
    session.frame(Duration::from_millis(360), &mut commands);
    assert_eq!(
        commands,
        vec![Command::ResetRun, Command::Tick, Command::Tick]
    );

    events.clear();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    session.handle(&events);

    let snapshot = query::snapshot(&world);
    assert_eq!(snapshot.phase, RunPhase::Idle);
    assert_eq!(
        snapshot.head(),
        Some(grid_snake_core::CellCoord::new(10, 10)),
        "the reinitialized actor never moved"
    );
}
