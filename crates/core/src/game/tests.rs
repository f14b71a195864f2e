use super::test_support::*;
use super::*;

#[test]
fn seeking_player_clears_corridor_and_scores_items() {
    let mut session = session(&corridor_rows(), &SessionConfig::default());
    let result = session.advance(10);

    assert!(matches!(result.stop_reason, AdvanceStopReason::Finished(LevelOutcome::Cleared)));
    assert_eq!(result.simulated_ticks, 2);
    assert_eq!(session.score(), 6);
    assert_eq!(session.eaten(), 2);
    assert!(session.goals().is_empty());
    assert_eq!(session.log().last(), Some(&LogEvent::LevelCleared { tick: 2 }));

    let eaten: Vec<_> = session
        .log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::ItemEaten { item, score } => Some((item.kind, *score)),
            _ => None,
        })
        .collect();
    assert_eq!(eaten, vec![(ItemKind::Pill, 1), (ItemKind::Gold, 6)]);
}

#[test]
fn ice_is_eaten_in_passing_without_scoring() {
    let mut session = session(&["xxxxx", "xPi.x", "xxxxx"], &SessionConfig::default());
    let first = session.step_tick();
    assert_eq!(
        first.steps[0].consumed,
        Some(ItemEvent { kind: ItemKind::Ice, at: Location::new(2, 1) })
    );
    assert_eq!((session.score(), session.eaten()), (0, 0));
    assert_eq!(first.outcome, None);

    let second = session.step_tick();
    assert_eq!(second.outcome, Some(LevelOutcome::Cleared));
    assert_eq!((session.score(), session.eaten()), (1, 1));
}

#[test]
fn pursuit_monster_catches_an_idle_player() {
    let rows = ["xxxxxx", "xP. Tx", "xxxxxx"];
    let mut session = session(&rows, &manual_config(0));
    let result = session.advance(20);
    assert!(matches!(result.stop_reason, AdvanceStopReason::Finished(LevelOutcome::Caught)));
    assert_eq!(result.simulated_ticks, 3);

    let monster = session.monsters().next().expect("one monster").id;
    assert_eq!(
        session.log().last(),
        Some(&LogEvent::PlayerCaught { at: Location::new(1, 1), by: monster })
    );
}

#[test]
fn freeze_delays_pursuit_by_whole_ticks() {
    let rows = ["xxxxxx", "xP. Tx", "xxxxxx"];
    let mut session = session(&rows, &manual_config(2));
    assert_eq!(session.monsters().next().map(|monster| monster.freeze_ticks), Some(2));

    let result = session.advance(20);
    assert!(matches!(result.stop_reason, AdvanceStopReason::Finished(LevelOutcome::Caught)));
    assert_eq!(result.simulated_ticks, 5);
}

#[test]
fn collision_beats_clearing_the_last_goal() {
    let config = SessionConfig { pursuit_freeze_ticks: 0, ..SessionConfig::default() };
    let mut session = session(&["xxxxx", "xP.Tx", "xxxxx"], &config);
    let report = session.step_tick();

    assert_eq!(report.outcome, Some(LevelOutcome::Caught));
    assert!(session.goals().is_empty());
    assert_eq!(session.score(), 1);
    assert!(!session.log().iter().any(|event| matches!(event, LogEvent::LevelCleared { .. })));
}

#[test]
fn manual_player_moves_only_when_steered() {
    let mut session = session(&corridor_rows(), &manual_config(0));

    let idle = session.advance(1);
    assert!(matches!(idle.stop_reason, AdvanceStopReason::BudgetExhausted));
    assert_eq!(session.player().location, Location::new(1, 1));

    session.steer(Direction::North);
    let bumped = session.step_tick();
    assert_eq!(bumped.steps[0].reason, MoveReason::Held);
    assert_eq!(session.player().location, Location::new(1, 1));

    session.steer(Direction::West);
    session.steer(Direction::East);
    let moved = session.step_tick();
    assert_eq!(moved.steps[0].reason, MoveReason::Steered);
    assert_eq!(session.player().location, Location::new(2, 1));
    assert_eq!(session.player().facing, Direction::East);
    assert_eq!(session.score(), 1);

    session.steer(Direction::East);
    assert_eq!(session.step_tick().outcome, Some(LevelOutcome::Cleared));
}

#[test]
fn player_teleports_before_choosing_its_step() {
    let mut session = session(&["xxxxxxx", "xP1x1.x", "xxxxxxx"], &SessionConfig::default());
    let player = session.player_id();
    let result = session.advance(10);

    assert!(matches!(result.stop_reason, AdvanceStopReason::Finished(LevelOutcome::Cleared)));
    assert_eq!(result.simulated_ticks, 2);
    assert!(session.log().contains(&LogEvent::Teleported {
        agent: player,
        from: Location::new(2, 1),
        to: Location::new(4, 1),
    }));
    assert_eq!(session.player().location, Location::new(5, 1));
}

#[test]
fn finished_level_freezes_every_agent() {
    let mut session = session(&["xxxxx", "xP.Tx", "xxxxx"], &manual_config(0));
    session.steer(Direction::East);
    assert_eq!(session.step_tick().outcome, Some(LevelOutcome::Caught));
    let tick = session.current_tick();

    let after = session.step_tick();
    assert!(after.steps.is_empty());
    assert_eq!(session.current_tick(), tick);

    let monster = session.monsters().next().expect("monster").id;
    let step = session.advance_agent(monster).expect("known agent");
    assert_eq!(step.from, step.to);
    assert_eq!(step.reason, MoveReason::Held);
    assert_eq!(session.advance(5).simulated_ticks, 0);
}

#[test]
fn spawn_count_is_checked_at_session_start() {
    let none = Session::new(&map(&["xxxx", "x.gx", "xxxx"]), &SessionConfig::default());
    assert!(matches!(none, Err(SessionError::PlayerSpawnCount { count: 0, .. })));

    let two = Session::new(&map(&["xxxxx", "xP.Px", "xxxxx"]), &SessionConfig::default());
    assert!(matches!(two, Err(SessionError::PlayerSpawnCount { count: 2, .. })));
}

#[test]
fn unknown_agent_is_an_error() {
    let mut session = session(&corridor_rows(), &SessionConfig::default());
    let missing = AgentId::default();
    assert_eq!(session.advance_agent(missing), Err(SessionError::UnknownAgent(missing)));
    assert!(session.agent(missing).is_none());
}

#[test]
fn monsters_spawn_in_row_major_order_with_their_own_settings() {
    let rows = ["xxxxxxx", "xPR T.x", "x  R .x", "xxxxxxx"];
    let config = SessionConfig { pursuit_freeze_ticks: 4, ..SessionConfig::default() };
    let session = session(&rows, &config);

    let monsters: Vec<_> = session
        .monsters()
        .map(|monster| (monster.kind, monster.location, monster.freeze_ticks))
        .collect();
    assert_eq!(
        monsters,
        vec![
            (AgentKind::Evasion, Location::new(2, 1), 0),
            (AgentKind::Pursuit, Location::new(4, 1), 4),
            (AgentKind::Evasion, Location::new(3, 2), 0),
        ]
    );
    assert_eq!(session.player().history.capacity(), 100);
    assert!(session.monsters().all(|monster| monster.history.capacity() == 10));
    assert_eq!(session.agents().count(), 4);
}

#[test]
fn observer_receives_the_logged_events() {
    let recorder = Recorder::default();
    let events = recorder.events.clone();
    let mut session = session(&corridor_rows(), &SessionConfig::default());
    session.set_observer(Box::new(recorder));
    session.advance(10);

    assert!(!events.borrow().is_empty());
    assert_eq!(events.borrow().as_slice(), session.log());
}

#[test]
fn snapshot_hash_tracks_state() {
    let rows = ["xxxxxxx", "xP. .Rx", "x xxx x", "x.  g x", "xxxxxxx"];
    let mut first = session(&rows, &SessionConfig::default());
    let mut second = session(&rows, &SessionConfig::default());
    assert_eq!(first.snapshot_hash(), second.snapshot_hash());

    let before = first.snapshot_hash();
    first.advance(3);
    second.advance(3);
    assert_ne!(first.snapshot_hash(), before);
    assert_eq!(first.snapshot_hash(), second.snapshot_hash());
    assert_eq!(first.log(), second.log());
}

#[test]
fn agents_crossing_within_a_tick_do_not_collide() {
    let mut session = session(&["xxxxxx", "xPT. x", "xxxxxx"], &manual_config(0));
    let monster = session.monsters().next().expect("one monster").id;

    session.steer(Direction::East);
    let report = session.step_tick();

    assert_eq!(report.outcome, None);
    assert_eq!(session.player().location, Location::new(2, 1));
    assert_eq!(session.agent(monster).expect("monster").location, Location::new(3, 1));
    assert!(!session.log().iter().any(|event| matches!(event, LogEvent::PlayerCaught { .. })));
}

#[test]
fn sharing_a_cell_after_all_moves_is_a_catch() {
    let mut session = session(&["xxxxxx", "xP T.x", "xxxxxx"], &manual_config(0));
    let monster = session.monsters().next().expect("one monster").id;

    session.steer(Direction::East);
    let report = session.step_tick();

    assert_eq!(report.outcome, Some(LevelOutcome::Caught));
    assert_eq!(
        session.log().last(),
        Some(&LogEvent::PlayerCaught { at: Location::new(2, 1), by: monster })
    );
}
