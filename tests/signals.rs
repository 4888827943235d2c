use killswitch::hotkey::{SignalKind, Signals};
use killswitch::overlay::OverlayState;

use mock_table::MockTable;

fn game_table() -> MockTable {
    MockTable::new(&[(1, "Game.exe"), (2, "Game.exe"), (3, "Other.exe")])
}

#[test]
fn close_process_kills_every_exact_match() {
    let signals = Signals::new();
    let mut table = game_table();
    let mut state = OverlayState::new("Game.exe".into());

    signals.raise(SignalKind::CloseProcess);
    let keep_running = state.drain_signals(&signals, &mut table);

    assert!(!keep_running);
    assert!(!state.running);
    assert_eq!(table.killed, vec![1, 2]);
    assert_eq!(table.procs, vec![(3, "Other.exe".to_string())]);
}

#[test]
fn close_program_hides_without_killing() {
    let signals = Signals::new();
    let mut table = game_table();
    let mut state = OverlayState::new("Game.exe".into());

    signals.raise(SignalKind::Quit);
    let keep_running = state.drain_signals(&signals, &mut table);

    assert!(!keep_running);
    assert!(!state.show_overlay);
    assert!(table.killed.is_empty());
    assert_eq!(table.procs.len(), 3);
}

#[test]
fn toggle_is_an_involution() {
    let signals = Signals::new();
    let mut table = game_table();
    let mut state = OverlayState::new("Game.exe".into());
    assert!(state.show_overlay);

    signals.raise(SignalKind::ToggleOverlay);
    assert!(state.drain_signals(&signals, &mut table));
    assert!(!state.show_overlay);

    signals.raise(SignalKind::ToggleOverlay);
    assert!(state.drain_signals(&signals, &mut table));
    assert!(state.show_overlay);
    assert!(state.running);
}

#[test]
fn toggle_has_no_other_side_effect() {
    let signals = Signals::new();
    let mut table = game_table();
    let mut state = OverlayState::new("Game.exe".into());

    signals.raise(SignalKind::ToggleOverlay);
    state.drain_signals(&signals, &mut table);

    assert!(state.running);
    assert!(table.killed.is_empty());
}

#[test]
fn simultaneous_signals_drain_in_one_pass() {
    let signals = Signals::new();
    let mut table = game_table();
    let mut state = OverlayState::new("Game.exe".into());

    signals.raise(SignalKind::ToggleOverlay);
    signals.raise(SignalKind::Quit);
    let keep_running = state.drain_signals(&signals, &mut table);

    assert!(!keep_running);
    assert!(!state.show_overlay);
    assert!(table.killed.is_empty());
    assert!(!signals.take_toggle());
    assert!(!signals.take_quit());
}

#[test]
fn kill_matches_exact_name_only() {
    let signals = Signals::new();
    let mut table = MockTable::new(&[(1, "Game.exe"), (2, "game.exe"), (3, "Game")]);
    let mut state = OverlayState::new("Game.exe".into());

    signals.raise(SignalKind::CloseProcess);
    state.drain_signals(&signals, &mut table);

    assert_eq!(table.killed, vec![1]);
}
