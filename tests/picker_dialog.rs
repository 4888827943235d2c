use killswitch::picker::PickerApp;
use killswitch::processes::ProcessTable;
use std::sync::{Arc, Mutex};

use mock_table::MockTable;

/// Table whose contents change between enumerations, modelling processes
/// starting and exiting while the dialog is open.
struct ShiftingTable {
    snapshots: Vec<Vec<String>>,
    calls: usize,
}

impl ShiftingTable {
    fn new(snapshots: &[&[&str]]) -> Self {
        Self {
            snapshots: snapshots
                .iter()
                .map(|s| s.iter().map(|n| n.to_string()).collect())
                .collect(),
            calls: 0,
        }
    }
}

impl ProcessTable for ShiftingTable {
    fn names(&mut self) -> Vec<String> {
        let i = self.calls.min(self.snapshots.len() - 1);
        self.calls += 1;
        let mut names = self.snapshots[i].clone();
        names.sort();
        names
    }

    fn kill_all(&mut self, _name: &str) -> usize {
        0
    }
}

fn choice() -> Arc<Mutex<Option<String>>> {
    Arc::new(Mutex::new(None))
}

#[test]
fn opens_with_full_sorted_list() {
    let table = MockTable::new(&[(1, "steam.exe"), (2, "bash"), (3, "Notepad.exe")]);
    let picker = PickerApp::new(Box::new(table), choice());
    assert_eq!(picker.names(), ["Notepad.exe", "bash", "steam.exe"]);
}

#[test]
fn each_keystroke_filters_a_fresh_snapshot() {
    let table = ShiftingTable::new(&[
        &["old.exe", "stable.exe"],
        &["new.exe", "stable.exe"],
    ]);
    let mut picker = PickerApp::new(Box::new(table), choice());
    assert_eq!(picker.names(), ["old.exe", "stable.exe"]);

    // the process table changed between keystrokes; the filter must see it
    picker.set_query("new");
    assert_eq!(picker.names(), ["new.exe"]);
}

#[test]
fn submit_without_highlight_is_a_noop() {
    let table = MockTable::new(&[(1, "bash")]);
    let chosen = choice();
    let mut picker = PickerApp::new(Box::new(table), chosen.clone());

    assert!(!picker.commit());
    assert!(chosen.lock().unwrap().is_none());
}

#[test]
fn submit_returns_the_literal_highlighted_name() {
    let table = MockTable::new(&[(1, "steam.exe"), (2, "bash")]);
    let chosen = choice();
    let mut picker = PickerApp::new(Box::new(table), chosen.clone());

    picker.select(1);
    assert_eq!(picker.resolve().as_deref(), Some("steam.exe"));
    assert!(picker.commit());
    assert_eq!(chosen.lock().unwrap().as_deref(), Some("steam.exe"));
}

#[test]
fn refresh_drops_a_stale_highlight() {
    let table = ShiftingTable::new(&[
        &["a.exe", "b.exe", "c.exe"],
        &["a.exe"],
    ]);
    let mut picker = PickerApp::new(Box::new(table), choice());
    picker.select(2);

    picker.set_query("a");
    assert!(picker.resolve().is_none());
    assert!(!picker.commit());
}

#[test]
fn out_of_range_select_is_ignored() {
    let table = MockTable::new(&[(1, "bash")]);
    let mut picker = PickerApp::new(Box::new(table), choice());
    picker.select(5);
    assert!(picker.resolve().is_none());
}
