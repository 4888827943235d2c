use sysinfo::System;

/// Capability seam over the OS process table so the picker and the overlay
/// loop can be exercised without touching real processes.
pub trait ProcessTable {
    /// Names of all currently running processes, sorted. One entry per
    /// process, so multi-process applications appear repeatedly.
    fn names(&mut self) -> Vec<String>;

    /// Terminate every process whose name equals `name` exactly. Returns the
    /// number of processes the terminate call was delivered to.
    fn kill_all(&mut self, name: &str) -> usize;
}

/// Live process table backed by `sysinfo`. Every call takes a fresh snapshot,
/// so transient processes appearing between two calls are reflected.
pub struct SystemProcesses;

impl ProcessTable for SystemProcesses {
    fn names(&mut self) -> Vec<String> {
        let system = System::new_all();
        let mut names: Vec<String> = system
            .processes()
            .values()
            .map(|p| p.name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn kill_all(&mut self, name: &str) -> usize {
        let system = System::new_all();
        let mut killed = 0;
        for process in system.processes().values() {
            if process.name().to_string_lossy() == name {
                if process.kill() {
                    killed += 1;
                } else {
                    tracing::warn!(
                        pid = process.pid().as_u32(),
                        name,
                        "failed to terminate process"
                    );
                }
            }
        }
        killed
    }
}

/// Case-insensitive substring filter over a snapshot of process names.
/// An empty query keeps everything. The result is sorted.
pub fn filter_names(names: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    let mut out: Vec<String> = names
        .iter()
        .filter(|n| needle.is_empty() || n.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    out.sort();
    out
}

/// Filter against a fresh snapshot of the table.
pub fn search(table: &mut dyn ProcessTable, query: &str) -> Vec<String> {
    filter_names(&table.names(), query)
}

/// Strip a trailing file-extension suffix for display purposes only.
/// Kill matching always uses the full name.
pub fn display_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains(' ') => stem,
        _ => name,
    }
}
