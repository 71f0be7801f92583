#![forbid(unsafe_code)]

use kernel::{ProcessInfo, ProcessSnapshot};

/// Selects the processes whose name equals `name` exactly.
///
/// No globbing and no case-folding. The caller decides what a match
/// count other than one means; here it is just a selection.
pub fn matching_processes<'a>(snapshot: &'a ProcessSnapshot, name: &str) -> Vec<&'a ProcessInfo> {
    snapshot
        .processes()
        .values()
        .filter(|process| process.name == name)
        .collect()
}
