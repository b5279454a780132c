//! AppleScript dialogs through `osascript`.

use super::{DialogError, DialogInvocation, DialogPicker, SelectionKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct MacPicker;

impl DialogPicker for MacPicker {
    fn platform(&self) -> &'static str {
        "macos"
    }

    fn invocation(&self, kind: SelectionKind) -> Result<DialogInvocation, DialogError> {
        let script = match kind {
            SelectionKind::File => {
                r#"POSIX path of (choose file with prompt "Select LiveKit CLI Executable")"#
            }
            SelectionKind::Folder => {
                r#"POSIX path of (choose folder with prompt "Select folder containing LiveKit CLI (lk)")"#
            }
        };
        Ok(DialogInvocation::new("osascript", ["-e", script]))
    }
}
