//! GNOME (`zenity`) and KDE (`kdialog`) dialogs.
//!
//! The tool is looked up on `PATH` each time a dialog is opened, preferring
//! zenity.

use super::{DialogError, DialogInvocation, DialogPicker, SelectionKind};
use tracing::debug;

const FILE_TITLE: &str = "Select LiveKit CLI Executable";
const FOLDER_TITLE: &str = "Select folder containing LiveKit CLI (lk)";

#[derive(Debug, Clone, Copy)]
pub struct LinuxPicker {
    is_available: fn(&str) -> bool,
}

impl Default for LinuxPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxPicker {
    pub fn new() -> Self {
        Self::with_lookup(|tool| which::which(tool).is_ok())
    }

    /// Uses `is_available` instead of a `PATH` lookup.
    pub fn with_lookup(is_available: fn(&str) -> bool) -> Self {
        Self { is_available }
    }
}

impl DialogPicker for LinuxPicker {
    fn platform(&self) -> &'static str {
        "linux"
    }

    fn invocation(&self, kind: SelectionKind) -> Result<DialogInvocation, DialogError> {
        if (self.is_available)("zenity") {
            debug!("Using zenity for {:?} dialog", kind);
            return Ok(match kind {
                SelectionKind::File => DialogInvocation::new(
                    "zenity",
                    ["--file-selection".to_string(), format!("--title={}", FILE_TITLE)],
                ),
                SelectionKind::Folder => DialogInvocation::new(
                    "zenity",
                    [
                        "--file-selection".to_string(),
                        "--directory".to_string(),
                        format!("--title={}", FOLDER_TITLE),
                    ],
                ),
            });
        }

        if (self.is_available)("kdialog") {
            debug!("Using kdialog for {:?} dialog", kind);
            return Ok(match kind {
                SelectionKind::File => DialogInvocation::new(
                    "kdialog",
                    [
                        "--getopenfilename",
                        ".",
                        "Executable Files (lk *.exe)|All Files (*)",
                    ],
                ),
                SelectionKind::Folder => DialogInvocation::new(
                    "kdialog",
                    ["--getexistingdirectory", ".", "--title", FOLDER_TITLE],
                ),
            });
        }

        Err(DialogError::NoDialogToolAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_zenity() {
        let picker = LinuxPicker::with_lookup(|_| true);
        let inv = picker.invocation(SelectionKind::Folder).unwrap();
        assert_eq!(inv.program, "zenity");
        assert!(inv.args.contains(&"--directory".to_string()));
    }

    #[test]
    fn test_falls_back_to_kdialog() {
        let picker = LinuxPicker::with_lookup(|tool| tool == "kdialog");
        let file = picker.invocation(SelectionKind::File).unwrap();
        assert_eq!(file.program, "kdialog");
        assert_eq!(file.args[0], "--getopenfilename");

        let folder = picker.invocation(SelectionKind::Folder).unwrap();
        assert_eq!(folder.args[0], "--getexistingdirectory");
    }

    #[test]
    fn test_no_tool_available() {
        let picker = LinuxPicker::with_lookup(|_| false);
        assert!(matches!(
            picker.select_file(),
            Err(DialogError::NoDialogToolAvailable)
        ));
        assert!(matches!(
            picker.select_folder(),
            Err(DialogError::NoDialogToolAvailable)
        ));
    }
}
