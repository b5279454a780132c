//! PowerShell `System.Windows.Forms` dialogs.

use super::{DialogError, DialogInvocation, DialogPicker, SelectionKind};

const FILE_SCRIPT: &str = r#"Add-Type -AssemblyName System.Windows.Forms; $dialog = New-Object System.Windows.Forms.OpenFileDialog; $dialog.Filter = "Executable Files|*.exe|All Files|*.*"; $dialog.Title = "Select LiveKit CLI Executable"; if ($dialog.ShowDialog() -eq "OK") { Write-Output $dialog.FileName }"#;

const FOLDER_SCRIPT: &str = r#"Add-Type -AssemblyName System.Windows.Forms; $dialog = New-Object System.Windows.Forms.FolderBrowserDialog; $dialog.Description = "Select folder containing LiveKit CLI (lk.exe)"; if ($dialog.ShowDialog() -eq "OK") { Write-Output $dialog.SelectedPath }"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPicker;

impl DialogPicker for WindowsPicker {
    fn platform(&self) -> &'static str {
        "windows"
    }

    fn invocation(&self, kind: SelectionKind) -> Result<DialogInvocation, DialogError> {
        let script = match kind {
            SelectionKind::File => FILE_SCRIPT,
            SelectionKind::Folder => FOLDER_SCRIPT,
        };
        Ok(DialogInvocation::new("powershell", ["-Command", script]))
    }

    fn executable_name(&self) -> &'static str {
        "lk.exe"
    }
}
