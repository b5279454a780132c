//! # cmdbridge Native Dialogs (`common::dialog`)
//!
//! File: cli/src/common/dialog/mod.rs
//!
//! ## Overview
//!
//! Lets the user pick the LiveKit CLI executable through the platform's own
//! file or folder dialog. Each platform only knows how to describe its dialog
//! tool invocation; running the tool and interpreting its output is shared.
//!
//! ## Architecture
//!
//! - `DialogPicker`: the capability. `select_file` returns the chosen path;
//!   `select_folder` returns the CLI executable found inside the chosen folder.
//! - `windows`, `macos`, `linux`: one implementation per platform
//!   (PowerShell forms, `osascript`, `zenity`/`kdialog`).
//! - `picker_for` / `native_picker`: choose the implementation once from the
//!   platform identifier.
//!
//! ## Examples
//!
//! ```rust
//! let picker = dialog::native_picker()?;
//! let lk_path = picker.select_folder()?;
//! println!("Using LiveKit CLI at {}", lk_path.display());
//! ```
//!
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

mod linux;
mod macos;
mod windows;

pub use linux::LinuxPicker;
pub use macos::MacPicker;
pub use windows::WindowsPicker;

/// Name of the LiveKit CLI executable on Unix-like systems.
pub const CLI_EXECUTABLE: &str = "lk";

/// Errors produced while asking the user for a path.
#[derive(Error, Debug)]
pub enum DialogError {
    #[error("no file or folder selected")]
    NoSelection,

    #[error("no supported dialog tool found (zenity or kdialog required)")]
    NoDialogToolAvailable,

    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("failed to open dialog with {tool}: {reason}")]
    DialogFailed { tool: String, reason: String },

    #[error("{executable} not found in selected folder: {}", folder.display())]
    ExecutableNotFound { executable: String, folder: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    File,
    Folder,
}

/// A dialog tool and the arguments that open the requested dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl DialogInvocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// A platform's native path picker.
pub trait DialogPicker {
    /// Short platform label for logs.
    fn platform(&self) -> &'static str;

    /// Describes the dialog for `kind`.
    fn invocation(&self, kind: SelectionKind) -> Result<DialogInvocation, DialogError>;

    /// File name of the CLI executable looked up by `select_folder`.
    fn executable_name(&self) -> &'static str {
        CLI_EXECUTABLE
    }

    fn select_file(&self) -> Result<PathBuf, DialogError> {
        show(&self.invocation(SelectionKind::File)?)
    }

    fn select_folder(&self) -> Result<PathBuf, DialogError> {
        let folder = show(&self.invocation(SelectionKind::Folder)?)?;
        locate_executable(&folder, self.executable_name())
    }
}

/// Picks the implementation for a platform identifier (`std::env::consts::OS`).
pub fn picker_for(os: &str) -> Result<Box<dyn DialogPicker>, DialogError> {
    match os {
        "windows" => Ok(Box::new(WindowsPicker)),
        "macos" => Ok(Box::new(MacPicker)),
        "linux" => Ok(Box::new(LinuxPicker::new())),
        other => Err(DialogError::UnsupportedPlatform(other.to_string())),
    }
}

/// The picker for the platform this binary runs on.
pub fn native_picker() -> Result<Box<dyn DialogPicker>, DialogError> {
    picker_for(std::env::consts::OS)
}

/// Runs the dialog tool and returns the selected path.
fn show(invocation: &DialogInvocation) -> Result<PathBuf, DialogError> {
    debug!("Opening dialog: {:?}", invocation);
    let output = Command::new(&invocation.program)
        .args(&invocation.args)
        .output()
        .map_err(|e| DialogError::DialogFailed {
            tool: invocation.program.clone(),
            reason: e.to_string(),
        })?;

    debug!(
        "Dialog finished: status={}, stdout='{}', stderr='{}'",
        output.status,
        String::from_utf8_lossy(&output.stdout).trim(),
        String::from_utf8_lossy(&output.stderr).trim()
    );

    if !output.status.success() {
        // zenity, kdialog and osascript all exit 1 when the user cancels.
        if output.status.code() == Some(1) && output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(DialogError::NoSelection);
        }
        return Err(DialogError::DialogFailed {
            tool: invocation.program.clone(),
            reason: output.status.to_string(),
        });
    }

    interpret_selection(&output.stdout)
}

/// Trims the tool's output; nothing left means nothing was chosen.
pub fn interpret_selection(stdout: &[u8]) -> Result<PathBuf, DialogError> {
    let selected = String::from_utf8_lossy(stdout);
    let selected = selected.trim();
    if selected.is_empty() {
        return Err(DialogError::NoSelection);
    }
    Ok(PathBuf::from(selected))
}

/// Returns `folder/executable` if it exists.
pub fn locate_executable(folder: &Path, executable: &str) -> Result<PathBuf, DialogError> {
    let candidate = folder.join(executable);
    if candidate.exists() {
        Ok(candidate)
    } else {
        Err(DialogError::ExecutableNotFound {
            executable: executable.to_string(),
            folder: folder.to_path_buf(),
        })
    }
}
