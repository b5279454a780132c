//! # cmdbridge Pick Handler
//!
//! File: cli/src/commands/pick.rs
//!
//! ## Overview
//!
//! Implements `cmdbridge pick`, which opens the platform's native dialog and
//! prints the chosen path. `pick folder` prints the path of the LiveKit CLI
//! executable inside the chosen folder.
//!
//! ## Usage
//!
//! ```bash
//! cmdbridge pick file
//! cmdbridge pick folder
//! ```
//!
use crate::common::dialog::{self, DialogPicker};
use crate::core::error::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    /// Choose the CLI executable directly.
    File,
    /// Choose the folder that contains the CLI executable.
    Folder,
}

/// Arguments for the 'pick' command.
#[derive(Parser, Debug)]
pub struct PickArgs {
    #[arg(value_enum)]
    pub target: PickTarget,
}

/// Handler for the 'pick' command.
pub async fn handle_pick(args: PickArgs) -> Result<()> {
    // Dialogs block until the user answers.
    let path = tokio::task::spawn_blocking(move || {
        let picker = dialog::native_picker()?;
        info!("Opening {:?} dialog on {}", args.target, picker.platform());
        select(picker.as_ref(), args.target)
    })
    .await??;

    println!("{}", path.display());
    Ok(())
}

fn select(
    picker: &dyn DialogPicker,
    target: PickTarget,
) -> std::result::Result<std::path::PathBuf, dialog::DialogError> {
    match target {
        PickTarget::File => picker.select_file(),
        PickTarget::Folder => picker.select_folder(),
    }
}
