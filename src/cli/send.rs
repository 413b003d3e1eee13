//! Send command: copy a written plan to the instrument workstation.

use std::path::Path;

use crate::{config::Settings, transfer};

pub(super) fn cmd_send(settings: &Settings, file: &Path, host: &str) -> Result<(), String> {
    if !file.is_file() {
        return Err(format!("no plan file at {}", file.display()));
    }

    let destination =
        transfer::send(file, host, &settings.remote_dir).map_err(|e| e.to_string())?;
    eprintln!("Sent {} → {destination}", file.display());
    Ok(())
}
