//! Orbit commands: predict a companion position, list supported companions.

use std::path::Path;

use crate::config::Settings;

use super::{format::format_prediction, resolve_time};

pub(super) fn cmd_predict(
    settings: &Settings,
    companion: &str,
    time: Option<&str>,
    catalog: Option<&Path>,
) -> Result<(), String> {
    let catalog = settings.catalog(catalog).map_err(|e| e.to_string())?;
    let at = resolve_time(time)?;

    if let Some(offset) = catalog.fixed_position(companion) {
        println!("RA Offset = {:.3} mas (fixed)", offset.ra);
        println!("Dec Offset = {:.3} mas (fixed)", offset.dec);
        return Ok(());
    }

    let prediction = catalog
        .prediction(companion, at)
        .map_err(|e| format!("failed to predict {companion}: {e}"))?;

    for line in format_prediction(&prediction) {
        println!("{line}");
    }
    Ok(())
}

pub(super) fn cmd_list(settings: &Settings, catalog: Option<&Path>) -> Result<(), String> {
    let catalog = settings.catalog(catalog).map_err(|e| e.to_string())?;
    let names = catalog
        .names()
        .map_err(|e| format!("failed to list orbits: {e}"))?;

    if names.is_empty() {
        println!("No supported companions");
        return Ok(());
    }

    for name in &names {
        println!("    {name}");
    }
    Ok(())
}
