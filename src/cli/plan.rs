//! Plan command: observing block in, templates out.

use std::path::PathBuf;

use crate::{
    config::{ObservingBlock, Settings},
    planner,
    storage::Storage,
    transfer,
};

use super::{format::format_template, resolve_time};

pub(super) struct PlanArgs {
    pub block: PathBuf,
    pub time: Option<String>,
    pub out: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub send: Option<String>,
}

pub(super) fn cmd_plan(settings: &Settings, args: &PlanArgs) -> Result<(), String> {
    let block = ObservingBlock::load(&args.block).map_err(|e| e.to_string())?;
    let at = resolve_time(args.time.as_deref())?;
    let catalog = settings
        .catalog(args.catalog.as_deref())
        .map_err(|e| e.to_string())?;

    let plan = planner::plan(&block.observation, &block.sequence, &catalog, at)
        .map_err(|e| format!("failed to plan {}: {e}", args.block.display()))?;

    for (i, template) in plan.templates.iter().enumerate() {
        println!("{}", format_template(i + 1, template));
    }
    eprintln!("Estimated time for OB: {}", plan.estimate);

    let out = args.out.as_ref().unwrap_or(&settings.out_dir);
    let storage =
        Storage::new(out).map_err(|e| format!("failed to open {}: {e}", out.display()))?;
    let path = storage
        .write_plan(&plan)
        .map_err(|e| format!("failed to write plan: {e}"))?;
    eprintln!("Planned {} → {}", plan.star, path.display());

    if let Some(host) = &args.send {
        let destination = transfer::send(&path, host, &settings.remote_dir)
            .map_err(|e| e.to_string())?;
        eprintln!("Sent → {destination}");
    }

    Ok(())
}
