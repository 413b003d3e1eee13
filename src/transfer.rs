//! Transfer: copy a finished plan to the instrument workstation.
//!
//! Shells out to `scp` and waits for it. A failed copy is reported,
//! never retried.

use std::{io, path::Path, process::Command};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("failed to run scp: {0}")]
    Spawn(#[from] io::Error),

    #[error("scp {args} failed: {stderr}")]
    Failed { args: String, stderr: String },
}

/// Copy `file` into `remote_dir` on `host`. Returns the remote destination.
pub fn send(file: &Path, host: &str, remote_dir: &str) -> Result<String, TransferError> {
    let args = scp_args(file, host, remote_dir);
    let output = Command::new("scp").args(&args).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TransferError::Failed {
            args: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    let destination = args[1].clone();
    tracing::info!(file = %file.display(), %destination, "sent plan");
    Ok(destination)
}

/// Arguments for `scp`: the local file, then `<host>:<remote_dir>/.`.
fn scp_args(file: &Path, host: &str, remote_dir: &str) -> Vec<String> {
    let remote_dir = remote_dir.trim_end_matches('/');
    vec![
        file.to_string_lossy().to_string(),
        format!("{host}:{remote_dir}/."),
    ]
}
