// src/transform/command.rs

//! Shared plumbing for invoking external tools.

use std::process::Stdio;

use anyhow::{anyhow, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Run an external tool to completion, optionally feeding `stdin`, and
/// return its stdout.
///
/// stderr is logged line by line at debug level so tool diagnostics show up
/// in `SITEPIPE_LOG=debug` output without polluting normal runs.
pub async fn run_tool(program: &str, args: &[String], stdin: Option<&[u8]>) -> Result<Vec<u8>> {
    debug!(program, ?args, "invoking external tool");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning '{program}' (is it installed and on PATH?)"))?;

    if let Some(input) = stdin {
        let mut handle = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("stdin handle missing for '{program}'"))?;
        handle
            .write_all(input)
            .await
            .with_context(|| format!("writing stdin of '{program}'"))?;
        // Close stdin so the tool sees EOF.
        drop(handle);
    }

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("waiting for '{program}'"))?;

    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!(program, "stderr: {}", line);
    }

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        return Err(anyhow!(
            "'{program}' exited with status {code}: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(output.stdout)
}
