//! Thin I/O adapter between the document model and the places a crontab
//! actually lives.
//!
//! The core model is purely textual; everything here funnels through the two
//! entry points [`CronTab::parse`] and [`CronTab::render`]. Files are read
//! and written directly, a user's installed crontab goes through the system
//! `crontab` binary.

use crate::error::{CronError, CronResult};
use crate::tab::CronTab;
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Read and parse a crontab file.
pub fn read_file(path: impl AsRef<Path>) -> CronResult<CronTab> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!("read crontab from {}", path.display());
    CronTab::parse(&text)
}

/// Write a document to a crontab file.
pub fn write_file(tab: &CronTab, path: impl AsRef<Path>) -> CronResult<()> {
    let path = path.as_ref();
    std::fs::write(path, tab.render())?;
    debug!("wrote crontab to {}", path.display());
    Ok(())
}

/// Read a user's installed crontab via `crontab -l`.
///
/// `None` means the invoking user. A user with no installed crontab reads as
/// an empty document.
pub fn read_user(user: Option<&str>) -> CronResult<CronTab> {
    let mut command = Command::new("crontab");
    if let Some(user) = user {
        command.args(["-u", user]);
    }
    let output = command.arg("-l").output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // `crontab -l` reports a missing tab on stderr with a non-zero exit
        if stderr.contains("no crontab") {
            return Ok(CronTab::new());
        }
        return Err(CronError::Scheduler(stderr.trim().to_string()));
    }
    let text = String::from_utf8_lossy(&output.stdout);
    debug!("read installed crontab for {}", user.unwrap_or("current user"));
    CronTab::parse(&text)
}

/// Install a document as a user's crontab by piping it to `crontab -`.
pub fn install_user(tab: &CronTab, user: Option<&str>) -> CronResult<()> {
    let mut command = Command::new("crontab");
    if let Some(user) = user {
        command.args(["-u", user]);
    }
    let mut child = command
        .arg("-")
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(tab.render().as_bytes())?;
    }
    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CronError::Scheduler(stderr.trim().to_string()));
    }
    info!("installed crontab for {}", user.unwrap_or("current user"));
    Ok(())
}
