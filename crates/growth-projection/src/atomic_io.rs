//! Atomic report file output.
//!
//! Reports are written to a hidden temporary file in the target directory and
//! then renamed over the target, so readers never observe a partial report.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::error::ReportError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to `path`, replacing any existing file atomically.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`ReportError::WriteError`] if the path has no file name, the
/// parent directory cannot be opened, or the file cannot be written.
pub fn write_report_file(path: &Utf8Path, contents: &str) -> Result<(), ReportError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| ReportError::WriteError {
        path: path.to_path_buf(),
        message: "report path must be a file".to_owned(),
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
        ReportError::WriteError {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;

    write_atomic(&dir, Utf8Path::new(file_name), contents)?;
    debug!(path = %path, bytes = contents.len(), "report written");
    Ok(())
}

/// Writes `contents` to a single-component `path` inside `dir` atomically.
pub(crate) fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), ReportError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(ReportError::WriteError {
            path: path.to_path_buf(),
            message: "report path must be a file".to_owned(),
        });
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    write_to_temp_file(dir, &tmp_name, path, contents)?;
    rename_temp_to_target(dir, &tmp_name, file_name, path)?;
    sync_directory(dir);

    Ok(())
}

fn write_to_temp_file(
    dir: &Dir,
    tmp_name: &str,
    target_path: &Utf8Path,
    contents: &str,
) -> Result<(), ReportError> {
    let tmp_path = target_path.with_file_name(tmp_name);
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| ReportError::WriteError {
            path: tmp_path.clone(),
            message: err.to_string(),
        })?;

    if let Err(err) = file.write_all(contents.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(ReportError::WriteError {
            path: tmp_path,
            message: err.to_string(),
        });
    }

    Ok(())
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
    target_path: &Utf8Path,
) -> Result<(), ReportError> {
    if let Err(err) = replace_target(dir, tmp_name, target_name) {
        // Leave no temporary file behind when the rename fails.
        drop(dir.remove_file(tmp_name));
        return Err(ReportError::WriteError {
            path: target_path.to_path_buf(),
            message: err.to_string(),
        });
    }
    Ok(())
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        debug!("report directory sync skipped");
    }
}
