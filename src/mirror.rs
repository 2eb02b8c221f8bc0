//! Mirror Engine
//!
//! Recreates a directory node's children at a destination path. Three modes
//! of increasing destructiveness:
//!
//! - [`MirrorMode::Copy`] never touches existing destination files.
//! - [`MirrorMode::Replicate`] overwrites existing file contents but leaves
//!   existing permission bits alone.
//! - [`MirrorMode::Replace`] removes the destination first, so everything is
//!   recreated with the source's permission bits.
//!
//! By default only the node's direct children are mirrored: subdirectories
//! are created but their contents are not. [`MirrorScope::Subtree`] repeats
//! the shallow pass over every directory below the node.
//!
//! Every child lands at `destination / <child path relative to the node>`.
//! The first I/O failure aborts the operation; nothing is rolled back.

use crate::error::TreeError;
use crate::tree::NodeRef;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorMode {
    Copy,
    Replicate,
    Replace,
}

/// How far below the source node a mirror reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorScope {
    /// Direct children only
    #[default]
    Shallow,
    /// Every directory under the node
    Subtree,
}

/// Mirror settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorConfig {
    #[serde(default)]
    pub scope: MirrorScope,
}

/// What a mirror operation did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MirrorReport {
    pub directories_created: usize,
    pub files_written: usize,
    pub files_skipped: usize,
}

/// Mirror `source`'s children into `destination`.
#[instrument(
    skip(source),
    fields(source = %source.path().display(), destination = %destination.display())
)]
pub fn mirror(
    source: NodeRef<'_>,
    destination: &Path,
    mode: MirrorMode,
    scope: MirrorScope,
) -> Result<MirrorReport, TreeError> {
    if !source.is_directory() {
        return Err(TreeError::InvalidDirectoryNode(source.path().to_path_buf()));
    }

    let start = Instant::now();
    info!("Starting mirror");

    let mut report = MirrorReport::default();
    if mode == MirrorMode::Replace {
        clear(source, destination)?;
    }
    ensure_dir(destination, source.permissions()?, &mut report)?;

    let pass = Pass {
        base: source.path(),
        destination,
        overwrite: mode != MirrorMode::Copy,
    };
    match scope {
        MirrorScope::Shallow => pass.mirror_children(source, &mut report)?,
        MirrorScope::Subtree => {
            let mut pending = vec![source];
            while let Some(dir) = pending.pop() {
                pass.mirror_children(dir, &mut report)?;
                pending.extend(dir.directories());
            }
        }
    }

    info!(
        directories_created = report.directories_created,
        files_written = report.files_written,
        files_skipped = report.files_skipped,
        duration_ms = start.elapsed().as_millis(),
        "Mirror completed"
    );
    Ok(report)
}

impl NodeRef<'_> {
    /// Shallow copy; existing files and permissions are left untouched.
    pub fn copy(&self, destination: impl AsRef<Path>) -> Result<MirrorReport, TreeError> {
        mirror(*self, destination.as_ref(), MirrorMode::Copy, MirrorScope::Shallow)
    }

    /// Shallow copy that overwrites existing file contents.
    pub fn replicate(&self, destination: impl AsRef<Path>) -> Result<MirrorReport, TreeError> {
        mirror(
            *self,
            destination.as_ref(),
            MirrorMode::Replicate,
            MirrorScope::Shallow,
        )
    }

    /// Remove `destination`, then mirror direct children into it.
    pub fn replace(&self, destination: impl AsRef<Path>) -> Result<MirrorReport, TreeError> {
        mirror(
            *self,
            destination.as_ref(),
            MirrorMode::Replace,
            MirrorScope::Shallow,
        )
    }
}

struct Pass<'p> {
    base: &'p Path,
    destination: &'p Path,
    overwrite: bool,
}

impl Pass<'_> {
    fn target(&self, child: &NodeRef<'_>) -> PathBuf {
        let relative = child
            .path()
            .strip_prefix(self.base)
            .unwrap_or_else(|_| Path::new(child.name()));
        self.destination.join(relative)
    }

    fn mirror_children(&self, dir: NodeRef<'_>, report: &mut MirrorReport) -> Result<(), TreeError> {
        for child in dir.directories() {
            ensure_dir(&self.target(&child), child.permissions()?, report)?;
        }

        for file in dir.files() {
            let target = self.target(&file);
            if !self.overwrite && exists(&target)? {
                debug!(target = %target.display(), "Keeping existing file");
                report.files_skipped += 1;
                continue;
            }
            write_file(&target, file.contents()?, file.permissions()?)?;
            debug!(target = %target.display(), "Wrote file");
            report.files_written += 1;
        }
        Ok(())
    }
}

/// Remove whatever is at `destination`, refusing when it holds the source.
fn clear(source: NodeRef<'_>, destination: &Path) -> Result<(), TreeError> {
    let metadata = match fs::symlink_metadata(destination) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(TreeError::io(destination, e)),
    };

    if metadata.is_dir() {
        let source_uri = fs::canonicalize(source.path()).map_err(|e| TreeError::io(source.path(), e))?;
        let destination_uri =
            fs::canonicalize(destination).map_err(|e| TreeError::io(destination, e))?;
        if source_uri.starts_with(&destination_uri) {
            return Err(TreeError::io(
                destination,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "destination contains the source directory",
                ),
            ));
        }
        debug!(destination = %destination.display(), "Removing destination tree");
        fs::remove_dir_all(destination).map_err(|e| TreeError::io(destination, e))
    } else {
        fs::remove_file(destination).map_err(|e| TreeError::io(destination, e))
    }
}

fn exists(target: &Path) -> Result<bool, TreeError> {
    match fs::metadata(target) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TreeError::io(target, e)),
    }
}

/// Create `target` and any missing parents with `mode`; existing
/// directories keep their permission bits.
fn ensure_dir(target: &Path, mode: u32, report: &mut MirrorReport) -> Result<(), TreeError> {
    if target.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(target).map_err(|e| TreeError::io(target, e))?;
    debug!(target = %target.display(), mode = %format!("{:o}", mode), "Created directory");
    report.directories_created += 1;
    Ok(())
}

/// Write `contents` to `target`; `mode` only applies when the file is created.
fn write_file(target: &Path, contents: &[u8], mode: u32) -> Result<(), TreeError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(target).map_err(|e| TreeError::io(target, e))?;
    file.write_all(contents)
        .map_err(|e| TreeError::io(target, e))
}
