//! Partition sizes from the mount table, as printed by `df -P -k`:
//!
//! ```text
//! Filesystem     1024-blocks      Used Available Capacity Mounted on
//! /dev/sda2        490617784 215324412 250296788      47% /
//! ```

use std::path::Path;

use crate::{
    error::{Error, Result},
    process::{CommandLine, Run},
};


#[derive(Debug, Clone, PartialEq)]
pub struct Mount {
    pub filesystem: String,
    /// Size column, as reported.
    pub size: String,
    pub mount_point: String,
}

impl Mount {
    fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match &fields[..] {
            [filesystem, size, _used, _avail, _capacity, mount_point @ ..]
                if !mount_point.is_empty() =>
            {
                Some(Self {
                    filesystem: filesystem.to_string(),
                    size: size.to_string(),
                    // Mount points may contain spaces.
                    mount_point: mount_point.join(" "),
                })
            }
            _ => None,
        }
    }

    pub fn size_kb(&self) -> Result<u64> {
        self.size.parse().map_err(|_| Error::InvalidSize {
            mount_point: self.mount_point.clone(),
            value: self.size.clone(),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MountTable {
    mounts: Vec<Mount>,
}

impl MountTable {
    pub fn parse(out: &str) -> Self {
        let mut mounts = Vec::new();
        for line in out.lines() {
            if line.trim().is_empty() || line.starts_with("Filesystem") {
                continue;
            }
            match Mount::parse(line) {
                Some(mount) => mounts.push(mount),
                None => {
                    tracing::warn!(?line, "Unexpected line in mount table.");
                }
            }
        }
        Self { mounts }
    }

    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    /// The last entry wins, since a later mount hides an earlier one on the
    /// same mount point.
    pub fn find(&self, mount_point: &str) -> Option<&Mount> {
        self.mounts
            .iter()
            .rev()
            .find(|m| m.mount_point == mount_point)
    }

    /// Size of the partition holding `path`: the mount point equal to `path`
    /// or, failing that, to its nearest ancestor. `0` if `path` is blank or
    /// nothing matches all the way up.
    pub fn partition_size_kb(&self, path: &str) -> Result<u64> {
        let Some(mut dir) = normalize(path) else {
            return Ok(0);
        };
        // Terminates: each step moves to a strictly shorter path.
        loop {
            if let Some(mount) = self.find(dir) {
                tracing::debug!(path, mount_point = dir, "Found mount point.");
                return mount.size_kb();
            }
            match parent(dir) {
                Some(up) => dir = up,
                None => {
                    tracing::warn!(path, "No mount point found.");
                    return Ok(0);
                }
            }
        }
    }
}

/// Trimmed, without trailing slashes (except for the root itself).
fn normalize(path: &str) -> Option<&str> {
    let path = path.trim();
    match path.trim_end_matches('/') {
        "" if path.is_empty() => None,
        "" => Some("/"),
        path => Some(path),
    }
}

/// `None` when there is nowhere further up to go.
fn parent(dir: &str) -> Option<&str> {
    Path::new(dir)
        .parent()
        .and_then(Path::to_str)
        .filter(|up| !up.is_empty() && up.len() < dir.len())
}

/// Runs the mount table command and resolves `path` against its output. A
/// blank `path` is `0` without running anything.
#[tracing::instrument(skip(runner))]
pub fn partition_size_kb<R: Run + ?Sized>(
    runner: &R,
    df: &CommandLine,
    path: &str,
) -> Result<u64> {
    if path.trim().is_empty() {
        return Ok(0);
    }
    let out = df.run_with(runner)?;
    MountTable::parse(&out).partition_size_kb(path)
}
