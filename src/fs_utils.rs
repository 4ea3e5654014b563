use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use sysinfo::Disks;

use crate::{
    app::{DirectoryListing, Entry, Volume},
    error::{BrowseError, Result},
    mode::EntryKind,
};

/// Filesystem operations the controller is allowed to perform.
pub trait Filesystem {
    /// Enumerate mounted volumes. Called every time the root menu is shown.
    fn volumes(&self) -> Vec<Volume>;
    /// Immediate subdirectories and files of `dir`, sorted.
    fn read_listing(&self, dir: &Path) -> Result<DirectoryListing>;
    fn create_dir(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn kind(&self, path: &Path) -> Result<EntryKind>;
}

/// Hands a file to whatever the OS associates with it.
pub trait Launcher {
    fn launch(&mut self, path: &Path) -> Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn volumes(&self) -> Vec<Volume> {
        let disks = Disks::new_with_refreshed_list();
        let volumes = disks
            .list()
            .iter()
            .map(|disk| Volume {
                mount_point: disk.mount_point().to_path_buf(),
                label: disk.name().to_string_lossy().into_owned(),
                kind: format!("{:?}", disk.kind()),
                file_system: disk.file_system().to_string_lossy().into_owned(),
                total_space: disk.total_space(),
                available_space: disk.available_space(),
            })
            .collect();
        let volumes = normalize_volumes(volumes);
        debug!("enumerated {} volume(s)", volumes.len());
        volumes
    }

    fn read_listing(&self, dir: &Path) -> Result<DirectoryListing> {
        let mut listing = DirectoryListing::default();
        for entry in fs::read_dir(dir).map_err(|e| BrowseError::io("read", dir, e))? {
            let entry = entry.map_err(|e| BrowseError::io("read", dir, e))?;
            let path = entry.path();
            let item = Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.clone(),
            };
            // Follow links so a link to a directory lists as a directory;
            // anything unresolvable is listed with the files.
            if fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false) {
                listing.subdirs.push(item);
            } else {
                listing.files.push(item);
            }
        }
        sort_entries(&mut listing.subdirs);
        sort_entries(&mut listing.files);
        Ok(listing)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| BrowseError::io("create", path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| BrowseError::io("delete", path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| BrowseError::io("delete", path, e))
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(EntryKind::Directory),
            Ok(meta) if meta.is_file() => Ok(EntryKind::File),
            Ok(_) => Ok(EntryKind::Other),
            // A link that exists but does not resolve.
            Err(_) if fs::symlink_metadata(path).is_ok() => Ok(EntryKind::Other),
            Err(e) => Err(BrowseError::io("inspect", path, e)),
        }
    }
}

/// Launches files through the desktop's default handler.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, path: &Path) -> Result<()> {
        open::that(path).map_err(|source| BrowseError::Launch {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Sort case-insensitively by name, falling back to the exact name so the
/// order is total.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Order by mount point and drop duplicate mounts. An empty result on Unix
/// still offers the root directory.
pub fn normalize_volumes(mut volumes: Vec<Volume>) -> Vec<Volume> {
    volumes.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
    volumes.dedup_by(|a, b| a.mount_point == b.mount_point);
    if volumes.is_empty() && cfg!(unix) {
        volumes.push(Volume::bare("/"));
    }
    volumes
}

/// Join a user-supplied folder name onto `dir`, rejecting names that would
/// escape it or that are empty.
pub fn child_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed.contains('\0');
    if invalid {
        return Err(BrowseError::InvalidName(name.to_string()));
    }
    Ok(dir.join(trimmed))
}

/// Format a byte count in gigabytes with two decimals.
pub fn format_gib(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

/// True when the underlying I/O error is `NotFound`.
pub fn is_not_found(err: &BrowseError) -> bool {
    matches!(err, BrowseError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
}
