use std::path::{Path, PathBuf};

use log::info;

use crate::error::{BrowseError, Result};
use crate::fs_utils::{child_path, Filesystem, Launcher};
use crate::mode::EntryKind;

/// Create a folder called `name` directly under `dir`.
pub fn create_folder(fs: &dyn Filesystem, dir: &Path, name: &str) -> Result<PathBuf> {
    let path = child_path(dir, name)?;
    fs.create_dir(&path)?;
    info!("created folder {}", path.display());
    Ok(path)
}

/// Delete a file, or a directory together with everything inside it.
pub fn delete_entry(fs: &dyn Filesystem, path: &Path) -> Result<()> {
    match fs.kind(path)? {
        EntryKind::Directory => fs.remove_dir_all(path)?,
        // Links are removed themselves, never their targets.
        EntryKind::File | EntryKind::Other => fs.remove_file(path)?,
    }
    info!("deleted {}", path.display());
    Ok(())
}

/// Launch `path` if it is a regular file.
pub fn launch_file(fs: &dyn Filesystem, launcher: &mut dyn Launcher, path: &Path) -> Result<()> {
    match fs.kind(path)? {
        EntryKind::File => {
            launcher.launch(path)?;
            info!("launched {}", path.display());
            Ok(())
        }
        EntryKind::Directory | EntryKind::Other => {
            Err(BrowseError::Unsupported(path.to_path_buf()))
        }
    }
}
