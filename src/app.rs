use std::path::{Path, PathBuf};

use crate::mode::Mode;

/// A mounted storage root offered in the root menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub mount_point: PathBuf,
    pub label: String,
    pub kind: String,
    pub file_system: String,
    pub total_space: u64,
    pub available_space: u64,
}

impl Volume {
    /// A volume known only by its mount point.
    pub fn bare(mount_point: impl Into<PathBuf>) -> Self {
        Self {
            mount_point: mount_point.into(),
            label: String::new(),
            kind: String::new(),
            file_system: String::new(),
            total_space: 0,
            available_space: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
}

/// Snapshot of one directory. Selection indices address `subdirs` first,
/// then `files`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub subdirs: Vec<Entry>,
    pub files: Vec<Entry>,
}

impl DirectoryListing {
    pub fn len(&self) -> usize {
        self.subdirs.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a flat index into either a subdirectory or a file.
    pub fn entry_at(&self, index: usize) -> Option<SelectedEntry<'_>> {
        match self.subdirs.get(index) {
            Some(dir) => Some(SelectedEntry::Directory(dir)),
            None => self
                .files
                .get(index - self.subdirs.len())
                .map(SelectedEntry::File),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedEntry<'a> {
    Directory(&'a Entry),
    File(&'a Entry),
}

impl<'a> SelectedEntry<'a> {
    pub fn entry(&self) -> &'a Entry {
        match *self {
            SelectedEntry::Directory(e) | SelectedEntry::File(e) => e,
        }
    }

    pub fn path(&self) -> &'a Path {
        &self.entry().path
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Volumes(Vec<Volume>),
    Directory(DirectoryListing),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Volumes(volumes) => volumes.len(),
            Listing::Directory(listing) => listing.len(),
        }
    }
}

/// Everything the renderer needs to know about where the user is.
///
/// The mode is implied by the listing variant, so the two can never
/// disagree. Replacing the listing always puts the selection back on the
/// first row.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    current_path: Option<PathBuf>,
    listing: Listing,
    selected: usize,
}

impl NavigationState {
    pub fn new(volumes: Vec<Volume>) -> Self {
        Self {
            current_path: None,
            listing: Listing::Volumes(volumes),
            selected: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.listing {
            Listing::Volumes(_) => Mode::RootMenu,
            Listing::Directory(_) => Mode::DirectoryView,
        }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn volumes(&self) -> &[Volume] {
        match &self.listing {
            Listing::Volumes(volumes) => volumes,
            Listing::Directory(_) => &[],
        }
    }

    pub fn directory(&self) -> Option<&DirectoryListing> {
        match &self.listing {
            Listing::Directory(listing) => Some(listing),
            Listing::Volumes(_) => None,
        }
    }

    pub fn is_at_filesystem_root(&self) -> bool {
        self.current_path.is_none()
    }

    pub fn selected_volume(&self) -> Option<&Volume> {
        self.volumes().get(self.selected)
    }

    pub fn current_entry(&self) -> Option<SelectedEntry<'_>> {
        self.directory()?.entry_at(self.selected)
    }

    pub fn current_entry_path(&self) -> Option<&Path> {
        self.current_entry().map(|entry| entry.path())
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.listing.len() {
            self.selected += 1;
        }
    }

    pub fn show_root_menu(&mut self, volumes: Vec<Volume>) {
        self.current_path = None;
        self.listing = Listing::Volumes(volumes);
        self.selected = 0;
    }

    pub fn show_directory(&mut self, path: PathBuf, listing: DirectoryListing) {
        self.current_path = Some(path);
        self.listing = Listing::Directory(listing);
        self.selected = 0;
    }
}
