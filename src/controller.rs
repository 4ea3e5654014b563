use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::actions::{create_folder, delete_entry, launch_file};
use crate::app::{NavigationState, SelectedEntry};
use crate::config::BrowserConfig;
use crate::error::{BrowseError, Result};
use crate::fs_utils::{is_not_found, Filesystem, Launcher};
use crate::input::{InputEvent, InputSource};
use crate::mode::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown under the listing until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// Applies input events to the navigation state.
///
/// Every filesystem failure is caught here and turned into an error
/// status; the state is only replaced once a new listing has been read
/// successfully.
pub struct Controller<F, L> {
    state: NavigationState,
    fs: F,
    launcher: L,
    settings: BrowserConfig,
    status: Option<Status>,
}

impl<F: Filesystem, L: Launcher> Controller<F, L> {
    pub fn new(fs: F, launcher: L, settings: BrowserConfig) -> Self {
        let state = NavigationState::new(fs.volumes());
        Self {
            state,
            fs,
            launcher,
            settings,
            status: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    #[cfg(test)]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    #[cfg(test)]
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Load `path` and switch to it. On failure the current view is kept.
    ///
    /// Relative paths are resolved against the working directory so that
    /// `Path::parent` can walk all the way up.
    pub fn open_directory(&mut self, path: PathBuf) -> Result<()> {
        let path =
            std::path::absolute(&path).map_err(|e| BrowseError::io("resolve", &path, e))?;
        let listing = self.fs.read_listing(&path)?;
        debug!(
            "entered {} ({} folders, {} files)",
            path.display(),
            listing.subdirs.len(),
            listing.files.len()
        );
        self.state.show_directory(path, listing);
        Ok(())
    }

    pub fn handle_input(&mut self, event: InputEvent, input: &mut dyn InputSource) {
        self.status = None;
        match self.state.mode() {
            Mode::RootMenu => self.handle_root_menu(event),
            Mode::DirectoryView => self.handle_directory(event, input),
        }
    }

    fn handle_root_menu(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveUp => self.state.move_up(),
            InputEvent::MoveDown => self.state.move_down(),
            InputEvent::Confirm => {
                let Some(volume) = self.state.selected_volume() else {
                    return;
                };
                let mount_point = volume.mount_point.clone();
                if let Err(err) = self.open_directory(mount_point) {
                    self.report(err);
                }
            }
            _ => {}
        }
    }

    fn handle_directory(&mut self, event: InputEvent, input: &mut dyn InputSource) {
        match event {
            InputEvent::MoveUp => self.state.move_up(),
            InputEvent::MoveDown => self.state.move_down(),
            InputEvent::Cancel => self.ascend(),
            InputEvent::CreateFolder => self.create_folder(input),
            InputEvent::Delete => self.delete_selected(input),
            InputEvent::Confirm => self.open_selected(input),
            _ => {}
        }
    }

    /// Re-read the current directory, keeping the old snapshot on failure.
    /// A failure here replaces whatever status the caller set.
    fn reload(&mut self) {
        let Some(path) = self.state.current_path().map(Path::to_path_buf) else {
            return;
        };
        if let Err(err) = self.open_directory(path) {
            self.report(err);
        }
    }

    fn ascend(&mut self) {
        let parent = self
            .state
            .current_path()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        match parent {
            Some(parent) => {
                if let Err(err) = self.open_directory(parent) {
                    self.report(err);
                }
            }
            None => {
                debug!("left directory view for root menu");
                self.state.show_root_menu(self.fs.volumes());
            }
        }
    }

    fn create_folder(&mut self, input: &mut dyn InputSource) {
        let Some(dir) = self.state.current_path().map(Path::to_path_buf) else {
            return;
        };
        let name = match input.read_line("Name of the new folder:") {
            Ok(Some(name)) => name,
            Ok(None) => return,
            Err(err) => return self.report(BrowseError::Prompt(err)),
        };
        match create_folder(&self.fs, &dir, &name) {
            Ok(path) => self.inform(format!("Created {}", display_name(&path))),
            Err(err) => self.report(err),
        }
        self.reload();
    }

    fn delete_selected(&mut self, input: &mut dyn InputSource) {
        let Some(path) = self.state.current_entry_path().map(Path::to_path_buf) else {
            return;
        };
        if self.settings.confirm_delete {
            let prompt = format!("Delete {}? (y/N)", display_name(&path));
            match input.confirm(&prompt) {
                Ok(true) => {}
                Ok(false) => return,
                Err(err) => return self.report(BrowseError::Prompt(err)),
            }
        }
        match delete_entry(&self.fs, &path) {
            Ok(()) => self.inform(format!("Deleted {}", display_name(&path))),
            Err(err) if is_not_found(&err) => {
                self.inform(format!("{} no longer exists", display_name(&path)))
            }
            Err(err) => self.report(err),
        }
        self.reload();
    }

    fn open_selected(&mut self, input: &mut dyn InputSource) {
        let (path, is_dir) = match self.state.current_entry() {
            Some(SelectedEntry::Directory(entry)) => (entry.path.clone(), true),
            Some(SelectedEntry::File(entry)) => (entry.path.clone(), false),
            None => return,
        };
        if is_dir {
            if let Err(err) = self.open_directory(path) {
                self.report(err);
            }
            return;
        }
        if self.settings.confirm_launch {
            let message = format!(
                "Selected file: {}\n\nPress any key to launch the file...",
                path.display()
            );
            if let Err(err) = input.acknowledge(&message) {
                return self.report(BrowseError::Prompt(err));
            }
        }
        match launch_file(&self.fs, &mut self.launcher, &path) {
            Ok(()) => self.inform(format!("Launched {}", display_name(&path))),
            Err(err) => self.report(err),
        }
    }

    fn inform(&mut self, text: String) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text,
        });
    }

    /// Log `err` and show it in the status line.
    pub fn report(&mut self, err: BrowseError) {
        warn!("{err}");
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: err.to_string(),
        });
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
