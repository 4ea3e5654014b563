//! Test doubles shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io,
    path::{Path, PathBuf},
};

use crate::{
    app::{DirectoryListing, Volume},
    error::{BrowseError, Result},
    fs_utils::{Filesystem, Launcher, LocalFs},
    input::{InputEvent, InputSource},
    mode::EntryKind,
};

/// Real filesystem with a scripted set of volumes.
pub struct FixedVolumes {
    volumes: RefCell<Vec<Volume>>,
    enumerations: Cell<usize>,
}

impl FixedVolumes {
    pub fn new(volumes: Vec<Volume>) -> Self {
        Self {
            volumes: RefCell::new(volumes),
            enumerations: Cell::new(0),
        }
    }

    /// Simulate drives being mounted or ejected.
    pub fn replace_volumes(&self, volumes: Vec<Volume>) {
        *self.volumes.borrow_mut() = volumes;
    }

    /// How many times the volume list has been asked for.
    pub fn enumerations(&self) -> usize {
        self.enumerations.get()
    }
}

impl Filesystem for FixedVolumes {
    fn volumes(&self) -> Vec<Volume> {
        self.enumerations.set(self.enumerations.get() + 1);
        self.volumes.borrow().clone()
    }

    fn read_listing(&self, dir: &Path) -> Result<DirectoryListing> {
        LocalFs.read_listing(dir)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        LocalFs.create_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        LocalFs.remove_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        LocalFs.remove_file(path)
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        LocalFs.kind(path)
    }
}

/// Remembers what it was asked to launch.
#[derive(Default)]
pub struct RecordingLauncher {
    pub launched: Vec<PathBuf>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        Self {
            launched: Vec::new(),
            fail: true,
        }
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, path: &Path) -> Result<()> {
        if self.fail {
            return Err(BrowseError::Launch {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "no handler"),
            });
        }
        self.launched.push(path.to_path_buf());
        Ok(())
    }
}

/// Replays canned answers. Running out of events yields `Quit`.
#[derive(Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    lines: VecDeque<Option<String>>,
    confirms: VecDeque<bool>,
    pub acknowledged: Vec<String>,
}

impl ScriptedInput {
    pub fn with_events(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn with_lines<'a>(mut self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        self.lines
            .extend(lines.into_iter().map(|line| Some(line.to_string())));
        self
    }

    pub fn with_aborted_line(mut self) -> Self {
        self.lines.push_back(None);
        self
    }

    pub fn with_confirms(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirms.extend(answers);
        self
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        Ok(self.events.pop_front().unwrap_or(InputEvent::Quit))
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted line"))
    }

    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        self.confirms
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer"))
    }

    fn acknowledge(&mut self, message: &str) -> io::Result<()> {
        self.acknowledged.push(message.to_string());
        Ok(())
    }
}
