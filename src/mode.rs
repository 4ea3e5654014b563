/// Which listing the browser is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Volume picker, the logical top of the hierarchy.
    RootMenu,
    /// Contents of a single directory.
    DirectoryView,
}

/// Kind of a filesystem entry as seen at the time of the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Anything that is neither, e.g. a dangling or looping link.
    Other,
}
