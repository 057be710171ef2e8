//! Composite entities holding ordered child collections

use crate::entity::{Entity, Entry, FileId, FolderId};
use crate::error::Result;

/// A folder: a name, a parent link and two ordered child collections.
///
/// The collections hold handles in insertion order. They are only changed
/// through [`MemoryFS`](crate::filesystem::MemoryFS), which checks sibling
/// uniqueness before touching them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub(crate) entry: Entry,
    pub(crate) files: Vec<FileId>,
    pub(crate) folders: Vec<FolderId>,
}

impl Folder {
    /// Create an empty, parentless folder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            entry: Entry::new(name, None)?,
            files: Vec::new(),
            folders: Vec::new(),
        })
    }

    /// Child files in insertion order
    pub fn files(&self) -> &[FileId] {
        &self.files
    }

    /// Child folders in insertion order
    pub fn folders(&self) -> &[FolderId] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }

    /// Duplicate this folder without descending into it.
    ///
    /// The copy gets new collections holding the same child handles, so the
    /// same children become reachable from both folders while their parent
    /// links still name the source. Nothing below is cloned.
    pub fn duplicate(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            files: self.files.clone(),
            folders: self.folders.clone(),
        }
    }
}

impl Entity for Folder {
    fn entry(&self) -> &Entry {
        &self.entry
    }
}
