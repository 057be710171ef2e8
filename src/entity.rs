//! Shared identity for everything placed in the tree.
//!
//! Files and folders both embed an [`Entry`]: a display name plus a
//! non-owning link to the folder that holds them. Entities are addressed by
//! the copyable handles [`FileId`] and [`FolderId`], which index into the
//! arena kept by [`MemoryFS`](crate::filesystem::MemoryFS).

use crate::error::{Error, Result};

/// Handle to a file stored in a [`MemoryFS`](crate::filesystem::MemoryFS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

/// Handle to a folder stored in a [`MemoryFS`](crate::filesystem::MemoryFS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub(crate) usize);

impl FileId {
    /// Get the raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl FolderId {
    /// Get the raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Either kind of tree entity, for callers that treat both alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    File(FileId),
    Folder(FolderId),
}

impl From<FileId> for EntityId {
    fn from(id: FileId) -> Self {
        EntityId::File(id)
    }
}

impl From<FolderId> for EntityId {
    fn from(id: FolderId) -> Self {
        EntityId::Folder(id)
    }
}

/// Read access common to files and folders.
pub trait Entity {
    /// The entity's embedded name and parent link.
    fn entry(&self) -> &Entry;

    /// Display name, in the case it was given.
    fn name(&self) -> &str {
        &self.entry().name
    }

    /// The folder this entity points at as its parent, if any.
    fn parent(&self) -> Option<FolderId> {
        self.entry().parent
    }
}

/// A name and an optional parent link.
///
/// The parent link does not imply membership: a folder only holds the
/// entities in its own collections. A freshly duplicated entity points at
/// its source's parent without being registered there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) parent: Option<FolderId>,
}

impl Entry {
    /// Create an entry, rejecting empty or whitespace-only names.
    pub fn new(name: impl Into<String>, parent: Option<FolderId>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, parent })
    }

    /// Replace the name. Collision rules live with the owning collection;
    /// this level only checks the name itself.
    pub fn rename(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Point at a new parent without any validation.
    pub fn reparent(&mut self, parent: Option<FolderId>) {
        self.parent = parent;
    }
}

/// Reject names that are empty once trimmed.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid("Name cannot be null or empty."));
    }
    Ok(())
}

/// Case-insensitive name comparison used for every collision check.
///
/// Stored names keep their original case; only comparisons fold it.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
