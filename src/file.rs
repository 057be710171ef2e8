//! Leaf entities carrying content and metadata

use crate::entity::{same_name, Entity, Entry};
use crate::error::Result;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// A file: a name and extension plus opaque content metadata.
///
/// Size, creation time and content are carried as given and never
/// inspected. In particular `size` is the declared size and need not match
/// `content.len()`.
///
/// Two files are equal when name, size and extension match. Content and
/// creation time do not take part, so files with different bytes can
/// compare equal.
#[derive(Debug, Clone)]
pub struct File {
    pub(crate) entry: Entry,
    size: u64,
    created: SystemTime,
    content: Vec<u8>,
    extension: String,
}

impl File {
    /// Create a parentless file.
    ///
    /// Attach it with [`MemoryFS::insert_file`](crate::filesystem::MemoryFS::insert_file)
    /// or hand it to the manager.
    pub fn new(
        name: impl Into<String>,
        size: u64,
        created: SystemTime,
        content: Vec<u8>,
        extension: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            entry: Entry::new(name, None)?,
            size,
            created,
            content,
            extension: extension.into(),
        })
    }

    /// Create a parentless file whose size is the content length, stamped now.
    pub fn with_content(
        name: impl Into<String>,
        extension: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let content = content.into();
        Self::new(
            name,
            content.len() as u64,
            SystemTime::now(),
            content,
            extension,
        )
    }

    /// Declared size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `name.extension`, or just the name when the extension is empty.
    pub fn display_name(&self) -> String {
        if self.extension.is_empty() {
            self.entry.name.clone()
        } else {
            format!("{}.{}", self.entry.name, self.extension)
        }
    }

    /// Duplicate this file.
    ///
    /// The copy shares the name, extension, size and parent link, and gets
    /// its own timestamp value and content buffer. Content is copied as is;
    /// the declared size is never used to reshape it. The copy is not
    /// registered in any folder.
    pub fn duplicate(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            size: self.size,
            created: self.created,
            content: self.content.clone(),
            extension: self.extension.clone(),
        }
    }

    /// Whether this file would collide with `name`/`extension` in one folder.
    pub(crate) fn collides_with(&self, name: &str, extension: &str) -> bool {
        same_name(&self.entry.name, name) && same_name(&self.extension, extension)
    }
}

impl Entity for File {
    fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.entry.name == other.entry.name
            && self.extension == other.extension
    }
}

impl Eq for File {}

impl Hash for File {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entry.name.hash(state);
        self.size.hash(state);
        self.extension.hash(state);
    }
}
