//! In-memory arena holding every file and folder of a tree
//!
//! [`MemoryFS`] owns all entities ever constructed through it, whether they
//! are attached to a folder or floating. Entities refer to each other only
//! through [`FileId`] / [`FolderId`] handles: a folder lists its children by
//! handle, and every entity names its parent by handle. Removing an entity
//! from a folder detaches it; the entity itself stays addressable.
//!
//! All folder-level invariants are enforced here:
//!
//! - no two files in one folder share name and extension (case-insensitive),
//! - no two folders in one folder share a name (case-insensitive),
//! - a folder never becomes its own ancestor.

use crate::entity::{same_name, Entity, EntityId, FileId, FolderId};
use crate::error::{Error, Result};
use crate::file::File;
use crate::folder::Folder;
use log::{debug, trace};
use std::collections::HashSet;

/// Counts gathered by [`MemoryFS::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Folders below the starting folder
    pub folders: usize,
    /// Files at or below the starting folder
    pub files: usize,
    /// Sum of declared file sizes
    pub total_size: u64,
}

/// Arena of files and folders
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: Vec<File>,
    folders: Vec<Folder>,
}

impl MemoryFS {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a file by handle
    pub fn get_file(&self, id: FileId) -> Option<&File> {
        self.files.get(id.0)
    }

    /// Look up a folder by handle
    pub fn get_folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(id.0)
    }

    /// Look up a file, failing for handles from another arena
    pub fn file(&self, id: FileId) -> Result<&File> {
        self.get_file(id).ok_or_else(|| unknown_file(id))
    }

    /// Look up a folder, failing for handles from another arena
    pub fn folder(&self, id: FolderId) -> Result<&Folder> {
        self.get_folder(id).ok_or_else(|| unknown_folder(id))
    }

    /// Look up either kind of entity
    pub fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        match id {
            EntityId::File(id) => self.get_file(id).map(|f| f as &dyn Entity),
            EntityId::Folder(id) => self.get_folder(id).map(|f| f as &dyn Entity),
        }
    }

    fn file_mut(&mut self, id: FileId) -> Result<&mut File> {
        self.files.get_mut(id.0).ok_or_else(|| unknown_file(id))
    }

    fn folder_mut(&mut self, id: FolderId) -> Result<&mut Folder> {
        self.folders.get_mut(id.0).ok_or_else(|| unknown_folder(id))
    }

    /// Store a new folder, registering it under `parent` when one is given.
    ///
    /// Fails without storing anything if the parent already holds a folder
    /// with the same name.
    pub fn insert_folder(&mut self, mut folder: Folder, parent: Option<FolderId>) -> Result<FolderId> {
        if let Some(parent) = parent {
            self.check_folder_slot(parent, folder.name())?;
        }
        folder.entry.parent = parent;
        let id = self.allocate_folder(folder);
        if let Some(parent) = parent {
            self.folder_mut(parent)?.folders.push(id);
        }
        Ok(id)
    }

    /// Create an empty folder named `name`, registered under `parent` when given
    pub fn new_folder(&mut self, name: &str, parent: Option<FolderId>) -> Result<FolderId> {
        self.insert_folder(Folder::new(name)?, parent)
    }

    /// Store a new file, registering it under `parent` when one is given.
    ///
    /// Fails without storing anything if the parent already holds a file
    /// with the same name and extension.
    pub fn insert_file(&mut self, mut file: File, parent: Option<FolderId>) -> Result<FileId> {
        if let Some(parent) = parent {
            self.check_file_slot(parent, file.name(), file.extension())?;
        }
        file.entry.parent = parent;
        let id = self.allocate_file(file);
        if let Some(parent) = parent {
            self.folder_mut(parent)?.files.push(id);
        }
        Ok(id)
    }

    /// Store an unregistered duplicate of a file (see [`File::duplicate`]).
    pub fn duplicate_file(&mut self, id: FileId) -> Result<FileId> {
        let copy = self.file(id)?.duplicate();
        Ok(self.allocate_file(copy))
    }

    /// Store an unregistered duplicate of a folder (see [`Folder::duplicate`]).
    pub fn duplicate_folder(&mut self, id: FolderId) -> Result<FolderId> {
        let copy = self.folder(id)?.duplicate();
        Ok(self.allocate_folder(copy))
    }

    /// Append `file` to `folder`'s files.
    ///
    /// Only the collection changes; the file's parent link is left as is.
    pub fn add_file(&mut self, folder: FolderId, file: FileId) -> Result<()> {
        let (name, extension) = {
            let file = self.file(file)?;
            (file.name().to_string(), file.extension().to_string())
        };
        self.check_file_slot(folder, &name, &extension)?;
        self.folder_mut(folder)?.files.push(file);
        Ok(())
    }

    /// Append `child` to `folder`'s folders.
    ///
    /// Only the collection changes; the child's parent link is left as is.
    pub fn add_folder(&mut self, folder: FolderId, child: FolderId) -> Result<()> {
        let name = self.folder(child)?.name().to_string();
        self.check_folder_slot(folder, &name)?;
        self.folder_mut(folder)?.folders.push(child);
        Ok(())
    }

    /// Remove the first file in `folder` equal to `file` (name, size and
    /// extension). Returns whether anything was removed.
    pub fn remove_file(&mut self, folder: FolderId, file: FileId) -> Result<bool> {
        let target = self.file(file)?;
        let position = self
            .folder(folder)?
            .files
            .iter()
            .position(|&child| self.files.get(child.0) == Some(target));
        match position {
            Some(index) => {
                self.folder_mut(folder)?.files.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove `child` from `folder`'s folders. Returns whether it was there.
    pub fn remove_folder(&mut self, folder: FolderId, child: FolderId) -> Result<bool> {
        self.folder(child)?;
        let folders = &mut self.folder_mut(folder)?.folders;
        match folders.iter().position(|&id| id == child) {
            Some(index) => {
                folders.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether `folder` holds a file named `name` with `extension`, ignoring case
    pub fn contains_file_with_same_name(&self, folder: FolderId, name: &str, extension: &str) -> bool {
        self.get_folder(folder).is_some_and(|folder| {
            folder
                .files
                .iter()
                .filter_map(|&id| self.get_file(id))
                .any(|file| file.collides_with(name, extension))
        })
    }

    /// Whether `folder` holds a folder named `name`, ignoring case
    pub fn contains_folder_with_same_name(&self, folder: FolderId, name: &str) -> bool {
        self.get_folder(folder).is_some_and(|folder| {
            folder
                .folders
                .iter()
                .filter_map(|&id| self.get_folder(id))
                .any(|child| same_name(child.name(), name))
        })
    }

    /// Whether `folder` holds a file equal to `file`
    pub fn contains_file(&self, folder: FolderId, file: FileId) -> bool {
        let (Some(folder), Some(target)) = (self.get_folder(folder), self.get_file(file)) else {
            return false;
        };
        folder
            .files
            .iter()
            .any(|&child| self.get_file(child) == Some(target))
    }

    /// Whether `folder` holds exactly `child`
    pub fn contains_folder(&self, folder: FolderId, child: FolderId) -> bool {
        self.get_folder(folder)
            .is_some_and(|folder| folder.folders.contains(&child))
    }

    /// Rename a file.
    ///
    /// Fails if the file's parent already holds a file with the new name and
    /// this file's extension. A registered file renamed to its own name
    /// collides with itself.
    pub fn rename_file(&mut self, id: FileId, name: &str) -> Result<()> {
        let file = self.file(id)?;
        if let Some(parent) = file.parent() {
            if self.contains_file_with_same_name(parent, name, file.extension()) {
                return Err(Error::invalid(format!(
                    "A file with the name \"{}\" and extension \"{}\" already exists in the parent folder.",
                    name,
                    file.extension()
                )));
            }
        }
        self.file_mut(id)?.entry.rename(name)?;
        debug!("Renamed file {} to {}", id.0, name);
        Ok(())
    }

    /// Rename a folder.
    ///
    /// Fails if the folder's parent already holds a folder with the new name.
    pub fn rename_folder(&mut self, id: FolderId, name: &str) -> Result<()> {
        if let Some(parent) = self.folder(id)?.parent() {
            if self.contains_folder_with_same_name(parent, name) {
                return Err(Error::invalid(format!(
                    "A folder with the name \"{}\" already exists in the same folder.",
                    name
                )));
            }
        }
        self.folder_mut(id)?.entry.rename(name)?;
        debug!("Renamed folder {} to {}", id.0, name);
        Ok(())
    }

    /// Rename either kind of entity
    pub fn rename(&mut self, id: EntityId, name: &str) -> Result<()> {
        match id {
            EntityId::File(id) => self.rename_file(id, name),
            EntityId::Folder(id) => self.rename_folder(id, name),
        }
    }

    /// Point a file at a new parent. No collection is touched.
    pub fn reparent_file(&mut self, id: FileId, parent: Option<FolderId>) -> Result<()> {
        if let Some(parent) = parent {
            self.folder(parent)?;
        }
        self.file_mut(id)?.entry.reparent(parent);
        Ok(())
    }

    /// Point a folder at a new parent. No collection is touched.
    ///
    /// Fails if `parent` is this folder or one of its descendants.
    pub fn reparent_folder(&mut self, id: FolderId, parent: Option<FolderId>) -> Result<()> {
        self.folder(id)?;
        if let Some(parent) = parent {
            self.folder(parent)?;
            if self.is_ancestor_of(id, parent) {
                return Err(Error::invalid(
                    "Cannot set parent of a root folder to any of its subfolders.",
                ));
            }
        }
        self.folder_mut(id)?.entry.reparent(parent);
        Ok(())
    }

    /// Re-point either kind of entity
    pub fn reparent(&mut self, id: EntityId, parent: Option<FolderId>) -> Result<()> {
        match id {
            EntityId::File(id) => self.reparent_file(id, parent),
            EntityId::Folder(id) => self.reparent_folder(id, parent),
        }
    }

    /// Whether `ancestor` appears on `candidate`'s parent chain, counting
    /// `candidate` itself.
    pub fn is_ancestor_of(&self, ancestor: FolderId, candidate: FolderId) -> bool {
        let mut current = Some(candidate);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get_folder(id).and_then(|folder| folder.parent());
        }
        false
    }

    /// Path of an entity, built by walking its parent links.
    ///
    /// The topmost folder of the chain is written as `/`, so entities under a
    /// manager's root read `/docs/readme.md`.
    pub fn path_of(&self, id: EntityId) -> String {
        let mut segments = Vec::new();
        let mut parent = match id {
            EntityId::File(id) => match self.get_file(id) {
                Some(file) => {
                    segments.push(file.display_name());
                    file.parent()
                }
                None => return String::new(),
            },
            EntityId::Folder(id) => Some(id),
        };

        let mut seen = HashSet::new();
        while let Some(id) = parent {
            let Some(folder) = self.get_folder(id) else {
                break;
            };
            if !seen.insert(id) {
                break;
            }
            parent = folder.parent();
            if parent.is_some() {
                segments.push(folder.name().to_string());
            }
        }

        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Resolve a `/`-separated path relative to `from`.
    ///
    /// Segments match case-insensitively. Intermediate segments name folders;
    /// the last one names a folder or a file written as `name.extension`
    /// (folders win on a tie). An empty path resolves to `from`.
    pub fn resolve(&self, from: FolderId, path: &str) -> Option<EntityId> {
        trace!("Resolving {:?}", path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut current = from;
        self.get_folder(current)?;

        for (i, segment) in segments.iter().enumerate() {
            let folder = self.get_folder(current)?;
            let child_folder = folder
                .folders
                .iter()
                .copied()
                .find(|&id| self.get_folder(id).is_some_and(|f| same_name(f.name(), segment)));
            match child_folder {
                Some(id) => current = id,
                None if i + 1 == segments.len() => {
                    return folder
                        .files
                        .iter()
                        .copied()
                        .find(|&id| {
                            self.get_file(id)
                                .is_some_and(|f| same_name(&f.display_name(), segment))
                        })
                        .map(EntityId::File);
                }
                None => return None,
            }
        }
        Some(EntityId::Folder(current))
    }

    /// Visit everything below `folder` depth-first, subfolders before files.
    ///
    /// `visitor` receives the depth (1 for direct children) and the entity.
    /// A folder reachable through several collections is entered only once.
    pub fn walk<F>(&self, folder: FolderId, mut visitor: F)
    where
        F: FnMut(usize, EntityId),
    {
        let mut seen = HashSet::new();
        seen.insert(folder);
        self.walk_recursive(folder, 1, &mut seen, &mut visitor);
    }

    fn walk_recursive<F>(&self, id: FolderId, depth: usize, seen: &mut HashSet<FolderId>, visitor: &mut F)
    where
        F: FnMut(usize, EntityId),
    {
        let Some(folder) = self.get_folder(id) else {
            return;
        };
        for &child in &folder.folders {
            if !seen.insert(child) {
                continue;
            }
            visitor(depth, EntityId::Folder(child));
            self.walk_recursive(child, depth + 1, seen, visitor);
        }
        for &file in &folder.files {
            visitor(depth, EntityId::File(file));
        }
    }

    /// Count folders, files and declared bytes below `folder`
    pub fn stats(&self, folder: FolderId) -> TreeStats {
        let mut stats = TreeStats::default();
        self.walk(folder, |_, entity| match entity {
            EntityId::Folder(_) => stats.folders += 1,
            EntityId::File(id) => {
                stats.files += 1;
                stats.total_size = stats
                    .total_size
                    .saturating_add(self.get_file(id).map_or(0, |f| f.size()));
            }
        });
        stats
    }

    /// Store a folder without registering it anywhere
    pub(crate) fn allocate_folder(&mut self, folder: Folder) -> FolderId {
        let id = FolderId(self.folders.len());
        self.folders.push(folder);
        id
    }

    fn allocate_file(&mut self, file: File) -> FileId {
        let id = FileId(self.files.len());
        self.files.push(file);
        id
    }

    fn check_file_slot(&self, folder: FolderId, name: &str, extension: &str) -> Result<()> {
        self.folder(folder)?;
        if self.contains_file_with_same_name(folder, name, extension) {
            return Err(Error::invalid(format!(
                "A file with the name \"{}\" and extension \"{}\" already exists in this folder.",
                name, extension
            )));
        }
        Ok(())
    }

    fn check_folder_slot(&self, folder: FolderId, name: &str) -> Result<()> {
        self.folder(folder)?;
        if self.contains_folder_with_same_name(folder, name) {
            return Err(Error::invalid(format!(
                "A folder with the name \"{}\" already exists in this folder.",
                name
            )));
        }
        Ok(())
    }
}

fn unknown_file(id: FileId) -> Error {
    Error::invalid(format!("File handle {} does not belong to this tree.", id.0))
}

fn unknown_folder(id: FolderId) -> Error {
    Error::invalid(format!("Folder handle {} does not belong to this tree.", id.0))
}
