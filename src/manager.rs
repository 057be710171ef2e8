//! # Tree Manager
//!
//! [`FileSystemManager`] owns a [`MemoryFS`] and the single root folder every
//! tree operation is scoped to. It adds the whole-tree rules on top of the
//! folder invariants enforced by the arena:
//!
//! - **Create** never attaches the entity it is given. It stores a duplicate
//!   under the entity's parent (or under root when the parent is unset), and
//!   only when that parent is reachable from root.
//! - **Delete** detaches an entity from its parent's collection.
//! - **Copy** creates a duplicate under a destination folder, going through
//!   the same checks as create.
//! - **Move** is copy followed by delete. The delete only runs once the copy
//!   has succeeded, so a rejected move leaves the source where it was.
//!
//! Folders can never be copied or moved into their own subtree. That case is
//! reported as [`Error::IllegalHierarchy`] rather than a plain invalid
//! argument.

use crate::defaults::ROOT_NAME;
use crate::entity::{Entity, EntityId, Entry, FileId, FolderId};
use crate::error::{Error, Result};
use crate::filesystem::{MemoryFS, TreeStats};
use crate::folder::Folder;
use log::debug;

const FILE_REQUIRED: &str = "File parameter cannot be null.";
const FILE_AND_FOLDER_REQUIRED: &str = "File and Folder parameter cannot be null.";
const FOLDER_REQUIRED: &str = "Folder parameter cannot be null.";
const FOLDERS_REQUIRED: &str = "Folder parameters cannot be null.";
const DUPLICATE_FILE: &str =
    "A file with the same name and extension already exists in the target folder.";
const DUPLICATE_FOLDER: &str = "A folder with the same name already exists in the target folder.";
const FILE_PARENT_OUTSIDE_ROOT: &str =
    "Parent folder not part of the root hierarchy. Create the parent before creating the file.";
const FOLDER_PARENT_OUTSIDE_ROOT: &str =
    "Parent folder not part of the root hierarchy. Create the parent before creating the folder.";

/// Orchestrates create, delete, copy and move over a rooted tree
#[derive(Debug, Clone)]
pub struct FileSystemManager {
    fs: MemoryFS,
    root: FolderId,
}

impl Default for FileSystemManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemManager {
    /// Create a manager with an empty root folder named `root`
    pub fn new() -> Self {
        let mut fs = MemoryFS::new();
        let root = fs.allocate_folder(Folder {
            entry: Entry {
                name: ROOT_NAME.to_string(),
                parent: None,
            },
            files: Vec::new(),
            folders: Vec::new(),
        });
        Self { fs, root }
    }

    pub fn root(&self) -> FolderId {
        self.root
    }

    /// The arena backing this tree
    pub fn fs(&self) -> &MemoryFS {
        &self.fs
    }

    /// Mutable access to the arena, for building floating entities and for
    /// folder-level operations. The arena keeps its own invariants.
    pub fn fs_mut(&mut self) -> &mut MemoryFS {
        &mut self.fs
    }

    /// Whether `folder`'s parent chain reaches root (root itself included)
    pub fn is_reachable(&self, folder: FolderId) -> bool {
        self.fs.is_ancestor_of(self.root, folder)
    }

    /// Store a copy of `file` under its parent, or under root if it has none.
    ///
    /// Returns the handle of the stored copy; `file` itself is never attached.
    pub fn create_file(&mut self, file: FileId) -> Result<FileId> {
        let parent = self
            .fs
            .get_file(file)
            .ok_or_else(|| Error::invalid(FILE_REQUIRED))?
            .parent();
        self.place_file(file, parent)
    }

    /// Detach `file` from its parent's collection.
    ///
    /// The first sibling equal to `file` is removed. Nothing happens when the
    /// file has no parent or its parent does not hold it.
    pub fn delete_file(&mut self, file: FileId) -> Result<()> {
        let parent = self
            .fs
            .get_file(file)
            .ok_or_else(|| Error::invalid(FILE_REQUIRED))?
            .parent();
        if let Some(parent) = parent {
            if self.fs.remove_file(parent, file)? {
                debug!("Deleted file {}", file.index());
            }
        }
        Ok(())
    }

    /// Store a copy of `file` in `destination`. Returns the copy's handle.
    pub fn copy_file(&mut self, file: FileId, destination: FolderId) -> Result<FileId> {
        self.require_file_and_folder(file, destination)?;
        self.place_file(file, Some(destination))
    }

    /// Copy `file` into `destination`, then delete it from where it was.
    pub fn move_file(&mut self, file: FileId, destination: FolderId) -> Result<FileId> {
        self.require_file_and_folder(file, destination)?;
        let copy = self.copy_file(file, destination)?;
        self.delete_file(file)?;
        debug!(
            "Moved file {} to {}",
            file.index(),
            self.fs.path_of(copy.into())
        );
        Ok(copy)
    }

    /// Store a copy of `folder` under its parent, or under root if it has none.
    ///
    /// The copy shares `folder`'s children (see [`Folder::duplicate`]).
    /// Returns the handle of the stored copy.
    pub fn create_folder(&mut self, folder: FolderId) -> Result<FolderId> {
        let parent = self
            .fs
            .get_folder(folder)
            .ok_or_else(|| Error::invalid(FOLDER_REQUIRED))?
            .parent();
        self.place_folder(folder, parent)
    }

    /// Detach `folder` from its parent's collection.
    pub fn delete_folder(&mut self, folder: FolderId) -> Result<()> {
        let parent = self
            .fs
            .get_folder(folder)
            .ok_or_else(|| Error::invalid(FOLDER_REQUIRED))?
            .parent();
        if let Some(parent) = parent {
            if self.fs.remove_folder(parent, folder)? {
                debug!("Deleted folder {}", folder.index());
            }
        }
        Ok(())
    }

    /// Store a copy of `folder` in `destination`. Returns the copy's handle.
    pub fn copy_folder(&mut self, folder: FolderId, destination: FolderId) -> Result<FolderId> {
        self.require_folders(folder, destination)?;
        self.reject_own_subtree(folder, destination, "copy")?;
        self.place_folder(folder, Some(destination))
    }

    /// Copy `folder` into `destination`, then delete it from where it was.
    pub fn move_folder(&mut self, folder: FolderId, destination: FolderId) -> Result<FolderId> {
        self.require_folders(folder, destination)?;
        self.reject_own_subtree(folder, destination, "move")?;
        let copy = self.place_folder(folder, Some(destination))?;
        self.delete_folder(folder)?;
        debug!(
            "Moved folder {} to {}",
            folder.index(),
            self.fs.path_of(copy.into())
        );
        Ok(copy)
    }

    /// Rename a file or folder, subject to its sibling-collision rule
    pub fn rename(&mut self, entity: EntityId, name: &str) -> Result<()> {
        self.fs.rename(entity, name)
    }

    /// Re-point a file or folder, subject to the folder cycle rule
    pub fn reparent(&mut self, entity: EntityId, parent: Option<FolderId>) -> Result<()> {
        self.fs.reparent(entity, parent)
    }

    /// Resolve a path relative to root
    pub fn resolve(&self, path: &str) -> Option<EntityId> {
        self.fs.resolve(self.root, path)
    }

    pub fn path_of(&self, entity: EntityId) -> String {
        self.fs.path_of(entity)
    }

    /// Counts for everything below root
    pub fn stats(&self) -> TreeStats {
        self.fs.stats(self.root)
    }

    /// The folder a new entity with `parent` would land in.
    fn target_folder(&self, parent: Option<FolderId>, outside_root: &str) -> Result<FolderId> {
        match parent {
            Some(parent) if self.is_reachable(parent) => Ok(parent),
            Some(_) => Err(Error::invalid(outside_root)),
            None => Ok(self.root),
        }
    }

    fn place_file(&mut self, source: FileId, parent: Option<FolderId>) -> Result<FileId> {
        let target = self.target_folder(parent, FILE_PARENT_OUTSIDE_ROOT)?;
        let file = self.fs.file(source)?;
        if self
            .fs
            .contains_file_with_same_name(target, file.name(), file.extension())
        {
            return Err(Error::invalid(DUPLICATE_FILE));
        }

        let copy = self.fs.duplicate_file(source)?;
        self.fs.reparent_file(copy, Some(target))?;
        self.fs.add_file(target, copy)?;
        debug!("Created file {}", self.fs.path_of(copy.into()));
        Ok(copy)
    }

    fn place_folder(&mut self, source: FolderId, parent: Option<FolderId>) -> Result<FolderId> {
        let target = self.target_folder(parent, FOLDER_PARENT_OUTSIDE_ROOT)?;
        let name = self.fs.folder(source)?.name();
        if self.fs.contains_folder_with_same_name(target, name) {
            return Err(Error::invalid(DUPLICATE_FOLDER));
        }

        let copy = self.fs.duplicate_folder(source)?;
        self.fs.reparent_folder(copy, Some(target))?;
        self.fs.add_folder(target, copy)?;
        debug!("Created folder {}", self.fs.path_of(copy.into()));
        Ok(copy)
    }

    fn require_file_and_folder(&self, file: FileId, folder: FolderId) -> Result<()> {
        if self.fs.get_file(file).is_none() || self.fs.get_folder(folder).is_none() {
            return Err(Error::invalid(FILE_AND_FOLDER_REQUIRED));
        }
        Ok(())
    }

    fn require_folders(&self, folder: FolderId, destination: FolderId) -> Result<()> {
        if self.fs.get_folder(folder).is_none() || self.fs.get_folder(destination).is_none() {
            return Err(Error::invalid(FOLDERS_REQUIRED));
        }
        Ok(())
    }

    fn reject_own_subtree(&self, folder: FolderId, destination: FolderId, verb: &str) -> Result<()> {
        if self.fs.is_ancestor_of(folder, destination) {
            return Err(Error::illegal_hierarchy(format!(
                "Illegal operation: Cannot {} a folder into its subfolder.",
                verb
            )));
        }
        Ok(())
    }
}
