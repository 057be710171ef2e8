//! # Folder Tree Library
//!
//! This library models a hierarchical file system held entirely in memory:
//! files and folders with names, parent links and ordered child collections,
//! plus a manager that creates, deletes, copies and moves entities within a
//! single rooted tree. It backs the `foldertree` command-line tool but has no
//! dependency on it.
//!
//! ## Quick Example
//!
//! ```
//! use foldertree::entity::{Entity, EntityId};
//! use foldertree::file::File;
//! use foldertree::manager::FileSystemManager;
//!
//! let mut manager = FileSystemManager::new();
//! let root = manager.root();
//!
//! // Build a floating folder and let the manager store a copy under root
//! let docs = manager.fs_mut().new_folder("docs", Some(root)).unwrap();
//! let readme = File::with_content("readme", "md", "# Hello").unwrap();
//! let readme = manager.fs_mut().insert_file(readme, Some(docs)).unwrap();
//!
//! // Files with the same name and extension cannot share a folder
//! let dup = File::with_content("README", "MD", "other").unwrap();
//! let dup = manager.fs_mut().insert_file(dup, None).unwrap();
//! manager.fs_mut().reparent_file(dup, Some(docs)).unwrap();
//! assert!(manager.create_file(dup).is_err());
//!
//! // A folder can never be moved into its own subtree
//! let inner = manager.fs_mut().new_folder("inner", Some(docs)).unwrap();
//! let err = manager.move_folder(docs, inner).unwrap_err();
//! assert!(err.is_illegal_hierarchy());
//!
//! let copy = manager.copy_file(readme, root).unwrap();
//! assert_eq!(manager.path_of(EntityId::File(copy)), "/readme.md");
//! assert_eq!(manager.fs().file(copy).unwrap().name(), "readme");
//! ```
//!
//! ## Core Concepts
//!
//! - **Entities (`entity`, `file`, `folder`)**: A file carries a name,
//!   extension, declared size, creation time and content. A folder carries a
//!   name and two ordered collections of child handles. Both embed an
//!   [`entity::Entry`] holding the name and a non-owning parent link.
//! - **Arena (`filesystem`)**: [`filesystem::MemoryFS`] owns every entity,
//!   attached or floating, and enforces the per-folder rules: sibling names
//!   are unique ignoring case, and a folder can never become its own
//!   ancestor.
//! - **Manager (`manager`)**: [`manager::FileSystemManager`] scopes every
//!   operation to one root folder. Creates store duplicates, only under
//!   folders reachable from root, and moves are copy-then-delete.
//! - **Scripts (`script`)**: YAML sequences of `mkdir`, `touch`, `copy`,
//!   `move`, `delete` and `rename` steps applied to a manager.

pub mod defaults;
pub mod entity;
pub mod error;
pub mod file;
pub mod filesystem;
pub mod folder;
pub mod manager;
pub mod output;
pub mod script;
pub mod suggestions;

#[cfg(test)]
mod tree_proptest;
