//! # Operation Scripts
//!
//! A script is a YAML sequence of tree operations applied in order to a
//! [`FileSystemManager`]. Paths are `/`-separated and relative to the
//! manager's root; segments match case-insensitively, and files are written
//! as `name.extension`.
//!
//! ```yaml
//! - mkdir:
//!     path: /docs
//! - touch:
//!     path: /docs/readme.md
//!     content: "# Hello"
//! - copy:
//!     from: /docs/readme.md
//!     to: /
//! - move:
//!     from: /readme.md
//!     to: /docs/archive
//! - rename:
//!     path: /docs
//!     name: documentation
//! - delete:
//!     path: /documentation/readme.md
//! ```
//!
//! `mkdir` and `touch` build a floating entity pointing at the folder named
//! by the path prefix and hand it to the manager's create operation, so the
//! manager's rules decide where (and whether) it lands. A top-level path
//! leaves the parent unset and the manager places the entity under root.

use crate::entity::{EntityId, FolderId};
use crate::error::{Error, Result};
use crate::file::File;
use crate::manager::FileSystemManager;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Create a folder at `path`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MkdirOp {
    pub path: String,
}

/// Create a file at `path`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TouchOp {
    pub path: String,
    /// File content, stored as UTF-8 bytes
    #[serde(default)]
    pub content: String,
    /// Declared size; defaults to the content length
    #[serde(default)]
    pub size: Option<u64>,
    /// Creation time in seconds since the Unix epoch; defaults to now
    #[serde(default)]
    pub created: Option<u64>,
}

/// Copy or move the entity at `from` into the folder at `to`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TransferOp {
    pub from: String,
    pub to: String,
}

/// Detach the entity at `path` from its folder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeleteOp {
    pub path: String,
}

/// Give the entity at `path` a new name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RenameOp {
    pub path: String,
    pub name: String,
}

/// One step of a script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Operation {
    Mkdir { mkdir: MkdirOp },
    Touch { touch: TouchOp },
    Copy { copy: TransferOp },
    Move { r#move: TransferOp },
    Delete { delete: DeleteOp },
    Rename { rename: RenameOp },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Mkdir { mkdir } => write!(f, "mkdir {}", mkdir.path),
            Operation::Touch { touch } => write!(f, "touch {}", touch.path),
            Operation::Copy { copy } => write!(f, "copy {} -> {}", copy.from, copy.to),
            Operation::Move { r#move } => write!(f, "move {} -> {}", r#move.from, r#move.to),
            Operation::Delete { delete } => write!(f, "delete {}", delete.path),
            Operation::Rename { rename } => write!(f, "rename {} -> {}", rename.path, rename.name),
        }
    }
}

/// A whole script: operations in execution order
pub type Script = Vec<Operation>;

/// Keys that introduce a step
pub const OPERATION_NAMES: [&str; 6] = ["mkdir", "touch", "copy", "move", "delete", "rename"];

/// Parses a YAML string into a [`Script`].
pub fn parse(yaml_content: &str) -> Result<Script> {
    serde_yaml::from_str::<Option<Script>>(yaml_content)
        .map(Option::unwrap_or_default)
        .map_err(|e| Error::Script {
            message: e.to_string(),
            hint: Some(format!(
                "Each step must be one of: {}",
                OPERATION_NAMES.join(", ")
            )),
        })
}

/// Reads and parses a script file.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Script> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// A step that failed while running with `keep_going`
#[derive(Debug)]
pub struct StepFailure {
    /// 1-based position in the script
    pub step: usize,
    pub operation: String,
    pub error: Error,
}

/// Outcome of [`run`]
#[derive(Debug, Default)]
pub struct RunReport {
    pub applied: usize,
    pub failures: Vec<StepFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply every step of `script` to `manager`.
///
/// Without `keep_going` the first failing step aborts the run with an error
/// naming the step; the steps before it stay applied. With `keep_going`
/// failures are logged, collected in the report and skipped.
pub fn run(script: &Script, manager: &mut FileSystemManager, keep_going: bool) -> Result<RunReport> {
    let mut report = RunReport::default();
    for (index, operation) in script.iter().enumerate() {
        let step = index + 1;
        match apply(operation, manager) {
            Ok(()) => {
                debug!("Step {}: {}", step, operation);
                report.applied += 1;
            }
            Err(error) if keep_going => {
                warn!("Step {} ({}) failed: {}", step, operation, error);
                report.failures.push(StepFailure {
                    step,
                    operation: operation.to_string(),
                    error,
                });
            }
            Err(error) => {
                return Err(Error::Script {
                    message: format!("Step {} ({}) failed: {}", step, operation, error),
                    hint: None,
                })
            }
        }
    }
    Ok(report)
}

/// Apply a single step
pub fn apply(operation: &Operation, manager: &mut FileSystemManager) -> Result<()> {
    match operation {
        Operation::Mkdir { mkdir } => {
            let (parent, name) = split_parent(manager, &mkdir.path)?;
            let folder = manager.fs_mut().new_folder(name, None)?;
            manager.fs_mut().reparent_folder(folder, parent)?;
            manager.create_folder(folder)?;
        }
        Operation::Touch { touch } => {
            let (parent, segment) = split_parent(manager, &touch.path)?;
            let (name, extension) = split_extension(segment);
            let content = touch.content.clone().into_bytes();
            let size = touch.size.unwrap_or(content.len() as u64);
            let created = touch
                .created
                .map(|secs| SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
                .unwrap_or_else(SystemTime::now);
            let file = File::new(name, size, created, content, extension)?;
            let file = manager.fs_mut().insert_file(file, None)?;
            manager.fs_mut().reparent_file(file, parent)?;
            manager.create_file(file)?;
        }
        Operation::Copy { copy } => match resolve(manager, &copy.from)? {
            EntityId::File(file) => {
                let to = resolve_folder(manager, &copy.to)?;
                manager.copy_file(file, to)?;
            }
            EntityId::Folder(folder) => {
                let to = resolve_folder(manager, &copy.to)?;
                manager.copy_folder(folder, to)?;
            }
        },
        Operation::Move { r#move } => match resolve(manager, &r#move.from)? {
            EntityId::File(file) => {
                let to = resolve_folder(manager, &r#move.to)?;
                manager.move_file(file, to)?;
            }
            EntityId::Folder(folder) => {
                let to = resolve_folder(manager, &r#move.to)?;
                manager.move_folder(folder, to)?;
            }
        },
        Operation::Delete { delete } => match resolve(manager, &delete.path)? {
            EntityId::File(file) => manager.delete_file(file)?,
            EntityId::Folder(folder) => manager.delete_folder(folder)?,
        },
        Operation::Rename { rename } => {
            let entity = resolve(manager, &rename.path)?;
            manager.rename(entity, &rename.name)?;
        }
    }
    Ok(())
}

fn resolve(manager: &FileSystemManager, path: &str) -> Result<EntityId> {
    manager.resolve(path).ok_or_else(|| Error::Script {
        message: format!("Path not found: {}", path),
        hint: Some("Paths are relative to root, e.g. /docs/readme.md".to_string()),
    })
}

fn resolve_folder(manager: &FileSystemManager, path: &str) -> Result<FolderId> {
    match resolve(manager, path)? {
        EntityId::Folder(folder) => Ok(folder),
        EntityId::File(_) => Err(Error::Script {
            message: format!("Not a folder: {}", path),
            hint: None,
        }),
    }
}

/// Split `path` into its parent folder and last segment.
///
/// Top-level paths have no parent.
fn split_parent<'a>(manager: &FileSystemManager, path: &'a str) -> Result<(Option<FolderId>, &'a str)> {
    let trimmed = path.trim_end_matches('/');
    let (prefix, last) = trimmed.rsplit_once('/').unwrap_or(("", trimmed));
    if last.is_empty() {
        return Err(Error::Script {
            message: format!("Path has no final segment: {:?}", path),
            hint: None,
        });
    }
    if prefix.trim_matches('/').is_empty() {
        return Ok((None, last));
    }
    Ok((Some(resolve_folder(manager, prefix)?), last))
}

/// `name.ext` -> (`name`, `ext`). A segment without a dot, or whose only dot
/// leads it, has an empty extension.
fn split_extension(segment: &str) -> (&str, &str) {
    match segment.rfind('.') {
        Some(0) | None => (segment, ""),
        Some(index) => (&segment[..index], &segment[index + 1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    #[test]
    fn test_parse_simple_script() {
        let yaml = r#"
- mkdir:
    path: /docs
- touch:
    path: /docs/readme.md
    content: "hello"
- copy:
    from: /docs/readme.md
    to: /
- move:
    from: /readme.md
    to: /docs
- delete:
    path: /docs/readme.md
- rename:
    path: /docs
    name: documentation
"#;
        let script = parse(yaml).unwrap();
        assert_eq!(script.len(), 6);
        assert_eq!(
            script[0],
            Operation::Mkdir {
                mkdir: MkdirOp {
                    path: "/docs".to_string()
                }
            }
        );
        match &script[1] {
            Operation::Touch { touch } => {
                assert_eq!(touch.content, "hello");
                assert_eq!(touch.size, None);
            }
            other => panic!("expected touch, got {:?}", other),
        }
        assert!(matches!(script[3], Operation::Move { .. }));
        assert_eq!(script[5].to_string(), "rename /docs -> documentation");
    }

    #[test]
    fn test_parse_empty_script() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_unknown_operation() {
        let err = parse("- chmod:\n    path: /x\n").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Script error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!(parse("- mkdir:\n    path: /x\n    mode: 755\n").is_err());
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("readme.md"), ("readme", "md"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", "gz"));
        assert_eq!(split_extension("Makefile"), ("Makefile", ""));
        assert_eq!(split_extension(".gitignore"), (".gitignore", ""));
    }

    #[test]
    fn test_run_builds_tree() {
        let script = parse(
            r##"
- mkdir: { path: /docs }
- mkdir: { path: /docs/archive }
- touch: { path: /docs/readme.md, content: "# Hello" }
- copy: { from: /docs/readme.md, to: / }
- move: { from: /readme.md, to: /docs/archive }
"##,
        )
        .unwrap();
        let mut manager = FileSystemManager::new();
        let report = run(&script, &mut manager, false).unwrap();
        assert_eq!(report.applied, 5);
        assert!(report.is_success());

        let Some(EntityId::File(moved)) = manager.resolve("/docs/archive/readme.md") else {
            panic!("moved file not found");
        };
        let moved = manager.fs().file(moved).unwrap();
        assert_eq!(moved.content(), b"# Hello");
        assert_eq!(moved.size(), 7);
        assert!(manager.resolve("/readme.md").is_none());
        assert_eq!(manager.stats().files, 2);
    }

    #[test]
    fn test_touch_with_explicit_metadata() {
        let script = parse(
            "- touch: { path: /data.bin, content: abc, size: 10, created: 86400 }\n",
        )
        .unwrap();
        let mut manager = FileSystemManager::new();
        run(&script, &mut manager, false).unwrap();
        let Some(EntityId::File(id)) = manager.resolve("/data.bin") else {
            panic!("file not created");
        };
        let file = manager.fs().file(id).unwrap();
        assert_eq!(file.size(), 10);
        assert_eq!(
            file.created(),
            SystemTime::UNIX_EPOCH + Duration::from_secs(86400)
        );
        assert_eq!(file.name(), "data");
        assert_eq!(file.extension(), "bin");
        assert_eq!(file.content(), b"abc");
    }

    #[test]
    fn test_touch_with_maximum_declared_size() {
        let script = parse("- touch: { path: /a.bin, size: 18446744073709551615 }\n").unwrap();
        let mut manager = FileSystemManager::new();
        run(&script, &mut manager, false).unwrap();
        let Some(EntityId::File(id)) = manager.resolve("/a.bin") else {
            panic!("file not created");
        };
        let file = manager.fs().file(id).unwrap();
        assert_eq!(file.size(), u64::MAX);
        assert!(file.content().is_empty());
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let script = parse(
            r#"
- mkdir: { path: /docs }
- mkdir: { path: /DOCS }
- mkdir: { path: /later }
"#,
        )
        .unwrap();
        let mut manager = FileSystemManager::new();
        let err = run(&script, &mut manager, false).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("Step 2 (mkdir /DOCS) failed"));
        assert!(display.contains("A folder with the same name already exists"));
        assert!(manager.resolve("/docs").is_some());
        assert!(manager.resolve("/later").is_none());
    }

    #[test]
    fn test_run_keep_going_collects_failures() {
        let script = parse(
            r#"
- mkdir: { path: /docs }
- mkdir: { path: /docs/inner }
- move: { from: /docs, to: /docs/inner }
- touch: { path: /missing/file.txt }
- mkdir: { path: /later }
"#,
        )
        .unwrap();
        let mut manager = FileSystemManager::new();
        let report = run(&script, &mut manager, true).unwrap();
        assert_eq!(report.applied, 3);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].step, 3);
        assert!(report.failures[0].error.is_illegal_hierarchy());
        assert_eq!(report.failures[1].step, 4);
        assert!(report.failures[1].error.to_string().contains("Path not found"));
        assert!(manager.resolve("/later").is_some());
    }

    #[test]
    fn test_copy_into_file_is_rejected() {
        let script = parse(
            r#"
- touch: { path: /a.txt }
- touch: { path: /b.txt }
- copy: { from: /a.txt, to: /b.txt }
"#,
        )
        .unwrap();
        let mut manager = FileSystemManager::new();
        let err = run(&script, &mut manager, false).unwrap_err();
        assert!(err.to_string().contains("Not a folder: /b.txt"));
    }

    #[test]
    fn test_rename_and_delete() {
        let script = parse(
            r#"
- mkdir: { path: /docs }
- touch: { path: /docs/a.txt }
- rename: { path: /docs, name: Documents }
- delete: { path: /documents/A.TXT }
"#,
        )
        .unwrap();
        let mut manager = FileSystemManager::new();
        run(&script, &mut manager, false).unwrap();
        assert!(manager.resolve("/Documents").is_some());
        assert_eq!(manager.stats().files, 0);
    }
}
