//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_script(scripts::PROJECT);
//!     fixture.command().arg("tree").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::scripts;
    pub use super::TestFixture;
}

/// Common operation scripts for testing.
#[allow(dead_code)]
pub mod scripts {
    /// A small project layout.
    pub const PROJECT: &str = r##"
- mkdir:
    path: /src
- mkdir:
    path: /docs
- touch:
    path: /src/main.rs
    content: "fn main() {}"
- touch:
    path: /docs/readme.md
    content: "# Project"
- touch:
    path: /docs/guide.md
    size: 2048
"##;

    /// Second step collides with the first ignoring case.
    pub const DUPLICATE_FOLDER: &str = r#"
- mkdir: { path: /docs }
- mkdir: { path: /Docs }
- mkdir: { path: /after }
"#;

    /// Moves a folder into its own subfolder.
    pub const ILLEGAL_MOVE: &str = r#"
- mkdir: { path: /a }
- mkdir: { path: /a/b }
- move: { from: /a, to: /a/b }
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: yaml: content:";

    /// Empty script (comments only).
    pub const EMPTY: &str = "# nothing to do\n[]\n";
}

/// A temporary directory with an optional `.foldertree.yaml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.foldertree.yaml` script with the given content.
    pub fn with_script(self, content: &str) -> Self {
        self.temp_dir
            .child(".foldertree.yaml")
            .write_str(content)
            .expect("Failed to write script file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the script file.
    #[allow(dead_code)]
    pub fn script_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".foldertree.yaml")
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colors are off and `FOLDERTREE_SCRIPT` is cleared so output is stable.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("foldertree");
        cmd.current_dir(self.path())
            .env_remove("FOLDERTREE_SCRIPT")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
