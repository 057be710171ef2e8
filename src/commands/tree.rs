//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which runs an operation
//! script against an empty root and displays the resulting hierarchy.
//!
//! ## Functionality
//!
//! - **Tree Visualization**: Folders first, then files, in insertion order
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Sizes**: Files show their declared size
//!
//! Folders reachable through more than one collection (shallow copies share
//! children) are expanded only the first time they are met.

use anyhow::Result;
use clap::Args;
use ptree::TreeItem;
use std::collections::HashSet;
use std::path::PathBuf;

use foldertree::defaults::DEFAULT_SCRIPT_FILENAME;
use foldertree::entity::{Entity, FolderId};
use foldertree::manager::FileSystemManager;
use foldertree::output::{dim, folder_label, OutputConfig};

/// Display the tree built by an operation script
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the operation script.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SCRIPT_FILENAME, env = "FOLDERTREE_SCRIPT")]
    pub script: PathBuf,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root, 1 to show its direct children, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let (manager, _) = super::build_tree(&args.script, false)?;
    print(&manager, args.depth, &out)
}

/// Print the manager's tree to stdout.
pub(crate) fn print(manager: &FileSystemManager, depth: Option<usize>, out: &OutputConfig) -> Result<()> {
    let node = build(manager, depth, out);
    ptree::print_tree(&node).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))
}

/// Build the display tree for everything below the manager's root.
pub(crate) fn build(manager: &FileSystemManager, depth: Option<usize>, out: &OutputConfig) -> TreeNode {
    let mut seen = HashSet::new();
    seen.insert(manager.root());
    build_folder_node(
        manager,
        manager.root(),
        depth.unwrap_or(usize::MAX),
        0,
        &mut seen,
        out,
    )
}

fn build_folder_node(
    manager: &FileSystemManager,
    id: FolderId,
    max_depth: usize,
    current_depth: usize,
    seen: &mut HashSet<FolderId>,
    out: &OutputConfig,
) -> TreeNode {
    let fs = manager.fs();
    let Some(folder) = fs.get_folder(id) else {
        return TreeNode::leaf(String::from("?"));
    };
    let label = folder_label(out, folder.name());
    if current_depth >= max_depth {
        return TreeNode::leaf(label);
    }

    let mut children = Vec::new();
    for &child in folder.folders() {
        if seen.insert(child) {
            children.push(build_folder_node(
                manager,
                child,
                max_depth,
                current_depth + 1,
                seen,
                out,
            ));
        }
    }
    for &file in folder.files() {
        if let Some(file) = fs.get_file(file) {
            let size = dim(out, &format!("({} B)", file.size()));
            children.push(TreeNode::leaf(format!("{} {}", file.display_name(), size)));
        }
    }
    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
pub(crate) struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
