//! Menu node types: `MenuNode`, `NodeKind` and `Action`.
//!
//! A node is either a `Branch` holding an ordered list of children or a
//! `Leaf` holding the action it dispatches. The tree is authored once in
//! `catalog` and never mutated at runtime.

use std::path::PathBuf;

/// What a leaf item does when selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Launch a shell script, path relative to the configured base directory.
    RunScript(PathBuf),
    /// Launch a native executable, path relative to the configured base directory.
    RunExecutable(PathBuf),
    /// Show informational text in a popup.
    ShowMessage(String),
    /// Open a URL with the platform's default handler.
    OpenUrl(String),
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Branch(Vec<MenuNode>),
    Leaf(Action),
}

/// A single entry in the menu tree.
#[derive(Debug, Clone)]
pub struct MenuNode {
    pub name: String,
    pub kind: NodeKind,
}

impl MenuNode {
    /// Create a submenu node with the given `children` (display order).
    pub fn branch(name: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Branch(children),
        }
    }

    /// Create an actionable item.
    pub fn leaf(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Leaf(action),
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch(_))
    }

    /// Children of a branch; empty for leaves.
    pub fn children(&self) -> &[MenuNode] {
        match &self.kind {
            NodeKind::Branch(children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// The action of a leaf, if this is one.
    pub fn action(&self) -> Option<&Action> {
        match &self.kind {
            NodeKind::Branch(_) => None,
            NodeKind::Leaf(action) => Some(action),
        }
    }
}
