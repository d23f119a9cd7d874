//! Stack-based navigation over the menu tree.
//!
//! The controller owns the immutable tree plus a stack of child indices
//! describing the path from the root to the submenu currently on screen.
//! Selecting a branch pushes, `go_back` pops, and selecting a leaf hands
//! the action to the [`ActionExecutor`] without touching the stack.

use thiserror::Error;

use crate::actions::{ActionError, ActionExecutor, DispatchOutcome};

use super::model::{Action, MenuNode, NodeKind};

#[derive(Debug, Error)]
pub enum NavError {
    /// The UI offered an index that is not part of the current submenu.
    /// This is a programming error, not a user-recoverable condition.
    #[error("invalid selection: index {index} out of {len} visible items")]
    InvalidSelection { index: usize, len: usize },
}

/// What happened in response to a selection.
#[derive(Debug)]
pub enum NavEvent {
    /// A submenu was entered; `name` is its display label.
    Entered { name: String },
    /// A leaf was dispatched to the executor, successfully or not.
    Dispatched {
        name: String,
        outcome: Result<DispatchOutcome, ActionError>,
    },
}

pub struct NavController {
    root: MenuNode,
    stack: Vec<usize>,
}

impl NavController {
    /// Build a controller over `root`, which must be a branch.
    pub fn new(root: MenuNode) -> Self {
        assert!(root.is_branch(), "menu root must be a branch");
        Self {
            root,
            stack: Vec::new(),
        }
    }

    /// Items of the submenu currently on screen (the root's when the
    /// stack is empty). Always a valid, possibly empty, slice.
    pub fn current_children(&self) -> &[MenuNode] {
        let mut node = &self.root;
        for &i in &self.stack {
            node = &node.children()[i];
        }
        node.children()
    }

    /// Depth of the navigation stack; 0 means the root is displayed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Display names along the current path, root-exclusive.
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.stack.len());
        let mut node = &self.root;
        for &i in &self.stack {
            node = &node.children()[i];
            names.push(node.name.as_str());
        }
        names
    }

    /// Handle the selection of `index` within [`Self::current_children`].
    ///
    /// Branches are entered; leaves are forwarded to `exec` and the
    /// executor's outcome is reported back. The stack is only mutated for
    /// branches.
    pub fn select<E: ActionExecutor>(
        &mut self,
        index: usize,
        exec: &mut E,
    ) -> Result<NavEvent, NavError> {
        let (name, action) = {
            let children = self.current_children();
            let len = children.len();
            let node = children
                .get(index)
                .ok_or(NavError::InvalidSelection { index, len })?;
            let action = match &node.kind {
                NodeKind::Branch(_) => None,
                NodeKind::Leaf(action) => Some(action.clone()),
            };
            (node.name.clone(), action)
        };

        match action {
            None => {
                self.stack.push(index);
                tracing::debug!(menu = %name, depth = self.stack.len(), "entered submenu");
                Ok(NavEvent::Entered { name })
            }
            Some(action) => {
                let outcome = dispatch(&action, exec);
                match &outcome {
                    Ok(done) => tracing::info!(item = %name, ?done, "dispatched"),
                    Err(e) => tracing::warn!(item = %name, error = %e, "dispatch failed"),
                }
                Ok(NavEvent::Dispatched { name, outcome })
            }
        }
    }

    /// Pop one level. Returns `true` when a pop occurred; at the root
    /// this is a silent no-op.
    pub fn go_back(&mut self) -> bool {
        if self.stack.pop().is_some() {
            tracing::debug!(depth = self.stack.len(), "navigated back");
            true
        } else {
            false
        }
    }
}

fn dispatch<E: ActionExecutor>(
    action: &Action,
    exec: &mut E,
) -> Result<DispatchOutcome, ActionError> {
    match action {
        Action::RunScript(path) => exec.run_script(path),
        Action::RunExecutable(path) => exec.run_executable(path),
        Action::OpenUrl(url) => exec.open_url(url),
        Action::ShowMessage(text) => Ok(exec.show_message(text)),
    }
}
