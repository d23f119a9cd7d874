//! Menu tree and navigation.
//!
//! The launcher's menu is a compiled-in tree of named nodes; `catalog`
//! holds the Xiaomi 13T catalog and `nav` the stack-based walk over it.

mod catalog;
mod model;
mod nav;

pub use catalog::main_menu;
pub use model::*;
pub use nav::*;
