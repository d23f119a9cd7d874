//! Application module: the session object owned by the runtime.
//!
//! `AppSession` ties the navigation controller, the player model and the
//! action executor together and turns their outcomes into status-line
//! text and popups for the UI.

mod model;

pub use model::*;
