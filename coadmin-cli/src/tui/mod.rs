//! Interactive company shell
//!
//! - Sidebar and top bar framing a company table (Name / Integrations / Actions)
//! - Add/edit dialog with a name input and an integrations picker
//! - Delete with y/n confirmation
//! - Status line for save and load results

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
