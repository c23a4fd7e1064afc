//! Pipeline - application root.
//!
//! [`Ui`] ties the document, the lifecycle registry and the navigator
//! together and is what builders and mounting operate on.

mod mount;

pub use mount::Ui;
