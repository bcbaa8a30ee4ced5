pub mod banner;
pub mod client_form;
pub mod dialog;

pub use banner::StatusBanner;
pub use client_form::{handle_input, handle_key, render_client_form, ClientFormScreen, FormAction};
pub use dialog::{SharedTerminal, TerminalConfirmation};
