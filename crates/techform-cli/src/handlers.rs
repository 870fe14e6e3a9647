//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; they share document loading
//! and error printing.

mod completions;
mod config;
mod session;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use session::handle_session;
pub use validate::handle_validate;
