//! Command implementations for the CLI.

mod configure;
mod premium;
mod reflect;
mod saved;
mod streak;

pub use configure::cmd_config;
pub use premium::cmd_premium;
pub use reflect::cmd_reflect;
pub use saved::cmd_saved;
pub use streak::{cmd_streak, cmd_visit};
