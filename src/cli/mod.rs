pub mod cli;

pub use cli::{normalize_args, CommandArgs};
