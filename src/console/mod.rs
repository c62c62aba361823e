pub mod commands;
pub mod input;
pub mod render;

pub use commands::{Command, CommandError, HELP};
pub use input::spawn_stdin_reader;
