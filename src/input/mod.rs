mod command_registry;
mod commands;
mod keyboard;

pub use command_registry::CommandRegistry;
pub use commands::Command;
pub use keyboard::handle_key_input;
