mod commander;
mod commands;
mod context;
mod history;

pub use commander::{Commander, Teardown};
pub use commands::{Change, Command, CommandArgs, CommandKind, Outcome, Transition};
pub use context::CommandContext;
pub use history::CommandHistory;
