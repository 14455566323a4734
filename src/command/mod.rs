mod types;

pub use types::{ActionId, Command, CommandOutcome};
