//! This is the library of the community bot.
//!
//! The bot applies the `community-contribution` label to pull requests whose author is not
//! an approver or reviewer of any of the changed files.
pub mod community;
pub mod config;
pub mod github;
pub mod owners;
pub mod utils;

pub use community::{handle_pull_request, LabelOutcome, PullRequestEvent};
pub use github::server::{create_app, create_bot_process, BotContext, ServerState};

#[cfg(test)]
mod tests;
