use bancheck::components::BanChecker;
use bancheck::config::Config;
use bancheck::error::BotResult;
use std::sync::Arc;

// Export submodules
pub mod check;
pub mod lang;

/// Shared context for all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: Arc<Config>,
    pub checker: BanChecker,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Arc<Config>, checker: BanChecker) -> Self {
        Self { config, checker }
    }
}

/// Type alias for command result
pub type CommandResult = BotResult<()>;

/// Type alias for poise context
pub type Context<'a> = poise::Context<'a, CommandContext, bancheck::error::Error>;

/// All application commands
pub fn get_all_application_commands() -> Vec<poise::Command<CommandContext, bancheck::error::Error>>
{
    vec![check::check(), lang::lang()]
}
