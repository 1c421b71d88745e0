use crate::commands;
use crate::utils::config::Config;
use serenity::all::{Command, CreateCommand, Http};
use std::sync::Arc;

/// Get all slash commands to register
pub fn get_all_commands() -> Vec<CreateCommand> {
    vec![commands::req::register()]
}

/// Overwrite the registered commands, guild-scoped when a guild is configured.
///
/// Failures are logged only; a previous registration may still be live.
pub async fn register_commands(http: &Arc<Http>, config: &Config) {
    let commands_vec = get_all_commands();
    let command_count = commands_vec.len();

    let result = match config.guild_id {
        Some(guild_id) => guild_id
            .set_commands(http, commands_vec)
            .await
            .map(|registered| (registered.len(), format!("guild {}", guild_id))),
        None => Command::set_global_commands(http, commands_vec)
            .await
            .map(|registered| (registered.len(), "global".to_string())),
    };

    match result {
        Ok((registered, scope)) => tracing::info!(
            "[CMD] Successfully registered {} of {} {} commands",
            registered,
            command_count,
            scope
        ),
        Err(e) => tracing::error!("[CMD] Failed to register slash commands: {}", e),
    }
}
