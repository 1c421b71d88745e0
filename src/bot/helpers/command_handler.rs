use crate::bot::Handler;
use crate::commands;
use anyhow::Result;
use serenity::all::{CommandInteraction, Context};

/// Route a slash command to its handler
pub async fn handle_slash_command(
    handler: &Handler,
    context: &Context,
    command: &CommandInteraction,
) -> Result<()> {
    match command.data.name.as_str() {
        commands::req::COMMAND_NAME => commands::req::run(handler, context, command).await,
        unknown_command => {
            tracing::warn!("[CMD] Unknown slash command received: '{}'", unknown_command);
            commands::error::run(
                context,
                command,
                &format!("Unknown command: `{}`.", unknown_command),
            )
            .await
        }
    }
}
