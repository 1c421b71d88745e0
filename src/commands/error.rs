use serenity::all::{
    Colour, CommandInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse,
};

fn error_embed(error_message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("Request Error")
        .description(error_message)
        .color(Colour::RED)
}

/// Ephemeral error reply for a command that has not been answered yet.
pub async fn run(
    context: &Context,
    interaction: &CommandInteraction,
    error_message: &str,
) -> anyhow::Result<()> {
    let message = CreateInteractionResponseMessage::new()
        .embed(error_embed(error_message))
        .ephemeral(true);

    interaction
        .create_response(&context.http, CreateInteractionResponse::Message(message))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send error response: {}", e))?;

    Ok(())
}

/// Error for a command whose reply was already deferred.
pub async fn edit_response(
    context: &Context,
    interaction: &CommandInteraction,
    error_message: &str,
) -> anyhow::Result<()> {
    let edit_message = EditInteractionResponse::new()
        .content("")
        .embed(error_embed(error_message));

    interaction
        .edit_response(&context.http, edit_message)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to edit error response: {}", e))?;

    Ok(())
}
