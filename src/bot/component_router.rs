use crate::bot::Handler;
use crate::commands;
use anyhow::Result;
use serenity::all::{ComponentInteraction, Context};

/// Route component interactions (button clicks) to their handlers
pub async fn route_component_interaction(
    handler: &Handler,
    context: &Context,
    component: &ComponentInteraction,
) -> Result<()> {
    let custom_id = component.data.custom_id.as_str();

    match custom_id {
        commands::claim::CLAIM_BUTTON_ID => {
            commands::claim::handle_button(handler, context, component).await
        }

        // Unknown component interaction - ignore silently
        _ => {
            tracing::debug!("Unhandled component interaction: {}", custom_id);
            Ok(())
        }
    }
}
