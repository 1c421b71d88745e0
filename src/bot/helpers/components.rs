use crate::commands::claim::{CLAIM_BUTTON_ID, CLAIMED_BUTTON_ID};
use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
};

/// Helper for building button rows
pub struct ButtonBuilder {
    buttons: Vec<CreateButton>,
}

impl ButtonBuilder {
    pub fn new() -> Self {
        Self {
            buttons: Vec::new(),
        }
    }

    /// Add a grey button
    pub fn secondary(mut self, custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.buttons.push(
            CreateButton::new(custom_id.into())
                .label(label.into())
                .style(ButtonStyle::Secondary),
        );
        self
    }

    /// Add a custom styled button
    pub fn add_button(mut self, button: CreateButton) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn build(self) -> CreateActionRow {
        CreateActionRow::Buttons(self.buttons)
    }
}

impl Default for ButtonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Row attached to a fresh announcement.
pub fn claim_row() -> CreateActionRow {
    ButtonBuilder::new()
        .secondary(CLAIM_BUTTON_ID, "claim")
        .build()
}

/// Row swapped in once the request is taken.
pub fn claimed_row() -> CreateActionRow {
    ButtonBuilder::new()
        .add_button(
            CreateButton::new(CLAIMED_BUTTON_ID)
                .label("claimed")
                .style(ButtonStyle::Secondary)
                .disabled(true),
        )
        .build()
}

/// Helper for responding to component interactions
pub struct ComponentResponseBuilder;

impl ComponentResponseBuilder {
    /// Answer the click with a message only the clicker sees
    pub async fn ephemeral(
        context: &Context,
        interaction: &ComponentInteraction,
        message: impl Into<String>,
    ) -> anyhow::Result<()> {
        let response = CreateInteractionResponseMessage::new()
            .content(message.into())
            .ephemeral(true);

        interaction
            .create_response(context, CreateInteractionResponse::Message(response))
            .await?;

        Ok(())
    }

    /// Private follow-up after the click was already acknowledged
    pub async fn ephemeral_followup(
        context: &Context,
        interaction: &ComponentInteraction,
        message: impl Into<String>,
    ) -> anyhow::Result<()> {
        let followup = CreateInteractionResponseFollowup::new()
            .content(message.into())
            .ephemeral(true);

        interaction.create_followup(context, followup).await?;

        Ok(())
    }

    /// Update the message the component lives on
    pub async fn update_message(
        context: &Context,
        interaction: &ComponentInteraction,
        response: CreateInteractionResponseMessage,
    ) -> anyhow::Result<()> {
        interaction
            .create_response(context, CreateInteractionResponse::UpdateMessage(response))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_claim_row_is_enabled_grey_button() {
        let row = serde_json::to_value(claim_row()).unwrap();
        let button = &row["components"][0];
        assert_eq!(button["custom_id"], json!("claim_request"));
        assert_eq!(button["label"], json!("claim"));
        assert_eq!(button["style"], json!(2));
        assert_eq!(button["disabled"], json!(false));
    }

    #[test]
    fn test_claimed_row_is_disabled() {
        let row = serde_json::to_value(claimed_row()).unwrap();
        let button = &row["components"][0];
        assert_eq!(button["custom_id"], json!("claimed"));
        assert_eq!(button["label"], json!("claimed"));
        assert_eq!(button["disabled"], json!(true));
    }
}
