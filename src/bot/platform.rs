//! Serenity-backed implementations of the request and claim surfaces.

use crate::bot::helpers::components::{self, ComponentResponseBuilder};
use crate::commands::claim::{ClaimSurface, NoticeTarget};
use crate::commands::req::{Announcement, RequestSurface};
use serenity::all::{
    AutoArchiveDuration, ChannelId, CommandInteraction, ComponentInteraction, Context,
    CreateAllowedMentions, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, CreateThread, EditInteractionResponse, GuildId, Mentionable, MessageId, RoleId, Timestamp,
    UserId,
};

pub struct SerenityRequest<'a> {
    context: &'a Context,
    interaction: &'a CommandInteraction,
}

impl<'a> SerenityRequest<'a> {
    pub fn new(context: &'a Context, interaction: &'a CommandInteraction) -> Self {
        Self {
            context,
            interaction,
        }
    }
}

#[serenity::async_trait]
impl RequestSurface for SerenityRequest<'_> {
    fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool {
        self.context
            .cache
            .guild(guild)
            .is_some_and(|guild| guild.channels.contains_key(&channel))
    }

    async fn reject(&self, message: &str) -> anyhow::Result<()> {
        let response = CreateInteractionResponseMessage::new()
            .content(message)
            .ephemeral(true);

        self.interaction
            .create_response(self.context, CreateInteractionResponse::Message(response))
            .await?;

        Ok(())
    }

    async fn defer(&self) -> anyhow::Result<()> {
        self.interaction.defer_ephemeral(self.context).await?;
        Ok(())
    }

    async fn post_announcement(
        &self,
        channel: ChannelId,
        announcement: &Announcement,
    ) -> anyhow::Result<MessageId> {
        let embed = CreateEmbed::new()
            .description(announcement.body.as_str())
            .colour(announcement.color)
            .timestamp(Timestamp::now());

        let mut builder = CreateMessage::new()
            .embed(embed)
            .components(vec![components::claim_row()]);

        // Mentions inside embeds never notify, so the ping goes in the content.
        if let Some(role) = announcement.ping {
            builder = builder
                .content(role.mention().to_string())
                .allowed_mentions(CreateAllowedMentions::new().roles(vec![role]));
        }

        let message = channel.send_message(self.context, builder).await?;

        Ok(message.id)
    }

    async fn open_thread(
        &self,
        channel: ChannelId,
        message: MessageId,
        name: &str,
    ) -> anyhow::Result<ChannelId> {
        let thread = channel
            .create_thread_from_message(
                self.context,
                message,
                CreateThread::new(name).auto_archive_duration(AutoArchiveDuration::OneDay),
            )
            .await?;

        Ok(thread.id)
    }

    async fn acknowledge(&self, message: &str) -> anyhow::Result<()> {
        self.interaction
            .edit_response(self.context, EditInteractionResponse::new().content(message))
            .await?;

        Ok(())
    }
}

pub struct SerenityClaim<'a> {
    context: &'a Context,
    interaction: &'a ComponentInteraction,
}

impl<'a> SerenityClaim<'a> {
    pub fn new(context: &'a Context, interaction: &'a ComponentInteraction) -> Self {
        Self {
            context,
            interaction,
        }
    }
}

#[serenity::async_trait]
impl ClaimSurface for SerenityClaim<'_> {
    async fn member_roles(&self, guild: GuildId, user: UserId) -> anyhow::Result<Vec<RoleId>> {
        let member = self.context.http.get_member(guild, user).await?;
        Ok(member.roles)
    }

    async fn reject(&self, message: &str) -> anyhow::Result<()> {
        ComponentResponseBuilder::ephemeral(self.context, self.interaction, message).await
    }

    async fn mark_claimed(&self) -> anyhow::Result<()> {
        let response =
            CreateInteractionResponseMessage::new().components(vec![components::claimed_row()]);

        ComponentResponseBuilder::update_message(self.context, self.interaction, response).await
    }

    async fn post_notice(&self, target: &NoticeTarget, body: &str) -> anyhow::Result<()> {
        let (channel, builder) = match *target {
            NoticeTarget::Thread(thread) => (thread, CreateMessage::new().content(body)),
            NoticeTarget::Reply { channel, message } => (
                channel,
                CreateMessage::new()
                    .content(body)
                    .reference_message((channel, message)),
            ),
        };

        channel.send_message(self.context, builder).await?;

        Ok(())
    }

    async fn confirm(&self, message: &str) -> anyhow::Result<()> {
        ComponentResponseBuilder::ephemeral_followup(self.context, self.interaction, message).await
    }
}
