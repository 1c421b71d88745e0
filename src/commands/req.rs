use crate::bot::Handler;
use crate::bot::platform::SerenityRequest;
use crate::commands;
use crate::utils::board::{RequestBoard, ThreadSlot};
use crate::utils::config::Config;
use crate::utils::format;
use chrono::Utc;
use serenity::all::{
    ChannelId, Colour, CommandInteraction, CommandOptionType, Context, GuildId, InteractionContext,
    MessageId, ResolvedOption, ResolvedValue, RoleId, UserId,
};
use serenity::builder::{CreateCommand, CreateCommandOption};
use thiserror::Error;

pub const COMMAND_NAME: &str = "req";
pub const REQUEST_OPTION: &str = "request";
/// Keeps the announcement embed under Discord's 4096 character description limit.
pub const MAX_REQUEST_LENGTH: u16 = 2000;

const CHANNEL_NOT_FOUND: &str = "Request channel not found.";
const POSTED: &str = "your request has been posted!";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request channel {0} is not in the guild cache")]
    ChannelNotFound(ChannelId),
    #[error("Discord error: {0}")]
    Platform(#[from] anyhow::Error),
    /// The request is live but the requester never saw the confirmation.
    #[error("Request {message} posted but the reply could not be updated: {source}")]
    Unacknowledged {
        message: MessageId,
        source: anyhow::Error,
    },
}

/// Rendered announcement ready to be sent.
#[derive(Clone, Debug)]
pub struct Announcement {
    pub body: String,
    pub color: Colour,
    /// Role notified through the message content.
    pub ping: Option<RoleId>,
}

/// Outcome of the thread side effect. A failed thread never fails the request.
#[derive(Clone, Debug, PartialEq)]
pub enum ThreadStatus {
    Opened(ChannelId),
    Unavailable,
}

#[derive(Clone, Debug)]
pub struct PostedRequest {
    pub channel: ChannelId,
    pub message: MessageId,
    pub thread: ThreadStatus,
}

/// Outbound calls made while posting a request.
#[serenity::async_trait]
pub trait RequestSurface: Send + Sync {
    fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool;

    /// Private reply sent instead of deferring.
    async fn reject(&self, message: &str) -> anyhow::Result<()>;

    async fn defer(&self) -> anyhow::Result<()>;

    /// Send the announcement with an enabled claim button.
    async fn post_announcement(
        &self,
        channel: ChannelId,
        announcement: &Announcement,
    ) -> anyhow::Result<MessageId>;

    async fn open_thread(
        &self,
        channel: ChannelId,
        message: MessageId,
        name: &str,
    ) -> anyhow::Result<ChannelId>;

    /// Replace the deferred reply.
    async fn acknowledge(&self, message: &str) -> anyhow::Result<()>;
}

pub async fn run(
    handler: &Handler,
    context: &Context,
    interaction: &CommandInteraction,
) -> anyhow::Result<()> {
    let mut request_text: Option<&str> = None;

    for option in &interaction.data.options() {
        if let ResolvedOption {
            name: REQUEST_OPTION,
            value: ResolvedValue::String(text),
            ..
        } = option
        {
            request_text = Some(*text);
        }
    }

    let request_text = request_text.ok_or_else(|| anyhow::anyhow!("Request text is required"))?;

    let Some(guild) = interaction.guild_id else {
        return commands::error::run(context, interaction, "Requests can only be posted in a server.")
            .await;
    };

    let surface = SerenityRequest::new(context, interaction);

    match post_request(
        &surface,
        &handler.config,
        &handler.board,
        guild,
        interaction.user.id,
        request_text,
    )
    .await
    {
        Ok(posted) => {
            match posted.thread {
                ThreadStatus::Opened(thread) => tracing::info!(
                    "[REQ] {} posted request {} in {} with thread {}",
                    interaction.user.name,
                    posted.message,
                    posted.channel,
                    thread
                ),
                ThreadStatus::Unavailable => tracing::info!(
                    "[REQ] {} posted request {} in {} without a thread",
                    interaction.user.name,
                    posted.message,
                    posted.channel
                ),
            }
            Ok(())
        }
        Err(RequestError::ChannelNotFound(channel)) => {
            tracing::warn!("[REQ] Configured request channel {} not found", channel);
            Ok(())
        }
        Err(RequestError::Unacknowledged { message, source }) => {
            tracing::warn!(
                "[REQ] Request {} is live but the reply was not updated: {:#}",
                message,
                source
            );
            Ok(())
        }
        Err(RequestError::Platform(e)) => {
            tracing::error!("[REQ] Failed to post request: {:#}", e);
            commands::error::edit_response(
                context,
                interaction,
                "Your request could not be posted. Please try again later.",
            )
            .await
        }
    }
}

/// Post a request announcement and start listening for its claim.
pub async fn post_request<S>(
    surface: &S,
    config: &Config,
    board: &RequestBoard,
    guild: GuildId,
    requester: UserId,
    request_text: &str,
) -> Result<PostedRequest, RequestError>
where
    S: RequestSurface + ?Sized,
{
    let channel = config.request_channel_id;

    if !surface.channel_exists(guild, channel) {
        surface.reject(CHANNEL_NOT_FOUND).await?;
        return Err(RequestError::ChannelNotFound(channel));
    }

    surface.defer().await?;

    let ping = config.ping_uploaders.then_some(config.uploader_role_id);
    let announcement = Announcement {
        body: format::announcement_body(requester, request_text, ping),
        color: config.embed_color,
        ping,
    };

    let message = surface.post_announcement(channel, &announcement).await?;
    // Clicks may arrive before the thread exists; they wait on this slot.
    let thread_slot = board.open(channel, message, requester, Utc::now()).await;

    let thread = match surface
        .open_thread(channel, message, &format::thread_name(request_text))
        .await
    {
        Ok(thread) => {
            thread_slot.send_replace(ThreadSlot::Opened(thread));
            ThreadStatus::Opened(thread)
        }
        Err(e) => {
            thread_slot.send_replace(ThreadSlot::Failed);
            tracing::warn!(
                "[REQ] Could not open thread for message {}: {:#}",
                message,
                e
            );
            ThreadStatus::Unavailable
        }
    };

    surface
        .acknowledge(POSTED)
        .await
        .map_err(|source| RequestError::Unacknowledged { message, source })?;

    Ok(PostedRequest {
        channel,
        message,
        thread,
    })
}

pub fn register() -> CreateCommand {
    CreateCommand::new(COMMAND_NAME)
        .description("Post a new request")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, REQUEST_OPTION, "Your request")
                .required(true)
                .max_length(MAX_REQUEST_LENGTH),
        )
        .contexts(vec![InteractionContext::Guild])
}
