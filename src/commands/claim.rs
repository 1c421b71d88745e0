use crate::bot::Handler;
use crate::bot::platform::SerenityClaim;
use crate::utils::board::{ClaimAttempt, RequestBoard};
use crate::utils::config::Config;
use crate::utils::format;
use chrono::Utc;
use serenity::all::{
    ChannelId, ComponentInteraction, Context, GuildId, Mentionable, MessageId, RoleId, UserId,
};

pub const CLAIM_BUTTON_ID: &str = "claim_request";
pub const CLAIMED_BUTTON_ID: &str = "claimed";

const ONLY_UPLOADERS: &str = "only uploaders may claim.";
const NO_LONGER_OPEN: &str = "this request is no longer open.";
const CLAIM_CONFIRMED: &str = "you claimed this request!";

/// Where the claim follow-up lands.
#[derive(Clone, Debug, PartialEq)]
pub enum NoticeTarget {
    Thread(ChannelId),
    /// Reply on the announcement when no thread could be opened.
    Reply {
        channel: ChannelId,
        message: MessageId,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClaimResult {
    Claimed { notice: NoticeTarget },
    Unauthorized,
    AlreadyClaimed { claimant: UserId },
    NotOpen,
}

/// A click on a claim button.
#[derive(Clone, Debug)]
pub struct Click {
    pub guild: Option<GuildId>,
    pub message: MessageId,
    pub user: UserId,
}

/// Outbound calls made while handling a claim click.
#[serenity::async_trait]
pub trait ClaimSurface: Send + Sync {
    /// Roles fetched from the API, bypassing the gateway cache.
    async fn member_roles(&self, guild: GuildId, user: UserId) -> anyhow::Result<Vec<RoleId>>;

    /// Private reply to the clicking user only.
    async fn reject(&self, message: &str) -> anyhow::Result<()>;

    /// Acknowledge the click by swapping in the disabled "claimed" button.
    async fn mark_claimed(&self) -> anyhow::Result<()>;

    async fn post_notice(&self, target: &NoticeTarget, body: &str) -> anyhow::Result<()>;

    /// Private follow-up to the claimant.
    async fn confirm(&self, message: &str) -> anyhow::Result<()>;
}

pub async fn handle_button(
    handler: &Handler,
    context: &Context,
    interaction: &ComponentInteraction,
) -> anyhow::Result<()> {
    let click = Click {
        guild: interaction.guild_id,
        message: interaction.message.id,
        user: interaction.user.id,
    };

    let surface = SerenityClaim::new(context, interaction);
    let result = handle_claim(&surface, &handler.config, &handler.board, &click).await?;

    match result {
        ClaimResult::Claimed { notice } => tracing::info!(
            "[CLAIM] {} claimed request {} (notice: {:?})",
            interaction.user.name,
            click.message,
            notice
        ),
        other => tracing::debug!(
            "[CLAIM] Click by {} on {} rejected: {:?}",
            interaction.user.name,
            click.message,
            other
        ),
    }

    Ok(())
}

/// Authorize a click and, if it is the first valid one, perform the claim.
///
/// Authorization is checked before anything else, so a non-uploader always
/// gets the same answer whatever state the request is in. Failures after the
/// board transition propagate without rolling it back: the request stays
/// claimed even if the button edit or notice did not go through.
pub async fn handle_claim<S>(
    surface: &S,
    config: &Config,
    board: &RequestBoard,
    click: &Click,
) -> anyhow::Result<ClaimResult>
where
    S: ClaimSurface + ?Sized,
{
    let authorized = match click.guild {
        Some(guild) => surface
            .member_roles(guild, click.user)
            .await?
            .contains(&config.uploader_role_id),
        None => false,
    };

    if !authorized {
        surface.reject(ONLY_UPLOADERS).await?;
        return Ok(ClaimResult::Unauthorized);
    }

    let session = match board.claim(click.message, click.user, Utc::now()).await {
        ClaimAttempt::Won(session) => session,
        ClaimAttempt::AlreadyClaimed {
            claimant,
            claimed_at,
        } => {
            surface
                .reject(&format!(
                    "this request has already been claimed by {} <t:{}:R>.",
                    claimant.mention(),
                    claimed_at.timestamp()
                ))
                .await?;
            return Ok(ClaimResult::AlreadyClaimed { claimant });
        }
        ClaimAttempt::NotOpen => {
            surface.reject(NO_LONGER_OPEN).await?;
            return Ok(ClaimResult::NotOpen);
        }
    };

    tracing::info!(
        "[CLAIM] Request {} by {} (open since {}) claimed by {}",
        session.message,
        session.requester,
        session.opened_at.format("%Y-%m-%d %H:%M UTC"),
        click.user
    );

    surface.mark_claimed().await?;

    let notice = match session.resolved_thread().await {
        Some(thread) => NoticeTarget::Thread(thread),
        None => NoticeTarget::Reply {
            channel: session.channel,
            message: session.message,
        },
    };
    surface
        .post_notice(&notice, &format::claim_notice(click.user))
        .await?;

    surface.confirm(CLAIM_CONFIRMED).await?;

    Ok(ClaimResult::Claimed { notice })
}
