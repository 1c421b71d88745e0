use crate::commands::claim::{ClaimSurface, NoticeTarget};
use crate::commands::req::{Announcement, RequestSurface};
use crate::utils::config::Config;
use chrono::Duration;
use serenity::all::{ApplicationId, ChannelId, Colour, GuildId, MessageId, RoleId, UserId};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub const GUILD: GuildId = GuildId::new(1);
pub const REQUEST_CHANNEL: ChannelId = ChannelId::new(500);
pub const UPLOADER_ROLE: RoleId = RoleId::new(900);
pub const ANNOUNCEMENT: MessageId = MessageId::new(7000);
pub const THREAD: ChannelId = ChannelId::new(7001);

pub fn test_config() -> Config {
    Config {
        token: "token".to_string(),
        client_id: ApplicationId::new(11),
        guild_id: Some(GUILD),
        request_channel_id: REQUEST_CHANNEL,
        uploader_role_id: UPLOADER_ROLE,
        embed_color: Colour::new(0xFF88CC),
        claim_listener: Some(Duration::hours(24)),
        ping_uploaders: true,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestCall {
    Reject(String),
    Defer,
    Post {
        channel: ChannelId,
        body: String,
        ping: Option<RoleId>,
    },
    OpenThread { message: MessageId, name: String },
    Acknowledge(String),
}

/// Records what the request poster asked the platform to do.
pub struct FakeRequestSurface {
    pub channel_present: bool,
    pub thread_fails: bool,
    pub acknowledge_fails: bool,
    pub calls: Mutex<Vec<RequestCall>>,
}

impl FakeRequestSurface {
    pub fn new() -> Self {
        Self {
            channel_present: true,
            thread_fails: false,
            acknowledge_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RequestCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RequestCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[serenity::async_trait]
impl RequestSurface for FakeRequestSurface {
    fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool {
        self.channel_present && guild == GUILD && channel == REQUEST_CHANNEL
    }

    async fn reject(&self, message: &str) -> anyhow::Result<()> {
        self.record(RequestCall::Reject(message.to_string()));
        Ok(())
    }

    async fn defer(&self) -> anyhow::Result<()> {
        self.record(RequestCall::Defer);
        Ok(())
    }

    async fn post_announcement(
        &self,
        channel: ChannelId,
        announcement: &Announcement,
    ) -> anyhow::Result<MessageId> {
        self.record(RequestCall::Post {
            channel,
            body: announcement.body.clone(),
            ping: announcement.ping,
        });
        Ok(ANNOUNCEMENT)
    }

    async fn open_thread(
        &self,
        _channel: ChannelId,
        message: MessageId,
        name: &str,
    ) -> anyhow::Result<ChannelId> {
        self.record(RequestCall::OpenThread {
            message,
            name: name.to_string(),
        });
        if self.thread_fails {
            anyhow::bail!("Missing Permissions");
        }
        Ok(THREAD)
    }

    async fn acknowledge(&self, message: &str) -> anyhow::Result<()> {
        self.record(RequestCall::Acknowledge(message.to_string()));
        if self.acknowledge_fails {
            anyhow::bail!("Unknown Webhook");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClaimCall {
    Reject { user: UserId, message: String },
    MarkClaimed { user: UserId },
    Notice { target: NoticeTarget, body: String },
    Confirm { user: UserId, message: String },
}

/// One click's view of the platform. Clicks on the same announcement share a log.
pub struct FakeClaimSurface {
    pub user: UserId,
    pub roles: Vec<RoleId>,
    pub fail_edit: bool,
    pub log: Arc<Mutex<Vec<ClaimCall>>>,
    /// Fired once this click has won the claim.
    pub on_claimed: Mutex<Option<oneshot::Sender<()>>>,
}

impl FakeClaimSurface {
    pub fn new(user: UserId, roles: Vec<RoleId>, log: Arc<Mutex<Vec<ClaimCall>>>) -> Self {
        Self {
            user,
            roles,
            fail_edit: false,
            log,
            on_claimed: Mutex::new(None),
        }
    }

    fn record(&self, call: ClaimCall) {
        self.log.lock().unwrap().push(call);
    }
}

#[serenity::async_trait]
impl ClaimSurface for FakeClaimSurface {
    async fn member_roles(&self, _guild: GuildId, _user: UserId) -> anyhow::Result<Vec<RoleId>> {
        Ok(self.roles.clone())
    }

    async fn reject(&self, message: &str) -> anyhow::Result<()> {
        self.record(ClaimCall::Reject {
            user: self.user,
            message: message.to_string(),
        });
        Ok(())
    }

    async fn mark_claimed(&self) -> anyhow::Result<()> {
        if self.fail_edit {
            anyhow::bail!("Unknown Message");
        }
        self.record(ClaimCall::MarkClaimed { user: self.user });
        if let Some(signal) = self.on_claimed.lock().unwrap().take() {
            let _ = signal.send(());
        }
        Ok(())
    }

    async fn post_notice(&self, target: &NoticeTarget, body: &str) -> anyhow::Result<()> {
        self.record(ClaimCall::Notice {
            target: target.clone(),
            body: body.to_string(),
        });
        Ok(())
    }

    async fn confirm(&self, message: &str) -> anyhow::Result<()> {
        self.record(ClaimCall::Confirm {
            user: self.user,
            message: message.to_string(),
        });
        Ok(())
    }
}
