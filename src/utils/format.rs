use serenity::all::{Mentionable, RoleId, UserId};

/// Visible character budget for the request part of a thread name.
pub const THREAD_TITLE_LIMIT: usize = 40;
const ELLIPSIS: &str = "...";

/// Announcement body posted in the request channel.
///
/// The request text is embedded verbatim. The last footer line pings the
/// uploader role when `uploader_ping` is set.
pub fn announcement_body(requester: UserId, request: &str, uploader_ping: Option<RoleId>) -> String {
    let claim_line = match uploader_ping {
        Some(role) => format!("-# _ _ ༯ ⠀ {} **click** to **claim**", role.mention()),
        None => "-# _ _ ༯ ⠀ uploaders **click** to **claim**".to_string(),
    };

    format!(
        "_ _\n\
         _ _         ˚‧︵‿   **new request**    𓏼\n\
         \n\
         > _ _     {} requested  ˚̣̣̣  **{}**\n\
         \n\
         \n\
         -# _ _ ༯ ⠀ don't claim u__nles__s uploader\n\
         -# _ _ ༯ ⠀ you will be **pinged** once your req is completed\n\
         {}\n\
         _ _",
        requester.mention(),
        request,
        claim_line
    )
}

/// Follow-up posted once an uploader takes the request.
pub fn claim_notice(claimant: UserId) -> String {
    format!(
        "_ _     𓂃       ₊  **{} has claimed the req**    𓏼\n\
         > _ _     you have __48 hours__ to complete it ೃ",
        claimant.mention()
    )
}

pub fn thread_name(request: &str) -> String {
    format!("request: {}", truncate(request, THREAD_TITLE_LIMIT))
}

/// Cut `text` to at most `limit` characters, ending in an ellipsis when shortened.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
