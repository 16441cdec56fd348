use crate::commands::{CommandResult, Context};
use bancheck::components::ban_check::CheckReply;
use bancheck::config::ReplyStyle;
use bancheck::error::Error;

/// Check if a UID is banned
#[poise::command(
    slash_command,
    description_localized("fr", "Vérifier si un UID est banni")
)]
pub async fn check(
    ctx: Context<'_>,
    #[description = "The player UID to check"]
    #[description_localized("fr", "L'UID du joueur à vérifier")]
    uid: String,
) -> CommandResult {
    let reply = ctx
        .data()
        .checker
        .check(ctx.author().id, &uid, move || async move {
            // Acknowledge before the API round trip
            ctx.defer().await.map_err(Error::from)
        })
        .await?;

    send_check_reply(ctx, &reply).await
}

async fn send_check_reply(ctx: Context<'_>, reply: &CheckReply) -> CommandResult {
    let config = &ctx.data().config;

    let builder = match config.reply_style {
        ReplyStyle::Embed => poise::CreateReply::default().embed(reply.to_embed(&config.assets)),
        ReplyStyle::Text => poise::CreateReply::default().content(reply.to_text()),
    };

    ctx.send(builder.ephemeral(reply.is_ephemeral())).await?;
    Ok(())
}
