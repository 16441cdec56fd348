use crate::commands::{CommandResult, Context};
use bancheck::config::ReplyStyle;

/// Set the language used for your replies
#[poise::command(
    slash_command,
    description_localized("fr", "Choisir la langue de vos réponses")
)]
pub async fn lang(
    ctx: Context<'_>,
    #[description = "Language code: en or fr"]
    #[description_localized("fr", "Code de langue : en ou fr")]
    code: String,
) -> CommandResult {
    let reply = ctx
        .data()
        .checker
        .set_language(ctx.author().id, &code)
        .await;

    let builder = match ctx.data().config.reply_style {
        ReplyStyle::Text => poise::CreateReply::default().content(reply.to_text()),
        ReplyStyle::Embed => poise::CreateReply::default().embed(reply.to_embed()),
    };

    ctx.send(builder.ephemeral(true)).await?;
    Ok(())
}
