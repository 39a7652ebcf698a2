use crate::BotError;

use poise::CreateReply;

/// Repeat a message as the bot (staff only)
#[poise::command(slash_command, guild_only, default_member_permissions = "MANAGE_MESSAGES")]
pub async fn say(
  ctx: super::PoiseContext<'_>,
  #[description = "The message to repeat"] message: String
) -> Result<(), BotError> {
  ctx.channel_id().say(ctx.http(), message).await?;
  ctx.send(CreateReply::default().content("Sent!").ephemeral(true)).await?;

  Ok(())
}
