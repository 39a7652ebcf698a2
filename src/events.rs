mod interaction;
mod invite;
mod member;
pub mod ready;

use crate::{
  BotData,
  BotError
};

use poise::serenity_prelude::{
  Context,
  FullEvent
};

pub async fn dispatch(
  ctx: &Context,
  event: &FullEvent,
  _framework: poise::FrameworkContext<'_, BotData, BotError>,
  data: &BotData
) -> Result<(), BotError> {
  match event {
    FullEvent::Ready { data_about_bot, .. } => ready::on_ready(ctx, data_about_bot, data).await,
    FullEvent::InviteCreate { data: invite, .. } => invite::on_invite_create(invite, data).await,
    FullEvent::InviteDelete { data: invite, .. } => invite::on_invite_delete(invite, data).await,
    FullEvent::GuildMemberAddition { new_member, .. } => member::on_guild_member_addition(ctx, new_member, data).await,
    FullEvent::GuildMemberRemoval {
      guild_id,
      user,
      member_data_if_available,
      ..
    } => member::on_guild_member_removal(ctx, guild_id, user, member_data_if_available).await,
    FullEvent::InteractionCreate { interaction, .. } => interaction::on_interaction_create(ctx, interaction, data).await,
    _ => Ok(())
  }
}
