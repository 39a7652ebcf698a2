use crate::{
  BotData,
  BotError,
  internals::{
    config::BINARY_PROPERTIES,
    invite_data::InviteSnapshot
  }
};

use poise::serenity_prelude::{
  InviteCreateEvent,
  InviteDeleteEvent
};

pub async fn on_invite_create(
  invite: &InviteCreateEvent,
  data: &BotData
) -> Result<(), BotError> {
  let Some(guild_id) = invite.guild_id else {
    return Ok(());
  };
  if guild_id.get() != BINARY_PROPERTIES.guild_id {
    return Ok(());
  }

  data.invites.track(
    guild_id,
    &InviteSnapshot {
      code:    invite.code.clone(),
      uses:    invite.uses,
      inviter: invite.inviter.as_ref().map(|u| u.id)
    }
  );

  Ok(())
}

pub async fn on_invite_delete(
  invite: &InviteDeleteEvent,
  data: &BotData
) -> Result<(), BotError> {
  let Some(guild_id) = invite.guild_id else {
    return Ok(());
  };

  data.invites.forget(guild_id, &invite.code);

  Ok(())
}
