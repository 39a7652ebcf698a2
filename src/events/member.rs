use crate::{
  BotData,
  BotError,
  internals::{
    config::BINARY_PROPERTIES,
    invite_data::{
      Attribution,
      InviteSnapshot
    },
    utils::format_timestamp
  }
};

use poise::serenity_prelude::{
  ChannelId,
  Context,
  CreateEmbed,
  CreateEmbedFooter,
  CreateMessage,
  GuildId,
  Member,
  Mentionable,
  Timestamp,
  User
};

/// Diffs the live invite list against the snapshot and announces the join
/// to the invite feed. Exactly one message goes out per join, whether the
/// attribution succeeds or not, and nothing in here is allowed to fail the
/// gateway event.
pub async fn on_guild_member_addition(
  ctx: &Context,
  new_member: &Member,
  data: &BotData
) -> Result<(), BotError> {
  if new_member.guild_id != GuildId::new(BINARY_PROPERTIES.guild_id) {
    return Ok(());
  }
  if new_member.user.bot {
    return Ok(());
  }

  let attribution = match new_member.guild_id.invites(&ctx.http).await {
    Ok(invites) => {
      let snapshots: Vec<InviteSnapshot> = invites.iter().map(InviteSnapshot::from).collect();
      data.invites.attribute(new_member.guild_id, &snapshots)
    },
    Err(e) => {
      eprintln!("InviteTracker[Warn] Could not fetch invites for the join diff: {e}");
      Attribution::Unknown
    }
  };

  let text = match &attribution {
    Attribution::Invited { inviter, total, code } => {
      println!("InviteTracker[Info] {} joined through invite {code}", new_member.user.name);
      format!("{} has been invited by <@{inviter}> and has now {total} invites.", new_member.mention())
    },
    Attribution::Unknown => {
      println!("InviteTracker[Info] Could not determine who invited {}", new_member.user.name);
      format!("I could not find out how {} joined the server.", new_member.mention())
    }
  };

  if let Err(e) = ChannelId::new(BINARY_PROPERTIES.invite_channel)
    .send_message(&ctx.http, CreateMessage::new().content(text))
    .await
  {
    eprintln!("InviteTracker[Warn] Error sending the join notification: {e}");
  }

  Ok(())
}

pub async fn on_guild_member_removal(
  ctx: &Context,
  guild_id: &GuildId,
  user: &User,
  member_data_if_available: &Option<Member>
) -> Result<(), BotError> {
  if guild_id.get() != BINARY_PROPERTIES.guild_id {
    return Ok(());
  }

  let mut is_bot = "Bot";
  if !user.bot {
    is_bot = "Member";
  }

  let mut fields = vec![("Account Creation Date:", format_timestamp(user.created_at().timestamp()), false)];

  if let Some(member_data) = member_data_if_available {
    if let Some(joined_at) = member_data.joined_at {
      fields.push(("Server Join Date:", format_timestamp(joined_at.timestamp()), false));
    }

    let roles = member_data.roles.iter().map(|r| format!("<@&{r}>")).collect::<Vec<String>>().join(" ");
    if !roles.is_empty() {
      fields.push(("Roles:", roles, false));
    }
  }

  ChannelId::new(BINARY_PROPERTIES.mod_log)
    .send_message(
      &ctx.http,
      CreateMessage::new().embed(
        CreateEmbed::new()
          .color(BINARY_PROPERTIES.embed_colors.red)
          .thumbnail(user.face())
          .title(format!("{is_bot} Left: {}", user.tag()))
          .fields(fields)
          .footer(CreateEmbedFooter::new(format!("ID: {}", user.id)))
          .timestamp(Timestamp::now())
      )
    )
    .await?;

  Ok(())
}
