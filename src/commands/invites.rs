use crate::{
  BotError,
  internals::invite_data::InviteSnapshot
};

use poise::{
  CreateReply,
  serenity_prelude::Member
};

/// Invite tracking
#[poise::command(slash_command, guild_only, subcommands("view", "refresh"))]
pub async fn invites(_: super::PoiseContext<'_>) -> Result<(), BotError> { Ok(()) }

/// Check how many members someone has invited
#[poise::command(slash_command)]
async fn view(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to look up (defaults to you)"] member: Option<Member>
) -> Result<(), BotError> {
  let guild_id = ctx.guild_id().unwrap();
  let (user_id, display_name) = match &member {
    Some(m) => (m.user.id, m.user.display_name().to_string()),
    None => (ctx.author().id, ctx.author().display_name().to_string())
  };

  let total = ctx.data().invites.invite_count(guild_id, user_id);
  ctx.reply(format!("**{display_name}** has **{total}** invites.")).await?;

  Ok(())
}

/// Refresh the invite cache
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
async fn refresh(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  let guild_id = ctx.guild_id().unwrap();

  match guild_id.invites(ctx.http()).await {
    Ok(invites) => {
      let snapshots: Vec<InviteSnapshot> = invites.iter().map(InviteSnapshot::from).collect();
      ctx.data().invites.prime(guild_id, &snapshots);
      ctx
        .send(
          CreateReply::default()
            .content(format!("Invite cache refreshed with {} invites!", snapshots.len()))
            .ephemeral(true)
        )
        .await?;
    },
    Err(e) => {
      eprintln!("InviteTracker[Warn] Manual refresh failed, keeping the previous snapshot: {e}");
      ctx
        .send(
          CreateReply::default()
            .content("Could not fetch the invite list, the previous cache is untouched.")
            .ephemeral(true)
        )
        .await?;
    }
  }

  Ok(())
}
