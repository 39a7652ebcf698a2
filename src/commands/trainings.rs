use super::shifts::{
  bad_time_notice,
  conclude_session,
  generate_session_id,
  parse_wall_clock,
  require_staff,
  today_timestamp
};

use crate::{
  BotError,
  internals::{
    config::BINARY_PROPERTIES,
    sessions::{
      Session,
      SessionKind
    }
  }
};

use poise::{
  CreateReply,
  serenity_prelude::{
    ChannelId,
    CreateActionRow,
    CreateButton,
    CreateEmbed,
    CreateEmbedFooter,
    CreateMessage,
    Mentionable,
    RoleId
  }
};

/// Training announcements
#[poise::command(slash_command, guild_only, subcommands("start", "cancel", "end"))]
pub async fn training(_: super::PoiseContext<'_>) -> Result<(), BotError> { Ok(()) }

/// Start a new training session
#[poise::command(slash_command)]
async fn start(
  ctx: super::PoiseContext<'_>,
  #[description = "Start time (HH:MM, 5-minute intervals)"] start_time: String,
  #[description = "End time (HH:MM, 5-minute intervals)"] end_time: String
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  let (Some(starts), Some(ends)) = (parse_wall_clock(&start_time), parse_wall_clock(&end_time)) else {
    return bad_time_notice(ctx).await;
  };

  let starts = today_timestamp(starts.0, starts.1);
  let ends = today_timestamp(ends.0, ends.1);
  let session_id = generate_session_id();

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title("Almora Training Starting")
    .description(
      "A training session is starting at the Training Centre. Attend if you are looking to get promoted! If you have any questions, please \
       ask the training host. See details below."
    )
    .field(
      "Details",
      format!(
        "**Host**: {}\n**Start Time**: <t:{starts}:t>\n**End Time**: <t:{ends}:t>",
        ctx.author().mention()
      ),
      false
    )
    .footer(CreateEmbedFooter::new(format!("Session ID: {session_id}")));

  let message = ChannelId::new(BINARY_PROPERTIES.trainings.channel)
    .send_message(
      ctx.http(),
      CreateMessage::new()
        .content(RoleId::new(BINARY_PROPERTIES.trainings.ping_role).mention().to_string())
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
          CreateButton::new_link(BINARY_PROPERTIES.game_url).label("Training Centre"),
        ])])
    )
    .await?;

  ctx.data().sessions.insert(session_id.clone(), Session {
    kind: SessionKind::Training,
    host: ctx.author().id,
    starts,
    ends,
    channel: message.channel_id,
    message: message.id
  });

  ctx
    .send(
      CreateReply::default()
        .content(format!("Training started successfully! Session ID: {session_id}"))
        .ephemeral(true)
    )
    .await?;

  Ok(())
}

/// Cancel an announced training session
#[poise::command(slash_command)]
async fn cancel(
  ctx: super::PoiseContext<'_>,
  #[description = "The session ID from the announcement"] session_id: String
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  conclude_session(ctx, &session_id, SessionKind::Training, true).await
}

/// End an announced training session
#[poise::command(slash_command)]
async fn end(
  ctx: super::PoiseContext<'_>,
  #[description = "The session ID from the announcement"] session_id: String
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  conclude_session(ctx, &session_id, SessionKind::Training, false).await
}
