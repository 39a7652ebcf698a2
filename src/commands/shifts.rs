use crate::{
  BotError,
  internals::{
    config::BINARY_PROPERTIES,
    sessions::{
      Session,
      SessionKind
    },
    utils::is_staff
  }
};

use {
  lazy_static::lazy_static,
  poise::{
    CreateReply,
    serenity_prelude::{
      ChannelId,
      CreateActionRow,
      CreateButton,
      CreateEmbed,
      CreateEmbedFooter,
      CreateMessage,
      EditMessage,
      Mentionable,
      RoleId
    }
  },
  regex::Regex,
  std::time::{
    SystemTime,
    UNIX_EPOCH
  }
};

lazy_static! {
  static ref WALL_CLOCK: Regex = Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").unwrap();
}

/// Parses `HH:MM` into hours and minutes. Announcements are scheduled on
/// 5-minute marks, anything else is rejected.
pub(super) fn parse_wall_clock(input: &str) -> Option<(i64, i64)> {
  let caps = WALL_CLOCK.captures(input)?;
  let hours = caps.get(1)?.as_str().parse().ok()?;
  let minutes: i64 = caps.get(2)?.as_str().parse().ok()?;

  if minutes % 5 != 0 {
    return None;
  }

  Some((hours, minutes))
}

/// Turns a wall-clock time into today's Unix timestamp (UTC day).
pub(super) fn today_timestamp(
  hours: i64,
  minutes: i64
) -> i64 {
  let now = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .expect("System time is lagging behind or is in the future")
    .as_secs() as i64;
  let midnight = now - now % 86400;

  midnight + hours * 3600 + minutes * 60
}

pub(super) fn generate_session_id() -> String { format!("{:08X}", rand::random::<u32>()) }

pub(super) async fn require_staff(ctx: super::PoiseContext<'_>) -> Result<bool, BotError> {
  let allowed = match ctx.author_member().await {
    Some(member) => is_staff(&member),
    None => false
  };

  if !allowed {
    ctx
      .send(
        CreateReply::default()
          .content("You don't have permission to use this command.")
          .ephemeral(true)
      )
      .await?;
  }

  Ok(allowed)
}

pub(super) async fn bad_time_notice(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  ctx
    .send(
      CreateReply::default()
        .content("Invalid time! Use HH:MM in 5-minute intervals (e.g. 19:45, 20:00, 20:05)")
        .ephemeral(true)
    )
    .await?;
  Ok(())
}

#[derive(poise::ChoiceParameter)]
enum ShiftType {
  #[name = "General"]
  General,
  #[name = "Promotional"]
  Promotional
}

/// Shift announcements
#[poise::command(slash_command, guild_only, subcommands("start", "cancel", "end"))]
pub async fn shift(_: super::PoiseContext<'_>) -> Result<(), BotError> { Ok(()) }

/// Start a new shift
#[poise::command(slash_command)]
async fn start(
  ctx: super::PoiseContext<'_>,
  #[description = "Type of shift"] shift_type: ShiftType,
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

  let (title, description) = match shift_type {
    ShiftType::Promotional => (
      "Almora Promotional Shift Starting",
      "A promotional shift has now started at the Handley Chase Store. If you have any questions, please ask the shift host. See details below."
    ),
    ShiftType::General => (
      "Almora Shift Starting",
      "A shift has now started at the Handley Chase Store. If you have any questions, please ask the shift host. See details below."
    )
  };

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title(title)
    .description(description)
    .field(
      "Details",
      format!(
        "**Host**: {}\n**Start Time**: <t:{starts}:t>\n**End Time**: <t:{ends}:t>",
        ctx.author().mention()
      ),
      false
    )
    .footer(CreateEmbedFooter::new(format!("Session ID: {session_id}")));

  let message = ChannelId::new(BINARY_PROPERTIES.shifts.channel)
    .send_message(
      ctx.http(),
      CreateMessage::new()
        .content(RoleId::new(BINARY_PROPERTIES.shifts.ping_role).mention().to_string())
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
          CreateButton::new_link(BINARY_PROPERTIES.game_url).label("Main Game"),
        ])])
    )
    .await?;

  ctx.data().sessions.insert(session_id.clone(), Session {
    kind: SessionKind::Shift,
    host: ctx.author().id,
    starts,
    ends,
    channel: message.channel_id,
    message: message.id
  });

  ctx
    .send(
      CreateReply::default()
        .content(format!("Shift started successfully! Session ID: {session_id}"))
        .ephemeral(true)
    )
    .await?;

  Ok(())
}

/// Closes out a session announcement and drops it from the board.
pub(super) async fn conclude_session(
  ctx: super::PoiseContext<'_>,
  session_id: &str,
  kind: SessionKind,
  cancelled: bool
) -> Result<(), BotError> {
  let Some(session) = ctx.data().sessions.get(session_id).filter(|s| s.kind == kind) else {
    ctx
      .send(
        CreateReply::default()
          .content(format!("No active {} found with session ID `{session_id}`.", kind.label().to_lowercase()))
          .ephemeral(true)
      )
      .await?;
    return Ok(());
  };

  let (title, description, verb) = if cancelled {
    (
      format!("Almora {} Cancelled", kind.label()),
      format!("This {} has been cancelled by the host. Apologies for the inconvenience!", kind.label().to_lowercase()),
      "cancelled"
    )
  } else {
    (
      format!("Almora {} Concluded", kind.label()),
      format!("This {} has now ended. Thank you to everyone who attended!", kind.label().to_lowercase()),
      "ended"
    )
  };

  let color = if cancelled {
    BINARY_PROPERTIES.embed_colors.red
  } else {
    BINARY_PROPERTIES.embed_colors.primary
  };

  let embed = CreateEmbed::new()
    .color(color)
    .title(title)
    .description(description)
    .field("Details", format!("**Host**: {}", session.host.mention()), false)
    .footer(CreateEmbedFooter::new(format!("Session ID: {session_id}")));

  if let Err(e) = session
    .channel
    .edit_message(ctx.http(), session.message, EditMessage::new().embed(embed).components(vec![]))
    .await
  {
    eprintln!("Sessions[Warn] Could not edit the announcement for {session_id}: {e}");
  }

  ctx.data().sessions.remove(session_id);
  ctx
    .send(
      CreateReply::default()
        .content(format!("{} {session_id} has been {verb}.", kind.label()))
        .ephemeral(true)
    )
    .await?;

  Ok(())
}

/// Cancel an announced shift
#[poise::command(slash_command)]
async fn cancel(
  ctx: super::PoiseContext<'_>,
  #[description = "The session ID from the announcement"] session_id: String
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  conclude_session(ctx, &session_id, SessionKind::Shift, true).await
}

/// End an announced shift
#[poise::command(slash_command)]
async fn end(
  ctx: super::PoiseContext<'_>,
  #[description = "The session ID from the announcement"] session_id: String
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  conclude_session(ctx, &session_id, SessionKind::Shift, false).await
}

#[cfg(test)]
mod tests {
  use super::parse_wall_clock;

  #[test]
  fn accepts_five_minute_marks() {
    assert_eq!(parse_wall_clock("19:45"), Some((19, 45)));
    assert_eq!(parse_wall_clock("0:00"), Some((0, 0)));
    assert_eq!(parse_wall_clock("23:55"), Some((23, 55)));
  }

  #[test]
  fn rejects_off_marks_and_garbage() {
    assert_eq!(parse_wall_clock("19:47"), None);
    assert_eq!(parse_wall_clock("24:00"), None);
    assert_eq!(parse_wall_clock("7:5"), None);
    assert_eq!(parse_wall_clock("later"), None);
    assert_eq!(parse_wall_clock("19:45:00"), None);
  }
}
