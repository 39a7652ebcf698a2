use crate::{
  BotError,
  controllers::sql::Cases,
  internals::{
    config::BINARY_PROPERTIES,
    utils::format_duration
  }
};

use {
  parse_duration::parse,
  poise::{
    CreateReply,
    serenity_prelude::{
      AutocompleteChoice,
      ChannelId,
      CreateEmbed,
      CreateMessage,
      Member,
      Mentionable,
      Timestamp,
      User
    }
  },
  std::time::{
    Duration,
    SystemTime,
    UNIX_EPOCH
  }
};

#[derive(Debug, Clone)]
pub enum ActionType {
  Ban,
  Unban,
  Warn,
  Unwarn,
  Kick,
  Mute,
  Unmute
}

impl std::fmt::Display for ActionType {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    let action = match self {
      Self::Ban => "Ban",
      Self::Unban => "Unban",
      Self::Warn => "Warn",
      Self::Unwarn => "Unwarn",
      Self::Kick => "Kick",
      Self::Mute => "Mute",
      Self::Unmute => "Unmute"
    };

    write!(f, "{action}")
  }
}

pub enum Target {
  User(User),
  Member(Member)
}

impl Target {
  fn user(&self) -> &User {
    match self {
      Self::User(user) => user,
      Self::Member(member) => &member.user
    }
  }
}

pub async fn generate_id(pool: &sqlx::PgPool) -> Result<i32, BotError> {
  let q: Option<i32> = sqlx::query_scalar("SELECT MAX(case_id) FROM cases").fetch_one(pool).await?;

  match q {
    Some(id) => Ok(id + 1),
    None => Ok(1)
  }
}

fn unix_now() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .expect("System time is lagging behind or is in the future")
    .as_secs() as i64
}

/// Send a notification to a user about a moderation action
async fn send_notification(
  ctx: &super::PoiseContext<'_>,
  target: &Target,
  action: &ActionType,
  reason: &str,
  case_id: i32,
  duration: Option<u64>
) -> Result<bool, BotError> {
  let description = format!(
    "You've been **{}** in **{}** for:```\n{reason}\n```",
    match action {
      ActionType::Ban => "banned",
      ActionType::Kick => "kicked",
      ActionType::Mute => "timed out",
      ActionType::Warn => "warned",
      _ => ""
    },
    ctx.guild_id().unwrap().to_partial_guild(ctx.http()).await?.name
  );

  let mut fields = vec![("Case ID", case_id.to_string(), true)];

  if let Some(duration) = duration {
    fields.insert(1, ("Duration", format_duration(duration), true));
  }

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title("Notice from moderation team")
    .fields(fields)
    .description(description);

  match target.user().direct_message(ctx.http(), CreateMessage::new().embed(embed)).await {
    Ok(_) => Ok(true),
    Err(e) => {
      eprintln!("Moderation[send_notification] Send DM failed with error: {e}");
      Ok(false)
    }
  }
}

fn format_dm_status(b: bool) -> &'static str {
  match b {
    true => "dm sent",
    false => "dm failed"
  }
}

async fn log_entry(
  ctx: super::PoiseContext<'_>,
  case_id: i32,
  target: Target,
  action: ActionType,
  reason: &str,
  duration: Option<i64>
) -> Result<bool, BotError> {
  let db = ctx.data().postgres.clone();
  let existing_case = Cases::load_data(&db, case_id).await?;
  let Some(moderator) = ctx.author_member().await.map(|m| m.into_owned()) else {
    eprintln!("Moderation[Error] Could not resolve the moderator's member data, dropping this case!");
    return Ok(false);
  };

  if existing_case.is_some() {
    eprintln!(
      "Moderation[Error] {} tried to create a case entry but Postgres already has it, dropping this one!",
      moderator.user.name
    );
    return Ok(false);
  }

  let target = target.user();

  let case = Cases {
    case_id,
    case_type: action.to_string(),
    member_name: target.name.clone(),
    member_id: target.id.to_string(),
    moderator_name: moderator.user.name.clone(),
    moderator_id: moderator.user.id.to_string(),
    timestamp: unix_now(),
    duration,
    reason: reason.into(),
    active: true
  };

  let mut fields = vec![
    ("User", format!("{}\n{}\n`{}`", target.name, target.mention(), target.id), true),
    (
      "Moderator",
      format!("{}\n{}\n`{}`", moderator.user.name, moderator.mention(), moderator.user.id),
      true
    ),
    ("\u{200B}", "\u{200B}".to_string(), true),
    ("Reason", reason.to_string(), true),
  ];

  if let Some(duration) = duration {
    fields.push(("Duration", format_duration(duration as u64), false));
  }

  let embed = CreateEmbed::default()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title(format!("{action} | Case #{case_id}"))
    .timestamp(Timestamp::from_unix_timestamp(case.timestamp).unwrap_or_else(|_| Timestamp::now()))
    .fields(fields);

  match ChannelId::new(BINARY_PROPERTIES.mod_log)
    .send_message(ctx.http(), CreateMessage::new().embed(embed))
    .await
  {
    Ok(_) => {
      case.create(&db).await?;
      Ok(true)
    },
    Err(e) => {
      eprintln!("Moderation[Error] err sending message: {e}");
      Ok(false)
    }
  }
}

async fn duplicate_case_notice(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  ctx
    .send(
      CreateReply::default()
        .content("Sorry, be faster next time as this case entry already exists!")
        .ephemeral(true)
    )
    .await?;
  Ok(())
}

/// Ban a member from the server
#[poise::command(slash_command, guild_only, default_member_permissions = "BAN_MEMBERS")]
pub async fn ban(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to ban"] member: Member,
  #[description = "The reason for the ban"] reason: String
) -> Result<(), BotError> {
  let guild_id = ctx.guild_id().unwrap();
  let user_id = member.user.id;
  let case_id = generate_id(&ctx.data().postgres).await?;

  if member.user.id == ctx.author().id {
    ctx.reply("You cannot ban yourself.").await?;
    return Ok(());
  }

  let notify_user = send_notification(&ctx, &Target::Member(member.clone()), &ActionType::Ban, &reason, case_id, None).await?;

  match guild_id.ban_with_reason(ctx.http(), user_id, 1, format!("{reason} | #{case_id}")).await {
    Ok(_) => {
      ctx
        .reply(format!(
          "{} now banned for `{reason}` ({})",
          member.user.name,
          format_dm_status(notify_user)
        ))
        .await?;

      if !log_entry(ctx, case_id, Target::Member(member), ActionType::Ban, &reason, None).await? {
        duplicate_case_notice(ctx).await?;
      }
    },
    Err(e) => {
      eprintln!("Error banning user: {e}");
      ctx.reply(format!("Could not ban the user:\n`{e}`")).await?;
    }
  }

  Ok(())
}

/// Kick a member from the server
#[poise::command(slash_command, guild_only, default_member_permissions = "KICK_MEMBERS")]
pub async fn kick(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to kick"] member: Member,
  #[description = "The reason for the kick"] reason: String
) -> Result<(), BotError> {
  let case_id = generate_id(&ctx.data().postgres).await?;

  let notify_user = send_notification(&ctx, &Target::Member(member.clone()), &ActionType::Kick, &reason, case_id, None).await?;

  match member.kick_with_reason(ctx.http(), &format!("{reason} | #{case_id}")).await {
    Ok(_) => {
      ctx
        .reply(format!(
          "{} now kicked for `{reason}` ({})",
          member.user.name,
          format_dm_status(notify_user)
        ))
        .await?;

      if !log_entry(ctx, case_id, Target::Member(member), ActionType::Kick, &reason, None).await? {
        duplicate_case_notice(ctx).await?;
      }
    },
    Err(e) => {
      eprintln!("Error kicking user: {e}");
      ctx.reply(format!("Could not kick the user:\n`{e}`")).await?;
    }
  }

  Ok(())
}

/// Revoke a ban from a member
#[poise::command(slash_command, guild_only, default_member_permissions = "BAN_MEMBERS")]
pub async fn unban(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to revoke a ban on"] user: User,
  #[description = "The reason for the unban"] reason: String
) -> Result<(), BotError> {
  let case_id = generate_id(&ctx.data().postgres).await?;

  match ctx.guild_id().unwrap().unban(ctx.http(), user.id).await {
    Ok(_) => {
      ctx.reply(format!("{} now unbanned for `{reason}`", user.name)).await?;

      if !log_entry(ctx, case_id, Target::User(user), ActionType::Unban, &reason, None).await? {
        duplicate_case_notice(ctx).await?;
      }
    },
    Err(e) => {
      eprintln!("Error revoking the ban: {e}");
      ctx.reply(format!("Could not unban the user:\n`{e}`")).await?;
    }
  }

  Ok(())
}

/// Warn a member
#[poise::command(slash_command, guild_only, default_member_permissions = "MODERATE_MEMBERS")]
pub async fn warn(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to warn"] member: Member,
  #[description = "The reason for the warning"] reason: String
) -> Result<(), BotError> {
  if member.user.id == ctx.author().id {
    ctx.reply("You cannot warn yourself.").await?;
    return Ok(());
  }
  if member.user.id == ctx.framework().bot_id {
    ctx.reply("I cannot warn myself.").await?;
    return Ok(());
  }

  let case_id = generate_id(&ctx.data().postgres).await?;
  let notify_user = send_notification(&ctx, &Target::Member(member.clone()), &ActionType::Warn, &reason, case_id, None).await?;

  if !log_entry(ctx, case_id, Target::Member(member.clone()), ActionType::Warn, &reason, None).await? {
    duplicate_case_notice(ctx).await?;
    return Ok(());
  }

  let warning_count = Cases::count_active_warnings(&ctx.data().postgres, &member.user.id.to_string()).await?;
  ctx
    .reply(format!(
      "{} now warned for `{reason}`, they have {warning_count} warning(s) ({})",
      member.user.name,
      format_dm_status(notify_user)
    ))
    .await?;

  Ok(())
}

/// Revoke a warning from a member
#[poise::command(slash_command, guild_only, default_member_permissions = "MODERATE_MEMBERS")]
pub async fn unwarn(
  ctx: super::PoiseContext<'_>,
  #[description = "The case ID of the warning to revoke"]
  #[autocomplete = "ac_cases"]
  case_id: i32
) -> Result<(), BotError> {
  let db = ctx.data().postgres.clone();

  if !Cases::deactivate_warning(&db, case_id).await? {
    ctx.reply(format!("#{case_id} is not an active warning, nothing to revoke")).await?;
    return Ok(());
  }

  let new_id = generate_id(&db).await?;
  let target = match Cases::load_data(&db, case_id).await? {
    Some(case) => case,
    None => {
      ctx.reply("Case not found in database").await?;
      return Ok(());
    }
  };

  ctx.reply(format!("Warning #{case_id} on {} has been revoked", target.member_name)).await?;

  let member_user_id = match target.member_id.parse::<u64>() {
    Ok(id) if id != 0 => id,
    _ => return Ok(())
  };

  let user = ctx.http().get_user(poise::serenity_prelude::UserId::new(member_user_id)).await?;
  if !log_entry(
    ctx,
    new_id,
    Target::User(user),
    ActionType::Unwarn,
    &format!("Revoked warning #{case_id}"),
    None
  )
  .await?
  {
    duplicate_case_notice(ctx).await?;
  }

  Ok(())
}

/// List a member's active warnings
#[poise::command(slash_command, guild_only, default_member_permissions = "MODERATE_MEMBERS")]
pub async fn warnings(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to look up"] member: Member
) -> Result<(), BotError> {
  let warnings = Cases::get_active_warnings(&ctx.data().postgres, &member.user.id.to_string()).await?;

  if warnings.is_empty() {
    ctx.reply(format!("{} has no active warnings.", member.user.name)).await?;
    return Ok(());
  }

  let lines: Vec<String> = warnings
    .iter()
    .map(|w| format!("`#{}` {} - <t:{}:R>", w.case_id, w.reason, w.timestamp))
    .collect();

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title(format!("Warnings for {}", member.user.name))
    .description(lines.join("\n"))
    .thumbnail(member.user.face())
    .timestamp(Timestamp::now());

  ctx.send(CreateReply::default().embed(embed)).await?;

  Ok(())
}

/// Send the member to the timeout corner
#[poise::command(slash_command, guild_only, default_member_permissions = "MODERATE_MEMBERS")]
pub async fn mute(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to timeout"] mut member: Member,
  #[description = "Timeout duration"] duration: String,
  #[description = "The reason for the timeout"] reason: String
) -> Result<(), BotError> {
  let mut d = match parse(&duration) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Moderation[Timeout:Error] {e}");
      ctx.reply("Could not parse the duration, try again").await?;
      return Ok(());
    }
  };

  const MAX_TIMEOUT_SECONDS: u64 = 2419200; // 28 days in seconds
  if d.as_secs() > MAX_TIMEOUT_SECONDS {
    d = Duration::from_secs(MAX_TIMEOUT_SECONDS);
    ctx
      .send(CreateReply::default().content("Duration has been adjusted due to your input exceeding the maximum duration of 28 days!"))
      .await?;
  }

  let dur = match Timestamp::from_unix_timestamp(unix_now() + d.as_secs() as i64) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Moderation[Timeout:Error] {e}");
      ctx
        .reply(format!("Timestamp didn't parse correctly and Discord sent an error back.\n`{e}`"))
        .await?;
      return Ok(());
    }
  };

  let case_id = generate_id(&ctx.data().postgres).await?;

  let notify_user = send_notification(
    &ctx,
    &Target::Member(member.clone()),
    &ActionType::Mute,
    &reason,
    case_id,
    Some(d.as_secs())
  )
  .await?;

  match member.disable_communication_until_datetime(ctx.http(), dur).await {
    Ok(_) => {
      ctx
        .reply(format!(
          "{} now muted for `{reason}` ({})",
          member.user.name,
          format_dm_status(notify_user)
        ))
        .await?;

      if !log_entry(
        ctx,
        case_id,
        Target::Member(member),
        ActionType::Mute,
        &reason,
        Some(d.as_secs() as i64)
      )
      .await?
      {
        duplicate_case_notice(ctx).await?;
      }
    },
    Err(e) => {
      eprintln!("Error timing out user: {e}");
      ctx.reply(format!("Could not timeout the user:\n`{e}`")).await?;
    }
  }

  Ok(())
}

/// Revoke the mute from a member
#[poise::command(slash_command, guild_only, default_member_permissions = "MODERATE_MEMBERS")]
pub async fn unmute(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to remove timeout from"] mut member: Member,
  #[description = "The reason for the timeout removal"] reason: String
) -> Result<(), BotError> {
  match member.enable_communication(ctx.http()).await {
    Ok(_) => {
      ctx.reply(format!("Revoked {}'s timeout for `{reason}`", member.user.name)).await?;

      if !log_entry(
        ctx,
        generate_id(&ctx.data().postgres).await?,
        Target::Member(member),
        ActionType::Unmute,
        &reason,
        None
      )
      .await?
      {
        duplicate_case_notice(ctx).await?;
      }
    },
    Err(e) => {
      eprintln!("Error removing the timeout from user: {e}");
      ctx.reply(format!("Could not unmute the user:\n`{e}`")).await?;
    }
  };

  Ok(())
}

/// Manage the cases in the database
#[poise::command(slash_command, guild_only, subcommands("view"), default_member_permissions = "MANAGE_MESSAGES")]
pub async fn case(_: super::PoiseContext<'_>) -> Result<(), BotError> { Ok(()) }

async fn ac_cases(
  ctx: super::PoiseContext<'_>,
  partial: &str
) -> impl Iterator<Item = AutocompleteChoice> {
  let cases = Cases::get_cases(&ctx.data().postgres).await.unwrap_or_default();
  let p_low = partial.trim().trim_start_matches('#').to_lowercase();

  let mut filtered: Vec<_> = cases
    .into_iter()
    .filter(|c| {
      if p_low.is_empty() {
        true
      } else {
        c.case_id.to_string().starts_with(&p_low) || c.member_id.to_lowercase().starts_with(&p_low)
      }
    })
    .collect();

  filtered.sort_by(|a, b| b.case_id.cmp(&a.case_id));

  filtered
    .into_iter()
    .take(25)
    .map(|c| AutocompleteChoice::new(format!("#{} - {} ({})", c.case_id, c.case_type, c.member_name), c.case_id))
    .collect::<Vec<AutocompleteChoice>>()
    .into_iter()
}

/// View the case entry in the database
#[poise::command(slash_command)]
async fn view(
  ctx: super::PoiseContext<'_>,
  #[description = "Filter the search by Member ID or Case ID"]
  #[autocomplete = "ac_cases"]
  case_id: i32
) -> Result<(), BotError> {
  let db = ctx.data().postgres.clone();
  let case_data = Cases::load_data(&db, case_id).await?;

  fn mention_user(user_id: &str) -> String {
    let user_id = user_id.parse::<u64>().unwrap_or_default();
    format!("<@{user_id}>")
  }

  match case_data {
    Some(case) => {
      let mut fields = vec![
        (
          "User",
          format!("{}\n{}\n`{}`", case.member_name, mention_user(&case.member_id), case.member_id),
          true
        ),
        (
          "Moderator",
          format!(
            "{}\n{}\n`{}`",
            case.moderator_name,
            mention_user(&case.moderator_id),
            case.moderator_id
          ),
          true
        ),
        ("\u{200B}", "\u{200B}".to_string(), true),
        ("Reason", case.reason, true),
      ];

      if let Some(duration) = case.duration {
        fields.push(("Duration", format_duration(duration as u64), false));
      }

      if !case.active {
        fields.push(("Status", "Revoked".to_string(), false));
      }

      let embed = CreateEmbed::default()
        .color(BINARY_PROPERTIES.embed_colors.primary)
        .title(format!("{} | Case #{case_id}", case.case_type))
        .timestamp(Timestamp::from_unix_timestamp(case.timestamp).unwrap_or_else(|_| Timestamp::now()))
        .fields(fields);

      ctx.send(CreateReply::default().embed(embed)).await?;
    },
    None => {
      ctx.reply("Case not found in database").await?;
    }
  }

  Ok(())
}

/// Display server member statistics
#[poise::command(slash_command, guild_only, default_member_permissions = "MODERATE_MEMBERS")]
pub async fn members(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  let (name, total, humans, bots) = {
    let guild = match ctx.guild() {
      Some(g) => g,
      None => {
        return Ok(());
      }
    };

    let humans = guild.members.values().filter(|m| !m.user.bot).count();
    let bots = guild.members.len() - humans;
    (guild.name.clone(), guild.member_count, humans, bots)
  };

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title(format!("Members of {name}"))
    .fields(vec![
      ("Total Members", total.to_string(), true),
      ("Humans (cached)", humans.to_string(), true),
      ("Bots (cached)", bots.to_string(), true),
    ])
    .timestamp(Timestamp::now());

  ctx.send(CreateReply::default().embed(embed)).await?;

  Ok(())
}
