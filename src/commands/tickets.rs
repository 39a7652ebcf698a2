use crate::{
  BotData,
  BotError,
  controllers::sql::{
    TicketBlacklist,
    Tickets
  },
  internals::{
    config::BINARY_PROPERTIES,
    utils::is_staff
  }
};

use {
  poise::{
    CreateReply,
    serenity_prelude::{
      ButtonStyle,
      ChannelId,
      ChannelType,
      Context,
      CreateActionRow,
      CreateButton,
      CreateChannel,
      CreateEmbed,
      CreateEmbedFooter,
      CreateMessage,
      GuildId,
      Member,
      Mentionable,
      PermissionOverwrite,
      PermissionOverwriteType,
      Permissions,
      RoleId,
      Timestamp,
      User
    }
  },
  std::time::{
    Duration,
    SystemTime,
    UNIX_EPOCH
  },
  tokio::time::sleep
};

fn unix_now() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .expect("System time is lagging behind or is in the future")
    .as_secs() as i64
}

/// Creates the private channel for a new ticket, pings the support team in
/// it and stores the ticket row. Called from the panel's modal submit.
pub(crate) async fn open_ticket(
  ctx: &Context,
  guild_id: GuildId,
  owner: &User,
  reason: &str,
  data: &BotData
) -> Result<ChannelId, BotError> {
  let staff_role = RoleId::new(BINARY_PROPERTIES.staff_role);
  let overwrites = vec![
    PermissionOverwrite {
      allow: Permissions::empty(),
      deny:  Permissions::VIEW_CHANNEL,
      kind:  PermissionOverwriteType::Role(RoleId::new(guild_id.get())) // @everyone shares the guild's ID
    },
    PermissionOverwrite {
      allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::ATTACH_FILES | Permissions::EMBED_LINKS,
      deny:  Permissions::empty(),
      kind:  PermissionOverwriteType::Member(owner.id)
    },
    PermissionOverwrite {
      allow: Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::MANAGE_MESSAGES
        | Permissions::ATTACH_FILES
        | Permissions::EMBED_LINKS,
      deny:  Permissions::empty(),
      kind:  PermissionOverwriteType::Role(staff_role)
    },
  ];

  let channel = guild_id
    .create_channel(
      &ctx.http,
      CreateChannel::new(format!("ticket-{}", owner.name.to_lowercase()))
        .kind(ChannelType::Text)
        .category(ChannelId::new(BINARY_PROPERTIES.ticket.category))
        .permissions(overwrites)
    )
    .await?;

  let ticket = Tickets {
    channel_id: channel.id.get() as i64,
    owner_id: owner.id.get() as i64,
    owner_name: owner.name.clone(),
    reason: reason.to_string(),
    claimed_by: None,
    is_open: true,
    opened_at: unix_now()
  };
  ticket.create(&data.postgres).await?;

  // Ghost ping so the team gets a notification without leaving clutter
  let ping = channel
    .send_message(&ctx.http, CreateMessage::new().content(format!("{} - New ticket created!", staff_role.mention())))
    .await?;
  if let Err(e) = ping.delete(&ctx.http).await {
    eprintln!("Tickets[Warn] Could not delete the ping message: {e}");
  }

  channel
    .send_message(
      &ctx.http,
      CreateMessage::new().embed(
        CreateEmbed::new()
          .color(BINARY_PROPERTIES.embed_colors.primary)
          .title("Support Ticket")
          .description(format!(
            "**Created by:** {}\n**Reason:** {reason}\n\nA staff member will be with you shortly.",
            owner.mention()
          ))
      )
    )
    .await?;

  Ok(channel.id)
}

async fn require_staff(ctx: super::PoiseContext<'_>) -> Result<bool, BotError> {
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

async fn current_ticket(ctx: super::PoiseContext<'_>) -> Result<Option<Tickets>, BotError> {
  let ticket = Tickets::load_by_channel(&ctx.data().postgres, ctx.channel_id().get() as i64).await?;

  match ticket {
    Some(t) if t.is_open => Ok(Some(t)),
    _ => {
      ctx
        .send(
          CreateReply::default()
            .content("This command can only be used in ticket channels.")
            .ephemeral(true)
        )
        .await?;
      Ok(None)
    }
  }
}

/// Ticket management
#[poise::command(
  slash_command,
  guild_only,
  subcommands("panel", "close", "add", "remove", "claim", "blacklist", "patience")
)]
pub async fn ticket(_: super::PoiseContext<'_>) -> Result<(), BotError> { Ok(()) }

/// Deploy the ticket panel in this channel
#[poise::command(slash_command)]
async fn panel(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title("Almora Support")
    .description(
      "At Almora, we want to cater to all of our members by offering a wide variety of support. If you need to speak to a member of our \
       Support Team, please open a ticket below."
    )
    .field(
      "Before opening a ticket, be aware of these things;",
      [
        "- Abusing the system will result into being moderated.",
        "- Please allow 24-48 hours for our team to process your enquiry.",
        "- Failure to respond to the ticket after a certain time will result in closure."
      ]
      .join("\n"),
      false
    );

  ctx
    .channel_id()
    .send_message(
      ctx.http(),
      CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(vec![
          CreateButton::new("ticket_create").label("Create Ticket").style(ButtonStyle::Secondary),
        ])])
    )
    .await?;

  ctx.send(CreateReply::default().content("Panel deployed!").ephemeral(true)).await?;

  Ok(())
}

/// Close the current ticket
#[poise::command(slash_command)]
async fn close(
  ctx: super::PoiseContext<'_>,
  #[description = "The reason for closing the ticket"] reason: Option<String>
) -> Result<(), BotError> {
  let Some(ticket) = current_ticket(ctx).await? else {
    return Ok(());
  };

  let author_member = ctx.author_member().await.map(|m| m.into_owned());
  let is_owner = ticket.owner_id == ctx.author().id.get() as i64;
  if !is_owner && !author_member.as_ref().is_some_and(is_staff) {
    ctx
      .send(
        CreateReply::default()
          .content("You don't have permission to close this ticket.")
          .ephemeral(true)
      )
      .await?;
    return Ok(());
  }

  let close_reason = reason.unwrap_or_else(|| String::from("No reason provided"));

  ctx.reply("Closing ticket...").await?;
  Tickets::close(&ctx.data().postgres, ticket.channel_id).await?;

  let claimed_by = match ticket.claimed_by {
    Some(id) => format!("<@{id}>"),
    None => String::from("Unclaimed")
  };

  let log_embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.red)
    .title("Ticket Closed")
    .fields(vec![
      ("Ticket Owner", format!("<@{}>", ticket.owner_id), true),
      ("Closed By", ctx.author().mention().to_string(), true),
      ("Claimed By", claimed_by.clone(), true),
      ("Original Reason", ticket.reason.clone(), true),
      ("Close Reason", close_reason.clone(), true),
    ])
    .footer(CreateEmbedFooter::new(format!("Opened at: <t:{}>", ticket.opened_at)))
    .timestamp(Timestamp::now());

  if let Err(e) = ChannelId::new(BINARY_PROPERTIES.ticket.log_channel)
    .send_message(ctx.http(), CreateMessage::new().embed(log_embed))
    .await
  {
    eprintln!("Tickets[Warn] Could not log the closure: {e}");
  }

  // Best effort; the owner may have DMs disabled or already left
  if let Ok(owner) = ctx.http().get_user(poise::serenity_prelude::UserId::new(ticket.owner_id as u64)).await {
    let dm_embed = CreateEmbed::new()
      .color(BINARY_PROPERTIES.embed_colors.primary)
      .title("Your Ticket Has Been Closed")
      .fields(vec![
        ("Closed By", ctx.author().display_name().to_string(), true),
        ("Claimed By", claimed_by, true),
        ("Close Reason", close_reason.clone(), true),
      ])
      .timestamp(Timestamp::now());

    if let Err(e) = owner.direct_message(ctx.http(), CreateMessage::new().embed(dm_embed)).await {
      eprintln!("Tickets[Warn] Could not DM the ticket owner: {e}");
    }
  }

  sleep(Duration::from_secs(3)).await;
  ctx.channel_id().delete(ctx.http()).await?;

  Ok(())
}

/// Add a member to the current ticket
#[poise::command(slash_command)]
async fn add(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to add to this ticket"] member: Member
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }
  if current_ticket(ctx).await?.is_none() {
    return Ok(());
  }

  ctx
    .channel_id()
    .create_permission(
      ctx.http(),
      PermissionOverwrite {
        allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::ATTACH_FILES | Permissions::EMBED_LINKS,
        deny:  Permissions::empty(),
        kind:  PermissionOverwriteType::Member(member.user.id)
      }
    )
    .await?;

  ctx.reply(format!("{} has been added to this ticket.", member.mention())).await?;

  Ok(())
}

/// Remove a member from the current ticket
#[poise::command(slash_command)]
async fn remove(
  ctx: super::PoiseContext<'_>,
  #[description = "The member to remove from this ticket"] member: Member
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }
  let Some(ticket) = current_ticket(ctx).await? else {
    return Ok(());
  };

  if ticket.owner_id == member.user.id.get() as i64 {
    ctx.reply("The ticket owner cannot be removed from their own ticket.").await?;
    return Ok(());
  }

  ctx
    .channel_id()
    .delete_permission(ctx.http(), PermissionOverwriteType::Member(member.user.id))
    .await?;

  ctx.reply(format!("{} has been removed from this ticket.", member.mention())).await?;

  Ok(())
}

/// Claim the current ticket
#[poise::command(slash_command)]
async fn claim(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }
  let Some(ticket) = current_ticket(ctx).await? else {
    return Ok(());
  };

  if let Some(id) = ticket.claimed_by {
    ctx.reply(format!("This ticket is already claimed by <@{id}>.")).await?;
    return Ok(());
  }

  Tickets::claim(&ctx.data().postgres, ticket.channel_id, ctx.author().id.get() as i64).await?;
  ctx.reply(format!("{} will be handling this ticket!", ctx.author().mention())).await?;

  Ok(())
}

/// Toggle a user on the ticket blacklist
#[poise::command(slash_command)]
async fn blacklist(
  ctx: super::PoiseContext<'_>,
  #[description = "The user to toggle on the blacklist"] user: User
) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  let db = ctx.data().postgres.clone();

  if TicketBlacklist::remove(&db, user.id.get() as i64).await? {
    ctx.reply(format!("{} has been removed from the ticket blacklist.", user.name)).await?;
  } else {
    let entry = TicketBlacklist {
      user_id:  user.id.get() as i64,
      added_by: ctx.author().id.get() as i64,
      timestamp: unix_now()
    };
    entry.add(&db).await?;
    ctx.reply(format!("{} has been added to the ticket blacklist.", user.name)).await?;
  }

  Ok(())
}

/// Broadcast a patience notice to every open ticket
#[poise::command(slash_command)]
async fn patience(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  if !require_staff(ctx).await? {
    return Ok(());
  }

  ctx.defer_ephemeral().await?;

  let open_tickets = Tickets::get_open(&ctx.data().postgres).await?;
  if open_tickets.is_empty() {
    ctx.reply("No open tickets found.").await?;
    return Ok(());
  }

  let embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .title("Please be patient")
    .description(
      "We're currently experiencing high ticket volume. Please be patient while we get to your ticket. We will respond as soon as possible."
    );

  let mut sent = 0;
  for ticket in &open_tickets {
    match ChannelId::new(ticket.channel_id as u64)
      .send_message(ctx.http(), CreateMessage::new().embed(embed.clone()))
      .await
    {
      Ok(_) => sent += 1,
      Err(e) => eprintln!("Tickets[Warn] Could not reach ticket channel {}: {e}", ticket.channel_id)
    }
  }

  ctx.reply(format!("Patience message sent to {sent} ticket channels.")).await?;

  Ok(())
}
