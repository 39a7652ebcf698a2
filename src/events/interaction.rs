use crate::{
  BotData,
  BotError,
  commands::{
    roles,
    tickets
  },
  controllers::sql::{
    TicketBlacklist,
    Tickets
  },
  internals::config::BINARY_PROPERTIES
};

use poise::serenity_prelude::{
  ActionRowComponent,
  ComponentInteraction,
  Context,
  CreateActionRow,
  CreateEmbed,
  CreateInputText,
  CreateInteractionResponse,
  CreateInteractionResponseMessage,
  CreateModal,
  InputTextStyle,
  Interaction,
  ModalInteraction,
  RoleId
};

pub async fn on_interaction_create(
  ctx: &Context,
  interaction: &Interaction,
  data: &BotData
) -> Result<(), BotError> {
  match interaction {
    Interaction::Component(component) => match component.data.custom_id.as_str() {
      "ticket_create" => on_ticket_button(ctx, component, data).await,
      id if id.starts_with("selfrole_") => on_self_role_button(ctx, component).await,
      _ => Ok(())
    },
    Interaction::Modal(modal) if modal.data.custom_id == "ticket_reason" => on_ticket_modal(ctx, modal, data).await,
    _ => Ok(())
  }
}

fn ephemeral_embed(embed: CreateEmbed) -> CreateInteractionResponse {
  CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed).ephemeral(true))
}

async fn on_ticket_button(
  ctx: &Context,
  component: &ComponentInteraction,
  data: &BotData
) -> Result<(), BotError> {
  if component.guild_id.is_none() {
    return Ok(());
  }

  if TicketBlacklist::contains(&data.postgres, component.user.id.get() as i64).await? {
    component
      .create_response(
        &ctx.http,
        ephemeral_embed(
          CreateEmbed::new()
            .color(BINARY_PROPERTIES.embed_colors.red)
            .title("Access Denied")
            .description("You have been blacklisted from creating tickets. Please contact a staff member if you believe this is an error.")
        )
      )
      .await?;
    return Ok(());
  }

  if let Some(existing) = Tickets::find_open_by_owner(&data.postgres, component.user.id.get() as i64).await? {
    component
      .create_response(
        &ctx.http,
        ephemeral_embed(
          CreateEmbed::new()
            .color(BINARY_PROPERTIES.embed_colors.yellow)
            .title("Ticket Already Exists")
            .description(format!("You already have an open ticket: <#{}>", existing.channel_id))
        )
      )
      .await?;
    return Ok(());
  }

  let modal = CreateModal::new("ticket_reason", "Create Support Ticket").components(vec![CreateActionRow::InputText(
    CreateInputText::new(InputTextStyle::Paragraph, "Reason for ticket", "reason")
      .placeholder("Please describe your issue or question.")
      .required(true)
      .max_length(500)
  )]);

  component.create_response(&ctx.http, CreateInteractionResponse::Modal(modal)).await?;

  Ok(())
}

async fn on_ticket_modal(
  ctx: &Context,
  modal: &ModalInteraction,
  data: &BotData
) -> Result<(), BotError> {
  let Some(guild_id) = modal.guild_id else {
    return Ok(());
  };

  // The blacklist could have changed between the button press and the
  // modal submit, so it gets checked twice
  if TicketBlacklist::contains(&data.postgres, modal.user.id.get() as i64).await? {
    modal
      .create_response(
        &ctx.http,
        ephemeral_embed(
          CreateEmbed::new()
            .color(BINARY_PROPERTIES.embed_colors.red)
            .title("Access Denied")
            .description("You have been blacklisted from creating tickets. Please contact a staff member if you believe this is an error.")
        )
      )
      .await?;
    return Ok(());
  }

  let reason = modal
    .data
    .components
    .iter()
    .flat_map(|row| row.components.iter())
    .find_map(|component| match component {
      ActionRowComponent::InputText(text) => text.value.clone(),
      _ => None
    })
    .unwrap_or_else(|| String::from("No reason provided"));

  match tickets::open_ticket(ctx, guild_id, &modal.user, &reason, data).await {
    Ok(channel_id) => {
      modal
        .create_response(
          &ctx.http,
          ephemeral_embed(
            CreateEmbed::new()
              .color(BINARY_PROPERTIES.embed_colors.green)
              .title("Ticket Created Successfully")
              .description(format!("Your ticket has been created: <#{channel_id}>"))
          )
        )
        .await?;
    },
    Err(e) => {
      eprintln!("Tickets[Error] Failed to open a ticket for {}: {e}", modal.user.name);
      modal
        .create_response(
          &ctx.http,
          ephemeral_embed(
            CreateEmbed::new()
              .color(BINARY_PROPERTIES.embed_colors.red)
              .title("Ticket Creation Failed")
              .description("Failed to create ticket. Please contact the Network Administrator.")
          )
        )
        .await?;
    }
  }

  Ok(())
}

async fn on_self_role_button(
  ctx: &Context,
  component: &ComponentInteraction
) -> Result<(), BotError> {
  let Some(guild_id) = component.guild_id else {
    return Ok(());
  };

  let role_id = component.data.custom_id.trim_start_matches("selfrole_").parse::<u64>().unwrap_or_default();
  if !roles::is_self_assignable(role_id) {
    return Ok(());
  }

  let Some(role) = guild_id.to_guild_cached(&ctx.cache).and_then(|g| g.roles.get(&RoleId::new(role_id)).cloned()) else {
    component
      .create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
          CreateInteractionResponseMessage::new()
            .content("Role not found! Please contact an administrator.")
            .ephemeral(true)
        )
      )
      .await?;
    return Ok(());
  };

  let member = guild_id.member(&ctx.http, component.user.id).await?;

  let embed = if member.roles.contains(&role.id) {
    member.remove_role(&ctx.http, role.id).await?;
    CreateEmbed::new()
      .color(BINARY_PROPERTIES.embed_colors.red)
      .title("Role Removed")
      .description(format!("The **{}** role has been removed from you.", role.name))
  } else {
    member.add_role(&ctx.http, role.id).await?;
    CreateEmbed::new()
      .color(BINARY_PROPERTIES.embed_colors.green)
      .title("Role Added")
      .description(format!("You have been given the **{}** role!", role.name))
  };

  component.create_response(&ctx.http, ephemeral_embed(embed)).await?;

  Ok(())
}
