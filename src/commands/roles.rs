use crate::{
  BotError,
  internals::config::BINARY_PROPERTIES
};

use poise::{
  CreateReply,
  serenity_prelude::{
    ButtonStyle,
    CreateActionRow,
    CreateButton,
    CreateEmbed,
    CreateMessage
  }
};

#[derive(Clone, Copy)]
pub(crate) struct SelfRole {
  pub name:  &'static str,
  pub role:  u64,
  pub blurb: &'static str
}

pub(crate) fn general_roles() -> [SelfRole; 3] {
  let ids = &BINARY_PROPERTIES.self_roles;
  [
    SelfRole {
      name:  "Shifts Ping",
      role:  ids.shifts_ping,
      blurb: "Get pinged for shifts"
    },
    SelfRole {
      name:  "Engagement Ping",
      role:  ids.engagement_ping,
      blurb: "Get pinged for engagement activities"
    },
    SelfRole {
      name:  "Bored Ping",
      role:  ids.bored_ping,
      blurb: "Get pinged when people are bored"
    },
  ]
}

pub(crate) fn pronoun_roles() -> [SelfRole; 4] {
  let ids = &BINARY_PROPERTIES.self_roles;
  [
    SelfRole {
      name:  "He/Him",
      role:  ids.he_him,
      blurb: "He/Him pronouns"
    },
    SelfRole {
      name:  "She/Her",
      role:  ids.she_her,
      blurb: "She/Her pronouns"
    },
    SelfRole {
      name:  "They/Them",
      role:  ids.they_them,
      blurb: "They/Them pronouns"
    },
    SelfRole {
      name:  "Ask Me",
      role:  ids.ask_me,
      blurb: "Ask about pronouns"
    },
  ]
}

/// Guards the button handler against handing out arbitrary roles; only
/// roles that appear on a panel may be toggled.
pub(crate) fn is_self_assignable(role_id: u64) -> bool {
  general_roles().iter().chain(pronoun_roles().iter()).any(|r| r.role == role_id)
}

#[derive(poise::ChoiceParameter)]
enum PanelKind {
  #[name = "General"]
  General,
  #[name = "Pronouns"]
  Pronouns
}

/// Deploy a self-service role panel in this channel
#[poise::command(slash_command, guild_only, default_member_permissions = "MANAGE_ROLES")]
pub async fn rolepanel(
  ctx: super::PoiseContext<'_>,
  #[description = "Which panel to deploy"] panel: PanelKind
) -> Result<(), BotError> {
  let (title, roles) = match panel {
    PanelKind::General => ("Notification Roles", general_roles().to_vec()),
    PanelKind::Pronouns => ("Pronoun Roles", pronoun_roles().to_vec())
  };

  let description = roles
    .iter()
    .map(|r| format!("**{}** - {}", r.name, r.blurb))
    .collect::<Vec<String>>()
    .join("\n");

  let buttons = roles
    .iter()
    .map(|r| CreateButton::new(format!("selfrole_{}", r.role)).label(r.name).style(ButtonStyle::Secondary))
    .collect();

  ctx
    .channel_id()
    .send_message(
      ctx.http(),
      CreateMessage::new()
        .embed(
          CreateEmbed::new()
            .color(BINARY_PROPERTIES.embed_colors.primary)
            .title(title)
            .description(format!("Use the buttons below to toggle a role on yourself.\n\n{description}"))
        )
        .components(vec![CreateActionRow::Buttons(buttons)])
    )
    .await?;

  ctx.send(CreateReply::default().content("Panel deployed!").ephemeral(true)).await?;

  Ok(())
}
