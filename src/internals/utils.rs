use {
  poise::serenity_prelude::{
    Member,
    RoleId,
    UserId
  },
  std::{
    env,
    str::FromStr,
    sync::LazyLock
  }
};

pub static BOT_VERSION: LazyLock<String> = LazyLock::new(|| {
  let cargo_version = cargo_toml::Manifest::from_str(include_str!("../../Cargo.toml"))
    .unwrap()
    .package
    .unwrap()
    .version
    .unwrap();
  format!("v{cargo_version}")
});

pub fn discord_token() -> String { env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN is not set in the environment") }

pub fn postgres_uri() -> String { env::var("DATABASE_URL").expect("DATABASE_URL is not set in the environment") }

pub fn format_timestamp(timestamp: i64) -> String { format!("<t:{timestamp}>\n<t:{timestamp}:R>") }

pub fn is_staff(member: &Member) -> bool {
  member.roles.contains(&RoleId::new(super::config::BINARY_PROPERTIES.staff_role))
}

pub fn mention_dev(ctx: poise::Context<'_, crate::BotData, crate::BotError>) -> Option<String> {
  let devs = super::config::BINARY_PROPERTIES.developers.clone();
  let app_owners = ctx.framework().options().owners.clone();

  let mut mentions = Vec::new();

  for dev in devs {
    if app_owners.contains(&UserId::new(dev)) {
      mentions.push(format!("<@{dev}>"));
    }
  }

  if mentions.is_empty() { None } else { Some(mentions.join(", ")) }
}

pub fn format_duration(secs: u64) -> String {
  let days = secs / 86400;
  let hours = (secs % 86400) / 3600;
  let minutes = (secs % 3600) / 60;
  let seconds = secs % 60;

  let components = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")];

  let formatted_string: Vec<String> = components
    .iter()
    .filter(|&&(value, _)| value > 0)
    .map(|&(value, suffix)| format!("{value}{suffix}"))
    .collect();

  formatted_string.join(", ")
}

#[cfg(test)]
mod tests {
  use super::format_duration;

  #[test]
  fn compound_durations_keep_only_nonzero_parts() {
    assert_eq!(format_duration(93900), "1d, 2h, 5m");
    assert_eq!(format_duration(61), "1m, 1s");
    assert_eq!(format_duration(3600), "1h");
  }
}
