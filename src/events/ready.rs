use crate::{
  BotData,
  BotError,
  internals::{
    config::BINARY_PROPERTIES,
    invite_data::InviteSnapshot,
    tasks,
    utils::BOT_VERSION
  }
};

use {
  poise::serenity_prelude::{
    ActivityData,
    ChannelId,
    Context,
    CreateEmbed,
    CreateEmbedAuthor,
    CreateMessage,
    GuildId,
    Ready
  },
  serde::Deserialize,
  std::{
    fs,
    sync::{
      Arc,
      atomic::{
        AtomicBool,
        Ordering
      }
    },
    thread::current
  }
};

/// The static path to the TOML config file for bot's presence data
pub const TOML_FILE: &str = if cfg!(feature = "production") {
  "presence.toml"
} else {
  "src/internals/assets/presence.toml"
};

static READY_ONCE: AtomicBool = AtomicBool::new(false);

#[derive(Deserialize)]
pub struct Activity {
  pub name: String
}

#[derive(Deserialize)]
pub struct Presence {
  pub activities: Vec<Activity>
}

#[derive(Deserialize)]
pub struct TomlConfig {
  pub presence: Presence
}

fn read_config() -> TomlConfig {
  let content = fs::read_to_string(TOML_FILE).expect("[TomlConfig] Error loading config file");
  let config: TomlConfig = toml::from_str(&content).expect("[TomlConfig] Error parsing config file");
  config
}

/// Seeds the invite snapshot for the home guild. A failed fetch keeps
/// whatever snapshot was there before so a transient permission error
/// cannot wipe the diff state.
async fn prime_invite_cache(
  ctx: &Context,
  data: &BotData
) {
  let guild = GuildId::new(BINARY_PROPERTIES.guild_id);

  match guild.invites(&ctx.http).await {
    Ok(invites) => {
      let snapshots: Vec<InviteSnapshot> = invites.iter().map(InviteSnapshot::from).collect();
      data.invites.prime(guild, &snapshots);
      println!("InviteTracker[Info] Primed {} invites for guild {guild}", snapshots.len());
    },
    Err(e) => eprintln!("InviteTracker[Warn] Could not prime the invite cache, keeping the previous snapshot: {e}")
  }
}

async fn ready_once(
  ctx: &Context,
  ready: &Ready,
  data: &BotData
) -> Result<(), BotError> {
  #[cfg(not(feature = "production"))]
  {
    println!("Event[Ready:Notice] Detected a development environment!");
    let gateway = ctx.http.get_bot_gateway().await?;
    let session = gateway.session_start_limit;
    println!("Event[Ready:Notice] Session limit: {}/{}", session.remaining, session.total);
  }

  println!("Event[Ready] Build version: {}", *BOT_VERSION);
  println!("Event[Ready] Connected to API as {}", ready.user.name);

  prime_invite_cache(ctx, data).await;

  let ready_embed = CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.primary)
    .thumbnail(ready.user.avatar_url().unwrap_or_default())
    .author(CreateEmbedAuthor::new(format!("{} is ready!", ready.user.name)));

  ChannelId::new(BINARY_PROPERTIES.ready_notify)
    .send_message(&ctx.http, CreateMessage::new().add_embed(ready_embed))
    .await?;

  Ok(())
}

pub async fn on_ready(
  ctx: &Context,
  ready: &Ready,
  data: &BotData
) -> Result<(), BotError> {
  if !READY_ONCE.swap(true, Ordering::Relaxed) {
    ready_once(ctx, ready, data).await?;
  }

  let thread_id = format!("{:?}", current().id());
  let thread_num: String = thread_id.chars().filter(|c| c.is_ascii_digit()).collect();
  println!("Event[Ready] Task Scheduler launched on thread {thread_num}");

  let tconf = read_config();
  if let Some(activity) = tconf.presence.activities.first() {
    ctx.set_activity(Some(ActivityData::custom(activity.name.clone())));
  }

  tasks::run_task(Arc::new(ctx.clone()), data.clone(), tasks::groupwatch, tasks::groupwatch::TASK_NAME).await;

  Ok(())
}
