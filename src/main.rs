mod commands;
mod controllers;
mod errors;
mod events;
mod internals;
mod shutdown;

use internals::{
  config::BINARY_PROPERTIES,
  invite_data::InviteCache,
  sessions::SessionBoard,
  utils::{
    discord_token,
    postgres_uri
  }
};

use {
  poise::serenity_prelude::{
    ClientBuilder,
    CreateAllowedMentions,
    GatewayIntents,
    GuildId,
    RoleId
  },
  std::time::Duration,
  tokio::sync::watch
};

pub type BotError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct BotData {
  pub postgres: sqlx::PgPool,
  pub invites:  InviteCache,
  pub sessions: SessionBoard,
  pub shutdown: watch::Sender<bool>
}

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  let postgres = {
    println!("Database[Info] Preparing to connect to database...");
    match sqlx::postgres::PgPoolOptions::new()
      .max_connections(20)
      .max_lifetime(Some(Duration::from_secs(600))) // 10 minutes
      .idle_timeout(Some(Duration::from_secs(360))) // 6 minutes
      .connect(&postgres_uri())
      .await
    {
      Ok(p) => {
        println!("Database[Info] Database connection established");
        p
      },
      Err(e) => {
        eprintln!("Database[Error] Database connection error: {e}");
        std::process::exit(1);
      }
    }
  };

  if let Err(e) = controllers::sql::execute_schemas(&postgres).await {
    eprintln!("Database[Error] Schema execution failed: {e}");
    std::process::exit(1);
  }

  let (shutdown_tx, _) = watch::channel(false);

  let bot_data = BotData {
    postgres,
    invites: InviteCache::new(),
    sessions: SessionBoard::new(),
    shutdown: shutdown_tx.clone()
  };

  let prefix = if cfg!(feature = "production") {
    Some(String::from("!"))
  } else {
    Some(String::from("."))
  };

  let commands = commands::collect!();
  let framework = poise::Framework::builder()
    .options(poise::FrameworkOptions {
      commands,
      pre_command: |ctx| {
        Box::pin(async move {
          let guild_name = match ctx.guild() {
            Some(guild) => guild.name.clone(),
            None => String::from("Unknown Guild")
          };

          println!("Discord[{guild_name}] {} ran /{}", ctx.author().name, ctx.command().qualified_name);
        })
      },
      prefix_options: poise::PrefixFrameworkOptions {
        prefix,
        mention_as_prefix: false,
        case_insensitive_commands: true,
        ignore_bots: true,
        ..Default::default()
      },
      on_error: |error| Box::pin(async move { errors::fw_errors(error).await }),
      event_handler: |ctx, event, framework, data| Box::pin(events::dispatch(ctx, event, framework, data)),
      allowed_mentions: Some(
        CreateAllowedMentions::new()
          .roles(vec![
            RoleId::new(BINARY_PROPERTIES.shifts.ping_role),
            RoleId::new(BINARY_PROPERTIES.trainings.ping_role),
            RoleId::new(BINARY_PROPERTIES.staff_role),
          ])
          .empty_users()
      ),
      initialize_owners: true,
      ..Default::default()
    })
    .setup(move |ctx, _ready, framework| {
      Box::pin(async move {
        poise::builtins::register_in_guild(ctx, &framework.options().commands, GuildId::new(BINARY_PROPERTIES.guild_id)).await?;
        Ok(bot_data)
      })
    })
    .build();

  let mut client = ClientBuilder::new(
    discord_token(),
    GatewayIntents::GUILDS
      | GatewayIntents::GUILD_INVITES
      | GatewayIntents::GUILD_MEMBERS
      | GatewayIntents::GUILD_MESSAGES
      | GatewayIntents::GUILD_MODERATION
      | GatewayIntents::MESSAGE_CONTENT
      | GatewayIntents::DIRECT_MESSAGES
  )
  .framework(framework)
  .await
  .expect("Error creating client");

  let exit_signal = tokio::spawn(async move { shutdown::gracefully_shutdown(shutdown_tx).await });

  tokio::select! {
    client_result = client.start() => {
      if let Err(why) = client_result {
        println!("Client error: {why:?}");
      }
    },
    shutdown = exit_signal => {
      if shutdown.unwrap() {
        std::process::exit(0);
      }
    }
  }
}
