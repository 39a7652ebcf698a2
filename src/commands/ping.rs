use crate::BotError;

use std::time::Instant;

/// Check latency between bot and Discord API
#[poise::command(slash_command)]
pub async fn ping(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  let started = Instant::now();
  ctx.http().get_current_user().await?;
  let rest = started.elapsed();

  let mut latencies = String::new();
  latencies.push_str(&format!("REST: `{}ms`\n", rest.as_millis()));
  latencies.push_str(&format!("WebSocket: `{:.0?}`", ctx.ping().await));

  ctx.reply(latencies).await?;

  Ok(())
}
