use crate::{
  BotError,
  internals::utils::{
    BOT_VERSION,
    format_duration
  }
};

use sysinfo::System;

/// Check bot's uptime and host statistics
#[poise::command(slash_command)]
pub async fn uptime(ctx: super::PoiseContext<'_>) -> Result<(), BotError> {
  let mut sys = System::new_all();
  sys.refresh_all();

  let sys_uptime = match uptime_lib::get() {
    Ok(uptime) => format_duration(uptime.as_secs()),
    Err(e) => {
      eprintln!("Uptime[Error] Failed to retrieve the system uptime: {e}");
      String::from("Unavailable")
    }
  };

  let gb = 1024.0 * 1024.0 * 1024.0;
  let memory = format!("{:.2}/{:.2} GB", sys.used_memory() as f64 / gb, sys.total_memory() as f64 / gb);

  let stat_msg = [
    format!("**Version**: {}", *BOT_VERSION),
    format!("**System Uptime**: `{sys_uptime}`"),
    format!("**Host Memory**: `{memory}`"),
  ];
  ctx.reply(stat_msg.join("\n")).await?;

  Ok(())
}
