use {
  super::{
    super::{
      config::BINARY_PROPERTIES,
      milestones
    },
    task_err,
    task_info
  },
  crate::{
    BotData,
    BotError
  }
};

use {
  num_format::{
    Locale,
    ToFormattedString
  },
  poise::serenity_prelude::{
    ChannelId,
    Context,
    CreateEmbed,
    CreateEmbedFooter,
    CreateMessage,
    Timestamp
  },
  serde::Deserialize,
  std::sync::Arc,
  tokio::time::{
    Duration,
    interval
  }
};

pub static TASK_NAME: &str = "GroupWatch";

#[derive(Deserialize, Debug, Clone)]
pub struct GroupInfo {
  pub name:         String,
  #[serde(rename = "memberCount")]
  pub member_count: u64
}

fn fmt(n: u64) -> String { n.to_formatted_string(&Locale::en) }

async fn fetch_group(http: &reqwest::Client) -> Result<GroupInfo, BotError> {
  let url = format!("https://groups.roblox.com/v1/groups/{}", BINARY_PROPERTIES.group.group_id);
  let resp = http.get(&url).send().await?;

  if !resp.status().is_success() {
    return Err(format!("Roblox API returned HTTP {}", resp.status()).into());
  }

  let body = resp.text().await?;
  match serde_json::from_str::<GroupInfo>(&body) {
    Ok(info) => Ok(info),
    Err(e) => {
      task_err(TASK_NAME, &format!("[debug_dump] Malformed group payload: {body}"));
      Err(e.into())
    }
  }
}

fn milestone_embed(info: &GroupInfo) -> CreateEmbed {
  let next = milestones::next_milestone(info.member_count);
  let remaining = next - info.member_count;

  CreateEmbed::new()
    .color(BINARY_PROPERTIES.embed_colors.green)
    .title("Group Milestone!")
    .description(format!(
      "We've reached **{}** members! We are **{}** away from **{}**.",
      fmt(info.member_count),
      fmt(remaining),
      fmt(next)
    ))
    .fields(vec![
      ("Group", info.name.clone(), true),
      ("Current Members", fmt(info.member_count), true),
      ("Next Milestone", fmt(next), true),
    ])
    .thumbnail(format!(
      "https://thumbnails.roblox.com/v1/groups/icons?groupIds={}&size=150x150&format=Png&isCircular=false",
      BINARY_PROPERTIES.group.group_id
    ))
    .footer(CreateEmbedFooter::new("Almora Group Watch"))
    .timestamp(Timestamp::now())
}

fn routine_text(
  info: &GroupInfo,
  gained: u64
) -> String {
  let next = milestones::next_milestone(info.member_count);
  let remaining = next - info.member_count;

  if gained == 1 {
    format!(
      "We have reached **{}** members, only **{}** more until **{}**!",
      fmt(info.member_count),
      fmt(remaining),
      fmt(next)
    )
  } else {
    format!(
      "**{}** new members joined! We now have **{}** members, **{}** more until **{}**!",
      fmt(gained),
      fmt(info.member_count),
      fmt(remaining),
      fmt(next)
    )
  }
}

/// Polls the Roblox group for its member count and posts either a routine
/// join notice or a milestone celebration to the configured channel. One
/// cycle runs at a time; the HTTP client lives and dies with this task.
pub async fn groupwatch(
  ctx: Arc<Context>,
  data: BotData
) -> Result<(), BotError> {
  let http = reqwest::Client::builder().timeout(Duration::from_secs(15)).build()?;
  let mut stop = data.shutdown.subscribe();
  let mut int = interval(Duration::from_secs(BINARY_PROPERTIES.group.interval_secs));
  let channel = ChannelId::new(BINARY_PROPERTIES.group.channel);

  // Idle until the first successful fetch sets the baseline
  let mut baseline: Option<u64> = None;

  loop {
    tokio::select! {
      _ = int.tick() => (),
      _ = stop.changed() => {
        task_info(TASK_NAME, "Shutdown signal received, finishing up...");
        return Ok(());
      }
    }

    let info = match fetch_group(&http).await {
      Ok(info) => info,
      Err(e) => {
        task_err(TASK_NAME, &format!("Fetch failed, skipping this cycle: {e}"));
        continue;
      }
    };

    let old = match baseline {
      Some(count) => count,
      None => {
        task_info(TASK_NAME, &format!("Baseline set at {} members for \"{}\"", fmt(info.member_count), info.name));
        baseline = Some(info.member_count);
        continue;
      }
    };

    let new = info.member_count;
    baseline = Some(new);

    if new == old {
      continue;
    }

    if new < old {
      task_info(TASK_NAME, &format!("Member count decreased: {} -> {}", fmt(old), fmt(new)));
      continue;
    }

    let message = if milestones::crossed(old, new) {
      task_info(TASK_NAME, &format!("Milestone crossed: {} -> {}", fmt(old), fmt(new)));
      CreateMessage::new().embed(milestone_embed(&info))
    } else {
      CreateMessage::new().content(routine_text(&info, new - old))
    };

    if let Err(e) = channel.send_message(&ctx.http, message).await {
      task_err(TASK_NAME, &format!("Error sending the member update: {e}"));
    }
  }
}
