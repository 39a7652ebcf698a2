use std::sync::LazyLock;

pub struct ConfigMeta {
  pub guild_id:        u64,
  pub embed_colors:    EmbedColorPalette,
  pub ready_notify:    u64,
  pub staff_role:      u64,
  pub mod_log:         u64,
  pub invite_channel:  u64,
  pub ticket:          TicketMeta,
  pub shifts:          SessionMeta,
  pub trainings:       SessionMeta,
  pub group:           GroupWatchMeta,
  pub self_roles:      SelfRoleIds,
  pub game_url:        &'static str,
  pub developers:      Vec<u64>
}

pub struct TicketMeta {
  pub category:    u64,
  pub log_channel: u64
}

pub struct SessionMeta {
  pub channel:   u64,
  pub ping_role: u64
}

pub struct GroupWatchMeta {
  pub group_id:      u64,
  pub channel:       u64,
  pub interval_secs: u64
}

pub struct SelfRoleIds {
  pub shifts_ping:     u64,
  pub engagement_ping: u64,
  pub bored_ping:      u64,
  pub he_him:          u64,
  pub she_her:         u64,
  pub they_them:       u64,
  pub ask_me:          u64
}

pub struct EmbedColorPalette {
  pub primary: u32,
  pub red:     u32,
  pub green:   u32,
  pub yellow:  u32
}

#[cfg(feature = "production")]
pub static BINARY_PROPERTIES: LazyLock<ConfigMeta> = LazyLock::new(ConfigMeta::new);

#[cfg(not(feature = "production"))]
pub static BINARY_PROPERTIES: LazyLock<ConfigMeta> = LazyLock::new(|| {
  ConfigMeta::new()
    .guild_id(1301667213131907166) // Almora Dev Hideout
    .ready_notify(1301667213131907170) // #bot-sandbox
    .mod_log(1301667213131907170) // #bot-sandbox
    .invite_channel(1301667213131907170) // #bot-sandbox
    .ticket_category(1301667214031585321)
    .ticket_log(1301667213131907170) // #bot-sandbox
    .shift_channel(1301667213131907170) // #bot-sandbox
    .training_channel(1301667213131907170) // #bot-sandbox
    .group_channel(1301667213131907170) // #bot-sandbox
    .group_interval(120) // Poll less often outside production
});

impl ConfigMeta {
  fn new() -> Self {
    Self {
      guild_id:        1393267567925137470, // Almora
      embed_colors:    EmbedColorPalette {
        primary: 0xFFFFFF,
        red:     0xE62C3B,
        green:   0x57F287,
        yellow:  0xFFEA00
      },
      ready_notify:    1393317286248448200, // #bot-log
      staff_role:      1393356311523131412, // Support Team
      mod_log:         1393317286248448204, // #moderation-log
      invite_channel:  1393317286248448206, // #invite-feed
      ticket:          TicketMeta {
        category:    1393317285943218176, // Support Tickets
        log_channel: 1393317286248448208  // #ticket-log
      },
      shifts:          SessionMeta {
        channel:   1393317286248448210,   // #shift-announcements
        ping_role: 1393356313173692518    // Shifts Ping
      },
      trainings:       SessionMeta {
        channel:   1393317286248448212,   // #training-announcements
        ping_role: 1393356313173692518    // Shifts Ping
      },
      group:           GroupWatchMeta {
        group_id:      35476304,
        channel:       1393317286248448214, // #group-milestones
        interval_secs: 60
      },
      self_roles:      SelfRoleIds {
        shifts_ping:     1393356313173692518,
        engagement_ping: 1393356313869942914,
        bored_ping:      1393356314448498759,
        he_him:          1393356315245674586,
        she_her:         1393356315593801729,
        they_them:       1393356316617085018,
        ask_me:          1393546048118722602
      },
      game_url:        "https://www.roblox.com/games/75586247932175",
      developers:      vec![
        790869950076157983, // network admin
      ]
    }
  }

  // Scalable functions below;
  #[cfg(not(feature = "production"))]
  fn guild_id(
    mut self,
    guild_id: u64
  ) -> Self {
    self.guild_id = guild_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn ready_notify(
    mut self,
    channel_id: u64
  ) -> Self {
    self.ready_notify = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn mod_log(
    mut self,
    channel_id: u64
  ) -> Self {
    self.mod_log = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn invite_channel(
    mut self,
    channel_id: u64
  ) -> Self {
    self.invite_channel = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn ticket_category(
    mut self,
    category_id: u64
  ) -> Self {
    self.ticket.category = category_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn ticket_log(
    mut self,
    channel_id: u64
  ) -> Self {
    self.ticket.log_channel = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn shift_channel(
    mut self,
    channel_id: u64
  ) -> Self {
    self.shifts.channel = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn training_channel(
    mut self,
    channel_id: u64
  ) -> Self {
    self.trainings.channel = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn group_channel(
    mut self,
    channel_id: u64
  ) -> Self {
    self.group.channel = channel_id;
    self
  }

  #[cfg(not(feature = "production"))]
  fn group_interval(
    mut self,
    secs: u64
  ) -> Self {
    self.group.interval_secs = secs;
    self
  }
}
