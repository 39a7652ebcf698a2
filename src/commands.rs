mod invites;
mod moderation;
mod ping;
pub(crate) mod roles;
mod say;
mod shifts;
pub(crate) mod tickets;
mod trainings;
mod uptime;

pub use {
  invites::invites,
  moderation::*,
  ping::ping,
  roles::rolepanel,
  say::say,
  shifts::shift,
  tickets::ticket,
  trainings::training,
  uptime::uptime
};

pub type PoiseContext<'a> = poise::Context<'a, crate::BotData, crate::BotError>;

macro_rules! collect {
  () => {
    vec![
      // moderation
      commands::ban(),
      commands::kick(),
      commands::unban(),
      commands::warn(),
      commands::unwarn(),
      commands::warnings(),
      commands::mute(),
      commands::unmute(),
      commands::case(),
      commands::members(),
      // community
      commands::ticket(),
      commands::shift(),
      commands::training(),
      commands::rolepanel(),
      commands::invites(),
      // unsorted mess
      commands::ping(),
      commands::say(),
      commands::uptime(),
    ]
  };
}
pub(crate) use collect;
