use {
  dashmap::DashMap,
  poise::serenity_prelude::{
    GuildId,
    RichInvite,
    UserId
  },
  std::{
    collections::HashMap,
    sync::Arc
  }
};

/// Plain snapshot of one invite as fetched from the API, detached from
/// the client library's model types so the diff logic stays testable.
#[derive(Clone)]
pub struct InviteSnapshot {
  pub code:    String,
  pub uses:    u64,
  pub inviter: Option<UserId>
}

impl From<&RichInvite> for InviteSnapshot {
  fn from(invite: &RichInvite) -> Self {
    Self {
      code:    invite.code.clone(),
      uses:    invite.uses,
      inviter: invite.inviter.as_ref().map(|u| u.id)
    }
  }
}

/// Outcome of a join diff.
pub enum Attribution {
  Invited {
    inviter: UserId,
    code:    String,
    total:   u64
  },
  Unknown
}

#[derive(Default)]
struct GuildInvites {
  uses:       HashMap<String, u64>,
  inviters:   HashMap<String, UserId>,
  attributed: HashMap<UserId, u64>
}

#[derive(Clone)]
pub struct InviteCache(Arc<DashMap<GuildId, GuildInvites>>);

impl InviteCache {
  pub fn new() -> Self { Self(Arc::new(DashMap::new())) }

  /// Overwrites the guild's snapshot in one shot so the code->uses and
  /// code->inviter maps can never disagree with each other. Only call this
  /// with a successfully fetched invite list; a failed fetch must leave the
  /// previous snapshot untouched.
  pub fn prime(
    &self,
    guild: GuildId,
    invites: &[InviteSnapshot]
  ) {
    let mut fresh = GuildInvites::default();

    for invite in invites {
      fresh.uses.insert(invite.code.clone(), invite.uses);
      if let Some(user) = invite.inviter {
        fresh.inviters.insert(invite.code.clone(), user);
        *fresh.attributed.entry(user).or_default() += invite.uses;
      }
    }

    self.0.insert(guild, fresh);
  }

  /// Records a single newly created invite without disturbing the rest of
  /// the snapshot.
  pub fn track(
    &self,
    guild: GuildId,
    invite: &InviteSnapshot
  ) {
    let mut entry = self.0.entry(guild).or_default();
    entry.uses.insert(invite.code.clone(), invite.uses);
    if let Some(user) = invite.inviter {
      entry.inviters.insert(invite.code.clone(), user);
    }
  }

  pub fn forget(
    &self,
    guild: GuildId,
    code: &str
  ) {
    if let Some(mut entry) = self.0.get_mut(&guild) {
      entry.uses.remove(code);
      entry.inviters.remove(code);
    }
  }

  /// Diffs the freshly fetched invite list against the snapshot to work out
  /// which invite just got consumed. Candidates are walked in ascending
  /// invite-code order, which makes the tie-break between simultaneously
  /// increased codes stable across runs. The winning inviter's running
  /// total goes up by exactly 1; every increased code has its cached use
  /// count bumped so the same join cannot be attributed twice.
  pub fn attribute(
    &self,
    guild: GuildId,
    current: &[InviteSnapshot]
  ) -> Attribution {
    let mut entry = self.0.entry(guild).or_default();

    let mut sorted: Vec<&InviteSnapshot> = current.iter().collect();
    sorted.sort_by(|a, b| a.code.cmp(&b.code));

    let mut winner: Option<(UserId, String)> = None;
    for invite in sorted {
      let cached = entry.uses.get(&invite.code).copied().unwrap_or(0);
      if invite.uses <= cached {
        continue;
      }

      entry.uses.insert(invite.code.clone(), invite.uses);

      if winner.is_none() {
        // Fall back to the live inviter for codes created after the last
        // prime; vanity URLs carry no inviter at all and stay unresolved.
        let inviter = entry.inviters.get(&invite.code).copied().or(invite.inviter);
        if let Some(user) = inviter {
          winner = Some((user, invite.code.clone()));
        }
      }
    }

    match winner {
      Some((user, code)) => {
        let total = {
          let count = entry.attributed.entry(user).or_default();
          *count += 1;
          *count
        };

        Attribution::Invited {
          inviter: user,
          code,
          total
        }
      },
      None => Attribution::Unknown
    }
  }

  pub fn invite_count(
    &self,
    guild: GuildId,
    user: UserId
  ) -> u64 {
    self
      .0
      .get(&guild)
      .and_then(|entry| entry.attributed.get(&user).copied())
      .unwrap_or(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const GUILD: GuildId = GuildId::new(1301667213131907166);

  fn snapshot(
    code: &str,
    uses: u64,
    inviter: Option<u64>
  ) -> InviteSnapshot {
    InviteSnapshot {
      code: code.to_string(),
      uses,
      inviter: inviter.map(UserId::new)
    }
  }

  #[test]
  fn attributes_the_single_increased_invite() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[snapshot("aaa", 3, Some(11)), snapshot("bbb", 5, Some(22))]);

    let result = cache.attribute(GUILD, &[snapshot("aaa", 3, Some(11)), snapshot("bbb", 6, Some(22))]);
    match result {
      Attribution::Invited { inviter, code, total } => {
        assert_eq!(inviter, UserId::new(22));
        assert_eq!(code, "bbb");
        assert_eq!(total, 6); // 5 seeded at prime time + this join
      },
      Attribution::Unknown => panic!("expected an attribution")
    }
  }

  #[test]
  fn aggregate_count_goes_up_by_exactly_one() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[snapshot("aaa", 0, Some(11))]);

    cache.attribute(GUILD, &[snapshot("aaa", 1, Some(11))]);
    assert_eq!(cache.invite_count(GUILD, UserId::new(11)), 1);

    cache.attribute(GUILD, &[snapshot("aaa", 2, Some(11))]);
    assert_eq!(cache.invite_count(GUILD, UserId::new(11)), 2);
  }

  #[test]
  fn tie_break_is_ascending_code_order() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[snapshot("zzz", 1, Some(11)), snapshot("abc", 1, Some(22))]);

    // Both counts went up in the same diff window; "abc" must win every time
    let result = cache.attribute(GUILD, &[snapshot("zzz", 2, Some(11)), snapshot("abc", 2, Some(22))]);
    match result {
      Attribution::Invited { inviter, code, .. } => {
        assert_eq!(inviter, UserId::new(22));
        assert_eq!(code, "abc");
      },
      Attribution::Unknown => panic!("expected an attribution")
    }

    // Both bumps were absorbed, so the next diff sees no increase at all
    assert!(matches!(
      cache.attribute(GUILD, &[snapshot("zzz", 2, Some(11)), snapshot("abc", 2, Some(22))]),
      Attribution::Unknown
    ));
  }

  #[test]
  fn no_increase_means_unknown() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[snapshot("aaa", 4, Some(11))]);

    assert!(matches!(cache.attribute(GUILD, &[snapshot("aaa", 4, Some(11))]), Attribution::Unknown));
  }

  #[test]
  fn increased_code_without_inviter_stays_unknown_but_absorbs_the_use() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[snapshot("vanity", 9, None)]);

    assert!(matches!(cache.attribute(GUILD, &[snapshot("vanity", 10, None)]), Attribution::Unknown));
    // The bump was still recorded, so it cannot leak into the next join
    assert!(matches!(cache.attribute(GUILD, &[snapshot("vanity", 10, None)]), Attribution::Unknown));
  }

  #[test]
  fn reprime_overwrites_instead_of_accumulating() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[snapshot("aaa", 3, Some(11))]);
    cache.prime(GUILD, &[snapshot("aaa", 3, Some(11))]);

    assert_eq!(cache.invite_count(GUILD, UserId::new(11)), 3);
  }

  #[test]
  fn untracked_code_falls_back_to_the_live_inviter() {
    let cache = InviteCache::new();
    cache.prime(GUILD, &[]);

    let result = cache.attribute(GUILD, &[snapshot("new", 1, Some(33))]);
    match result {
      Attribution::Invited { inviter, .. } => assert_eq!(inviter, UserId::new(33)),
      Attribution::Unknown => panic!("expected the live inviter to be used")
    }
  }
}
