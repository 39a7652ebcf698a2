/// Round member counts worth a celebration, in ascending order. Past the
/// end of the list, every multiple of 10,000 counts (25,000 once the group
/// clears six digits).
pub const MILESTONES: [u64; 20] = [
  50, 100, 250, 500, 750, 1000, 1500, 2000, 2500, 3000, 4000, 5000, 7500, 10000, 15000, 20000, 25000, 50000, 75000, 100000
];

/// Smallest configured milestone strictly greater than the current count.
pub fn next_milestone(count: u64) -> u64 {
  for milestone in MILESTONES {
    if count < milestone {
      return milestone;
    }
  }

  if count < 100_000 {
    (count / 10_000 + 1) * 10_000
  } else {
    (count / 25_000 + 1) * 25_000
  }
}

/// Whether the jump from `old` to `new` clears at least one milestone the
/// old count had not reached yet. Crossing is half-open: old < m <= new.
/// On top of the fixed list, every 100 members counts below 1000 and every
/// 500 members counts from 1000 upwards.
pub fn crossed(
  old: u64,
  new: u64
) -> bool {
  if MILESTONES.iter().any(|&m| old < m && m <= new) {
    return true;
  }

  if new < 1000 && new / 100 > old / 100 {
    return true;
  }

  new >= 1000 && new / 500 > old / 500
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn crossing_a_listed_milestone_fires() {
    assert!(crossed(95, 100));
    assert!(crossed(1000, 1500)); // 1000 -> 1500 clears the 1500 entry
    assert!(crossed(49, 50));
  }

  #[test]
  fn small_jump_between_milestones_does_not_fire() {
    assert!(!crossed(101, 150));
    assert!(!crossed(1001, 1040));
  }

  #[test]
  fn every_hundred_counts_below_one_thousand() {
    assert!(crossed(395, 401));
    assert!(!crossed(401, 499));
  }

  #[test]
  fn every_five_hundred_counts_from_one_thousand() {
    assert!(crossed(5400, 5501));
    assert!(!crossed(5501, 5999));
  }

  #[test]
  fn crossing_is_half_open() {
    // old == milestone must not re-fire it
    assert!(!crossed(100, 101));
    // new == milestone does fire it
    assert!(crossed(99, 100));
  }

  #[test]
  fn next_milestone_walks_the_list_first() {
    assert_eq!(next_milestone(0), 50);
    assert_eq!(next_milestone(4999), 5000);
    assert_eq!(next_milestone(25000), 50000);
  }

  #[test]
  fn next_milestone_rounds_up_past_the_list() {
    assert_eq!(next_milestone(100050), 125000);
    assert_eq!(next_milestone(100000), 125000);
    assert_eq!(next_milestone(126000), 150000);
  }
}
