use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

/// Rounded completion percentage,
/// half-up. Zero when `total` is zero.
pub fn percent(
  completed: usize,
  total: usize
) -> u8 {
  if total == 0 {
    return 0;
  }
  let completed =
    completed.min(total) as u64;
  let total = total as u64;
  ((200 * completed + total)
    / (2 * total)) as u8
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "kebab-case")]
pub enum ChecklistStatus {
  NotStarted,
  InProgress,
  Completed
}

impl ChecklistStatus {
  pub fn from_progress(
    progress: u8
  ) -> Self {
    match progress {
      0 => Self::NotStarted,
      p if p >= 100 => Self::Completed,
      _ => Self::InProgress
    }
  }

  pub fn label(
    self
  ) -> &'static str {
    match self {
      Self::NotStarted => "Not Started",
      Self::InProgress => "In Progress",
      Self::Completed => "Completed"
    }
  }
}

impl fmt::Display for ChecklistStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// `completed/total` pair with its
/// rounded percentage.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  PartialEq,
  Eq,
)]
pub struct Tally {
  pub completed: usize,
  pub total:     usize,
  pub percent:   u8
}

impl Tally {
  pub fn new(
    completed: usize,
    total: usize
  ) -> Self {
    Self {
      completed,
      total,
      percent: percent(
        completed, total
      )
    }
  }

  pub fn from_flags<I>(
    flags: I
  ) -> Self
  where
    I: IntoIterator<Item = bool>
  {
    let (completed, total) = flags
      .into_iter()
      .fold((0, 0), |(done, all), f| {
        (done + usize::from(f), all + 1)
      });
    Self::new(completed, total)
  }
}

impl fmt::Display for Tally {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{}/{} ({}%)",
      self.completed,
      self.total,
      self.percent
    )
  }
}

#[cfg(test)]
mod tests {
  use super::{
    ChecklistStatus,
    Tally,
    percent
  };

  #[test]
  fn empty_collection_is_zero() {
    assert_eq!(percent(0, 0), 0);
    assert_eq!(
      ChecklistStatus::from_progress(
        percent(0, 0)
      ),
      ChecklistStatus::NotStarted
    );
  }

  #[test]
  fn rounds_half_up() {
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(1, 8), 13);
    assert_eq!(percent(3, 8), 38);
    assert_eq!(percent(1, 200), 1);
    assert_eq!(percent(3, 6), 50);
    assert_eq!(percent(4, 4), 100);
  }

  #[test]
  fn status_follows_three_way_rule() {
    assert_eq!(
      ChecklistStatus::from_progress(0),
      ChecklistStatus::NotStarted
    );
    assert_eq!(
      ChecklistStatus::from_progress(1),
      ChecklistStatus::InProgress
    );
    assert_eq!(
      ChecklistStatus::from_progress(
        99
      ),
      ChecklistStatus::InProgress
    );
    assert_eq!(
      ChecklistStatus::from_progress(
        100
      ),
      ChecklistStatus::Completed
    );
  }

  #[test]
  fn near_complete_rounds_to_hundred() {
    // status is keyed on the rounded
    // value, not on every item being set
    assert_eq!(percent(199, 200), 100);
    assert_eq!(
      ChecklistStatus::from_progress(
        percent(199, 200)
      ),
      ChecklistStatus::Completed
    );
  }

  #[test]
  fn tally_counts_flags() {
    let tally = Tally::from_flags([
      true, false, true, false
    ]);
    assert_eq!(tally.completed, 2);
    assert_eq!(tally.total, 4);
    assert_eq!(tally.percent, 50);
    assert_eq!(
      tally.to_string(),
      "2/4 (50%)"
    );
  }
}
