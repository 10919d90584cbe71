use std::sync::Arc;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  trace
};

use crate::progress::{
  ChecklistStatus,
  percent
};

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ChecklistItem {
  pub id:        u64,
  pub text:      String,
  #[serde(default)]
  pub completed: bool
}

impl ChecklistItem {
  pub fn new(
    id: u64,
    text: impl Into<String>,
    completed: bool
  ) -> Self {
    Self {
      id,
      text: text.into(),
      completed
    }
  }
}

/// Checklist with `progress` and
/// `status` derived from its items.
///
/// The derived fields are private and
/// recomputed whenever the items
/// change. Deserializing goes through
/// [`ChecklistRecord`], so any stored
/// progress is discarded.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(from = "ChecklistRecord")]
pub struct Checklist {
  id:       u64,
  title:    String,
  aircraft: String,
  items:    Vec<ChecklistItem>,
  progress: u8,
  status:   ChecklistStatus
}

#[derive(Debug, Deserialize)]
struct ChecklistRecord {
  id:       u64,
  title:    String,
  #[serde(default)]
  aircraft: String,
  #[serde(default)]
  items:    Vec<ChecklistItem>
}

impl From<ChecklistRecord> for Checklist {
  fn from(
    record: ChecklistRecord
  ) -> Self {
    Checklist::new(
      record.id,
      record.title,
      record.aircraft,
      record.items
    )
  }
}

impl Checklist {
  pub fn new(
    id: u64,
    title: impl Into<String>,
    aircraft: impl Into<String>,
    items: Vec<ChecklistItem>
  ) -> Self {
    let mut checklist = Self {
      id,
      title: title.into(),
      aircraft: aircraft.into(),
      items,
      progress: 0,
      status: ChecklistStatus::NotStarted
    };
    checklist.recompute();
    checklist
  }

  pub fn id(&self) -> u64 {
    self.id
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn aircraft(&self) -> &str {
    &self.aircraft
  }

  pub fn items(
    &self
  ) -> &[ChecklistItem] {
    &self.items
  }

  pub fn item(
    &self,
    item_id: u64
  ) -> Option<&ChecklistItem> {
    self
      .items
      .iter()
      .find(|item| item.id == item_id)
  }

  pub fn progress(&self) -> u8 {
    self.progress
  }

  pub fn status(
    &self
  ) -> ChecklistStatus {
    self.status
  }

  pub fn completed_count(
    &self
  ) -> usize {
    self
      .items
      .iter()
      .filter(|item| item.completed)
      .count()
  }

  /// Flips one item. Returns `false`
  /// when no item has `item_id`.
  fn toggle(
    &mut self,
    item_id: u64
  ) -> bool {
    let Some(item) = self
      .items
      .iter_mut()
      .find(|item| item.id == item_id)
    else {
      return false;
    };
    item.completed = !item.completed;
    self.recompute();
    true
  }

  fn recompute(&mut self) {
    self.progress = percent(
      self.completed_count(),
      self.items.len()
    );
    self.status =
      ChecklistStatus::from_progress(
        self.progress
      );
    trace!(
      checklist = self.id,
      progress = self.progress,
      status = %self.status,
      "recomputed checklist progress"
    );
  }
}

/// Owner of every checklist.
///
/// The collection sits behind an
/// `Arc`; snapshots handed out stay
/// valid and unchanged while the board
/// moves on to a new collection.
#[derive(Debug, Clone, Default)]
pub struct ChecklistBoard {
  checklists: Arc<Vec<Checklist>>
}

impl ChecklistBoard {
  pub fn new(
    checklists: Vec<Checklist>
  ) -> Self {
    Self {
      checklists: Arc::new(checklists)
    }
  }

  pub fn snapshot(
    &self
  ) -> Arc<Vec<Checklist>> {
    Arc::clone(&self.checklists)
  }

  pub fn get(
    &self,
    checklist_id: u64
  ) -> Option<&Checklist> {
    self
      .checklists
      .iter()
      .find(|c| c.id == checklist_id)
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &Checklist>
  {
    self.checklists.iter()
  }

  pub fn len(&self) -> usize {
    self.checklists.len()
  }

  pub fn is_empty(&self) -> bool {
    self.checklists.is_empty()
  }

  /// Completed items across every
  /// checklist.
  pub fn completed_items(
    &self
  ) -> usize {
    self
      .checklists
      .iter()
      .map(Checklist::completed_count)
      .sum()
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle_item(
    &mut self,
    checklist_id: u64,
    item_id: u64
  ) {
    let Some(idx) = self
      .checklists
      .iter()
      .position(|c| {
        c.id == checklist_id
          && c.item(item_id).is_some()
      })
    else {
      debug!(
        "no matching checklist item; \
         ignoring toggle"
      );
      return;
    };

    let checklists =
      Arc::make_mut(&mut self.checklists);
    if checklists[idx].toggle(item_id) {
      debug!(
        progress = checklists[idx].progress,
        status = %checklists[idx].status,
        "toggled checklist item"
      );
    }
  }
}
