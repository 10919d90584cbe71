use std::fmt;
use std::sync::Arc;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info
};

use crate::todo::Priority;

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
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
  Alert,
  Info,
  Success
}

impl fmt::Display for NotificationKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(match self {
      Self::Alert => "alert",
      Self::Info => "info",
      Self::Success => "success"
    })
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Notification {
  pub id:        u64,
  #[serde(rename = "type")]
  pub kind:      NotificationKind,
  pub title:     String,
  pub message:   String,
  #[serde(default)]
  pub timestamp: String,
  #[serde(default)]
  pub read:      bool,
  #[serde(default)]
  pub priority:  Priority
}

#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
  notifications: Arc<Vec<Notification>>
}

impl NotificationCenter {
  pub fn new(
    notifications: Vec<Notification>
  ) -> Self {
    Self {
      notifications: Arc::new(
        notifications
      )
    }
  }

  pub fn snapshot(
    &self
  ) -> Arc<Vec<Notification>> {
    Arc::clone(&self.notifications)
  }

  pub fn get(
    &self,
    id: u64
  ) -> Option<&Notification> {
    self
      .notifications
      .iter()
      .find(|n| n.id == id)
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &Notification>
  {
    self.notifications.iter()
  }

  pub fn len(&self) -> usize {
    self.notifications.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notifications.is_empty()
  }

  pub fn unread_count(&self) -> usize {
    self
      .notifications
      .iter()
      .filter(|n| !n.read)
      .count()
  }

  /// Unread notifications of `kind`.
  pub fn unread_of(
    &self,
    kind: NotificationKind
  ) -> usize {
    self
      .notifications
      .iter()
      .filter(|n| !n.read && n.kind == kind)
      .count()
  }

  #[tracing::instrument(skip(self))]
  pub fn mark_as_read(&mut self, id: u64) {
    let Some(idx) = self
      .notifications
      .iter()
      .position(|n| n.id == id)
    else {
      debug!(
        "no notification with id; \
         ignoring"
      );
      return;
    };
    if self.notifications[idx].read {
      debug!("already read");
      return;
    }
    Arc::make_mut(&mut self.notifications)
      [idx]
      .read = true;
    debug!("marked as read");
  }

  #[tracing::instrument(skip(self))]
  pub fn mark_all_as_read(&mut self) {
    if self.unread_count() == 0 {
      return;
    }
    for n in Arc::make_mut(
      &mut self.notifications
    ) {
      n.read = true;
    }
    info!("marked all notifications read");
  }

  #[tracing::instrument(skip(self))]
  pub fn dismiss(&mut self, id: u64) {
    let Some(idx) = self
      .notifications
      .iter()
      .position(|n| n.id == id)
    else {
      debug!(
        "no notification with id; \
         ignoring"
      );
      return;
    };
    Arc::make_mut(&mut self.notifications)
      .remove(idx);
    info!("dismissed notification");
  }
}
