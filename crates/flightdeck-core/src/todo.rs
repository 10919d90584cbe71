use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info
};

use crate::progress::Tally;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  #[default]
  General,
  Safety,
  Training,
  Certification,
  Maintenance,
  Personal
}

impl Category {
  pub const ALL: [Category; 6] = [
    Category::General,
    Category::Safety,
    Category::Training,
    Category::Certification,
    Category::Maintenance,
    Category::Personal
  ];

  pub fn id(self) -> &'static str {
    match self {
      Self::General => "general",
      Self::Safety => "safety",
      Self::Training => "training",
      Self::Certification => {
        "certification"
      }
      Self::Maintenance => "maintenance",
      Self::Personal => "personal"
    }
  }

  pub fn label(
    self
  ) -> &'static str {
    match self {
      Self::General => "General",
      Self::Safety => "Safety",
      Self::Training => "Training",
      Self::Certification => {
        "Certification"
      }
      Self::Maintenance => "Maintenance",
      Self::Personal => "Personal"
    }
  }
}

impl fmt::Display for Category {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Category {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let needle =
      s.trim().to_ascii_lowercase();
    Self::ALL
      .into_iter()
      .find(|c| c.id() == needle)
      .ok_or_else(|| {
        anyhow!("unknown category: {s}")
      })
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High
}

impl Priority {
  pub fn id(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high"
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.id())
  }
}

impl FromStr for Priority {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      "low" | "l" => Ok(Self::Low),
      "medium" | "m" => Ok(Self::Medium),
      "high" | "h" => Ok(Self::High),
      _ => Err(anyhow!(
        "unknown priority: {s}"
      ))
    }
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
#[serde(rename_all = "camelCase")]
pub struct Todo {
  pub id:        u64,
  pub text:      String,
  #[serde(default)]
  pub completed: bool,
  #[serde(default)]
  pub category:  Category,
  #[serde(default)]
  pub priority:  Priority,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub due_date:  Option<NaiveDate>
}

/// Ordered todo collection, newest
/// first.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
  todos:   Arc<Vec<Todo>>,
  last_id: u64
}

impl TodoList {
  pub fn new(todos: Vec<Todo>) -> Self {
    let last_id = todos
      .iter()
      .map(|t| t.id)
      .max()
      .unwrap_or(0);
    Self {
      todos: Arc::new(todos),
      last_id
    }
  }

  pub fn snapshot(
    &self
  ) -> Arc<Vec<Todo>> {
    Arc::clone(&self.todos)
  }

  pub fn get(
    &self,
    id: u64
  ) -> Option<&Todo> {
    self.todos.iter().find(|t| t.id == id)
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &Todo> {
    self.todos.iter()
  }

  pub fn len(&self) -> usize {
    self.todos.len()
  }

  pub fn is_empty(&self) -> bool {
    self.todos.is_empty()
  }

  /// Recomputed from the collection on
  /// every call.
  pub fn summary(&self) -> Tally {
    Tally::from_flags(
      self.todos.iter().map(|t| t.completed)
    )
  }

  pub fn add(
    &mut self,
    text: &str,
    category: Category,
    priority: Priority
  ) -> Option<u64> {
    self.add_at(
      text,
      category,
      priority,
      Utc::now()
    )
  }

  /// Prepends a new todo and returns its
  /// id. Blank text is rejected.
  #[tracing::instrument(skip(self, text, now))]
  pub fn add_at(
    &mut self,
    text: &str,
    category: Category,
    priority: Priority,
    now: DateTime<Utc>
  ) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
      debug!("blank todo text; ignoring");
      return None;
    }

    let id = self.next_id(now);
    let todo = Todo {
      id,
      text: text.to_string(),
      completed: false,
      category,
      priority,
      due_date: None
    };
    Arc::make_mut(&mut self.todos)
      .insert(0, todo);
    info!(id, "added todo");
    Some(id)
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle(&mut self, id: u64) {
    let Some(idx) = self.position(id)
    else {
      debug!("no todo with id; ignoring");
      return;
    };
    let todo =
      &mut Arc::make_mut(&mut self.todos)
        [idx];
    todo.completed = !todo.completed;
    debug!(
      completed = todo.completed,
      "toggled todo"
    );
  }

  #[tracing::instrument(skip(self))]
  pub fn delete(&mut self, id: u64) {
    let Some(idx) = self.position(id)
    else {
      debug!("no todo with id; ignoring");
      return;
    };
    Arc::make_mut(&mut self.todos)
      .remove(idx);
    info!("deleted todo");
  }

  fn position(
    &self,
    id: u64
  ) -> Option<usize> {
    self.todos.iter().position(|t| t.id == id)
  }

  /// Creation time in milliseconds,
  /// bumped past the last issued id so
  /// ids stay unique and increasing.
  fn next_id(
    &mut self,
    now: DateTime<Utc>
  ) -> u64 {
    let stamp =
      u64::try_from(now.timestamp_millis())
        .unwrap_or(0);
    let id =
      stamp.max(self.last_id + 1);
    self.last_id = id;
    id
  }
}
