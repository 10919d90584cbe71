use std::collections::HashSet;
use std::fmt::Display;
use std::fs;
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use anyhow::{
  Context,
  anyhow
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::info;

use crate::checklist::{
  Checklist,
  ChecklistBoard
};
use crate::dashboard::{
  DashboardSummary,
  SystemStatus
};
use crate::filter::{
  TodoFilter,
  filter_flights
};
use crate::flight::Flight;
use crate::notification::{
  Notification,
  NotificationCenter
};
use crate::progress::Tally;
use crate::todo::{
  Category,
  Priority,
  Todo,
  TodoList
};

/// Initial contents of a console, as
/// read from a TOML seed file. Missing
/// sections are empty.
#[derive(
  Debug, Clone, Default, Deserialize,
)]
#[serde(default)]
pub struct ConsoleSeed {
  pub checklists:    Vec<Checklist>,
  pub todos:         Vec<Todo>,
  pub notifications: Vec<Notification>,
  pub flights:       Vec<Flight>,
  pub systems:       Vec<SystemStatus>
}

impl ConsoleSeed {
  pub fn validate(
    &self
  ) -> anyhow::Result<()> {
    ensure_unique(
      "checklist",
      self.checklists.iter().map(|c| c.id())
    )?;
    for checklist in &self.checklists {
      ensure_unique(
        "checklist item",
        checklist
          .items()
          .iter()
          .map(|item| item.id)
      )
      .with_context(|| {
        format!(
          "in checklist {}",
          checklist.id()
        )
      })?;
    }
    ensure_unique(
      "todo",
      self.todos.iter().map(|t| t.id)
    )?;
    ensure_unique(
      "notification",
      self.notifications.iter().map(|n| n.id)
    )?;
    ensure_unique(
      "flight",
      self
        .flights
        .iter()
        .map(|f| f.id.as_str())
    )?;
    Ok(())
  }
}

fn ensure_unique<I, K>(
  what: &str,
  ids: I
) -> anyhow::Result<()>
where
  I: IntoIterator<Item = K>,
  K: Eq + Hash + Display
{
  let mut seen = HashSet::new();
  for id in ids {
    if seen.contains(&id) {
      return Err(anyhow!(
        "duplicate {what} id: {id}"
      ));
    }
    seen.insert(id);
  }
  Ok(())
}

/// Everything the console shows, with
/// derived aggregates filled in.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
  pub checklists:    Arc<Vec<Checklist>>,
  pub todos:         Arc<Vec<Todo>>,
  pub todo_summary:  Tally,
  pub notifications: Arc<Vec<Notification>>,
  pub unread:        usize,
  pub flights:       Arc<Vec<Flight>>,
  pub systems:       Arc<Vec<SystemStatus>>,
  pub dashboard:     DashboardSummary
}

/// Single owner of every console
/// collection. Callers go through the
/// operations here; nothing hands out
/// mutable access to the collections.
#[derive(Debug, Clone, Default)]
pub struct Console {
  checklists:    ChecklistBoard,
  todos:         TodoList,
  notifications: NotificationCenter,
  flights:       Arc<Vec<Flight>>,
  systems:       Arc<Vec<SystemStatus>>
}

impl Console {
  pub fn sample() -> Self {
    Self::from_parts(crate::seed::sample())
  }

  #[tracing::instrument(skip(seed))]
  pub fn from_seed(
    seed: ConsoleSeed
  ) -> anyhow::Result<Self> {
    seed.validate()?;
    info!(
      checklists = seed.checklists.len(),
      todos = seed.todos.len(),
      notifications = seed.notifications.len(),
      flights = seed.flights.len(),
      systems = seed.systems.len(),
      "loaded console seed"
    );
    Ok(Self::from_parts(seed))
  }

  pub fn from_seed_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let seed: ConsoleSeed =
      toml::from_str(text)
        .context("invalid seed document")?;
    Self::from_seed(seed)
  }

  #[tracing::instrument(skip(path), fields(path = %path.display()))]
  pub fn from_seed_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let text = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read seed file {}",
          path.display()
        )
      })?;
    Self::from_seed_str(&text)
      .with_context(|| {
        format!(
          "failed to load seed file {}",
          path.display()
        )
      })
  }

  fn from_parts(
    seed: ConsoleSeed
  ) -> Self {
    Self {
      checklists:    ChecklistBoard::new(
        seed.checklists
      ),
      todos:         TodoList::new(
        seed.todos
      ),
      notifications: NotificationCenter::new(
        seed.notifications
      ),
      flights:       Arc::new(seed.flights),
      systems:       Arc::new(seed.systems)
    }
  }

  pub fn checklists(
    &self
  ) -> &ChecklistBoard {
    &self.checklists
  }

  pub fn todos(&self) -> &TodoList {
    &self.todos
  }

  pub fn notifications(
    &self
  ) -> &NotificationCenter {
    &self.notifications
  }

  pub fn flights(&self) -> &[Flight] {
    &self.flights
  }

  pub fn systems(
    &self
  ) -> &[SystemStatus] {
    &self.systems
  }

  pub fn toggle_item(
    &mut self,
    checklist_id: u64,
    item_id: u64
  ) {
    self
      .checklists
      .toggle_item(checklist_id, item_id);
  }

  pub fn add_todo(
    &mut self,
    text: &str,
    category: Category,
    priority: Priority
  ) -> Option<u64> {
    self.todos.add(text, category, priority)
  }

  pub fn toggle_todo(&mut self, id: u64) {
    self.todos.toggle(id);
  }

  pub fn delete_todo(&mut self, id: u64) {
    self.todos.delete(id);
  }

  pub fn mark_as_read(&mut self, id: u64) {
    self.notifications.mark_as_read(id);
  }

  pub fn mark_all_as_read(&mut self) {
    self.notifications.mark_all_as_read();
  }

  pub fn dismiss(&mut self, id: u64) {
    self.notifications.dismiss(id);
  }

  pub fn search_flights(
    &self,
    query: &str
  ) -> Vec<&Flight> {
    filter_flights(&self.flights, query)
  }

  pub fn search_todos(
    &self,
    filter: &TodoFilter
  ) -> Vec<&Todo> {
    filter.apply(self.todos.iter())
  }

  pub fn summary(
    &self
  ) -> DashboardSummary {
    DashboardSummary::from_console(self)
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      checklists:    self
        .checklists
        .snapshot(),
      todos:         self.todos.snapshot(),
      todo_summary:  self.todos.summary(),
      notifications: self
        .notifications
        .snapshot(),
      unread:        self
        .notifications
        .unread_count(),
      flights:       Arc::clone(
        &self.flights
      ),
      systems:       Arc::clone(
        &self.systems
      ),
      dashboard:     self.summary()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::Console;
  use crate::progress::ChecklistStatus;
  use crate::todo::{
    Category,
    Priority
  };

  const SEED: &str = r#"
[[checklists]]
id = 10
title = "Taxi Checklist"
aircraft = "Airbus A320"
progress = 100
status = "completed"

[[checklists.items]]
id = 1
text = "Flight controls checked"
completed = true

[[checklists.items]]
id = 2
text = "Transponder on"

[[todos]]
id = 7
text = "Recurrent simulator session"
category = "training"
priority = "high"
dueDate = "2024-07-01"

[[notifications]]
id = 1
type = "alert"
title = "Runway Closure"
message = "Runway 22R closed for maintenance"
priority = "high"
"#;

  #[test]
  fn sample_matches_built_in_data() {
    let console = Console::sample();
    assert_eq!(console.checklists().len(), 3);
    assert_eq!(console.todos().len(), 5);
    assert_eq!(
      console.notifications().len(),
      6
    );
    assert_eq!(console.flights().len(), 3);
    assert_eq!(console.systems().len(), 4);

    let pre_flight = console
      .checklists()
      .get(1)
      .expect("pre-flight checklist");
    assert_eq!(pre_flight.progress(), 50);
    assert_eq!(
      pre_flight.status(),
      ChecklistStatus::InProgress
    );
  }

  #[test]
  fn seed_string_recomputes_progress() {
    let console =
      Console::from_seed_str(SEED)
        .expect("load seed");
    let taxi = console
      .checklists()
      .get(10)
      .expect("taxi checklist");
    assert_eq!(taxi.progress(), 50);
    assert_eq!(
      taxi.status(),
      ChecklistStatus::InProgress
    );

    let todo =
      console.todos().get(7).expect("todo");
    assert_eq!(todo.category, Category::Training);
    assert_eq!(
      todo
        .due_date
        .map(|d| d.to_string())
        .as_deref(),
      Some("2024-07-01")
    );
    assert!(console.flights().is_empty());
    assert_eq!(
      console.notifications().unread_count(),
      1
    );
  }

  #[test]
  fn seed_file_is_read_from_disk() {
    let mut file =
      tempfile::NamedTempFile::new()
        .expect("temp seed");
    file
      .write_all(SEED.as_bytes())
      .expect("write seed");

    let console =
      Console::from_seed_file(file.path())
        .expect("load seed file");
    assert_eq!(console.checklists().len(), 1);
  }

  #[test]
  fn duplicate_ids_are_rejected() {
    let seed = r#"
[[todos]]
id = 1
text = "a"

[[todos]]
id = 1
text = "b"
"#;
    let err = Console::from_seed_str(seed)
      .expect_err("duplicate ids");
    assert!(
      err.to_string().contains("duplicate todo id")
    );
  }

  #[test]
  fn operations_route_to_collections() {
    let mut console = Console::sample();

    console.toggle_item(1, 4);
    assert_eq!(
      console
        .checklists()
        .get(1)
        .expect("c1")
        .progress(),
      67
    );

    let id = console
      .add_todo(
        "Brief new first officer",
        Category::Training,
        Priority::Medium
      )
      .expect("added");
    assert_eq!(console.todos().len(), 6);
    console.toggle_todo(id);
    assert!(
      console.todos().get(id).expect("new").completed
    );
    console.delete_todo(id);
    assert!(console.todos().get(id).is_none());

    console.mark_as_read(1);
    assert_eq!(
      console.notifications().unread_count(),
      2
    );
    console.dismiss(2);
    assert_eq!(
      console.notifications().unread_count(),
      1
    );
  }

  #[test]
  fn snapshot_serializes_derived_fields() {
    let console = Console::sample();
    let json =
      serde_json::to_value(console.snapshot())
        .expect("serialize snapshot");

    assert_eq!(
      json["checklists"][0]["progress"],
      50
    );
    assert_eq!(
      json["checklists"][0]["status"],
      "in-progress"
    );
    assert_eq!(json["unread"], 3);
    assert_eq!(json["todo_summary"]["total"], 5);
    assert_eq!(
      json["flights"][0]["status"],
      "en-route"
    );
  }
}
