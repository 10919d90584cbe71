use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

use crate::console::Console;
use crate::flight::FlightStatus;
use crate::notification::NotificationKind;
use crate::progress::{
  ChecklistStatus,
  Tally
};

/// Top-level console views.
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
#[serde(rename_all = "kebab-case")]
pub enum Tab {
  #[default]
  Dashboard,
  FlightTracker,
  Checklists,
  Notifications,
  Todos
}

impl Tab {
  pub const ALL: [Tab; 5] = [
    Tab::Dashboard,
    Tab::FlightTracker,
    Tab::Checklists,
    Tab::Notifications,
    Tab::Todos
  ];

  pub fn id(self) -> &'static str {
    match self {
      Self::Dashboard => "dashboard",
      Self::FlightTracker => {
        "flight-tracker"
      }
      Self::Checklists => "checklists",
      Self::Notifications => {
        "notifications"
      }
      Self::Todos => "todos"
    }
  }

  pub fn label(
    self
  ) -> &'static str {
    match self {
      Self::Dashboard => "Dashboard",
      Self::FlightTracker => {
        "Flight Tracker"
      }
      Self::Checklists => "Checklists",
      Self::Notifications => {
        "Notifications"
      }
      Self::Todos => "Todo List"
    }
  }

  /// Unknown ids land on the dashboard.
  pub fn from_id(id: &str) -> Self {
    let id = id.trim().to_ascii_lowercase();
    Self::ALL
      .into_iter()
      .find(|tab| tab.id() == id)
      .unwrap_or_default()
  }
}

impl fmt::Display for Tab {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
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
#[serde(rename_all = "lowercase")]
pub enum SystemState {
  Operational,
  Degraded,
  Offline
}

impl fmt::Display for SystemState {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(match self {
      Self::Operational => "Operational",
      Self::Degraded => "Degraded",
      Self::Offline => "Offline"
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
pub struct SystemStatus {
  pub name:  String,
  pub state: SystemState
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  PartialEq,
  Eq,
)]
pub struct DashboardSummary {
  pub active_flights:   usize,
  pub on_schedule:      usize,
  pub completed_checks: usize,
  pub alerts:           usize,
  pub checklists:       Tally,
  pub todos:            Tally,
  pub unread:           usize
}

impl DashboardSummary {
  pub fn from_console(
    console: &Console
  ) -> Self {
    let flights = console.flights();
    let board = console.checklists();
    let notifications =
      console.notifications();

    Self {
      active_flights: flights
        .iter()
        .filter(|f| f.status.is_active())
        .count(),
      on_schedule: flights
        .iter()
        .filter(|f| {
          f.status != FlightStatus::Delayed
        })
        .count(),
      completed_checks: board
        .completed_items(),
      alerts: notifications
        .unread_of(NotificationKind::Alert),
      checklists: Tally::from_flags(
        board.iter().map(|c| {
          c.status()
            == ChecklistStatus::Completed
        })
      ),
      todos: console.todos().summary(),
      unread: notifications.unread_count()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    DashboardSummary,
    Tab
  };
  use crate::console::Console;

  #[test]
  fn tab_ids_round_trip_with_fallback() {
    for tab in Tab::ALL {
      assert_eq!(Tab::from_id(tab.id()), tab);
    }
    assert_eq!(
      Tab::from_id("Flight-Tracker"),
      Tab::FlightTracker
    );
    assert_eq!(
      Tab::from_id("weather"),
      Tab::Dashboard
    );
  }

  #[test]
  fn summary_of_sample_console() {
    let console = Console::sample();
    let summary =
      DashboardSummary::from_console(
        &console
      );

    assert_eq!(summary.active_flights, 1);
    assert_eq!(summary.on_schedule, 2);
    // 3 + 0 + 4 completed items
    assert_eq!(summary.completed_checks, 7);
    assert_eq!(summary.alerts, 2);
    assert_eq!(summary.unread, 3);
    assert_eq!(
      (
        summary.checklists.completed,
        summary.checklists.total
      ),
      (1, 3)
    );
    assert_eq!(summary.todos.completed, 1);
    assert_eq!(summary.todos.total, 5);
    assert_eq!(summary.todos.percent, 20);
  }

  #[test]
  fn summary_follows_mutations() {
    let mut console = Console::sample();
    console.mark_all_as_read();
    console.toggle_item(2, 1);

    let summary =
      DashboardSummary::from_console(
        &console
      );
    assert_eq!(summary.alerts, 0);
    assert_eq!(summary.unread, 0);
    assert_eq!(summary.completed_checks, 8);
  }
}
