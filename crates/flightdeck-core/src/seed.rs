use chrono::NaiveDate;

use crate::checklist::{
  Checklist,
  ChecklistItem
};
use crate::console::ConsoleSeed;
use crate::dashboard::{
  SystemState,
  SystemStatus
};
use crate::flight::{
  Flight,
  FlightStatus,
  Position
};
use crate::notification::{
  Notification,
  NotificationKind
};
use crate::todo::{
  Category,
  Priority,
  Todo
};

/// Built-in data the console starts
/// with when no seed file is given.
pub fn sample() -> ConsoleSeed {
  ConsoleSeed {
    checklists:    checklists(),
    todos:         todos(),
    notifications: notifications(),
    flights:       flights(),
    systems:       systems()
  }
}

fn items(
  steps: &[(&str, bool)]
) -> Vec<ChecklistItem> {
  steps
    .iter()
    .enumerate()
    .map(|(idx, (text, done))| {
      ChecklistItem::new(
        idx as u64 + 1,
        *text,
        *done
      )
    })
    .collect()
}

fn checklists() -> Vec<Checklist> {
  vec![
    Checklist::new(
      1,
      "Pre-Flight Inspection",
      "Boeing 737-800",
      items(&[
        ("External visual inspection", true),
        (
          "Check fuel quantity and quality",
          true
        ),
        (
          "Verify control surface movement",
          true
        ),
        ("Test navigation lights", false),
        (
          "Check tire condition and pressure",
          false
        ),
        (
          "Verify emergency equipment",
          false
        ),
      ])
    ),
    Checklist::new(
      2,
      "Engine Start Procedure",
      "Airbus A320",
      items(&[
        ("Set parking brake", false),
        ("Check fuel pumps ON", false),
        (
          "Engine start switch to START",
          false
        ),
        ("Monitor engine parameters", false),
        ("Check hydraulic pressure", false),
      ])
    ),
    Checklist::new(
      3,
      "Landing Checklist",
      "Boeing 777-300",
      items(&[
        (
          "Landing gear DOWN and locked",
          true
        ),
        ("Flaps set for landing", true),
        ("Speed brake armed", true),
        ("Autobrakes set", true),
      ])
    ),
  ]
}

fn todo(
  id: u64,
  text: &str,
  completed: bool,
  category: Category,
  priority: Priority,
  due: Option<(i32, u32, u32)>
) -> Todo {
  Todo {
    id,
    text: text.to_string(),
    completed,
    category,
    priority,
    due_date: due.and_then(|(y, m, d)| {
      NaiveDate::from_ymd_opt(y, m, d)
    })
  }
}

fn todos() -> Vec<Todo> {
  vec![
    todo(
      1,
      "Complete monthly safety briefing",
      false,
      Category::Safety,
      Priority::High,
      Some((2024, 6, 1))
    ),
    todo(
      2,
      "Review flight operations manual \
       updates",
      false,
      Category::Training,
      Priority::Medium,
      Some((2024, 6, 3))
    ),
    todo(
      3,
      "Submit pilot license renewal \
       application",
      true,
      Category::Certification,
      Priority::High,
      Some((2024, 5, 28))
    ),
    todo(
      4,
      "Schedule aircraft inspection",
      false,
      Category::Maintenance,
      Priority::Medium,
      None
    ),
    todo(
      5,
      "Update emergency contact \
       information",
      false,
      Category::Personal,
      Priority::Low,
      None
    ),
  ]
}

fn notification(
  id: u64,
  kind: NotificationKind,
  title: &str,
  message: &str,
  timestamp: &str,
  read: bool,
  priority: Priority
) -> Notification {
  Notification {
    id,
    kind,
    title: title.to_string(),
    message: message.to_string(),
    timestamp: timestamp.to_string(),
    read,
    priority
  }
}

fn notifications() -> Vec<Notification> {
  vec![
    notification(
      1,
      NotificationKind::Alert,
      "Weather Advisory",
      "Severe turbulence reported on \
       route JFK-LAX FL350-FL370",
      "2 minutes ago",
      false,
      Priority::High
    ),
    notification(
      2,
      NotificationKind::Info,
      "Flight AC002 Status Update",
      "Flight AC002 has completed \
       boarding and is ready for pushback",
      "5 minutes ago",
      false,
      Priority::Medium
    ),
    notification(
      3,
      NotificationKind::Success,
      "Checklist Completed",
      "Pre-flight inspection for AC001 \
       has been completed successfully",
      "10 minutes ago",
      true,
      Priority::Low
    ),
    notification(
      4,
      NotificationKind::Alert,
      "Fuel Level Warning",
      "AC003 fuel levels below minimum \
       threshold for planned route",
      "15 minutes ago",
      false,
      Priority::High
    ),
    notification(
      5,
      NotificationKind::Info,
      "Maintenance Scheduled",
      "Routine maintenance scheduled for \
       aircraft N12345 tomorrow at 08:00",
      "1 hour ago",
      true,
      Priority::Medium
    ),
    notification(
      6,
      NotificationKind::Success,
      "Route Optimization",
      "New optimized route calculated \
       for AC001, saving 15 minutes \
       flight time",
      "2 hours ago",
      true,
      Priority::Low
    ),
  ]
}

fn flights() -> Vec<Flight> {
  vec![
    Flight {
      id:             "AC001".to_string(),
      callsign:       "AERO001".to_string(),
      aircraft:       "Boeing 737-800"
        .to_string(),
      origin:         "JFK".to_string(),
      destination:    "LAX".to_string(),
      departure:      "10:30".to_string(),
      arrival:        "14:30".to_string(),
      status:         FlightStatus::EnRoute,
      altitude:       "35,000 ft"
        .to_string(),
      speed:          "475 kts".to_string(),
      position:       Position {
        lat: 39.8283,
        lng: -98.5795
      },
      fuel_percent:   65,
      passengers:     142,
      crew:           6,
      route_progress: 65
    },
    Flight {
      id:             "AC002".to_string(),
      callsign:       "AERO002".to_string(),
      aircraft:       "Airbus A320"
        .to_string(),
      origin:         "DFW".to_string(),
      destination:    "MIA".to_string(),
      departure:      "12:15".to_string(),
      arrival:        "16:45".to_string(),
      status:         FlightStatus::Boarding,
      altitude:       "Ground".to_string(),
      speed:          "0 kts".to_string(),
      position:       Position {
        lat: 32.8968,
        lng: -97.0380
      },
      fuel_percent:   100,
      passengers:     156,
      crew:           5,
      route_progress: 10
    },
    Flight {
      id:             "AC003".to_string(),
      callsign:       "AERO003".to_string(),
      aircraft:       "Boeing 777-300"
        .to_string(),
      origin:         "SEA".to_string(),
      destination:    "ORD".to_string(),
      departure:      "15:00".to_string(),
      arrival:        "18:20".to_string(),
      status:         FlightStatus::Delayed,
      altitude:       "Ground".to_string(),
      speed:          "0 kts".to_string(),
      position:       Position {
        lat: 47.4502,
        lng: -122.3088
      },
      fuel_percent:   95,
      passengers:     284,
      crew:           12,
      route_progress: 0
    },
  ]
}

fn systems() -> Vec<SystemStatus> {
  [
    ("Weather Systems", SystemState::Operational),
    ("Navigation", SystemState::Operational),
    ("Communication", SystemState::Degraded),
    ("Fuel Systems", SystemState::Operational)
  ]
  .into_iter()
  .map(|(name, state)| SystemStatus {
    name: name.to_string(),
    state
  })
  .collect()
}
