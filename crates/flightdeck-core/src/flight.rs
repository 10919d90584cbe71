use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

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
pub enum FlightStatus {
  EnRoute,
  Boarding,
  Delayed,
  Departed,
  Landed
}

impl FlightStatus {
  pub fn label(
    self
  ) -> &'static str {
    match self {
      Self::EnRoute => "En Route",
      Self::Boarding => "Boarding",
      Self::Delayed => "Delayed",
      Self::Departed => "Departed",
      Self::Landed => "Landed"
    }
  }

  /// Airborne or on its way there.
  pub fn is_active(self) -> bool {
    matches!(
      self,
      Self::EnRoute | Self::Departed
    )
  }
}

impl fmt::Display for FlightStatus {
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
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Position {
  pub lat: f64,
  pub lng: f64
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
  pub id:             String,
  pub callsign:       String,
  #[serde(default)]
  pub aircraft:       String,
  pub origin:         String,
  pub destination:    String,
  #[serde(default)]
  pub departure:      String,
  #[serde(default)]
  pub arrival:        String,
  pub status:         FlightStatus,
  #[serde(default)]
  pub altitude:       String,
  #[serde(default)]
  pub speed:          String,
  #[serde(default)]
  pub position:       Position,
  #[serde(default)]
  pub fuel_percent:   u8,
  #[serde(default)]
  pub passengers:     u32,
  #[serde(default)]
  pub crew:           u32,
  #[serde(default)]
  pub route_progress: u8
}

impl Flight {
  pub fn route(&self) -> String {
    format!(
      "{} → {}",
      self.origin, self.destination
    )
  }
}
