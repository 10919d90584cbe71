use anyhow::anyhow;
use tracing::trace;

use crate::flight::Flight;
use crate::todo::{
  Category,
  Priority,
  Todo
};

/// Case-insensitive substring query
/// over flight id, callsign, origin and
/// destination.
#[derive(Debug, Clone, Default)]
pub struct FlightQuery {
  needle: String
}

impl FlightQuery {
  pub fn new(query: &str) -> Self {
    Self {
      needle: query.to_lowercase()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.needle.is_empty()
  }

  pub fn matches(
    &self,
    flight: &Flight
  ) -> bool {
    if self.needle.is_empty() {
      return true;
    }
    [
      &flight.id,
      &flight.callsign,
      &flight.origin,
      &flight.destination
    ]
    .into_iter()
    .any(|field| {
      field
        .to_lowercase()
        .contains(&self.needle)
    })
  }
}

#[tracing::instrument(skip(flights))]
pub fn filter_flights<'a>(
  flights: &'a [Flight],
  query: &str
) -> Vec<&'a Flight> {
  let query = FlightQuery::new(query);
  let matched: Vec<&Flight> = flights
    .iter()
    .filter(|f| query.matches(f))
    .collect();
  trace!(
    total = flights.len(),
    matched = matched.len(),
    "filtered flights"
  );
  matched
}

#[derive(Debug, Clone, PartialEq)]
pub enum Pred {
  TextContains(String),
  CategoryEq(Category),
  PriorityEq(Priority),
  Completed(bool)
}

/// AND of todo predicates.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
  preds: Vec<Pred>
}

impl TodoFilter {
  #[tracing::instrument(skip(terms))]
  pub fn parse(
    terms: &[String]
  ) -> anyhow::Result<Self> {
    let mut preds = Vec::new();

    for term in terms {
      let term = term.trim();
      if term.is_empty() {
        continue;
      }
      preds.push(parse_term(term)?);
    }

    trace!(?preds, "parsed todo filter");
    Ok(Self {
      preds
    })
  }

  pub fn preds(&self) -> &[Pred] {
    &self.preds
  }

  pub fn is_empty(&self) -> bool {
    self.preds.is_empty()
  }

  pub fn matches(
    &self,
    todo: &Todo
  ) -> bool {
    self
      .preds
      .iter()
      .all(|pred| eval_pred(pred, todo))
  }

  pub fn apply<'a, I>(
    &self,
    todos: I
  ) -> Vec<&'a Todo>
  where
    I: IntoIterator<Item = &'a Todo>
  {
    todos
      .into_iter()
      .filter(|t| self.matches(t))
      .collect()
  }
}

fn parse_term(
  term: &str
) -> anyhow::Result<Pred> {
  match term {
    "+done" => {
      return Ok(Pred::Completed(true));
    }
    "-done" => {
      return Ok(Pred::Completed(false));
    }
    _ => {}
  }

  if let Some((key, value)) =
    term.split_once(':')
  {
    match key
      .to_ascii_lowercase()
      .as_str()
    {
      "cat" | "category" => {
        return Ok(Pred::CategoryEq(
          value.parse()?
        ));
      }
      "pri" | "priority" => {
        return Ok(Pred::PriorityEq(
          value.parse()?
        ));
      }
      _ => {}
    }
  }

  if term.starts_with('+')
    || term.starts_with('-')
  {
    return Err(anyhow!(
      "unknown todo filter term: {term}"
    ));
  }

  Ok(Pred::TextContains(
    term.to_lowercase()
  ))
}

fn eval_pred(
  pred: &Pred,
  todo: &Todo
) -> bool {
  match pred {
    Pred::TextContains(needle) => {
      todo
        .text
        .to_lowercase()
        .contains(needle.as_str())
    }
    Pred::CategoryEq(category) => {
      todo.category == *category
    }
    Pred::PriorityEq(priority) => {
      todo.priority == *priority
    }
    Pred::Completed(done) => {
      todo.completed == *done
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Pred,
    TodoFilter,
    filter_flights
  };
  use crate::flight::{
    Flight,
    FlightStatus,
    Position
  };
  use crate::todo::{
    Category,
    Priority,
    Todo
  };

  fn flight(
    id: &str,
    origin: &str,
    destination: &str
  ) -> Flight {
    Flight {
      id:             id.to_string(),
      callsign:       format!(
        "AERO{}",
        &id[2..]
      ),
      aircraft:       "Airbus A320"
        .to_string(),
      origin:         origin.to_string(),
      destination:    destination
        .to_string(),
      departure:      "10:30".to_string(),
      arrival:        "14:30".to_string(),
      status:         FlightStatus::EnRoute,
      altitude:       "35,000 ft"
        .to_string(),
      speed:          "475 kts".to_string(),
      position:       Position::default(),
      fuel_percent:   65,
      passengers:     142,
      crew:           6,
      route_progress: 65
    }
  }

  fn fleet() -> Vec<Flight> {
    vec![
      flight("AC001", "JFK", "LAX"),
      flight("AC002", "DFW", "MIA"),
      flight("AC003", "SEA", "ORD"),
    ]
  }

  fn terms(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn jfk_query_selects_one_flight() {
    let flights = fleet();
    let hits =
      filter_flights(&flights, "JFK");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].origin, "JFK");
    assert_eq!(flights.len(), 3);
  }

  #[test]
  fn query_is_case_insensitive() {
    let flights = fleet();
    assert_eq!(
      filter_flights(&flights, "mia")[0].id,
      "AC002"
    );
    assert_eq!(
      filter_flights(&flights, "aero003")
        [0]
        .id,
      "AC003"
    );
    assert_eq!(
      filter_flights(&flights, "ac00").len(),
      3
    );
  }

  #[test]
  fn empty_query_keeps_everything() {
    let flights = fleet();
    assert_eq!(
      filter_flights(&flights, "").len(),
      3
    );
  }

  #[test]
  fn whitespace_is_part_of_the_query() {
    let flights = fleet();
    assert!(
      filter_flights(&flights, " JFK")
        .is_empty()
    );
    assert!(
      filter_flights(&flights, "   ")
        .is_empty()
    );
  }

  #[test]
  fn aircraft_is_not_searched() {
    let flights = fleet();
    assert!(
      filter_flights(&flights, "airbus")
        .is_empty()
    );
  }

  #[test]
  fn parses_todo_terms() {
    let filter = TodoFilter::parse(&terms(
      &["cat:safety", "pri:high", "-done", "Brief"]
    ))
    .expect("parse filter");
    assert_eq!(
      filter.preds(),
      &[
        Pred::CategoryEq(Category::Safety),
        Pred::PriorityEq(Priority::High),
        Pred::Completed(false),
        Pred::TextContains(
          "brief".to_string()
        ),
      ]
    );

    assert!(
      TodoFilter::parse(&terms(&[
        "cat:cargo"
      ]))
      .is_err()
    );
    assert!(
      TodoFilter::parse(&terms(&["+urgent"]))
        .is_err()
    );
  }

  #[test]
  fn todo_filter_is_conjunctive() {
    let todos = vec![
      Todo {
        id:        1,
        text:      "Monthly safety briefing"
          .to_string(),
        completed: false,
        category:  Category::Safety,
        priority:  Priority::High,
        due_date:  None
      },
      Todo {
        id:        2,
        text:      "Safety gear audit"
          .to_string(),
        completed: true,
        category:  Category::Safety,
        priority:  Priority::Low,
        due_date:  None
      },
    ];

    let filter = TodoFilter::parse(&terms(
      &["safety", "+done"]
    ))
    .expect("parse filter");
    let hits = filter.apply(&todos);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);

    let all = TodoFilter::default();
    assert_eq!(all.apply(&todos).len(), 2);
  }
}
