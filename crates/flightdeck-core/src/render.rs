use std::io::{self, IsTerminal, Write};

use unicode_width::UnicodeWidthStr;

use crate::checklist::Checklist;
use crate::config::Config;
use crate::dashboard::{DashboardSummary, SystemState, SystemStatus, Tab};
use crate::flight::{Flight, FlightStatus};
use crate::notification::{Notification, NotificationKind};
use crate::progress::{ChecklistStatus, Tally};
use crate::todo::{Category, Priority, Todo};

/// Colour family a value is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Info,
    Warn,
    Danger,
    Accent,
    Muted,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Good => "32",
            Tone::Info => "34",
            Tone::Warn => "33",
            Tone::Danger => "31",
            Tone::Accent => "35",
            Tone::Muted => "90",
        }
    }
}

pub trait Toned {
    fn tone(&self) -> Tone;
}

impl Toned for ChecklistStatus {
    fn tone(&self) -> Tone {
        match self {
            ChecklistStatus::Completed => Tone::Good,
            ChecklistStatus::InProgress => Tone::Info,
            ChecklistStatus::NotStarted => Tone::Muted,
        }
    }
}

impl Toned for Priority {
    fn tone(&self) -> Tone {
        match self {
            Priority::High => Tone::Danger,
            Priority::Medium => Tone::Warn,
            Priority::Low => Tone::Info,
        }
    }
}

impl Toned for Category {
    fn tone(&self) -> Tone {
        match self {
            Category::Safety => Tone::Danger,
            Category::Training => Tone::Info,
            Category::Certification => Tone::Good,
            Category::Maintenance => Tone::Warn,
            Category::Personal => Tone::Accent,
            Category::General => Tone::Muted,
        }
    }
}

impl Toned for NotificationKind {
    fn tone(&self) -> Tone {
        match self {
            NotificationKind::Alert => Tone::Danger,
            NotificationKind::Info => Tone::Info,
            NotificationKind::Success => Tone::Good,
        }
    }
}

impl Toned for FlightStatus {
    fn tone(&self) -> Tone {
        match self {
            FlightStatus::EnRoute => Tone::Good,
            FlightStatus::Boarding => Tone::Info,
            FlightStatus::Delayed => Tone::Warn,
            FlightStatus::Departed | FlightStatus::Landed => Tone::Muted,
        }
    }
}

impl Toned for SystemState {
    fn tone(&self) -> Tone {
        match self {
            SystemState::Operational => Tone::Good,
            SystemState::Degraded => Tone::Warn,
            SystemState::Offline => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")?.unwrap_or(true);

        Ok(Self {
            color: color && io::stdout().is_terminal(),
        })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_dashboard<W: Write>(
        &self,
        out: &mut W,
        summary: &DashboardSummary,
        flights: &[Flight],
        systems: &[SystemStatus],
    ) -> anyhow::Result<()> {
        writeln!(out, "Flight Operations Dashboard")?;
        writeln!(out)?;
        writeln!(out, "active flights    {}", summary.active_flights)?;
        writeln!(out, "on schedule       {}", summary.on_schedule)?;
        writeln!(out, "completed checks  {}", summary.completed_checks)?;
        writeln!(
            out,
            "alerts            {}",
            if summary.alerts > 0 {
                self.paint(&summary.alerts.to_string(), Tone::Danger)
            } else {
                summary.alerts.to_string()
            }
        )?;
        writeln!(out, "checklists done   {}", summary.checklists)?;
        writeln!(out, "todos done        {}", summary.todos)?;
        writeln!(out, "unread            {}", summary.unread)?;
        writeln!(out)?;

        let rows = flights
            .iter()
            .map(|f| {
                vec![
                    self.paint(&f.id, Tone::Warn),
                    f.route(),
                    self.paint(f.status.label(), f.status.tone()),
                    f.arrival.clone(),
                    progress_bar(f.route_progress, 10),
                ]
            })
            .collect();
        write_table(&mut *out, headers(&["Flight", "Route", "Status", "ETA", "Progress"]), rows)?;
        writeln!(out)?;

        let rows = systems
            .iter()
            .map(|s| vec![s.name.clone(), self.paint(&s.state.to_string(), s.state.tone())])
            .collect();
        write_table(&mut *out, headers(&["System", "State"]), rows)?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(count = flights.len()))]
    pub fn print_flights<W: Write>(&self, out: &mut W, flights: &[&Flight]) -> anyhow::Result<()> {
        let rows = flights
            .iter()
            .map(|f| {
                vec![
                    self.paint(&f.id, Tone::Warn),
                    f.callsign.clone(),
                    f.aircraft.clone(),
                    f.route(),
                    format!("{}-{}", f.departure, f.arrival),
                    self.paint(f.status.label(), f.status.tone()),
                    f.altitude.clone(),
                    f.speed.clone(),
                    format!("{}%", f.fuel_percent),
                    format!("{}+{}", f.passengers, f.crew),
                ]
            })
            .collect();

        write_table(
            out,
            headers(&[
                "ID", "Callsign", "Aircraft", "Route", "Times", "Status", "Altitude", "Speed", "Fuel",
                "Pax+Crew",
            ]),
            rows,
        )
    }

    pub fn print_checklists<'a, W, I>(&self, out: &mut W, checklists: I) -> anyhow::Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Checklist>,
    {
        let rows = checklists
            .into_iter()
            .map(|c| {
                vec![
                    self.paint(&c.id().to_string(), Tone::Warn),
                    c.title().to_string(),
                    c.aircraft().to_string(),
                    format!("{}/{}", c.completed_count(), c.items().len()),
                    format!("{} {:>3}%", progress_bar(c.progress(), 10), c.progress()),
                    self.paint(c.status().label(), c.status().tone()),
                ]
            })
            .collect();

        write_table(
            out,
            headers(&["ID", "Checklist", "Aircraft", "Items", "Progress", "Status"]),
            rows,
        )
    }

    pub fn print_checklist<W: Write>(&self, out: &mut W, checklist: &Checklist) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} [{}] {}% {}",
            checklist.title(),
            checklist.aircraft(),
            checklist.progress(),
            self.paint(checklist.status().label(), checklist.status().tone())
        )?;
        for item in checklist.items() {
            let mark = if item.completed { "[x]" } else { "[ ]" };
            let text = if item.completed {
                self.paint(&item.text, Tone::Muted)
            } else {
                item.text.clone()
            };
            writeln!(out, "  {mark} {:>2}  {text}", item.id)?;
        }
        Ok(())
    }

    pub fn print_notifications<'a, W, I>(&self, out: &mut W, notifications: I, unread: usize) -> anyhow::Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'a Notification>,
    {
        writeln!(out, "Notifications ({unread} new)")?;
        let rows = notifications
            .into_iter()
            .map(|n| {
                vec![
                    self.paint(&n.id.to_string(), Tone::Warn),
                    if n.read { String::new() } else { "*".to_string() },
                    self.paint(&n.kind.to_string(), n.kind.tone()),
                    self.paint(n.priority.id(), n.priority.tone()),
                    n.title.clone(),
                    n.message.clone(),
                    n.timestamp.clone(),
                ]
            })
            .collect();

        write_table(out, headers(&["ID", "", "Type", "Priority", "Title", "Message", "When"]), rows)
    }

    pub fn print_todos<W: Write>(&self, out: &mut W, todos: &[&Todo], summary: Tally) -> anyhow::Result<()> {
        writeln!(
            out,
            "{}/{} completed  progress {}%",
            summary.completed, summary.total, summary.percent
        )?;
        let rows = todos
            .iter()
            .map(|t| {
                let text = if t.completed {
                    self.paint(&t.text, Tone::Muted)
                } else {
                    t.text.clone()
                };
                vec![
                    self.paint(&t.id.to_string(), Tone::Warn),
                    if t.completed { "[x]" } else { "[ ]" }.to_string(),
                    self.paint(t.category.label(), t.category.tone()),
                    self.paint(t.priority.id(), t.priority.tone()),
                    t.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                    text,
                ]
            })
            .collect();

        write_table(out, headers(&["ID", "Done", "Category", "Priority", "Due", "Task"]), rows)
    }

    pub fn print_tabs<W: Write>(&self, out: &mut W, current: Tab) -> anyhow::Result<()> {
        for tab in Tab::ALL {
            let marker = if tab == current { "*" } else { " " };
            writeln!(out, "{marker} {:<15} {}", tab.id(), tab.label())?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{}m{text}\x1b[0m", tone.ansi())
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

fn write_table<W: Write>(mut writer: W, headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{Renderer, Tone, progress_bar, strip_ansi, write_table};
    use crate::config::Config;
    use crate::console::Console;

    #[test]
    fn color_setting_uses_config_bool_words() {
        let mut cfg = Config::default();
        cfg.apply_overrides([("color".to_string(), "y".to_string())]);
        assert!(Renderer::new(&cfg).is_ok());

        cfg.apply_overrides([("rc.color".to_string(), "maybe".to_string())]);
        let err = Renderer::new(&cfg).expect_err("unknown color word");
        assert!(err.to_string().contains("invalid color setting: maybe"));
    }

    #[test]
    fn table_pads_to_visible_width() {
        let mut buf = Vec::new();
        write_table(
            &mut buf,
            vec!["ID".to_string(), "Route".to_string()],
            vec![vec!["\x1b[33mAC001\x1b[0m".to_string(), "JFK → LAX".to_string()]],
        )
        .expect("write table");
        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID    Route     ");
        assert_eq!(lines[1], "----- --------- ");
        assert_eq!(strip_ansi(lines[2]), "AC001 JFK → LAX ");
    }

    #[test]
    fn paint_respects_color_flag() {
        let plain = Renderer::plain();
        assert_eq!(plain.paint("x", Tone::Danger), "x");
        let colored = Renderer { color: true };
        assert_eq!(colored.paint("x", Tone::Danger), "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn progress_bar_rounds() {
        assert_eq!(progress_bar(0, 10), "..........");
        assert_eq!(progress_bar(65, 10), "#######...");
        assert_eq!(progress_bar(100, 4), "####");
    }

    #[test]
    fn checklist_view_lists_items() {
        let console = Console::sample();
        let checklist = console.checklists().get(3).expect("landing checklist");
        let mut buf = Vec::new();
        Renderer::plain().print_checklist(&mut buf, checklist).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("Landing Checklist [Boeing 777-300] 100% Completed"));
        assert_eq!(text.matches("[x]").count(), 4);
    }
}
