use std::io::{BufRead, Write};

use anyhow::{Context, anyhow};
use tracing::{debug, info, instrument, warn};

use crate::cli::Invocation;
use crate::config::Config;
use crate::console::Console;
use crate::dashboard::Tab;
use crate::filter::TodoFilter;
use crate::render::Renderer;
use crate::todo::{Category, Priority};

/// What the shell does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "dashboard",
        "show",
        "tabs",
        "flights",
        "checklists",
        "checklist",
        "check",
        "notifications",
        "read",
        "dismiss",
        "todos",
        "add",
        "toggle",
        "delete",
        "export",
        "help",
        "version",
        "quit",
        "exit",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

#[instrument(skip(console, cfg, renderer, out))]
pub fn dispatch<W: Write>(
    console: &mut Console,
    cfg: &Config,
    renderer: &Renderer,
    inv: &Invocation,
    out: &mut W,
) -> anyhow::Result<Flow> {
    let args = inv.args.as_slice();
    debug!(command = %inv.command, ?args, "dispatching command");

    match inv.command.as_str() {
        "dashboard" => show_tab(console, renderer, Tab::Dashboard, &[], out)?,
        "show" => {
            let tab = match args.first() {
                Some(id) => Tab::from_id(id),
                None => cfg.default_tab(),
            };
            show_tab(console, renderer, tab, args.get(1..).unwrap_or_default(), out)?;
        }
        "tabs" => renderer.print_tabs(out, cfg.default_tab())?,
        "flights" => show_tab(console, renderer, Tab::FlightTracker, args, out)?,
        "checklists" => show_tab(console, renderer, Tab::Checklists, &[], out)?,
        "checklist" => cmd_checklist(console, renderer, args, out)?,
        "check" => cmd_check(console, renderer, args, out)?,
        "notifications" => show_tab(console, renderer, Tab::Notifications, &[], out)?,
        "read" => cmd_read(console, args, out)?,
        "dismiss" => {
            let id = parse_id(args.first(), "notification id")?;
            console.dismiss(id);
            writeln!(out, "{} unread", console.notifications().unread_count())?;
        }
        "todos" => show_tab(console, renderer, Tab::Todos, args, out)?,
        "add" => cmd_add(console, cfg, args, out)?,
        "toggle" => {
            let id = parse_id(args.first(), "todo id")?;
            console.toggle_todo(id);
            writeln!(out, "{}", console.todos().summary())?;
        }
        "delete" => {
            let id = parse_id(args.first(), "todo id")?;
            console.delete_todo(id);
            writeln!(out, "{}", console.todos().summary())?;
        }
        "export" => cmd_export(console, out)?,
        "help" => cmd_help(out)?,
        "version" => writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?,
        "quit" | "exit" => return Ok(Flow::Quit),
        other => return Err(anyhow!("unknown command: {other}")),
    }

    Ok(Flow::Continue)
}

/// Reads commands line by line until
/// `quit`, `exit` or end of input. A
/// failing line is reported and the
/// shell keeps going.
#[instrument(skip_all)]
pub fn run_shell<R: BufRead, W: Write>(
    console: &mut Console,
    cfg: &Config,
    renderer: &Renderer,
    input: R,
    out: &mut W,
    prompt: Option<&str>,
) -> anyhow::Result<()> {
    info!("starting console shell");
    let mut lines = input.lines();

    loop {
        if let Some(prompt) = prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            debug!("end of input");
            break;
        };
        let line = line.context("failed to read command line")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = Invocation::parse_line(line).and_then(|inv| match inv {
            Some(inv) => dispatch(console, cfg, renderer, &inv, out),
            None => Ok(Flow::Continue),
        });

        match result {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => {
                warn!(error = %err, line, "command failed");
                writeln!(out, "error: {err:#}")?;
            }
        }
    }

    info!("console shell finished");
    Ok(())
}

fn show_tab<W: Write>(
    console: &Console,
    renderer: &Renderer,
    tab: Tab,
    args: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    debug!(tab = tab.id(), "showing tab");
    match tab {
        Tab::Dashboard => renderer.print_dashboard(out, &console.summary(), console.flights(), console.systems()),
        Tab::FlightTracker => {
            let query = args.join(" ");
            let flights = console.search_flights(&query);
            renderer.print_flights(out, &flights)
        }
        Tab::Checklists => renderer.print_checklists(out, console.checklists().iter()),
        Tab::Notifications => renderer.print_notifications(
            out,
            console.notifications().iter(),
            console.notifications().unread_count(),
        ),
        Tab::Todos => {
            let filter = TodoFilter::parse(args)?;
            let todos = console.search_todos(&filter);
            renderer.print_todos(out, &todos, console.todos().summary())
        }
    }
}

fn cmd_checklist<W: Write>(
    console: &Console,
    renderer: &Renderer,
    args: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    let id = parse_id(args.first(), "checklist id")?;
    let checklist = console
        .checklists()
        .get(id)
        .ok_or_else(|| anyhow!("no checklist with id {id}"))?;
    renderer.print_checklist(out, checklist)
}

#[instrument(skip(console, renderer, out))]
fn cmd_check<W: Write>(
    console: &mut Console,
    renderer: &Renderer,
    args: &[String],
    out: &mut W,
) -> anyhow::Result<()> {
    let checklist_id = parse_id(args.first(), "checklist id")?;
    let item_id = parse_id(args.get(1), "item id")?;
    console.toggle_item(checklist_id, item_id);

    match console.checklists().get(checklist_id) {
        Some(checklist) => renderer.print_checklist(out, checklist),
        None => Ok(()),
    }
}

fn cmd_read<W: Write>(console: &mut Console, args: &[String], out: &mut W) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        Some("all") => console.mark_all_as_read(),
        other => {
            let id = parse_id(args.first(), "notification id").with_context(|| {
                format!("expected a notification id or `all`, got {}", other.unwrap_or("nothing"))
            })?;
            console.mark_as_read(id);
        }
    }
    writeln!(out, "{} unread", console.notifications().unread_count())?;
    Ok(())
}

/// `add [cat:<category>] [pri:<priority>] <text...>`
#[instrument(skip(console, cfg, out))]
fn cmd_add<W: Write>(console: &mut Console, cfg: &Config, args: &[String], out: &mut W) -> anyhow::Result<()> {
    let mut category: Category = cfg.todo_category()?;
    let mut priority: Priority = cfg.todo_priority()?;
    let mut words = Vec::with_capacity(args.len());

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            match key.to_ascii_lowercase().as_str() {
                "cat" | "category" => {
                    category = value.parse()?;
                    continue;
                }
                "pri" | "priority" => {
                    priority = value.parse()?;
                    continue;
                }
                _ => {}
            }
        }
        words.push(arg.as_str());
    }

    match console.add_todo(&words.join(" "), category, priority) {
        Some(id) => writeln!(out, "added todo {id}")?,
        None => debug!("empty todo text; nothing added"),
    }
    Ok(())
}

fn cmd_export<W: Write>(console: &Console, out: &mut W) -> anyhow::Result<()> {
    let snapshot = console.snapshot();
    serde_json::to_writer_pretty(&mut *out, &snapshot).context("failed to serialize snapshot")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(
        out,
        "\
dashboard                         fleet summary and system status
show [tab]                        show a tab (dashboard, flight-tracker, checklists, notifications, todos)
tabs                              list tabs
flights [query]                   flights matching id, callsign, origin or destination
checklists                        checklist progress
checklist <id>                    items of one checklist
check <checklist-id> <item-id>    toggle a checklist item
notifications                     notification list
read <id>|all                     mark notifications read
dismiss <id>                      remove a notification
todos [cat:c] [pri:p] [+done|-done] [words]
add [cat:c] [pri:p] <text>        add a todo
toggle <id>                       toggle a todo
delete <id>                       delete a todo
export                            JSON snapshot of every view
version                           print version
quit | exit                       leave the shell"
    )?;
    Ok(())
}

fn parse_id(raw: Option<&String>, what: &str) -> anyhow::Result<u64> {
    let raw = raw.ok_or_else(|| anyhow!("missing {what}"))?;
    raw.parse::<u64>().with_context(|| format!("invalid {what}: {raw}"))
}
