use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

use crate::dashboard::Tab;
use crate::todo::{
  Category,
  Priority
};

pub const RC_ENV: &str = "FLIGHTDECKRC";
pub const RC_FILE: &str = ".flightdeckrc";

#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    for (key, value) in [
      ("color", "on"),
      ("default.tab", "dashboard"),
      ("todo.category", "general"),
      ("todo.priority", "medium"),
      ("shell.prompt", "flightdeck> ")
    ] {
      map.insert(
        key.to_string(),
        value.to_string()
      );
    }
    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading flightdeckrc");
      cfg.load_file(&path, &mut Vec::new())?;
    } else {
      debug!(
        "no flightdeckrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  /// `None` when unset, an error when
  /// the value is not a recognised
  /// boolean word.
  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    self
      .map
      .get(key)
      .map(|v| {
        parse_bool(v).ok_or_else(|| {
          anyhow!("invalid {key} setting: {v}")
        })
      })
      .transpose()
  }

  pub fn default_tab(&self) -> Tab {
    self
      .get("default.tab")
      .map(|id| Tab::from_id(&id))
      .unwrap_or_default()
  }

  pub fn todo_category(
    &self
  ) -> anyhow::Result<Category> {
    match self.get("todo.category") {
      Some(value) => value
        .parse()
        .context("invalid todo.category"),
      None => Ok(Category::default())
    }
  }

  pub fn todo_priority(
    &self
  ) -> anyhow::Result<Priority> {
    match self.get("todo.priority") {
      Some(value) => value
        .parse()
        .context("invalid todo.priority"),
      None => Ok(Priority::default())
    }
  }

  pub fn seed_location(
    &self
  ) -> Option<PathBuf> {
    self
      .get("seed.location")
      .filter(|v| !v.trim().is_empty())
      .map(|v| expand_tilde(Path::new(&v)))
  }

  pub fn prompt(&self) -> String {
    self
      .get("shell.prompt")
      .unwrap_or_else(|| {
        "flightdeck> ".to_string()
      })
  }

  /// `stack` holds the files currently
  /// being read, outermost first.
  #[tracing::instrument(skip(
    self, stack
  ))]
  fn load_file(
    &mut self,
    path: &Path,
    stack: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    if stack.contains(&path) {
      return Err(anyhow!(
        "include cycle at {}",
        path.display()
      ));
    }

    stack.push(path.clone());
    let result =
      self.read_rc(&path, stack);
    stack.pop();
    result
  }

  fn read_rc(
    &mut self,
    path: &Path,
    stack: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.to_path_buf());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let line =
        strip_comment(raw_line).trim();
      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path, stack)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = unquote(v.trim()).to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var(RC_ENV)
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping rc file"
    );
    return Ok(None);
  };
  let candidate = home.join(RC_FILE);
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    "1" | "y" | "yes" | "on" | "true" => {
      Some(true)
    }
    "0" | "n" | "no" | "off" | "false" => {
      Some(false)
    }
    _ => None
  }
}

/// Cuts a `#` comment that starts the
/// line or follows whitespace, outside
/// double quotes.
fn strip_comment(line: &str) -> &str {
  let mut quoted = false;
  let mut prev_blank = true;
  for (idx, ch) in line.char_indices() {
    match ch {
      '"' => quoted = !quoted,
      '#' if !quoted && prev_blank => {
        return &line[..idx];
      }
      _ => {}
    }
    prev_blank = ch.is_whitespace();
  }
  line
}

/// `"fd> "` keeps its inner text
/// verbatim, spaces included.
fn unquote(value: &str) -> &str {
  value
    .strip_prefix('"')
    .and_then(|v| v.strip_suffix('"'))
    .unwrap_or(value)
}
