pub mod checklist;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod filter;
pub mod flight;
pub mod notification;
pub mod progress;
pub mod render;
pub mod seed;
pub mod todo;

use std::ffi::OsString;
use std::io::{
  self,
  IsTerminal
};

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting flightdeck"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.flightdeckrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let seed_path = cli
    .seed
    .clone()
    .or_else(|| cfg.seed_location());
  let mut console = match seed_path {
    Some(path) => {
      console::Console::from_seed_file(
        &path
      )
      .context(
        "failed to load console seed"
      )?
    }
    None => console::Console::sample()
  };

  let renderer =
    render::Renderer::new(&cfg)?;
  let tokens: Vec<String> = cli
    .rest
    .iter()
    .map(|arg| {
      arg.to_string_lossy().to_string()
    })
    .collect();

  let mut out = io::stdout().lock();
  match cli::Invocation::parse(&tokens)? {
    Some(inv) => {
      commands::dispatch(
        &mut console,
        &cfg,
        &renderer,
        &inv,
        &mut out
      )?;
    }
    None => {
      let stdin = io::stdin();
      let prompt = cfg.prompt();
      let prompt = stdin
        .is_terminal()
        .then_some(prompt.as_str());
      commands::run_shell(
        &mut console,
        &cfg,
        &renderer,
        stdin.lock(),
        &mut out,
        prompt
      )?;
    }
  }

  info!("done");
  Ok(())
}
