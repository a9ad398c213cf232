//! Command-line entry point.
//!
//! Thin integration layer between the terminal and the journal-scout
//! library: parses arguments, builds the [`Config`], installs logging and
//! drives a [`Session`].
//!
//! # Commands
//!
//! - `journals`: List the journal directory grouped by specialty
//! - `search`: Run one search, optionally sort, filter and export, then print the table
//! - `theme`: Show, toggle or set the persisted color scheme
//! - `interactive` (default): Prompt-driven session; see
//!   [`journal_scout::app::commands`] for the command language
//!
//! # Event Loop
//!
//! The interactive session multiplexes three sources with `tokio::select!`:
//!
//! ```text
//! stdin lines ──────────┐
//! search completions ───┼──→ Session::dispatch → render
//! autosearch timer ─────┘
//! ```

#![allow(clippy::multiple_crate_versions)]

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use journal_scout::app::commands::{form_summary, interpret, Command as PromptCommand, HELP};
use journal_scout::app::form::{FormInputs, LimitChoice, PeriodPreset};
use journal_scout::app::results::SortColumn;
use journal_scout::domain::Notice;
use journal_scout::export::ExportFormat;
use journal_scout::ui::ThemeMode;
use journal_scout::{initialize, Config, Event, ScoutError, Session};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Search scientific journal articles, sort and filter the results, export them",
    long_about = None
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override a configuration key (repeatable)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the searchable journals grouped by specialty
    Journals {
        /// Terminal width used for layout
        #[arg(long, default_value_t = default_cols())]
        cols: usize,
    },

    /// Run one search and print the result table
    Search(SearchArgs),

    /// Show or change the color scheme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },

    /// Prompt-driven session (default)
    Interactive {
        /// Query string to pre-fill the form from, e.g. "q=joelho"; triggers a search
        #[arg(long, value_name = "QUERY")]
        url_query: Option<String>,

        /// Terminal width used for layout
        #[arg(long, default_value_t = default_cols())]
        cols: usize,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Keywords
    #[arg(required = true, num_args = 1..)]
    keywords: Vec<String>,

    /// Author filter
    #[arg(short, long)]
    author: Option<String>,

    /// Period preset relative to today: 1m, 3m, 6m, 1y, 2y
    #[arg(short, long, default_value = "1y")]
    period: String,

    /// Period start (YYYY-MM-DD), overrides the preset
    #[arg(long, value_name = "DATE")]
    from: Option<String>,

    /// Period end (YYYY-MM-DD), overrides the preset
    #[arg(long, value_name = "DATE")]
    to: Option<String>,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<String>,

    /// Journal id to search (repeatable); default is every journal
    #[arg(short, long = "journal", value_name = "ID")]
    journals: Vec<String>,

    /// Sort column by key, label or position (repeat a column to reverse)
    #[arg(short, long, value_name = "COLUMN")]
    sort: Vec<String>,

    /// Filter text applied to the table
    #[arg(short, long)]
    filter: Option<String>,

    /// Export format: html, csv, txt, pdf, excel (repeatable)
    #[arg(short, long = "export", value_name = "FORMAT")]
    exports: Vec<String>,

    /// Terminal width used for layout
    #[arg(long, default_value_t = default_cols())]
    cols: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn default_cols() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .unwrap_or(120)
}

fn load_config(cli: &Cli) -> journal_scout::Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let overrides: BTreeMap<String, String> = cli.overrides.iter().cloned().collect();
    Ok(base.merge_map(&overrides))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("journal-scout: {e}");
            std::process::exit(2);
        }
    };
    journal_scout::observability::init_tracing(&config);

    tracing::debug!(?config, "configuration loaded");

    let result = match cli.command {
        Some(Command::Journals { cols }) => run_journals(&config, cols).await,
        Some(Command::Search(args)) => run_search(&config, args).await,
        Some(Command::Theme { action }) => run_theme(&config, action).await,
        Some(Command::Interactive { url_query, cols }) => {
            run_interactive(&config, url_query.as_deref(), cols).await
        }
        None => run_interactive(&config, None, default_cols()).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("journal-scout: {e}");
        std::process::exit(1);
    }
}

fn print_notices(session: &Session) {
    for notice in &session.state.notices {
        eprintln!("{notice}");
    }
}

async fn run_journals(config: &Config, cols: usize) -> journal_scout::Result<()> {
    let session = initialize(config).await?;
    print_notices(&session);
    print!(
        "{}",
        journal_scout::ui::render_directory(&session.state.directory, session.state.theme(), cols)
    );
    Ok(())
}

fn form_from_args(args: &SearchArgs) -> journal_scout::Result<FormInputs> {
    let today = Local::now().date_naive();
    let mut form = FormInputs::new(today);

    form.keywords = args.keywords.join(" ");
    form.author = args.author.clone().unwrap_or_default();

    let preset: PeriodPreset = args.period.parse().map_err(ScoutError::Config)?;
    form.apply_preset(preset, today);
    if let Some(from) = &args.from {
        form.period_start.clone_from(from);
    }
    if let Some(to) = &args.to {
        form.period_end.clone_from(to);
    }

    if let Some(limit) = &args.limit {
        form.limit = LimitChoice::Custom(limit.clone());
    }
    if !args.journals.is_empty() {
        form.journals.clone_from(&args.journals);
    }
    Ok(form)
}

async fn run_search(config: &Config, args: SearchArgs) -> journal_scout::Result<()> {
    let form = form_from_args(&args)?;
    let mut session = initialize(config).await?;

    session.dispatch(Event::SubmitSearch(form)).await?;
    session.settle().await?;

    for raw in &args.sort {
        let event = match raw.parse::<SortColumn>() {
            Ok(column) => Event::SortBy(column),
            Err(e) => Event::Notify(Notice::error(e)),
        };
        session.dispatch(event).await?;
    }

    if let Some(filter) = args.filter {
        session.dispatch(Event::Filter(filter)).await?;
    }

    for raw in &args.exports {
        let event = match raw.parse::<ExportFormat>() {
            Ok(format) => Event::ExportRequested(format),
            Err(e) => Event::Notify(Notice::error(e.to_string())),
        };
        session.dispatch(event).await?;
    }

    print!("{}", journal_scout::ui::render(&session.state, args.cols));
    Ok(())
}

async fn run_theme(config: &Config, action: ThemeAction) -> journal_scout::Result<()> {
    let mut session = initialize(config).await?;

    let event = match action {
        ThemeAction::Show => None,
        ThemeAction::Toggle => Some(Event::ToggleTheme),
        ThemeAction::Light => Some(Event::SetTheme(ThemeMode::Light)),
        ThemeAction::Dark => Some(Event::SetTheme(ThemeMode::Dark)),
    };
    if let Some(event) = event {
        session.dispatch(event).await?;
    }

    print_notices(&session);
    println!("{}", session.state.theme_mode);
    Ok(())
}

fn draw(session: &Session, form: &FormInputs, cols: usize) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(
        stdout,
        "\x1b[2J\x1b[H{}\n{}\n> ",
        journal_scout::ui::render(&session.state, cols),
        form_summary(form)
    )?;
    stdout.flush()
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{text}> ")?;
    stdout.flush()
}

async fn run_interactive(
    config: &Config,
    url_query: Option<&str>,
    cols: usize,
) -> journal_scout::Result<()> {
    let mut session = initialize(config).await?;
    let today = Local::now().date_naive();

    let mut form = url_query.map_or_else(
        || FormInputs::new(today),
        |query| FormInputs::from_query_string(query, today),
    );
    let mut autosearch = url_query
        .is_some()
        .then(|| form.clone())
        .filter(|f| !f.keywords.trim().is_empty());
    tracing::debug!(autosearch = autosearch.is_some(), "interactive session started");

    let timer = tokio::time::sleep(Duration::from_millis(config.autosearch_delay_ms));
    tokio::pin!(timer);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    draw(&session, &form, cols)?;

    loop {
        tokio::select! {
            () = &mut timer, if autosearch.is_some() => {
                if let Some(inputs) = autosearch.take() {
                    session.dispatch(Event::SubmitSearch(inputs)).await?;
                    draw(&session, &form, cols)?;
                }
            }

            Some(event) = session.next_completion() => {
                if session.dispatch(event).await? {
                    draw(&session, &form, cols)?;
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match interpret(&line, &mut form, today) {
                    None => draw(&session, &form, cols)?,
                    Some(PromptCommand::Quit) => break,
                    Some(PromptCommand::Dispatch(event)) => {
                        session.dispatch(event).await?;
                        draw(&session, &form, cols)?;
                    }
                    Some(PromptCommand::FormChanged) => draw(&session, &form, cols)?,
                    Some(PromptCommand::ShowJournals) => {
                        prompt(&journal_scout::ui::render_directory(
                            &session.state.directory,
                            session.state.theme(),
                            cols,
                        ))?;
                    }
                    Some(PromptCommand::Help) => prompt(&format!("{HELP}\n"))?,
                    Some(PromptCommand::Invalid(message)) => {
                        session.dispatch(Event::Notify(Notice::error(message))).await?;
                        draw(&session, &form, cols)?;
                    }
                }
            }
        }
    }

    tracing::debug!("interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_overrides_parse() {
        assert_eq!(
            parse_key_value("export_dir=/tmp/a=b"),
            Ok(("export_dir".to_string(), "/tmp/a=b".to_string()))
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn search_args_build_form() {
        let cli = Cli::parse_from([
            "journal-scout",
            "search",
            "lesão",
            "menisco",
            "--from",
            "2023-01-01",
            "--to",
            "2023-12-31",
            "-j",
            "ajr",
            "--limit",
            "5",
        ]);
        let Some(Command::Search(args)) = cli.command else {
            panic!("expected search command");
        };

        let form = form_from_args(&args).unwrap();
        assert_eq!(form.keywords, "lesão menisco");
        assert_eq!(form.period_start, "2023-01-01");
        assert_eq!(form.period_end, "2023-12-31");
        assert_eq!(form.journals, vec!["ajr"]);
        assert_eq!(form.limit.resolve(), 5);
    }
}
