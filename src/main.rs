use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_report::cli_style::{
    get_prompt, get_styles, print_error, print_key_value, print_list_item, print_section_footer,
    print_section_header,
};
use movie_report::config::{resolve_path, AppConfig, CliConfig, FileConfig};
use movie_report::shell::{execute_command, print_status, CommandExecutionResult, InnerCli};
use movie_report::{fetch_catalog, ViewController, ViewState};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Catalog document, a local JSON file or an http(s) URL.
    pub source: Option<String>,

    /// Path to a TOML config file, its values override the command line.
    #[clap(long, value_parser = resolve_path)]
    pub config: Option<PathBuf>,

    /// Directory where reports and exports are written.
    #[clap(long, default_value = ".", value_parser = resolve_path)]
    pub output_dir: PathBuf,

    /// Only save rendered reports, do not open them in the system viewer.
    #[clap(long)]
    pub no_open: bool,

    /// Heading of the PDF report.
    #[clap(long)]
    pub title: Option<String>,

    /// Timeout in seconds for URL sources, 0 disables it.
    #[clap(long, default_value_t = 30)]
    pub fetch_timeout_sec: u64,

    /// Load the catalog, print its facets and exit.
    #[clap(long)]
    pub check_only: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            source: self.source.clone(),
            output_dir: self.output_dir.clone(),
            open_reports: !self.no_open,
            report_title: self.title.clone(),
            fetch_timeout_sec: self.fetch_timeout_sec,
        }
    }
}

#[derive(rustyline_derive::Hinter)]
struct ShellHelper {
    commands_names: Vec<String>,
}

impl ShellHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        ShellHelper { commands_names }
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

fn print_check(state: &ViewState) {
    if let Some(ready) = state.ready() {
        print_section_header("Catalog");
        print_key_value("Movies", &ready.catalog.len().to_string());
        print_key_value("Genres", &ready.facets.genres.len().to_string());
        for genre in &ready.facets.genres {
            print_list_item(genre, 1);
        }
        print_key_value("Release years", &ready.facets.years.len().to_string());
        for year in &ready.facets.years {
            print_list_item(&year.to_string(), 1);
        }
        print_section_footer();
    }
}

fn run_shell(mut state: ViewState, controller: &ViewController) -> Result<()> {
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<ShellHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(ShellHelper::new()));

    let prompt = get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let (next, result) = execute_command(&line, state, controller);
                state = next;
                match result {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)
        .context("Invalid configuration")?;
    info!("Reports and exports go to {:?}", config.output_dir);

    let state = ViewState::loaded(fetch_catalog(&config.source, &config.fetch_options()).await);
    if let ViewState::Error(err) = &state {
        print_status(&state);
        bail!("Could not load the catalog from {}: {}", config.source, err);
    }

    if cli_args.check_only {
        print_check(&state);
        return Ok(());
    }

    let controller = ViewController::with_file_delivery(
        config.output_dir.clone(),
        config.open_reports,
        config.report_title.clone(),
    );
    run_shell(state, &controller)
}
