//! Commands of the interactive view. Every line typed by the user becomes one
//! action, executed to completion before the next line is read.

use crate::cli_style::{
    get_styles, print_empty_list, print_error, print_info, print_key_value, print_list_item,
    print_section_footer, print_section_header, print_success, print_warning, MovieTable,
};
use crate::filter::FilterState;
use crate::view::{ActionEffect, ReadyView, ViewAction, ViewController, ViewState};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(styles=get_styles(), name = "")]
pub struct InnerCli {
    #[command(subcommand)]
    pub command: InnerCommand,
}

#[derive(Subcommand, Debug)]
pub enum InnerCommand {
    /// Filters the catalog and opens the report of the matching movies.
    /// Without options every movie matches.
    Apply {
        /// Part of the genre, case is ignored.
        #[clap(short, long)]
        genre: Option<String>,

        /// Exact release year.
        #[clap(short, long)]
        year: Option<i32>,
    },

    /// Removes the filters and opens the report again, now empty.
    Clear,

    /// Saves the filtered movies to a spreadsheet, or the whole catalog
    /// when nothing is filtered.
    Export,

    /// Shows the genres and release years available for filtering.
    Facets,

    /// Shows the movies matching the current filters.
    List,

    /// Shows the view state and the current filters.
    Status,

    /// Close this program.
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

/// Parse and run one command line against the view.
pub fn execute_command(
    line: &str,
    state: ViewState,
    controller: &ViewController,
) -> (ViewState, CommandExecutionResult) {
    let line = line.trim();
    if line.is_empty() {
        return (state, CommandExecutionResult::Ok);
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let command = match cli {
        Ok(cli) => cli.command,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    if e.print().is_err() {
                        println!("{}", e);
                    }
                    (state, CommandExecutionResult::Ok)
                }
                _ => (state, CommandExecutionResult::Error(e.to_string())),
            };
        }
    };

    match command {
        InnerCommand::Apply { genre, year } => run_action(
            state,
            controller,
            ViewAction::ApplyFilters(FilterState::new(genre, year)),
        ),
        InnerCommand::Clear => run_action(state, controller, ViewAction::ClearFilters),
        InnerCommand::Export => run_action(state, controller, ViewAction::Export),
        InnerCommand::Facets => {
            let result = with_ready(&state, print_facets);
            (state, result)
        }
        InnerCommand::List => {
            let result = with_ready(&state, print_filtered);
            (state, result)
        }
        InnerCommand::Status => {
            print_status(&state);
            (state, CommandExecutionResult::Ok)
        }
        InnerCommand::Exit => (state, CommandExecutionResult::Exit),
    }
}

fn run_action(
    state: ViewState,
    controller: &ViewController,
    action: ViewAction,
) -> (ViewState, CommandExecutionResult) {
    let transition = controller.handle(state, action);
    let result = match transition.outcome {
        Ok(ActionEffect::ReportOpened { path, rows }) => {
            if rows == 0 {
                print_warning("No movies selected, the report only has its header row");
            }
            print_success(&format!("Report with {} movies at {}", rows, path.display()));
            CommandExecutionResult::Ok
        }
        Ok(ActionEffect::Exported { path, rows }) => {
            print_success(&format!("Exported {} movies to {}", rows, path.display()));
            CommandExecutionResult::Ok
        }
        Err(err) => CommandExecutionResult::Error(err.to_string()),
    };
    (transition.state, result)
}

fn with_ready(state: &ViewState, f: fn(&ReadyView)) -> CommandExecutionResult {
    match state.ready() {
        Some(ready) => {
            f(ready);
            CommandExecutionResult::Ok
        }
        None => CommandExecutionResult::Error(format!("The view is {}", state.name())),
    }
}

fn print_facets(ready: &ReadyView) {
    print_section_header("Genres");
    if ready.facets.genres.is_empty() {
        print_empty_list("(no genres)");
    }
    for genre in &ready.facets.genres {
        print_list_item(genre, 0);
    }
    print_section_footer();

    print_section_header("Release years");
    if ready.facets.years.is_empty() {
        print_empty_list("(no years)");
    }
    for year in &ready.facets.years {
        print_list_item(&year.to_string(), 0);
    }
    print_section_footer();
}

fn print_filtered(ready: &ReadyView) {
    if ready.filtered.is_empty() {
        print_empty_list("No movies selected, use `apply` to filter the catalog.");
        return;
    }
    MovieTable::from_movies(&ready.filtered).print();
}

pub fn print_status(state: &ViewState) {
    print_section_header("Status");
    print_key_value("State", state.name());
    match state {
        ViewState::Ready(ready) => {
            print_key_value("Movies", &ready.catalog.len().to_string());
            print_key_value(
                "Genre filter",
                ready.filter.genre.as_deref().unwrap_or("(none)"),
            );
            print_key_value(
                "Year filter",
                &ready
                    .filter
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            );
            print_key_value("Selected", &ready.filtered.len().to_string());
        }
        ViewState::Error(err) => print_error(&err.to_string()),
        ViewState::Loading => print_info("Waiting for the catalog"),
    }
    print_section_footer();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn setup() -> (tempfile::TempDir, ViewController, ViewState) {
        let dir = tempfile::tempdir().unwrap();
        let controller =
            ViewController::with_file_delivery(dir.path(), false, "Report".to_string());
        let state = ViewState::loaded(Ok(Catalog::sample()));
        (dir, controller, state)
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let (_dir, controller, state) = setup();
        let (_, result) = execute_command("   ", state, &controller);
        assert_eq!(result, CommandExecutionResult::Ok);
    }

    #[test]
    fn apply_with_quoted_genre() {
        let (dir, controller, state) = setup();
        let (state, result) = execute_command("apply --genre 'rom' -y 2001", state, &controller);
        assert_eq!(result, CommandExecutionResult::Ok);
        let ready = state.ready().unwrap();
        assert_eq!(ready.filtered.len(), 1);
        assert_eq!(ready.filter.year, Some(2001));
        assert!(dir.path().join("reporte_peliculas.pdf").exists());
    }

    #[test]
    fn clear_then_export_writes_full_catalog() {
        let (dir, controller, state) = setup();
        let (state, _) = execute_command("apply -g action", state, &controller);
        let (state, _) = execute_command("clear", state, &controller);
        assert!(state.ready().unwrap().filtered.is_empty());

        let (_, result) = execute_command("export", state, &controller);
        assert_eq!(result, CommandExecutionResult::Ok);
        assert!(dir.path().join("reporte_peliculas.xlsx").exists());
    }

    #[test]
    fn unknown_command_is_an_error() {
        let (_dir, controller, state) = setup();
        let (_, result) = execute_command("rewind", state, &controller);
        assert!(matches!(result, CommandExecutionResult::Error(_)));
    }

    #[test]
    fn invalid_year_is_an_error() {
        let (_dir, controller, state) = setup();
        let (state, result) = execute_command("apply --year soon", state, &controller);
        assert!(matches!(result, CommandExecutionResult::Error(_)));
        assert!(state.ready().unwrap().filter.is_empty());
    }

    #[test]
    fn listing_needs_a_ready_view() {
        let (_dir, controller, _) = setup();
        let (_, result) = execute_command("list", ViewState::Loading, &controller);
        assert_eq!(
            result,
            CommandExecutionResult::Error("The view is loading".to_string())
        );
    }

    #[test]
    fn read_only_commands_keep_state() {
        let (_dir, controller, state) = setup();
        let (state, _) = execute_command("facets", state, &controller);
        let (state, _) = execute_command("list", state, &controller);
        let (state, _) = execute_command("status", state, &controller);
        assert!(state.ready().unwrap().filtered.is_empty());
    }

    #[test]
    fn exit_command() {
        let (_dir, controller, state) = setup();
        let (_, result) = execute_command("exit", state, &controller);
        assert_eq!(result, CommandExecutionResult::Exit);
    }
}
