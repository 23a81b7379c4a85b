//! Drives the interactive commands from a TOML config and a catalog file on
//! disk, the way the binary does.

use movie_report::config::{AppConfig, CliConfig, FileConfig};
use movie_report::fetch_catalog;
use movie_report::shell::{execute_command, CommandExecutionResult};
use movie_report::view::{ViewController, ViewState};
use std::path::Path;

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let catalog_path = dir.join("peliculas.json");
    std::fs::write(
        &catalog_path,
        r#"[
            { "titulo": "Heat", "genero": "Crime", "lanzamiento": 1995 },
            { "titulo": "Fargo", "genero": "Crime Drama", "lanzamiento": 1996 },
            { "titulo": "Toy Story", "genero": "Animation", "lanzamiento": 1995 }
        ]"#,
    )
    .unwrap();

    let config_path = dir.join("movie-report.toml");
    std::fs::write(
        &config_path,
        format!(
            "source = {:?}\noutput_dir = {:?}\nopen_reports = false\n\n[report]\ntitle = \"Crime\"\n",
            catalog_path.display().to_string(),
            dir.join("out").display().to_string()
        ),
    )
    .unwrap();
    config_path
}

#[tokio::test]
async fn test_session_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_fixture(dir.path());

    let file_config = FileConfig::load(&config_path).unwrap();
    let config = AppConfig::resolve(&CliConfig::default(), Some(file_config)).unwrap();
    assert_eq!(config.report_title, "Crime");
    assert!(!config.open_reports);

    let state = ViewState::loaded(fetch_catalog(&config.source, &config.fetch_options()).await);
    let controller = ViewController::with_file_delivery(
        config.output_dir.clone(),
        config.open_reports,
        config.report_title.clone(),
    );

    let (state, result) = execute_command("apply --genre crime --year 1995", state, &controller);
    assert_eq!(result, CommandExecutionResult::Ok);
    let titles: Vec<String> = state
        .ready()
        .unwrap()
        .filtered
        .iter()
        .map(|m| m.title.clone())
        .collect();
    assert_eq!(titles, vec!["Heat"]);

    let (state, result) = execute_command("apply -y 1995", state, &controller);
    assert_eq!(result, CommandExecutionResult::Ok);
    assert_eq!(state.ready().unwrap().filtered.len(), 2);

    let (state, result) = execute_command("export", state, &controller);
    assert_eq!(result, CommandExecutionResult::Ok);
    assert!(dir.path().join("out").join("reporte_peliculas.xlsx").exists());
    assert!(dir.path().join("out").join("reporte_peliculas.pdf").exists());

    let (state, result) = execute_command("clear", state, &controller);
    assert_eq!(result, CommandExecutionResult::Ok);
    let ready = state.ready().unwrap();
    assert!(ready.filter.is_empty());
    assert!(ready.filtered.is_empty());
    assert_eq!(ready.facets.years, vec![1995, 1996]);
}

#[tokio::test]
async fn test_missing_catalog_file_blocks_every_command() {
    let dir = tempfile::tempdir().unwrap();
    let cli = CliConfig {
        source: Some(dir.path().join("nope.json").display().to_string()),
        output_dir: dir.path().join("out"),
        ..CliConfig::default()
    };
    let config = AppConfig::resolve(&cli, None).unwrap();
    let state = ViewState::loaded(fetch_catalog(&config.source, &config.fetch_options()).await);
    let controller =
        ViewController::with_file_delivery(config.output_dir.clone(), false, "t".to_string());

    let (state, result) = execute_command("apply -g crime", state, &controller);
    assert!(matches!(result, CommandExecutionResult::Error(_)));
    let (_, result) = execute_command("facets", state, &controller);
    assert!(matches!(result, CommandExecutionResult::Error(_)));
    assert!(!dir.path().join("out").exists());
}
