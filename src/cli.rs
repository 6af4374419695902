use crate::{config::Config, harvest};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dph_core::{
    entities::Category,
    usecases::{self, LocationFilter, MergeDefaults},
};
use std::{path::PathBuf, process};
use thiserror::Error;

const EXIT_FAILURE: i32 = 1;

const FETCH_USAGE: &str = "\
Usage: date-planner-harvest fetch <QUERY_FILE>
Example: date-planner-harvest fetch harvest/queries/berlin-cinemas.overpassql";

const PREVIEW_USAGE: &str = "\
Usage: date-planner-harvest preview <RAW_CAPTURE>
Example: date-planner-harvest preview harvest/output/raw/osm/2025-08-10/berlin-cinemas.raw.json";

const WRITE_FROM_RAW_USAGE: &str = "\
Usage: date-planner-harvest write-from-raw <RAW_CAPTURE> [--default-country=NG] [--default-city=Lagos]";

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send an Overpass query and store the raw response of today
    Fetch {
        /// File with the Overpass QL query
        #[arg(value_name = "QUERY_FILE")]
        query_file: Option<PathBuf>,
    },
    /// Show the first locations of a raw capture without storing them
    Preview {
        #[arg(value_name = "RAW_CAPTURE")]
        raw_capture: Option<PathBuf>,
    },
    /// Merge the locations of a raw capture into the location collection
    WriteFromRaw {
        #[arg(value_name = "RAW_CAPTURE")]
        raw_capture: Option<PathBuf>,
        /// Country code for locations without a country
        #[arg(long, value_name = "CODE")]
        default_country: Option<String>,
        /// City for locations without a city
        #[arg(long, value_name = "NAME")]
        default_city: Option<String>,
    },
    /// List the stored locations
    List {
        #[arg(long, value_name = "CODE")]
        country: Option<String>,
        #[arg(long, value_name = "NAME")]
        city: Option<String>,
        /// "Dining", "Movies" or "Museums/Exhibitions" (repeatable)
        #[arg(long = "category", value_name = "TYPE")]
        categories: Vec<Category>,
    },
}

/// A required argument is missing.
#[derive(Debug, Error)]
#[error("{0}")]
struct UsageError(&'static str);

/// The text printed on stderr before exiting with [`EXIT_FAILURE`].
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<UsageError>() {
        Some(usage) => usage.to_string(),
        None => format!("Error: {err:#}"),
    }
}

pub fn run() {
    let args = Args::parse();

    let cfg = match Config::try_load_from_file_or_default(args.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Invalid configuration: {err:#}");
            process::exit(EXIT_FAILURE)
        }
    };

    if let Err(err) = run_command(&cfg, args.command) {
        log::debug!("{err:?}");
        eprintln!("{}", error_message(&err));
        process::exit(EXIT_FAILURE)
    }
}

fn run_command(cfg: &Config, command: Command) -> Result<()> {
    match command {
        Command::Fetch { query_file } => {
            let Some(query_file) = query_file else {
                return Err(UsageError(FETCH_USAGE).into());
            };
            let report = harvest::fetch(cfg, &query_file, harvest::now())?;
            println!(
                "Saved {} elements → {}",
                report.element_count, report.capture
            );
        }
        Command::Preview { raw_capture } => {
            let Some(raw_capture) = raw_capture else {
                return Err(UsageError(PREVIEW_USAGE).into());
            };
            let preview = harvest::preview(cfg, &raw_capture)?;
            println!("{}", harvest::to_pretty_json(&preview.sample)?);
            println!(
                "\nPreviewed {} of {} total transformed locations.",
                preview.sample.len(),
                preview.total
            );
        }
        Command::WriteFromRaw {
            raw_capture,
            default_country,
            default_city,
        } => {
            let Some(raw_capture) = raw_capture else {
                return Err(UsageError(WRITE_FROM_RAW_USAGE).into());
            };
            let defaults = MergeDefaults {
                country: default_country,
                city: default_city,
            };
            let report = harvest::write_from_raw(cfg, &raw_capture, &defaults, harvest::now())?;
            if let Some(backup) = &report.backup {
                println!("Backup created: {backup}");
            }
            println!("Transformed {} locations", report.transformed);
            println!(
                "Wrote {} total → {}",
                report.total,
                cfg.storage.locations_file.display()
            );
        }
        Command::List {
            country,
            city,
            categories,
        } => {
            let filter = LocationFilter {
                country,
                city,
                categories,
            };
            let locations = harvest::list(cfg, &filter)?;
            println!("{}", harvest::to_pretty_json(&locations)?);
            println!(
                "\n{} locations in {} ({})",
                locations.len(),
                usecases::cities(&locations, None).join(", "),
                usecases::countries(&locations).join(", ")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_write_from_raw() {
        let args = Args::try_parse_from([
            "date-planner-harvest",
            "write-from-raw",
            "capture.raw.json",
            "--default-country=NG",
            "--default-city=Lagos",
        ])
        .unwrap();
        match args.command {
            Command::WriteFromRaw {
                raw_capture,
                default_country,
                default_city,
            } => {
                assert_eq!(raw_capture, Some(PathBuf::from("capture.raw.json")));
                assert_eq!(default_country.as_deref(), Some("NG"));
                assert_eq!(default_city.as_deref(), Some("Lagos"));
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn missing_positional_is_not_a_parse_error() {
        let args = Args::try_parse_from(["date-planner-harvest", "fetch"]).unwrap();
        assert!(matches!(args.command, Command::Fetch { query_file: None }));
    }

    fn default_config() -> Config {
        let dir = tempfile::tempdir().unwrap();
        Config::try_load_from_file_or_default(Some(dir.path().join("missing.toml"))).unwrap()
    }

    #[test]
    fn missing_positional_prints_usage() {
        let cfg = default_config();
        for (command, usage) in [
            (Command::Fetch { query_file: None }, FETCH_USAGE),
            (Command::Preview { raw_capture: None }, PREVIEW_USAGE),
            (
                Command::WriteFromRaw {
                    raw_capture: None,
                    default_country: None,
                    default_city: None,
                },
                WRITE_FROM_RAW_USAGE,
            ),
        ] {
            let err = run_command(&cfg, command).unwrap_err();
            assert_eq!(error_message(&err), usage);
        }
    }

    #[test]
    fn other_errors_are_prefixed() {
        let cfg = default_config();
        let err = run_command(
            &cfg,
            Command::Preview {
                raw_capture: Some(PathBuf::from("does/not/exist.raw.json")),
            },
        )
        .unwrap_err();
        assert!(error_message(&err).starts_with("Error: Unable to read raw capture"));
    }

    #[test]
    fn parse_categories() {
        let args = Args::try_parse_from([
            "date-planner-harvest",
            "list",
            "--category",
            "Movies",
            "--category=Museums/Exhibitions",
        ])
        .unwrap();
        let Command::List { categories, .. } = args.command else {
            panic!("unexpected command");
        };
        assert_eq!(
            categories,
            vec![Category::Movies, Category::MuseumsExhibitions]
        );
        assert!(Args::try_parse_from(["date-planner-harvest", "list", "--category", "Hotels"]).is_err());
    }
}
