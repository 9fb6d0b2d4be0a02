//! tabclean CLI
//!
//! Removes rows with Chinese text from CSV datasets and sorts them by title

mod config;
mod progress;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use std::process::ExitCode;
use tabclean_core::pipeline::{DEFAULT_FILTERED, DEFAULT_INPUT, DEFAULT_OUTPUT};
use tabclean_core::{
    filter_chinese_records_with, run_pipeline_with, sort_by_column, SortConfig, StageOptions,
    DEFAULT_SORT_COLUMN,
};
use tabclean_filters::ChineseFilterConfig;
use tabclean_formats::{open_dataset, CsvConfig};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::PipelineConfig;
use progress::ProgressReporter;

#[derive(Parser)]
#[command(name = "tabclean")]
#[command(version, about = "Filter Chinese-text rows out of CSV datasets and sort them by title", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output reports in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Field delimiter (ASCII)
    #[arg(short, long, global = true)]
    delimiter: Option<char>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove records with Chinese characters in any column
    FilterChinese {
        /// Input file (CSV or gzipped CSV)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_FILTERED)]
        output: PathBuf,

        /// Only check these columns (comma-separated, defaults to all)
        #[arg(short, long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Sort records by a text column (A-Z by code point)
    Sort {
        /// Input file
        #[arg(short, long, default_value = DEFAULT_FILTERED)]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Column to sort by
        #[arg(short = 'k', long, default_value = DEFAULT_SORT_COLUMN)]
        column: String,

        /// Sort Z-A
        #[arg(long)]
        descending: bool,

        /// Show statistics without writing output
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the filter, then sort its output
    Pipeline {
        /// Input file [default: shopee.csv]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Intermediate file written by the filter and read by the sort [default: output_filtered.csv]
        #[arg(short, long)]
        filtered: Option<PathBuf>,

        /// Final output file [default: output_sorted.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pipeline config file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default pipeline config file
    InitConfig {
        /// Destination (.yaml, .yml or .toml)
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Inspect a dataset file
    Inspect {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Count records in a dataset
    Count {
        /// Path to the dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for reports
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json) // Disable colors if JSON output
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match run(cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("An error occurred: {:#}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    let delimiter = cli.delimiter;

    match cli.command {
        Commands::FilterChinese {
            input,
            output,
            columns,
            dry_run,
        } => filter_chinese(input, output, columns, dry_run, csv_config(delimiter), json),
        Commands::Sort {
            input,
            output,
            column,
            descending,
            dry_run,
        } => sort(input, output, column, descending, dry_run, csv_config(delimiter), json),
        Commands::Pipeline {
            input,
            filtered,
            output,
            config,
        } => run_pipeline(input, filtered, output, config, delimiter, json),
        Commands::InitConfig { path } => init_config(path),
        Commands::Inspect { input, limit } => inspect_dataset(input, limit, csv_config(delimiter)),
        Commands::Count { input } => count_dataset(input, csv_config(delimiter), json),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn csv_config(delimiter: Option<char>) -> CsvConfig {
    let mut config = CsvConfig::default();
    if let Some(d) = delimiter {
        config.delimiter = d;
    }
    config
}

fn filter_chinese(
    input: PathBuf,
    output: PathBuf,
    columns: Option<Vec<String>>,
    dry_run: bool,
    csv: CsvConfig,
    json_output: bool,
) -> Result<()> {
    let config = ChineseFilterConfig { columns };
    let options = StageOptions { csv, dry_run };

    let report = filter_chinese_records_with(&input, &output, &config, &options)
        .with_context(|| format!("Failed to filter {}", input.display()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
        progress::print_filter_summary(&report);
    }

    Ok(())
}

fn sort(
    input: PathBuf,
    output: PathBuf,
    column: String,
    descending: bool,
    dry_run: bool,
    csv: CsvConfig,
    json_output: bool,
) -> Result<()> {
    let config = SortConfig { column, descending };
    let options = StageOptions { csv, dry_run };

    let report = sort_by_column(&input, &output, &config, &options)
        .with_context(|| format!("Failed to sort {}", input.display()))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

fn run_pipeline(
    input: Option<PathBuf>,
    filtered: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    delimiter: Option<char>,
    json_output: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            info!("Loading pipeline config: {:?}", path);
            PipelineConfig::load(&path)?
        }
        None => PipelineConfig::default(),
    };

    // Command-line flags win over the config file
    if let Some(input) = input {
        config.paths.input = input;
    }
    if let Some(filtered) = filtered {
        config.paths.filtered = filtered;
    }
    if let Some(output) = output {
        config.paths.output = output;
    }
    if let Some(d) = delimiter {
        config.csv.delimiter = d;
    }

    let report = run_pipeline_with(&config.paths, &config.settings())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.filter);
        println!("{}", report.sort);
        progress::print_filter_summary(&report.filter);
    }

    Ok(())
}

fn init_config(path: PathBuf) -> Result<()> {
    PipelineConfig::default().save(&path)?;
    info!("Wrote default pipeline config to {:?}", path);
    Ok(())
}

fn inspect_dataset(input: PathBuf, limit: usize, csv: CsvConfig) -> Result<()> {
    info!("Inspecting dataset: {:?}", input);

    let mut reader = open_dataset(&input, &csv)?;
    let headers = reader.headers().to_vec();
    println!("Columns: {}", headers.join(", "));

    for result in reader.by_ref().take(limit) {
        let record = result?;
        println!(
            "Record (line {}): {}",
            record.source_line,
            serde_json::to_string_pretty(&record.to_json(&headers))?
        );
    }

    info!(
        "Processed {} records ({} bytes)",
        reader.records_processed(),
        reader.bytes_processed()
    );

    Ok(())
}

fn count_dataset(input: PathBuf, csv: CsvConfig, json_output: bool) -> Result<()> {
    info!("Counting records in: {:?}", input);

    let mut reader = open_dataset(&input, &csv)?;
    let progress = ProgressReporter::new(reader.total_bytes());

    let mut count = 0;
    while let Some(result) = reader.next() {
        let _record = result?;
        count += 1;

        if count % 1000 == 0 {
            progress.update(reader.bytes_processed(), count);
        }
    }

    progress.update(reader.bytes_processed(), count);
    progress.finish();

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy().to_string(),
            "columns": reader.headers(),
            "total_records": count,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Total records: {}", count);
    }
    info!("Processed {} bytes", reader.bytes_processed());

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_defaults() {
        let cli = Cli::try_parse_from(["tabclean", "filter-chinese"]).unwrap();
        match cli.command {
            Commands::FilterChinese {
                input,
                output,
                columns,
                dry_run,
            } => {
                assert_eq!(input, PathBuf::from("shopee.csv"));
                assert_eq!(output, PathBuf::from("output_filtered.csv"));
                assert!(columns.is_none());
                assert!(!dry_run);
            }
            _ => panic!("expected filter-chinese"),
        }
    }

    #[test]
    fn test_filter_columns_list() {
        let cli = Cli::try_parse_from(["tabclean", "filter-chinese", "-c", "title,shop"]).unwrap();
        match cli.command {
            Commands::FilterChinese { columns, .. } => {
                assert_eq!(columns, Some(vec!["title".to_string(), "shop".to_string()]));
            }
            _ => panic!("expected filter-chinese"),
        }
    }

    #[test]
    fn test_sort_defaults() {
        let cli = Cli::try_parse_from(["tabclean", "sort", "--descending"]).unwrap();
        match cli.command {
            Commands::Sort {
                input,
                output,
                column,
                descending,
                ..
            } => {
                assert_eq!(input, PathBuf::from("output_filtered.csv"));
                assert_eq!(output, PathBuf::from("output_sorted.csv"));
                assert_eq!(column, "title");
                assert!(descending);
            }
            _ => panic!("expected sort"),
        }
    }

    #[test]
    fn test_global_delimiter() {
        let cli = Cli::try_parse_from(["tabclean", "count", "data.csv", "-d", ";"]).unwrap();
        assert_eq!(cli.delimiter, Some(';'));
        assert_eq!(csv_config(cli.delimiter).delimiter, ';');
    }

    #[test]
    fn test_pipeline_command_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shopee.csv");
        let filtered = dir.path().join("filtered.csv");
        let output = dir.path().join("sorted.csv");
        std::fs::write(&input, "title,price\nb,1\n手机,2\na,3\n").unwrap();

        run_pipeline(
            Some(input),
            Some(filtered.clone()),
            Some(output.clone()),
            None,
            None,
            true,
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "title,price\na,3\nb,1\n"
        );
    }

    #[test]
    fn test_sort_command_missing_column_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "name\nx\n").unwrap();

        let result = sort(
            input,
            output.clone(),
            "title".into(),
            false,
            false,
            CsvConfig::default(),
            true,
        );

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Column 'title' not found"));
        assert!(!output.exists());
    }
}
