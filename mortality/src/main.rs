//! Mortality CLI - Combine Eurostat weekly death spreadsheets
//!
//! ```bash
//! mortality combine                      # data/ -> eurostat_mortality_all_levels.csv
//! mortality combine --json               # same, summary as JSON on stdout
//! mortality files                        # expected input files, in order
//! mortality classify NUTS2_foo.xlsx      # granularity of a file name
//! mortality inspect data/NUTS1_....xlsx  # header detection for one workbook
//! ```

use clap::{Parser, Subcommand};
use mortality::{
    combine, detect_granularity, find_id_columns, load_table, period_columns, reshape,
    CombineOptions, PipelineError, DEFAULT_DATA_DIR, DEFAULT_OUTPUT, EXPECTED_FILES,
};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mortality")]
#[command(about = "Combine Eurostat weekly mortality spreadsheets into one CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reshape and combine every expected file
    Combine {
        /// Directory holding the Eurostat files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Combined CSV file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print the run report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Don't print progress messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the expected input files in processing order
    Files,

    /// Show the granularity tag for a file name
    Classify {
        /// File name (only the name is looked at)
        name: String,
    },

    /// Show header detection and column mapping for one workbook
    Inspect {
        /// Workbook to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Combine {
            data_dir,
            output,
            json,
            quiet,
        } => cmd_combine(data_dir, output, json, quiet),

        Commands::Files => cmd_files(),

        Commands::Classify { name } => cmd_classify(&name),

        Commands::Inspect { input } => cmd_inspect(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_combine(
    data_dir: PathBuf,
    output: PathBuf,
    json: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = CombineOptions {
        data_dir,
        output,
        quiet: quiet || json,
    };

    match combine(&options) {
        Ok(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Ok(())
        }
        Err(PipelineError::NoData(dir)) => {
            if json {
                println!("{}", json!({ "error": "no_data", "data_dir": dir }));
            }
            Err(PipelineError::NoData(dir).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_files() -> Result<(), Box<dyn std::error::Error>> {
    for (i, name) in EXPECTED_FILES.iter().enumerate() {
        println!("{:>2}. {:<8} {}", i + 1, detect_granularity(name).as_str(), name);
    }
    Ok(())
}

fn cmd_classify(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file_name = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    println!("{}", detect_granularity(&file_name));
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting: {}", input.display());

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());
    let granularity = detect_granularity(&name);

    let loaded = load_table(input)?;
    let headers = &loaded.table.headers;
    let ids = find_id_columns(headers, &name)?;
    let periods = period_columns(headers, ids);
    let records = reshape(&loaded.table, granularity, &name)?;

    let summary = json!({
        "file": name,
        "granularity": granularity,
        "header_row": loaded.header_row,
        "code_column": headers[ids.code],
        "label_column": headers[ids.label],
        "data_rows": loaded.table.rows.len(),
        "period_columns": periods.len(),
        "first_period": periods.first().map(|&c| headers[c].as_str()),
        "last_period": periods.last().map(|&c| headers[c].as_str()),
        "records": records.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
