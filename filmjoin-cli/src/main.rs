use clap::{Parser, Subcommand, ValueEnum};
use filmjoin::output::{self, OutputFormat};
use filmjoin::summary::summarize;
use filmjoin::validation::{check_references, validate_dataset};
use filmjoin::{load_dataset, Dataset, LoadedDataset, ParseOptions};
use std::path::PathBuf;
use std::process;

/// filmjoin CLI: nest genre, film and cast tables into a per-genre view
#[derive(Parser)]
#[command(name = "filmjoin", version, about)]
struct Cli {
    /// Dataset file (YAML or JSON). Falls back to $FILMJOIN_DATA, then the demo dataset
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "yaml")]
    format: FormatArg,

    /// Reject unknown keys in the dataset instead of warning
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
    Outline,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Outline => OutputFormat::Outline,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Join the tables and print the nested view
    Join {
        /// Write the result to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check the dataset against the expected record shapes
    Validate,

    /// Show table sizes, dangling references and duplicate keys
    Status,

    /// Print the built-in demo tables
    Demo,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("ERROR:{e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but found the dataset invalid
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let options = ParseOptions { strict: cli.strict };
    let format: OutputFormat = cli.format.into();

    match cli.command {
        Command::Join { output: target } => {
            let loaded = load(cli.data, options)?;
            let groups = loaded.dataset.transform();
            match target {
                Some(path) => {
                    output::write_output(&path, &groups, format)?;
                    print_value(
                        &serde_json::json!({
                            "ok": true,
                            "output": path.display().to_string(),
                            "genres": groups.len(),
                        }),
                        format,
                    )?;
                }
                None => print!("{}", output::render(&groups, format)?),
            }
        }

        Command::Validate => {
            let raw: serde_yaml::Value = match data_path(cli.data) {
                Some(path) => {
                    log::info!("Validating {}", path.display());
                    serde_yaml::from_str(&std::fs::read_to_string(&path)?)?
                }
                None => serde_yaml::to_value(Dataset::demo()?)?,
            };

            let mut result = validate_dataset(&raw, options.strict);
            if result.is_ok() {
                let dataset = Dataset::from_value(&raw)?;
                result.warnings.extend(check_references(&dataset));
            }

            print_value(
                &serde_json::json!({
                    "valid": result.is_ok(),
                    "errors": result.errors,
                    "warnings": result.warnings,
                }),
                format,
            )?;
            return Ok(result.is_ok());
        }

        Command::Status => {
            let loaded = load(cli.data, options)?;
            print_value(&serde_json::to_value(summarize(&loaded.dataset))?, format)?;
        }

        Command::Demo => {
            print_value(&serde_json::to_value(Dataset::demo()?)?, format)?;
        }
    }

    Ok(true)
}

fn data_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os("FILMJOIN_DATA").map(PathBuf::from))
}

fn load(
    flag: Option<PathBuf>,
    options: ParseOptions,
) -> Result<LoadedDataset, Box<dyn std::error::Error>> {
    match data_path(flag) {
        Some(path) => {
            log::info!("Loading dataset from {}", path.display());
            Ok(load_dataset(&path, options)?)
        }
        None => {
            log::info!("No dataset given, using the demo dataset");
            Ok(LoadedDataset {
                dataset: Dataset::demo()?,
                warnings: Vec::new(),
            })
        }
    }
}

/// Print a report value. The outline format only applies to joined views,
/// so reports fall back to YAML.
fn print_value(
    value: &serde_json::Value,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml | OutputFormat::Outline => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}
