use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use parcel_scout::config::Config;
use parcel_scout::counties::CountyRegistry;
use parcel_scout::models::{LookupResult, ParcelRecord, SectionFlags};
use parcel_scout::report::{generate_report, municode_link, ZoningRequirements};
use parcel_scout::utils::HttpClient;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parcel Scout - Look up Florida property parcels across county GIS services
#[derive(Parser, Debug)]
#[command(name = "parcel-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up Florida property parcels and generate due-diligence reports", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a parcel and print the record
    Lookup {
        /// County name (e.g. "Hillsborough"); unknown counties fail gracefully
        county: String,

        /// Parcel or folio identifier, with or without separators
        parcel_id: String,
    },

    /// Look up a parcel and write a formatted xlsx report
    Report {
        /// County name
        county: String,

        /// Parcel or folio identifier
        parcel_id: String,

        /// Output file path (default: <output_dir>/<county>_<parcel>_<timestamp>.xlsx)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Comma-separated section names to include (default: all).
        /// Names: property_info, site_characteristics, zoning_land_use,
        /// building_requirements, parking_requirements, assessment_values,
        /// sales_history, links_references
        #[arg(long)]
        sections: Option<String>,

        /// JSON file with zoning requirements for the building/parking sections
        #[arg(long)]
        zoning: Option<PathBuf>,
    },

    /// List supported counties and their parcel-id formats
    Counties,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("parcel_scout={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;

    let client = HttpClient::with_timeout(config.timeout());
    let registry = CountyRegistry::with_client(client);

    match cli.command {
        Commands::Lookup { county, parcel_id } => {
            let result = registry.lookup_property(&county, &parcel_id).await;
            print_result(&result, cli.output, cli.quiet);

            if !result.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Report {
            county,
            parcel_id,
            file,
            sections,
            zoning,
        } => {
            let result = registry.lookup_property(&county, &parcel_id).await;

            let record = match result {
                LookupResult::Success { record } => record,
                LookupResult::Failure { error } => {
                    eprintln!("{} {}", "Lookup failed:".red().bold(), error);
                    std::process::exit(1);
                }
            };

            let flags = match sections {
                Some(names) => parse_sections(&names)?,
                None => SectionFlags::all(),
            };

            let zoning = match zoning {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    Some(
                        serde_json::from_str::<ZoningRequirements>(&content)
                            .with_context(|| format!("parsing {}", path.display()))?,
                    )
                }
                None => None,
            };

            let output_path = match file {
                Some(path) => path,
                None => {
                    config.report.output_dir.join(format!(
                        "{}_{}_{}.xlsx",
                        record.county.id(),
                        record.parcel_id.replace(['/', ' '], "_"),
                        chrono::Local::now().format("%Y%m%d_%H%M%S")
                    ))
                }
            };

            let saved = generate_report(&record, zoning.as_ref(), flags, &output_path)?;
            if !cli.quiet {
                println!("{} {}", "Report written:".green().bold(), saved.display());
            }
        }

        Commands::Counties => {
            print_counties(&registry, cli.output);
        }
    }

    Ok(())
}

/// Parse a comma-separated section list, rejecting unknown names
fn parse_sections(names: &str) -> Result<SectionFlags> {
    let mut flags = SectionFlags::empty();
    for name in names.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match SectionFlags::from_section_name(name) {
            Some(flag) => flags |= flag,
            None => anyhow::bail!("unknown report section \"{}\"", name),
        }
    }
    Ok(flags)
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn print_result(result: &LookupResult, format: OutputFormat, quiet: bool) {
    match resolve_format(format) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(result).unwrap_or_default()
            );
        }
        OutputFormat::Plain => match result {
            LookupResult::Success { record } => print_record_plain(record),
            LookupResult::Failure { error } => eprintln!("Lookup failed: {}", error),
        },
        OutputFormat::Table => match result {
            LookupResult::Success { record } => print_record_table(record),
            LookupResult::Failure { error } => {
                eprintln!("{} {}", "Lookup failed:".red().bold(), error);
            }
        },
        OutputFormat::Auto => unreachable!(),
    }

    if result.is_success() && !quiet {
        if let Some(record) = result.record() {
            if let Some(link) = municode_link(record.county.name(), &record.city) {
                eprintln!("Municipal code: {}", link);
            }
        }
    }
}

fn print_record_plain(record: &ParcelRecord) {
    println!("{} County parcel {}", record.county, record.parcel_id);
    println!("  Address: {}", record.address);
    println!("  Location: {}", record.property_location());
    println!("  Owner: {}", record.owner);
    println!("  Zoning: {}", record.zoning);
    println!("  Land use: {}", record.land_use);
    println!("  Acres: {}", record.acres);
    println!("  Assessed total: {}", record.assessed_total);
    if record.has_sale() {
        println!(
            "  Last sale: {} for {}",
            record.sale_date, record.sale_amount
        );
    }
    if !record.parcel_link.is_empty() {
        println!("  Appraiser: {}", record.parcel_link);
    }
}

fn print_record_table(record: &ParcelRecord) {
    use comfy_table::{Attribute, Cell, Table};

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec![
        Cell::new(format!("{} County", record.county)).add_attribute(Attribute::Bold),
        Cell::new(&record.parcel_id).add_attribute(Attribute::Bold),
    ]);

    let rows: Vec<(&str, String)> = vec![
        ("Address", record.address.clone()),
        ("Location", record.property_location()),
        ("Owner", record.owner.clone()),
        ("Owner Address", record.owner_address.clone()),
        ("Legal", record.legal_description.clone()),
        ("Zoning", record.zoning.clone()),
        ("Land Use", record.land_use.clone()),
        ("Acres", format!("{}", record.acres)),
        ("Assessed Land", format!("{}", record.assessed_land)),
        ("Assessed Building", format!("{}", record.assessed_building)),
        ("Assessed Total", format!("{}", record.assessed_total)),
        ("Year Built", record.year_built.clone()),
        ("Appraiser Link", record.parcel_link.clone()),
    ];

    for (label, value) in rows {
        if !value.is_empty() {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
    }

    println!("{table}");
}

fn print_counties(registry: &CountyRegistry, format: OutputFormat) {
    match resolve_format(format) {
        OutputFormat::Json => {
            let counties: Vec<serde_json::Value> = registry
                .all()
                .map(|adapter| {
                    serde_json::json!({
                        "id": adapter.id(),
                        "name": adapter.name(),
                        "id_format": adapter.id_format_hint(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&counties).unwrap_or_default()
            );
        }
        OutputFormat::Plain => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["County", "Parcel ID Format"]);

            let mut adapters: Vec<_> = registry.all().collect();
            adapters.sort_by_key(|a| a.name());
            for adapter in adapters {
                table.add_row(vec![
                    Cell::new(adapter.name()).add_attribute(Attribute::Bold),
                    Cell::new(adapter.id_format_hint()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert!(!version.is_empty());
        let parts: Vec<&str> = version.split('.').collect();
        assert!(parts.len() >= 2);
        assert!(parts[0].parse::<u32>().is_ok());
    }

    #[test]
    fn test_cli_lookup_args() {
        let cli = Cli::parse_from(["parcel-scout", "lookup", "Hillsborough", "1926050030"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        match cli.command {
            Commands::Lookup { county, parcel_id } => {
                assert_eq!(county, "Hillsborough");
                assert_eq!(parcel_id, "1926050030");
            }
            _ => panic!("expected lookup command"),
        }
    }

    #[test]
    fn test_cli_report_defaults() {
        let cli = Cli::parse_from(["parcel-scout", "report", "Pasco", "12-34-56-78-901-234-5678"]);
        match cli.command {
            Commands::Report {
                file,
                sections,
                zoning,
                ..
            } => {
                assert!(file.is_none());
                assert!(sections.is_none());
                assert!(zoning.is_none());
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_parse_sections() {
        let flags = parse_sections("property_info, sales_history").unwrap();
        assert!(flags.contains(SectionFlags::PROPERTY_INFO));
        assert!(flags.contains(SectionFlags::SALES_HISTORY));
        assert!(!flags.contains(SectionFlags::ZONING_LAND_USE));

        assert!(parse_sections("property_info,bogus").is_err());
    }
}
