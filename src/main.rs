//! btes-sim entry point — CLI wiring and config-driven simulation runs.

use std::path::Path;
use std::process;

use tracing::info;

use btes_sim::config::SystemConfig;
use btes_sim::io::export::export_csv;
use btes_sim::io::import::read_readings;
use btes_sim::profile::SyntheticSeason;
use btes_sim::sim::engine::Engine;
use btes_sim::sim::report::HorizonReport;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    readings_path: Option<String>,
    out_path: Option<String>,
    seed_override: Option<u64>,
    year_override: Option<i32>,
    quiet: bool,
}

fn print_help() {
    eprintln!("btes-sim — borehole thermal energy storage dispatch simulator");
    eprintln!();
    eprintln!("Usage: btes-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>     Load system configuration from a TOML file");
    eprintln!("  --preset <name>     Use a built-in well-field preset (well_field_1)");
    eprintln!("  --readings <path>   Load hourly readings from CSV");
    eprintln!("  --out <path>        Export the annual results table to CSV");
    eprintln!("  --seed <u64>        Seed for the synthetic season (no --readings)");
    eprintln!("  --year <i32>        Calendar year for the synthetic season");
    eprintln!("  --quiet             Suppress the per-year table");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("Without --readings a synthetic April–October season is generated.");
    eprintln!("If no --config or --preset is given, well_field_1 is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        readings_path: None,
        out_path: None,
        seed_override: None,
        year_override: None,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--readings" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --readings requires a path argument");
                    process::exit(1);
                }
                cli.readings_path = Some(args[i].clone());
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a path argument");
                    process::exit(1);
                }
                cli.out_path = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--year" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --year requires an i32 argument");
                    process::exit(1);
                }
                if let Ok(y) = args[i].parse::<i32>() {
                    cli.year_override = Some(y);
                } else {
                    eprintln!("error: --year value \"{}\" is not a valid i32", args[i]);
                    process::exit(1);
                }
            }
            "--quiet" => {
                cli.quiet = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = parse_args();

    // Load config: --config takes priority, then --preset, then the default field
    let config = if let Some(ref path) = cli.config_path {
        match SystemConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match SystemConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        SystemConfig::well_field_1()
    };

    // Validate early so a bad file fails before any data work
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Readings: from file, or a synthetic season
    let readings = if let Some(ref path) = cli.readings_path {
        match read_readings(Path::new(path)) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    } else {
        let mut season = SyntheticSeason::default();
        if let Some(seed) = cli.seed_override {
            season.seed = seed;
        }
        if let Some(year) = cli.year_override {
            season.year = year;
        }
        info!(
            seed = season.seed,
            year = season.year,
            "no readings file given, generating a synthetic season"
        );
        season.generate()
    };

    let engine = match Engine::new(config, readings) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    info!(hours = engine.readings().len(), "starting 25-year simulation");
    let results = match engine.run() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print per-year results
    if !cli.quiet {
        for r in &results {
            println!("{r}");
        }
    }

    // Print the horizon summary
    println!("\n{}", HorizonReport::from_results(&results));

    // Export CSV if requested
    if let Some(ref path) = cli.out_path {
        if let Err(e) = export_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {path}");
    }
}
