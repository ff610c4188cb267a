//! Solar Term Tool
//!
//! Prints the solar terms of a year, the terms around a date, or the Sun's
//! apparent longitude at an instant.
//!
//! Usage:
//!   cargo run --bin solar-terms -- year 2024
//!   cargo run --bin solar-terms -- near "2024-06-21 12:00" --kind next
//!   cargo run --bin solar-terms -- --utc-offset 9 --json year 2024 --by-date

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use solarterm::planetlib::sun::apparent_longitude;
use solarterm::{Adjacency, Config, DateInput, KeyMode, SolarTermCalendar, SolarTermRecord};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Solar Term Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes the 24 solar terms from the apparent solar longitude",
    long_about = None
)]
struct Args {
    /// Civil zone as hours east of UTC (overrides the configuration)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<f64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the 25 terms from the previous Winter Solstice to this year's
    Year {
        year: i32,

        /// Key the JSON output by YYYYMMDD instead of position
        #[arg(long, action = ArgAction::SetTrue)]
        by_date: bool,
    },
    /// Show the terms before, on and after a date
    Near {
        /// Date such as 2024-06-21 or "2024-06-21 12:00"; omit for now
        datetime: Option<String>,

        /// Show only one of the neighbours
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },
    /// Apparent solar longitude at a civil date-time
    Longitude { datetime: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Previous,
    Current,
    Next,
}

impl From<Kind> for Adjacency {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Previous => Adjacency::Previous,
            Kind::Current => Adjacency::Current,
            Kind::Next => Adjacency::Next,
        }
    }
}

/// Map the number of `-v` flags to a log level
fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(verbosity_level(verbosity))
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Config::from_json_file(path)?
        }
        None => Config::default(),
    };
    if let Some(hours) = args.utc_offset {
        config = config.with_utc_offset_hours(hours)?;
    }
    config.validate()?;
    Ok(config)
}

fn print_record(label: &str, record: Option<&SolarTermRecord>) {
    match record {
        Some(r) => println!(
            "{:<9} {}  {:>2}  {}  {}",
            label,
            r.date_string(),
            r.code(),
            r.name(),
            r.term.english_name()
        ),
        None => println!("{:<9} -", label),
    }
}

fn run_year(calendar: &SolarTermCalendar, year: i32, by_date: bool, json: bool) -> Result<()> {
    if json {
        let mode = if by_date { KeyMode::Date } else { KeyMode::Index };
        let terms = calendar.solar_terms(year, mode)?;
        println!("{}", serde_json::to_string_pretty(&terms)?);
        return Ok(());
    }

    println!("Solar terms for {} ({})", year, calendar.timescale().utc_offset());
    println!("-------------------------------------------------------");
    for (index, record) in calendar.year_terms(year)?.iter().enumerate() {
        print_record(&format!("{:>2}", index), Some(record));
    }
    Ok(())
}

fn run_near(
    calendar: &SolarTermCalendar,
    datetime: Option<String>,
    kind: Option<Kind>,
    json: bool,
) -> Result<()> {
    let input = datetime.map_or(DateInput::Now, DateInput::from);
    let adjacent = calendar.recent_solar_term(input)?;

    match (kind, json) {
        (Some(kind), true) => {
            println!("{}", serde_json::to_string_pretty(&adjacent.get(kind.into()))?)
        }
        (Some(kind), false) => {
            let label = format!("{:?}", kind).to_lowercase();
            print_record(&label, adjacent.get(kind.into()))
        }
        (None, true) => println!("{}", serde_json::to_string_pretty(&adjacent)?),
        (None, false) => {
            print_record("previous", adjacent.previous.as_ref());
            print_record("current", adjacent.current.as_ref());
            print_record("next", adjacent.next.as_ref());
        }
    }
    Ok(())
}

fn run_longitude(calendar: &SolarTermCalendar, datetime: &str, json: bool) -> Result<()> {
    let local = calendar.resolve(DateInput::from(datetime))?;
    let jd_tt = calendar.timescale().tt_from_civil(&local)?;
    let longitude = apparent_longitude(jd_tt);

    if json {
        let value = serde_json::json!({
            "datetime": local.to_string(),
            "jd_tt": jd_tt,
            "longitude": longitude,
        });
        println!("{}", value);
    } else {
        println!("{}  JD(TT) {:.6}  apparent longitude {:.6} deg", local, jd_tt, longitude);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let calendar = SolarTermCalendar::from_config(&config)?;

    match args.command {
        Command::Year { year, by_date } => run_year(&calendar, year, by_date, args.json),
        Command::Near { datetime, kind } => run_near(&calendar, datetime, kind, args.json),
        Command::Longitude { ref datetime } => run_longitude(&calendar, datetime, args.json),
    }
}
