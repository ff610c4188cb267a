//! Print a year's solar terms in several civil zones
//!
//! Usage:
//!   cargo run --example year_table -- 2024

use solarterm::{Config, SolarTermCalendar};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let year: i32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 2024,
    };

    let zones = [("Beijing", 8.0), ("Tokyo", 9.0), ("UTC", 0.0)];
    let calendars = zones
        .iter()
        .map(|(_, hours)| {
            let config = Config::new().with_utc_offset_hours(*hours)?;
            SolarTermCalendar::from_config(&config)
        })
        .collect::<Result<Vec<_>, _>>()?;

    print!("{:<6} {:<18}", "term", "");
    for (name, _) in &zones {
        print!(" {:<20}", name);
    }
    println!();

    let tables = calendars
        .iter()
        .map(|calendar| calendar.year_terms(year))
        .collect::<Result<Vec<_>, _>>()?;

    for (index, record) in tables[0].iter().enumerate() {
        print!("{:<6} {:<18}", record.name(), record.term.english_name());
        for table in &tables {
            print!(" {:<20}", table[index].date_string());
        }
        println!();
    }

    Ok(())
}
