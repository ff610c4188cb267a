//! End-to-end checks of the solar-term catalog against published instants

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use rstest::rstest;
use solarterm::planetlib::sun::apparent_longitude;
use solarterm::{Adjacency, Config, SolarTerm, SolarTermCalendar, SolarTermError, YearPolicy};

fn china_standard_time(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

fn wrapped_difference(a: f64, b: f64) -> f64 {
    (a - b + 180.0).rem_euclid(360.0) - 180.0
}

#[test]
fn winter_solstice_2019_falls_on_december_22() {
    let calendar = SolarTermCalendar::new();
    let record = calendar.find_term(2019, SolarTerm::WinterSolstice).unwrap();
    assert_eq!(record.date(), NaiveDate::from_ymd_opt(2019, 12, 22).unwrap());
    assert_eq!(record.code(), 18);
    assert_eq!(record.name(), "冬至");
}

#[rstest]
#[case(2019, SolarTerm::WinterSolstice, (2019, 12, 22, 12, 19))]
#[case(2020, SolarTerm::VernalEquinox, (2020, 3, 20, 11, 49))]
#[case(2021, SolarTerm::SummerSolstice, (2021, 6, 21, 11, 32))]
#[case(2022, SolarTerm::AutumnEquinox, (2022, 9, 23, 9, 4))]
#[case(2024, SolarTerm::SpringBegins, (2024, 2, 4, 16, 27))]
fn published_instants_within_minutes(
    #[case] year: i32,
    #[case] term: SolarTerm,
    #[case] published: (i32, u32, u32, u32, u32),
) {
    let calendar = SolarTermCalendar::new();
    let record = calendar.find_term(year, term).unwrap();
    let (y, mo, d, h, mi) = published;
    let offset = record.datetime - china_standard_time(y, mo, d, h, mi);
    assert!(
        offset.num_seconds().abs() <= 180,
        "{} {} computed {} ({}s from published)",
        year,
        term.english_name(),
        record.date_string(),
        offset.num_seconds()
    );
}

#[test]
fn catalogs_are_chronological_and_cyclic() {
    let calendar = SolarTermCalendar::new();
    for year in (1900..=2100).step_by(25) {
        let records = calendar.year_terms(year).unwrap();
        assert_eq!(records.len(), 25);

        for pair in records.windows(2) {
            assert!(pair[0].jd_tt < pair[1].jd_tt, "{}: terms out of order", year);
            assert!(pair[0].datetime < pair[1].datetime);
            assert_eq!(pair[1].term, pair[0].term.next());
            let gap = pair[1].jd_tt - pair[0].jd_tt;
            assert!(gap > 14.0 && gap < 16.5, "{}: gap of {} days", year, gap);
        }

        let codes: Vec<u8> = records.iter().map(|r| r.code()).collect();
        let expected: Vec<u8> = (0..25).map(|i| ((18 + i) % 24) as u8).collect();
        assert_eq!(codes, expected);
        assert_eq!(records[0].datetime.year(), year - 1);
        assert_eq!(records[24].datetime.year(), year);
    }
}

#[test]
fn every_record_sits_on_its_longitude() {
    let calendar = SolarTermCalendar::new();
    for year in [1901, 1987, 2033, 2099] {
        for record in calendar.year_terms(year).unwrap() {
            let longitude = apparent_longitude(record.jd_tt);
            let miss = wrapped_difference(longitude, record.term.longitude());
            assert!(miss.abs() < 1e-4, "{} {} missed by {}", year, record.name(), miss);
        }
    }
}

#[test]
fn vernal_equinox_converges_across_the_wrap() {
    let calendar = SolarTermCalendar::new();
    for year in (1900..=2100).step_by(10) {
        let record = calendar.find_term(year, SolarTerm::VernalEquinox).unwrap();
        let longitude = apparent_longitude(record.jd_tt);
        assert!(longitude < 1e-4 || longitude > 360.0 - 1e-4);
        assert_eq!(record.datetime.month(), 3);
        assert!((19..=22).contains(&record.datetime.day()));
    }
}

#[test]
fn recent_term_on_a_term_day() {
    let calendar = SolarTermCalendar::new();
    let adjacent = calendar.recent_solar_term("2021-06-21 08:00").unwrap();

    let current = adjacent.get(Adjacency::Current).unwrap();
    assert_eq!(current.term, SolarTerm::SummerSolstice);
    let previous = adjacent.get(Adjacency::Previous).unwrap();
    let next = adjacent.get(Adjacency::Next).unwrap();
    assert_eq!(previous.term, SolarTerm::GrainInEar);
    assert_eq!(next.term, SolarTerm::SlightHeat);
    assert!(previous.date() < current.date() && current.date() < next.date());
}

#[test]
fn results_are_reproducible() {
    let calendar = SolarTermCalendar::new();
    let first = calendar.year_terms(2024).unwrap();
    let second = calendar.year_terms(2024).unwrap();
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.jd_tt.to_bits(), b.jd_tt.to_bits());
    }
}

#[test]
fn utc_offset_shifts_civil_times_only() {
    let cst = SolarTermCalendar::new();
    let utc = SolarTermCalendar::from_config(&Config::new().with_utc_offset_seconds(0)).unwrap();

    let a = cst.find_term(2020, SolarTerm::SummerSolstice).unwrap();
    let b = utc.find_term(2020, SolarTerm::SummerSolstice).unwrap();
    assert_eq!(a.jd_tt, b.jd_tt);
    assert_eq!(a.datetime, b.datetime);
    assert_eq!(a.datetime.naive_local() - b.datetime.naive_local(), chrono::Duration::hours(8));
}

#[test]
fn years_outside_range_follow_policy() {
    let strict = SolarTermCalendar::new();
    for year in [1899, 2101] {
        assert!(matches!(
            strict.year_terms(year),
            Err(SolarTermError::InvalidInput(_))
        ));
    }

    let lenient =
        SolarTermCalendar::from_config(&Config::new().with_year_policy(YearPolicy::CurrentYear))
            .unwrap();
    let records = lenient.year_terms(1800).unwrap();
    assert_eq!(records.len(), 25);

    let wide = SolarTermCalendar::from_config(&Config::new().with_year_range(1600, 2200)).unwrap();
    assert_eq!(wide.year_terms(1700).unwrap().len(), 25);
}
