//! Reads NMEA 0183 lines from stdin and prints what each one contains.
//!
//! Run with `RUST_LOG=debug` to see why rejected lines were rejected.

use std::io::{self, BufRead};

use nmea0183_sentence::{ChecksumMode, Error, Nmea0183Parser, NmeaSentence};

fn describe(sentence: &NmeaSentence) {
    println!("{} sentence: {}", sentence.sentence().sentence_id(), sentence);

    if let Some(time) = sentence.as_time() {
        match time.time() {
            Ok(time) => println!("  time: {time}"),
            Err(e) => println!("  time: {e}"),
        }
    }

    if let Some(date) = sentence.as_date()
        && let Ok(date) = date.date()
    {
        println!("  date: {date}");
    }

    if let Some(position) = sentence.as_position() {
        match position.position() {
            Ok(position) => println!(
                "  position: {:.6}, {:.6}",
                position.latitude(),
                position.longitude()
            ),
            Err(Error::FieldAbsent { .. }) => println!("  position: no fix"),
            Err(e) => println!("  position: {e}"),
        }
    }

    if let Some(quality) = sentence.as_fix_quality()
        && let Ok(quality) = quality.fix_quality()
    {
        println!("  fix quality: {quality:?}");
    }

    if let NmeaSentence::Gga(gga) = sentence {
        if let Ok(altitude) = gga.altitude() {
            println!("  altitude: {altitude}");
        }
        if let Ok(Some(station)) = gga.dgps_station_id() {
            println!("  DGPS station: {station}");
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let parser = Nmea0183Parser::builder()
        .checksum_mode(ChecksumMode::Required)
        .build();

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parser.parse(&line).and_then(NmeaSentence::try_from) {
            Ok(sentence) => describe(&sentence),
            Err(e) => println!("Parsing error occurred: {e}"),
        }
    }

    Ok(())
}
