use nmea0183_sentence::{
    Error, GgaSentence, NmeaSentence, Sentence,
    codec::{CompassPoint, GpsFixQuality, Position, StationId, Units},
    parse,
    sentences::{HasFixQuality, HasPosition, HasTime},
};
use time::Time;

const GGA: &str = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79";

#[test]
fn test_parses_gga_fix() {
    let gga: GgaSentence = GGA.parse().unwrap();

    assert_eq!(gga.time(), Ok(Time::from_hms(12, 0, 44).unwrap()));
    assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Gps));
    assert_eq!(gga.satellite_count(), Ok(0));
    assert_eq!(gga.horizontal_dop(), Ok(2.0));
    assert_eq!(gga.altitude(), Ok(28.0));
    assert_eq!(gga.altitude_units(), Ok(Units::Meters));
    assert_eq!(gga.geoidal_height(), Ok(19.6));
    assert_eq!(gga.geoidal_height_units(), Ok(Units::Meters));
    assert_eq!(gga.dgps_age(), Ok(None));
    assert_eq!(gga.dgps_station_id(), Ok(None));

    let position = gga.position().unwrap();
    assert_eq!(position.latitude_hemisphere(), CompassPoint::North);
    assert_eq!(position.longitude_hemisphere(), CompassPoint::East);
    assert_eq!(position.latitude(), 60.0 + 11.552 / 60.0);
    assert_eq!(position.longitude(), 25.0 + 1.941 / 60.0);
}

#[test]
fn test_rejects_wrong_checksum() {
    let line = GGA.replace("*79", "*00");
    assert_eq!(
        parse(&line),
        Err(Error::ChecksumMismatch {
            expected: 0x79,
            found: 0x00
        })
    );
}

#[test]
fn test_rejects_any_single_bit_flip_in_fields() {
    let fields_start = GGA.find(',').unwrap() + 1;
    let fields_end = GGA.find('*').unwrap();

    for position in fields_start..fields_end {
        let mut bytes = GGA.as_bytes().to_vec();
        bytes[position] ^= 0x01;
        let line = String::from_utf8(bytes).unwrap();

        assert!(
            matches!(parse(&line), Err(Error::ChecksumMismatch { .. })),
            "flip at {position} accepted: {line}"
        );
    }
}

#[test]
fn test_reports_unregistered_identifier() {
    let line = "$GPXYZ,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*63";
    assert_eq!(
        parse(line),
        Err(Error::UnrecognizedSentence("XYZ".to_string()))
    );
    assert_eq!(
        line.parse::<NmeaSentence>(),
        Err(Error::UnrecognizedSentence("XYZ".to_string()))
    );
}

#[test]
fn test_rejects_missing_fields() {
    let line = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M*79";
    assert_eq!(
        parse(line),
        Err(Error::FieldCount {
            sentence_id: "GGA".to_string(),
            expected: 14,
            found: 12
        })
    );
}

#[test]
fn test_rejects_unknown_fix_quality_code() {
    let mut gga: GgaSentence = GGA.parse().unwrap();

    assert!(matches!(
        gga.set_fix_quality_code(9),
        Err(Error::UnknownEnumValue { index: None, .. })
    ));
    assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Gps));

    gga.set_fix_quality_code(4).unwrap();
    assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Rtk));
}

#[test]
fn test_serializes_parsed_line_unchanged() {
    let lines = [
        GGA,
        "$IIGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*50",
        "$GPGGA,120044,6011.552,N,02501.941,E,1,08,0.9,545.4,f,46.9,M,3.2,1023*41",
    ];

    for line in lines {
        let sentence = parse(line).unwrap();
        assert_eq!(sentence.to_string(), line);
        assert_eq!(sentence.to_nmea(), format!("{line}\r\n"));

        let gga = GgaSentence::try_from(sentence).unwrap();
        assert_eq!(gga.to_string(), line);
    }
}

#[test]
fn test_keeps_absent_dgps_fields_empty() {
    let gga: GgaSentence = GGA.parse().unwrap();
    let serialized = gga.to_string();

    assert!(serialized.ends_with(",M,,*79"));
    assert_eq!(gga.sentence().field(12), Ok(""));
    assert_eq!(gga.sentence().field(13), Ok(""));
}

#[test]
fn test_enforces_station_id_range() {
    let mut gga: GgaSentence = GGA.parse().unwrap();

    for id in [1024, -1] {
        assert!(matches!(
            gga.set_dgps_station_id(id),
            Err(Error::InvalidArgument { .. })
        ));
    }
    assert_eq!(gga.dgps_station_id(), Ok(None));

    gga.set_dgps_station_id(523).unwrap();
    assert_eq!(gga.sentence().field(13), Ok("0523"));
    assert_eq!(gga.dgps_station_id(), Ok(Some(StationId::new(523).unwrap())));

    gga.clear_dgps().unwrap();
    assert_eq!(gga.to_string(), GGA);
}

#[test]
fn test_setters_round_trip_through_getters() {
    let mut gga = GgaSentence::new("GP").unwrap();

    let time = Time::from_hms_milli(23, 59, 58, 250).unwrap();
    gga.set_time(time).unwrap();
    assert_eq!(gga.time(), Ok(time));

    let position = Position::new(48.1173, 11.516_666).unwrap();
    gga.set_position(position).unwrap();
    assert_eq!(gga.position(), Ok(position));

    gga.set_fix_quality(GpsFixQuality::Dgps).unwrap();
    assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Dgps));

    gga.set_satellite_count(8).unwrap();
    assert_eq!(gga.satellite_count(), Ok(8));
    assert_eq!(gga.sentence().field(6), Ok("08"));

    gga.set_horizontal_dop(0.9).unwrap();
    assert_eq!(gga.horizontal_dop(), Ok(0.9));

    gga.set_altitude(-12.75).unwrap();
    assert_eq!(gga.altitude(), Ok(-12.75));

    gga.set_altitude_units(Units::Feet).unwrap();
    assert_eq!(gga.altitude_units(), Ok(Units::Feet));
    assert_eq!(gga.sentence().field(9), Ok("f"));

    gga.set_geoidal_height(46.9).unwrap();
    assert_eq!(gga.geoidal_height(), Ok(46.9));

    gga.set_dgps_age(3.2).unwrap();
    assert_eq!(gga.dgps_age(), Ok(Some(3.2)));

    let reparsed: GgaSentence = gga.to_nmea().parse().unwrap();
    assert_eq!(reparsed, gga);
}

#[test]
fn test_rejects_invalid_arguments() {
    let mut gga: GgaSentence = GGA.parse().unwrap();

    assert!(matches!(
        gga.set_altitude_units(Units::Knots),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        gga.set_horizontal_dop(-0.1),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        gga.set_altitude(f64::NAN),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        gga.set_satellite_count(100),
        Err(Error::InvalidArgument { .. })
    ));

    assert_eq!(gga.to_string(), GGA);
}

#[test]
fn test_builds_gga_sentence() {
    let position = Position::from_parts(
        60.192_533,
        CompassPoint::North,
        25.032_35,
        CompassPoint::East,
    )
    .unwrap();

    let sentence: Sentence = GgaSentence::builder("GP")
        .field(0, "120044")
        .with(move |sentence| {
            let mut gga = GgaSentence::try_from(sentence.clone())?;
            gga.set_position(position)?;
            *sentence = gga.into_sentence();
            Ok(())
        })
        .value(5, &GpsFixQuality::Gps)
        .field(6, "00")
        .value(7, &2.0)
        .field(8, "28.0")
        .value(9, &Units::Meters)
        .value(10, &19.6)
        .value(11, &Units::Meters)
        .build()
        .unwrap();

    assert_eq!(sentence.field(1), Ok("6011.5520"));
    assert_eq!(sentence.field(7), Ok("2.0"));

    let gga = GgaSentence::try_from(sentence).unwrap();
    assert_eq!(gga.altitude(), Ok(28.0));
    assert_eq!(gga.satellite_count(), Ok(0));
}

#[test]
fn test_builder_keeps_first_error() {
    let result = GgaSentence::builder("GP")
        .field(14, "x")
        .field(5, "9")
        .build();

    assert_eq!(result, Err(Error::IndexOutOfRange { index: 14, len: 14 }));
}
