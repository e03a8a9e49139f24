#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_sentence,
    codec::{FieldError, NmeaCode, decode_code},
};

/// Quality of the GPS fix
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NmeaCode)]
#[nmea(name = "fix quality")]
pub enum GpsFixQuality {
    /// 0 - Fix not available
    #[nmea(code = '0')]
    Invalid,
    /// 1 - GPS fix
    #[nmea(code = '1')]
    Gps,
    /// 2 - Differential GPS fix
    #[nmea(code = '2')]
    Dgps,
    /// 3 - PPS fix
    #[nmea(code = '3')]
    Pps,
    /// 4 - Real Time Kinematic
    #[nmea(code = '4')]
    Rtk,
    /// 5 - Float RTK
    #[nmea(code = '5')]
    FloatRtk,
    /// 6 - Estimated (dead reckoning)
    #[nmea(code = '6')]
    Estimated,
    /// 7 - Manual input mode
    #[nmea(code = '7')]
    Manual,
    /// 8 - Simulation mode
    #[nmea(code = '8')]
    Simulation,
}

impl TryFrom<u8> for GpsFixQuality {
    type Error = FieldError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        char::from_digit(u32::from(code), 10)
            .and_then(Self::from_code)
            .ok_or_else(|| FieldError::UnknownCode {
                enumeration: Self::NAME,
                value: code.to_string(),
            })
    }
}

impl From<GpsFixQuality> for u8 {
    fn from(quality: GpsFixQuality) -> Self {
        // codes are the digits 0-8
        quality.code() as u8 - b'0'
    }
}

/// Unit tag qualifying the numeric field before it
///
/// The tags are case-sensitive: `F` is fathoms while `f` is feet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NmeaCode)]
#[nmea(name = "units")]
pub enum Units {
    /// C - Degrees Celsius
    #[nmea(code = 'C')]
    Celsius,
    /// F - Fathoms
    #[nmea(code = 'F')]
    Fathoms,
    /// f - Feet
    #[nmea(code = 'f')]
    Feet,
    /// K - Kilometers, or kilometers per hour in speed fields
    #[nmea(code = 'K')]
    Kilometers,
    /// M - Meters
    #[nmea(code = 'M')]
    Meters,
    /// N - Knots
    #[nmea(code = 'N')]
    Knots,
}

impl Units {
    const ALTITUDE: &'static str = "altitude units";

    /// Returns `true` for the units an altitude or geoidal height may be
    /// expressed in: meters (`M`) and feet (`f`).
    pub fn is_altitude_unit(self) -> bool {
        matches!(self, Units::Meters | Units::Feet)
    }
}

/// Decodes the unit tag of an altitude or geoidal height field.
pub fn decode_altitude_units(token: &str) -> Result<Units, FieldError> {
    decode_code::<Units>(token).and_then(validate_altitude_units)
}

/// Validates that `units` may qualify an altitude or geoidal height.
pub fn validate_altitude_units(units: Units) -> Result<Units, FieldError> {
    if units.is_altitude_unit() {
        Ok(units)
    } else {
        Err(FieldError::UnknownCode {
            enumeration: Units::ALTITUDE,
            value: units.code().to_string(),
        })
    }
}

/// Hemisphere indicator of a coordinate
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NmeaCode)]
#[nmea(name = "compass point")]
pub enum CompassPoint {
    /// N - North
    #[nmea(code = 'N')]
    North,
    /// S - South
    #[nmea(code = 'S')]
    South,
    /// E - East
    #[nmea(code = 'E')]
    East,
    /// W - West
    #[nmea(code = 'W')]
    West,
}

/// Status Mode Indicator
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NmeaCode)]
#[nmea(name = "data status")]
pub enum DataStatus {
    /// A - Valid
    #[nmea(code = 'A')]
    Valid,
    /// V - Invalid
    #[nmea(code = 'V')]
    Invalid,
}

/// FAA Mode Indicator
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NmeaCode)]
#[nmea(name = "FAA mode")]
pub enum FaaMode {
    /// A - Autonomous mode
    #[nmea(code = 'A')]
    Autonomous,
    /// D - Differential Mode
    #[nmea(code = 'D')]
    Differential,
    /// E - Estimated (dead-reckoning) mode
    #[nmea(code = 'E')]
    Estimated,
    /// F - RTK Float mode
    #[nmea(code = 'F')]
    FloatRtk,
    /// M - Manual Input Mode
    #[nmea(code = 'M')]
    Manual,
    /// N - Data Not Valid
    #[nmea(code = 'N')]
    DataNotValid,
    /// P - Precise
    #[nmea(code = 'P')]
    Precise,
    /// R - RTK Integer mode
    #[nmea(code = 'R')]
    FixedRtk,
    /// S - Simulated Mode
    #[nmea(code = 'S')]
    Simulator,
}
