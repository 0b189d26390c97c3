use crate::dictionary::Dictionary;
use crate::error::{FixPhraseError, Result};
use crate::types::{Band, Encoded};

/// Scale applied to degrees to keep four decimal places
pub(crate) const SCALE: f64 = 10_000.0;
/// Offsets that make scaled coordinates non-negative
pub(crate) const LAT_OFFSET: f64 = 90.0;
pub(crate) const LON_OFFSET: f64 = 180.0;

/// Absolute dictionary indices for one coordinate, one per band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PackedIndices([usize; 4]);

impl PackedIndices {
    /// Pack a validated coordinate into four band indices.
    ///
    /// Each scaled coordinate is a 7-digit number `d1..d7`. The leading four digits
    /// of each axis form the latitude and longitude words. The trailing digits are
    /// interleaved: `lat d5 d6 + lon d5` and `lat d7 + lon d6 d7`.
    pub(crate) fn pack(lat: f64, lon: f64) -> Self {
        let lat = scaled(lat, LAT_OFFSET);
        let lon = scaled(lon, LON_OFFSET);

        let (lat_head, lat_tail) = (lat / 1000, lat % 1000);
        let (lon_head, lon_tail) = (lon / 1000, lon % 1000);

        let hundredths = (lat_tail / 10) * 10 + lon_tail / 100;
        let ten_thousandths = (lat_tail % 10) * 100 + lon_tail % 100;

        Self([
            Band::Latitude.base() + lat_head,
            Band::Longitude.base() + lon_head,
            Band::Hundredths.base() + hundredths,
            Band::TenThousandths.base() + ten_thousandths,
        ])
    }

    pub(crate) fn as_array(&self) -> [usize; 4] {
        self.0
    }
}

fn scaled(degrees: f64, offset: f64) -> usize {
    // Range validation keeps this within [0, 3_600_000].
    ((degrees * SCALE).round() + offset * SCALE) as usize
}

/// Encode a coordinate into a four-word phrase
pub fn encode(dictionary: &Dictionary, lat: f64, lon: f64) -> Result<Encoded> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(FixPhraseError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(FixPhraseError::LongitudeOutOfRange(lon));
    }

    let words = PackedIndices::pack(lat, lon)
        .as_array()
        .into_iter()
        .map(|index| dictionary.word_at(index).map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    log::trace!("encoded ({lat}, {lon}) as {words:?}");

    Ok(Encoded {
        lat,
        lon,
        phrase: words.join(" "),
        words,
    })
}
