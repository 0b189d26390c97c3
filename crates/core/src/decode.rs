use crate::dictionary::Dictionary;
use crate::encode::{LAT_OFFSET, LON_OFFSET, SCALE};
use crate::error::{FixPhraseError, Result};
use crate::types::{Accuracy, Band, Decoded};

/// Band slots filled from a best-effort pass over the input words.
///
/// Each slot keeps the absolute index of the last word that resolved into it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BandSlots([Option<usize>; 4]);

impl BandSlots {
    fn resolve<'a>(dictionary: &Dictionary, words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut slots = Self::default();
        for word in words {
            let Some(index) = dictionary.index_of(word) else {
                log::trace!("skipping unknown word {word:?}");
                continue;
            };
            if let Some(band) = Band::of(index) {
                slots.0[band.slot()] = Some(index);
            }
        }
        slots
    }

    /// Index relative to the start of `band`
    fn relative(&self, band: Band) -> Option<usize> {
        self.0[band.slot()].map(|index| index - band.base())
    }
}

/// Scaled integer coordinates recovered from band digits, with their tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unpacked {
    lat: usize,
    lon: usize,
    accuracy: Accuracy,
}

impl Unpacked {
    /// Reverse the digit interleaving used by encode.
    ///
    /// The ten-thousandths word only contributes when the hundredths word is
    /// present, since its digits sit behind the hundredths digits.
    fn from_slots(slots: &BandSlots) -> Result<Self> {
        let (Some(lat_head), Some(lon_head)) = (
            slots.relative(Band::Latitude),
            slots.relative(Band::Longitude),
        ) else {
            return Err(FixPhraseError::NotDecodable);
        };

        let unpacked = match (
            slots.relative(Band::Hundredths),
            slots.relative(Band::TenThousandths),
        ) {
            (None, _) => Self {
                lat: lat_head,
                lon: lon_head,
                accuracy: Accuracy::Tenth,
            },
            (Some(hundredths), None) => Self {
                lat: lat_head * 10 + hundredths / 100,
                lon: lon_head * 10 + hundredths % 10,
                accuracy: Accuracy::Hundredth,
            },
            (Some(hundredths), Some(ten_thousandths)) => Self {
                lat: lat_head * 1000 + (hundredths / 10) * 10 + ten_thousandths / 100,
                lon: lon_head * 1000 + (hundredths % 10) * 100 + ten_thousandths % 100,
                accuracy: Accuracy::TenThousandth,
            },
        };
        Ok(unpacked)
    }

    fn degrees(value: usize, divisor: f64, offset: f64) -> f64 {
        (((value as f64 / divisor) - offset) * SCALE).round() / SCALE
    }

    fn lat(&self) -> f64 {
        Self::degrees(self.lat, self.accuracy.divisor(), LAT_OFFSET) + self.accuracy.centering()
    }

    fn lon(&self) -> f64 {
        Self::degrees(self.lon, self.accuracy.divisor(), LON_OFFSET) + self.accuracy.centering()
    }
}

/// Decode a phrase of two to four words into a coordinate.
///
/// Words are matched case-insensitively and in any order. Unknown words are
/// skipped; only a missing latitude or longitude word is fatal.
pub fn decode(dictionary: &Dictionary, phrase: &str) -> Result<Decoded> {
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return Err(FixPhraseError::EmptyPhrase);
    }
    let parts: Vec<String> = phrase.split_whitespace().map(str::to_string).collect();
    if parts.len() < 2 {
        return Err(FixPhraseError::TooFewWords { got: parts.len() });
    }

    let slots = BandSlots::resolve(dictionary, parts.iter().map(String::as_str));
    let unpacked = Unpacked::from_slots(&slots)?;

    let canonical = slots
        .0
        .iter()
        .map(|slot| match slot {
            Some(index) => dictionary.word_at(*index),
            None => Ok(""),
        })
        .collect::<Result<Vec<_>>>()?;

    log::trace!("decoded {parts:?} at accuracy {:?}", unpacked.accuracy);

    Ok(Decoded {
        input_words: parts,
        canonical_phrase: canonical.join(" ").trim().to_string(),
        lat: unpacked.lat(),
        lon: unpacked.lon(),
        accuracy_degrees: unpacked.accuracy.degrees(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(indices: [Option<usize>; 4]) -> BandSlots {
        BandSlots(indices)
    }

    #[test]
    fn missing_longitude_is_not_decodable() {
        let err = Unpacked::from_slots(&slots([Some(1425), None, Some(6516), None])).unwrap_err();
        assert_eq!(err, FixPhraseError::NotDecodable);
    }

    #[test]
    fn full_slots_unpack_exact_digits() {
        let unpacked =
            Unpacked::from_slots(&slots([Some(1425), Some(3778), Some(6516), Some(6906)]))
                .unwrap();
        assert_eq!(unpacked.lat, 1_425_902);
        assert_eq!(unpacked.lon, 1_778_696);
        assert_eq!(unpacked.accuracy, Accuracy::TenThousandth);
    }

    #[test]
    fn hundredths_only_unpacks_five_digits() {
        let unpacked =
            Unpacked::from_slots(&slots([Some(1425), Some(3778), Some(6516), None])).unwrap();
        assert_eq!(unpacked.lat, 14_259);
        assert_eq!(unpacked.lon, 17_786);
        assert_eq!(unpacked.accuracy, Accuracy::Hundredth);
    }

    #[test]
    fn ten_thousandths_without_hundredths_is_ignored() {
        let unpacked =
            Unpacked::from_slots(&slots([Some(1425), Some(3778), None, Some(6906)])).unwrap();
        assert_eq!(unpacked.lat, 1425);
        assert_eq!(unpacked.lon, 1778);
        assert_eq!(unpacked.accuracy, Accuracy::Tenth);
    }
}
