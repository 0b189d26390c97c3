use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of dictionary words the four bands cover
pub const REQUIRED_WORDS: usize = 7610;

/// One of the four reserved index ranges of the dictionary.
///
/// Each band holds the words for one digit group of a packed coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Latitude to 0.1 degree: `[0, 2000)`
    Latitude,
    /// Longitude to 0.1 degree: `[2000, 5610)`
    Longitude,
    /// Second decimal digits of latitude and longitude: `[5610, 6610)`
    Hundredths,
    /// Fourth decimal digits of latitude and longitude: `[6610, 7610)`
    TenThousandths,
}

impl Band {
    pub const ALL: [Band; 4] = [
        Band::Latitude,
        Band::Longitude,
        Band::Hundredths,
        Band::TenThousandths,
    ];

    /// Absolute dictionary index range covered by this band
    pub const fn range(self) -> Range<usize> {
        match self {
            Band::Latitude => 0..2000,
            Band::Longitude => 2000..5610,
            Band::Hundredths => 5610..6610,
            Band::TenThousandths => 6610..REQUIRED_WORDS,
        }
    }

    /// First absolute index of the band
    pub const fn base(self) -> usize {
        self.range().start
    }

    /// Position of the band in a phrase (0..4)
    pub const fn slot(self) -> usize {
        match self {
            Band::Latitude => 0,
            Band::Longitude => 1,
            Band::Hundredths => 2,
            Band::TenThousandths => 3,
        }
    }

    /// Band an absolute index falls in, if any.
    ///
    /// Indices at or past [`REQUIRED_WORDS`] belong to no band.
    pub fn of(index: usize) -> Option<Band> {
        Band::ALL
            .into_iter()
            .find(|band| band.range().contains(&index))
    }
}

/// Precision tier of a decoded coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// Only latitude and longitude words resolved
    Tenth,
    /// Hundredths word resolved as well
    Hundredth,
    /// All four words resolved
    TenThousandth,
}

impl Accuracy {
    pub const fn degrees(self) -> f64 {
        match self {
            Accuracy::Tenth => 0.1,
            Accuracy::Hundredth => 0.01,
            Accuracy::TenThousandth => 0.0001,
        }
    }

    /// Divisor turning the reconstructed digit string back into degrees
    pub const fn divisor(self) -> f64 {
        match self {
            Accuracy::Tenth => 10.0,
            Accuracy::Hundredth => 100.0,
            Accuracy::TenThousandth => 10_000.0,
        }
    }

    /// Offset added to both axes to land in the middle of a coarse cell
    pub const fn centering(self) -> f64 {
        match self {
            Accuracy::Tenth => 0.05,
            Accuracy::Hundredth => 0.005,
            Accuracy::TenThousandth => 0.0,
        }
    }
}

/// Result of encoding a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encoded {
    /// Input latitude, unrounded
    pub lat: f64,
    /// Input longitude, unrounded
    pub lon: f64,
    pub phrase: String,
    pub words: Vec<String>,
}

/// Result of decoding a phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoded {
    /// Normalized input words in input order, duplicates and unknown words included
    pub input_words: Vec<String>,
    /// Resolved words in band order using the dictionary spelling
    pub canonical_phrase: String,
    pub lat: f64,
    pub lon: f64,
    pub accuracy_degrees: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_the_required_range() {
        let mut expected_start = 0;
        for band in Band::ALL {
            assert_eq!(band.base(), expected_start);
            expected_start = band.range().end;
        }
        assert_eq!(expected_start, REQUIRED_WORDS);
    }

    #[test]
    fn band_of_respects_edges() {
        assert_eq!(Band::of(0), Some(Band::Latitude));
        assert_eq!(Band::of(1999), Some(Band::Latitude));
        assert_eq!(Band::of(2000), Some(Band::Longitude));
        assert_eq!(Band::of(5609), Some(Band::Longitude));
        assert_eq!(Band::of(5610), Some(Band::Hundredths));
        assert_eq!(Band::of(6610), Some(Band::TenThousandths));
        assert_eq!(Band::of(7609), Some(Band::TenThousandths));
        assert_eq!(Band::of(7610), None);
    }

    #[test]
    fn decoded_serializes_with_camel_case_fields() {
        let decoded = Decoded {
            input_words: vec!["a".into(), "b".into()],
            canonical_phrase: "a b".into(),
            lat: 1.05,
            lon: 2.05,
            accuracy_degrees: Accuracy::Tenth.degrees(),
        };
        let value = serde_json::to_value(&decoded).unwrap();
        assert_eq!(value["canonicalPhrase"], "a b");
        assert_eq!(value["accuracyDegrees"], 0.1);
        assert!(value.get("inputWords").is_some());
    }
}
