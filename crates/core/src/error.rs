use thiserror::Error;

/// Result type for phrase codec operations
pub type Result<T> = std::result::Result<T, FixPhraseError>;

/// Errors raised while building the dictionary or encoding/decoding phrases
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixPhraseError {
    /// The word list contained no words at all
    #[error("wordlist empty")]
    EmptyWordlist,

    /// The word list is shorter than the four bands require
    #[error("wordlist too short: got {got}, need {need}")]
    InsufficientWordlist { got: usize, need: usize },

    /// A word index outside the dictionary was requested
    #[error("word index out of range: {index} (size={size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("latitude out of range: {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude out of range: {0}")]
    LongitudeOutOfRange(f64),

    #[error("empty phrase (need at least 2 words)")]
    EmptyPhrase,

    #[error("not enough words (need at least 2, got {got})")]
    TooFewWords { got: usize },

    /// No latitude word or no longitude word could be resolved
    #[error("supplied words input error?  This phrase is not decodable.")]
    NotDecodable,
}

impl FixPhraseError {
    /// Stable machine-readable code for rendering the error to callers
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyWordlist => "empty_wordlist",
            Self::InsufficientWordlist { .. } => "insufficient_wordlist",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::LatitudeOutOfRange(_) => "latitude_out_of_range",
            Self::LongitudeOutOfRange(_) => "longitude_out_of_range",
            Self::EmptyPhrase => "empty_phrase",
            Self::TooFewWords { .. } => "too_few_words",
            Self::NotDecodable => "not_decodable",
        }
    }

    /// True for errors the caller can fix by changing its input.
    ///
    /// Dictionary failures are startup or internal consistency problems.
    pub const fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            Self::EmptyWordlist | Self::InsufficientWordlist { .. } | Self::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_errors_are_not_caller_errors() {
        assert!(!FixPhraseError::EmptyWordlist.is_caller_error());
        assert!(!FixPhraseError::IndexOutOfRange { index: 9, size: 3 }.is_caller_error());
        assert!(FixPhraseError::LatitudeOutOfRange(91.0).is_caller_error());
        assert!(FixPhraseError::NotDecodable.is_caller_error());
    }

    #[test]
    fn messages_carry_field_detail() {
        assert_eq!(
            FixPhraseError::InsufficientWordlist { got: 10, need: 7610 }.to_string(),
            "wordlist too short: got 10, need 7610"
        );
        assert_eq!(
            FixPhraseError::LongitudeOutOfRange(180.5).to_string(),
            "longitude out of range: 180.5"
        );
        assert_eq!(
            FixPhraseError::TooFewWords { got: 1 }.code(),
            "too_few_words"
        );
    }

    #[test]
    fn not_decodable_message_is_stable() {
        assert_eq!(
            FixPhraseError::NotDecodable.to_string(),
            "supplied words input error?  This phrase is not decodable."
        );
    }
}
