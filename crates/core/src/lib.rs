//! # FixPhrase Core
//!
//! Bidirectional codec between geographic coordinates and four-word phrases.
//!
//! ## Architecture
//!
//! ```text
//! (lat, lon)
//!     │
//!     ├──> Scale to 4 decimals, offset to non-negative 7-digit integers
//!     │
//!     ├──> Digit packing
//!     │      ├─ lat d1..d4           → Latitude band       [0, 2000)
//!     │      ├─ lon d1..d4           → Longitude band      [2000, 5610)
//!     │      ├─ lat d5 d6 + lon d5   → Hundredths band     [5610, 6610)
//!     │      └─ lat d7 + lon d6 d7   → TenThousandths band [6610, 7610)
//!     │
//!     └──> Dictionary lookup → "word word word word"
//! ```
//!
//! Decoding runs the other way and accepts two, three or four words, lowering
//! the accuracy tier when the trailing bands are missing.
//!
//! ## Example
//!
//! ```rust
//! use fixphrase_core::{decode, encode, Dictionary, REQUIRED_WORDS};
//!
//! let words: Vec<String> = (0..REQUIRED_WORDS).map(|i| format!("w{i}")).collect();
//! let dictionary = Dictionary::build(words).unwrap();
//!
//! let encoded = encode(&dictionary, 52.5902, -2.1304).unwrap();
//! let decoded = decode(&dictionary, &encoded.phrase).unwrap();
//! assert_eq!((decoded.lat, decoded.lon), (52.5902, -2.1304));
//! assert_eq!(decoded.accuracy_degrees, 0.0001);
//! ```

mod decode;
mod dictionary;
mod encode;
mod error;
mod types;

pub use decode::decode;
pub use dictionary::Dictionary;
pub use encode::encode;
pub use error::{FixPhraseError, Result};
pub use types::{Accuracy, Band, Decoded, Encoded, REQUIRED_WORDS};
