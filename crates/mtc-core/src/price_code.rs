//! # Price Code Codec
//!
//! Cost prices are written on shelf tags and shown to staff as mnemonic
//! letter codes instead of digits, so customers cannot read them.
//!
//! ## Digit Alphabet
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   digit:   0   1   2   3   4   5   6   7   8   9                        │
//! │   letter:  S   M   A   C   H   I   N   E   R   Y                        │
//! │                                                                         │
//! │   1023  ──encode──►  "MSAC"  ──decode──►  1023                          │
//! │    120  ──encode──►  "MAS"                                              │
//! │      0  ──encode──►  "S"                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One letter per decimal digit, most significant first. There is no sign and
//! no fraction: codes describe whole currency units only, so
//! [`encode_money`] truncates cents before encoding.
//!
//! Decoding is case-insensitive and returns an explicit [`PriceCodeError`]
//! for malformed input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::PriceCodeError;
use crate::money::{Money, CENTS_PER_UNIT};

/// Letter for each decimal digit, indexed by digit value.
pub const DIGIT_ALPHABET: [char; 10] = ['S', 'M', 'A', 'C', 'H', 'I', 'N', 'E', 'R', 'Y'];

/// Largest whole-unit amount [`decode_money`] accepts (17 digits).
pub const MAX_MONEY_UNITS: u64 = (i64::MAX / CENTS_PER_UNIT) as u64;

/// Result type for codec operations.
pub type PriceCodeResult<T> = Result<T, PriceCodeError>;

// =============================================================================
// PriceCode
// =============================================================================

/// A validated, upper-case price code.
///
/// Only obtainable through [`encode`], [`encode_money`] or parsing, so every
/// character is guaranteed to be in [`DIGIT_ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export, as = "String")]
pub struct PriceCode(String);

impl PriceCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters, equal to the digit count of the amount.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a price code has at least one letter.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes this code back to whole currency units.
    pub fn amount(&self) -> PriceCodeResult<u64> {
        decode(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PriceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PriceCode {
    type Err = PriceCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(PriceCodeError::Empty);
        }

        let mut normalized = String::with_capacity(s.len());
        for (position, character) in s.chars().enumerate() {
            let digit = digit_for(character)
                .ok_or(PriceCodeError::InvalidCharacter { character, position })?;
            normalized.push(DIGIT_ALPHABET[digit as usize]);
        }

        Ok(PriceCode(normalized))
    }
}

impl TryFrom<String> for PriceCode {
    type Error = PriceCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceCode> for String {
    fn from(code: PriceCode) -> Self {
        code.0
    }
}

// =============================================================================
// Alphabet Lookups
// =============================================================================

/// Returns the letter for a decimal digit (0-9).
#[inline]
pub fn letter_for(digit: u8) -> Option<char> {
    DIGIT_ALPHABET.get(digit as usize).copied()
}

/// Returns the digit a letter stands for, ignoring case.
#[inline]
pub fn digit_for(letter: char) -> Option<u8> {
    let upper = letter.to_ascii_uppercase();
    DIGIT_ALPHABET
        .iter()
        .position(|&c| c == upper)
        .map(|d| d as u8)
}

// =============================================================================
// Operations
// =============================================================================

/// Encodes a whole amount as a price code.
///
/// ## Example
/// ```rust
/// use mtc_core::price_code::encode;
///
/// assert_eq!(encode(1023).as_str(), "MSAC");
/// assert_eq!(encode(0).as_str(), "S");
/// ```
pub fn encode(amount: u64) -> PriceCode {
    let code = amount
        .to_string()
        .bytes()
        .map(|b| DIGIT_ALPHABET[(b - b'0') as usize])
        .collect();
    PriceCode(code)
}

/// Encodes the whole-unit part of a monetary amount.
///
/// Cents are truncated: 120.99 encodes like 120. Negative amounts are
/// rejected rather than encoded.
///
/// ## Example
/// ```rust
/// use mtc_core::money::Money;
/// use mtc_core::price_code::encode_money;
///
/// let code = encode_money(Money::from_cents(12_099)).unwrap();
/// assert_eq!(code.as_str(), "MAS");
/// assert!(encode_money(Money::from_cents(-100)).is_err());
/// ```
pub fn encode_money(amount: Money) -> PriceCodeResult<PriceCode> {
    if amount.is_negative() {
        return Err(PriceCodeError::NegativeAmount {
            cents: amount.cents(),
        });
    }
    Ok(encode(amount.major() as u64))
}

/// Decodes a price code to whole currency units.
///
/// ## Errors
/// - [`PriceCodeError::Empty`] for empty or whitespace-only input
/// - [`PriceCodeError::InvalidCharacter`] for any letter outside the alphabet
/// - [`PriceCodeError::Overflow`] when the value exceeds `u64`
///
/// ## Example
/// ```rust
/// use mtc_core::price_code::decode;
///
/// assert_eq!(decode("MSAC").unwrap(), 1023);
/// assert_eq!(decode("msac").unwrap(), 1023);
/// assert_eq!(decode("S").unwrap(), 0);
/// assert!(decode("MXAC").is_err());
/// ```
pub fn decode(code: &str) -> PriceCodeResult<u64> {
    if code.trim().is_empty() {
        return Err(PriceCodeError::Empty);
    }

    let mut value: u64 = 0;
    for (position, character) in code.chars().enumerate() {
        let digit = digit_for(character)
            .ok_or(PriceCodeError::InvalidCharacter { character, position })?;

        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(|| PriceCodeError::Overflow {
                code: code.to_string(),
                max: u64::MAX,
            })?;
    }

    Ok(value)
}

/// Decodes a price code into money (whole units, zero cents).
pub fn decode_money(code: &str) -> PriceCodeResult<Money> {
    let units = decode(code)?;
    Money::checked_from_major(units).ok_or_else(|| PriceCodeError::Overflow {
        code: code.to_string(),
        max: MAX_MONEY_UNITS,
    })
}

/// Checks whether every character of a non-blank code maps to a digit.
pub fn is_valid_code(code: &str) -> bool {
    !code.trim().is_empty() && code.chars().all(|c| digit_for(c).is_some())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_is_a_bijection() {
        for digit in 0..10u8 {
            let letter = letter_for(digit).unwrap();
            assert_eq!(digit_for(letter), Some(digit));
            assert_eq!(digit_for(letter.to_ascii_lowercase()), Some(digit));
        }
        assert_eq!(letter_for(10), None);
        assert_eq!(digit_for('X'), None);
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(1023).as_str(), "MSAC");
        assert_eq!(encode(120).as_str(), "MAS");
        assert_eq!(encode(0).as_str(), "S");
        assert_eq!(encode(9_876_543_210).as_str(), "YRENIHCAMS");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("MSAC"), Ok(1023));
        assert_eq!(decode("mSaC"), Ok(1023));
        assert_eq!(decode("S"), Ok(0));
        // Leading zero letters are accepted and dropped.
        assert_eq!(decode("SAC"), Ok(23));
    }

    #[test]
    fn test_round_trip_small_values_and_extremes() {
        for x in 0..2_000u64 {
            assert_eq!(decode(encode(x).as_str()), Ok(x));
        }
        assert_eq!(decode(encode(u64::MAX).as_str()), Ok(u64::MAX));
    }

    #[test]
    fn test_code_length_matches_digit_count() {
        for x in [0u64, 7, 10, 99, 100, 1023, 999_999_999, u64::MAX] {
            assert_eq!(encode(x).len(), x.to_string().len());
        }
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        assert_eq!(
            decode("MXAC"),
            Err(PriceCodeError::InvalidCharacter {
                character: 'X',
                position: 1
            })
        );
        assert!(matches!(
            decode("MSA1"),
            Err(PriceCodeError::InvalidCharacter { character: '1', .. })
        ));
        assert!(matches!(
            decode(" MSAC"),
            Err(PriceCodeError::InvalidCharacter { character: ' ', position: 0 })
        ));
        assert!(matches!(
            decode("MSAÇ"),
            Err(PriceCodeError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_decode_blank_is_distinct_from_zero() {
        assert_eq!(decode(""), Err(PriceCodeError::Empty));
        assert_eq!(decode("   "), Err(PriceCodeError::Empty));
        assert_eq!(decode("S"), Ok(0));
    }

    #[test]
    fn test_decode_overflow_is_reported() {
        // u64::MAX is 20 digits; 21 nines cannot fit.
        let too_big = "Y".repeat(21);
        assert!(matches!(
            decode(&too_big),
            Err(PriceCodeError::Overflow { .. })
        ));
    }

    #[test]
    fn test_encode_money_truncates_cents() {
        assert_eq!(encode_money(Money::from_cents(12_000)).unwrap().as_str(), "MAS");
        assert_eq!(encode_money(Money::from_cents(12_099)).unwrap().as_str(), "MAS");
        assert_eq!(encode_money(Money::from_cents(99)).unwrap().as_str(), "S");
        assert_eq!(
            encode_money(Money::from_cents(-1)),
            Err(PriceCodeError::NegativeAmount { cents: -1 })
        );
    }

    #[test]
    fn test_decode_money_scales_to_cents() {
        assert_eq!(decode_money("MSAC"), Ok(Money::from_cents(102_300)));

        let largest = encode(MAX_MONEY_UNITS);
        assert_eq!(largest.len(), 17);
        assert_eq!(
            decode_money(largest.as_str()),
            Ok(Money::from_cents(MAX_MONEY_UNITS as i64 * CENTS_PER_UNIT))
        );

        let err = decode_money(&"Y".repeat(17)).unwrap_err();
        assert_eq!(
            err,
            PriceCodeError::Overflow {
                code: "Y".repeat(17),
                max: MAX_MONEY_UNITS,
            }
        );
        assert!(err.to_string().contains("92233720368547758"));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("MSAC"));
        assert!(is_valid_code("yres"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("  "));
        assert!(!is_valid_code("MS AC"));
        assert!(!is_valid_code("MSAB"));
    }

    #[test]
    fn test_price_code_parse_normalizes_case() {
        let code: PriceCode = "msac".parse().unwrap();
        assert_eq!(code.as_str(), "MSAC");
        assert_eq!(code.amount(), Ok(1023));
        assert_eq!("".parse::<PriceCode>(), Err(PriceCodeError::Empty));
    }

    #[test]
    fn test_price_code_serde_is_a_plain_string() {
        let code = encode(1023);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"MSAC\"");

        let parsed: PriceCode = serde_json::from_str("\"msac\"").unwrap();
        assert_eq!(parsed, code);

        assert!(serde_json::from_str::<PriceCode>("\"M5AC\"").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trips_every_amount(x in 0u64..1_000_000_000) {
                prop_assert_eq!(decode(encode(x).as_str()), Ok(x));
            }

            #[test]
            fn lowercase_decodes_the_same(x in 0u64..1_000_000_000) {
                let lower = encode(x).as_str().to_ascii_lowercase();
                prop_assert_eq!(decode(&lower), Ok(x));
            }

            #[test]
            fn code_length_is_digit_count(x in any::<u64>()) {
                prop_assert_eq!(encode(x).len(), x.to_string().len());
            }

            #[test]
            fn foreign_character_is_rejected(
                prefix in "[SMACHINERYsmachinery]{0,8}",
                foreign in any::<char>().prop_filter("outside the alphabet", |c| digit_for(*c).is_none()),
                suffix in "[SMACHINERYsmachinery]{0,8}",
            ) {
                let code = format!("{prefix}{foreign}{suffix}");
                let rejected = matches!(
                    decode(&code),
                    Err(PriceCodeError::InvalidCharacter { .. }) | Err(PriceCodeError::Empty)
                );
                prop_assert!(rejected);
                prop_assert!(!is_valid_code(&code));
            }
        }
    }
}
