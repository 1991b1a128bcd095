//! Fixed-point ether amounts
//!
//! Prices on chain are integers scaled by 10^18. Display divides by 10^18 and
//! rounds to four decimal places; submission goes the other way through
//! [`parse_ether`], which works on the decimal text directly so no float ever
//! touches a submitted amount.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Number of decimals in one ether
pub const ETHER_DECIMALS: u32 = 18;

/// Decimal places shown by [`Wei::display_eth`]
pub const DISPLAY_DECIMALS: u32 = 4;

const WEI_PER_ETHER: u128 = 10u128.pow(ETHER_DECIMALS);

/// Errors from parsing a decimal ether amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount {0:?} is not a decimal number")]
    Malformed(String),

    #[error("amount {0:?} has more than 18 decimal places")]
    TooPrecise(String),

    #[error("amount {0:?} is too large")]
    Overflow(String),
}

/// An amount in wei (10^-18 ether)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wei(pub u128);

impl Wei {
    pub const ZERO: Wei = Wei(0);

    pub fn as_u128(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Ether amount rounded half-up to four decimal places, e.g. `"1.2500"`
    pub fn display_eth(&self) -> String {
        let unit = 10u128.pow(ETHER_DECIMALS - DISPLAY_DECIMALS);
        let mut scaled = self.0 / unit;
        if self.0 % unit >= unit / 2 {
            scaled += 1;
        }
        let denom = 10u128.pow(DISPLAY_DECIMALS);
        format!(
            "{}.{:0width$}",
            scaled / denom,
            scaled % denom,
            width = DISPLAY_DECIMALS as usize
        )
    }

    /// Decimal string used on the wire
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.display_eth())
    }
}

impl From<u128> for Wei {
    fn from(value: u128) -> Self {
        Wei(value)
    }
}

/// Exact ether representation with trailing zeros trimmed, e.g. `"0.000000000000000001"`
pub fn format_ether(wei: Wei) -> String {
    let whole = wei.0 / WEI_PER_ETHER;
    let frac = wei.0 % WEI_PER_ETHER;
    if frac == 0 {
        return format!("{}.0", whole);
    }
    let digits = format!("{:018}", frac);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Parse a decimal ether amount (`"1"`, `"0.25"`, `".5"`) into wei
pub fn parse_ether(input: &str) -> Result<Wei, AmountError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Malformed(text.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Malformed(text.to_string()));
    }
    if frac.len() > ETHER_DECIMALS as usize {
        return Err(AmountError::TooPrecise(text.to_string()));
    }

    let overflow = || AmountError::Overflow(text.to_string());

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| overflow())?
            .checked_mul(WEI_PER_ETHER)
            .ok_or_else(overflow)?
    };

    let frac_wei = if frac.is_empty() {
        0
    } else {
        let padding = ETHER_DECIMALS - frac.len() as u32;
        frac.parse::<u128>().map_err(|_| overflow())? * 10u128.pow(padding)
    };

    whole_wei.checked_add(frac_wei).map(Wei).ok_or_else(overflow)
}

impl Serialize for Wei {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

/// Exact integer text, decimal or `0x`-prefixed hex
fn parse_wei_text<E: de::Error>(text: &str) -> Result<Wei, E> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u128::from_str_radix(hex, 16),
        None => text.parse::<u128>(),
    };
    parsed
        .map(Wei)
        .map_err(|e| E::custom(format!("invalid amount {:?}: {}", text, e)))
}

// Numbers go through `serde_json::Number`, which keeps the original digits
// (`arbitrary_precision`), so uint256 prices above u64::MAX decode exactly.
impl<'de> Deserialize<'de> for Wei {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_u64() {
                Some(v) => Ok(Wei(u128::from(v))),
                None => parse_wei_text(&n.to_string()),
            },
            Value::String(s) => parse_wei_text(s.trim()),
            other => Err(de::Error::custom(format!(
                "expected a non-negative integer or a decimal/hex integer string, found {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fraction() {
        assert_eq!(parse_ether("1").unwrap(), Wei(WEI_PER_ETHER));
        assert_eq!(parse_ether("0.25").unwrap(), Wei(WEI_PER_ETHER / 4));
        assert_eq!(parse_ether(".5").unwrap(), Wei(WEI_PER_ETHER / 2));
        assert_eq!(parse_ether("2.").unwrap(), Wei(2 * WEI_PER_ETHER));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), Wei(1));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_ether("  "), Err(AmountError::Empty));
        assert!(matches!(parse_ether("."), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_ether("-1"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_ether("1e18"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_ether("1.2.3"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_ether("NaN"), Err(AmountError::Malformed(_))));
        assert!(matches!(
            parse_ether("0.0000000000000000001"),
            Err(AmountError::TooPrecise(_))
        ));
        assert!(matches!(
            parse_ether("999999999999999999999999"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn test_display_rounds_to_four_places() {
        assert_eq!(Wei(WEI_PER_ETHER).display_eth(), "1.0000");
        assert_eq!(Wei(1_234_567_000_000_000_000).display_eth(), "1.2346");
        assert_eq!(Wei(999_950_000_000_000_000).display_eth(), "1.0000");
        assert_eq!(Wei(1).display_eth(), "0.0000");
        assert_eq!(Wei::ZERO.to_string(), "0.0000 ETH");
    }

    #[test]
    fn test_display_then_parse_is_identity_at_display_precision() {
        for wei in [
            0u128,
            WEI_PER_ETHER,
            1_500_000_000_000_000_000,
            100_000_000_000_000,
            42 * WEI_PER_ETHER + 7_000_000_000_000_000,
        ] {
            assert_eq!(parse_ether(&Wei(wei).display_eth()).unwrap(), Wei(wei));
        }
    }

    #[test]
    fn test_format_ether_is_exact() {
        assert_eq!(format_ether(Wei(1)), "0.000000000000000001");
        assert_eq!(format_ether(Wei(3 * WEI_PER_ETHER)), "3.0");
        assert_eq!(parse_ether(&format_ether(Wei(123_456_789))).unwrap(), Wei(123_456_789));
    }

    #[test]
    fn test_wei_serde() {
        let wei: Wei = serde_json::from_str("\"2500000000000000000\"").unwrap();
        assert_eq!(wei, Wei(2_500_000_000_000_000_000));
        let wei: Wei = serde_json::from_str("\"0x0de0b6b3a7640000\"").unwrap();
        assert_eq!(wei, Wei(WEI_PER_ETHER));
        let wei: Wei = serde_json::from_str("1000").unwrap();
        assert_eq!(wei, Wei(1000));
        assert_eq!(serde_json::to_string(&Wei(7)).unwrap(), "\"7\"");
        assert!(serde_json::from_str::<Wei>("-1").is_err());
        assert!(serde_json::from_str::<Wei>("1.5").is_err());
        assert!(serde_json::from_str::<Wei>("true").is_err());
    }

    #[test]
    fn test_wei_from_number_above_u64() {
        // 20 ETH does not fit in a u64
        let wei: Wei = serde_json::from_str("20000000000000000000").unwrap();
        assert_eq!(wei, Wei(20 * WEI_PER_ETHER));

        let value: serde_json::Value =
            serde_json::from_str(r#"{"price": 123456789012345678901}"#).unwrap();
        let wei: Wei = serde_json::from_value(value["price"].clone()).unwrap();
        assert_eq!(wei, Wei(123_456_789_012_345_678_901));
    }
}
