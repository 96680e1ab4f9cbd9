//! Parses the trailing price off a free-text item line.
//!
//! Users type things like `kopi 15 ribu`, `bensin 1,5jt` or `parkir 2000`.
//! The price must sit at the very end of the line; whatever precedes it is
//! the item description.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

lazy_static! {
    // <blank><digits>[,<digits>] [blanks] [multiplier], anchored at end of line.
    // The number must open the text or follow a space or tab, never a `.`,
    // `,`, digit or newline. Leftmost match of an end-anchored pattern is the
    // longest price suffix.
    static ref PRICE_SUFFIX: Regex = Regex::new(
        r"(?i)(?:^|[ \t])([0-9]+)(?:,([0-9]+))?(?:[ \t]*(ribu|rb|k|juta|jt))?$"
    ).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplier {
    None,
    Thousand,
    Million,
}

impl Multiplier {
    pub const THOUSAND_ALIASES: [&'static str; 3] = ["ribu", "rb", "k"];
    pub const MILLION_ALIASES: [&'static str; 2] = ["juta", "jt"];

    fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.to_lowercase();
        if Self::THOUSAND_ALIASES.contains(&alias.as_str()) {
            Some(Multiplier::Thousand)
        } else if Self::MILLION_ALIASES.contains(&alias.as_str()) {
            Some(Multiplier::Million)
        } else {
            None
        }
    }

    pub fn factor(self) -> Decimal {
        match self {
            Multiplier::None => Decimal::ONE,
            Multiplier::Thousand => Decimal::from(1_000),
            Multiplier::Million => Decimal::from(1_000_000),
        }
    }
}

/// A price as written by the user, before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    pub value: Decimal,
    pub multiplier: Multiplier,
}

impl Amount {
    /// Scaled and rounded to whole currency units, half away from zero.
    ///
    /// Returns `None` if the result does not fit in an `i64`.
    pub fn canonical(&self) -> Option<i64> {
        self.value
            .checked_mul(self.multiplier.factor())?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub description: String,
    pub amount: Amount,
    /// `amount` collapsed to whole currency units
    pub price: i64,
}

/// Splits `text` into a description and a trailing price.
///
/// Returns `None` when the line carries no trailing price, or when nothing
/// but the price is left (a bare amount names no item).
pub fn parse_line(text: &str) -> Option<ParsedLine> {
    let text = text.trim();
    let caps = PRICE_SUFFIX.captures(text)?;
    let matched = caps.get(0)?;

    let description = text[..matched.start()].trim();
    if description.is_empty() {
        return None;
    }

    let literal = match caps.get(2) {
        Some(fraction) => format!("{}.{}", &caps[1], fraction.as_str()),
        None => caps[1].to_string(),
    };
    let value = Decimal::from_str(&literal).ok()?;

    let multiplier = match caps.get(3) {
        Some(alias) => Multiplier::from_alias(alias.as_str())?,
        None => Multiplier::None,
    };

    let amount = Amount { value, multiplier };
    let price = amount.canonical()?;

    Some(ParsedLine {
        description: description.to_string(),
        amount,
        price,
    })
}

/// Whether `text` ends with something [`parse_line`] would accept.
pub fn has_price(text: &str) -> bool {
    parse_line(text).is_some()
}
