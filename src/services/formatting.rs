//! User-facing texts, in Indonesian.

use chrono::{Datelike, NaiveDate};

/// Literal prompts and replies of the chat protocol.
///
/// The two prompts double as conversation state: a reply is matched to its
/// flow by comparing the replied message's text with them byte for byte, so
/// rewording one orphans every prompt already sent.
pub mod texts {
    pub const INSERT_PROMPT: &str = "apa saja yang pengen dicatat, bos?";
    pub const LIST_PROMPT: &str = "pengen lihat daftar catatan yang mana bos? 👀";
    pub const UPDATED: &str = "sudah diubah nih bos 👆";
}

const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// `15000` -> `15.000`
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if price < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// `16 Oktober`
pub fn format_day(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTH_NAMES[date.month0() as usize])
}

/// Backslash-escapes the characters legacy Telegram Markdown treats as
/// entity delimiters, so user text always renders literally.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Markdown confirmation sent for every recorded line; also the text an
/// update rewrites the confirmation to.
pub fn saved_text(name: &str, price: i64) -> String {
    format!("*{} {}* dicatat ya bos 👌", escape_markdown(name), format_price(price))
}

pub fn save_failed_text(name: &str, price: i64) -> String {
    format!(
        "gagal nyatet *{} {}*, coba lagi ya bos 🙏",
        escape_markdown(name),
        format_price(price)
    )
}
