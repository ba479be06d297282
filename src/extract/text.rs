//! Text-to-number cleaning routines
//!
//! Listing markup wraps numbers in currency symbols, unit suffixes, and
//! thousands separators. These helpers carve the number out and degrade to
//! `None` on anything unparseable.

/// Extracts an integer price from display text
///
/// Keeps only digits, commas, and periods, then strips the commas and
/// periods entirely. Separators are always treated as thousands grouping,
/// never as decimal points; the dirham has no subunit in listing practice,
/// so `"1 234,00 DH"` intentionally becomes `123400`.
pub fn clean_price(text: &str) -> Option<i64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let digits: String = kept.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Extracts the first run of digits anywhere in the text
///
/// `"3 pièces"` yields `3`; text without digits yields `None`.
pub fn extract_number(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run: String = text[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    run.parse().ok()
}
