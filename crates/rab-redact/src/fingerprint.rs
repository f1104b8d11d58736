//! One-way word fingerprints.
//!
//! A fingerprint lets a report say "this word was redacted, and here is
//! what kind of word it was" without revealing the word: the SHA-256
//! digest in hex, plus the sorted set of Unicode general categories of
//! the word's characters.

use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Fingerprint a sensitive word before it is censored out of a report.
///
/// Deterministic: the same word always produces the same fingerprint.
///
/// ```
/// let fp = rab_redact::censor_word("alice");
/// assert_eq!(fp, rab_redact::censor_word("alice"));
/// assert!(fp.contains("unicode=`Ll`"));
/// ```
pub fn censor_word(word: &str) -> String {
    let digest = Sha256::digest(word.as_bytes());
    let categories: BTreeSet<&'static str> = word
        .chars()
        .map(|c| category_abbrev(get_general_category(c)))
        .collect();
    let categories: Vec<&str> = categories.into_iter().collect();
    format!(
        "sha256=`{}`, unicode=`{}`",
        hex::encode(digest),
        categories.join(" ")
    )
}

/// Standard two-letter abbreviation for a Unicode general category.
fn category_abbrev(category: GeneralCategory) -> &'static str {
    match category {
        GeneralCategory::UppercaseLetter => "Lu",
        GeneralCategory::LowercaseLetter => "Ll",
        GeneralCategory::TitlecaseLetter => "Lt",
        GeneralCategory::ModifierLetter => "Lm",
        GeneralCategory::OtherLetter => "Lo",
        GeneralCategory::NonspacingMark => "Mn",
        GeneralCategory::SpacingMark => "Mc",
        GeneralCategory::EnclosingMark => "Me",
        GeneralCategory::DecimalNumber => "Nd",
        GeneralCategory::LetterNumber => "Nl",
        GeneralCategory::OtherNumber => "No",
        GeneralCategory::ConnectorPunctuation => "Pc",
        GeneralCategory::DashPunctuation => "Pd",
        GeneralCategory::OpenPunctuation => "Ps",
        GeneralCategory::ClosePunctuation => "Pe",
        GeneralCategory::InitialPunctuation => "Pi",
        GeneralCategory::FinalPunctuation => "Pf",
        GeneralCategory::OtherPunctuation => "Po",
        GeneralCategory::MathSymbol => "Sm",
        GeneralCategory::CurrencySymbol => "Sc",
        GeneralCategory::ModifierSymbol => "Sk",
        GeneralCategory::OtherSymbol => "So",
        GeneralCategory::SpaceSeparator => "Zs",
        GeneralCategory::LineSeparator => "Zl",
        GeneralCategory::ParagraphSeparator => "Zp",
        GeneralCategory::Control => "Cc",
        GeneralCategory::Format => "Cf",
        GeneralCategory::Surrogate => "Cs",
        GeneralCategory::PrivateUse => "Co",
        GeneralCategory::Unassigned => "Cn",
    }
}
