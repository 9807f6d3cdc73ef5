//! Transcript text canonicalization.
//!
//! Ground-truth and ASR sentences are compared in a canonical form:
//! lower-case, free of punctuation and scrub markers, with small numbers
//! spelled out. Randomly generated baseline sentences pass through the same
//! function so that baseline and real distances stay directly comparable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches scrubbed spans (`[laugh]`, `[name redacted]`) and trailing
/// ` - ...` annotations. Applied before punctuation removal, otherwise the
/// brackets are stripped and the scrubbed words leak into the text.
static SCRUB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*\]|\s-\s.*").expect("scrub pattern is valid"));

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 8] = [
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const ORDINALS: [(&str, &str); 10] = [
    ("1st", "first"),
    ("2nd", "second"),
    ("3rd", "third"),
    ("4th", "fourth"),
    ("5th", "fifth"),
    ("6th", "sixth"),
    ("7th", "seventh"),
    ("8th", "eighth"),
    ("9th", "ninth"),
    ("10th", "tenth"),
];

/// Canonicalize an input text string.
///
/// - Converts to lower-case.
/// - Removes scrubbed data (denoted by brackets, e.g. `[laugh]`).
/// - Removes ASCII punctuation.
/// - Converts numbers 0-99 and ordinals 1st-10th into words.
/// - Collapses runs of whitespace.
///
/// A sentence consisting entirely of scrubbed content canonicalizes to the
/// empty string.
///
/// # Examples
///
/// ```
/// use semdist::text::canonicalize;
///
/// assert_eq!(canonicalize("I'm 48 years old. [laugh]"), "im forty eight years old");
/// assert_eq!(canonicalize("The 2nd session"), "the second session");
/// ```
#[must_use]
pub fn canonicalize(text: &str) -> String {
    let mut text = text.to_lowercase();

    // Scrub removal must precede punctuation removal.
    if text.contains('[') {
        text = SCRUB_RE.replace_all(&text, "").into_owned();
    }

    let text: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();

    let tokens: Vec<String> = text
        .split(' ')
        .map(|token| {
            if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
                digits_to_words(token)
            } else if let Some(word) = ordinal_to_word(token) {
                word.to_string()
            } else {
                token.to_string()
            }
        })
        .collect();

    let text = tokens.join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert a number, represented as digits, into English words.
///
/// e.g. `12` -> `twelve`, `48` -> `forty eight`. Numbers above 99 have no
/// spoken form in the transcripts and map to the empty string, which the
/// whitespace collapse in [`canonicalize`] then drops.
#[must_use]
pub fn digits_to_words(digits: &str) -> String {
    let Ok(value) = digits.parse::<u32>() else {
        return String::new();
    };
    match value {
        0..=19 => ONES[value as usize].to_string(),
        20..=99 => {
            let tens = (value / 10) as usize;
            let below_ten = (value % 10) as usize;
            if below_ten == 0 {
                TENS[tens - 2].to_string()
            } else {
                format!("{} {}", TENS[tens - 2], ONES[below_ten])
            }
        }
        _ => String::new(),
    }
}

fn ordinal_to_word(token: &str) -> Option<&'static str> {
    ORDINALS
        .iter()
        .find(|(ordinal, _)| *ordinal == token)
        .map(|(_, word)| *word)
}
