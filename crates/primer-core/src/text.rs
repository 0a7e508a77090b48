//! # Text Utility
//!
//! An immutable text value with character/word transformations, approximate
//! matching, prefix/suffix/substring algorithms, PII masking and digests.
//!
//! Every transformation returns a new `TextUtility`; nothing mutates in place.
//! Positions and lengths are counted in `char`s unless stated otherwise.

use crate::primitives::{
    CARD_MASK, CARD_PATTERN, DEFAULT_CUTOFF, DEFAULT_MATCH_COUNT, DIGIT_RUN_PATTERN, EMAIL_PATTERN,
};
use crate::{Kinded, PrimitiveError, Value, ValueKind};
use num_bigint::BigUint;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use std::sync::LazyLock;
use subtle::ConstantTimeEq;

static EMAIL: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN));
static CARD: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(CARD_PATTERN));
static DIGIT_RUN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(DIGIT_RUN_PATTERN));

// =============================================================================
// EDIT DISTANCE
// =============================================================================

/// Levenshtein distance between `a` and `b` (insert, delete and substitute
/// each cost 1), counted over `char`s.
///
/// Two-row dynamic programming: O(|a|·|b|) time, O(|b|) space.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == *cb {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Parameters of `TextUtility::closest_matches`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    /// Maximum number of matches returned. Must be at least 1.
    pub n: usize,
    /// Fraction of `len(self)` allowed as edit distance. Must lie in [0, 1].
    pub cutoff: f64,
}

impl MatchOptions {
    #[must_use]
    pub const fn new(n: usize, cutoff: f64) -> Self {
        Self { n, cutoff }
    }

    /// Check both parameters against their intervals.
    pub fn validate(&self) -> Result<(), PrimitiveError> {
        if self.n == 0 {
            return Err(PrimitiveError::interval("n", self.n, "[1, inf)"));
        }
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(PrimitiveError::interval("cutoff", self.cutoff, "[0.0, 1.0]"));
        }
        Ok(())
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_COUNT, DEFAULT_CUTOFF)
    }
}

/// Digest algorithms accepted by `TextUtility::hash_digest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    #[cfg(feature = "blake3")]
    Blake3,
}

impl DigestAlgorithm {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            #[cfg(feature = "blake3")]
            Self::Blake3 => "blake3",
        }
    }

    fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha224 => hex::encode(Sha224::digest(bytes)),
            Self::Sha256 => hex::encode(Sha256::digest(bytes)),
            Self::Sha384 => hex::encode(Sha384::digest(bytes)),
            Self::Sha512 => hex::encode(Sha512::digest(bytes)),
            #[cfg(feature = "blake3")]
            Self::Blake3 => blake3::hash(bytes).to_hex().to_string(),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            #[cfg(feature = "blake3")]
            "blake3" => Ok(Self::Blake3),
            _ => Err(PrimitiveError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A regular-expression match: byte offsets into the searched text plus the
/// matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

// =============================================================================
// TEXT UTILITY
// =============================================================================

/// Immutable text value.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TextUtility(String);

impl TextUtility {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in `char`s.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    // =========================================================================
    // TRANSFORMATIONS
    // =========================================================================

    /// Apply `rule` to every character and concatenate the results.
    #[must_use]
    pub fn transform<F, S>(&self, mut rule: F) -> Self
    where
        F: FnMut(char) -> S,
        S: Into<String>,
    {
        Self(self.0.chars().map(|c| -> String { rule(c).into() }).collect())
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        Self(self.0.chars().rev().collect())
    }

    #[must_use]
    pub fn is_palindrome(&self) -> bool {
        self.0.chars().eq(self.0.chars().rev())
    }

    /// Keep the first occurrence of each character. Characters in `exclude`
    /// are always kept, even on repeat.
    #[must_use]
    pub fn remove_repeated_chars(&self, exclude: &[char]) -> Self {
        let mut seen = BTreeSet::new();
        Self(
            self.0
                .chars()
                .filter(|c| exclude.contains(c) || seen.insert(*c))
                .collect(),
        )
    }

    /// Keep the first occurrence of each space-separated word. Words in
    /// `exclude` are always kept, even on repeat.
    #[must_use]
    pub fn remove_duplicate_words(&self, exclude: &[&str]) -> Self {
        let mut seen = BTreeSet::new();
        let kept: Vec<&str> = self
            .0
            .split(' ')
            .filter(|word| exclude.contains(word) || seen.insert(*word))
            .collect();
        Self(kept.join(" "))
    }

    /// Replace only the first occurrence of `old` with `new`. No-op if `old`
    /// does not occur.
    #[must_use]
    pub fn replace_first_occurrence(&self, old: &str, new: &str) -> Self {
        Self(self.0.replacen(old, new, 1))
    }

    /// Join `words` with spaces and put them in front of this text.
    #[must_use]
    pub fn prepend_words<I>(&self, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let joined: Vec<String> = words.into_iter().map(|w| w.to_string()).collect();
        Self(format!("{} {}", joined.join(" "), self.0))
    }

    // =========================================================================
    // MATCHING
    // =========================================================================

    /// First match of the regular expression `pattern`, if any.
    pub fn find_substring(&self, pattern: &str) -> Result<Option<TextMatch>, PrimitiveError> {
        let re = Regex::new(pattern).map_err(|e| PrimitiveError::InvalidPattern(e.to_string()))?;
        Ok(re.find(&self.0).map(|m| TextMatch {
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        }))
    }

    /// Up to `options.n` candidates whose edit distance to this text is at
    /// most `char_count * options.cutoff`, nearest first. Candidates at the
    /// same distance keep their input order.
    pub fn closest_matches<S: AsRef<str>>(
        &self,
        candidates: &[S],
        options: MatchOptions,
    ) -> Result<Vec<String>, PrimitiveError> {
        options.validate()?;
        let max_distance = self.char_count() as f64 * options.cutoff;

        let mut scored: Vec<(usize, &str)> = candidates
            .iter()
            .map(AsRef::as_ref)
            .map(|candidate| (edit_distance(&self.0, candidate), candidate))
            .filter(|(distance, _)| *distance as f64 <= max_distance)
            .collect();
        scored.sort_by_key(|(distance, _)| *distance);

        Ok(scored
            .into_iter()
            .take(options.n)
            .map(|(_, candidate)| candidate.to_string())
            .collect())
    }

    #[must_use]
    pub fn longest_common_prefix(&self, other: &str) -> Self {
        Self(
            self.0
                .chars()
                .zip(other.chars())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        )
    }

    #[must_use]
    pub fn longest_common_suffix(&self, other: &str) -> Self {
        let reversed: Vec<char> = self
            .0
            .chars()
            .rev()
            .zip(other.chars().rev())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect();
        Self(reversed.into_iter().rev().collect())
    }

    /// Longest run of characters occurring in both texts.
    ///
    /// O(n·m) dynamic programming over a rolling row. Among equally long runs
    /// the one ending first in `self` wins.
    #[must_use]
    pub fn longest_common_substring(&self, other: &str) -> Self {
        let a: Vec<char> = self.0.chars().collect();
        let b: Vec<char> = other.chars().collect();
        let mut previous = vec![0usize; b.len() + 1];
        let mut current = vec![0usize; b.len() + 1];
        let (mut longest, mut end) = (0, 0);

        for (x, ca) in a.iter().enumerate() {
            for (y, cb) in b.iter().enumerate() {
                current[y + 1] = if ca == cb { previous[y] + 1 } else { 0 };
                if current[y + 1] > longest {
                    longest = current[y + 1];
                    end = x + 1;
                }
            }
            std::mem::swap(&mut previous, &mut current);
        }
        Self(a[end - longest..end].iter().collect())
    }

    // =========================================================================
    // EXTRACTION / VALIDATION
    // =========================================================================

    /// Every maximal run of ASCII digits, parsed, left to right. Runs of any
    /// length are accepted.
    pub fn extract_numbers(&self) -> Result<Vec<BigUint>, PrimitiveError> {
        let re = DIGIT_RUN
            .as_ref()
            .map_err(|e| PrimitiveError::InvalidPattern(e.to_string()))?;
        re.find_iter(&self.0)
            .map(|m| {
                m.as_str()
                    .parse::<BigUint>()
                    .map_err(|_| PrimitiveError::InvalidNumber(m.as_str().to_string()))
            })
            .collect()
    }

    /// Heuristic e-mail check (`local@domain.tld`, lowercase 2-6 letter TLD).
    /// Not a grammar.
    #[must_use]
    pub fn is_valid_email(&self) -> bool {
        EMAIL.as_ref().is_ok_and(|re| re.is_match(&self.0))
    }

    /// Replace all but the first and last four digits of each run of 12 or
    /// more digits with a fixed-width run of `X`.
    ///
    /// The mask width does not depend on how many digits it hides.
    pub fn mask_credit_card(&self) -> Result<Self, PrimitiveError> {
        let re = CARD
            .as_ref()
            .map_err(|e| PrimitiveError::InvalidPattern(e.to_string()))?;
        let replacement = format!("${{1}}{CARD_MASK}${{2}}");
        Ok(Self(re.replace_all(&self.0, replacement.as_str()).into_owned()))
    }

    // =========================================================================
    // DIGESTS
    // =========================================================================

    /// Lowercase hex digest of the UTF-8 bytes under `algorithm`.
    #[must_use]
    pub fn hash_digest(&self, algorithm: DigestAlgorithm) -> Self {
        Self(algorithm.hex_digest(self.0.as_bytes()))
    }

    /// Digest under an algorithm named at runtime (`"sha256"`, `"sha512"`, ...).
    pub fn hash_digest_named(&self, algorithm: &str) -> Result<Self, PrimitiveError> {
        Ok(self.hash_digest(algorithm.parse()?))
    }

    /// Constant-time equality against another digest.
    #[must_use]
    pub fn compare_hashes(&self, other: &str) -> bool {
        self.0.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl Kinded for TextUtility {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }
}

impl fmt::Display for TextUtility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TextUtility {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TextUtility {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TextUtility {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<TextUtility> for Value {
    fn from(text: TextUtility) -> Self {
        Self::Text(text.0)
    }
}

/// Concatenation.
impl Add<&str> for &TextUtility {
    type Output = TextUtility;

    fn add(self, other: &str) -> TextUtility {
        TextUtility(format!("{}{other}", self.0))
    }
}

// =============================================================================
// TESTS
// =============================================================================
