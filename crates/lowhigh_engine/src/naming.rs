//! Name normalization for the LOW/HIGH convention
//!
//! An entity name is `base + "_" + token`, where the token marks the side of
//! a bake pair. Tokens are matched case-insensitively and only as the exact
//! tail of a name: `Rock_low2` carries no token, `Rock_LOW` does.
//!
//! The legacy tokens `low` and `high` are always recognized, whatever the
//! configured suffixes are, so scenes named under the old defaults keep
//! normalizing to the same base names.

use std::fmt;

use crate::core::config::NamingConfig;

/// Tokens recognized regardless of configuration
pub const LEGACY_TOKENS: [&str; 2] = ["low", "high"];

/// Tail appended to an entity name to name its payload
pub const PAYLOAD_TAIL: &str = "_mesh";

/// Naming errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// Suffix has no characters left after trimming underscores
    #[error("Suffix {0:?} is empty after trimming underscores")]
    EmptySuffix(String),
}

/// Trim leading and trailing underscores from a suffix
pub fn trim_underscores(raw: &str) -> &str {
    raw.trim_matches('_')
}

/// A suffix token, trimmed and guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suffix(String);

impl Suffix {
    /// Build a suffix from user input such as `"_low"` or `"HP"`
    pub fn new(raw: &str) -> Result<Self, NamingError> {
        let token = trim_underscores(raw);
        if token.is_empty() {
            return Err(NamingError::EmptySuffix(raw.to_string()));
        }
        Ok(Self(token.to_string()))
    }

    /// The trimmed token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Suffix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strips any of a set of suffix tokens from names
///
/// Each token is kept as a `"_" + token` needle. Stripping repeats until
/// no needle matches the tail, which makes
/// [`NameNormalizer::base_name`] idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNormalizer {
    needles: Vec<String>,
}

impl NameNormalizer {
    /// Create a normalizer for the given tokens plus the legacy tokens
    ///
    /// Underscores around each token are trimmed; empty tokens are ignored.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalizer = Self { needles: Vec::new() };
        for token in tokens {
            normalizer.push_token(token.as_ref());
        }
        for token in LEGACY_TOKENS {
            normalizer.push_token(token);
        }
        normalizer
    }

    /// Normalizer for the configured LOW and HIGH suffixes
    pub fn from_config(config: &NamingConfig) -> Self {
        Self::new([config.suffix_low(), config.suffix_high()])
    }

    /// Copy of this normalizer that also recognizes `token`
    pub fn extended(&self, token: &str) -> Self {
        let mut normalizer = self.clone();
        normalizer.push_token(token);
        normalizer
    }

    fn push_token(&mut self, token: &str) {
        let token = trim_underscores(token);
        if token.is_empty() {
            return;
        }
        let needle = format!("_{token}");
        if !self.needles.iter().any(|known| tokens_equal(known, &needle)) {
            self.needles.push(needle);
        }
    }

    /// Name with every trailing recognized token removed
    pub fn base_name<'a>(&self, name: &'a str) -> &'a str {
        let mut current = name;
        while let Some(stripped) = self.strip_once(current) {
            current = stripped;
        }
        current
    }

    /// Whether the name ends with a recognized token
    pub fn has_token(&self, name: &str) -> bool {
        self.strip_once(name).is_some()
    }

    fn strip_once<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.needles
            .iter()
            .find_map(|needle| tail_split(name, needle))
            .map(|split| &name[..split])
    }
}

impl Default for NameNormalizer {
    /// Normalizer that only knows the legacy tokens
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

/// Byte offset where `needle` starts as the tail of `name`, ignoring case
///
/// Characters are compared one by one through their lower-case mappings,
/// walking back from the end. Lower-casing can change a character's byte
/// length (`K` U+212A, `İ` U+0130), so the split is taken from `name`'s own
/// char boundaries, never from the needle's length.
fn tail_split(name: &str, needle: &str) -> Option<usize> {
    let mut tail = name.char_indices().rev();
    let mut split = name.len();
    for expected in needle.chars().rev() {
        let (at, found) = tail.next()?;
        if !found.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        split = at;
    }
    Some(split)
}

/// Whether two suffix tokens are the same, ignoring case and surrounding underscores
///
/// Uses the same per-character comparison as suffix matching.
pub fn tokens_equal(a: &str, b: &str) -> bool {
    let (a, b) = (trim_underscores(a), trim_underscores(b));
    !a.is_empty() && tail_split(a, b) == Some(0)
}

/// Remove a trailing `"_" + suffix` token (or a legacy token) from a name
///
/// Case-insensitive and idempotent; names without a token come back unchanged.
pub fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    NameNormalizer::new([suffix]).base_name(name)
}

/// Whether `name` ends with the exact token `"_" + suffix`, ignoring case
pub fn ends_with_token(name: &str, suffix: &str) -> bool {
    let token = trim_underscores(suffix);
    if token.is_empty() {
        return false;
    }
    tail_split(name, &format!("_{token}")).is_some()
}

/// Join a base name and a suffix as `base + "_" + suffix`
///
/// Underscores around `suffix` are trimmed first, so `"_low"` and `"low"`
/// compose identically.
pub fn compose(base: &str, suffix: &str) -> String {
    format!("{}_{}", base, trim_underscores(suffix))
}

/// Payload name derived from its owner's final name
pub fn derived_payload_name(final_name: &str) -> String {
    format!("{final_name}{PAYLOAD_TAIL}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_NAMES: [&str; 10] = [
        "Rock",
        "Rock_low",
        "Rock_LOW_low",
        "Rock_high_low",
        "Rock_low2",
        "_low",
        "Tree_lp",
        "Tree_lp_hp",
        "Crate.001",
        "",
    ];

    #[test]
    fn test_strip_is_idempotent() {
        for suffix in ["low", "high", "lp", "_hp_"] {
            for name in SAMPLE_NAMES {
                let once = strip_suffix(name, suffix);
                assert_eq!(strip_suffix(once, suffix), once, "name {name:?} suffix {suffix:?}");
            }
        }
    }

    #[test]
    fn test_compose_round_trip() {
        for base in ["Rock", "Tree_lp2", "Crate.001", "a_b_c"] {
            for suffix in ["low", "_high", "LP", "hp_"] {
                assert_eq!(strip_suffix(&compose(base, suffix), suffix), base);
            }
        }
    }

    #[test]
    fn test_strip_is_case_insensitive() {
        assert_eq!(strip_suffix("Foo_LOW", "low"), "Foo");
        assert_eq!(strip_suffix("Foo_low", "LOW"), "Foo");
        assert_eq!(strip_suffix("Foo_Hp", "hp"), "Foo");
    }

    #[test]
    fn test_strip_requires_exact_tail_token() {
        assert_eq!(strip_suffix("Rock_low2", "low"), "Rock_low2");
        assert_eq!(strip_suffix("Rock_low2_low", "low"), "Rock_low2");
        assert_eq!(strip_suffix("Fellow", "low"), "Fellow");
        assert_eq!(strip_suffix("Rock.low", "low"), "Rock.low");
    }

    #[test]
    fn test_legacy_tokens_always_recognized() {
        assert_eq!(strip_suffix("Rock_high", "lp"), "Rock");
        assert_eq!(strip_suffix("Rock_lp", "lp"), "Rock");
        assert_eq!(strip_suffix("Rock_hp", "lp"), "Rock_hp");
    }

    #[test]
    fn test_normalizer_strips_stacked_tokens() {
        let normalizer = NameNormalizer::new(["lp", "hp"]);

        assert_eq!(normalizer.base_name("Tree_lp_hp"), "Tree");
        assert_eq!(normalizer.base_name("Tree_high_LP"), "Tree");
        assert!(normalizer.has_token("Tree_HP"));
        assert!(!normalizer.has_token("Tree"));
    }

    #[test]
    fn test_normalizer_extended() {
        let normalizer = NameNormalizer::default().extended("_bake_");

        assert_eq!(normalizer.base_name("Rock_BAKE"), "Rock");
        assert_eq!(NameNormalizer::default().base_name("Rock_bake"), "Rock_bake");
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(strip_suffix("Stein_ü_low", "low"), "Stein_ü");
        assert_eq!(strip_suffix("ü", "low"), "ü");
    }

    #[test]
    fn test_suffixes_that_change_length_when_lowered() {
        // U+212A KELVIN SIGN lowers to ASCII `k`; U+0130 lowers to two chars
        assert_eq!(strip_suffix(&compose("Rock", "\u{212A}"), "\u{212A}"), "Rock");
        assert_eq!(strip_suffix("Rock_k", "\u{212A}"), "Rock");
        assert_eq!(strip_suffix("Foo_\u{130}", "\u{130}"), "Foo");
        assert!(ends_with_token("Foo_\u{130}", "\u{130}"));
        assert!(!ends_with_token("Foo_i", "\u{130}"));
        assert_eq!(NameNormalizer::new(["\u{212A}"]).base_name("Bolt_\u{212A}_low"), "Bolt");
    }

    #[test]
    fn test_tokens_equal() {
        assert!(tokens_equal("_LOW_", "low"));
        assert!(tokens_equal("\u{212A}", "k"));
        assert!(!tokens_equal("low", "lo"));
        assert!(!tokens_equal("__", "__"));
    }

    #[test]
    fn test_compose_trims_suffix_underscores() {
        assert_eq!(compose("Rock", "_low"), "Rock_low");
        assert_eq!(compose("Rock", "__high__"), "Rock_high");
    }

    #[test]
    fn test_derived_payload_name() {
        assert_eq!(derived_payload_name("Rock_low"), "Rock_low_mesh");
    }

    #[test]
    fn test_ends_with_token() {
        assert!(ends_with_token("Rock_LOW", "low"));
        assert!(ends_with_token("Rock_low", "_low"));
        assert!(!ends_with_token("Fellow", "low"));
        assert!(!ends_with_token("Rock_low", ""));
    }

    #[test]
    fn test_suffix_validation() {
        assert_eq!(Suffix::new("_low").map(|s| s.to_string()), Ok("low".to_string()));
        assert_eq!(Suffix::new("__"), Err(NamingError::EmptySuffix("__".to_string())));
        assert!(Suffix::new("").is_err());
    }
}
