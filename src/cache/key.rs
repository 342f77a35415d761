//! Cache Key
//!
//! Composite identity of a translation request.

/// Composite key identifying a translation request.
///
/// The three fields are carried verbatim: no trimming, case folding, or
/// delimiter joining. Two requests differing in any field are distinct
/// cache entries, so a text that happens to contain a language code or a
/// separator character can never collide with another request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    source_language: String,
    target_language: String,
    text: String,
}

impl TranslationKey {
    /// Create a new cache key
    pub fn new(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            text: text.into(),
        }
    }

    /// Source language code
    #[inline]
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Target language code
    #[inline]
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Text being translated
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}->{} ({} chars)",
            self.source_language,
            self.target_language,
            self.text.chars().count()
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
