//! Signature block phrases

use std::sync::Arc;

/// Labels that mark a signature block in the documents we accept.
///
/// Matching is literal and case-sensitive. Order matters only for which
/// phrase gets reported when several are present.
pub const SIGNATURE_PHRASES: [&str; 6] = [
    "Podpis klienta",
    "Klient / V zastoupení za Klienta",
    "Oprávněná osoba",
    "Oprávněné osoby",
    "Disponent",
    "Klient",
];

/// Immutable, ordered set of phrases shared by every scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSet {
    phrases: Arc<[String]>,
}

impl PhraseSet {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// First phrase, in set order, that `text` contains
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.iter().find(|phrase| text.contains(*phrase))
    }
}

impl Default for PhraseSet {
    fn default() -> Self {
        Self::new(SIGNATURE_PHRASES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_keeps_order() {
        let set = PhraseSet::default();
        assert_eq!(set.len(), 6);
        assert_eq!(set.iter().next(), Some("Podpis klienta"));
        assert_eq!(set.iter().last(), Some("Klient"));
    }

    #[test]
    fn test_first_match_uses_set_order() {
        let set = PhraseSet::default();
        // "Podpis klienta" does not contain "Klient" (lowercase k)
        assert_eq!(set.first_match("Podpis klienta"), Some("Podpis klienta"));
        assert_eq!(
            set.first_match("Klient / V zastoupení za Klienta"),
            Some("Klient / V zastoupení za Klienta")
        );
        assert_eq!(set.first_match("Disponent a Klient"), Some("Disponent"));
    }

    #[test]
    fn test_match_is_case_and_accent_sensitive() {
        let set = PhraseSet::default();
        assert_eq!(set.first_match("klient"), None);
        assert_eq!(set.first_match("KLIENT"), None);
        assert_eq!(set.first_match("Opravnena osoba"), None);
        assert_eq!(set.first_match("Oprávněná  osoba"), None);
    }

    #[test]
    fn test_substring_inside_longer_word_matches() {
        let set = PhraseSet::default();
        assert_eq!(set.first_match("Klientský servis"), Some("Klient"));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = PhraseSet::new(Vec::<String>::new());
        assert!(set.is_empty());
        assert_eq!(set.first_match("Klient"), None);
    }
}
