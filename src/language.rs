use serde::Serialize;
use std::fmt;

use crate::error::TranslateError;

/// Languages offered in the source and target selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    French,
    Spanish,
    German,
    Italian,
    Dutch,
    Russian,
    Chinese,
    Japanese,
    Hindi,
}

/// One row of the language catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub display_name: &'static str,
    pub code: &'static str,
}

static CATALOG: [LanguageEntry; 10] = [
    LanguageEntry { display_name: "English", code: "en" },
    LanguageEntry { display_name: "French", code: "fr" },
    LanguageEntry { display_name: "Spanish", code: "es" },
    LanguageEntry { display_name: "German", code: "de" },
    LanguageEntry { display_name: "Italian", code: "it" },
    LanguageEntry { display_name: "Dutch", code: "nl" },
    LanguageEntry { display_name: "Russian", code: "ru" },
    LanguageEntry { display_name: "Chinese", code: "zh" },
    LanguageEntry { display_name: "Japanese", code: "ja" },
    LanguageEntry { display_name: "Hindi", code: "hi" },
];

const ALL: [Language; 10] = [
    Language::English,
    Language::French,
    Language::Spanish,
    Language::German,
    Language::Italian,
    Language::Dutch,
    Language::Russian,
    Language::Chinese,
    Language::Japanese,
    Language::Hindi,
];

/// All catalog entries, in display order.
pub fn list_languages() -> &'static [LanguageEntry] {
    &CATALOG
}

/// Look up the language code for a display name.
pub fn code_for(display_name: &str) -> Result<&'static str, TranslateError> {
    CATALOG
        .iter()
        .find(|entry| entry.display_name == display_name)
        .map(|entry| entry.code)
        .ok_or_else(|| TranslateError::LanguageNotFound(display_name.to_string()))
}

impl Language {
    pub fn entry(self) -> &'static LanguageEntry {
        // ALL and CATALOG share the same ordering
        &CATALOG[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.entry().code
    }

    pub fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    pub fn from_code(code: &str) -> Result<Self, TranslateError> {
        ALL.iter()
            .copied()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| TranslateError::LanguageNotFound(code.to_string()))
    }

    pub fn from_display_name(name: &str) -> Result<Self, TranslateError> {
        let code = code_for(name)?;
        Self::from_code(code)
    }

    /// Accepts either a display name ("German") or a code ("de").
    pub fn resolve(name_or_code: &str) -> Result<Self, TranslateError> {
        let trimmed = name_or_code.trim();
        Self::from_display_name(trimmed).or_else(|_| Self::from_code(&trimmed.to_lowercase()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_ten_entries_in_order() {
        let names: Vec<_> = list_languages().iter().map(|e| e.display_name).collect();
        assert_eq!(
            names,
            vec![
                "English", "French", "Spanish", "German", "Italian", "Dutch", "Russian",
                "Chinese", "Japanese", "Hindi"
            ]
        );
    }

    #[test]
    fn codes_are_unique_and_non_empty() {
        let mut codes = HashSet::new();
        for entry in list_languages() {
            let code = code_for(entry.display_name).unwrap();
            assert!(!code.is_empty());
            assert!(codes.insert(code), "duplicate code {}", code);
        }
        assert_eq!(codes.len(), 10);

        let names: HashSet<_> = list_languages().iter().map(|e| e.display_name).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn unknown_name_is_not_found() {
        match code_for("Klingon") {
            Err(TranslateError::LanguageNotFound(name)) => assert_eq!(name, "Klingon"),
            other => panic!("unexpected: {:?}", other),
        }
        // lookups are by display name, not code
        assert!(code_for("en").is_err());
    }

    #[test]
    fn enum_matches_catalog() {
        for (lang, entry) in ALL.iter().zip(list_languages()) {
            assert_eq!(lang.entry(), entry);
            assert_eq!(Language::from_code(entry.code).unwrap(), *lang);
        }
    }

    #[test]
    fn resolve_accepts_names_and_codes() {
        assert_eq!(Language::resolve("German").unwrap(), Language::German);
        assert_eq!(Language::resolve("de").unwrap(), Language::German);
        assert_eq!(Language::resolve(" JA ").unwrap(), Language::Japanese);
        assert!(Language::resolve("xx").is_err());
    }
}
