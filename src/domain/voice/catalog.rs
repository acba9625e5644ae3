use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ResolutionError;
use crate::infrastructure::speech::SpeechBackend;

/// Languages offered to callers, kept to a small curated subset of
/// everything the backend can speak.
const ALLOWED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("hi", "Hindi"),
];

/// The guaranteed default, present even when the backend catalog fetch
/// fails or comes back incomplete.
pub const DEFAULT_LANGUAGE_LABEL: &str = "English";
pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_VOICE_LABEL: &str = "US English (Standard)";

/// Voice/accent labels mapped to the backend's regional host identifiers.
/// This set is curated by hand, independently of the language table.
const VOICE_VARIANTS: &[(&str, &str)] = &[
    ("US English (Standard)", "com"),
    ("UK English (Accent)", "co.uk"),
    ("Australian English (Accent)", "com.au"),
    ("Indian English (Accent)", "co.in"),
    ("French (Accent)", "fr"),
    ("Spanish (Accent)", "es"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOption {
    pub label: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceOption {
    pub label: String,
    pub host_tag: String,
}

/// A resolved (language code, regional host tag) pair ready to hand to the
/// synthesis backend. The two halves are validated independently; whether a
/// mismatched pairing (say Hindi with the French host) produces audio is
/// the backend's decision and is surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceConfig {
    pub language_code: String,
    pub host_tag: String,
}

/// Immutable selection tables, built once at process start and injected
/// into whoever needs to resolve or enumerate selections.
pub struct VoiceCatalog {
    languages: Vec<LanguageOption>,
    voices: Vec<VoiceOption>,
}

impl VoiceCatalog {
    /// Fetch the backend's language catalog and filter it down to the
    /// curated allow-list. A failed fetch degrades to the allow-list's
    /// guaranteed default rather than failing startup.
    pub async fn load(backend: &dyn SpeechBackend) -> Self {
        match backend.list_languages().await {
            Ok(catalog) => {
                tracing::info!(
                    backend_languages = catalog.len(),
                    "speech backend language catalog fetched"
                );
                Self::from_backend_catalog(&catalog)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "language catalog fetch failed, offering only the default language"
                );
                Self::from_backend_catalog(&HashMap::new())
            }
        }
    }

    /// Keep allow-listed languages the backend actually reports, under their
    /// curated labels. The default language is always present.
    pub fn from_backend_catalog(catalog: &HashMap<String, String>) -> Self {
        let mut languages = vec![LanguageOption {
            label: DEFAULT_LANGUAGE_LABEL.to_string(),
            code: DEFAULT_LANGUAGE_CODE.to_string(),
        }];

        for (code, label) in ALLOWED_LANGUAGES {
            if *code == DEFAULT_LANGUAGE_CODE {
                continue;
            }
            if catalog.contains_key(*code) {
                languages.push(LanguageOption {
                    label: (*label).to_string(),
                    code: (*code).to_string(),
                });
            }
        }

        let voices = VOICE_VARIANTS
            .iter()
            .map(|(label, host_tag)| VoiceOption {
                label: (*label).to_string(),
                host_tag: (*host_tag).to_string(),
            })
            .collect();

        Self { languages, voices }
    }

    pub fn languages(&self) -> &[LanguageOption] {
        &self.languages
    }

    pub fn voices(&self) -> &[VoiceOption] {
        &self.voices
    }

    /// Pure lookup. Selections normally come from the same tables served to
    /// the caller, so misses only happen on unvalidated input (direct API
    /// calls); those get `UnknownSelection` instead of a panic or fallback.
    pub fn resolve(&self, language: &str, voice: &str) -> Result<VoiceConfig, ResolutionError> {
        let language_code = self
            .languages
            .iter()
            .find(|l| l.label == language || l.code == language)
            .map(|l| l.code.clone())
            .ok_or_else(|| ResolutionError::UnknownSelection(format!("language {:?}", language)))?;

        let host_tag = self
            .voices
            .iter()
            .find(|v| v.label == voice)
            .map(|v| v.host_tag.clone())
            .ok_or_else(|| ResolutionError::UnknownSelection(format!("voice {:?}", voice)))?;

        Ok(VoiceConfig {
            language_code,
            host_tag,
        })
    }
}
