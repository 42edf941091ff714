//! Bilingual Text
//!
//! Content fields shown on the public site carry an English and a Chinese
//! rendition.

use serde::{Deserialize, Serialize};

use super::entity::DomainError;

/// Display language of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

}

impl std::str::FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" | "en-US" | "en_US" => Ok(Locale::En),
            "zh" | "zh-CN" | "zh_CN" => Ok(Locale::Zh),
            other => Err(DomainError::InvalidInput(format!("Unknown locale: {}", other))),
        }
    }
}

/// Text with an English and a Chinese version
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub zh: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self { en: en.into(), zh: zh.into() }
    }

    /// English only; the Chinese side falls back to English until translated
    pub fn en_only(en: impl Into<String>) -> Self {
        Self::new(en, "")
    }

    /// Text for `locale`, falling back to English when the translation is missing
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Zh if !self.zh.trim().is_empty() => &self.zh,
            _ => &self.en,
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.en.trim().is_empty() && !self.zh.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_falls_back_to_english() {
        let text = LocalizedText::en_only("Programs");
        assert_eq!(text.get(Locale::Zh), "Programs");
        assert!(!text.is_translated());
    }

    #[test]
    fn test_get_chinese() {
        let text = LocalizedText::new("Programs", "项目");
        assert_eq!(text.get(Locale::Zh), "项目");
        assert_eq!(text.get(Locale::En), "Programs");
        assert!(text.is_translated());
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::Zh));
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::Zh.as_str(), "zh");
    }

    #[test]
    fn test_missing_zh_deserializes() {
        let text: LocalizedText = serde_json::from_str(r#"{"en":"About"}"#).unwrap();
        assert_eq!(text.zh, "");
    }
}
