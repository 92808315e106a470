use thiserror::Error;

/// Rejection reasons for text submitted for analysis.
///
/// The messages are shown to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Text is required")]
    Missing,
    #[error("Only Russian text can be analyzed")]
    NotRussian,
}

/// Cyrillic letters used by Russian: U+0410..=U+044F plus Ё and ё.
pub fn is_russian_char(c: char) -> bool {
    matches!(c, '\u{0410}'..='\u{044F}' | '\u{0401}' | '\u{0451}')
}

pub fn contains_russian(text: &str) -> bool {
    text.chars().any(is_russian_char)
}

/// Accept `text` when it is non-blank and contains at least one Russian letter.
pub fn validate_input(text: &str) -> Result<&str, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Missing);
    }
    if !contains_russian(text) {
        return Err(InputError::NotRussian);
    }
    Ok(text)
}
