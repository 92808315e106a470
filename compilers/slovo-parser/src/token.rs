/// Punctuation removed before a token is matched against the lexicon.
pub const LOOKUP_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// A whitespace-delimited word of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Surface form, punctuation included.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// The surface form with every lookup punctuation mark removed.
    pub fn bare(&self) -> String {
        strip_punctuation(self.text)
    }
}

pub fn strip_punctuation(word: &str) -> String {
    word.chars()
        .filter(|c| !LOOKUP_PUNCTUATION.contains(c))
        .collect()
}
