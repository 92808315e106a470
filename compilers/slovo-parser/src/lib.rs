pub mod analysis;
pub mod input;
pub mod parser;
pub mod render;
pub mod syntax;
pub mod token;
pub mod translation;
pub mod tree;

use slovo_protocol::{AnalysisResult, Lexicon, SentenceRecord};
use tracing::debug;

pub use crate::analysis::{parse_analysis, AnalysisParser};
pub use crate::input::{contains_russian, validate_input, InputError};
pub use crate::parser::{split_sentences, tokenize};
pub use crate::render::{render_analysis, render_document, render_sentence};
pub use crate::syntax::{Extraction, Extractor};
pub use crate::translation::{clean_translation, extract_translation};
pub use crate::tree::build_tree;

/// Offline analyzer: Text -> Tokens -> Roles -> Tree, against one lexicon.
pub struct RuleAnalyzer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> RuleAnalyzer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, sentence: &str) -> Extraction {
        let tokens = tokenize(sentence);
        Extractor::new(self.lexicon).extract(&tokens)
    }

    pub fn analyze_sentence(&self, sentence: &str) -> AnalysisResult {
        build_tree(&self.extract(sentence))
    }

    /// Validate, segment and analyze `text`. Translations are left empty.
    pub fn analyze_text(&self, text: &str) -> Result<Vec<SentenceRecord>, InputError> {
        let text = validate_input(text)?;
        let sentences = split_sentences(text);
        debug!(sentences = sentences.len(), "Analyzing text offline");

        Ok(sentences
            .into_iter()
            .map(|sentence| {
                let analysis = self.analyze_sentence(&sentence);
                SentenceRecord::new(sentence, String::new(), analysis)
            })
            .collect())
    }
}
