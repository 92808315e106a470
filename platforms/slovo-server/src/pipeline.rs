//! Per-sentence processing: translation and analysis, with degradation.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::{FutureExt, StreamExt};
use serde::Serialize;
use slovo_parser::{
    clean_translation, parse_analysis, split_sentences, validate_input, InputError, RuleAnalyzer,
};
use slovo_protocol::{labels, AnalysisResult, Lexicon, SentenceRecord};
use tracing::{error, info, warn};

use crate::gemini::TextService;
use crate::prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Translation and analysis come from the generative service.
    Remote,
    /// No service configured; analysis by the builtin rules, no translation.
    RuleBased,
}

pub struct Pipeline {
    service: Option<Arc<dyn TextService>>,
    lexicon: Arc<Lexicon>,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(
        service: Option<Arc<dyn TextService>>,
        lexicon: Arc<Lexicon>,
        concurrency: usize,
    ) -> Self {
        Self {
            service,
            lexicon,
            concurrency: concurrency.max(1),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.service {
            Some(_) => Mode::Remote,
            None => Mode::RuleBased,
        }
    }

    /// Validate and segment `text`, then process every sentence.
    ///
    /// Records come back in input order. Per-sentence failures never fail
    /// the whole request.
    pub async fn analyze(&self, text: &str) -> Result<Vec<SentenceRecord>, InputError> {
        let text = validate_input(text)?;
        let sentences = split_sentences(text);
        info!(sentences = sentences.len(), mode = ?self.mode(), "Analyzing text");

        let records = futures::stream::iter(sentences)
            .map(|sentence| self.process_guarded(sentence))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;
        Ok(records)
    }

    async fn process_guarded(&self, sentence: String) -> SentenceRecord {
        match AssertUnwindSafe(self.process(&sentence)).catch_unwind().await {
            Ok(record) => record,
            Err(_) => {
                error!(sentence = %sentence, "Sentence processing panicked");
                SentenceRecord::failed(sentence)
            }
        }
    }

    pub async fn process(&self, sentence: &str) -> SentenceRecord {
        let Some(service) = &self.service else {
            let analysis = RuleAnalyzer::new(&self.lexicon).analyze_sentence(sentence);
            return SentenceRecord::new(sentence, labels::TRANSLATION_FAILED, analysis);
        };

        let translation_prompt = prompt::translation(sentence);
        let analysis_prompt = prompt::analysis(sentence);
        let (translation, analysis) = tokio::join!(
            service.generate(&translation_prompt, prompt::TRANSLATION),
            service.generate(&analysis_prompt, prompt::ANALYSIS),
        );

        let translation = match translation {
            Ok(raw) => Some(clean_translation(&raw)),
            Err(e) => {
                warn!(error = %e, sentence, "Translation failed");
                None
            }
        };
        let analysis = match analysis {
            Ok(raw) => Some(parse_analysis(&raw)),
            Err(e) => {
                warn!(error = %e, sentence, "Analysis failed");
                None
            }
        };

        match (translation, analysis) {
            (None, None) => SentenceRecord::failed(sentence),
            (translation, analysis) => SentenceRecord::new(
                sentence,
                translation.unwrap_or_else(|| labels::TRANSLATION_FAILED.to_string()),
                analysis.unwrap_or_else(|| AnalysisResult::degraded(sentence)),
            ),
        }
    }
}
