use serde::Serialize;
use slovo_parser::{render_document, InputError, RuleAnalyzer};
use slovo_protocol::{Lexicon, SentenceRecord};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// `true` when `text` has at least one Russian letter. Lets the UI reject
/// input before calling the engine or the server.
#[wasm_bindgen]
pub fn contains_russian(text: &str) -> bool {
    slovo_parser::contains_russian(text)
}

/// Same shape as the server's `/api/analyze` response.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub results: Vec<SentenceRecord>,
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct SlovoEngine {
    lexicon: Lexicon,
}

impl SlovoEngine {
    /// Empty `data` selects the builtin lexicon.
    pub fn load(data: &[u8]) -> Result<Self, String> {
        let lexicon = if data.is_empty() {
            Lexicon::builtin()
        } else {
            Lexicon::from_bytes(data).map_err(|e| e.to_string())?
        };
        Ok(Self { lexicon })
    }

    pub fn report(&self, input: &str) -> Result<AnalysisReport, InputError> {
        let results = RuleAnalyzer::new(&self.lexicon).analyze_text(input)?;
        Ok(AnalysisReport { results })
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl SlovoEngine {
    /// `data` is a lexicon compiled by `slovo compile` (loaded via fetch() in JS).
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<SlovoEngine, JsValue> {
        Self::load(&data).map_err(|e| JsValue::from_str(&e))
    }

    /// Text -> Sentences -> Roles -> Trees, returned as `{ results }`.
    pub fn analyze(&self, input: &str) -> Result<JsValue, JsValue> {
        let report = self
            .report(input)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&report)
    }

    /// Tree recovered from a free-text analysis (e.g. a model response).
    pub fn parse_analysis(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&slovo_parser::parse_analysis(text))
    }

    /// Markdown document for an array of sentence records.
    pub fn render_markdown(&self, records: JsValue) -> Result<String, JsValue> {
        let records: Vec<SentenceRecord> = serde_wasm_bindgen::from_value(records)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(render_document(&records))
    }

    pub fn entry_count(&self) -> usize {
        self.lexicon.entries.len()
    }
}
