use std::fs;
use std::path::Path;

use anyhow::Context;
use slovo_parser::{parse_analysis, render_document, RuleAnalyzer};
use slovo_protocol::{AnalysisResult, Lexicon, SentenceRecord};
use tracing::debug;

/// Compiled lexicon at `path`, or the builtin one.
pub fn load_lexicon(path: Option<&Path>) -> anyhow::Result<Lexicon> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading compiled lexicon");
            let bytes = fs::read(path).with_context(|| format!("reading lexicon {:?}", path))?;
            Lexicon::from_bytes(&bytes).with_context(|| format!("loading lexicon {:?}", path))
        }
        None => Ok(Lexicon::builtin()),
    }
}

/// JSON lexicon source to validated rkyv archive bytes.
pub fn compile(source: &str) -> anyhow::Result<(Lexicon, Vec<u8>)> {
    let lexicon: Lexicon = serde_json::from_str(source).context("parsing lexicon JSON")?;
    let bytes = lexicon.to_bytes()?.to_vec();
    Ok((lexicon, bytes))
}

pub fn analyze(lexicon: &Lexicon, text: &str, markdown: bool) -> anyhow::Result<String> {
    let records = RuleAnalyzer::new(lexicon).analyze_text(text)?;
    if markdown {
        return Ok(render_document(&records));
    }
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "results": records }))?)
}

pub fn parse(text: &str) -> anyhow::Result<String> {
    let tree: AnalysisResult = parse_analysis(text);
    Ok(serde_json::to_string_pretty(&tree)?)
}

/// Accepts either `{"results": [...]}` or a bare array of records.
pub fn export(source: &str) -> anyhow::Result<String> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Records {
        Wrapped { results: Vec<SentenceRecord> },
        Bare(Vec<SentenceRecord>),
    }

    let records = match serde_json::from_str(source).context("parsing sentence records")? {
        Records::Wrapped { results } => results,
        Records::Bare(results) => results,
    };
    Ok(render_document(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_round_trip() {
        // 1. Dump the builtin lexicon the way `slovo dump` does
        let source = serde_json::to_string(&Lexicon::builtin()).unwrap();

        // 2. Compile it back
        let (lexicon, bytes) = compile(&source).unwrap();
        assert_eq!(lexicon.version, 1);

        // 3. The archive loads
        let loaded = Lexicon::from_bytes(&bytes).unwrap();
        assert_eq!(loaded, Lexicon::builtin());
    }

    #[test]
    fn test_compile_rejects_unknown_features() {
        let source =
            r#"{"version": 2, "entries": [{"form": "дом", "flags": "NOMINATIVE | VOCATIVE"}]}"#;
        assert!(compile(source).is_err());
    }

    #[test]
    fn test_analyze_outputs() {
        let lexicon = Lexicon::builtin();

        let json = analyze(&lexicon, "Я люблю Москву.", false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"][0]["original"], "Я люблю Москву");
        assert_eq!(value["results"][0]["analysis"]["mainComponents"][1]["text"], "люблю");

        let markdown = analyze(&lexicon, "Я люблю Москву.", true).unwrap();
        assert!(markdown.contains("- **谓语**: `люблю` \"谓语\""));

        assert!(analyze(&lexicon, "hello", false).is_err());
    }

    #[test]
    fn test_export_accepts_both_shapes() {
        let record = SentenceRecord::failed("Я");
        let bare = serde_json::to_string(&vec![record.clone()]).unwrap();
        let wrapped = serde_json::json!({ "results": [record] }).to_string();

        assert_eq!(export(&bare).unwrap(), export(&wrapped).unwrap());
        assert!(export("{}").is_err());
    }

    #[test]
    fn test_parse_outputs_tree_json() {
        let json = parse("- **主语**: `Я` \"我\"").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mainComponents"][0]["translation"], "我");
    }
}
