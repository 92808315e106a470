//! Markdown export of analyzed sentences.
//!
//! Bullets use the same layout [`crate::analysis::parse_analysis`] reads, so an
//! exported tree parses back to the same nodes.

use slovo_protocol::{AnalysisResult, ChildComponent, ConstituentNode, SentenceRecord};

use crate::translation::extract_translation;

pub const DOCUMENT_TITLE: &str = "# 俄语句子语法分析";
pub const EMPTY_ANALYSIS: &str = "无法分析此句子的语法结构。请尝试简化句子或重新分析。";

fn child_line(indent: &str, node: &ConstituentNode) -> String {
    let mut line = format!(
        "{}- **{}**: `{}` (【{}】)",
        indent,
        node.kind,
        node.text,
        node.citation()
    );
    if !node.morphology.is_empty() {
        let values: Vec<&str> = node.morphology.values().map(String::as_str).collect();
        line.push(' ');
        line.push_str(&values.join(", "));
    }
    if !node.translation.is_empty() {
        line.push_str(&format!(" \"{}\"", node.translation));
    }
    line
}

fn child_lines(child: &ChildComponent, out: &mut Vec<String>) {
    out.push(child_line("    ", &child.node));
    for nested in &child.children {
        out.push(child_line("        ", nested));
    }
}

/// The bullet list for one tree, or [`EMPTY_ANALYSIS`] when it has no components.
pub fn render_analysis(analysis: &AnalysisResult) -> String {
    if analysis.is_empty() {
        return EMPTY_ANALYSIS.to_string();
    }

    let mut lines = Vec::new();
    for main in &analysis.main_components {
        lines.push(format!(
            "- **{}**: `{}` \"{}\"",
            main.node.kind, main.node.text, main.node.translation
        ));
        for child in &main.children {
            child_lines(child, &mut lines);
        }
    }
    lines.join("\n")
}

pub fn render_sentence(record: &SentenceRecord) -> String {
    format!(
        "## 原句\n\n{}\n\n## 翻译\n\n{}\n\n## 语法分析\n\n{}\n",
        record.original,
        extract_translation(&record.translation),
        render_analysis(&record.analysis)
    )
}

/// A document with one numbered section per sentence.
pub fn render_document(records: &[SentenceRecord]) -> String {
    let mut doc = format!("{}\n\n", DOCUMENT_TITLE);
    for (i, record) in records.iter().enumerate() {
        doc.push_str(&format!("# 句子 {}\n\n", i + 1));
        doc.push_str(&render_sentence(record));
        doc.push_str("\n---\n\n");
    }
    doc
}
