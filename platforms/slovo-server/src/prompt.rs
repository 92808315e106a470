use crate::gemini::GenerationConfig;

pub const TRANSLATION: GenerationConfig = GenerationConfig {
    temperature: 0.2,
    max_output_tokens: 1024,
};

pub const ANALYSIS: GenerationConfig = GenerationConfig {
    temperature: 0.2,
    max_output_tokens: 2048,
};

pub fn translation(sentence: &str) -> String {
    format!(
        "将以下俄语句子翻译成中文，只返回翻译结果，不要包含任何解释、前缀或额外信息: \"{}\"",
        sentence
    )
}

/// The bullet template below is the layout `slovo_parser::parse_analysis` reads.
pub fn analysis(sentence: &str) -> String {
    format!(
        r#"你是一个专业的俄语语法分析专家，请分析以下俄语句子的语法结构。
识别主语、谓语、宾语、定语、状语等成分，并提供每个词的形态信息（格、数、性、时态等）。
请特别注意：
1. 对于每个词，提供其原形（即第一格或词典形式）
2. 形态信息应包括：
   - 对于名词、形容词：性别（阳性/阴性/中性）、数（单数/复数）、格（主格/属格/与格等）
   - 对于动词：如果是过去式分词，标明"短尾"或"长尾"，然后是性别、数、时态
   - 对于其他词类：根据适用情况提供相关形态信息
3. 提供每个词的中文翻译
4. 即使句子很复杂，也必须完成分析，这非常重要
5. 如果句子包含从句或并列结构，请分别分析
6. 不要跳过任何句子，每个句子都必须分析
7. 如果遇到困难，可以简化分析，但必须提供某种形式的分析结果

请按照以下格式输出：
- **主语**: `词语` "翻译"
    - **中心词**: `词语` (【原形】) 性别, 数, 格 "翻译"
    - **定语**: `词语` (【原形】) 性别, 数, 格 "翻译"
- **谓语**: `词语` "翻译"
    - **中心词**: `词语` (【原形】) 短尾/长尾性别, 数, 时态 "翻译"
- **状语**: `词语` "翻译"
    - **介词**: `词语` (【原形】) 格 "翻译"
    - **宾语**: `词语` (【原形】) 性别, 数, 格 "翻译"

句子: "{}""#,
        sentence
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_quote_the_sentence() {
        assert!(translation("Я читаю").ends_with("\"Я читаю\""));
        assert!(analysis("Я читаю").ends_with("句子: \"Я читаю\""));
    }

    #[test]
    fn test_template_is_parseable() {
        // The example bullets in the prompt follow the layout the parser reads
        let tree = slovo_parser::parse_analysis(&analysis("Я читаю"));
        let kinds: Vec<&str> = tree.main_components.iter().map(|c| c.node.kind.as_str()).collect();
        assert_eq!(kinds, vec!["主语", "谓语", "状语"]);
        assert_eq!(tree.main_components[2].children.len(), 2);
    }

    #[test]
    fn test_output_budgets() {
        assert_eq!(TRANSLATION.max_output_tokens, 1024);
        assert_eq!(ANALYSIS.max_output_tokens, 2048);
    }
}
