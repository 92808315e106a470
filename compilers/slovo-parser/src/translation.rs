//! Cleanup of translations returned by a language model.

/// Strip surrounding whitespace and one layer of matching quotes.
pub fn clean_translation(raw: &str) -> String {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].to_string();
        }
    }
    trimmed.to_string()
}

fn is_chinese_char(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fa5}')
        || "，。！？；：“”‘’（）【】、…—《》".contains(c)
}

/// First run of Chinese characters and Chinese punctuation, trimmed.
fn chinese_run(text: &str) -> Option<&str> {
    let start = text.find(is_chinese_char)?;
    let tail = &text[start..];
    let end = tail.find(|c: char| !is_chinese_char(c)).unwrap_or(tail.len());
    let run = tail[..end].trim();
    (!run.is_empty()).then_some(run)
}

/// Pull the translation out of a chatty model response.
///
/// Recognises, in order: a `**Option 1…:**` block, `Here's the translation…:`,
/// a `翻译：` label, and finally a bare run of Chinese text when the
/// response also contains Latin prose. Anything else is returned unchanged.
pub fn extract_translation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // 1. "**Option 1 (...):** 我在学习俄语。 **Option 2..."
    if let Some(start) = text.find("**Option 1") {
        if let Some((_, body)) = text[start..].split_once(":**") {
            let end = ["**Option", "**Why"]
                .iter()
                .filter_map(|stop| body.find(stop))
                .min()
                .unwrap_or(body.len());
            let body = &body[..end];
            if let Some(run) = chinese_run(body) {
                return run.to_string();
            }
            let body = body.trim();
            if !body.is_empty() {
                return body.to_string();
            }
        }
    }

    // 2. "Here's the translation into Chinese: 我在学习俄语。\n\n..."
    if let Some(start) = text.find("Here's the translation") {
        if let Some((_, body)) = text[start..].split_once(':') {
            let end = ["\n\n", "**"]
                .iter()
                .filter_map(|stop| body.find(stop))
                .min()
                .unwrap_or(body.len());
            let body = body[..end].trim();
            if !body.is_empty() {
                return body.to_string();
            }
        }
    }

    // 3. "翻译：我在学习俄语。"
    for label in ["翻译：", "翻译:"] {
        if let Some((_, body)) = text.split_once(label) {
            let line = body.lines().next().unwrap_or_default().trim();
            if !line.is_empty() {
                return line.to_string();
            }
        }
    }

    // 4. Chinese sentence surrounded by English chatter
    if text.chars().any(|c| c.is_ascii_alphabetic()) {
        if let Some(run) = chinese_run(text) {
            return run.to_string();
        }
    }

    text.to_string()
}
