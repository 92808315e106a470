use nom::{
    bytes::complete::{take_till, take_till1, take_while},
    sequence::pair,
    IResult,
};

use crate::token::Token;

fn is_sentence_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split `input` on whitespace, keeping each word's punctuation.
pub fn tokenize(mut input: &str) -> Vec<Token<'_>> {
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace (any Unicode whitespace, not only ASCII)
        let skipped: IResult<&str, &str> = take_while(char::is_whitespace)(input);
        let Ok((next_input, _)) = skipped else { break };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Take the word up to the next whitespace
        let word: IResult<&str, &str> = take_till1(char::is_whitespace)(input);
        let Ok((next_input, text)) = word else { break };

        result.push(Token { text });
        input = next_input;
    }

    result
}

/// Split raw text into sentences on runs of `.`, `!` and `?`.
///
/// Segments are trimmed and empty ones dropped. Text that is non-empty but
/// yields no segment (e.g. only terminal punctuation) becomes one sentence.
///
/// Re-joining the output with `". "` and splitting again gives the same
/// sentences whenever the input contains a letter. Punctuation-only input is
/// the exception: `" ?! "` gives `["?!"]`, which re-splits to `["?!."]`.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut input = text;
    let mut sentences = Vec::new();

    while !input.is_empty() {
        let segment: IResult<&str, (&str, &str)> =
            pair(take_till(is_sentence_terminal), take_while(is_sentence_terminal))(input);
        let Ok((next_input, (body, _terminals))) = segment else { break };

        let body = body.trim();
        if !body.is_empty() {
            sentences.push(body.to_string());
        }

        if next_input.len() == input.len() {
            break;
        }
        input = next_input;
    }

    let trimmed = text.trim();
    if sentences.is_empty() && !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tokenize_keeps_punctuation() {
        let tokens = tokenize("Я  изучаю\tрусский язык.");

        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["Я", "изучаю", "русский", "язык."]);
        assert_eq!(tokens[3].bare(), "язык");
    }

    #[test]
    fn test_tokenize_unicode_whitespace() {
        // No-break space between the words
        let tokens = tokenize("Мы\u{00A0}читаем");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "читаем");
    }

    #[test]
    fn test_split_sentences() {
        let sentences =
            split_sentences("Я изучаю русский язык. Ты любишь Москву?!  Мы читаем книгу");
        assert_eq!(
            sentences,
            vec!["Я изучаю русский язык", "Ты любишь Москву", "Мы читаем книгу"]
        );
    }

    #[test]
    fn test_punctuation_only_input_is_not_stable_under_rejoining() {
        let first = split_sentences(" ?! ");
        assert_eq!(first, vec!["?!"]);
        assert_eq!(split_sentences("?!. "), vec!["?!."]);
    }

    #[test]
    fn test_split_without_terminal_punctuation() {
        assert_eq!(split_sentences("  Привет  "), vec!["Привет"]);
        assert_eq!(split_sentences(" ?! "), vec!["?!"]);
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
    }

    proptest! {
        #[test]
        fn test_segmenting_is_idempotent(text in "[а-я ,.!?]{0,30}[а-я][а-я ,.!?]{0,30}") {
            let first = split_sentences(&text);
            let rejoined: String = first.iter().map(|s| format!("{}. ", s)).collect();
            let second = split_sentences(&rejoined);

            prop_assert_eq!(first, second);
        }
    }
}
