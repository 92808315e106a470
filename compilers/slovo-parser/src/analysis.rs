//! Recovery of a constituent tree from the free-text analysis a language
//! model returns.
//!
//! The expected layout is a bullet list:
//!
//! ```text
//! - **主语**: `Я` "我"
//!     - **中心词**: `Я` (【я】) 主格, 单数 "我"
//!         - **定语**: `мой` (【мой】) 阳性
//! ```
//!
//! Parsing never fails. Blocks whose header does not match are dropped,
//! stray lines are ignored, and an unusable response yields an empty tree.

use nom::{
    bytes::complete::{tag, take_till, take_until, take_while},
    character::complete::char,
    sequence::{delimited, preceded},
    IResult,
};
use slovo_protocol::{AnalysisResult, ChildComponent, ConstituentNode, MainComponent, Morphology};
use tracing::debug;

const MARKER: &str = "- **";
const HEADER_SEPARATOR: &str = "**: `";
const CHILD_INDENT: usize = 4;
const NESTED_INDENT: usize = 8;

/// `type**: \`text\` rest` with the leading marker already consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bullet<'a> {
    kind: &'a str,
    text: &'a str,
    rest: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Column-0 marker; `None` when the header is malformed.
    Component(Option<Bullet<'a>>),
    Child(Bullet<'a>),
    Nested(Bullet<'a>),
    Other,
}

fn marker(input: &str) -> IResult<&str, usize> {
    let (input, indent) = take_while(|c: char| c == ' ')(input)?;
    let (input, _) = tag(MARKER)(input)?;
    Ok((input, indent.len()))
}

fn bullet(input: &str) -> IResult<&str, Bullet<'_>> {
    let (input, kind) = take_until(HEADER_SEPARATOR)(input)?;
    let (input, _) = tag(HEADER_SEPARATOR)(input)?;
    let (rest, text) = take_until("`")(input)?;
    let (rest, _) = char('`')(rest)?;
    Ok((
        "",
        Bullet {
            kind: kind.trim(),
            text: text.trim(),
            rest,
        },
    ))
}

fn classify(line: &str) -> Line<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Ok((body, indent)) = marker(line) else {
        return Line::Other;
    };
    let parsed = bullet(body).ok().map(|(_, b)| b);

    match (indent, parsed) {
        (0, parsed) => Line::Component(parsed),
        (CHILD_INDENT, Some(b)) => Line::Child(b),
        (NESTED_INDENT, Some(b)) => Line::Nested(b),
        _ => Line::Other,
    }
}

/// First `"…"` in `input`, trimmed.
fn first_quoted(input: &str) -> Option<&str> {
    let parsed: IResult<&str, &str> =
        preceded(take_until("\""), delimited(char('"'), take_until("\""), char('"')))(input);
    parsed.ok().map(|(_, quoted)| quoted.trim())
}

/// Citation form in `(【…】)`, and what follows the bracket.
fn citation(input: &str) -> Option<(&str, &str)> {
    let parsed: IResult<&str, &str> =
        preceded(take_until("(【"), delimited(tag("(【"), take_until("】)"), tag("】)")))(input);
    parsed.ok().map(|(after, citation)| (after, citation.trim()))
}

/// Feature fragments after the citation, up to the translation quote.
fn fragments(after_citation: &str) -> Morphology {
    let parsed: IResult<&str, &str> = take_till(|c: char| c == '"')(after_citation);
    let text = parsed.map(|(_, text)| text).unwrap_or(after_citation);

    text.split([',', '，'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| (format!("part_{}", i), part.to_string()))
        .collect()
}

fn component_node(bullet: &Bullet) -> ConstituentNode {
    ConstituentNode::new(bullet.kind, bullet.text)
        .with_translation(first_quoted(bullet.rest).unwrap_or_default())
}

/// Child or nested node. With a citation present, the translation is the
/// first quote after it, so quotes inside the citation are never taken.
fn child_node(bullet: &Bullet) -> ConstituentNode {
    let mut node = ConstituentNode::new(bullet.kind, bullet.text);

    let mut tail = bullet.rest;
    if let Some((after, original)) = citation(bullet.rest) {
        if !original.is_empty() {
            node.original = original.to_string();
        }
        node.morphology = fragments(after);
        tail = after;
    }
    if let Some(translation) = first_quoted(tail) {
        node.translation = translation.to_string();
    }

    node
}

#[derive(Debug, Default)]
enum State {
    #[default]
    AwaitingComponent,
    Component(MainComponent),
    Child(MainComponent, ChildComponent),
}

/// Line-driven parser. Feed lines in order, then call [`AnalysisParser::finish`].
#[derive(Debug, Default)]
pub struct AnalysisParser {
    state: State,
    components: Vec<MainComponent>,
}

impl AnalysisParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) {
        let state = std::mem::take(&mut self.state);

        self.state = match (state, classify(line)) {
            (state, Line::Component(header)) => {
                self.close(state);
                match header {
                    Some(b) => State::Component(MainComponent::new(component_node(&b))),
                    None => {
                        debug!(line, "Dropping component block with malformed header");
                        State::AwaitingComponent
                    }
                }
            }
            (State::Component(main), Line::Child(b)) => {
                State::Child(main, ChildComponent::new(child_node(&b)))
            }
            (State::Child(mut main, child), Line::Child(b)) => {
                main.children.push(child);
                State::Child(main, ChildComponent::new(child_node(&b)))
            }
            (State::Child(main, mut child), Line::Nested(b)) => {
                child.children.push(child_node(&b));
                State::Child(main, child)
            }
            // Nested line with no child to attach to, or child outside any block
            (state, Line::Child(_) | Line::Nested(_)) => state,
            (state, Line::Other) => state,
        };
    }

    fn close(&mut self, state: State) {
        match state {
            State::AwaitingComponent => {}
            State::Component(main) => self.components.push(main),
            State::Child(mut main, child) => {
                main.children.push(child);
                self.components.push(main);
            }
        }
    }

    pub fn finish(mut self) -> AnalysisResult {
        let state = std::mem::take(&mut self.state);
        self.close(state);
        debug!(components = self.components.len(), "Parsed analysis text");
        AnalysisResult::new(self.components)
    }
}

/// Parse a whole analysis response.
pub fn parse_analysis(text: &str) -> AnalysisResult {
    let mut parser = AnalysisParser::new();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}
