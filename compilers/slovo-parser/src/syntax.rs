use slovo_protocol::{labels, Feature, Lexicon, MorphFlags};

use crate::token::Token;

/// Roles the rule-based extractor assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxRole {
    Subject,
    Predicate,
    Object,
    Adverbial,
}

impl SyntaxRole {
    pub fn label(self) -> &'static str {
        match self {
            SyntaxRole::Subject => labels::SUBJECT,
            SyntaxRole::Predicate => labels::PREDICATE,
            SyntaxRole::Object => labels::OBJECT,
            SyntaxRole::Adverbial => labels::ADVERBIAL,
        }
    }
}

/// A word filling a role, with its (possibly defaulted) morphology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleFiller {
    pub text: String,
    pub morphology: MorphFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adverbial {
    /// Object of the preposition, or the fallback word as written.
    pub text: String,
    pub preposition: Option<String>,
    pub morphology: MorphFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub subject: Option<RoleFiller>,
    pub predicate: Option<RoleFiller>,
    pub object: Option<RoleFiller>,
    pub adverbials: Vec<Adverbial>,
}

/// Heuristic role assignment over a tokenized sentence.
///
/// Each role is found by a lexical scan first and a positional fallback
/// second, so any sentence with at least three words gets subject,
/// predicate and object filled.
pub struct Extractor<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Extractor<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, tokens: &[Token]) -> Extraction {
        Extraction {
            subject: self.subject(tokens),
            predicate: self.predicate(tokens),
            object: self.object(tokens),
            adverbials: self.adverbials(tokens),
        }
    }

    pub fn subject(&self, tokens: &[Token]) -> Option<RoleFiller> {
        // 1. Pronouns win over everything
        for token in tokens {
            let bare = token.bare();
            if self.lexicon.is_pronoun(&bare) {
                return Some(self.filler(bare, MorphFlags::NOMINATIVE));
            }
        }

        // 2. Known subject nouns, or any form the lexicon marks plain nominative
        for token in tokens {
            let bare = token.bare();
            let nominative = self
                .lexicon
                .lookup(&bare)
                .is_some_and(|flags| flags.is_case(MorphFlags::NOMINATIVE));
            if self.lexicon.is_subject_noun(&bare) || nominative {
                return Some(self.filler(bare, MorphFlags::NOMINATIVE));
            }
        }

        // 3. First word
        tokens
            .first()
            .map(|token| self.filler(token.bare(), MorphFlags::NOMINATIVE))
    }

    pub fn predicate(&self, tokens: &[Token]) -> Option<RoleFiller> {
        for token in tokens {
            let bare = token.bare();
            let finite = self
                .lexicon
                .lookup(&bare)
                .is_some_and(|flags| flags.has(Feature::Tense));
            if finite || self.lexicon.is_verb(&bare) {
                return Some(self.filler(bare, MorphFlags::empty()));
            }
        }

        tokens
            .get(1)
            .map(|token| self.filler(token.bare(), MorphFlags::empty()))
    }

    /// Objects are searched from the third word on.
    pub fn object(&self, tokens: &[Token]) -> Option<RoleFiller> {
        for token in tokens.iter().skip(2) {
            let bare = token.bare();
            let accusative = self
                .lexicon
                .lookup(&bare)
                .is_some_and(|flags| flags.is_case(MorphFlags::ACCUSATIVE));
            if self.lexicon.is_object_noun(&bare) || accusative {
                return Some(self.filler(bare, MorphFlags::ACCUSATIVE));
            }
        }

        tokens
            .get(2)
            .map(|token| self.filler(token.bare(), MorphFlags::ACCUSATIVE))
    }

    /// Adverbials only exist in sentences longer than three words and are
    /// searched from the fourth word on.
    pub fn adverbials(&self, tokens: &[Token]) -> Vec<Adverbial> {
        if tokens.len() <= 3 {
            return Vec::new();
        }
        let rest = &tokens[3..];

        // 1. Preposition + following word, non-overlapping
        let mut adverbials = Vec::new();
        let mut i = 0;
        while i + 1 < rest.len() {
            let word = rest[i].bare();
            if self.lexicon.is_preposition(&word) {
                let object = rest[i + 1].bare();
                adverbials.push(Adverbial {
                    morphology: self.lexicon.lookup(&object).unwrap_or(MorphFlags::empty()),
                    text: object,
                    preposition: Some(word),
                });
                i += 2;
            } else {
                i += 1;
            }
        }

        // 2. No phrase found: the fourth word, as written
        if adverbials.is_empty() {
            let first = &rest[0];
            adverbials.push(Adverbial {
                text: first.text.to_string(),
                preposition: None,
                morphology: self.lexicon.lookup(&first.bare()).unwrap_or(MorphFlags::empty()),
            });
        }

        adverbials
    }

    fn filler(&self, text: String, default: MorphFlags) -> RoleFiller {
        let morphology = self.lexicon.lookup(&text).unwrap_or(default);
        RoleFiller { text, morphology }
    }
}
