use rkyv::{AlignedVec, Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::LexiconError;
use crate::morphology::MorphFlags;

#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeDeserialize, SerdeSerialize,
)]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub form: String,
    pub flags: MorphFlags,
}

/// Surface forms with known morphology plus the categorized word lists
/// used by the rule-based extractor.
///
/// Built once (see [`Lexicon::builtin`] or [`Lexicon::from_bytes`]) and then
/// only ever borrowed.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeDeserialize, SerdeSerialize,
)]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
    #[serde(default)]
    pub pronouns: Vec<String>,
    #[serde(default)]
    pub subject_nouns: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub object_nouns: Vec<String>,
    #[serde(default)]
    pub prepositions: Vec<String>,
}

impl Lexicon {
    /// Morphology of `form`: exact match first, then the lowercase form.
    ///
    /// Linear scan. The table is a few dozen entries.
    pub fn lookup(&self, form: &str) -> Option<MorphFlags> {
        if let Some(flags) = self.find(form) {
            return Some(flags);
        }
        let lower = form.to_lowercase();
        if lower != form {
            return self.find(&lower);
        }
        None
    }

    fn find(&self, form: &str) -> Option<MorphFlags> {
        self.entries
            .iter()
            .find(|entry| entry.form == form)
            .map(|entry| entry.flags)
    }

    pub fn is_pronoun(&self, word: &str) -> bool {
        contains_word(&self.pronouns, word)
    }

    pub fn is_subject_noun(&self, word: &str) -> bool {
        contains_word(&self.subject_nouns, word)
    }

    pub fn is_verb(&self, word: &str) -> bool {
        contains_word(&self.verbs, word)
    }

    pub fn is_object_noun(&self, word: &str) -> bool {
        contains_word(&self.object_nouns, word)
    }

    pub fn is_preposition(&self, word: &str) -> bool {
        contains_word(&self.prepositions, word)
    }

    /// Serialize into a validated rkyv archive.
    pub fn to_bytes(&self) -> Result<AlignedVec, LexiconError> {
        rkyv::to_bytes::<_, 4096>(self).map_err(|e| LexiconError::Encode(e.to_string()))
    }

    /// Load a lexicon compiled by `slovo compile`.
    ///
    /// The archive is validated before use; the bytes are copied into an
    /// aligned buffer first so callers can pass anything read from disk or fetched.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LexiconError> {
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<Lexicon>(&aligned)
            .map_err(|e| LexiconError::InvalidArchive(e.to_string()))?;

        archived
            .deserialize(&mut rkyv::Infallible)
            .map_err(|_| LexiconError::InvalidArchive("failed to deserialize lexicon".to_string()))
    }

    /// The fixed vocabulary the analyzer ships with.
    pub fn builtin() -> Self {
        use MorphFlags as M;

        let nom_sg = M::NOMINATIVE | M::SINGULAR;
        let nom_pl = M::NOMINATIVE | M::PLURAL;
        let present_ipf = M::PRESENT | M::IMPERFECTIVE;

        let entries = vec![
            // Pronouns
            entry("я", nom_sg | M::FIRST_PERSON),
            entry("ты", nom_sg | M::SECOND_PERSON),
            entry("он", nom_sg | M::THIRD_PERSON | M::MASCULINE),
            entry("она", nom_sg | M::THIRD_PERSON | M::FEMININE),
            entry("оно", nom_sg | M::THIRD_PERSON | M::NEUTER),
            entry("мы", nom_pl | M::FIRST_PERSON),
            entry("вы", nom_pl | M::SECOND_PERSON),
            entry("они", nom_pl | M::THIRD_PERSON),
            // Verbs (present tense)
            entry("люблю", present_ipf | M::FIRST_PERSON | M::SINGULAR),
            entry("любишь", present_ipf | M::SECOND_PERSON | M::SINGULAR),
            entry("любит", present_ipf | M::THIRD_PERSON | M::SINGULAR),
            entry("любим", present_ipf | M::FIRST_PERSON | M::PLURAL),
            entry("любите", present_ipf | M::SECOND_PERSON | M::PLURAL),
            entry("любят", present_ipf | M::THIRD_PERSON | M::PLURAL),
            entry("изучаю", present_ipf | M::FIRST_PERSON | M::SINGULAR),
            entry("изучаешь", present_ipf | M::SECOND_PERSON | M::SINGULAR),
            entry("изучает", present_ipf | M::THIRD_PERSON | M::SINGULAR),
            entry("изучаем", present_ipf | M::FIRST_PERSON | M::PLURAL),
            entry("изучаете", present_ipf | M::SECOND_PERSON | M::PLURAL),
            entry("изучают", present_ipf | M::THIRD_PERSON | M::PLURAL),
            // Nouns
            entry("язык", nom_sg | M::MASCULINE),
            entry("языка", M::GENITIVE | M::SINGULAR | M::MASCULINE),
            entry("языку", M::DATIVE | M::SINGULAR | M::MASCULINE),
            entry("языком", M::INSTRUMENTAL | M::SINGULAR | M::MASCULINE),
            entry("языке", M::PREPOSITIONAL | M::SINGULAR | M::MASCULINE),
            entry("языки", nom_pl | M::MASCULINE),
            entry("Москва", nom_sg | M::FEMININE),
            entry("Москвы", M::GENITIVE | M::SINGULAR | M::FEMININE),
            entry("Москве", M::DATIVE | M::PREPOSITIONAL | M::SINGULAR | M::FEMININE),
            entry("Москву", M::ACCUSATIVE | M::SINGULAR | M::FEMININE),
            entry("Москвой", M::INSTRUMENTAL | M::SINGULAR | M::FEMININE),
            entry("Россия", nom_sg | M::FEMININE),
            entry(
                "России",
                M::GENITIVE | M::DATIVE | M::PREPOSITIONAL | M::SINGULAR | M::FEMININE,
            ),
            entry("Россию", M::ACCUSATIVE | M::SINGULAR | M::FEMININE),
            entry("Россией", M::INSTRUMENTAL | M::SINGULAR | M::FEMININE),
        ];

        Self {
            version: 1,
            entries,
            pronouns: words(&["я", "ты", "он", "она", "оно", "мы", "вы", "они"]),
            subject_nouns: words(&[
                "человек", "люди", "студент", "студенты", "учитель", "ученик", "мужчина",
                "женщина", "ребенок", "дети",
            ]),
            verbs: words(&[
                "быть", "есть", "иметь", "делать", "идти", "ходить", "говорить", "сказать",
                "любить", "хотеть", "знать", "видеть", "слышать", "думать", "читать", "писать",
                "учить", "изучать",
            ]),
            // Accusative-only forms; "язык" stays out because its lexicon entry is nominative.
            object_nouns: words(&[
                "книгу", "книги", "языки", "слово", "слова", "текст", "тексты", "задание",
                "задания",
            ]),
            prepositions: words(&[
                "в", "на", "с", "к", "от", "из", "у", "о", "об", "по", "за", "под", "над",
                "перед", "между",
            ]),
        }
    }
}

fn entry(form: &str, flags: MorphFlags) -> LexiconEntry {
    LexiconEntry {
        form: form.to_string(),
        flags,
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn contains_word(list: &[String], word: &str) -> bool {
    let lower = word.to_lowercase();
    list.iter().any(|w| *w == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_lowercase() {
        let lexicon = Lexicon::builtin();

        // "Я" at the start of a sentence resolves through "я".
        let flags = lexicon.lookup("Я").unwrap();
        assert!(flags.contains(MorphFlags::NOMINATIVE | MorphFlags::FIRST_PERSON));

        // Proper nouns are stored capitalized and match exactly.
        assert_eq!(
            lexicon.lookup("Москву"),
            Some(MorphFlags::ACCUSATIVE | MorphFlags::SINGULAR | MorphFlags::FEMININE)
        );

        assert_eq!(lexicon.lookup("русский"), None);
    }

    #[test]
    fn test_word_lists_ignore_case() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_pronoun("Я"));
        assert!(lexicon.is_preposition("В"));
        assert!(lexicon.is_verb("изучать"));
        assert!(lexicon.is_subject_noun("Студент"));
        assert!(!lexicon.is_object_noun("язык"));
    }

    #[test]
    fn test_archive_survives_validation() {
        let lexicon = Lexicon::builtin();
        let bytes = lexicon.to_bytes().expect("Failed to archive lexicon");

        let loaded = Lexicon::from_bytes(&bytes).expect("Failed to load lexicon");
        assert_eq!(loaded, lexicon);
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let result = Lexicon::from_bytes(&[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        assert!(matches!(result, Err(LexiconError::InvalidArchive(_))));
    }
}
