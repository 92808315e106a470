use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::labels;

/// Morphology in display form, in insertion order.
pub type Morphology = IndexMap<String, String>;

/// The five fields every node of a constituent tree carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituentNode {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub morphology: Morphology,
}

impl ConstituentNode {
    /// A node whose citation form is its own text.
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: kind.into(),
            original: text.clone(),
            text,
            translation: String::new(),
            morphology: Morphology::new(),
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_morphology(mut self, morphology: Morphology) -> Self {
        self.morphology = morphology;
        self
    }

    /// Citation form, falling back to the surface text when none was recorded.
    pub fn citation(&self) -> &str {
        if self.original.is_empty() {
            &self.text
        } else {
            &self.original
        }
    }
}

/// Top level of the tree: subject, predicate, object, adverbial...
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainComponent {
    #[serde(flatten)]
    pub node: ConstituentNode,
    #[serde(default)]
    pub children: Vec<ChildComponent>,
}

/// Second level. Its children are leaves, which bounds the tree depth at 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildComponent {
    #[serde(flatten)]
    pub node: ConstituentNode,
    #[serde(default)]
    pub children: Vec<ConstituentNode>,
}

impl MainComponent {
    pub fn new(node: ConstituentNode) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ChildComponent) -> Self {
        self.children.push(child);
        self
    }
}

impl ChildComponent {
    pub fn new(node: ConstituentNode) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }
}

/// `mainComponents` is always present; an empty list means no analysis was available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub main_components: Vec<MainComponent>,
}

impl AnalysisResult {
    pub fn new(main_components: Vec<MainComponent>) -> Self {
        Self { main_components }
    }

    pub fn is_empty(&self) -> bool {
        self.main_components.is_empty()
    }

    /// Tree used when the analysis service failed for `sentence`: a subject
    /// taken from the first word and an explanation of the failure.
    pub fn degraded(sentence: &str) -> Self {
        let first_word = sentence.split_whitespace().next().unwrap_or_default();

        let mut morphology = Morphology::new();
        morphology.insert("part_0".to_string(), labels::MORPHOLOGY_UNAVAILABLE.to_string());

        let subject = MainComponent::new(
            ConstituentNode::new(labels::SUBJECT, first_word).with_translation(labels::SUBJECT),
        )
        .with_child(ChildComponent::new(
            ConstituentNode::new(labels::HEAD_WORD, first_word)
                .with_translation(labels::SUBJECT)
                .with_morphology(morphology),
        ));

        let failure = MainComponent::new(
            ConstituentNode::new(labels::PREDICATE, labels::ANALYSIS_FAILED)
                .with_translation(labels::ANALYSIS_FAILED_TRANSLATION),
        )
        .with_child(ChildComponent::new(
            ConstituentNode::new(labels::EXPLANATION, labels::RETRY_HINT)
                .with_translation(labels::HINT),
        ));

        Self::new(vec![subject, failure])
    }

    /// Tree used when nothing could be produced for a sentence.
    pub fn failed() -> Self {
        Self::new(vec![MainComponent::new(
            ConstituentNode::new(labels::ERROR, labels::ERROR_TEXT)
                .with_translation(labels::ERROR_TRANSLATION),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub original: String,
    pub translation: String,
    pub analysis: AnalysisResult,
}

impl SentenceRecord {
    pub fn new(
        original: impl Into<String>,
        translation: impl Into<String>,
        analysis: AnalysisResult,
    ) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
            analysis,
        }
    }

    /// Record for a sentence where both translation and analysis failed.
    pub fn failed(original: impl Into<String>) -> Self {
        Self::new(original, labels::TRANSLATION_FAILED, AnalysisResult::failed())
    }
}
