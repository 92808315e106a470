use slovo_morph::translate;
use slovo_protocol::{labels, AnalysisResult, ChildComponent, ConstituentNode, MainComponent};

use crate::syntax::{Adverbial, Extraction, RoleFiller, SyntaxRole};

/// Build the two-level constituent tree for an extraction.
///
/// Components appear as subject, predicate, object, then adverbials.
/// Main nodes carry the role label as translation; morphology lives on
/// their children.
pub fn build_tree(extraction: &Extraction) -> AnalysisResult {
    let roles = [
        (SyntaxRole::Subject, &extraction.subject),
        (SyntaxRole::Predicate, &extraction.predicate),
        (SyntaxRole::Object, &extraction.object),
    ];

    let mut components: Vec<MainComponent> = roles
        .into_iter()
        .filter_map(|(role, filler)| filler.as_ref().map(|f| role_component(role, f)))
        .collect();

    components.extend(extraction.adverbials.iter().map(adverbial_component));

    AnalysisResult::new(components)
}

fn role_component(role: SyntaxRole, filler: &RoleFiller) -> MainComponent {
    let main = ConstituentNode::new(role.label(), &filler.text).with_translation(role.label());
    MainComponent::new(main).with_child(ChildComponent::new(
        ConstituentNode::new(labels::HEAD_WORD, &filler.text)
            .with_translation(role.label())
            .with_morphology(translate(filler.morphology)),
    ))
}

fn adverbial_component(adverbial: &Adverbial) -> MainComponent {
    let label = SyntaxRole::Adverbial.label();
    let main = MainComponent::new(
        ConstituentNode::new(label, &adverbial.text).with_translation(label),
    );

    match &adverbial.preposition {
        Some(preposition) => main
            .with_child(ChildComponent::new(
                ConstituentNode::new(labels::PREPOSITION, preposition)
                    .with_translation(labels::PREPOSITION),
            ))
            .with_child(ChildComponent::new(
                ConstituentNode::new(labels::OBJECT, &adverbial.text)
                    .with_translation(labels::OBJECT)
                    .with_morphology(translate(adverbial.morphology)),
            )),
        None => main.with_child(ChildComponent::new(
            ConstituentNode::new(labels::HEAD_WORD, &adverbial.text)
                .with_translation(label)
                .with_morphology(translate(adverbial.morphology)),
        )),
    }
}
