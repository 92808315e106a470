//! Morphology translator: feature bits to the labels shown to learners.

use slovo_protocol::{Feature, MorphFlags, Morphology};

/// Display key of a feature group.
pub fn feature_key(feature: Feature) -> &'static str {
    match feature {
        Feature::Case => "格",
        Feature::Number => "数",
        Feature::Gender => "性",
        Feature::Person => "人称",
        Feature::Tense => "时态",
        Feature::Aspect => "体",
    }
}

/// Display label of a single feature bit.
///
/// Every named bit has a label; `None` only for empty or multi-bit input.
pub fn flag_label(flag: MorphFlags) -> Option<&'static str> {
    let label = match flag {
        f if f == MorphFlags::NOMINATIVE => "主格",
        f if f == MorphFlags::GENITIVE => "属格",
        f if f == MorphFlags::DATIVE => "与格",
        f if f == MorphFlags::ACCUSATIVE => "宾格",
        f if f == MorphFlags::INSTRUMENTAL => "工具格",
        f if f == MorphFlags::PREPOSITIONAL => "前置格",
        f if f == MorphFlags::SINGULAR => "单数",
        f if f == MorphFlags::PLURAL => "复数",
        f if f == MorphFlags::MASCULINE => "阳性",
        f if f == MorphFlags::FEMININE => "阴性",
        f if f == MorphFlags::NEUTER => "中性",
        f if f == MorphFlags::FIRST_PERSON => "第一人称",
        f if f == MorphFlags::SECOND_PERSON => "第二人称",
        f if f == MorphFlags::THIRD_PERSON => "第三人称",
        f if f == MorphFlags::PRESENT => "现在时",
        f if f == MorphFlags::PAST => "过去时",
        f if f == MorphFlags::FUTURE => "将来时",
        f if f == MorphFlags::PERFECTIVE => "完成体",
        f if f == MorphFlags::IMPERFECTIVE => "未完成体",
        _ => return None,
    };
    Some(label)
}

/// Label of one feature group, e.g. `与格/前置格` for a syncretic case.
/// `None` when the group is empty.
pub fn feature_value(flags: MorphFlags, feature: Feature) -> Option<String> {
    let group = flags.feature(feature);
    if group.is_empty() {
        return None;
    }

    let labels: Vec<&str> = group.iter().filter_map(flag_label).collect();
    Some(labels.join("/"))
}

/// Translate a feature set into display form.
///
/// Keys follow [`Feature::ALL`]; empty groups are left out rather than filled.
pub fn translate(flags: MorphFlags) -> Morphology {
    let mut out = Morphology::new();
    for feature in Feature::ALL {
        if let Some(value) = feature_value(flags, feature) {
            out.insert(feature_key(feature).to_string(), value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pronoun_features() {
        let ya = MorphFlags::NOMINATIVE | MorphFlags::SINGULAR | MorphFlags::FIRST_PERSON;
        let out = translate(ya);

        let pairs: Vec<(&str, &str)> = out.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("格", "主格"), ("数", "单数"), ("人称", "第一人称")]);
    }

    #[test]
    fn test_compound_case_joins_labels() {
        let rossii = MorphFlags::GENITIVE
            | MorphFlags::DATIVE
            | MorphFlags::PREPOSITIONAL
            | MorphFlags::SINGULAR
            | MorphFlags::FEMININE;
        let out = translate(rossii);
        assert_eq!(out["格"], "属格/与格/前置格");
        assert_eq!(out["性"], "阴性");
    }

    #[test]
    fn test_empty_set_translates_to_nothing() {
        assert!(translate(MorphFlags::empty()).is_empty());
    }

    proptest! {
        #[test]
        fn test_keys_only_for_present_groups(bits in any::<u32>()) {
            let flags = MorphFlags::from_bits_truncate(bits);
            let out = translate(flags);

            for feature in Feature::ALL {
                let key = feature_key(feature);
                prop_assert_eq!(out.contains_key(key), flags.has(feature));
            }
            // No label is ever empty: every named bit is covered by the table.
            for value in out.values() {
                prop_assert!(value.split('/').all(|part| !part.is_empty()));
            }
        }
    }
}
