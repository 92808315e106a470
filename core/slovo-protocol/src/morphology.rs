use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

bitflags! {
    /// Morphological feature set of a single word form.
    ///
    /// Bits are grouped by [`Feature`]. An empty group means the feature is
    /// unknown or not applicable. Several bits inside the case group encode a
    /// syncretic form such as Dative/Prepositional.
    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerdeDeserialize, SerdeSerialize,
    )]
    pub struct MorphFlags: u32 {
        // Case (Bits 0-5)
        const NOMINATIVE = 1;
        const GENITIVE = 2;
        const DATIVE = 4;
        const ACCUSATIVE = 8;
        const INSTRUMENTAL = 16;
        const PREPOSITIONAL = 32;

        // Number (Bits 6-7)
        const SINGULAR = 64;
        const PLURAL = 128;

        // Gender (Bits 8-10)
        const MASCULINE = 256;
        const FEMININE = 512;
        const NEUTER = 1024;

        // Person (Bits 11-13)
        const FIRST_PERSON = 2048;
        const SECOND_PERSON = 4096;
        const THIRD_PERSON = 8192;

        // Tense (Bits 14-16)
        const PRESENT = 16384;
        const PAST = 32768;
        const FUTURE = 65536;

        // Aspect (Bits 17-18)
        const PERFECTIVE = 131072;
        const IMPERFECTIVE = 262144;
    }
}

/// A grammatical category, i.e. one group of bits in [`MorphFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Case,
    Number,
    Gender,
    Person,
    Tense,
    Aspect,
}

impl Feature {
    /// Display order.
    pub const ALL: [Feature; 6] = [
        Feature::Case,
        Feature::Number,
        Feature::Gender,
        Feature::Person,
        Feature::Tense,
        Feature::Aspect,
    ];

    pub const fn mask(self) -> MorphFlags {
        match self {
            Feature::Case => MorphFlags::NOMINATIVE
                .union(MorphFlags::GENITIVE)
                .union(MorphFlags::DATIVE)
                .union(MorphFlags::ACCUSATIVE)
                .union(MorphFlags::INSTRUMENTAL)
                .union(MorphFlags::PREPOSITIONAL),
            Feature::Number => MorphFlags::SINGULAR.union(MorphFlags::PLURAL),
            Feature::Gender => MorphFlags::MASCULINE
                .union(MorphFlags::FEMININE)
                .union(MorphFlags::NEUTER),
            Feature::Person => MorphFlags::FIRST_PERSON
                .union(MorphFlags::SECOND_PERSON)
                .union(MorphFlags::THIRD_PERSON),
            Feature::Tense => MorphFlags::PRESENT
                .union(MorphFlags::PAST)
                .union(MorphFlags::FUTURE),
            Feature::Aspect => MorphFlags::PERFECTIVE.union(MorphFlags::IMPERFECTIVE),
        }
    }
}

impl MorphFlags {
    /// The bits of `feature` present in this set.
    pub fn feature(self, feature: Feature) -> MorphFlags {
        self.intersection(feature.mask())
    }

    pub fn has(self, feature: Feature) -> bool {
        self.intersects(feature.mask())
    }

    /// `true` when the case group is exactly `case`. Compound cases never match a single case.
    pub fn is_case(self, case: MorphFlags) -> bool {
        self.feature(Feature::Case) == case
    }
}

// rkyv support for MorphFlags
impl Archive for MorphFlags {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::ser::Serializer + ?Sized> Serialize<S> for MorphFlags {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<MorphFlags, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<MorphFlags, D::Error> {
        Ok(MorphFlags::from_bits_truncate(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_masks_are_disjoint() {
        let mut seen = MorphFlags::empty();
        for feature in Feature::ALL {
            assert!(!seen.intersects(feature.mask()), "{:?} overlaps", feature);
            seen |= feature.mask();
        }
        assert_eq!(seen, MorphFlags::all());
    }

    #[test]
    fn test_compound_case_is_not_a_single_case() {
        let moskve = MorphFlags::DATIVE | MorphFlags::PREPOSITIONAL | MorphFlags::SINGULAR;
        assert!(!moskve.is_case(MorphFlags::DATIVE));
        assert!(moskve.is_case(MorphFlags::DATIVE | MorphFlags::PREPOSITIONAL));
        assert_eq!(moskve.feature(Feature::Number), MorphFlags::SINGULAR);
        assert!(!moskve.has(Feature::Tense));
    }

    #[test]
    fn test_flags_serialize_as_text() {
        let flags = MorphFlags::NOMINATIVE | MorphFlags::SINGULAR;
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, "\"NOMINATIVE | SINGULAR\"");

        let back: MorphFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);

        // Unknown names are rejected at load time, never passed through.
        assert!(serde_json::from_str::<MorphFlags>("\"VOCATIVE\"").is_err());
    }
}
