use proptest::prelude::*;
use prompt_forge_core::slug::slugify;
use prompt_forge_core::types::{EnumVariants, ExamplePair, LiteralValue, UserInput};

proptest! {
    #[test]
    fn slug_uses_only_safe_characters(name in ".{0,40}") {
        let slug = slugify(&name);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn slug_is_idempotent(name in ".{0,40}") {
        let once = slugify(&name);
        prop_assert_eq!(slugify(&once), once.clone());
    }

    #[test]
    fn enum_variants_reject_duplicates(
        variants in prop::collection::vec("[a-z]{1,3}", 1..=8)
    ) {
        let mut seen = std::collections::HashSet::new();
        let has_duplicate = !variants.iter().all(|v| seen.insert(v.clone()));
        let result = EnumVariants::new(variants);
        prop_assert_eq!(result.is_err(), has_duplicate);
    }

    #[test]
    fn literal_matches_its_own_json(n in -1.0e9f64..1.0e9f64, s in ".{0,10}", b: bool) {
        for literal in [
            LiteralValue::Number(n),
            LiteralValue::String(s.clone()),
            LiteralValue::Boolean(b),
            LiteralValue::Null,
        ] {
            prop_assert!(literal.matches(&literal.to_json()));
        }
    }

    #[test]
    fn user_input_keeps_first_insertion_position(
        keys in prop::collection::vec("[a-d]", 1..12)
    ) {
        let mut input = UserInput::new();
        let mut order: Vec<String> = Vec::new();
        for (i, k) in keys.iter().enumerate() {
            input.set(k.clone(), i.to_string());
            if !order.contains(k) {
                order.push(k.clone());
            }
        }
        let actual: Vec<String> = input.iter().map(|(k, _)| k.to_string()).collect();
        prop_assert_eq!(actual, order);
    }

    #[test]
    fn example_blankness_ignores_whitespace(ws in "[ \t\n]{0,5}") {
        prop_assert!(ExamplePair::new(ws.clone(), ws).is_blank());
    }
}
