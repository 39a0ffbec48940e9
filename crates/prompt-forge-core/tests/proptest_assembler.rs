use proptest::prelude::*;
use prompt_forge_core::assembler::assemble;
use prompt_forge_core::escape::{element_name, escape_markup};
use prompt_forge_core::types::{ExamplePair, PromptSpec, UserInput};

/// Reference unescaper for the five predefined XML entities.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (replacement, len) = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&apos;", '\''),
        ]
        .iter()
        .find(|(entity, _)| tail.starts_with(entity))
        .map(|(entity, c)| (*c, entity.len()))
        .unwrap_or(('&', 1));
        out.push(replacement);
        rest = &tail[len..];
    }
    out.push_str(rest);
    out
}

fn text() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9&<>\"'\n;]{0,40}"
}

fn arb_spec() -> impl Strategy<Value = PromptSpec> {
    (
        text(),
        text(),
        prop::collection::vec((text(), text()), 0..4),
        text(),
        prop::collection::vec(("[a-z]{1,8}", text()), 0..4),
    )
        .prop_map(|(role, schema, examples, instructions, inputs)| PromptSpec {
            agent_role: role,
            schema_source: schema,
            examples: examples
                .into_iter()
                .map(|(i, o)| ExamplePair::new(i, o))
                .collect(),
            instructions,
            user_input: inputs.into_iter().collect::<UserInput>(),
        })
}

proptest! {
    #[test]
    fn escape_roundtrips_through_reference_unescaper(s in ".{0,80}") {
        prop_assert_eq!(unescape(&escape_markup(&s)), s);
    }

    #[test]
    fn escaped_text_has_no_markup_characters(s in ".{0,80}") {
        let escaped = escape_markup(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
    }

    #[test]
    fn element_names_are_always_well_formed(key in ".{0,20}") {
        let name = element_name(&key);
        let first = name.chars().next().unwrap();
        prop_assert!(first.is_alphabetic() || first == '_');
        prop_assert!(name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')));
    }

    #[test]
    fn valid_element_names_pass_through(key in "[a-zA-Z_][a-zA-Z0-9_.-]{0,15}") {
        prop_assert_eq!(element_name(&key), key);
    }

    #[test]
    fn assemble_is_deterministic(spec in arb_spec()) {
        prop_assert_eq!(assemble(&spec), assemble(&spec));
    }

    #[test]
    fn sections_appear_in_fixed_order(spec in arb_spec()) {
        let out = assemble(&spec);
        let tags = [
            "<agent_role>\n",
            "<schema_of_expected_result>\n",
            "<examples>\n",
            "<instructions>\n",
        ];
        let positions: Vec<usize> = tags.iter().filter_map(|t| out.find(t)).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    #[test]
    fn output_never_has_surrounding_whitespace(spec in arb_spec()) {
        let out = assemble(&spec);
        prop_assert_eq!(out.trim(), out.as_str());
    }

    #[test]
    fn non_blank_examples_all_appear(spec in arb_spec()) {
        let out = assemble(&spec);
        let expected = spec.examples.iter().filter(|e| !e.is_blank()).count();
        prop_assert_eq!(out.matches("  <example>\n").count(), expected);
    }
}
