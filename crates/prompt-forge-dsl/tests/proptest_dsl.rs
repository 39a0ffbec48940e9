use proptest::prelude::*;
use prompt_forge_core::types::{
    Bound, EnumVariants, LengthChecks, LiteralValue, NodeKind, NumberChecks, ObjectShape,
    SchemaNode, ShapeField, StringChecks, StringFormat, UnknownKeys,
};
use prompt_forge_dsl::{compile, extract_top_level_fields, parse, print, validate};

fn quarter() -> impl Strategy<Value = f64> {
    (-400i32..400).prop_map(|n| f64::from(n) / 4.0)
}

fn literal() -> impl Strategy<Value = LiteralValue> {
    prop_oneof![
        "[ -~]{0,8}".prop_map(LiteralValue::String),
        quarter().prop_map(LiteralValue::Number),
        any::<bool>().prop_map(LiteralValue::Boolean),
        Just(LiteralValue::Null),
    ]
}

fn length() -> impl Strategy<Value = LengthChecks> {
    (
        prop::option::of(0usize..20),
        prop::option::of(0usize..20),
        prop::option::of(0usize..20),
    )
        .prop_map(|(min, max, exact)| LengthChecks { min, max, exact })
}

fn bound() -> impl Strategy<Value = Bound> {
    (quarter(), any::<bool>()).prop_map(|(value, inclusive)| Bound { value, inclusive })
}

fn leaf_kind() -> impl Strategy<Value = NodeKind> {
    let format = prop_oneof![
        Just(StringFormat::Email),
        Just(StringFormat::Url),
        Just(StringFormat::Uuid),
    ];
    prop_oneof![
        (length(), prop::option::of(format))
            .prop_map(|(length, format)| NodeKind::String(StringChecks { length, format })),
        (any::<bool>(), prop::option::of(bound()), prop::option::of(bound())).prop_map(
            |(integer, lower, upper)| NodeKind::Number(NumberChecks {
                integer,
                lower,
                upper
            })
        ),
        Just(NodeKind::Boolean),
        Just(NodeKind::Null),
        Just(NodeKind::Any),
        Just(NodeKind::Unknown),
        literal().prop_map(NodeKind::Literal),
        prop::collection::hash_set("[a-z ']{1,5}", 1..4).prop_map(|set| {
            NodeKind::Enum(EnumVariants::new(set.into_iter().collect()).unwrap())
        }),
    ]
}

fn decorate(kind: impl Strategy<Value = NodeKind>) -> impl Strategy<Value = SchemaNode> {
    (
        kind,
        any::<bool>(),
        any::<bool>(),
        prop::option::of("[ -~]{0,8}"),
        prop::option::of(literal()),
    )
        .prop_map(|(kind, optional, nullable, description, default)| SchemaNode {
            kind,
            optional,
            nullable,
            description,
            default,
        })
}

fn unknown_keys() -> impl Strategy<Value = UnknownKeys> {
    prop_oneof![
        Just(UnknownKeys::Strip),
        Just(UnknownKeys::Strict),
        Just(UnknownKeys::Passthrough),
    ]
}

fn arb_node() -> impl Strategy<Value = SchemaNode> {
    decorate(leaf_kind()).prop_recursive(4, 32, 4, |inner| {
        decorate(prop_oneof![
            (inner.clone(), length()).prop_map(|(element, length)| NodeKind::Array {
                element: Box::new(element),
                length,
            }),
            (
                prop::collection::vec(("[a-zA-Z_$0-9 ]{1,6}", inner.clone()), 0..4),
                unknown_keys()
            )
                .prop_map(|(entries, unknown_keys)| {
                    let mut fields: Vec<ShapeField> = Vec::new();
                    for (name, node) in entries {
                        if !fields.iter().any(|f| f.name == name) {
                            fields.push(ShapeField::new(name, node));
                        }
                    }
                    NodeKind::Object(ObjectShape {
                        fields,
                        unknown_keys,
                    })
                }),
            prop::collection::vec(inner.clone(), 2..4).prop_map(NodeKind::Union),
            (prop::option::of(inner.clone()), inner).prop_map(|(key, value)| NodeKind::Record {
                key: key.map(Box::new),
                value: Box::new(value),
            }),
        ])
    })
}

proptest! {
    /// Printing any AST and parsing it back yields the same AST.
    #[test]
    fn print_parse_round_trip(node in arb_node()) {
        let printed = print(&node);
        let reparsed = parse(&printed);
        prop_assert!(reparsed.is_ok(), "failed to reparse: {printed}");
        prop_assert_eq!(reparsed.unwrap(), node);
    }

    /// Printing is a fixed point after one round.
    #[test]
    fn print_is_stable(node in arb_node()) {
        let once = print(&node);
        let twice = print(&parse(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    /// Arbitrary text never panics the compiler.
    #[test]
    fn compile_never_panics(source in ".{0,120}") {
        let _ = compile(&source);
        let _ = extract_top_level_fields(&source);
    }

    /// Token soup built from the language's own vocabulary never panics either.
    #[test]
    fn compile_token_soup_never_panics(
        parts in prop::collection::vec(
            prop_oneof![
                Just("z."), Just("object("), Just("string()"), Just("array("),
                Just("{"), Just("}"), Just("["), Just("]"), Just("("), Just(")"),
                Just(","), Just(":"), Just("."), Just("a"), Just("1"), Just("\"k\""),
                Just("optional()"), Just("or("), Just("union(["), Just("null"),
            ],
            0..40,
        )
    ) {
        let _ = compile(&parts.concat());
    }

    /// Validation always produces a result, whatever the candidate text.
    #[test]
    fn validate_never_panics(node in arb_node(), raw in ".{0,60}") {
        let validator = compile(&print(&node)).unwrap();
        let result = validate(&validator, &raw);
        prop_assert_eq!(result.valid, result.error.is_none());
    }

    /// Field extraction reports declared keys in order for object roots.
    #[test]
    fn fields_follow_declaration_order(
        keys in prop::collection::btree_set("[a-z]{1,6}", 1..6)
    ) {
        let keys: Vec<String> = keys.into_iter().rev().collect();
        let body: Vec<String> = keys.iter().map(|k| format!("{k}: string()")).collect();
        let source = format!("z.object({{ {} }})", body.join(", "));
        prop_assert_eq!(extract_top_level_fields(&source), keys);
    }
}
