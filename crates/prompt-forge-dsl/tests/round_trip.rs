use prompt_forge_dsl::{parse, print};

/// Parse source, print it, parse again, and compare the two ASTs.
fn assert_round_trip(source: &str) {
    let first = parse(source).expect("first parse should succeed");
    let printed = print(&first);
    let second = parse(&printed).unwrap_or_else(|errors| {
        panic!("second parse (after printing) failed with errors: {errors:?}\n\nPrinted:\n{printed}");
    });
    assert_eq!(first, second, "AST changed after round trip\n\nPrinted:\n{printed}");
}

#[test]
fn round_trip_default_schema() {
    assert_round_trip(prompt_forge_core::types::DEFAULT_SCHEMA);
}

#[test]
fn round_trip_all_primitives() {
    assert_round_trip(
        r#"z.object({
            title: z.string(),
            score: z.number(),
            done: z.boolean(),
            nothing: z.null(),
            anything: z.any(),
            mystery: z.unknown(),
        })"#,
    );
}

#[test]
fn round_trip_checks() {
    assert_round_trip(
        r#"object({
            email: string().email(),
            site: string().url().optional(),
            id: string().uuid(),
            code: string().length(6),
            name: string().min(1).max(80),
            age: number().int().nonnegative().lt(150),
            ratio: number().gte(0).lte(1),
            tags: array(string()).nonempty().max(5),
        })"#,
    );
}

#[test]
fn round_trip_composites() {
    assert_round_trip(
        r#"object({
            kind: enum(["bug", "feature", "question"]),
            version: literal(2),
            status: literal("final"),
            value: union([string(), number(), null()]),
            meta: record(string(), unknown()),
            counts: record(number().int()),
            alt: string().or(boolean()),
        }).strict()"#,
    );
}

#[test]
fn round_trip_modifiers() {
    assert_round_trip(
        r#"object({
            a: string().describe("The \"a\" field\nsecond line").default("x"),
            b: number().nullish(),
            c: boolean().default(false),
            d: object({ inner: string() }).passthrough().nullable(),
            "odd key": string(),
        }).partial().describe('outer')"#,
    );
}

#[test]
fn round_trip_deep_nesting() {
    assert_round_trip(
        "object({ a: object({ b: object({ c: array(array(object({ d: string() }))) }) }) })",
    );
}

#[test]
fn round_trip_array_method_form() {
    assert_round_trip("string().array().min(1).optional()");
}
