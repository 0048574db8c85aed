//! Property tests for the parser using proptest.
//!
//! Generated programs must parse cleanly and their canonical rendering must
//! parse back to the same tree. Arbitrary input must never crash the parser.

use monkey_parser::parse_source;
use proptest::prelude::*;

const KEYWORDS: [&str; 7] = ["let", "return", "fn", "if", "else", "true", "false"];

/// Strategy for generating identifiers that are not keywords
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-zA-Z0-9_]{0,6}".prop_filter("keywords are not identifiers", |ident| {
        !KEYWORDS.contains(&ident.as_str())
    })
}

/// Strategy for generating binary operators
fn bin_op_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("<"),
        Just(">"),
        Just("=="),
        Just("!="),
    ]
}

/// Strategy for generating valid expressions
fn expr_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        identifier_strategy(),
        (0u32..100_000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
    ];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            // Unary operators
            (prop_oneof![Just("!"), Just("-")], inner.clone())
                .prop_map(|(op, operand)| format!("{}{}", op, operand)),
            // Binary operations
            (inner.clone(), bin_op_strategy(), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            // Parenthesized
            inner.clone().prop_map(|e| format!("({})", e)),
            // Calls
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(callee, args)| format!("{}({})", callee, args.join(", "))),
            // Conditionals
            (inner.clone(), inner.clone(), prop::option::of(inner.clone())).prop_map(
                |(condition, consequence, alternative)| match alternative {
                    Some(alternative) => format!(
                        "if ({}) {{ {} }} else {{ {} }}",
                        condition, consequence, alternative
                    ),
                    None => format!("if ({}) {{ {} }}", condition, consequence),
                }
            ),
            // Function literals
            (prop::collection::vec(identifier_strategy(), 0..3), inner.clone())
                .prop_map(|(params, body)| format!("fn({}) {{ {} }}", params.join(", "), body)),
        ]
    })
}

/// Strategy for generating statements
fn stmt_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        expr_strategy().prop_map(|e| format!("{};", e)),
        (identifier_strategy(), expr_strategy()).prop_map(|(name, e)| format!("let {} = {};", name, e)),
        expr_strategy().prop_map(|e| format!("return {};", e)),
    ]
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(stmt_strategy(), 0..5).prop_map(|stmts| stmts.join("\n"))
}

/// Loose soup of real token spellings, mostly ill-formed
fn token_soup_strategy() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec![
        "let", "return", "fn", "if", "else", "true", "false", "x", "y", "1", "42", "=", "==",
        "!=", "!", "+", "-", "*", "/", "<", ">", "(", ")", "{", "}", ",", ";", "@",
    ]);
    prop::collection::vec(token, 0..40).prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_generated_programs_parse(source in program_strategy()) {
        let (_, errors) = parse_source(&source, None);
        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", source, errors);
    }

    #[test]
    fn test_canonical_form_is_stable(source in program_strategy()) {
        let (program, _) = parse_source(&source, None);
        let rendered = program.to_string();

        let (reparsed, errors) = parse_source(&rendered, None);
        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", rendered, errors);
        prop_assert_eq!(reparsed.len(), program.len());
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn test_arbitrary_input_does_not_crash(source in "\\PC{0,64}") {
        let (program, errors) = parse_source(&source, None);
        let _ = program.to_string();
        for error in errors {
            prop_assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_token_soup_does_not_crash(source in token_soup_strategy()) {
        let (program, errors) = parse_source(&source, None);

        // Every error points inside the input or at its end
        for error in &errors {
            prop_assert!((error.get_position().0 as usize) <= source.len());
        }
        // Whatever did parse renders to something the parser accepts
        let (_, reparse_errors) = parse_source(&program.to_string(), None);
        prop_assert!(reparse_errors.is_empty());
    }
}
