//! Frontier evolution over whole documents.

use rstest::rstest;

use autosupport::{Document, LanguageDefinition, Position, Rule, Symbol, parse};

use crate::helpers::grammar_fixtures::{keywords, sums};
use crate::helpers::terminals::{AnyChar, Empty, literal};

// =============================================================================
// Acceptance vs. viable prefix
// =============================================================================

#[rstest]
#[case("1", true, true)]
#[case("12+3", true, true)]
#[case("1+(23)", true, true)]
#[case("(1+(2+3))+4", true, true)]
#[case("1+", true, false)]
#[case("(1+2", true, false)]
#[case("+1", false, false)]
#[case("1+)", false, false)]
#[case("1)", false, false)]
fn test_sums(#[case] input: &str, #[case] viable: bool, #[case] accepted: bool) {
    let result = parse(&sums(), &Document::from_text(input)).unwrap();

    assert_eq!(result.finished_successfully, viable, "viable prefix: {input}");
    assert_eq!(result.accepted, accepted, "accepted: {input}");
}

#[test]
fn test_failure_reports_position() {
    let result = parse(&sums(), &Document::new(["1+)"])).unwrap();

    assert!(!result.finished_successfully);
    assert_eq!(result.position, Position::new(0, 2));
    assert!(result.frontier.is_empty());
}

#[test]
fn test_incomplete_input_keeps_frontier() {
    let document = Document::new(["1+"]);
    let result = parse(&sums(), &document).unwrap();

    assert_eq!(result.position, document.end());
    assert!(result.completed.is_empty());
    assert_eq!(result.incomplete().count(), result.frontier.len());
    assert!(!result.frontier.is_empty());
}

#[rstest]
#[case(200)]
#[case(300)]
#[case(1_000)]
fn test_deep_nesting_is_not_limited(#[case] levels: usize) {
    let text = format!("{}1{}", "(".repeat(levels), ")".repeat(levels));

    let result = parse(&sums(), &Document::new([text])).unwrap();

    assert!(result.finished_successfully);
    assert!(result.accepted);
}

#[test]
fn test_deep_unclosed_nesting_stays_viable() {
    let text = format!("{}1", "(".repeat(600));

    let result = parse(&sums(), &Document::new([text])).unwrap();

    assert!(result.finished_successfully);
    assert!(!result.accepted);
    assert!(result.frontier.iter().any(|state| state.depth() > 512));
}

#[test]
fn test_tokens_are_read_contiguously() {
    let result = parse(&sums(), &Document::new(["1", "+", "(2", "3)"])).unwrap();
    assert!(result.accepted);
}

// =============================================================================
// Multi-width alternatives
// =============================================================================

#[rstest]
#[case("let", true)]
#[case("letter", true)]
#[case("lambda", true)]
#[case("lets", false)]
#[case("lex", false)]
fn test_keywords(#[case] input: &str, #[case] accepted: bool) {
    let result = parse(&keywords(), &Document::from_text(input)).unwrap();
    assert_eq!(result.accepted, accepted, "{input}");
}

#[test]
fn test_shorter_match_settles_before_end() {
    // "let" completes at offset 3 while "letter" is still pending.
    let result = parse(&keywords(), &Document::new(["letter"])).unwrap();

    assert!(result.finished_successfully);
    assert_eq!(result.steps, 2);
    assert_eq!(result.completed.len(), 1);
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn test_empty_document_accepts_nullable_start() {
    let definition = LanguageDefinition::new(
        ["S"],
        [
            Rule::new("S", [Symbol::one_of(true, ["A"])]),
            Rule::new("A", [literal("a")]),
        ],
    )
    .unwrap();

    let result = parse(&definition, &Document::new([""])).unwrap();

    assert!(result.finished_successfully);
    assert!(result.accepted);
    assert_eq!(result.steps, 0);
}

#[test]
fn test_empty_document_rejects_non_nullable_start() {
    let definition = LanguageDefinition::new(["S"], [Rule::new("S", [literal("a")])]).unwrap();

    let result = parse(&definition, &Document::new(Vec::<String>::new())).unwrap();

    assert!(result.finished_successfully);
    assert!(!result.accepted);
}

#[test]
fn test_empty_rule_accepts_empty_document() {
    let definition = LanguageDefinition::new(["S"], [Rule::new("S", [])]).unwrap();
    let result = parse(&definition, &Document::new([""])).unwrap();
    assert!(result.accepted);
}

#[test]
fn test_several_start_rules_run_side_by_side() {
    let definition = LanguageDefinition::new(
        ["Word", "Number"],
        [
            Rule::new("Word", [literal("ab")]),
            Rule::new("Number", [literal("12")]),
        ],
    )
    .unwrap();

    assert!(parse(&definition, &Document::new(["ab"])).unwrap().accepted);
    assert!(parse(&definition, &Document::new(["12"])).unwrap().accepted);
    assert!(!parse(&definition, &Document::new(["a2"])).unwrap().finished_successfully);
}

#[test]
fn test_right_recursion_over_long_input() {
    let definition = LanguageDefinition::new(
        ["S"],
        [Rule::new("S", [Symbol::terminal(AnyChar), Symbol::one_of(true, ["S"])])],
    )
    .unwrap();
    let text = "x".repeat(2_000);

    let result = parse(&definition, &Document::new([text])).unwrap();

    assert!(result.accepted);
    assert_eq!(result.steps, 2_000);
}

#[test]
fn test_zero_width_cycle_terminates() {
    let definition = LanguageDefinition::new(
        ["S"],
        [Rule::new("S", [Symbol::terminal(Empty), Symbol::rule("S")])],
    )
    .unwrap();

    let result = parse(&definition, &Document::new(["a"])).unwrap();

    assert!(!result.finished_successfully);
}

#[test]
fn test_parse_is_repeatable() {
    let definition = sums();
    let document = Document::from_text("(1+2)+");

    let first = parse(&definition, &document).unwrap();
    let second = parse(&definition, &document).unwrap();

    assert_eq!(first.finished_successfully, second.finished_successfully);
    assert_eq!(first.accepted, second.accepted);
    assert_eq!(first.position, second.position);
    assert_eq!(first.steps, second.steps);
    assert_eq!(first.frontier.len(), second.frontier.len());
}
