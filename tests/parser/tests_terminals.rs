//! Terminal, rule reference and alternation behavior of a full parse.

use rstest::rstest;

use autosupport::{Document, LanguageDefinition, Rule, Symbol, parse};

use crate::helpers::terminals::{MockTerminal, literal, mock};

#[rstest]
#[case(true)]
#[case(false)]
fn test_rule_with_one_terminal(#[case] should_match: bool) {
    let terminal = MockTerminal::new("terminalString".len(), should_match);
    let definition = LanguageDefinition::new(["S"], [Rule::new("S", [mock(&terminal)])]).unwrap();

    let result = parse(&definition, &Document::new(["stringToken"])).unwrap();

    assert_eq!(result.finished_successfully, should_match);
    assert_eq!(result.accepted, should_match);
    assert_eq!(terminal.calls(), 1);
}

#[rstest]
#[case("stringToken", true)]
#[case("terminalString", false)]
fn test_literal_terminal_on_short_input(#[case] expected: &'static str, #[case] matches: bool) {
    let definition =
        LanguageDefinition::new(["S"], [Rule::new("S", [literal(expected)])]).unwrap();

    let result = parse(&definition, &Document::new(["stringToken"])).unwrap();

    assert_eq!(result.finished_successfully, matches);
}

#[test]
fn test_terminal_sees_truncated_window_at_end() {
    let terminal = MockTerminal::new(14, true);
    let definition = LanguageDefinition::new(["S"], [Rule::new("S", [mock(&terminal)])]).unwrap();

    parse(&definition, &Document::new(["stringToken"])).unwrap();

    assert_eq!(terminal.windows(), ["stringToken"]);
}

#[test]
fn test_rule_reference_resolves_once() {
    let terminal = MockTerminal::new("terminalString".len(), true);
    let definition = LanguageDefinition::new(
        ["S"],
        [
            Rule::new("S", [Symbol::rule("ReferencedRule")]),
            Rule::new("ReferencedRule", [mock(&terminal)]),
        ],
    )
    .unwrap();

    let result = parse(&definition, &Document::new(["stringToken"])).unwrap();

    assert!(result.finished_successfully);
    assert_eq!(terminal.calls(), 1);
}

#[test]
fn test_one_of_tries_every_option_once() {
    let succeeds = MockTerminal::new(1, true);
    let fails = MockTerminal::new(1, false);
    let definition = LanguageDefinition::new(
        ["S"],
        [
            Rule::new("S", [Symbol::one_of(false, ["terminalFails", "terminalSucceeds"])]),
            Rule::new("terminalSucceeds", [mock(&succeeds)]),
            Rule::new("terminalFails", [mock(&fails)]),
        ],
    )
    .unwrap();

    let result = parse(&definition, &Document::new([" "])).unwrap();

    assert!(result.finished_successfully);
    assert!(result.accepted);
    assert_eq!(succeeds.calls(), 1);
    assert_eq!(fails.calls(), 1);
}

#[test]
fn test_one_of_allow_none_can_be_skipped() {
    let successful = MockTerminal::new(2, true);
    let failing = MockTerminal::new(2, false);
    let definition = LanguageDefinition::new(
        ["S"],
        [
            Rule::new(
                "S",
                [Symbol::one_of(true, ["terminalRule"]), mock(&successful)],
            ),
            Rule::new("terminalRule", [mock(&failing)]),
        ],
    )
    .unwrap();

    let result = parse(&definition, &Document::new(["12"])).unwrap();

    assert!(result.finished_successfully);
    assert!(result.accepted);
    assert_eq!(failing.windows(), ["12"]);
    assert_eq!(successful.windows(), ["12"]);
}

#[test]
fn test_one_of_without_allow_none_cannot_be_skipped() {
    let successful = MockTerminal::new(2, true);
    let failing = MockTerminal::new(2, false);
    let definition = LanguageDefinition::new(
        ["S"],
        [
            Rule::new(
                "S",
                [Symbol::one_of(false, ["terminalRule"]), mock(&successful)],
            ),
            Rule::new("terminalRule", [mock(&failing)]),
        ],
    )
    .unwrap();

    let result = parse(&definition, &Document::new(["12"])).unwrap();

    assert!(!result.finished_successfully);
    assert_eq!(successful.calls(), 0);
}

#[test]
fn test_matches_running_past_the_end_all_land_on_it() {
    let three = MockTerminal::new(3, true);
    let one = MockTerminal::new(1, true);
    let five = MockTerminal::new(5, true);
    let definition = LanguageDefinition::new(
        ["S"],
        [
            Rule::new("S", [Symbol::one_of(false, ["A", "B"])]),
            Rule::new("A", [mock(&three), mock(&one)]),
            Rule::new("B", [mock(&five)]),
        ],
    )
    .unwrap();
    let document = Document::new(["ab"]);

    let result = parse(&definition, &document).unwrap();

    assert!(result.finished_successfully);
    assert!(result.accepted);
    assert_eq!(result.completed.len(), 1);
    assert_eq!(result.position, document.end());
    assert_eq!(five.windows(), ["ab"]);
    // Nothing is left to read for the second terminal of A.
    assert_eq!(one.calls(), 0);
}

#[test]
fn test_windows_cross_token_boundaries() {
    let definition =
        LanguageDefinition::new(["S"], [Rule::new("S", [literal("abc"), literal("d")])]).unwrap();
    let document = Document::new(["ab", "cd"]);

    let result = parse(&definition, &document).unwrap();

    assert!(result.accepted);
    assert_eq!(result.position, document.end());
}

#[test]
fn test_zero_width_terminal_matches_at_end() {
    let epsilon = MockTerminal::new(0, true);
    let definition =
        LanguageDefinition::new(["S"], [Rule::new("S", [literal("a"), mock(&epsilon)])]).unwrap();

    let result = parse(&definition, &Document::new(["a"])).unwrap();

    assert!(result.accepted);
    assert_eq!(epsilon.windows(), [""]);
}
