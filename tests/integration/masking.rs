use recompose::{compile, Flags, Masker, Mode, Rule, RuleError, Spans};

#[test]
fn mask_with_custom_placeholder() {
    let rule = Rule::new("test_{3}value")
        .unwrap()
        .mask_with(r"\d+", '_')
        .unwrap();

    assert_eq!(rule.findall("test123value"), vec!["test123value"]);
}

#[test]
fn matches_report_original_text() {
    let rule = Rule::new("testx{3}value")
        .unwrap()
        .mask_with(r"\s+", 'x')
        .unwrap();

    let m = rule.search("test   value").unwrap();
    assert_eq!(m.as_str(), "test   value");
    assert_eq!(m.span(0), Ok(Some((0, 12))));
}

#[test]
fn masked_rule_composes() {
    let masked = compile(["abc", "def"], Mode::Any, Flags::empty())
        .unwrap()
        .mask_with(r"\d+", 'x')
        .unwrap();
    let combined = masked | Rule::new("xyz").unwrap();

    assert_eq!(combined.findall("abc1 xyz2 def3"), vec!["abc", "xyz", "def"]);
}

#[test]
fn masked_spans_hide_content() {
    let quoted = Rule::new(r#""[^"]*""#).unwrap();
    let rule = Rule::new(r"\bsecret\b").unwrap().mask(quoted).unwrap();

    assert_eq!(rule.count(r#"secret "not a secret" secret"#), 2);
}

#[test]
fn default_placeholder_is_a_dot() {
    let rule = Rule::new(r"a\.\.b").unwrap().mask(r"\d").unwrap();
    assert_eq!(rule.findall("a12b a1b"), vec!["a12b"]);
}

#[test]
fn masks_accumulate() {
    let rule = Rule::new("a__b")
        .unwrap()
        .mask_with(r"\d", '_')
        .unwrap()
        .mask(r"\s")
        .unwrap();

    assert_eq!(rule.findall("a1 b a 2b"), vec!["a1 b", "a 2b"]);
}

#[test]
fn masker_keeps_length_for_multibyte_text() {
    let masker = Masker::new(Rule::new("é+").unwrap());
    let text = "caféé au lait";
    let masked = masker.mask(text, 0, text.len());

    assert_eq!(masked.len(), text.len());
    assert_eq!(masked, "caf.... au lait");
}

#[test]
fn non_ascii_placeholder_is_rejected() {
    let err = Rule::new("a").unwrap().mask_with("b", '…').unwrap_err();
    assert!(matches!(err, RuleError::InvalidPlaceholder('…')));
}

#[test]
fn masked_multibyte_spans_cover_whole_characters() {
    let rule = Rule::new("a.").unwrap().mask("中").unwrap();
    let text = "a中b";

    let m = rule.search(text).unwrap();
    assert_eq!(m.range(), (0, 4));
    assert_eq!(m.span(0), Ok(Some((0, 4))));
    assert_eq!(m.as_str(), "a中");
    assert_eq!(rule.replace_all(text, "X"), "Xb");
    assert_eq!(rule.split(text), vec!["", "b"]);
}

#[test]
fn deny_inside_a_masked_span_is_ignored() {
    let rule = Rule::new("total")
        .unwrap()
        .exclude("VOID")
        .unwrap()
        .mask(r#""[^"]*""#)
        .unwrap();

    assert_eq!(rule.findall(r#"total "VOID""#), vec!["total"]);
}

#[test]
fn deny_outside_masked_spans_still_suppresses() {
    let rule = Rule::new("total")
        .unwrap()
        .exclude("VOID")
        .unwrap()
        .mask(r#""[^"]*""#)
        .unwrap();

    assert!(rule.findall(r#"total "paid" VOID"#).is_empty());
}

#[test]
fn masking_can_reveal_what_deny_looks_for() {
    // Digits masked with 'X' spell out the deny word.
    let rule = Rule::new("id")
        .unwrap()
        .exclude("XX")
        .unwrap()
        .mask_with(r"\d", 'X')
        .unwrap();

    assert_eq!(rule.findall("id 7"), vec!["id"]);
    assert!(rule.findall("id 77").is_empty());
}
