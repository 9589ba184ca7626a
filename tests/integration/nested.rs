use recompose::{compile, Flags, Mode, Rule};

fn leaf(pattern: &str) -> Rule {
    Rule::new(pattern).unwrap()
}

#[test]
fn union_in_conjunction_in_union() {
    let inner = compile([leaf("hello") | leaf("world"), leaf("test")], Mode::All, Flags::empty())
        .unwrap();
    let rule = inner | leaf("final");

    assert!(rule.search("hello test").is_some());
    assert!(rule.search("only final").is_some());
    assert!(rule.search("hello there").is_none());
}

#[test]
fn sequence_of_unions() {
    let verb = leaf("get") | leaf("put");
    let noun = leaf("file") | leaf("dir");
    let rule = verb + noun;

    assert_eq!(rule.findall("get file, put dir"), vec!["get file", "put dir"]);
}

#[test]
fn deny_inside_union_only_affects_its_branch() {
    let guarded = leaf(r"\d+") ^ leaf("draft");
    let rule = guarded | leaf("title");

    assert_eq!(rule.findall("title 42"), vec!["title", "42"]);
    assert_eq!(rule.findall("draft title 42"), vec!["title"]);
}

#[test]
fn mask_applies_to_nested_children() {
    let pair = leaf(r"\(") + leaf(r"\)");
    let rule = pair.mask(r#""[^"]*""#).unwrap();

    assert_eq!(rule.findall(r#"(")") (x)"#), vec![r#"(")")"#, "(x)"]);
    assert_eq!(rule.count(r#"(a) ")" (b)"#), 2);
}

#[test]
fn named_groups_across_nested_hits() {
    let key = leaf(r"(?P<key>\w+)=");
    let value = leaf(r#""(?P<value>[^"]*)""#);
    let rule = (key + value) / leaf(";");

    let found: Vec<_> = rule
        .find_iter(r#"a="1"; b="two""#)
        .map(|m| {
            (
                m.group("key").unwrap().unwrap_or_default(),
                m.group("value").unwrap().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(found, vec![("a", "1"), ("b", "two")]);
}

#[test]
fn rules_are_reusable_across_texts() {
    let rule = leaf("x") & leaf("y");

    assert_eq!(rule.count("x y"), 1);
    assert_eq!(rule.count("y"), 0);
    assert_eq!(rule.count("yx"), 1);
}
