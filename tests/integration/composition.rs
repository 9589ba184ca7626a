use recompose::{compile, compile_split, Flags, Mode, Rule};

fn any(patterns: &[&str]) -> Rule {
    compile(patterns.iter().copied(), Mode::Any, Flags::empty()).unwrap()
}

fn all(patterns: &[&str]) -> Rule {
    compile(patterns.iter().copied(), Mode::All, Flags::empty()).unwrap()
}

#[test]
fn union_of_unions() {
    let combined = any(&["hello", "world"]) | any(&["foo", "bar"]);
    let matches = combined.findall("hello world foo bar");

    assert_eq!(matches, vec!["hello", "world", "foo", "bar"]);
}

#[test]
fn union_leaves_operands_untouched() {
    let hello = any(&["hello"]);
    let world = any(&["world"]);
    let combined = &hello | &world;

    assert_eq!(combined.as_composite().map(|c| c.mode()), Some(Mode::Any));
    assert_eq!(hello.findall("hello world"), vec!["hello"]);
    assert_eq!(world.findall("hello world"), vec!["world"]);
}

#[test]
fn chained_unions() {
    let combined = any(&["hello"]) | any(&["world"]) | any(&["foo"]);
    assert_eq!(combined.count("hello world foo"), 3);
}

#[test]
fn conjunction_of_conjunctions_matches_once() {
    let combined = all(&["hello", "world"]) & all(&["foo", "bar"]);

    let matches: Vec<_> = combined.find_iter("hello world foo bar").collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].range(), (0, 19));
    assert_eq!(matches[0].hits().len(), 4);
}

#[test]
fn conjunction_needs_every_member() {
    let combined = all(&["hello", "world"]) & all(&["foo", "bar"]);
    assert!(combined.search("hello world foo").is_none());
}

#[test]
fn union_inside_conjunction() {
    let either = any(&["hello", "world"]);
    let rule = compile([either, Rule::new("test").unwrap()], Mode::All, Flags::empty()).unwrap();

    assert_eq!(rule.count("hello test"), 1);
    assert_eq!(rule.count("world test"), 1);
    assert_eq!(rule.count("hello world"), 0);
}

#[test]
fn conjunction_members_may_overlap() {
    let rule = all(&[r"[a-z]\d", r"\d!", "!"]);
    let m = rule.search("a1!").unwrap();

    assert_eq!(m.range(), (0, 3));
    assert_eq!(m.hits().len(), 3);
}

#[test]
fn conjunction_reports_members_in_text_order() {
    let rule = all(&[r"(?P<num>\d+)", r"(?P<word>[a-z]+)"]);
    let m = rule.search("abc 123").unwrap();

    assert_eq!(m.group("word"), Ok(Some("abc")));
    assert_eq!(m.group("num"), Ok(Some("123")));
    assert_eq!(m.group(1), Ok(Some("abc")));
    assert_eq!(m.group(2), Ok(Some("123")));
}

#[test]
fn sequence_respects_order() {
    let rule = Rule::new("open").unwrap() + Rule::new("close").unwrap();

    assert_eq!(rule.findall("open ... close"), vec!["open ... close"]);
    assert!(rule.findall("close ... open").is_empty());
}

#[test]
fn sequence_repeats() {
    let rule = compile(["<", ">"], Mode::Seq, Flags::empty()).unwrap();
    assert_eq!(rule.findall("<a> <b> <"), vec!["<a>", "<b>"]);
}

#[test]
fn split_matches_inside_segments() {
    let rule = compile_split(r"\d+", ",", Flags::empty()).unwrap();

    let spans: Vec<_> = rule.find_iter("123,456,789").map(|m| m.range()).collect();
    assert_eq!(spans, vec![(0, 3), (4, 7), (8, 11)]);
}

#[test]
fn split_never_crosses_a_delimiter() {
    let rule = Rule::new(r"a.*b").unwrap() / Rule::new(";").unwrap();

    assert!(rule.findall("a;b").is_empty());
    assert_eq!(rule.findall("ab;axb"), vec!["ab", "axb"]);
}

#[test]
fn exclusion_suppresses_everything() {
    let rule = any(&[r"\d+"]) ^ Rule::new("VOID").unwrap();

    assert_eq!(rule.findall("12 and 34"), vec!["12", "34"]);
    assert!(rule.findall("12 and 34 VOID").is_empty());
}

#[test]
fn case_insensitive_compile() {
    let rule = compile(["hello"], Mode::Any, Flags::IGNORE_CASE).unwrap();
    assert!(rule.search("HELLO").is_some());
}

#[test]
fn region_offsets_are_absolute() {
    let rule = any(&[r"\d+"]);
    let spans: Vec<_> = rule.find_iter_at("12 34 56", 3, 8).map(|m| m.range()).collect();

    assert_eq!(spans, vec![(3, 5), (6, 8)]);
}

#[test]
fn empty_region_yields_nothing() {
    let rule = any(&["a"]);
    assert!(rule.find_iter_at("aaa", 2, 1).next().is_none());
}

#[test]
fn union_with_empty_matches_stays_disjoint() {
    let rule = any(&["abc", "b*"]);
    let spans: Vec<_> = rule.find_iter("abc").map(|m| m.range()).collect();

    assert_eq!(spans, vec![(0, 3), (3, 3)]);
}
