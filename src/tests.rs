use crate::UrlMatcher;
use std::io::Write;

#[test]
fn prefix_tier_hit() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern(r"http://foo\.com/.*", "A").unwrap();

    assert_eq!(matcher.find("http://foo.com/bar"), Some("A"));
    assert!(!matcher.is_match("http://bar.com/"));
}

#[test]
fn shortcut_tier_hit() {
    let mut matcher = UrlMatcher::new(8);
    matcher
        .add_pattern_with_shortcut(r"https?://.*\.example\.com/ads.*", "B", "ads.com/")
        .unwrap();

    assert_eq!(matcher.find("http://cdn.example.com/ads.com/b.js"), Some("B"));
    assert!(!matcher.is_match("http://cdn.example.com/images/logo.png"));
}

#[test]
fn sequential_fallback() {
    let mut matcher = UrlMatcher::new(8);
    // leading "." leaves no literal prefix, so the rule is unindexed
    matcher.add_pattern(r".*\.gif$", "C").unwrap();

    assert_eq!(matcher.find("http://x/y.gif"), Some("C"));
    assert!(!matcher.is_match("http://x/y.png"));
}

#[test]
fn longest_prefix_bucket_wins() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern("foo.*", "X").unwrap();
    matcher.add_pattern("foobar.*", "Y").unwrap();

    // tier 2 picks the longest prefix bucket, not insertion order across keys
    assert_eq!(matcher.find("foobarbaz"), Some("Y"));
    assert_eq!(matcher.find("foox"), Some("X"));
}

#[test]
fn escaped_metacharacters_match_literally() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern(r"a\.b\.c.*", "E").unwrap();

    assert_eq!(matcher.find("a.b.c/x"), Some("E"));
    // the prefix filter must not treat the escaped dots as wildcards
    assert!(!matcher.is_match("axbxc/x"));
}

#[test]
fn shortcut_rules_are_not_prefix_indexed() {
    let mut matcher = UrlMatcher::new(8);
    // the pattern has a perfectly good literal prefix, but a shortcut was
    // supplied, so the rule lives in the shortcut tier alone
    matcher
        .add_pattern_with_shortcut(r"http://x\.com/.*", "P", "ZZZZZZZZ")
        .unwrap();

    assert!(!matcher.is_match("http://x.com/a"));
    assert_eq!(matcher.find("http://x.com/ZZZZZZZZ"), Some("P"));
}

#[test]
fn first_match_wins_within_a_bucket() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern(r".*\.gif", "first").unwrap();
    matcher.add_pattern(r".*x\.gif", "second").unwrap();

    assert_eq!(matcher.find("x.gif"), Some("first"));
}

#[test]
fn empty_payload_is_a_valid_payload() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern("foo.*", "").unwrap();

    assert_eq!(matcher.find("foobar"), Some(""));
    assert_eq!(matcher.find("bar"), None);
}

#[test]
fn tiers_are_tried_in_order() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern(r".*/banner/.*", "seq").unwrap();
    matcher.add_pattern(r"http://ads\..*", "prefix").unwrap();
    matcher
        .add_pattern_with_shortcut(r"http://ads\..*", "shortcut", "http://a")
        .unwrap();

    // all three tiers hold a matching rule; the shortcut tier is consulted
    // first, then the prefix trie, then the sequential list
    assert_eq!(matcher.find("http://ads.net/banner/1"), Some("shortcut"));

    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern(r".*/banner/.*", "seq").unwrap();
    matcher.add_pattern(r"http://ads\..*", "prefix").unwrap();
    assert_eq!(matcher.find("http://ads.net/banner/1"), Some("prefix"));
}

#[test]
fn urls_with_high_bytes_are_matched_bytewise() {
    let mut matcher = UrlMatcher::new(8);
    matcher.add_pattern("http://bücher\\.de/.*", "U").unwrap();

    assert_eq!(matcher.find("http://bücher.de/x"), Some("U"));
    assert!(!matcher.is_match("http://bucher.de/x"));
}

#[test]
fn load_pattern_file_round_trips_with_programmatic_adds() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "# ad rules\n\
         http://foo\\.com/.*[^o^]A\n\
         \n\
         https?://.*\\.example\\.com/ads.*[^o^]B[^o^]ads.com/\n\
         .*\\.gif$[^o^]C\n\
         payload-less.*\n"
    )
    .unwrap();

    let mut loaded = UrlMatcher::new(8);
    loaded.load_pattern_file(file.path()).unwrap();

    let mut built = UrlMatcher::new(8);
    built.add_pattern(r"http://foo\.com/.*", "A").unwrap();
    built
        .add_pattern_with_shortcut(r"https?://.*\.example\.com/ads.*", "B", "ads.com/")
        .unwrap();
    built.add_pattern(r".*\.gif$", "C").unwrap();
    built.add_pattern("payload-less.*", "").unwrap();

    for url in [
        "http://foo.com/bar",
        "http://cdn.example.com/ads.com/b.js",
        "http://x/y.gif",
        "payload-less-url",
        "http://no.match/",
        "",
    ] {
        assert_eq!(loaded.find(url), built.find(url), "url {:?}", url);
    }
}

#[test]
fn load_pattern_file_drops_bad_rules_and_keeps_the_rest() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "(unclosed[^o^]bad\n\
         ok1.*[^o^]one\n\
         rule.*[^o^]bad[^o^]wrong-length\n\
         ok2.*[^o^]two[^o^]ok2-shor\n"
    )
    .unwrap();

    let mut matcher = UrlMatcher::new(8);
    matcher.load_pattern_file(file.path()).unwrap();

    assert_eq!(matcher.find("ok1-url"), Some("one"));
    assert_eq!(matcher.find("ok2-short"), Some("two"));
    assert!(!matcher.is_match("(unclosed"));
    assert!(!matcher.is_match("rule-url"));
}

#[test]
fn load_pattern_file_propagates_io_errors() {
    let mut matcher = UrlMatcher::new(8);
    assert!(matches!(
        matcher.load_pattern_file("/no/such/rule/file"),
        Err(crate::Error::Io(_))
    ));
}

#[test]
fn match_is_deterministic_for_a_fixed_insertion_order() {
    let build = || {
        let mut matcher = UrlMatcher::new(8);
        matcher.add_pattern(r"http://a\.com/.*", "1").unwrap();
        matcher.add_pattern(r"http://a\.com/x.*", "2").unwrap();
        matcher.add_pattern(r".*\.js", "3").unwrap();
        matcher
    };

    let first = build();
    let second = build();
    for url in ["http://a.com/x.js", "http://a.com/y", "lib.js", "none"] {
        assert_eq!(first.find(url), second.find(url));
    }
}
