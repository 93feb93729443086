#![deny(warnings, missing_debug_implementations)]
/*!
This crate provides a high throughput URL pattern matching engine that can
match a single URL against very large sets of regex rules efficiently.

Most URLs match nothing, so the hot path is built around rejecting
candidates cheaply: rules are filtered through three tiers before any regex
is executed. Rules carrying a fixed-length literal "shortcut" substring are
reached through a Boyer-Moore style scan over a byte trie of shortcut
fragments, rules whose pattern starts with a literal are reached through a
longest-prefix trie walk, and only the residue is checked sequentially. The
first rule whose regex fully matches the URL yields its payload.

```
use url_matcher::UrlMatcher;

let mut matcher = UrlMatcher::default();
matcher.add_pattern(r"http://foo\.com/.*", "foo").unwrap();

assert_eq!(matcher.find("http://foo.com/bar"), Some("foo"));
assert!(!matcher.is_match("http://bar.com/"));
```

# Crate features

* **serde** -
  Enable serde integration which allows rule records to be
  serializable/deserializable.
*/

pub mod error;
pub mod matcher;
pub mod prefix;
pub mod rule;
pub mod trie;

mod parser;

pub use error::Error;
pub use matcher::{UrlMatcher, DEFAULT_SHORTCUT_SIZE};
pub use rule::Rule;

#[cfg(test)]
mod tests;
