//! The three tier match pipeline.
//!
//! Rules are bucketed at build time by the cheapest filter that can reject
//! them: a Boyer-Moore style shortcut scan, a literal-prefix trie walk, or
//! the residual sequential sweep. Each bucket filter is a sound superset of
//! its rules' regex semantics, so a URL rejected by a filter cannot match
//! any rule behind it.

use crate::error::Error;
use crate::parser;
use crate::prefix::literal_prefix;
use crate::rule::Rule;
use crate::trie::ByteTrie;
use fnv::FnvHashMap;
use log::{debug, error, trace};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Shortcut length used by [`UrlMatcher::default`].
pub const DEFAULT_SHORTCUT_SIZE: usize = 8;

/// Minimum shift toward the nearest aligned shortcut tail whose shortcut
/// contains the probed half window.
#[derive(Debug, Clone, Copy)]
struct Jump {
    distance: usize,
}

/// A URL matcher over a corpus of full-match regex rules.
///
/// Rules are added during a build phase (`&mut self`); afterwards any
/// number of threads may query concurrently (`&self`). Queries return the
/// payload of the first rule whose regex matches the whole URL.
#[derive(Debug)]
pub struct UrlMatcher {
    shortcut_size: usize,
    /// Half-window fragments of every shortcut, with their shift distances.
    jump_index: ByteTrie<Jump>,
    /// Tier 1: rules whose shortcut is asserted to occur in any matching URL.
    shortcut_buckets: FnvHashMap<Vec<u8>, Vec<Rule>>,
    /// Tier 2: rules grouped under the literal prefix of their pattern.
    prefix_trie: ByteTrie<Vec<Rule>>,
    /// Tier 3: rules with no shortcut and no usable literal prefix.
    sequential: Vec<Rule>,
}

impl UrlMatcher {
    /// Creates a matcher whose shortcut strings are `shortcut_size` bytes
    /// long.
    ///
    /// # Panics
    ///
    /// Panics unless `shortcut_size` is even and at least 2; the jump index
    /// is built from half-length windows and an odd size would leave it
    /// unsound.
    pub fn new(shortcut_size: usize) -> Self {
        assert!(
            shortcut_size >= 2 && shortcut_size % 2 == 0,
            "shortcut_size must be even and at least 2, got {}",
            shortcut_size
        );

        UrlMatcher {
            shortcut_size,
            jump_index: ByteTrie::new(),
            shortcut_buckets: FnvHashMap::default(),
            prefix_trie: ByteTrie::new(),
            sequential: Vec::new(),
        }
    }

    /// Loads a line-oriented rule file.
    ///
    /// Blank lines and lines starting with `#` are skipped; remaining lines
    /// are split on the `[^o^]` delimiter into regex, payload and optional
    /// shortcut fields. Rules that fail to ingest are logged and dropped;
    /// only I/O errors abort the load.
    pub fn load_pattern_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let reader = BufReader::new(File::open(path.as_ref())?);

        for line in reader.lines() {
            let line = line?;
            let Some(rule) = parser::parse_line(&line) else {
                continue;
            };
            trace!("pattern: {}", rule.regex);

            let added = match rule.shortcut {
                Some(shortcut) => self.add_pattern_with_shortcut(rule.regex, rule.payload, shortcut),
                None => self.add_pattern(rule.regex, rule.payload),
            };
            if let Err(e) = added {
                // already reported at the insertion site, keep loading
                debug!("dropped rule {:?}: {}", rule.regex, e);
            }
        }

        Ok(())
    }

    /// Adds a rule without a shortcut.
    ///
    /// The rule lands in the prefix tier when its pattern starts with a
    /// literal, otherwise in the sequential tier.
    pub fn add_pattern(&mut self, regex: &str, payload: &str) -> Result<(), Error> {
        let rule = match Rule::new(regex, payload) {
            Ok(rule) => rule,
            Err(e) => {
                error!("rejecting pattern {:?}: {}", regex, e);
                return Err(e);
            }
        };

        let prefix = literal_prefix(regex);
        if prefix.is_empty() {
            self.sequential.push(rule);
        } else if let Some(bucket) = self.prefix_trie.exact_match_mut(&prefix, 0, prefix.len()) {
            bucket.push(rule);
        } else {
            assert!(self
                .prefix_trie
                .insert(&prefix, 0, prefix.len(), vec![rule], false));
        }

        Ok(())
    }

    /// Adds a rule reached through `shortcut`, a literal the rule author
    /// asserts occurs somewhere in every URL the regex matches.
    ///
    /// The rule goes only into the shortcut tier, even when its pattern also
    /// has a literal prefix. `shortcut` must be exactly the configured
    /// shortcut length.
    pub fn add_pattern_with_shortcut(
        &mut self,
        regex: &str,
        payload: &str,
        shortcut: &str,
    ) -> Result<(), Error> {
        if shortcut.len() != self.shortcut_size {
            error!("shortcut has illegal length: {}", shortcut);
            return Err(Error::InvalidShortcutLength {
                shortcut: shortcut.to_string(),
                expected: self.shortcut_size,
                actual: shortcut.len(),
            });
        }

        let rule = match Rule::new(regex, payload) {
            Ok(rule) => rule,
            Err(e) => {
                error!("rejecting pattern {:?}: {}", regex, e);
                return Err(e);
            }
        };

        // index every half window of the shortcut with its distance to the
        // shortcut tail, keeping the minimum across the whole corpus
        let key = shortcut.as_bytes();
        let half = self.shortcut_size / 2;
        for pos in 0..=half {
            let distance = half - pos;
            if let Some(jump) = self.jump_index.exact_match_mut(key, pos, half) {
                if distance < jump.distance {
                    jump.distance = distance;
                }
            } else {
                assert!(self.jump_index.insert(key, pos, half, Jump { distance }, false));
            }
        }

        self.shortcut_buckets
            .entry(key.to_vec())
            .or_default()
            .push(rule);

        Ok(())
    }

    /// Returns the payload of the first rule fully matching `url`, trying
    /// the shortcut scan, then the prefix trie, then the sequential list.
    pub fn find(&self, url: &str) -> Option<&str> {
        self.find_shortcut(url)
            .or_else(|| self.find_prefixed(url))
            .or_else(|| self.find_sequential(url))
    }

    /// Whether any rule fully matches `url`.
    pub fn is_match(&self, url: &str) -> bool {
        self.find(url).is_some()
    }

    /// Tier 1: scan the URL for an aligned shortcut.
    ///
    /// `tail` is the end of the current candidate window. A probe of the
    /// trailing half window either misses (no shortcut can end within the
    /// next `half` bytes), hits at distance `d > 0` (none can end earlier
    /// than `d` bytes ahead), or hits at distance 0 (the window is aligned
    /// with some shortcut tail and the full window must be verified).
    fn find_shortcut(&self, url: &str) -> Option<&str> {
        let bytes = url.as_bytes();
        if bytes.len() < self.shortcut_size {
            return None;
        }

        let half = self.shortcut_size / 2;
        let end = bytes.len() - 1;
        let mut tail = self.shortcut_size - 1;

        while tail <= end {
            let probe = tail + 1 - half;
            match self.jump_index.exact_match(bytes, probe, half) {
                None => tail += half + 1,
                Some(jump) if jump.distance > 0 => tail += jump.distance,
                Some(_) => {
                    let shortcut = &bytes[tail + 1 - self.shortcut_size..=tail];
                    if let Some(bucket) = self.shortcut_buckets.get(shortcut) {
                        if let Some(payload) = first_full_match(bucket, url) {
                            return Some(payload);
                        }
                    }
                    tail += 1;
                }
            }
        }

        None
    }

    /// Tier 2: longest literal prefix of the URL with a bucket.
    fn find_prefixed(&self, url: &str) -> Option<&str> {
        let bucket = self.prefix_trie.prefix_match(url.as_bytes(), 0, url.len())?;
        first_full_match(bucket, url)
    }

    /// Tier 3: everything the filters could not index.
    fn find_sequential(&self, url: &str) -> Option<&str> {
        first_full_match(&self.sequential, url)
    }
}

impl Default for UrlMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTCUT_SIZE)
    }
}

/// First rule in `bucket` whose regex spans the whole URL, in insertion
/// order.
fn first_full_match<'a>(bucket: &'a [Rule], url: &str) -> Option<&'a str> {
    bucket
        .iter()
        .find(|rule| rule.full_match(url))
        .map(Rule::payload)
}
