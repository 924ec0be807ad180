//! Tokenizer for the `key@value,key@value` parameter segment of a description line.
//!
//! Keys are stored lowercased so lookups are case-insensitive (`X`, `x` and
//! `FontSize`/`fontsize` are interchangeable). None of the typed accessors fail:
//! a missing key or an unparsable value falls back to the supplied default,
//! which is what hand-edited vendor files rely on.

use std::collections::HashMap;

use tracing::trace;

/// Parsed parameters of a single description line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Tokenize the text after the first `:` of a description line.
    ///
    /// Segments are split on `,` (values cannot contain commas). Each segment
    /// must contain `@`; the key is the run of word characters directly before
    /// the first `@` and the value is everything after it, trimmed. Segments
    /// without a usable key or value are skipped. Later duplicates win.
    pub fn parse(segment: &str) -> Self {
        let mut values = HashMap::new();

        for part in segment.split(',') {
            let Some((raw_key, raw_value)) = part.split_once('@') else {
                trace!(part, "Skipping parameter without '@'");
                continue;
            };

            let key = trailing_word(raw_key);
            if key.is_empty() || raw_value.is_empty() {
                trace!(part, "Skipping parameter with empty key or value");
                continue;
            }

            values.insert(key.to_ascii_lowercase(), raw_value.trim().to_string());
        }

        Self { values }
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Real-valued parameter, `default` when absent or malformed.
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    /// Integer parameter, `default` when absent or malformed.
    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.get_opt_i32(key).unwrap_or(default)
    }

    /// Integer parameter, `None` when absent or malformed.
    pub fn get_opt_i32(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(|v| v.parse::<i32>().ok())
    }

    /// String parameter, `default` when absent.
    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// True iff the value equals `"true"` ignoring case.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// The trailing run of `[A-Za-z0-9_]` characters in `s`.
fn trailing_word(s: &str) -> &str {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .last()
        .map_or(s.len(), |(i, _)| i);
    &s[start..]
}
