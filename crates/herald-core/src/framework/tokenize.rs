//! Message tokenization.
//!
//! Command matching works on whitespace-delimited tokens: index 0 is the
//! candidate command name (including its leading marker character), the
//! rest are arguments. There is no quoting or escaping; arguments pass
//! through verbatim.

/// Splits `content` into maximal non-whitespace substrings, left to right.
///
/// Pure function: the same input always yields the same sequence. Empty or
/// whitespace-only input yields an empty sequence; non-empty content never
/// does.
pub fn tokenize(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_owned).collect()
}
