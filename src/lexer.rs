//! Splitting an input line into words.
//!
//! The shell has no quoting, escaping or expansion: a word is a maximal run of
//! characters other than the ASCII space. Tabs are ordinary characters.

/// Split `line` on the space character, dropping the empty fragments that
/// leading, trailing or repeated spaces would otherwise produce.
///
/// ```
/// assert_eq!(mish::tokenize("ls -la /tmp"), ["ls", "-la", "/tmp"]);
/// assert!(mish::tokenize("   ").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(' ').filter(|token| !token.is_empty()).collect()
}
