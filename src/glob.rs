//! EditorConfig section globs
//!
//! Supported wildcards:
//! - `*` any run of characters except `/`
//! - `**` any run of characters
//! - `?` a single character except `/`
//! - `[name]` / `[!name]` a single character in / not in `name`
//! - `{s1,s2,s3}` any of the comma separated alternatives
//! - `{num1..num2}` an integer between `num1` and `num2` inclusive
//!
//! A glob is compiled once into an anchored regular expression. Numeric
//! ranges are captured by named groups and checked after the textual match.

use std::fmt;
use std::path::MAIN_SEPARATOR;

use regex::{Captures, Regex};

use crate::error::GlobError;

/// Longest pattern accepted, in characters.
pub const MAX_GLOB_LENGTH: usize = 4096;

/// Inclusive integer bound attached to one named capture group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NumericRange {
    group: String,
    min: i64,
    max: i64,
}

impl NumericRange {
    fn accepts(&self, captures: &Captures<'_>) -> bool {
        let Some(text) = captures.name(&self.group).map(|m| m.as_str()) else {
            return false;
        };

        // Only canonical decimals: `0` is fine, `01` and `-007` are not
        let digits = text.trim_start_matches(|c: char| c == '+' || c == '-');
        if digits.len() > 1 && digits.starts_with('0') {
            return false;
        }

        text.parse::<i64>()
            .map(|n| (self.min..=self.max).contains(&n))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
struct CompiledGlob {
    regex: Regex,
    ranges: Vec<NumericRange>,
}

/// One section pattern, anchored at the directory of its configuration file.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    source: String,
    compiled: Result<CompiledGlob, GlobError>,
}

impl GlobMatcher {
    /// Compile `pattern` as declared in a configuration file living in `config_dir`.
    ///
    /// `config_dir` must be slash separated. Compilation never fails outright:
    /// a bad pattern produces a matcher that matches nothing and reports the
    /// reason through [`GlobMatcher::error`].
    pub fn compile(config_dir: &str, pattern: &str) -> Self {
        let source = pattern.to_string();

        let len = pattern.chars().count();
        if len > MAX_GLOB_LENGTH {
            return Self {
                source,
                compiled: Err(GlobError::TooLong {
                    len,
                    max: MAX_GLOB_LENGTH,
                }),
            };
        }

        let pattern = unescape_pattern(pattern);
        let mut translator = Translator::default();

        // Without a slash the pattern applies at any depth below the directory
        let relative = if pattern.contains('/') {
            format!("/{}", pattern.strip_prefix('/').unwrap_or(&pattern))
        } else {
            format!("/**/{pattern}")
        };
        let dir = config_dir.trim_end_matches('/');
        let body = format!("{}{}", regex::escape(dir), translator.translate(&relative));

        let compiled = Regex::new(&format!("(?s)^{body}$"))
            .map(|regex| CompiledGlob {
                regex,
                ranges: translator.ranges,
            })
            .map_err(|source| {
                tracing::warn!("invalid glob pattern '{}': {}", pattern, source);
                GlobError::Syntax {
                    pattern: pattern.clone(),
                    source,
                }
            });

        Self { source, compiled }
    }

    /// Does the whole of `path` (slash separated) match this glob?
    pub fn matches(&self, path: &str) -> bool {
        let Ok(compiled) = &self.compiled else {
            return false;
        };
        let Some(captures) = compiled.regex.captures(path) else {
            return false;
        };
        compiled
            .ranges
            .iter()
            .all(|range| range.accepts(&captures))
    }

    /// The pattern exactly as written in the configuration file.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }

    pub fn error(&self) -> Option<&GlobError> {
        self.compiled.as_ref().err()
    }
}

impl fmt::Display for GlobMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Normalize separators and drop the escapes that only exist because `#` and
/// `;` start comments in the file format.
fn unescape_pattern(pattern: &str) -> String {
    let pattern = if MAIN_SEPARATOR == '/' {
        pattern.to_string()
    } else {
        pattern.replace(MAIN_SEPARATOR, "/")
    };
    pattern.replace("\\#", "#").replace("\\;", ";")
}

/// Every `}` must close an earlier `{` before braces are read as alternation.
fn braces_balanced(chars: &[char]) -> bool {
    let mut depth: i64 = 0;
    let mut escaped = false;
    for &c in chars {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn parse_numeric_range(text: &str) -> Option<(i64, i64)> {
    let (start, end) = text.split_once("..")?;
    let is_number = |s: &str| {
        let digits = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    };
    if !is_number(start) || !is_number(end) {
        return None;
    }
    let start: i64 = start.parse().ok()?;
    let end: i64 = end.parse().ok()?;
    Some((start.min(end), start.max(end)))
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Glob to regex translation. Every numeric range gets its own named group
/// and the range list records the name, so the pairing never relies on
/// group positions.
#[derive(Debug, Default)]
struct Translator {
    ranges: Vec<NumericRange>,
}

impl Translator {
    fn translate(&mut self, pattern: &str) -> String {
        let chars: Vec<char> = pattern.chars().collect();
        let balanced = braces_balanced(&chars);
        let mut out = String::with_capacity(pattern.len() * 2);
        let mut brace_depth = 0usize;
        let mut in_class = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            i += 1;

            if in_class {
                match c {
                    ']' => {
                        out.push(']');
                        in_class = false;
                    }
                    '-' => out.push('-'),
                    '\\' => match chars.get(i) {
                        Some(&next) => {
                            push_literal(&mut out, next);
                            i += 1;
                        }
                        None => push_literal(&mut out, '\\'),
                    },
                    _ => push_literal(&mut out, c),
                }
                continue;
            }

            match c {
                '\\' => match chars.get(i) {
                    Some(&next) => {
                        push_literal(&mut out, next);
                        i += 1;
                    }
                    None => push_literal(&mut out, '\\'),
                },
                '*' => {
                    if chars.get(i) == Some(&'*') {
                        out.push_str(".*");
                        i += 1;
                    } else {
                        out.push_str("[^/]*");
                    }
                }
                '?' => out.push_str("[^/]"),
                '[' => {
                    // A class never spans a path separator; such brackets are literal
                    let crosses_slash = chars[i..]
                        .iter()
                        .take_while(|&&c| c != ']')
                        .any(|&c| c == '/');
                    if crosses_slash {
                        out.push_str("\\[");
                    } else {
                        if matches!(chars.get(i), Some('!') | Some('^')) {
                            out.push_str("[^");
                            i += 1;
                        } else {
                            out.push('[');
                        }
                        in_class = true;
                    }
                }
                ']' => out.push_str("\\]"),
                '{' => {
                    let (end, has_comma) = scan_braces(&chars, i);
                    match end {
                        Some(end) if !has_comma => {
                            let inner: String = chars[i..end].iter().collect();
                            if let Some((min, max)) = parse_numeric_range(&inner) {
                                let group = format!("range{}", self.ranges.len());
                                out.push_str(&format!("(?P<{group}>[+-]?[0-9]+)"));
                                self.ranges.push(NumericRange { group, min, max });
                            } else {
                                let translated = self.translate(&inner);
                                out.push_str("\\{");
                                out.push_str(&translated);
                                out.push_str("\\}");
                            }
                            i = end + 1;
                        }
                        _ if balanced => {
                            out.push_str("(?:");
                            brace_depth += 1;
                        }
                        _ => out.push_str("\\{"),
                    }
                }
                ',' if brace_depth > 0 => out.push('|'),
                '}' if brace_depth > 0 => {
                    out.push(')');
                    brace_depth -= 1;
                }
                '/' => {
                    if chars[i..].starts_with(&['*', '*', '/']) {
                        out.push_str("(?:/|/.*/)");
                        i += 3;
                    } else {
                        out.push('/');
                    }
                }
                _ => push_literal(&mut out, c),
            }
        }

        out
    }
}

/// Look ahead from just after a `{` for the first unescaped `,` or `}`.
///
/// Returns the index of the closing brace when it comes before any comma,
/// and whether a comma was seen first.
fn scan_braces(chars: &[char], start: usize) -> (Option<usize>, bool) {
    let mut escaped = false;
    for (offset, &c) in chars[start..].iter().enumerate() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ',' => return (None, true),
            '}' => return (Some(start + offset), false),
            _ => {}
        }
    }
    (None, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(pattern: &str) -> GlobMatcher {
        GlobMatcher::compile("/project", pattern)
    }

    // ===========================================
    // Anchoring
    // ===========================================

    #[test]
    fn test_pattern_without_slash_matches_at_any_depth() {
        let g = glob("*.txt");
        assert!(g.matches("/project/a.txt"));
        assert!(g.matches("/project/sub/deep/a.txt"));
        assert!(!g.matches("/project/a.txtx"));
        assert!(!g.matches("/project/a.rs"));
    }

    #[test]
    fn test_pattern_without_slash_stays_below_config_dir() {
        let g = glob("*.txt");
        assert!(!g.matches("/elsewhere/a.txt"));
        assert!(!g.matches("/projectx/a.txt"));
    }

    #[test]
    fn test_pattern_without_slash_equals_double_star_prefix() {
        let patterns = [
            "*", "*.txt", "a?c", "[abc].md", "[!a]*", "{a,b}.rs", "file{1..3}", "Makefile", "",
        ];
        let paths = [
            "/project/a.txt",
            "/project/sub/deep/a.txt",
            "/project/abc",
            "/project/x/abc",
            "/project/b.md",
            "/project/z.md",
            "/project/b.rs",
            "/project/q/file2",
            "/project/file4",
            "/project/Makefile",
            "/project/src/Makefile",
            "/elsewhere/a.txt",
            "/project",
            "/project/",
        ];

        for pattern in patterns {
            let bare = glob(pattern);
            let prefixed = glob(&format!("**/{pattern}"));
            for path in paths {
                assert_eq!(
                    bare.matches(path),
                    prefixed.matches(path),
                    "`{pattern}` and `**/{pattern}` disagree on {path}"
                );
            }
        }
    }

    #[test]
    fn test_pattern_with_slash_is_anchored_to_config_dir() {
        let g = glob("src/*.rs");
        assert!(g.matches("/project/src/main.rs"));
        assert!(!g.matches("/project/other/src/main.rs"));
        assert!(!g.matches("/elsewhere/src/main.rs"));
    }

    #[test]
    fn test_leading_slash_is_not_doubled() {
        let g = glob("/src/*.rs");
        assert!(g.matches("/project/src/lib.rs"));
        assert!(!g.matches("/project//src/lib.rs"));
    }

    #[test]
    fn test_root_config_dir() {
        let g = GlobMatcher::compile("/", "a/*.c");
        assert!(g.matches("/a/x.c"));
        assert!(!g.matches("/b/a/x.c"));
    }

    #[test]
    fn test_config_dir_metacharacters_are_literal() {
        let g = GlobMatcher::compile("/weird{1..2}[x]", "a/*.c");
        assert!(g.matches("/weird{1..2}[x]/a/b.c"));
        assert!(!g.matches("/weird1x/a/b.c"));
    }

    #[test]
    fn test_double_star_directory_component() {
        let g = glob("**/z.c");
        assert!(g.matches("/project/z.c"));
        assert!(g.matches("/project/a/b/z.c"));
        assert!(!g.matches("/project/a/bz.c"));
    }

    // ===========================================
    // Wildcards
    // ===========================================

    #[test]
    fn test_star_does_not_cross_slash() {
        let g = glob("src/*.rs");
        assert!(!g.matches("/project/src/nested/main.rs"));
    }

    #[test]
    fn test_double_star_crosses_slash() {
        let g = glob("src/**.rs");
        assert!(g.matches("/project/src/nested/main.rs"));
        assert!(g.matches("/project/src/main.rs"));
    }

    #[test]
    fn test_question_mark() {
        let g = glob("a?c");
        assert!(g.matches("/project/abc"));
        assert!(!g.matches("/project/ac"));
        assert!(!g.matches("/project/abbc"));

        let g = glob("sub/a?c");
        assert!(!g.matches("/project/sub/a/c"));
    }

    #[test]
    fn test_character_class() {
        let g = glob("[abc].txt");
        assert!(g.matches("/project/a.txt"));
        assert!(g.matches("/project/c.txt"));
        assert!(!g.matches("/project/d.txt"));
        assert!(!g.matches("/project/ab.txt"));
    }

    #[test]
    fn test_negated_character_class() {
        let g = glob("[!abc].txt");
        assert!(g.matches("/project/d.txt"));
        assert!(g.matches("/project/z.txt"));
        assert!(!g.matches("/project/a.txt"));
        assert!(!g.matches("/project/b.txt"));
    }

    #[test]
    fn test_character_class_range() {
        let g = glob("file[0-4].md");
        assert!(g.matches("/project/file3.md"));
        assert!(!g.matches("/project/file7.md"));
    }

    #[test]
    fn test_brackets_with_slash_are_literal() {
        let g = glob("ab[e/]cd.i");
        assert!(g.matches("/project/ab[e/]cd.i"));
        assert!(!g.matches("/project/abecd.i"));
    }

    // ===========================================
    // Braces
    // ===========================================

    #[test]
    fn test_brace_alternation() {
        let g = glob("*.{js,ts}");
        assert!(g.matches("/project/a.js"));
        assert!(g.matches("/project/a.ts"));
        assert!(!g.matches("/project/a.rs"));
    }

    #[test]
    fn test_nested_brace_alternation() {
        let g = glob("{a,{b,c}}.d");
        assert!(g.matches("/project/a.d"));
        assert!(g.matches("/project/b.d"));
        assert!(g.matches("/project/c.d"));
        assert!(!g.matches("/project/e.d"));
    }

    #[test]
    fn test_alternatives_are_globs() {
        let g = glob("{*.py,Makefile}");
        assert!(g.matches("/project/x/run.py"));
        assert!(g.matches("/project/Makefile"));
    }

    #[test]
    fn test_single_word_braces_are_literal() {
        let g = glob("{single}.b");
        assert!(g.matches("/project/{single}.b"));
        assert!(!g.matches("/project/single.b"));
    }

    #[test]
    fn test_empty_braces_are_literal() {
        let g = glob("{}.c");
        assert!(g.matches("/project/{}.c"));
    }

    #[test]
    fn test_unbalanced_braces_are_literal() {
        let g = glob("{a,b");
        assert!(g.is_valid());
        assert!(g.matches("/project/{a,b"));
        assert!(!g.matches("/project/a"));
    }

    // ===========================================
    // Numeric ranges
    // ===========================================

    #[test]
    fn test_numeric_range() {
        let g = glob("{1..3}");
        assert!(g.matches("/project/1"));
        assert!(g.matches("/project/2"));
        assert!(g.matches("/project/3"));
        assert!(!g.matches("/project/0"));
        assert!(!g.matches("/project/4"));
        assert!(!g.matches("/project/01"));
        assert!(!g.matches("/project/-1"));
    }

    #[test]
    fn test_negative_numeric_range() {
        let g = glob("{-2..2}");
        for n in ["-2", "-1", "0", "1", "2"] {
            assert!(g.matches(&format!("/project/{n}")), "{n} should match");
        }
        assert!(!g.matches("/project/-3"));
        assert!(!g.matches("/project/3"));
        assert!(!g.matches("/project/-01"));
    }

    #[test]
    fn test_reversed_numeric_range() {
        let g = glob("file{5..3}.txt");
        assert!(g.matches("/project/file4.txt"));
        assert!(!g.matches("/project/file6.txt"));
    }

    #[test]
    fn test_leading_zero_rejected_even_in_range() {
        let g = glob("{1..10}");
        assert!(g.matches("/project/10"));
        assert!(!g.matches("/project/01"));
    }

    #[test]
    fn test_multiple_numeric_ranges() {
        let g = glob("v{1..2}.{10..20}");
        assert!(g.matches("/project/v1.15"));
        assert!(!g.matches("/project/v3.15"));
        assert!(!g.matches("/project/v1.25"));
    }

    #[test]
    fn test_range_inside_unmatched_alternative_never_matches() {
        let g = glob("{a,{1..3}}");
        assert!(g.matches("/project/2"));
        assert!(!g.matches("/project/a"));
    }

    // ===========================================
    // Escapes and invalid patterns
    // ===========================================

    #[test]
    fn test_escaped_comment_characters() {
        let g = glob("\\#file\\;");
        assert_eq!(g.source(), "\\#file\\;");
        assert!(g.matches("/project/#file;"));
    }

    #[test]
    fn test_escaped_wildcard_is_literal() {
        let g = glob("a\\*b");
        assert!(g.matches("/project/a*b"));
        assert!(!g.matches("/project/axb"));
    }

    #[test]
    fn test_pattern_length_limit() {
        let ok = glob(&"a".repeat(MAX_GLOB_LENGTH));
        assert!(ok.is_valid());

        let too_long = glob(&"a".repeat(MAX_GLOB_LENGTH + 1));
        assert!(!too_long.is_valid());
        assert!(matches!(
            too_long.error(),
            Some(GlobError::TooLong { len: 4097, max: 4096 })
        ));
        assert!(!too_long.matches(&format!("/project/{}", "a".repeat(4097))));
    }

    #[test]
    fn test_unclosed_class_is_invalid_and_never_matches() {
        let g = glob("*.[ch");
        assert!(!g.is_valid());
        assert!(matches!(g.error(), Some(GlobError::Syntax { .. })));
        assert!(!g.matches("/project/a.c"));
        assert!(!g.matches("/project/a.[ch"));
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let g = glob("");
        assert!(g.is_empty());
        assert!(g.is_valid());
        assert!(!g.matches("/project/a.txt"));
        assert!(!g.matches("/project"));
    }

    #[test]
    fn test_literal_dot_is_not_wildcard() {
        let g = glob("a.c");
        assert!(!g.matches("/project/abc"));
    }
}
