//! Textual filter list line -> compiled [`Rule`].

use std::collections::HashSet;

use regex::Regex;

use crate::error::FilterError;
use crate::rule::{PatternForm, ResourceType, Rule, RuleKind};

const RESOURCE_TYPE_TOKENS: &[&str] = &[
    "document",
    "script",
    "image",
    "stylesheet",
    "object",
    "xmlhttprequest",
    "subdocument",
    "ping",
    "websocket",
];

/// Parse one filter list line into a `Rule`, or `None` if the line is a
/// comment, blank line, metadata header, or cosmetic rule.
///
/// Logs at `warn` (via the `log` facade) and returns a rule with
/// `valid = false` when a regex/wildcard pattern fails to compile,
/// rather than discarding the line silently.
pub fn parse_line(line: &str) -> Option<Rule> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('!') || line.starts_with('#') || line.starts_with('[') {
        return None;
    }

    if line.contains("##") || line.contains("#@#") || line.contains("#?#") {
        return None;
    }

    let (kind, rest) = if let Some(stripped) = line.strip_prefix("@@") {
        (RuleKind::Allow, stripped)
    } else {
        (RuleKind::Block, line)
    };

    let (pattern_text, modifiers) = split_modifiers(rest);

    if pattern_text.is_empty() {
        // A line that is nothing but `$modifiers` (e.g. a bare
        // `$removeparam=...` entry) carries no pattern to match against;
        // an empty Substring pattern would match every URL, so treat it
        // as a no-op rather than a rule.
        return None;
    }

    let mut include_domains = HashSet::new();
    let mut exclude_domains = HashSet::new();
    let mut include_types = HashSet::new();
    let mut exclude_types = HashSet::new();
    let mut redirect = None;

    if let Some(modifiers) = modifiers {
        for token in modifiers.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            parse_modifier_token(
                token,
                &mut include_domains,
                &mut exclude_domains,
                &mut include_types,
                &mut exclude_types,
                &mut redirect,
            );
        }
    }

    let (form, valid) = compile_pattern(pattern_text);

    Some(Rule {
        pattern_text: pattern_text.to_string(),
        kind,
        form,
        include_domains,
        exclude_domains,
        include_types,
        exclude_types,
        redirect,
        valid,
    })
}

fn split_modifiers(rest: &str) -> (&str, Option<&str>) {
    match find_unescaped_dollar(rest) {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    }
}

fn find_unescaped_dollar(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' && (i == 0 || bytes[i - 1] != b'\\') {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn parse_modifier_token(
    token: &str,
    include_domains: &mut HashSet<String>,
    exclude_domains: &mut HashSet<String>,
    include_types: &mut HashSet<ResourceType>,
    exclude_types: &mut HashSet<ResourceType>,
    redirect: &mut Option<String>,
) {
    if let Some(domains) = token.strip_prefix("domain=") {
        for entry in domains.split('|') {
            if let Some(negated) = entry.strip_prefix('~') {
                exclude_domains.insert(negated.to_string());
            } else if !entry.is_empty() {
                include_domains.insert(entry.to_string());
            }
        }
        return;
    }

    if let Some(value) = token.strip_prefix("redirect-rule=") {
        *redirect = Some(value.to_string());
        return;
    }
    if let Some(value) = token.strip_prefix("redirect=") {
        *redirect = Some(value.to_string());
        return;
    }

    let (negated, name) = match token.strip_prefix('~') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    if RESOURCE_TYPE_TOKENS.contains(&name) {
        let rt = ResourceType::parse(name);
        if negated {
            exclude_types.insert(rt);
        } else {
            include_types.insert(rt);
        }
        return;
    }

    // important, match-case, third-party/~third-party, removeparam=...:
    // recognized syntactically, no effect on matching (see SPEC_FULL.md §7).
}

fn compile_pattern(pattern: &str) -> (PatternForm, bool) {
    if pattern.len() >= 2 && pattern.starts_with('/') && pattern.ends_with('/') {
        let body = &pattern[1..pattern.len() - 1];
        return match Regex::new(&format!("(?i){}", body)) {
            Ok(re) => (PatternForm::Regex(re), true),
            Err(source) => {
                let err = FilterError::PatternCompilation {
                    pattern: pattern.to_string(),
                    source,
                };
                log::warn!("{}", err);
                (PatternForm::Substring(pattern.to_string()), false)
            }
        };
    }

    if let Some(stripped) = pattern.strip_prefix("||") {
        if let Some(host) = stripped.strip_suffix('^') {
            return (PatternForm::DomainAnchor(host.to_string()), true);
        }
    }

    if pattern.contains('*') || pattern.contains('^') {
        let translated = wildcard_to_regex(pattern);
        return match Regex::new(&format!("(?i){}", translated)) {
            Ok(re) => (PatternForm::WildcardRegex(re), true),
            Err(source) => {
                let err = FilterError::PatternCompilation {
                    pattern: pattern.to_string(),
                    source,
                };
                log::warn!("{}", err);
                (PatternForm::Substring(pattern.to_string()), false)
            }
        };
    }

    (PatternForm::Substring(pattern.to_string()), true)
}

/// Translate an ABP-style wildcard pattern into a regex body: escape
/// metacharacters, then `*` -> `.*` and `^` -> a separator class.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '^' => out.push_str("[/?&=:]"),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\' | '$' | '?' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_produce_no_rule() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("! a comment").is_none());
        assert!(parse_line("# a comment").is_none());
        assert!(parse_line("[Adblock Plus 2.0]").is_none());
    }

    #[test]
    fn cosmetic_rules_produce_no_rule() {
        assert!(parse_line("example.com##.ad-banner").is_none());
        assert!(parse_line("example.com#@#.ad-banner").is_none());
    }

    #[test]
    fn allow_prefix_sets_kind() {
        let rule = parse_line("@@||github.com^").unwrap();
        assert_eq!(rule.kind, RuleKind::Allow);
        assert!(matches!(rule.form, PatternForm::DomainAnchor(ref h) if h == "github.com"));
    }

    #[test]
    fn domain_anchor_parses_host() {
        let rule = parse_line("||doubleclick.net^").unwrap();
        assert_eq!(rule.kind, RuleKind::Block);
        assert!(matches!(rule.form, PatternForm::DomainAnchor(ref h) if h == "doubleclick.net"));
    }

    #[test]
    fn regex_literal_is_compiled_case_insensitive() {
        let rule = parse_line("/ads?[0-9]+\\.js/").unwrap();
        assert!(rule.valid);
        assert!(matches!(rule.form, PatternForm::Regex(_)));
    }

    #[test]
    fn wildcard_pattern_translates_star_and_caret() {
        let rule = parse_line("*ads*^").unwrap();
        assert!(rule.valid);
        match &rule.form {
            PatternForm::WildcardRegex(re) => {
                assert!(re.is_match("https://x.com/ads/track?"));
            }
            _ => panic!("expected wildcard regex"),
        }
    }

    #[test]
    fn plain_text_is_substring() {
        let rule = parse_line("trackerbug.js").unwrap();
        assert!(matches!(rule.form, PatternForm::Substring(ref s) if s == "trackerbug.js"));
    }

    #[test]
    fn domain_modifier_splits_include_and_exclude() {
        let rule = parse_line("ads.js$domain=example.com|~trusted.com").unwrap();
        assert!(rule.include_domains.contains("example.com"));
        assert!(rule.exclude_domains.contains("trusted.com"));
    }

    #[test]
    fn resource_type_modifier_tokens() {
        let rule = parse_line("ads.js$script,~image").unwrap();
        assert!(rule.include_types.contains(&ResourceType::Script));
        assert!(rule.exclude_types.contains(&ResourceType::Image));
    }

    #[test]
    fn redirect_modifier_is_recorded_not_enforced() {
        let rule = parse_line("ads.js$redirect=noopjs").unwrap();
        assert_eq!(rule.redirect.as_deref(), Some("noopjs"));
        assert_eq!(rule.kind, RuleKind::Block);
    }

    #[test]
    fn bare_modifier_line_produces_no_rule() {
        assert!(parse_line("$removeparam=utm_source").is_none());
    }

    #[test]
    fn invalid_regex_marks_rule_invalid_without_panicking() {
        let rule = parse_line("/[unterminated/").unwrap();
        assert!(!rule.valid);
    }
}
