use regex::Regex;
use std::sync::LazyLock;

/// Leading list marker: "1. ", "2) ", "- ", "* "
static RE_LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+\s*[.)]|[-*•])\s*").unwrap());
static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extracts movie titles from a free-text numbered list
///
/// Each non-empty line loses its list marker, any parenthetical annotation
/// (typically the year), stray brackets and markdown emphasis. Lines that end up empty are
/// dropped. Never fails; unrecognised input yields its trimmed lines.
pub fn parse_titles(raw: &str) -> Vec<String> {
    raw.lines().filter_map(clean_line).collect()
}

fn clean_line(line: &str) -> Option<String> {
    let line = strip_list_markers(line);
    let line = RE_PARENTHETICAL.replace_all(line, " ");
    let line = line.replace(['*', '_', '(', ')'], "");
    let line = RE_WHITESPACE.replace_all(line.trim(), " ");

    let title = strip_wrapping_quotes(&line).trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Removes stacked markers such as "1. 2. " or "- 1) "
fn strip_list_markers(mut line: &str) -> &str {
    while let Some(marker) = RE_LIST_MARKER.find(line) {
        line = &line[marker.end()..];
    }
    line
}

fn strip_wrapping_quotes(title: &str) -> &str {
    for (open, close) in [('"', '"'), ('“', '”'), ('\'', '\'')] {
        if let Some(inner) = title
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_with_years() {
        assert_eq!(
            parse_titles("1. Inception\n2. The Matrix (1999)\n\n3) Arrival"),
            vec!["Inception", "The Matrix", "Arrival"]
        );
    }

    #[test]
    fn test_clean_input_is_unchanged() {
        let clean = vec!["Inception", "The Matrix", "Arrival"];
        assert_eq!(parse_titles(&clean.join("\n")), clean);
        assert_eq!(parse_titles(&parse_titles("1. Heat (1995)").join("\n")), vec!["Heat"]);
    }

    #[test]
    fn test_titles_starting_with_digits_kept() {
        assert_eq!(
            parse_titles("1. 2001: A Space Odyssey (1968)\n2. 12 Angry Men"),
            vec!["2001: A Space Odyssey", "12 Angry Men"]
        );
    }

    #[test]
    fn test_stacked_markers_stripped() {
        assert_eq!(
            parse_titles("1. 2. Heat\n- 3) Ronin\n4. 2001: A Space Odyssey"),
            vec!["Heat", "Ronin", "2001: A Space Odyssey"]
        );
    }

    #[test]
    fn test_markdown_and_quotes_stripped() {
        assert_eq!(
            parse_titles("1. **Blade Runner** (1982)\n- \"Alien\"\n* Aliens (1986) - sequel"),
            vec!["Blade Runner", "Alien", "Aliens - sequel"]
        );
    }

    #[test]
    fn test_inner_parenthetical_collapses_whitespace() {
        assert_eq!(
            parse_titles("4. Amélie (Le Fabuleux Destin) Poulain"),
            vec!["Amélie Poulain"]
        );
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        assert_eq!(
            parse_titles("\r\n1. Heat\r\n   \r\n2. Ronin\r\n"),
            vec!["Heat", "Ronin"]
        );
    }

    #[test]
    fn test_degenerate_input_yields_empty() {
        assert!(parse_titles("").is_empty());
        assert!(parse_titles("\n\n  \n").is_empty());
        assert!(parse_titles("1. \n2) (1999)\n(unknown)").is_empty());
    }

    #[test]
    fn test_never_returns_markers_or_parentheses() {
        let inputs = [
            "10. Se7en (1995)\n11) Zodiac (2007)",
            "((nested)) title",
            "(",
            ")",
            "1)",
            "1. 2. 3) Heat",
            "  42.   The Hitchhiker's Guide (2005)  ",
        ];

        for input in inputs {
            for title in parse_titles(input) {
                assert!(!title.is_empty());
                assert!(!title.contains(['(', ')']), "{title:?} from {input:?}");
                assert!(!RE_LIST_MARKER.is_match(&title), "{title:?} from {input:?}");
            }
        }
    }
}
