//! Diff rendering for `--check`.

use similar::{ChangeTag, TextDiff};

const CONTEXT_LINES: usize = 3;

const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Unified diff of the header on disk against the freshly generated one, or
/// `None` when they match. ANSI colors are added only when `color` is set.
pub fn generate_diff(label: &str, existing: &str, generated: &str, color: bool) -> Option<String> {
    if existing == generated {
        return None;
    }

    let paint = |style: &'static str| if color { style } else { "" };
    let reset = paint(RESET);

    let diff = TextDiff::from_lines(existing, generated);
    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_LINES);

    let mut output = format!(
        "{bold}--- {label} (on disk){reset}\n{bold}+++ {label} (generated){reset}\n",
        bold = paint(BOLD)
    );

    for hunk in unified.iter_hunks() {
        output.push_str(&format!("{}{}{reset}\n", paint(CYAN), hunk.header()));
        for change in hunk.iter_changes() {
            let (sign, style) = match change.tag() {
                ChangeTag::Delete => ('-', paint(RED)),
                ChangeTag::Insert => ('+', paint(GREEN)),
                ChangeTag::Equal => (' ', ""),
            };
            output.push_str(style);
            output.push(sign);
            output.push_str(change.value());
            if change.missing_newline() {
                output.push_str("\n\\ No newline at end of file\n");
            }
            if !style.is_empty() {
                output.push_str(reset);
            }
        }
    }

    Some(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_has_no_diff() {
        assert!(generate_diff("a.hpp", "x\ny\n", "x\ny\n", false).is_none());
    }

    #[test]
    fn test_plain_diff_has_hunk_headers() {
        let diff = generate_diff("a.hpp", "keep\nold\n", "keep\nnew\n", false).unwrap();
        assert_eq!(
            diff,
            "--- a.hpp (on disk)\n+++ a.hpp (generated)\n@@ -1,2 +1,2 @@\n keep\n-old\n+new\n"
        );
    }

    #[test]
    fn test_colored_diff_marks_changed_lines() {
        let diff = generate_diff("a.hpp", "keep\nold\n", "keep\nnew\n", true).unwrap();
        assert!(diff.contains("\x1b[1m--- a.hpp (on disk)\x1b[0m\n"));
        assert!(diff.contains("\x1b[36m@@ -1,2 +1,2 @@\x1b[0m\n"));
        assert!(diff.contains("\x1b[31m-old\n\x1b[0m"));
        assert!(diff.contains("\x1b[32m+new\n\x1b[0m"));
    }

    #[test]
    fn test_distant_changes_get_separate_hunks() {
        let old: String = (0..20).map(|i| format!("line {i}\n")).collect();
        let new = old
            .replace("line 1\n", "line one\n")
            .replace("line 18\n", "line eighteen\n");
        let diff = generate_diff("a.hpp", &old, &new, false).unwrap();
        assert_eq!(diff.matches("@@ -").count(), 2);
        assert!(!diff.contains(" line 9\n"));
    }

    #[test]
    fn test_missing_trailing_newline_is_marked() {
        let diff = generate_diff("a.hpp", "a\nb", "a\nc\n", false).unwrap();
        assert!(diff.contains("-b\n\\ No newline at end of file\n"));
    }
}
