//! Text wrapping utilities for log formatting

/// Wraps text at word boundaries to fit within `max_width` columns.
///
/// Leading indentation of a line is repeated on its continuation lines, so
/// indented list items stay aligned. Words longer than the width are kept
/// whole on their own line.
pub fn wrap_text(text: &str, max_width: usize) -> String {
    let mut wrapped_lines = Vec::new();

    for line in text.lines() {
        if line.chars().count() <= max_width {
            wrapped_lines.push(line.to_string());
            continue;
        }

        let content = line.trim_start();
        let indent = &line[..line.len() - content.len()];
        let mut current = String::from(indent);

        for word in content.split_whitespace() {
            let has_words = current.len() > indent.len();
            let projected = current.chars().count() + word.chars().count() + usize::from(has_words);

            if has_words && projected > max_width {
                wrapped_lines.push(std::mem::replace(&mut current, String::from(indent)));
            } else if has_words {
                current.push(' ');
            }
            current.push_str(word);
        }

        if current.len() > indent.len() {
            wrapped_lines.push(current);
        }
    }

    wrapped_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("Short text", 80), "Short text");
    }

    #[test]
    fn test_wrap_long_text() {
        let text = "This is a very long line that should be wrapped because it exceeds the maximum width that we have specified for this test";
        let result = wrap_text(text, 40);
        assert!(result.contains('\n'));
        for line in result.lines() {
            assert!(line.len() <= 40);
        }
    }

    #[test]
    fn test_wrap_keeps_indentation() {
        let text = "  - /videos/movie.mkv: mkvmerge failed with exit code 2 and reported an error";
        let result = wrap_text(text, 40);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.starts_with("  ")));
    }

    #[test]
    fn test_overlong_word_stays_whole() {
        let path = "/a/very/long/path/that/cannot/be/broken/up/at/all.mkv";
        let result = wrap_text(&format!("Failed {} now", path), 20);
        assert_eq!(result.lines().collect::<Vec<_>>(), vec!["Failed", path, "now"]);
    }

    #[test]
    fn test_wrap_multiline() {
        let text = "Line one\nLine two that is very long and should be wrapped to fit within the maximum width";
        let result = wrap_text(text, 40);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines.len() > 2);
        assert_eq!(lines[0], "Line one");
    }
}
