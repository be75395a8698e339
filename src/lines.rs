//! Line windowing over the word buffer.

/// Greedily wrap `words` into at most `count` lines no wider than `width`.
///
/// Words are joined by single spaces. A word that does not fit closes the
/// current line; a word wider than `width` gets a line to itself. The result
/// always holds exactly `count` lines, padded with empty strings once the
/// words run out.
pub fn wrap_lines<S: AsRef<str>>(words: &[S], width: usize, count: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(count);
    let mut words = words.iter().map(AsRef::as_ref).peekable();

    while lines.len() < count {
        let Some(first) = words.next() else {
            break;
        };

        let mut line = first.to_string();
        let mut line_len = first.chars().count();

        while let Some(word) = words.peek() {
            let word_len = word.chars().count();
            if line_len + 1 + word_len > width {
                break;
            }
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
            words.next();
        }

        lines.push(line);
    }

    lines.resize(count, String::new());
    lines
}

/// Number of whitespace-delimited tokens in `line`
pub fn count_words(line: &str) -> usize {
    line.split_whitespace().count()
}

/// Words completed within the first `cursor` characters of `line`.
///
/// A word only counts once the prefix ends in a space; the word under the
/// cursor is still being typed and is left out.
pub fn completed_words(line: &str, cursor: usize) -> usize {
    let typed: String = line.chars().take(cursor).collect();
    let trimmed = typed.trim_end_matches(' ');

    if trimmed.is_empty() {
        return 0;
    }

    let words = count_words(trimmed);
    if trimmed.len() != typed.len() {
        words
    } else {
        words.saturating_sub(1)
    }
}
