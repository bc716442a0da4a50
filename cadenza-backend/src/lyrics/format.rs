use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;

fn sentence_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[.!?] +").unwrap())
}

/// Splits after sentence-ending punctuation followed by spaces. The punctuation stays.
fn sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for found in sentence_regex().find_iter(text) {
        pieces.push(&text[start..=found.start()]);
        start = found.end();
    }
    pieces.push(&text[start..]);
    pieces
}

/// Splits in front of every uppercase ASCII letter.
fn capitals(sentence: &str) -> impl Iterator<Item = &str> {
    let mut starts: Vec<_> = sentence
        .char_indices()
        .filter(|(index, c)| *index > 0 && c.is_ascii_uppercase())
        .map(|(index, _)| index)
        .collect();
    starts.insert(0, 0);
    starts.push(sentence.len());
    starts.into_iter().tuple_windows().map(move |(start, end)| &sentence[start..end])
}

fn split_at_char(word: &str, n: usize) -> (&str, &str) {
    word.split_at(word.char_indices().nth(n).map_or(word.len(), |(index, _)| index))
}

/// Greedy wrap at `width` characters, breaking words longer than a line.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for mut word in line.split_whitespace() {
        let mut word_len = word.chars().count();
        let separator = usize::from(len > 0);
        if len + separator + word_len <= width {
            if separator > 0 {
                current.push(' ');
            }
            current.push_str(word);
            len += separator + word_len;
            continue;
        }

        if word_len > width && len > 0 && len + 1 < width {
            let take = width - len - 1;
            let (head, rest) = split_at_char(word, take);
            current.push(' ');
            current.push_str(head);
            word = rest;
            word_len -= take;
        }
        if len > 0 {
            lines.push(std::mem::take(&mut current));
        }
        while word_len > width {
            let (head, rest) = split_at_char(word, width);
            lines.push(head.to_owned());
            word = rest;
            word_len -= width;
        }
        current.push_str(word);
        len = word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Re-segments a raw transcript into display lines.
pub fn format(text: &str, width: usize) -> String {
    sentences(text)
        .into_iter()
        .flat_map(capitals)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| wrap(line, width).join("\n"))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        " Hello darkness my old friend. I've come to talk with you again",
        "Hello darkness my old friend.\nI've come to talk with you again"
    )]
    #[case("Wait!  What? no", "Wait!\nWhat?\nno")]
    #[case("love me Tender love me True", "love me\nTender love me\nTrue")]
    #[case("", "")]
    #[case("   ", "")]
    fn test_format(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(format(text, 50), expected);
    }

    #[rstest]
    #[case("the quick brown fox jumps", 10, &["the quick", "brown fox", "jumps"])]
    #[case("ab cdefghij", 5, &["ab cd", "efghi", "j"])]
    #[case("abcdefghijkl", 5, &["abcde", "fghij", "kl"])]
    #[case("abcd efghijk", 5, &["abcd", "efghi", "jk"])]
    #[case("a  b", 50, &["a b"])]
    fn test_wrap(#[case] line: &str, #[case] width: usize, #[case] expected: &[&str]) {
        assert_eq!(wrap(line, width), expected);
    }

    #[test]
    fn test_wrap_width() {
        let text = "la ".repeat(100);
        assert!(format(&text, 50).lines().all(|line| line.chars().count() <= 50));
    }
}
