//! Splitting text into words.

/// Splits `text` into maximal runs of alphabetic characters.
///
/// Every non-alphabetic character is a separator and is dropped. Empty runs are
/// never produced. Words are borrowed from `text`, not copied.
pub fn words(text: &str) -> Words<'_> {
    Words { rest: text }
}

/// Iterator returned by [`words`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.find(char::is_alphabetic)?;
        let tail = &self.rest[start..];
        let end = tail
            .find(|ch: char| !ch.is_alphabetic())
            .unwrap_or(tail.len());
        let (word, rest) = tail.split_at(end);
        self.rest = rest;
        Some(word)
    }
}
