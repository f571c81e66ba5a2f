use ahash::AHashSet;
use std::fs;
use std::io;
use std::path::Path;

/// The comparison unit for a file: its distinct non-blank lines with all spaces
/// removed. Line order and repetition are intentionally lost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalContent {
    lines: AHashSet<String>,
}

impl CanonicalContent {
    /// `\n`, `\r\n` and a lone `\r` all end a line. The empty piece between `\r` and
    /// `\n` is dropped along with blank lines.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split(['\r', '\n'])
            .map(normalize_line)
            .filter(|line| !line.is_empty())
            .collect();
        Self { lines }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_text(
            &lines
                .into_iter()
                .map(|l| l.as_ref().to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn intersection_len(&self, other: &CanonicalContent) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.lines.iter().filter(|l| large.lines.contains(*l)).count()
    }
}

fn normalize_line(line: &str) -> String {
    line.trim().replace(' ', "")
}

/// Read `path` as UTF-8 text and normalize it. Binary or otherwise non-UTF-8 files
/// surface as `InvalidData`.
pub fn read_canonical(path: &Path) -> io::Result<CanonicalContent> {
    let text = fs::read_to_string(path)?;
    Ok(CanonicalContent::from_text(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_whitespace_and_interior_spaces() {
        let content = CanonicalContent::from_text("  int x = 1;  \n\tfor (i = 0; i < n; i++)\n");
        assert_eq!(content.len(), 2);
        assert!(content.contains("intx=1;"));
        assert!(content.contains("for(i=0;i<n;i++)"));
    }

    #[test]
    fn test_tabs_inside_line_are_kept() {
        let content = CanonicalContent::from_text("a\tb");
        assert!(content.contains("a\tb"));
    }

    #[test]
    fn test_blank_lines_dropped_and_duplicates_collapsed() {
        let content = CanonicalContent::from_text("x\n\n   \nx\r\n  x  \n");
        assert_eq!(content.len(), 1);
        assert!(content.contains("x"));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let cr_only = CanonicalContent::from_text("a\rb\rc\r");
        assert_eq!(cr_only, CanonicalContent::from_lines(["a", "b", "c"]));

        let mixed = CanonicalContent::from_text("a\r\nb\rc\nd");
        assert_eq!(mixed.len(), 4);
        assert!(!mixed.contains(""));
    }

    #[test]
    fn test_carriage_return_files_still_overlap() {
        let x = CanonicalContent::from_text("a\rb\rc\r");
        let y = CanonicalContent::from_text("a\rb\rd\r");
        assert_eq!(x.intersection_len(&y), 2);
    }

    #[test]
    fn test_empty_text_is_empty() {
        assert!(CanonicalContent::from_text("").is_empty());
        assert!(CanonicalContent::from_text("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_from_lines_matches_from_text() {
        let a = CanonicalContent::from_lines(["a", "b", "c"]);
        let b = CanonicalContent::from_text("c\nb\na\n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_intersection_len() {
        let a = CanonicalContent::from_lines(["a", "b", "c"]);
        let b = CanonicalContent::from_lines(["a", "b", "d", "e"]);
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(b.intersection_len(&a), 2);
    }

    #[test]
    fn test_read_canonical_rejects_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let err = read_canonical(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
