//! Corpus sources for segmented training text.
//!
//! A training corpus is plain text with one sentence per line and words
//! separated by a fixed separator.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// Word separator used by a corpus dialect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Separator {
    /// Words separated by one space.
    Space,
    /// Words separated by two spaces (PKU / MSR bakeoff format).
    #[default]
    DoubleSpace,
    /// Any other fixed separator.
    Custom(String),
}

impl Separator {
    /// The separator text.
    pub fn as_str(&self) -> &str {
        match self {
            Separator::Space => " ",
            Separator::DoubleSpace => "  ",
            Separator::Custom(sep) => sep,
        }
    }

    /// Split `line` into words, dropping empty pieces.
    pub fn split<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        line.split(self.as_str()).filter(|word| !word.is_empty())
    }
}

/// A producer of training lines.
///
/// Any iterator over `io::Result<String>` is a corpus source, so
/// `BufRead::lines()` can be used directly.
pub trait CorpusSource {
    /// The next raw line, or `None` when the corpus is exhausted.
    fn next_line(&mut self) -> Option<io::Result<String>>;
}

impl<I> CorpusSource for I
where
    I: Iterator<Item = io::Result<String>>,
{
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.next()
    }
}

/// Line-oriented corpus read from a buffered reader.
#[derive(Debug)]
pub struct LineCorpus<R> {
    lines: Lines<R>,
}

impl<R: BufRead> LineCorpus<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl LineCorpus<BufReader<File>> {
    /// Open a UTF-8 corpus file.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for LineCorpus<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

/// Adapt in-memory lines into a corpus source.
pub fn corpus_from_lines<I, S>(lines: I) -> impl CorpusSource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    lines
        .into_iter()
        .map(|line| Ok::<String, io::Error>(line.into()))
}
