use crate::position::Position;
use crate::{Range, Span};
use std::fmt::{Display, Formatter};

pub struct File {
    pub name: String,
    pub source: String,
    line_starts: Vec<usize>,
}

fn get_line_starts(contents: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(contents.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    OutOfBounds { given: usize, span: Span },
    InvalidCharBoundary { given: usize },
    LineOutOfBounds { given: usize, max: usize },
}

impl Display for FileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::OutOfBounds { given, span } => {
                write!(f, "Byte index {given} is outside of {span}")
            }
            FileError::InvalidCharBoundary { given } => {
                write!(f, "Byte index {given} is not on a character boundary")
            }
            FileError::LineOutOfBounds { given, max } => {
                write!(f, "Line {given} is past the last line ({max})")
            }
        }
    }
}

impl std::error::Error for FileError {}

type Result<T> = std::result::Result<T, FileError>;

/// One physical line of a [`File`], terminator stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub span: Span,
    pub text: &'a str,
}

impl File {
    pub fn new(name: impl Into<String>, source: String) -> Self {
        let line_starts = get_line_starts(source.as_ref());
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    pub fn update(&mut self, source: String) {
        let line_starts = get_line_starts(source.as_ref());
        self.source = source;
        self.line_starts = line_starts;
    }

    /// Yields every line of the file in order. A trailing newline does not
    /// produce an extra empty line, and an empty file yields nothing.
    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> + '_ {
        self.line_starts
            .iter()
            .enumerate()
            .take_while(|(_, start)| **start < self.source.len())
            .map(|(index, &start)| {
                let end = self
                    .line_starts
                    .get(index + 1)
                    .copied()
                    .unwrap_or(self.source.len());
                let raw = &self.source[start..end];
                let text = raw.strip_suffix('\n').unwrap_or(raw);
                let text = text.strip_suffix('\r').unwrap_or(text);

                Line {
                    index,
                    span: Span::new(start, start + text.len()),
                    text,
                }
            })
    }

    fn line_start(&self, line_index: usize) -> Result<usize> {
        use std::cmp::Ordering;

        match line_index.cmp(&self.last_line_index()) {
            Ordering::Less => Ok(self.line_starts[line_index]),
            Ordering::Equal => Ok(self.source.len()),
            Ordering::Greater => Err(FileError::LineOutOfBounds {
                given: line_index,
                max: self.last_line_index(),
            }),
        }
    }

    fn last_line_index(&self) -> usize {
        self.line_starts.len()
    }

    fn line_span(&self, line_index: usize) -> Result<Span> {
        let line_start = self.line_start(line_index)?;
        let next_line_start = self.line_start(line_index + 1)?;

        Ok(Span::new(line_start, next_line_start))
    }

    fn location(&self, byte_index: usize) -> Result<Position> {
        match self.line_starts.binary_search(&byte_index) {
            Ok(line) => Ok(Position { line, character: 0 }),
            Err(next_line) => {
                let line_index = next_line - 1;
                let line_start_index = self.line_start(line_index)?;

                let line_src = self
                    .source
                    .get(line_start_index..byte_index)
                    .ok_or_else(|| {
                        let given = byte_index;
                        if given >= self.source_span().end() {
                            let span = self.source_span();
                            FileError::OutOfBounds { given, span }
                        } else {
                            FileError::InvalidCharBoundary { given }
                        }
                    })?;

                Ok(Position::new(line_index, line_src.len()))
            }
        }
    }

    fn source_slice(&self, span: Span) -> Result<&str> {
        self.source
            .get(span.start..span.end)
            .ok_or(FileError::OutOfBounds {
                given: span.end,
                span: self.source_span(),
            })
    }

    fn source_span(&self) -> Span {
        Span::new(0, self.source.len())
    }

    pub fn position_to_byte_index(&self, position: Position) -> Result<usize> {
        let line_span = self.line_span(position.line)?;
        let index = line_span.start() + position.character;

        if index > line_span.end() {
            return Err(FileError::OutOfBounds {
                given: index,
                span: line_span,
            });
        }
        if !self.source.is_char_boundary(index) {
            return Err(FileError::InvalidCharBoundary { given: index });
        }

        Ok(index)
    }

    pub fn range_to_byte_span(&self, range: &Range) -> Result<std::ops::Range<usize>> {
        Ok(self.position_to_byte_index(range.start)?..self.position_to_byte_index(range.end)?)
    }

    pub fn byte_index_to_position(&self, byte_index: usize) -> Result<Position> {
        self.location(byte_index)
    }

    pub fn byte_span_to_range(&self, span: Span) -> Result<Range> {
        Ok(Range {
            start: self.byte_index_to_position(span.start())?,
            end: self.byte_index_to_position(span.end())?,
        })
    }

    /// Source of one line without its terminator.
    pub fn get_line_source(&self, line_index: usize) -> Result<&str> {
        let line = self.source_slice(self.line_span(line_index)?)?;
        let line = line.strip_suffix('\n').unwrap_or(line);
        Ok(line.strip_suffix('\r').unwrap_or(line))
    }

    /// The run of bytes around `position` accepted by `is_word_byte`, and its
    /// span within the file. A column inside a multi-byte character is moved
    /// back to the start of that character.
    pub fn get_word_at_position(
        &self,
        position: Position,
        is_word_byte: impl Fn(u8) -> bool,
    ) -> Result<(&str, Span)> {
        let line_span = self.line_span(position.line)?;
        let line = self.get_line_source(position.line)?;
        let (start, end) = find_word_at_pos(line, position.character, is_word_byte);
        let text = line.get(start..end).ok_or(FileError::InvalidCharBoundary {
            given: line_span.start() + start,
        })?;

        Ok((
            text,
            Span::new(line_span.start() + start, line_span.start() + end),
        ))
    }
}

pub fn find_word_at_pos(line: &str, col: usize, is_word_byte: impl Fn(u8) -> bool) -> (usize, usize) {
    let bytes = line.as_bytes();
    let mut col = col.min(bytes.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }

    let start = bytes[..col]
        .iter()
        .rposition(|&b| !is_word_byte(b))
        .map(|i| i + 1)
        .unwrap_or(0);

    let end = bytes[col..]
        .iter()
        .position(|&b| !is_word_byte(b))
        .map(|i| col + i)
        .unwrap_or(bytes.len());

    (start, end)
}
