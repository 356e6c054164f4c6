//! Text dump of an encoded column.
//!
//! Layout:
//!
//! ```text
//! Dictionary: <distinct count>
//! 0: <value 0>
//! 1: <value 1>
//! ...
//!
//! Encoded Data: <row count>
//! <id> <id> <id> ...
//! ```
//!
//! Values are escaped (`\\`, `\n`, `\r`) so that every string fits on one line. The
//! counts in the section headers detect truncated payloads. The format is meant for
//! debugging and round-tripping, not as an interchange protocol.

use std::{
    fmt,
    io::{BufRead, Write},
};

use dictcol_common::{Result, error::Error, verify_data};

use crate::{column::EncodedColumn, dictionary::Dictionary};

const DICTIONARY_HEADER: &str = "Dictionary:";
const DATA_HEADER: &str = "Encoded Data:";

impl EncodedColumn {
    /// Renders the column as text.
    pub fn serialize(&self) -> String {
        self.text().to_string()
    }

    /// Writes the text rendering of the column to `writer`.
    pub fn write_text<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self.text()).map_err(|e| Error::io("write encoded column", e))?;
        writer
            .flush()
            .map_err(|e| Error::io("flush encoded column", e))
    }

    /// Reconstructs a column from its text rendering.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidFormat` on a malformed or truncated payload. No partial
    /// column is ever returned.
    pub fn deserialize(text: &str) -> Result<EncodedColumn> {
        EncodedColumn::read_text(text.as_bytes())
    }

    /// Reads a column rendered by [`EncodedColumn::write_text`].
    pub fn read_text<R: BufRead>(reader: R) -> Result<EncodedColumn> {
        TextReader::new(reader).read_column()
    }

    /// Returns a `Display` adapter producing the text rendering.
    pub fn text(&self) -> ColumnText<'_> {
        ColumnText(self)
    }
}

/// `Display` adapter rendering an [`EncodedColumn`] in the text layout.
pub struct ColumnText<'a>(&'a EncodedColumn);

impl fmt::Display for ColumnText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = self.0;
        writeln!(f, "{DICTIONARY_HEADER} {}", column.distinct_count())?;
        for (id, value) in column.dictionary().iter() {
            write!(f, "{id}: ")?;
            write_escaped(f, value)?;
            f.write_str("\n")?;
        }
        writeln!(f)?;
        writeln!(f, "{DATA_HEADER} {}", column.len())?;
        for (i, id) in column.encoded_ids().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{id}")?;
        }
        writeln!(f)
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let mut rest = value;
    while let Some(pos) = rest.find(['\\', '\n', '\r']) {
        f.write_str(&rest[..pos])?;
        match rest.as_bytes()[pos] {
            b'\\' => f.write_str("\\\\")?,
            b'\n' => f.write_str("\\n")?,
            _ => f.write_str("\\r")?,
        }
        rest = &rest[pos + 1..];
    }
    f.write_str(rest)
}

fn unescape(value: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            other => {
                return Err(Error::invalid_format(
                    "dictionary",
                    format!("line {line_no}: invalid escape sequence {other:?}"),
                ));
            }
        }
    }
    Ok(out)
}

struct TextReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TextReader<R> {
    fn new(reader: R) -> Self {
        TextReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                line.map(Some)
                    .map_err(|e| Error::io(format!("read encoded column, line {}", self.line_no), e))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self, element: &str) -> Result<String> {
        self.next_line()?.ok_or_else(|| {
            Error::invalid_format(
                element,
                format!("unexpected end of payload after line {}", self.line_no),
            )
        })
    }

    fn read_header(&mut self, header: &str) -> Result<usize> {
        let line = self.expect_line(header)?;
        let count = line
            .strip_prefix(header)
            .map(str::trim)
            .and_then(|count| count.parse::<usize>().ok())
            .ok_or_else(|| {
                Error::invalid_format(
                    header,
                    format!("line {}: expected '{header} <count>', found '{line}'", self.line_no),
                )
            })?;
        Ok(count)
    }

    fn read_column(mut self) -> Result<EncodedColumn> {
        let dictionary = self.read_dictionary()?;

        let separator = self.expect_line("separator")?;
        verify_data!(separator, separator.trim().is_empty());

        let row_count = self.read_header(DATA_HEADER)?;
        let encoded_ids = self.read_ids(row_count)?;
        EncodedColumn::from_parts(dictionary, encoded_ids)
    }

    fn read_dictionary(&mut self) -> Result<Dictionary> {
        let count = self.read_header(DICTIONARY_HEADER)?;
        let mut values = Vec::with_capacity(count.min(1 << 20));
        for expected_id in 0..count {
            let line = self.expect_line("dictionary")?;
            let (id, value) = line.split_once(':').ok_or_else(|| {
                Error::invalid_format(
                    "dictionary",
                    format!("line {}: expected '<id>: <value>'", self.line_no),
                )
            })?;
            if id.parse::<usize>().ok() != Some(expected_id) {
                return Err(Error::invalid_format(
                    "dictionary",
                    format!("line {}: expected id {expected_id}, found '{id}'", self.line_no),
                ));
            }
            let value = value.strip_prefix(' ').unwrap_or(value);
            values.push(unescape(value, self.line_no)?);
        }
        Dictionary::from_values(values)
    }

    fn read_ids(&mut self, row_count: usize) -> Result<Vec<u32>> {
        let mut ids = Vec::with_capacity(row_count.min(1 << 24));
        while let Some(line) = self.next_line()? {
            for token in line.split_ascii_whitespace() {
                let id = token.parse::<u32>().map_err(|_| {
                    Error::invalid_format(
                        "encoded data",
                        format!("line {}: invalid id '{token}'", self.line_no),
                    )
                })?;
                ids.push(id);
            }
        }
        if ids.len() != row_count {
            return Err(Error::invalid_format(
                "encoded data",
                format!("expected {row_count} ids, found {}", ids.len()),
            ));
        }
        Ok(ids)
    }
}
