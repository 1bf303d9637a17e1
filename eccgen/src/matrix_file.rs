//! Reader and writer for persisted matrix files.
//!
//! A matrix file holds three header lines followed by one bracketed
//! list-of-lists literal:
//!
//! ```text
//! Number of data bits (k): 4
//! Number of parity bits (r): 4
//! Number of codeword bits (n): 8
//! G =
//! [[1, 0, 0, 0, 0, 1, 1, 1],
//!  [0, 1, 0, 0, 1, 0, 1, 1],
//!  [0, 0, 1, 0, 1, 1, 0, 1],
//!  [0, 0, 0, 1, 1, 1, 1, 0]]
//! ```
//!
//! Parse failures carry the file path and the 1-based line they were found on.

use {
    crate::{BitMatrix, EccError, Result},
    std::{
        fmt, fs,
        path::{Path, PathBuf},
    },
};

/// Which matrix of the code a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Generator matrix, `k x n`
    G,
    /// Parity-check matrix, `r x n`
    H,
}

impl Symbol {
    /// Number of rows a matrix of this symbol must have.
    pub fn expected_rows(self, k: usize, r: usize) -> usize {
        match self {
            Symbol::G => k,
            Symbol::H => r,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::G => write!(f, "G"),
            Symbol::H => write!(f, "H"),
        }
    }
}

/// Integer header fields shared by every matrix file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    K,
    R,
    N,
}

impl HeaderField {
    pub const ALL: [HeaderField; 3] = [HeaderField::K, HeaderField::R, HeaderField::N];

    pub fn label(self) -> &'static str {
        match self {
            HeaderField::K => "Number of data bits (k)",
            HeaderField::R => "Number of parity bits (r)",
            HeaderField::N => "Number of codeword bits (n)",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }

    fn index(self) -> usize {
        match self {
            HeaderField::K => 0,
            HeaderField::R => 1,
            HeaderField::N => 2,
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderField::K => write!(f, "k"),
            HeaderField::R => write!(f, "r"),
            HeaderField::N => write!(f, "n"),
        }
    }
}

/// One parsed matrix file: its header fields and its binary matrix body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixFile {
    pub symbol: Symbol,
    pub k: usize,
    pub r: usize,
    pub n: usize,
    pub matrix: BitMatrix,
}

impl MatrixFile {
    /// Read and validate the matrix file at `path`, which must hold `symbol`.
    pub fn read(path: &Path, symbol: Symbol) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| EccError::io(path, e))?;
        Self::parse(&text, path, symbol)
    }

    /// Parse matrix file text. `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path, symbol: Symbol) -> Result<Self> {
        let mut parser = Parser::new(text, path);
        let [k, r, n] = parser.header(symbol)?;
        let literal = parser.matrix_literal()?;
        parser.expect_end()?;

        let rows = check_binary(literal, path, symbol)?;
        let expected = (symbol.expected_rows(k, r), n);
        check_shape(&rows, expected, path, symbol)?;
        let matrix = BitMatrix::from_rows(&rows).map_err(|err| EccError::Validation {
            path: path.to_path_buf(),
            symbol,
            detail: err.to_string(),
        })?;

        Ok(Self {
            symbol,
            k,
            r,
            n,
            matrix,
        })
    }

    /// Get a header field by name
    pub fn field(&self, field: HeaderField) -> usize {
        match field {
            HeaderField::K => self.k,
            HeaderField::R => self.r,
            HeaderField::N => self.n,
        }
    }

    /// Write the file in the layout `read` accepts.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string()).map_err(|e| EccError::io(path, e))
    }
}

impl fmt::Display for MatrixFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in HeaderField::ALL {
            writeln!(f, "{}: {}", field.label(), self.field(field))?;
        }
        writeln!(f, "{} =", self.symbol)?;
        for row in 0..self.matrix.rows() {
            f.write_str(if row == 0 { "[[" } else { " [" })?;
            for col in 0..self.matrix.cols() {
                if col > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(if self.matrix.get(row, col) { "1" } else { "0" })?;
            }
            if row + 1 == self.matrix.rows() {
                writeln!(f, "]]")?;
            } else {
                writeln!(f, "],")?;
            }
        }
        Ok(())
    }
}

fn check_binary(literal: Vec<Vec<i64>>, path: &Path, symbol: Symbol) -> Result<Vec<Vec<bool>>> {
    literal
        .into_iter()
        .enumerate()
        .map(|(row, values)| {
            values
                .into_iter()
                .enumerate()
                .map(|(col, value)| match value {
                    0 => Ok(false),
                    1 => Ok(true),
                    other => Err(EccError::Validation {
                        path: path.to_path_buf(),
                        symbol,
                        detail: format!("entry ({row}, {col}) is {other}, expected 0 or 1"),
                    }),
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

fn check_shape(
    rows: &[Vec<bool>],
    expected: (usize, usize),
    path: &Path,
    symbol: Symbol,
) -> Result<()> {
    // Ragged rows report the first row length that disagrees with n.
    let cols = rows
        .iter()
        .map(Vec::len)
        .find(|&len| len != expected.1)
        .or_else(|| rows.first().map(Vec::len))
        .unwrap_or(0);
    let actual = (rows.len(), cols);
    if actual != expected {
        return Err(EccError::Shape {
            path: path.to_path_buf(),
            symbol,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Character cursor tracking the current line.
struct Parser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    path: &'a Path,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, path: &'a Path) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            path,
        }
    }

    fn error(&self, detail: impl Into<String>) -> EccError {
        self.error_at(self.line, detail)
    }

    fn error_at(&self, line: usize, detail: impl Into<String>) -> EccError {
        EccError::Parse {
            path: PathBuf::from(self.path),
            line,
            detail: detail.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consume the rest of the current line, returning its number and text.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let number = self.line;
        match rest.find('\n') {
            Some(end) => {
                self.pos += end + 1;
                self.line += 1;
                Some((number, &rest[..end]))
            }
            None => {
                self.pos = self.src.len();
                Some((number, rest))
            }
        }
    }

    /// Parse header lines up to and including the `<symbol> =` marker. The
    /// cursor is left just after the `=`.
    fn header(&mut self, symbol: Symbol) -> Result<[usize; 3]> {
        let mut values: [Option<usize>; 3] = [None; 3];

        let marker_line = loop {
            let line_start = self.pos;
            let Some((number, line)) = self.next_line() else {
                return Err(self.error(format!("missing '{symbol} =' assignment")));
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some((name, eq)) = split_assignment(line) {
                if name != symbol.to_string() {
                    return Err(self.error_at(
                        number,
                        format!("expected '{symbol} =' assignment, found '{name} ='"),
                    ));
                }
                self.pos = line_start + eq + 1;
                self.line = number;
                break number;
            }

            let Some((label, value)) = trimmed.split_once(':') else {
                return Err(self.error_at(number, format!("unrecognized header line '{trimmed}'")));
            };
            let Some(field) = HeaderField::from_label(label.trim()) else {
                return Err(self.error_at(
                    number,
                    format!("unrecognized header field '{}'", label.trim()),
                ));
            };
            let value = value.trim();
            let digits_only = value.bytes().all(|b| b.is_ascii_digit());
            let parsed = match value.parse::<usize>() {
                Ok(parsed) if digits_only => parsed,
                _ => {
                    return Err(self.error_at(
                        number,
                        format!("non-numeric value '{value}' for '{}'", field.label()),
                    ))
                }
            };
            if parsed == 0 {
                return Err(self.error_at(
                    number,
                    format!("header field '{}' must be positive", field.label()),
                ));
            }
            if values[field.index()].replace(parsed).is_some() {
                return Err(self.error_at(
                    number,
                    format!("duplicate header field '{}'", field.label()),
                ));
            }
        };

        let mut header = [0usize; 3];
        for field in HeaderField::ALL {
            header[field.index()] = values[field.index()].ok_or_else(|| {
                self.error_at(marker_line, format!("missing header field '{}'", field.label()))
            })?;
        }
        Ok(header)
    }

    fn matrix_literal(&mut self) -> Result<Vec<Vec<i64>>> {
        self.skip_whitespace();
        if self.peek() != Some('[') {
            return Err(self.error("expected '[' opening the matrix literal"));
        }
        self.list(|parser| {
            if parser.peek() != Some('[') {
                return Err(parser.error("expected '[' opening a matrix row"));
            }
            parser.list(Self::integer)
        })
    }

    /// `'[' (item (',' item)* ','?)? ']'`, with the cursor on the `[`.
    fn list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let open_line = self.line;
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(items);
                }
                Some(_) => items.push(item(self)?),
                None => return Err(self.error_at(open_line, "unbalanced '[' in matrix literal")),
            }
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {}
                Some(c) => return Err(self.error(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error_at(open_line, "unbalanced '[' in matrix literal")),
            }
        }
    }

    fn integer(&mut self) -> Result<i64> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        if text.is_empty() || text == "-" {
            let found = self.peek().map_or("end of input".to_string(), |c| format!("'{c}'"));
            return Err(self.error(format!("expected integer, found {found}")));
        }
        text.parse()
            .map_err(|_| self.error(format!("integer literal '{text}' out of range")))
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected '{c}' after the matrix literal"))),
        }
    }
}

/// Recognize `<ident> =` at the start of a line, returning the identifier
/// and the byte offset of the `=`.
fn split_assignment(line: &str) -> Option<(&str, usize)> {
    let indent = line.len() - line.trim_start().len();
    let rest = &line[indent..];
    let ident_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if ident_len == 0 {
        return None;
    }
    let after = &rest[ident_len..];
    let gap = after.len() - after.trim_start().len();
    after[gap..]
        .starts_with('=')
        .then(|| (&rest[..ident_len], indent + ident_len + gap))
}
