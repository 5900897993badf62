//! Text codec resolution and line reading for PO files.
//!
//! A PO file may be stored as UTF-8, UTF-16LE or UTF-16BE. The codec decides
//! both how bytes are decoded and which byte sequence terminates a line, and
//! that decision is made from the codec name alone.

use std::{
    fmt::{Display, Formatter},
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Read},
    path::Path,
    str::FromStr,
};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::Error;

/// The text codecs a PO file may be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepts any WHATWG label that resolves to one of the supported codecs,
/// e.g. `UTF-8`, `utf8`, `UTF-16LE`, `utf-16` (little endian) or `UTF-16BE`.
///
/// # Example
/// ```rust
/// use pocodec::encoding::TextEncoding;
/// use std::str::FromStr;
/// assert_eq!(TextEncoding::from_str("UTF-16BE").unwrap(), TextEncoding::Utf16Be);
/// assert!(TextEncoding::from_str("latin-1").is_err());
/// ```
impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoding =
            Encoding::for_label(s.trim().as_bytes()).ok_or_else(|| Error::unknown_encoding(s))?;
        if encoding == UTF_8 {
            Ok(TextEncoding::Utf8)
        } else if encoding == UTF_16LE {
            Ok(TextEncoding::Utf16Le)
        } else if encoding == UTF_16BE {
            Ok(TextEncoding::Utf16Be)
        } else {
            Err(Error::unknown_encoding(s))
        }
    }
}

impl TextEncoding {
    /// Canonical label of this codec.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }

    /// The exact byte sequence that ends a line under this codec.
    pub fn line_terminator(&self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => b"\n",
            TextEncoding::Utf16Le => b"\x0a\x00",
            TextEncoding::Utf16Be => b"\x00\x0a",
        }
    }

    /// Size in bytes of one code unit.
    pub fn code_unit_len(&self) -> usize {
        match self {
            TextEncoding::Utf8 => 1,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Utf16Le => UTF_16LE,
            TextEncoding::Utf16Be => UTF_16BE,
        }
    }

    /// Guesses the codec from the first bytes of a file.
    ///
    /// A byte order mark wins; otherwise a NUL in one of the first two bytes
    /// marks UTF-16 of the corresponding byte order. Anything else is UTF-8.
    ///
    /// UTF-16 without a BOM is only recognised when its first character is
    /// ASCII. Text starting with e.g. CJK needs an explicit codec.
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes {
            [0xFF, 0xFE, ..] => TextEncoding::Utf16Le,
            [0xFE, 0xFF, ..] => TextEncoding::Utf16Be,
            [0xEF, 0xBB, 0xBF, ..] => TextEncoding::Utf8,
            [a, 0x00, ..] if *a != 0 => TextEncoding::Utf16Le,
            [0x00, b, ..] if *b != 0 => TextEncoding::Utf16Be,
            _ => TextEncoding::Utf8,
        }
    }

    /// Detects the codec of the file at `path` by sniffing its first bytes.
    pub fn detect_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut file = File::open(path)?;
        let mut head = [0u8; 3];
        let filled = read_up_to(&mut file, &mut head)?;
        Ok(Self::sniff(&head[..filled]))
    }

    /// Resolves the codec for `path`: an explicit codec takes precedence over
    /// detection.
    pub fn resolve<P: AsRef<Path>>(
        path: P,
        explicit: Option<TextEncoding>,
    ) -> Result<Self, Error> {
        match explicit {
            Some(encoding) => Ok(encoding),
            None => Self::detect_from_path(path),
        }
    }

    /// Detects the codec of a buffered stream without consuming any bytes.
    pub fn detect_from_reader<R: BufRead>(reader: &mut R) -> Result<Self, Error> {
        let head = reader.fill_buf()?;
        Ok(Self::sniff(head))
    }

    /// Decodes one line of bytes, replacing malformed sequences.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, _) = self.encoding().decode_without_bom_handling(bytes);
        text.into_owned()
    }

    /// Encodes text for output. No byte order mark is written.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }
}

/// Iterates over the decoded lines of a byte stream.
///
/// Lines are split on [`TextEncoding::line_terminator`]; UTF-16 input is
/// consumed one code unit at a time so the terminator is only recognised on
/// a code unit boundary. The terminator and a trailing `\r` are removed, and
/// a byte order mark at the start of the stream is dropped.
pub struct LineReader<R> {
    reader: R,
    encoding: TextEncoding,
    at_start: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, encoding: TextEncoding) -> Self {
        Self {
            reader,
            encoding,
            at_start: true,
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Reads the raw bytes of the next line, without its terminator.
    /// Returns `None` at end of stream.
    fn read_raw_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        if self.encoding.code_unit_len() == 1 {
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            return Ok(Some(buf));
        }

        let terminator = self.encoding.line_terminator();
        let mut read_any = false;
        loop {
            let mut unit = [0u8; 2];
            let n = read_up_to(&mut self.reader, &mut unit)?;
            if n == 0 {
                break;
            }
            read_any = true;
            if n == 2 && unit[..] == *terminator {
                return Ok(Some(buf));
            }
            buf.extend_from_slice(&unit[..n]);
            if n < 2 {
                break;
            }
        }
        Ok(read_any.then_some(buf))
    }
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = match self.read_raw_line() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => return Some(Err(Error::Io(e))),
        };

        let mut line = if self.at_start {
            self.at_start = false;
            let (text, _) = self.encoding.encoding().decode_with_bom_removal(&raw);
            text.into_owned()
        } else {
            self.encoding.decode(&raw)
        };
        if line.ends_with('\r') {
            line.pop();
        }
        Some(Ok(line))
    }
}

/// Opens `path` for line reading under `encoding`.
pub fn open_lines<P: AsRef<Path>>(
    path: P,
    encoding: TextEncoding,
) -> Result<LineReader<BufReader<File>>, Error> {
    let file = File::open(path)?;
    Ok(LineReader::new(BufReader::new(file), encoding))
}
