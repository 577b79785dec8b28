//! Tagged-group stream reader.
//!
//! A DXF record is a pair of lines: an integer group code and a value
//! string. The reader is a lazy producer of those pairs; it keeps no parse
//! state beyond the line counter.

use encoding_rs::Encoding;
use std::io::{BufRead, BufReader, Read};

use crate::error::{DxfError, Result};

/// One tagged group: `(code, value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub code: i32,
    pub value: String,
}

/// Reads `(code, value)` line pairs from a byte stream.
pub struct DxfPairReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    /// Fallback encoding for non-UTF8 lines. `None` means Latin-1
    /// (byte-to-char) mapping.
    encoding: Option<&'static Encoding>,
}

impl<R: Read> DxfPairReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
            line_number: 0,
            encoding: None,
        }
    }

    /// Set the fallback encoding used when a line is not valid UTF-8.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }

    /// Read one trimmed line, decoding non-UTF8 bytes through the fallback
    /// encoding. Returns `None` at EOF.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let n = self.reader.read_until(b'\n', &mut bytes)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => {
                let bytes = err.into_bytes();
                if let Some(encoding) = self.encoding {
                    let (decoded, _, _) = encoding.decode(&bytes);
                    decoded.into_owned()
                } else {
                    bytes.iter().map(|&b| b as char).collect()
                }
            }
        };
        Ok(Some(line.trim().trim_start_matches('\u{feff}').to_string()))
    }

    /// Read the next `(code, value)` pair, or `None` at a clean EOF.
    pub fn read_pair(&mut self) -> Result<Option<TagPair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let code = code_line.parse::<i32>().map_err(|_| DxfError::MalformedStream {
            line: self.line_number,
            message: format!("group code '{}' is not an integer", code_line),
        })?;
        let value = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(DxfError::MalformedStream {
                    line: self.line_number,
                    message: format!("unexpected EOF after group code {}", code),
                })
            }
        };
        Ok(Some(TagPair { code, value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &str) -> DxfPairReader<Cursor<Vec<u8>>> {
        DxfPairReader::new(Cursor::new(data.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_simple_pair() {
        let mut r = reader("0\nSECTION\n");
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.value, "SECTION");
        assert!(r.read_pair().unwrap().is_none());
    }

    #[test]
    fn test_whitespace_and_crlf() {
        let mut r = reader("  10 \r\n  42.5\r\n");
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 10);
        assert_eq!(pair.value, "42.5");
    }

    #[test]
    fn test_non_integer_code_is_fatal() {
        let mut r = reader("LINE\n0\n");
        assert!(matches!(
            r.read_pair(),
            Err(DxfError::MalformedStream { line: 1, .. })
        ));
    }

    #[test]
    fn test_truncated_pair_is_fatal() {
        let mut r = reader("0\nSECTION\n2\n");
        r.read_pair().unwrap();
        assert!(matches!(
            r.read_pair(),
            Err(DxfError::MalformedStream { .. })
        ));
    }

    #[test]
    fn test_latin1_fallback() {
        let mut bytes = b"1\n".to_vec();
        bytes.push(0xD8); // 'Ø' in Latin-1
        bytes.push(b'\n');
        let mut r = DxfPairReader::new(Cursor::new(bytes));
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "\u{00D8}");
    }

    #[test]
    fn test_configured_encoding() {
        // 0x80 is the euro sign in windows-1252
        let mut bytes = b"1\n".to_vec();
        bytes.push(0x80);
        bytes.push(b'\n');
        let mut r = DxfPairReader::new(Cursor::new(bytes));
        r.set_encoding(encoding_rs::WINDOWS_1252);
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "\u{20AC}");
    }
}
