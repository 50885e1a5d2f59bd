//! Incremental UTF-8 decoding over a buffered byte stream.
//!
//! The scanner never needs more than one character of lookahead, so the reader keeps a single
//! peek slot and decodes byte by byte. Multi-byte sequences may straddle buffer refills.

use std::io::{self, BufRead};

#[derive(Debug)]
pub enum ReadError {
    /// The underlying stream failed for a reason other than exhaustion.
    Io(io::Error),
    /// The bytes at the cursor are not a valid UTF-8 encoded scalar value.
    InvalidEncoding(Vec<u8>),
}

pub struct CharReader<R> {
    inner: R,
    peeked: Option<Option<char>>,
}

impl<R: BufRead> CharReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, peeked: None }
    }

    /// Consumes and returns the next character, `None` once the stream is exhausted.
    pub fn read_char(&mut self) -> Result<Option<char>, ReadError> {
        match self.peeked.take() {
            Some(peeked) => Ok(peeked),
            None => self.decode(),
        }
    }

    /// Returns the next character without consuming it.
    pub fn peek_char(&mut self) -> Result<Option<char>, ReadError> {
        if let Some(peeked) = self.peeked {
            return Ok(peeked);
        }
        let ch = self.decode()?;
        self.peeked = Some(ch);
        Ok(ch)
    }

    fn decode(&mut self) -> Result<Option<char>, ReadError> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };

        let width = sequence_width(lead);
        if width == 0 {
            return Err(ReadError::InvalidEncoding(vec![lead]));
        }

        let mut bytes = [lead, 0, 0, 0];
        for i in 1..width {
            match self.next_byte()? {
                Some(byte) => bytes[i] = byte,
                None => return Err(ReadError::InvalidEncoding(bytes[..i].to_vec())),
            }
        }

        match bstr::decode_utf8(&bytes[..width]) {
            (Some(ch), size) if size == width => Ok(Some(ch)),
            _ => Err(ReadError::InvalidEncoding(bytes[..width].to_vec())),
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ReadError> {
        loop {
            let byte = match self.inner.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError::Io(e)),
            };
            if byte.is_some() {
                self.inner.consume(1);
            }
            return Ok(byte);
        }
    }
}

/// Length of the sequence a lead byte announces, 0 if it cannot start one.
fn sequence_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out its input one byte per `fill_buf` to exercise sequences split across refills.
    struct Trickle<'a> {
        bytes: &'a [u8],
    }

    impl io::Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.bytes.len().min(buf.len()).min(1);
            buf[..n].copy_from_slice(&self.bytes[..n]);
            self.bytes = &self.bytes[n..];
            Ok(n)
        }
    }

    impl BufRead for Trickle<'_> {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Ok(&self.bytes[..self.bytes.len().min(1)])
        }

        fn consume(&mut self, amt: usize) {
            self.bytes = &self.bytes[amt..];
        }
    }

    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    impl BufRead for Broken {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    fn read_all<R: BufRead>(reader: &mut CharReader<R>) -> String {
        let mut out = String::new();
        while let Some(ch) = reader.read_char().unwrap() {
            out.push(ch);
        }
        out
    }

    #[test]
    fn decodes_multibyte_characters() {
        let mut reader = CharReader::new("aé€😀".as_bytes());
        assert_eq!(read_all(&mut reader), "aé€😀");
        assert_eq!(reader.read_char().unwrap(), None);
    }

    #[test]
    fn decodes_sequences_split_across_refills() {
        let input = "λx → 😀";
        let mut reader = CharReader::new(Trickle { bytes: input.as_bytes() });
        assert_eq!(read_all(&mut reader), input);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut reader = CharReader::new("0x".as_bytes());
        assert_eq!(reader.read_char().unwrap(), Some('0'));
        assert_eq!(reader.peek_char().unwrap(), Some('x'));
        assert_eq!(reader.peek_char().unwrap(), Some('x'));
        assert_eq!(reader.read_char().unwrap(), Some('x'));
        assert_eq!(reader.peek_char().unwrap(), None);
        assert_eq!(reader.read_char().unwrap(), None);
    }

    #[test]
    fn rejects_invalid_lead_byte() {
        let mut reader = CharReader::new(&[b'a', 0xFF, b'b'][..]);
        assert_eq!(reader.read_char().unwrap(), Some('a'));
        match reader.read_char() {
            Err(ReadError::InvalidEncoding(bytes)) => assert_eq!(bytes, vec![0xFF]),
            other => panic!("expected invalid encoding, got {other:?}"),
        }
    }

    #[test]
    fn rejects_truncated_sequence() {
        let mut reader = CharReader::new(&[0xE2, 0x82][..]);
        match reader.read_char() {
            Err(ReadError::InvalidEncoding(bytes)) => assert_eq!(bytes, vec![0xE2, 0x82]),
            other => panic!("expected invalid encoding, got {other:?}"),
        }
    }

    #[test]
    fn rejects_surrogates_and_bad_continuations() {
        // An encoded UTF-16 surrogate half.
        let mut reader = CharReader::new(&[0xED, 0xA0, 0x80][..]);
        assert!(matches!(reader.read_char(), Err(ReadError::InvalidEncoding(_))));

        let mut reader = CharReader::new(&[0xC3, b'a'][..]);
        assert!(matches!(reader.peek_char(), Err(ReadError::InvalidEncoding(_))));
    }

    #[test]
    fn surfaces_io_failures() {
        let mut reader = CharReader::new(Broken);
        match reader.read_char() {
            Err(ReadError::Io(e)) => assert_eq!(e.to_string(), "disk on fire"),
            other => panic!("expected io failure, got {other:?}"),
        }
    }
}
