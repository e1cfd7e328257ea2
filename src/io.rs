use std::io::{self, BufRead, Read};

/// Source for the two input instructions. `Ok(None)` means end of input.
pub trait Input {
    /// Read one line, without its terminator.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Read one character.
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

/// [`Input`] over any buffered reader.
pub struct StreamInput<R> {
    reader: R,
}

impl<R: BufRead> StreamInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

impl<R: BufRead> Input for StreamInput<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Reads bytes until they form one complete UTF-8 scalar.
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 4];
        for len in 1..=buf.len() {
            match self.read_byte()? {
                Some(byte) => buf[len - 1] = byte,
                None if len == 1 => return Ok(None),
                None => return Err(invalid_utf8()),
            }
            match std::str::from_utf8(&buf[..len]) {
                Ok(s) => return Ok(s.chars().next()),
                // Incomplete sequence: keep reading.
                Err(e) if e.error_len().is_none() => {}
                Err(_) => return Err(invalid_utf8()),
            }
        }
        Err(invalid_utf8())
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "input is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_strips_terminator() {
        let mut input = StreamInput::new(&b"12\r\n34\n5"[..]);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("12"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("34"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("5"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_char_decodes_utf8() {
        let mut input = StreamInput::new("aé€".as_bytes());
        assert_eq!(input.read_char().unwrap(), Some('a'));
        assert_eq!(input.read_char().unwrap(), Some('é'));
        assert_eq!(input.read_char().unwrap(), Some('€'));
        assert_eq!(input.read_char().unwrap(), None);
    }

    #[test]
    fn test_read_char_rejects_stray_continuation_byte() {
        let mut input = StreamInput::new(&[0x80u8, b'a'][..]);
        let err = input.read_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_char_rejects_truncated_sequence() {
        // First two bytes of a three-byte character, then end of input.
        let mut input = StreamInput::new(&[0xE2u8, 0x82][..]);
        let err = input.read_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_mixed_line_and_char_reads() {
        let mut input = StreamInput::new(&b"x42\ny"[..]);
        assert_eq!(input.read_char().unwrap(), Some('x'));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("42"));
        assert_eq!(input.read_char().unwrap(), Some('y'));
    }
}
