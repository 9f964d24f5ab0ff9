use std::io;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

/// One decoded protocol line. Bad lines are items, not stream errors, so a
/// session keeps reading after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    TooLong,
    InvalidUtf8,
}

/// Newline-delimited decoder in the manner of `LinesCodec`, except that an
/// oversized line is discarded up to its newline and reported once, and a
/// line that is not UTF-8 is reported instead of failing the stream.
#[derive(Debug)]
pub struct LineDecoder {
    max_length: usize,
    /// Bytes already searched for a newline.
    next_index: usize,
    /// Inside an oversized line; drop bytes until its newline.
    discarding: bool,
}

impl LineDecoder {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }
}

fn to_line(bytes: &[u8]) -> Line {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Line::Text(text.to_string()),
        Err(_) => Line::InvalidUtf8,
    }
}

impl Decoder for LineDecoder {
    type Item = Line;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Line>, io::Error> {
        let newline = buf[self.next_index..]
            .iter()
            .position(|b| *b == b'\n')
            .map(|offset| self.next_index + offset);

        match newline {
            Some(pos) if self.discarding || pos > self.max_length => {
                buf.advance(pos + 1);
                self.discarding = false;
                self.next_index = 0;
                Ok(Some(Line::TooLong))
            }
            Some(pos) => {
                let line = buf.split_to(pos + 1);
                self.next_index = 0;
                Ok(Some(to_line(&line[..pos])))
            }
            None if self.discarding || buf.len() > self.max_length => {
                buf.advance(buf.len());
                self.discarding = true;
                self.next_index = 0;
                Ok(None)
            }
            None => {
                self.next_index = buf.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Line>, io::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if self.discarding {
            self.discarding = false;
            buf.clear();
            return Ok(Some(Line::TooLong));
        }
        if buf.is_empty() {
            return Ok(None);
        }
        let line = buf.split_to(buf.len());
        Ok(Some(to_line(&line)))
    }
}
