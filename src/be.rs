//! Big-endian UTF-16 codec.
//!
//! Encoding lays each code unit out low byte first and then swaps every byte
//! pair in place. Decoding carries at most one byte from one write to the next,
//! so a code unit split across chunk boundaries is still assembled exactly once.

use crate::codec::{Codec, Decoder, DecoderOptions, Encoder, EncoderOptions};
use crate::Result;

/// UTF-16BE codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16BeCodec;

impl Codec for Utf16BeCodec {
    fn encoder(&self, _options: &EncoderOptions) -> Result<Box<dyn Encoder>> {
        Ok(Box::new(BeEncoder))
    }

    fn decoder(&self, _options: &DecoderOptions) -> Result<Box<dyn Decoder>> {
        Ok(Box::new(BeDecoder::new()))
    }

    fn bom_aware(&self) -> bool {
        true
    }
}

/// Stateless UTF-16BE encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct BeEncoder;

impl BeEncoder {
    /// Encode code units as big-endian byte pairs
    pub fn encode(text: &[u16]) -> Vec<u8> {
        let mut buf: Vec<u8> = text.iter().flat_map(|unit| unit.to_le_bytes()).collect();
        for pair in buf.chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
        buf
    }
}

impl Encoder for BeEncoder {
    fn write(&mut self, text: &[u16]) -> Result<Vec<u8>> {
        Ok(Self::encode(text))
    }

    fn end(&mut self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// UTF-16BE decoder
#[derive(Debug, Clone, Default)]
pub struct BeDecoder {
    /// High byte of a code unit whose low byte has not arrived yet
    pending: Option<u8>,
}

impl BeDecoder {
    /// Create a decoder at an even byte boundary
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte held over from the previous write, if the total seen so far is odd
    pub fn pending_byte(&self) -> Option<u8> {
        self.pending
    }

    fn decode_chunk(&mut self, bytes: &[u8]) -> Vec<u16> {
        if bytes.is_empty() {
            return Vec::new();
        }

        let mut output = Vec::with_capacity(bytes.len() / 2 + 1);
        let mut rest = bytes;

        if let Some(high) = self.pending.take() {
            output.push(u16::from_be_bytes([high, rest[0]]));
            rest = &rest[1..];
        }

        let mut pairs = rest.chunks_exact(2);
        output.extend(pairs.by_ref().map(|pair| u16::from_be_bytes([pair[0], pair[1]])));
        self.pending = pairs.remainder().first().copied();

        output
    }
}

impl Decoder for BeDecoder {
    fn write(&mut self, bytes: &[u8]) -> Result<Vec<u16>> {
        Ok(self.decode_chunk(bytes))
    }

    /// A lone trailing byte can never complete a code unit and is dropped.
    fn end(&mut self) -> Result<Vec<u16>> {
        Ok(Vec::new())
    }
}
