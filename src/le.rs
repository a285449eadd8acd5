//! Little-endian UTF-16 codec.

use crate::codec::{Codec, Decoder, DecoderOptions, Encoder, EncoderOptions};
use crate::Result;

/// UTF-16LE codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf16LeCodec;

impl Codec for Utf16LeCodec {
    fn encoder(&self, _options: &EncoderOptions) -> Result<Box<dyn Encoder>> {
        Ok(Box::new(LeEncoder))
    }

    fn decoder(&self, _options: &DecoderOptions) -> Result<Box<dyn Decoder>> {
        Ok(Box::new(LeDecoder::default()))
    }

    fn bom_aware(&self) -> bool {
        true
    }
}

/// Stateless UTF-16LE encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct LeEncoder;

impl Encoder for LeEncoder {
    fn write(&mut self, text: &[u16]) -> Result<Vec<u8>> {
        Ok(text.iter().flat_map(|unit| unit.to_le_bytes()).collect())
    }

    fn end(&mut self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// UTF-16LE decoder; an odd trailing byte waits for its partner
#[derive(Debug, Clone, Default)]
pub struct LeDecoder {
    pending: Option<u8>,
}

impl Decoder for LeDecoder {
    fn write(&mut self, bytes: &[u8]) -> Result<Vec<u16>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let mut output = Vec::with_capacity(bytes.len() / 2 + 1);
        let mut rest = bytes;

        if let Some(low) = self.pending.take() {
            output.push(u16::from_le_bytes([low, rest[0]]));
            rest = &rest[1..];
        }

        let mut pairs = rest.chunks_exact(2);
        output.extend(pairs.by_ref().map(|pair| u16::from_le_bytes([pair[0], pair[1]])));
        self.pending = pairs.remainder().first().copied();

        Ok(output)
    }

    fn end(&mut self) -> Result<Vec<u16>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_encode() {
        let mut encoder = LeEncoder;
        let text: Vec<u16> = "Hi€".encode_utf16().collect();
        assert_eq!(encoder.write(&text).unwrap(), [0x48, 0x00, 0x69, 0x00, 0xAC, 0x20]);
    }

    #[test]
    fn test_le_decode_byte_at_a_time() {
        let mut decoder = LeDecoder::default();
        let mut units = Vec::new();
        for byte in [0x48, 0x00, 0x3D, 0xD8, 0x00, 0xDE, 0x21] {
            units.extend(decoder.write(&[byte]).unwrap());
        }
        units.extend(decoder.end().unwrap());
        assert_eq!(String::from_utf16(&units).unwrap(), "H😀");
    }
}
