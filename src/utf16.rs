//! The generic `utf-16` codec.
//!
//! Encoding delegates to a concrete BE or LE encoder picked by `use` and asks
//! it for a BOM unless `addBOM` is `false`. Decoding buffers the first
//! [`DETECTION_THRESHOLD`] bytes, decides the byte order once and then forwards
//! everything to the chosen concrete decoder.

use std::sync::Arc;

use tracing::debug;

use crate::codec::{Codec, Decoder, DecoderOptions, Encoder, EncoderOptions};
use crate::detection::{self, DETECTION_THRESHOLD};
use crate::registry::CodecLookup;
use crate::{Encoding, Error, Result};

/// Encoding used when `use` / `default` are not given (RFC 2781)
pub const DEFAULT_ENCODING: &str = "utf-16be";

/// Auto-detecting UTF-16 codec
pub struct Utf16Codec {
    lookup: Arc<dyn CodecLookup>,
}

impl Utf16Codec {
    /// Create the codec on top of the lookup that supplies concrete codecs
    pub fn new(lookup: Arc<dyn CodecLookup>) -> Self {
        Self { lookup }
    }
}

impl Codec for Utf16Codec {
    fn encoder(&self, options: &EncoderOptions) -> Result<Box<dyn Encoder>> {
        let mut options = options.clone();
        options.add_bom.get_or_insert(true);
        let target = options.use_encoding.as_deref().unwrap_or(DEFAULT_ENCODING);
        self.lookup.get_encoder(concrete(target)?, &options)
    }

    fn decoder(&self, options: &DecoderOptions) -> Result<Box<dyn Decoder>> {
        Ok(Box::new(Utf16Decoder::new(Arc::clone(&self.lookup), options.clone())))
    }

    /// BOM handling belongs to whichever concrete codec gets picked.
    fn bom_aware(&self) -> bool {
        false
    }
}

/// `use` and `default` must name a byte order, never the generic codec itself
fn concrete(name: &str) -> Result<&str> {
    match Encoding::from_name(name)? {
        Encoding::Utf16 => Err(Error::UnsupportedEncoding(name.to_string())),
        _ => Ok(name),
    }
}

enum State {
    Buffering { chunks: Vec<Vec<u8>>, len: usize },
    Resolved(Box<dyn Decoder>),
}

/// Decoder that picks its byte order from the start of the stream
pub struct Utf16Decoder {
    lookup: Arc<dyn CodecLookup>,
    options: DecoderOptions,
    state: State,
}

impl Utf16Decoder {
    /// Create a decoder in the buffering state
    pub fn new(lookup: Arc<dyn CodecLookup>, options: DecoderOptions) -> Self {
        Self {
            lookup,
            options,
            state: State::Buffering { chunks: Vec::new(), len: 0 },
        }
    }

    /// Whether the byte order has been decided
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }

    /// Decide the byte order from everything buffered and feed it to the new decoder.
    ///
    /// With fewer than two bytes nothing is decided and the buffer is dropped.
    fn resolve(&mut self) -> Result<Vec<u16>> {
        let State::Buffering { chunks, len } = &mut self.state else {
            return Ok(Vec::new());
        };
        let buffered = std::mem::take(chunks).concat();
        *len = 0;

        let default = self.options.default.as_deref().unwrap_or(DEFAULT_ENCODING);
        let Some(encoding) = detection::decide(&buffered, default) else {
            debug!(buffered = buffered.len(), "too few bytes to decide UTF-16 byte order");
            return Ok(Vec::new());
        };
        debug!(encoding, buffered = buffered.len(), "resolved UTF-16 byte order");

        let mut decoder = self.lookup.get_decoder(concrete(encoding)?, &self.options)?;
        let output = decoder.write(&buffered)?;
        self.state = State::Resolved(decoder);
        Ok(output)
    }
}

impl Decoder for Utf16Decoder {
    fn write(&mut self, bytes: &[u8]) -> Result<Vec<u16>> {
        match &mut self.state {
            State::Resolved(decoder) => decoder.write(bytes),
            State::Buffering { chunks, len } => {
                if !bytes.is_empty() {
                    chunks.push(bytes.to_vec());
                    *len += bytes.len();
                }
                if *len < DETECTION_THRESHOLD {
                    return Ok(Vec::new());
                }
                self.resolve()
            }
        }
    }

    fn end(&mut self) -> Result<Vec<u16>> {
        if let State::Resolved(decoder) = &mut self.state {
            return decoder.end();
        }

        let mut output = self.resolve()?;
        if let State::Resolved(decoder) = &mut self.state {
            output.extend(decoder.end()?);
        }
        Ok(output)
    }
}
