//! # FastUTF16 - Streaming UTF-16 Transcoder
//!
//! Converts between 16-bit code unit text and UTF-16 byte streams in either
//! byte order, including a self-configuring `utf-16` codec that picks the
//! byte order from a byte-order mark or, failing that, from the bytes themselves.
//!
//! ## Features
//!
//! - **Chunk-safe streaming**: feed input in pieces of any size, down to one byte
//! - **BE and LE codecs** with optional BOM emission and stripping
//! - **Auto-detecting `utf-16` decoder** (BOM, then space heuristic, then a configurable default)
//! - **Lossless**: unpaired surrogates are carried through untouched
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_utf16::{decode, encode, DecoderOptions, EncoderOptions};
//!
//! // `utf-16` encodes big-endian with a BOM unless told otherwise
//! let bytes = encode("Hi", "utf-16", &EncoderOptions::default()).unwrap();
//! assert_eq!(bytes, [0xFE, 0xFF, 0x00, b'H', 0x00, b'i']);
//!
//! let text = decode(&bytes, "utf-16", &DecoderOptions::default()).unwrap();
//! assert_eq!(text, "Hi");
//! ```

#![deny(missing_docs)]

use thiserror::Error;

pub mod be;
pub mod bom;
pub mod codec;
pub mod detection;
pub mod le;
pub mod registry;
pub mod utf16;

pub use codec::{Codec, Decoder, DecoderOptions, Encoder, EncoderOptions};
pub use registry::{CodecLookup, Registry};

/// Result type for encoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during encoding operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The encoding name does not resolve to any known codec
    #[error("Encoding not recognized: '{0}'")]
    UnsupportedEncoding(String),
}

/// Supported character encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-16 big endian
    Utf16Be,
    /// UTF-16 little endian
    Utf16Le,
    /// UTF-16 with byte order chosen from a BOM or the content itself
    Utf16,
}

impl Encoding {
    /// Every encoding this crate can produce a codec for
    pub const ALL: [Encoding; 3] = [Encoding::Utf16Be, Encoding::Utf16Le, Encoding::Utf16];

    /// Get the canonical name of this encoding
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf16Be => "utf-16be",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16 => "utf-16",
        }
    }

    /// Naturalized names that resolve to this encoding
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Encoding::Utf16Be => &["utf16be"],
            Encoding::Utf16Le => &["utf16le", "ucs2"],
            Encoding::Utf16 => &["utf16"],
        }
    }

    /// Get the byte order mark (BOM) for this encoding if it has a fixed one
    pub fn bom(self) -> Option<&'static [u8]> {
        match self {
            Encoding::Utf16Be => Some(&[0xFE, 0xFF]),
            Encoding::Utf16Le => Some(&[0xFF, 0xFE]),
            Encoding::Utf16 => None,
        }
    }

    /// Resolve an encoding name.
    ///
    /// Matching ignores case and any character that is not an ASCII letter or
    /// digit, so `"UTF-16LE"`, `"utf_16le"` and `"utf16le"` are the same name.
    pub fn from_name(name: &str) -> Result<Self> {
        let natural = naturalize(name);
        Encoding::ALL
            .into_iter()
            .find(|encoding| encoding.aliases().iter().any(|alias| *alias == natural))
            .ok_or_else(|| Error::UnsupportedEncoding(name.to_owned()))
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Encoding::from_name(s)
    }
}

fn naturalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Check whether `name` resolves to a supported encoding
pub fn encoding_exists(name: &str) -> bool {
    Encoding::from_name(name).is_ok()
}

/// Encode code units in one shot
pub fn encode_units(text: &[u16], encoding: &str, options: &EncoderOptions) -> Result<Vec<u8>> {
    let mut encoder = Registry::new().get_encoder(encoding, options)?;
    let mut output = encoder.write(text)?;
    output.extend(encoder.end()?);
    Ok(output)
}

/// Encode a string in one shot
pub fn encode(text: &str, encoding: &str, options: &EncoderOptions) -> Result<Vec<u8>> {
    let units: Vec<u16> = text.encode_utf16().collect();
    encode_units(&units, encoding, options)
}

/// Decode bytes to code units in one shot, keeping unpaired surrogates
pub fn decode_units(bytes: &[u8], encoding: &str, options: &DecoderOptions) -> Result<Vec<u16>> {
    let mut decoder = Registry::new().get_decoder(encoding, options)?;
    let mut output = decoder.write(bytes)?;
    output.extend(decoder.end()?);
    Ok(output)
}

/// Decode bytes to a `String` in one shot.
///
/// Unpaired surrogates become U+FFFD; use [`decode_units`] to keep them.
pub fn decode(bytes: &[u8], encoding: &str, options: &DecoderOptions) -> Result<String> {
    Ok(String::from_utf16_lossy(&decode_units(bytes, encoding, options)?))
}

/// Streaming decoder producing UTF-8 text for processing large datasets
pub struct StreamingDecoder {
    decoder: Box<dyn Decoder>,
    /// Lead surrogate whose trail has not arrived yet
    lead: Option<u16>,
}

impl StreamingDecoder {
    /// Create a streaming decoder for the named encoding
    pub fn new(encoding: &str, options: &DecoderOptions) -> Result<Self> {
        Ok(Self::from_decoder(Registry::new().get_decoder(encoding, options)?))
    }

    /// Wrap an already constructed decoder
    pub fn from_decoder(decoder: Box<dyn Decoder>) -> Self {
        Self { decoder, lead: None }
    }

    /// Process a chunk of data
    pub fn process_chunk(&mut self, input: &[u8]) -> Result<String> {
        let units = self.decoder.write(input)?;
        Ok(self.to_text(units, false))
    }

    /// Flush whatever the decoder still holds
    pub fn finish(&mut self) -> Result<String> {
        let units = self.decoder.end()?;
        Ok(self.to_text(units, true))
    }

    fn to_text(&mut self, units: Vec<u16>, flush: bool) -> String {
        let mut joined = Vec::with_capacity(units.len() + 1);
        joined.extend(self.lead.take());
        joined.extend(units);

        if !flush && joined.last().is_some_and(|unit| (0xD800..=0xDBFF).contains(unit)) {
            self.lead = joined.pop();
        }

        String::from_utf16_lossy(&joined)
    }
}
