//! Codec, encoder and decoder contracts shared by every UTF-16 variant.
//!
//! An [`Encoder`] or [`Decoder`] is created per stream, receives any number of
//! `write` calls and is finished with exactly one `end` call. Output fragments
//! concatenated in call order equal the one-shot conversion of the whole input.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Turns 16-bit code units into bytes
pub trait Encoder {
    /// Encode the next piece of text
    fn write(&mut self, text: &[u16]) -> Result<Vec<u8>>;

    /// Flush any retained state at end of stream
    fn end(&mut self) -> Result<Vec<u8>>;
}

/// Turns bytes into 16-bit code units
pub trait Decoder {
    /// Decode the next chunk of bytes, holding back partial code units
    fn write(&mut self, bytes: &[u8]) -> Result<Vec<u16>>;

    /// Flush any retained state at end of stream
    fn end(&mut self) -> Result<Vec<u16>>;
}

/// Factory for the encoders and decoders of one encoding
pub trait Codec {
    /// Create an encoder for a new stream
    fn encoder(&self, options: &EncoderOptions) -> Result<Box<dyn Encoder>>;

    /// Create a decoder for a new stream
    fn decoder(&self, options: &DecoderOptions) -> Result<Box<dyn Decoder>>;

    /// Whether the byte-order mark of this codec is meaningful.
    ///
    /// The registry only applies `addBOM` / `stripBOM` to codecs that answer `true`.
    fn bom_aware(&self) -> bool;
}

/// Encoder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Prepend a BOM to the output; the generic `utf-16` codec treats unset as `true`
    #[serde(rename = "addBOM", skip_serializing_if = "Option::is_none")]
    pub add_bom: Option<bool>,
    /// Concrete encoding the generic `utf-16` codec encodes with
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_encoding: Option<String>,
}

impl EncoderOptions {
    /// Set whether a BOM is prepended
    pub fn with_add_bom(mut self, add_bom: bool) -> Self {
        self.add_bom = Some(add_bom);
        self
    }

    /// Set the concrete encoding for the generic codec
    pub fn with_use(mut self, encoding: impl Into<String>) -> Self {
        self.use_encoding = Some(encoding.into());
        self
    }
}

/// Decoder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Fallback encoding when neither a BOM nor the heuristic decides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Drop a leading BOM from the output; unset means `true`
    #[serde(rename = "stripBOM", skip_serializing_if = "Option::is_none")]
    pub strip_bom: Option<bool>,
}

impl DecoderOptions {
    /// Set the fallback encoding
    pub fn with_default(mut self, encoding: impl Into<String>) -> Self {
        self.default = Some(encoding.into());
        self
    }

    /// Set whether a leading BOM is dropped
    pub fn with_strip_bom(mut self, strip_bom: bool) -> Self {
        self.strip_bom = Some(strip_bom);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options: EncoderOptions =
            serde_json::from_str(r#"{"addBOM": false, "use": "utf-16le"}"#).unwrap();
        assert_eq!(options, EncoderOptions::default().with_add_bom(false).with_use("utf-16le"));

        let options: DecoderOptions = serde_json::from_str(r#"{"default": "utf-16le"}"#).unwrap();
        assert_eq!(options.default.as_deref(), Some("utf-16le"));
        assert_eq!(options.strip_bom, None);
    }

    #[test]
    fn test_options_to_json_skips_unset() {
        let json = serde_json::to_string(&DecoderOptions::default().with_strip_bom(false)).unwrap();
        assert_eq!(json, r#"{"stripBOM":false}"#);
        assert_eq!(serde_json::to_string(&EncoderOptions::default()).unwrap(), "{}");
    }
}
