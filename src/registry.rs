//! Resolves encoding names to codecs and applies the BOM policy.

use std::sync::Arc;

use tracing::trace;

use crate::be::Utf16BeCodec;
use crate::bom::{PrependBom, StripBom};
use crate::codec::{Codec, Decoder, DecoderOptions, Encoder, EncoderOptions};
use crate::le::Utf16LeCodec;
use crate::utf16::Utf16Codec;
use crate::{Encoding, Result};

/// Source of encoders and decoders by encoding name
pub trait CodecLookup {
    /// Create an encoder for `name`, failing for unknown encodings
    fn get_encoder(&self, name: &str, options: &EncoderOptions) -> Result<Box<dyn Encoder>>;

    /// Create a decoder for `name`, failing for unknown encodings
    fn get_decoder(&self, name: &str, options: &DecoderOptions) -> Result<Box<dyn Decoder>>;
}

/// Built-in codec registry for the UTF-16 family
///
/// BOM-aware codecs get their encoders wrapped in [`PrependBom`] when
/// `addBOM` is `true`, and their decoders wrapped in [`StripBom`] unless
/// `stripBOM` is `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry;

impl Registry {
    /// Create a registry
    pub fn new() -> Self {
        Self
    }

    /// Look up the codec for an encoding name
    pub fn codec(&self, name: &str) -> Result<Box<dyn Codec>> {
        let encoding = Encoding::from_name(name)?;
        trace!(requested = name, resolved = encoding.name(), "codec lookup");

        let codec: Box<dyn Codec> = match encoding {
            Encoding::Utf16Be => Box::new(Utf16BeCodec),
            Encoding::Utf16Le => Box::new(Utf16LeCodec),
            Encoding::Utf16 => Box::new(Utf16Codec::new(Arc::new(*self))),
        };
        Ok(codec)
    }
}

impl CodecLookup for Registry {
    fn get_encoder(&self, name: &str, options: &EncoderOptions) -> Result<Box<dyn Encoder>> {
        let codec = self.codec(name)?;
        let encoder = codec.encoder(options)?;
        if codec.bom_aware() && options.add_bom == Some(true) {
            return Ok(Box::new(PrependBom::new(encoder)));
        }
        Ok(encoder)
    }

    fn get_decoder(&self, name: &str, options: &DecoderOptions) -> Result<Box<dyn Decoder>> {
        let codec = self.codec(name)?;
        let decoder = codec.decoder(options)?;
        if codec.bom_aware() && options.strip_bom != Some(false) {
            return Ok(Box::new(StripBom::new(decoder)));
        }
        Ok(decoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_unknown_name() {
        let registry = Registry::new();
        assert!(matches!(
            registry.get_encoder("latin1", &EncoderOptions::default()),
            Err(Error::UnsupportedEncoding(name)) if name == "latin1"
        ));
        assert!(registry.get_decoder("utf-32", &DecoderOptions::default()).is_err());
    }

    #[test]
    fn test_bom_aware_flags() {
        let registry = Registry::new();
        assert!(registry.codec("utf-16be").unwrap().bom_aware());
        assert!(registry.codec("utf-16le").unwrap().bom_aware());
        assert!(!registry.codec("utf-16").unwrap().bom_aware());
    }

    #[test]
    fn test_concrete_encoder_bom_is_opt_in() {
        let registry = Registry::new();
        let mut encoder = registry.get_encoder("utf-16be", &EncoderOptions::default()).unwrap();
        assert_eq!(encoder.write(&[0x41]).unwrap(), [0x00, 0x41]);

        let options = EncoderOptions::default().with_add_bom(true);
        let mut encoder = registry.get_encoder("UTF16LE", &options).unwrap();
        assert_eq!(encoder.write(&[0x41]).unwrap(), [0xFF, 0xFE, 0x41, 0x00]);
    }

    #[test]
    fn test_strip_bom_can_be_disabled() {
        let registry = Registry::new();
        let input = [0xFE, 0xFF, 0x00, 0x41];

        let mut decoder = registry.get_decoder("utf-16be", &DecoderOptions::default()).unwrap();
        assert_eq!(decoder.write(&input).unwrap(), [0x41]);

        let options = DecoderOptions::default().with_strip_bom(false);
        let mut decoder = registry.get_decoder("utf-16be", &options).unwrap();
        assert_eq!(decoder.write(&input).unwrap(), [0xFEFF, 0x41]);
    }

    #[test]
    fn test_generic_cannot_delegate_to_itself() {
        let registry = Registry::new();
        let options = EncoderOptions::default().with_use("utf-16");
        assert!(matches!(
            registry.get_encoder("utf-16", &options),
            Err(Error::UnsupportedEncoding(name)) if name == "utf-16"
        ));

        let options = DecoderOptions::default().with_default("utf-16");
        let mut decoder = registry.get_decoder("utf-16", &options).unwrap();
        assert!(decoder.write(&[0x41, 0x42, 0x43, 0x44]).unwrap().is_empty());
        assert_eq!(decoder.end(), Err(Error::UnsupportedEncoding("utf-16".to_string())));

        // A BOM settles the byte order before the default is consulted
        let mut decoder = registry.get_decoder("utf-16", &options).unwrap();
        decoder.write(&[0xFE, 0xFF, 0x00, 0x41]).unwrap();
        assert_eq!(decoder.end().unwrap(), [0x41]);
    }

    #[test]
    fn test_generic_keeps_bom_when_asked() {
        let registry = Registry::new();
        let options = DecoderOptions::default().with_strip_bom(false);
        let mut decoder = registry.get_decoder("utf-16", &options).unwrap();
        let mut output = decoder.write(&[0xFF, 0xFE, 0x41, 0x00]).unwrap();
        output.extend(decoder.end().unwrap());
        assert_eq!(output, [0xFEFF, 0x41]);
    }
}
