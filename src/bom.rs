//! Byte-order mark handling for BOM-aware codecs.
//!
//! Both wrappers work on code units, so the same wrapper serves either byte order.

use tracing::trace;

use crate::codec::{Decoder, Encoder};
use crate::Result;

/// The BOM as a code unit (U+FEFF)
pub const BOM_UNIT: u16 = 0xFEFF;

/// Prepends U+FEFF to the first write of the wrapped encoder
pub struct PrependBom {
    inner: Box<dyn Encoder>,
    pending: bool,
}

impl PrependBom {
    /// Wrap an encoder
    pub fn new(inner: Box<dyn Encoder>) -> Self {
        Self { inner, pending: true }
    }
}

impl Encoder for PrependBom {
    fn write(&mut self, text: &[u16]) -> Result<Vec<u8>> {
        if !self.pending {
            return self.inner.write(text);
        }
        self.pending = false;

        trace!("prepending byte-order mark");
        let mut with_bom = Vec::with_capacity(text.len() + 1);
        with_bom.push(BOM_UNIT);
        with_bom.extend_from_slice(text);
        self.inner.write(&with_bom)
    }

    fn end(&mut self) -> Result<Vec<u8>> {
        self.inner.end()
    }
}

/// Drops a leading U+FEFF from the first non-empty output of the wrapped decoder
pub struct StripBom {
    inner: Box<dyn Decoder>,
    pass: bool,
}

impl StripBom {
    /// Wrap a decoder
    pub fn new(inner: Box<dyn Decoder>) -> Self {
        Self { inner, pass: false }
    }

    fn strip(&mut self, mut output: Vec<u16>) -> Vec<u16> {
        if self.pass || output.is_empty() {
            return output;
        }
        self.pass = true;

        if output[0] == BOM_UNIT {
            trace!("stripping byte-order mark");
            output.remove(0);
        }
        output
    }
}

impl Decoder for StripBom {
    fn write(&mut self, bytes: &[u8]) -> Result<Vec<u16>> {
        let output = self.inner.write(bytes)?;
        Ok(self.strip(output))
    }

    fn end(&mut self) -> Result<Vec<u16>> {
        let output = self.inner.end()?;
        Ok(self.strip(output))
    }
}
