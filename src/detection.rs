//! Byte order detection for BOM-less and BOM-carrying UTF-16 streams.
//!
//! A BOM is authoritative. Without one, the first bytes are scanned for ASCII
//! space (U+0020) in both byte orders: real text is full of spaces, while the
//! swapped unit U+2000 is rare. Anything inconclusive falls back to a default.

use serde::Serialize;

/// Bytes the generic decoder buffers before deciding
pub const DETECTION_THRESHOLD: usize = 16;

/// Maximum number of bytes the space heuristic looks at
pub const HEURISTIC_WINDOW: usize = 64;

const BE_BOM: [u8; 2] = [0xFE, 0xFF];
const LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Byte order of a UTF-16 stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

impl Endianness {
    /// Canonical name of the concrete codec for this byte order
    pub fn encoding_name(self) -> &'static str {
        match self {
            Endianness::Big => "utf-16be",
            Endianness::Little => "utf-16le",
        }
    }
}

/// What the start of a stream says about its byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evidence {
    /// Byte order announced by a leading BOM
    pub bom: Option<Endianness>,
    /// Aligned `00 20` pairs in the window
    pub spaces_be: usize,
    /// Aligned `20 00` pairs in the window
    pub spaces_le: usize,
    /// Bytes scanned by the heuristic; zero when a BOM settled it
    pub window: usize,
}

impl Evidence {
    /// Byte order the evidence points to, if it is conclusive
    pub fn verdict(&self) -> Option<Endianness> {
        if self.bom.is_some() {
            return self.bom;
        }

        match (self.spaces_be > 0, self.spaces_le > 0) {
            (true, false) => Some(Endianness::Big),
            (false, true) => Some(Endianness::Little),
            _ => None,
        }
    }
}

/// Gather evidence from the start of a stream.
///
/// Returns `None` when fewer than two bytes are available.
pub fn analyze(buffer: &[u8]) -> Option<Evidence> {
    if buffer.len() < 2 {
        return None;
    }

    let bom = match [buffer[0], buffer[1]] {
        BE_BOM => Some(Endianness::Big),
        LE_BOM => Some(Endianness::Little),
        _ => None,
    };
    if bom.is_some() {
        return Some(Evidence { bom, spaces_be: 0, spaces_le: 0, window: 0 });
    }

    let window = (buffer.len() - buffer.len() % 2).min(HEURISTIC_WINDOW);
    let (mut spaces_be, mut spaces_le) = (0, 0);
    for pair in buffer[..window].chunks_exact(2) {
        match pair {
            [0x00, 0x20] => spaces_be += 1,
            [0x20, 0x00] => spaces_le += 1,
            _ => {}
        }
    }

    Some(Evidence { bom: None, spaces_be, spaces_le, window })
}

/// Choose the concrete encoding for a stream starting with `buffer`.
///
/// Priority is BOM, then the space heuristic, then `default`. Returns `None`
/// when there is not enough data to decode anything.
pub fn decide<'a>(buffer: &[u8], default: &'a str) -> Option<&'a str> {
    let evidence = analyze(buffer)?;
    Some(evidence.verdict().map_or(default, |order| order.encoding_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data() {
        assert_eq!(decide(&[], "utf-16be"), None);
        assert_eq!(decide(&[0xFE], "utf-16be"), None);
    }

    #[test]
    fn test_bom_decides() {
        assert_eq!(decide(&[0xFE, 0xFF], "utf-16le"), Some("utf-16be"));
        assert_eq!(decide(&[0xFF, 0xFE], "utf-16be"), Some("utf-16le"));
    }

    #[test]
    fn test_bom_beats_heuristic() {
        let buffer = [0xFE, 0xFF, 0x20, 0x00, 0x20, 0x00, 0x41, 0x00];
        assert_eq!(decide(&buffer, "utf-16le"), Some("utf-16be"));
    }

    #[test]
    fn test_space_heuristic() {
        let be: Vec<u8> = "a b c".encode_utf16().flat_map(u16::to_be_bytes).collect();
        let le: Vec<u8> = "a b c".encode_utf16().flat_map(u16::to_le_bytes).collect();
        assert_eq!(decide(&be, "utf-16le"), Some("utf-16be"));
        assert_eq!(decide(&le, "utf-16be"), Some("utf-16le"));

        let evidence = analyze(&le).unwrap();
        assert_eq!((evidence.spaces_be, evidence.spaces_le, evidence.window), (0, 2, 10));
    }

    #[test]
    fn test_ambiguous_falls_back_to_default() {
        // One space in each orientation
        let buffer = [0x00, 0x20, 0x20, 0x00];
        assert_eq!(decide(&buffer, "utf-16le"), Some("utf-16le"));

        // No spaces at all
        let buffer = [0x41; 64];
        assert_eq!(decide(&buffer, "utf-16be"), Some("utf-16be"));
        assert_eq!(decide(&buffer, "utf-16le"), Some("utf-16le"));
    }

    #[test]
    fn test_only_aligned_pairs_count() {
        // `00 20` straddles the pair boundary
        let buffer = [0x41, 0x00, 0x20, 0x41];
        assert_eq!(analyze(&buffer).unwrap().verdict(), None);
    }

    #[test]
    fn test_window_limits() {
        // Odd length is truncated to even
        let buffer = [0x41, 0x41, 0x00];
        assert_eq!(analyze(&buffer).unwrap().window, 2);

        // A space past the first 64 bytes is ignored
        let mut buffer = vec![0x41; 64];
        buffer.extend([0x20, 0x00]);
        let evidence = analyze(&buffer).unwrap();
        assert_eq!(evidence.window, HEURISTIC_WINDOW);
        assert_eq!(evidence.verdict(), None);
    }
}
