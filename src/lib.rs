//! A focused, pure-Rust DEFLATE (RFC 1951) decompressor core.
//!
//! This crate decodes raw DEFLATE streams — stored, fixed-Huffman and
//! dynamic-Huffman blocks, literal/length/distance back-references — into
//! an owned byte buffer. It does not speak zlib or gzip framing, does not
//! compress, and does not stream: callers hand it a complete input buffer
//! and get a complete output buffer (or a partial one, on error).
//!
//! The simplest entry point is [`inflate`]:
//!
//! ```
//! # fn main() -> Result<(), deflate_core::errors::InflateDecodeErrors> {
//! let compressed = [0x73, 0x04]; // fixed block containing 'A'
//! let out = deflate_core::inflate(&compressed)?;
//! assert_eq!(out, b"A");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

mod bitstream;
mod constants;
mod decoder;
pub mod errors;
mod huffman;
mod options;

pub use decoder::DeflateDecoder;
pub use errors::{DeflateErrorKind, InflateDecodeErrors};
pub use options::InflateOptions;

/// Decode a complete DEFLATE stream, returning the decompressed bytes.
pub fn inflate(src: &[u8]) -> Result<Vec<u8>, InflateDecodeErrors>
{
    DeflateDecoder::new(src).decode_deflate()
}

/// Decode a complete DEFLATE stream with caller-supplied [`InflateOptions`]
/// (currently, an output size cap).
pub fn inflate_with_options(
    src: &[u8], options: InflateOptions
) -> Result<Vec<u8>, InflateDecodeErrors>
{
    DeflateDecoder::new_with_options(src, options).decode_deflate()
}

/// Decode a complete DEFLATE stream directly into `dst`, appending to
/// whatever it already contains.
///
/// Unlike [`inflate`], a failure here does not roll back bytes already
/// appended to `dst`, and the error returned is the bare [`DeflateErrorKind`]
/// rather than [`InflateDecodeErrors`] — the caller already owns the
/// partial output in `dst`.
pub fn inflate_into(dst: &mut Vec<u8>, src: &[u8]) -> Result<(), DeflateErrorKind>
{
    DeflateDecoder::new(src).decode_deflate_into(dst)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn inflate_decodes_a_fixed_block_literal()
    {
        assert_eq!(inflate(&[0x73, 0x04]).unwrap(), b"A");
    }

    #[test]
    fn inflate_into_appends_to_existing_output()
    {
        let mut out = b"prefix-".to_vec();
        inflate_into(&mut out, &[0x73, 0x04]).unwrap();
        assert_eq!(out, b"prefix-A");
    }

    #[test]
    fn inflate_with_options_enforces_the_size_limit()
    {
        let mut input = alloc::vec![0b0000_0001_u8];
        input.extend_from_slice(&4_u16.to_le_bytes());
        input.extend_from_slice(&(!4_u16).to_le_bytes());
        input.extend_from_slice(b"abcd");

        let err = inflate_with_options(&input, InflateOptions::default().with_size_limit(1))
            .unwrap_err();
        assert!(matches!(
            err.error,
            DeflateErrorKind::OutputLimitExceeded(1, 4)
        ));
    }

    #[test]
    fn inflate_reports_partial_output_on_error()
    {
        // A stored block with a bad NLEN fails after the header is read
        // but before any bytes are copied, so partial output is empty.
        let mut input = alloc::vec![0b0000_0001_u8];
        input.extend_from_slice(&4_u16.to_le_bytes());
        input.extend_from_slice(&4_u16.to_le_bytes());
        input.extend_from_slice(b"abcd");

        let err = inflate(&input).unwrap_err();
        assert!(matches!(err.error, DeflateErrorKind::InvalidStoredBlock));
        assert!(err.data.is_empty());
    }
}
