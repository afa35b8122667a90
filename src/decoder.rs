//! Block decode, dynamic Huffman table construction, and the top-level
//! driver that loops compressed blocks until `BFINAL`.

use alloc::vec::Vec;

#[cfg(feature = "logging")]
use log::{debug, trace};

use crate::bitstream::BitStream;
use crate::constants::{
    fixed_dist_lengths, fixed_litlen_lengths, BASE_DISTANCES, BASE_LENGTHS, COPY_SLOP,
    EXTRA_DISTANCE_BITS, EXTRA_LENGTH_BITS, MAX_DIST_SYMS, MAX_LITLEN_SYMS, NUM_PRECODE_SYMS,
    PRECODE_LENS_PERMUTATION
};
use crate::errors::{DeflateErrorKind, InflateDecodeErrors};
use crate::huffman::HuffmanTable;
use crate::options::InflateOptions;

const BTYPE_STORED: u32 = 0;
const BTYPE_FIXED: u32 = 1;
const BTYPE_DYNAMIC: u32 = 2;

/// Decodes a single DEFLATE stream (RFC 1951), accumulating output into an
/// owned `Vec<u8>`.
pub struct DeflateDecoder<'a>
{
    stream:  BitStream<'a>,
    options: InflateOptions
}

impl<'a> DeflateDecoder<'a>
{
    /// Create a decoder over `data` with default options (no output limit).
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a>
    {
        DeflateDecoder::new_with_options(data, InflateOptions::default())
    }

    /// Create a decoder over `data` with caller-supplied [`InflateOptions`].
    pub fn new_with_options(data: &'a [u8], options: InflateOptions) -> DeflateDecoder<'a>
    {
        DeflateDecoder { stream: BitStream::new(data), options }
    }

    /// Decode the whole stream, returning the decompressed bytes.
    ///
    /// On failure, the error carries whatever output had already been
    /// produced; see [`InflateDecodeErrors`].
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let mut out = Vec::with_capacity(self.stream.remaining_bytes().saturating_mul(3).max(64));

        match self.run(&mut out)
        {
            Ok(()) => Ok(out),
            Err(error) => Err(InflateDecodeErrors::new(error, out))
        }
    }

    /// Decode the whole stream directly into `out`, appending to whatever
    /// it already contains. Unlike [`Self::decode_deflate`], a failure does
    /// not roll back bytes already appended to `out`.
    pub fn decode_deflate_into(&mut self, out: &mut Vec<u8>) -> Result<(), DeflateErrorKind>
    {
        self.run(out)
    }

    fn run(&mut self, out: &mut Vec<u8>) -> Result<(), DeflateErrorKind>
    {
        loop
        {
            let bfinal = self.stream.read_bits(1)? == 1;
            let btype = self.stream.read_bits(2)?;

            #[cfg(feature = "logging")]
            trace!("block header: bfinal={bfinal} btype={btype}");

            match btype
            {
                BTYPE_STORED => self.decode_stored_block(out)?,
                BTYPE_FIXED => self.decode_fixed_block(out)?,
                BTYPE_DYNAMIC => self.decode_dynamic_block(out)?,
                _ =>
                {
                    #[cfg(feature = "logging")]
                    debug!("rejecting reserved block type 3");
                    return Err(DeflateErrorKind::InvalidBlockType);
                }
            }

            if let Some(limit) = self.options.size_limit()
            {
                if out.len() > limit
                {
                    #[cfg(feature = "logging")]
                    debug!("output limit {limit} exceeded, produced {}", out.len());
                    return Err(DeflateErrorKind::OutputLimitExceeded(limit, out.len()));
                }
            }

            if bfinal
            {
                break;
            }
        }

        Ok(())
    }

    /// RFC 1951 §3.2.4: byte-align, then copy `LEN` literal bytes verbatim.
    fn decode_stored_block(&mut self, out: &mut Vec<u8>) -> Result<(), DeflateErrorKind>
    {
        self.stream.skip_remaining_bits_in_current_byte();

        let len = self.stream.read_bits(16)? as u16;
        let nlen = self.stream.read_bits(16)? as u16;

        if len != !nlen
        {
            #[cfg(feature = "logging")]
            debug!("stored block LEN/NLEN mismatch: len={len:#06x} nlen={nlen:#06x}");
            return Err(DeflateErrorKind::InvalidStoredBlock);
        }

        let start = out.len();
        out.resize(start + usize::from(len), 0);
        self.stream.read_bytes(out, start, usize::from(len))?;

        #[cfg(feature = "logging")]
        trace!("stored block: {len} bytes");

        Ok(())
    }

    /// RFC 1951 §3.2.6: literal/length and distance alphabets fixed at
    /// compile time, no table read from the stream.
    fn decode_fixed_block(&mut self, out: &mut Vec<u8>) -> Result<(), DeflateErrorKind>
    {
        let litlen_lengths = fixed_litlen_lengths();
        let dist_lengths = fixed_dist_lengths();

        let litlen_table = HuffmanTable::build(&litlen_lengths, MAX_LITLEN_SYMS)?;
        let dist_table = HuffmanTable::build(&dist_lengths, MAX_DIST_SYMS)?;

        self.decode_block_body(out, &litlen_table, &dist_table)
    }

    /// RFC 1951 §3.2.7: read the precode, use it to decode the literal/
    /// length and distance code-length sequences, then build both tables.
    fn decode_dynamic_block(&mut self, out: &mut Vec<u8>) -> Result<(), DeflateErrorKind>
    {
        let hlit = self.stream.read_bits(5)? as usize + 257;
        let hdist = self.stream.read_bits(5)? as usize + 1;
        let hclen = self.stream.read_bits(4)? as usize + 4;

        #[cfg(feature = "logging")]
        trace!("dynamic block: hlit={hlit} hdist={hdist} hclen={hclen}");

        let mut precode_lengths = [0_u8; NUM_PRECODE_SYMS];
        for &index in PRECODE_LENS_PERMUTATION.iter().take(hclen)
        {
            precode_lengths[usize::from(index)] = self.stream.read_bits(3)? as u8;
        }

        let precode_table = HuffmanTable::build(&precode_lengths, NUM_PRECODE_SYMS)?;

        let total = hlit + hdist;
        let mut unpacked = Vec::with_capacity(total);

        while unpacked.len() < total
        {
            let sym = precode_table.decode_symbol(&mut self.stream)?;

            match sym
            {
                0..=15 => unpacked.push(sym as u8),
                16 =>
                {
                    let &prev = unpacked.last().ok_or(DeflateErrorKind::InvalidRepeat)?;
                    let repeat = self.stream.read_bits(2)? + 3;
                    unpacked.resize(unpacked.len() + repeat as usize, prev);
                }
                17 =>
                {
                    let repeat = self.stream.read_bits(3)? + 3;
                    unpacked.resize(unpacked.len() + repeat as usize, 0);
                }
                18 =>
                {
                    let repeat = self.stream.read_bits(7)? + 11;
                    unpacked.resize(unpacked.len() + repeat as usize, 0);
                }
                _ =>
                {
                    #[cfg(feature = "logging")]
                    debug!("precode decoded out-of-range symbol {sym}");
                    return Err(DeflateErrorKind::InvalidCode);
                }
            }
        }

        if unpacked.len() > total
        {
            #[cfg(feature = "logging")]
            debug!("code-length sequence overran hlit+hdist ({total})");
            return Err(DeflateErrorKind::InvalidTable);
        }

        let litlen_table = HuffmanTable::build(&unpacked[..hlit], MAX_LITLEN_SYMS)?;
        let dist_table = HuffmanTable::build(&unpacked[hlit..], MAX_DIST_SYMS)?;

        self.decode_block_body(out, &litlen_table, &dist_table)
    }

    /// RFC 1951 §3.2.5: decode literal/length/distance symbols until
    /// end-of-block (257), expanding back-references as they're found.
    fn decode_block_body(
        &mut self, out: &mut Vec<u8>, litlen_table: &HuffmanTable, dist_table: &HuffmanTable
    ) -> Result<(), DeflateErrorKind>
    {
        loop
        {
            let sym = litlen_table.decode_symbol(&mut self.stream)?;

            if sym < 256
            {
                out.push(sym as u8);
            }
            else if sym == 256
            {
                return Ok(());
            }
            else
            {
                let length_index = usize::from(sym - 257);
                let Some(&base_length) = BASE_LENGTHS.get(length_index)
                else
                {
                    #[cfg(feature = "logging")]
                    debug!("length symbol {sym} has no base-length entry");
                    return Err(DeflateErrorKind::InvalidCode);
                };
                let length = base_length as usize
                    + self.stream.read_bits(EXTRA_LENGTH_BITS[length_index])? as usize;

                let dist_sym = dist_table.decode_symbol(&mut self.stream)?;
                let dist_index = usize::from(dist_sym);
                let Some(&base_distance) = BASE_DISTANCES.get(dist_index)
                else
                {
                    #[cfg(feature = "logging")]
                    debug!("distance symbol {dist_sym} has no base-distance entry");
                    return Err(DeflateErrorKind::InvalidCode);
                };
                let distance = base_distance as usize
                    + self.stream.read_bits(EXTRA_DISTANCE_BITS[dist_index])? as usize;

                copy_match(out, length, distance)?;
            }
        }
    }
}

/// Expand a single (length, distance) back-reference into `out`, which
/// already holds the bytes produced so far.
///
/// `distance` may equal `out.len()` (read from output offset 0) but must
/// not exceed it. Once `distance >= 8`, the copy runs in 8-byte chunks: the
/// source and destination windows of any one chunk never overlap because
/// they're at least `distance` bytes apart, and `distance >= 8` is at least
/// the chunk width.
fn copy_match(out: &mut Vec<u8>, length: usize, distance: usize) -> Result<(), DeflateErrorKind>
{
    let op = out.len();

    if distance == 0 || distance > op
    {
        #[cfg(feature = "logging")]
        debug!("back-reference distance {distance} invalid for {op} bytes of output so far");
        return Err(DeflateErrorKind::InvalidDistance);
    }

    let start = op - distance;

    out.reserve(length + COPY_SLOP);
    out.resize(op + length, 0);

    if distance >= 8
    {
        let mut i = 0;

        while i + 8 <= length
        {
            let mut chunk = [0_u8; 8];
            chunk.copy_from_slice(&out[start + i..start + i + 8]);
            out[op + i..op + i + 8].copy_from_slice(&chunk);
            i += 8;
        }
        while i < length
        {
            out[op + i] = out[start + i];
            i += 1;
        }
    }
    else
    {
        // Distance may be smaller than the match length (e.g. distance 1,
        // length 100 repeats the last byte); each byte must see the
        // previous byte's write before it copies, so this can't be
        // chunked.
        for i in 0..length
        {
            out[op + i] = out[start + i];
        }
    }

    Ok(())
}
