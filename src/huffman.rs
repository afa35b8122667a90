//! Canonical Huffman code table construction and decode.
//!
//! Builds a two-level lookup table from a vector of per-symbol code
//! lengths, following the canonical-Huffman assignment described in
//! zlib's `doc/algorithm.txt`: a 512-entry (2^9) primary table resolves
//! codes of length <= 9 in one lookup; codes longer than 9 bits indirect
//! through a 64-entry sub-table reached via a sentinel primary entry.
//!
//! Each 16-bit table entry packs `(value << 4) | code_length` in its low
//! bits; a primary entry whose code-length nibble is 10 is not a real
//! length-10 code (no code is ever written to the primary table with that
//! length — direct assignment only ever uses lengths 1..=9) but a pointer
//! to one of `links`, with `value` naming the sub-table index.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use log::debug;

use crate::bitstream::BitStream;
use crate::constants::MAX_CODE_LENGTH;
use crate::errors::DeflateErrorKind;

/// Sentinel code-length nibble marking an indirect (sub-table) primary entry.
const INDIRECT_SENTINEL: u16 = 10;
/// Width, in bits, of the primary lookup table (2^9 = 512 entries).
const PRIMARY_BITS: u32 = 9;
const PRIMARY_SIZE: usize = 1 << PRIMARY_BITS;
/// Width, in bits, of each sub-table (2^6 = 64 entries; `15 - 9 == 6`).
const LINK_BITS: u32 = MAX_CODE_LENGTH as u32 - PRIMARY_BITS;
const LINK_SIZE: usize = 1 << LINK_BITS;

/// A canonical Huffman decode table of at most [`MAX_CODE_LENGTH`] bits.
pub struct HuffmanTable
{
    pub min_code_length: u8,
    pub max_code_length: u8,
    pub chunks:          [u16; PRIMARY_SIZE],
    pub links:           Vec<[u16; LINK_SIZE]>,
    pub link_mask:       u32
}

impl HuffmanTable
{
    /// Build an empty table that decodes nothing (every lookup reports
    /// [`DeflateErrorKind::InvalidCode`]). Used for the RFC 1951 special
    /// case of a distance alphabet with no codes at all (block body has
    /// no back-references).
    fn empty() -> HuffmanTable
    {
        HuffmanTable {
            min_code_length: 0,
            max_code_length: 0,
            chunks:          [0; PRIMARY_SIZE],
            links:           Vec::new(),
            link_mask:       0
        }
    }

    /// Build a table that maps every codeword of length 1 (both `0` and
    /// `1`) to the lone symbol `sym`. RFC 1951 §3.2.7: "If only one
    /// distance code is used, it is encoded using one bit, not zero
    /// bits"; zlib's decompressor (and this one) extends the same
    /// leniency to any single-symbol alphabet rather than special-casing
    /// distance codes alone.
    fn single_symbol(sym: u16) -> HuffmanTable
    {
        let mut table = HuffmanTable {
            min_code_length: 1,
            max_code_length: 1,
            chunks:          [0; PRIMARY_SIZE],
            links:           Vec::new(),
            link_mask:       0
        };
        let entry = (sym << 4) | 1;

        table.chunks.fill(entry);
        table
    }

    /// Build a canonical Huffman decode table from `lengths` (one entry
    /// per alphabet symbol, `0` meaning the symbol is unused).
    ///
    /// `max_codes` bounds the alphabet size for validation (286 for
    /// literal/length, 30 for distance, 19 for code-length).
    pub fn build(lengths: &[u8], max_codes: usize) -> Result<HuffmanTable, DeflateErrorKind>
    {
        let mut count = [0_u32; MAX_CODE_LENGTH + 1];
        let mut num_codes = 0_u32;

        for &len in lengths
        {
            if usize::from(len) > MAX_CODE_LENGTH
            {
                #[cfg(feature = "logging")]
                debug!("code length {len} exceeds MAX_CODE_LENGTH ({MAX_CODE_LENGTH})");
                return Err(DeflateErrorKind::InvalidTable);
            }
            count[usize::from(len)] += 1;
            if len != 0
            {
                num_codes += 1;
            }
        }

        // `max_codes` bounds how many symbols may actually be *in use*
        // (RFC 1951 allows a declared alphabet larger than the number of
        // real codes, e.g. HLIT == 288 with symbols 286/287 unused).
        if num_codes as usize > max_codes
        {
            #[cfg(feature = "logging")]
            debug!("num_codes {num_codes} exceeds max_codes bound ({max_codes})");
            return Err(DeflateErrorKind::InvalidTable);
        }

        let max_code_length = (1..=MAX_CODE_LENGTH)
            .rev()
            .find(|&len| count[len] != 0)
            .unwrap_or(0);
        let min_code_length = (1..=MAX_CODE_LENGTH)
            .find(|&len| count[len] != 0)
            .unwrap_or(0);

        if num_codes == 0
        {
            return Ok(HuffmanTable::empty());
        }

        // Classic zlib inftrees.c completeness check: codespace left after
        // assigning `count[len]` codewords at each length, doubling as we
        // descend one bit per level.
        let mut left: i64 = 1;

        for len in 1..=max_code_length
        {
            left <<= 1;
            left -= i64::from(count[len]);

            if left < 0
            {
                #[cfg(feature = "logging")]
                debug!("Huffman code oversubscribed at length {len}");
                return Err(DeflateErrorKind::InvalidTable);
            }
        }

        if left > 0
        {
            if num_codes == 1 && max_code_length == 1
            {
                let sym = lengths.iter().position(|&l| l != 0).unwrap() as u16;
                return Ok(HuffmanTable::single_symbol(sym));
            }
            #[cfg(feature = "logging")]
            debug!("Huffman code incomplete: {left} codeword(s) unassigned");
            return Err(DeflateErrorKind::InvalidTable);
        }

        Ok(HuffmanTable::build_complete(
            lengths,
            &count,
            min_code_length as u8,
            max_code_length as u8
        ))
    }

    fn build_complete(
        lengths: &[u8], count: &[u32; MAX_CODE_LENGTH + 1], min_code_length: u8,
        max_code_length: u8
    ) -> HuffmanTable
    {
        let mut chunks = [0_u16; PRIMARY_SIZE];
        let mut links: Vec<[u16; LINK_SIZE]> = Vec::new();
        let link_mask;

        if usize::from(max_code_length) > PRIMARY_BITS as usize
        {
            let link_start: usize = (1..=PRIMARY_BITS as usize)
                .map(|len| (count[len] as usize) << (PRIMARY_BITS as usize - len))
                .sum();
            let num_links = PRIMARY_SIZE - link_start;

            link_mask = (1_u32 << (u32::from(max_code_length) - PRIMARY_BITS)) - 1;
            links = vec![[0_u16; LINK_SIZE]; num_links];

            for i in link_start..PRIMARY_SIZE
            {
                let reversed = reverse_bits(i as u32, PRIMARY_BITS as u8) as usize;
                chunks[reversed] = (((i - link_start) as u16) << 4) | INDIRECT_SENTINEL;
            }
        }
        else
        {
            link_mask = 0;
        }

        let mut next_code = [0_u32; MAX_CODE_LENGTH + 1];
        let mut code = 0_u32;

        for len in 1..=usize::from(max_code_length)
        {
            code = (code + count[len - 1]) << 1;
            next_code[len] = code;
        }

        for (sym, &len) in lengths.iter().enumerate()
        {
            if len == 0
            {
                continue;
            }

            let n = len;
            let c = next_code[usize::from(n)];
            next_code[usize::from(n)] += 1;

            let reversed = reverse_bits(c, n);
            let entry = ((sym as u16) << 4) | u16::from(n);

            if n <= PRIMARY_BITS as u8
            {
                let stride = 1_u32 << n;
                let mut offset = reversed;

                while (offset as usize) < PRIMARY_SIZE
                {
                    chunks[offset as usize] = entry;
                    offset += stride;
                }
            }
            else
            {
                let primary_index = (reversed as usize) & (PRIMARY_SIZE - 1);
                let link_index = usize::from(chunks[primary_index] >> 4);
                let stride = 1_u32 << (n - PRIMARY_BITS as u8);
                let mut offset = reversed >> PRIMARY_BITS;

                while (offset as usize) < LINK_SIZE
                {
                    links[link_index][offset as usize] = entry;
                    offset += stride;
                }
            }
        }

        HuffmanTable { min_code_length, max_code_length, chunks, links, link_mask }
    }

    /// Decode one symbol from `stream`, advancing it by the codeword's
    /// length. Fails with [`DeflateErrorKind::InvalidCode`] if the bits at
    /// the cursor don't resolve to a valid code (including reading past
    /// end of input, which `BitStream::peek24` reports as zero bits).
    #[inline]
    pub fn decode_symbol(&self, stream: &mut BitStream) -> Result<u16, DeflateErrorKind>
    {
        let register = stream.peek24();
        let mut chunk = self.chunks[(register as usize) & (PRIMARY_SIZE - 1)];
        let mut n = (chunk & 0xF) as u8;

        if n == INDIRECT_SENTINEL as u8 && usize::from(self.max_code_length) > PRIMARY_BITS as usize
        {
            let link_index = usize::from(chunk >> 4);
            let sub_index = (register >> PRIMARY_BITS) & self.link_mask;

            chunk = self.links[link_index][sub_index as usize];
            n = (chunk & 0xF) as u8;
        }

        if n == 0 || n > MAX_CODE_LENGTH as u8
        {
            #[cfg(feature = "logging")]
            debug!("decoded invalid code length field {n}");
            return Err(DeflateErrorKind::InvalidCode);
        }

        stream.consume(n);
        Ok(chunk >> 4)
    }
}

/// Reverse the low `bits` bits of `value`.
///
/// Canonical codes are assigned MSB-first but the bitstream delivers bits
/// LSB-first; reversing each assignment up front lets table indexing use
/// the raw bit register directly.
#[inline(always)]
const fn reverse_bits(value: u32, bits: u8) -> u32
{
    value.reverse_bits() >> (32 - bits as u32)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn decode_all(table: &HuffmanTable, bytes: &[u8], count: usize) -> Vec<u16>
    {
        let mut stream = BitStream::new(bytes);
        let mut out = Vec::with_capacity(count);

        for _ in 0..count
        {
            out.push(table.decode_symbol(&mut stream).unwrap());
        }
        out
    }

    #[test]
    fn fixed_literal_table_decodes_known_codes()
    {
        let lengths = crate::constants::fixed_litlen_lengths();
        let table = HuffmanTable::build(&lengths, crate::constants::MAX_LITLEN_SYMS).unwrap();

        assert_eq!(table.max_code_length, 9);
        assert_eq!(table.min_code_length, 7);
        // symbol 256 (end of block) has the canonical code 0000000 (7 bits,
        // value 0): the all-zero byte stream should decode straight to it.
        let decoded = decode_all(&table, &[0x00, 0x00], 1);
        assert_eq!(decoded, [256]);
    }

    #[test]
    fn single_symbol_alphabet_consumes_one_bit()
    {
        let mut lengths = [0_u8; 30];
        lengths[5] = 1;

        let table = HuffmanTable::build(&lengths, 30).unwrap();
        let mut stream = BitStream::new(&[0b0000_0000]);
        assert_eq!(table.decode_symbol(&mut stream).unwrap(), 5);
        assert_eq!(stream.bit_pos, 1);

        let mut stream = BitStream::new(&[0b0000_0001]);
        assert_eq!(table.decode_symbol(&mut stream).unwrap(), 5);
    }

    #[test]
    fn empty_alphabet_is_accepted_but_never_decodes()
    {
        let lengths = [0_u8; 30];
        let table = HuffmanTable::build(&lengths, 30).unwrap();

        assert_eq!(table.max_code_length, 0);

        let mut stream = BitStream::new(&[0xFF, 0xFF, 0xFF]);
        assert!(table.decode_symbol(&mut stream).is_err());
    }

    #[test]
    fn oversubscribed_code_is_rejected()
    {
        // Three symbols all claiming the single 1-bit codeword.
        let lengths = [1_u8, 1, 1];
        assert!(HuffmanTable::build(&lengths, 3).is_err());
    }

    #[test]
    fn incomplete_multi_symbol_code_is_rejected()
    {
        // Two symbols of length 3 leave the codespace under-filled, and
        // more than one symbol is present, so this isn't the single-code
        // special case.
        let lengths = [3_u8, 3];
        assert!(HuffmanTable::build(&lengths, 2).is_err());
    }

    #[test]
    fn exceeding_max_codes_is_rejected()
    {
        let lengths = [1_u8; 4];
        assert!(HuffmanTable::build(&lengths, 2).is_err());
    }

    #[test]
    fn deep_code_exercises_indirection()
    {
        // 16 symbols of length 15 plus one of length 1 is complete:
        // 1*2^14 + 16*2^0 = 16384 + 16... that overflows; instead build a
        // minimal complete code with one 15-bit-deep branch.
        //
        // Use lengths: one symbol at length 1, one at length 2, and the
        // rest of the codespace (2^15 - 2^14 - 2^13) spread across 15-bit
        // codes so the code stays complete.
        let mut lengths = Vec::new();
        lengths.push(1_u8); // symbol 0: half the codespace
        lengths.push(2_u8); // symbol 1: a quarter
        // remaining quarter (2^13 codes) filled by 2^13 symbols of length 15
        for _ in 0..(1usize << 13)
        {
            lengths.push(15_u8);
        }

        let table = HuffmanTable::build(&lengths, lengths.len()).unwrap();
        assert_eq!(table.max_code_length, 15);
        assert!(!table.links.is_empty());

        // The canonical code for the last length-15 symbol is all ones:
        // 15 one-bits, which bit-reversed is still all ones.
        let mut stream = BitStream::new(&[0xFF, 0xFF]);
        let sym = table.decode_symbol(&mut stream).unwrap();
        assert_eq!(usize::from(sym), lengths.len() - 1);
        assert_eq!(stream.byte_pos, 1);
        assert_eq!(stream.bit_pos, 7);
    }
}
