//! RFC 1951 constant tables.
//!
//! Everything here is compile-time data: the fixed literal/length and
//! distance code lengths used by static Huffman blocks, the code-length
//! alphabet permutation used to read a dynamic block's precode, and the
//! length/distance base + extra-bits tables used to expand back-references.

/// Maximum codeword length allowed by DEFLATE for any of its three
/// alphabets (literal/length, distance, code-length).
pub const MAX_CODE_LENGTH: usize = 15;

/// Number of symbols in the literal/length alphabet (0..=285 used, 286/287
/// reserved but still counted by the RFC's `max_codes` bound).
pub const MAX_LITLEN_SYMS: usize = 286;

/// Number of symbols in the distance alphabet.
pub const MAX_DIST_SYMS: usize = 30;

/// Number of symbols in the code-length (precode) alphabet.
pub const NUM_PRECODE_SYMS: usize = 19;

/// Order in which a dynamic block's code-length code lengths are stored.
/// RFC 1951 §3.2.7.
pub static PRECODE_LENS_PERMUTATION: [u8; NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15
];

/// Fixed literal/length code lengths, RFC 1951 §3.2.6.
pub fn fixed_litlen_lengths() -> [u8; 288]
{
    let mut lens = [0_u8; 288];
    let mut i = 0;

    while i < 144
    {
        lens[i] = 8;
        i += 1;
    }
    while i < 256
    {
        lens[i] = 9;
        i += 1;
    }
    while i < 280
    {
        lens[i] = 7;
        i += 1;
    }
    while i < 288
    {
        lens[i] = 8;
        i += 1;
    }
    lens
}

/// Fixed distance code lengths, RFC 1951 §3.2.6: all 30 symbols use length 5.
pub fn fixed_dist_lengths() -> [u8; MAX_DIST_SYMS]
{
    [5_u8; MAX_DIST_SYMS]
}

/// Base length for each length symbol (257..=285), RFC 1951 §3.2.5.
pub static BASE_LENGTHS: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258
];

/// Extra bits to read following each length symbol.
pub static EXTRA_LENGTH_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0
];

/// Base distance for each distance symbol, RFC 1951 §3.2.5.
pub static BASE_DISTANCES: [u16; MAX_DIST_SYMS] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577
];

/// Extra bits to read following each distance symbol.
pub static EXTRA_DISTANCE_BITS: [u8; MAX_DIST_SYMS] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13
];

/// `op + length + slop` growth discipline for the output buffer: the widest
/// single write a back-reference's 8-byte-chunked copy can overshoot by.
pub const COPY_SLOP: usize = 13;
