use core::fmt::{Debug, Display, Formatter};
use alloc::vec::Vec;

/// The single error category this crate can raise, distinguished by kind.
///
/// Errors are terminal: decoding does not attempt recovery or
/// resynchronization once one of these is returned.
pub enum DeflateErrorKind
{
    /// A bit or byte read went past the end of the input.
    TruncatedInput,
    /// Block header declared `btype == 3`, which DEFLATE reserves.
    InvalidBlockType,
    /// A stored block's `LEN` and `NLEN` fields are not one's complement.
    InvalidStoredBlock,
    /// A code-length alphabet is over-subscribed, empty where it must not
    /// be, or exceeds the alphabet's `max_codes` bound.
    InvalidTable,
    /// A decoded Huffman code had a zero or out-of-range length field, or
    /// named a symbol outside the alphabet it was decoded from.
    InvalidCode,
    /// Code-length symbol 16 (repeat previous) appeared before any literal
    /// length had been decoded.
    InvalidRepeat,
    /// A back-reference's distance reached further back than the start of
    /// the output produced so far.
    InvalidDistance,
    /// The caller supplied an output size limit (see [`InflateOptions`])
    /// and decoding would have produced more bytes than that limit.
    ///
    /// [`InflateOptions`]: crate::InflateOptions
    OutputLimitExceeded(usize, usize)
}

impl Debug for DeflateErrorKind
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            Self::TruncatedInput => writeln!(f, "Truncated input: read past end of stream"),
            Self::InvalidBlockType => writeln!(f, "Invalid block type (btype == 3 is reserved)"),
            Self::InvalidStoredBlock =>
            {
                writeln!(f, "Stored block LEN does not match one's complement of NLEN")
            }
            Self::InvalidTable => writeln!(f, "Malformed Huffman code-length table"),
            Self::InvalidCode => writeln!(f, "Decoded an invalid or out-of-range Huffman code"),
            Self::InvalidRepeat =>
            {
                writeln!(f, "Code-length repeat symbol used before any length was decoded")
            }
            Self::InvalidDistance =>
            {
                writeln!(f, "Back-reference distance reaches before the start of the output")
            }
            Self::OutputLimitExceeded(limit, produced) => writeln!(
                f,
                "Output limit exceeded, set limit was {limit} and output size is {produced}"
            )
        }
    }
}

impl Display for DeflateErrorKind
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeflateErrorKind {}

/// A decode failure together with whatever output had already been
/// produced when it was raised.
///
/// Per the error-handling contract, that partial output is observable but
/// not contractually valid — it is provided for diagnostics only.
pub struct InflateDecodeErrors
{
    /// Reason decompression failed.
    pub error: DeflateErrorKind,
    /// Bytes decoded before the failure.
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    /// Wrap an error together with the output decoded so far.
    pub fn new(error: DeflateErrorKind, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}

impl Display for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InflateDecodeErrors {}
