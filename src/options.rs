//! Decode-time configuration.

/// Options controlling a single [`crate::inflate_with_options`] call.
///
/// There is currently one knob: an output size cap, useful for callers
/// decoding untrusted input who want to bound memory use without first
/// knowing the decompressed size.
#[derive(Debug, Clone, Copy, Default)]
pub struct InflateOptions
{
    size_limit: Option<usize>
}

impl InflateOptions
{
    /// Cap the number of bytes the decoder will produce. Once exceeded,
    /// decoding stops with [`crate::errors::DeflateErrorKind::OutputLimitExceeded`].
    ///
    /// The check is made after each block finishes, not after every byte,
    /// so a single block may overshoot `limit` by as much as one block's
    /// worth of output before the error is raised.
    pub fn with_size_limit(mut self, limit: usize) -> Self
    {
        self.size_limit = Some(limit);
        self
    }

    pub fn size_limit(&self) -> Option<usize>
    {
        self.size_limit
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn default_has_no_limit()
    {
        assert_eq!(InflateOptions::default().size_limit(), None);
    }

    #[test]
    fn with_size_limit_sets_the_cap()
    {
        let options = InflateOptions::default().with_size_limit(1024);
        assert_eq!(options.size_limit(), Some(1024));
    }
}
