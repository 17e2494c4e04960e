//! Error type shared by every fallible operation in this crate.

/// Closed set of failure modes a converter can report.
///
/// There is no catch-all variant: every condition the core can detect gets
/// its own variant, returned by value, never panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A construction argument violates the contract (zero rate, even
    /// filter order, `NONE` filter with order != 1, a budget too small,
    /// too many planner stages, etc).
    #[error("invalid argument")]
    InvalidArgument,

    /// `process` was called with more input samples than the converter was
    /// configured to accept per call.
    #[error("too many input samples for this call")]
    TooManyInputs,

    /// The caller-supplied output buffer is smaller than the number of
    /// samples this call would produce.
    #[error("output buffer too small")]
    InsufficientBuffer,

    /// A `put` would write more bytes than the ring buffer's free capacity.
    #[error("ring buffer: put size exceeds free capacity")]
    ExceedMaxCapacity,

    /// A `peek`/`get` asked for more bytes than are currently buffered.
    #[error("ring buffer: required size exceeds remaining buffered data")]
    ExceedMaxRemain,

    /// A `peek`/`get` asked for more bytes than `max_required_size`, so the
    /// mirror region cannot guarantee a contiguous slice.
    #[error("ring buffer: required size exceeds configured max_required_size")]
    ExceedMaxRequired,
}

/// Convenience result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;
