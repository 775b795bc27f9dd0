use thiserror::Error;

/// Failures that can occur while preparing a symbol.
///
/// All of these surface when the symbol is first encoded; replaying a
/// prepared path never fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The error correction level selector was not one of the four levels.
    #[error("error correction level selector out of range")]
    InvalidErrorCorrectionLevel,
    /// The data does not fit in any version up to 40 at the requested level.
    #[error("data exceeds the capacity of every supported version")]
    CapacityExceeded,
    /// A module grid buffer could not be allocated.
    #[error("failed to allocate module grid")]
    Allocation,
}
