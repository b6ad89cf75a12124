use std::error::Error;
use std::fmt;

/// Errors reported while compiling a transform descriptor.
///
/// Everything that can go wrong is caught at build time; a successfully built
/// descriptor never fails during a transform call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FftBuildError {
    /// The requested length cannot be factored into the supported radix set.
    UnsupportedSize(usize),
}

impl fmt::Display for FftBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftBuildError::UnsupportedSize(len) => write!(
                f,
                "FFT size {} cannot be factored into the supported radices 2, 3, 4, 5, 8",
                len
            ),
        }
    }
}

impl Error for FftBuildError {}
