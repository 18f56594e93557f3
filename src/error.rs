use core::fmt;

/// Failure conditions surfaced by this crate.
///
/// All variants are handled at the point of detection by the caller that
/// triggered them; none is fatal to the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The driver pool has no free slot left.
    OutOfMemory,
    /// The observer registry already holds `MAX_OBSERVERS` entries.
    CapacityExceeded,
    /// An interrupt report arrived with a length other than `REPORT_LEN`.
    ProtocolError { len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfMemory => write!(f, "driver pool exhausted"),
            Error::CapacityExceeded => write!(f, "observer registry full"),
            Error::ProtocolError { len } => {
                write!(f, "report length {} invalid; expected {}", len, crate::report::REPORT_LEN)
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
