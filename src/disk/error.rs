use std::error;
use std::fmt;
use std::io;

/// Errors that can be returned from disk image operations.  These are
/// generally converted into `io::Error`.
///
/// Only an unrecognized image size is a hard error; structural anomalies
/// inside a valid-size image are absorbed by the decoder's guards and
/// yield a partial or empty entry list instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiskError {
    /// The image size matches no known disk layout
    InvalidLayout,
}

impl error::Error for DiskError {}

impl fmt::Display for DiskError {
    /// Provide human-readable descriptions of the errors
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.message())
    }
}

impl From<DiskError> for io::Error {
    fn from(error: DiskError) -> io::Error {
        match error {
            DiskError::InvalidLayout => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}

impl DiskError {
    /// If the provided `io::Error` contains a `DiskError`, return the
    /// underlying `DiskError`.  If not, return None.
    pub fn from_io_error(error: &io::Error) -> Option<DiskError> {
        match error.get_ref() {
            Some(e) => e.downcast_ref::<DiskError>().cloned(),
            None => None,
        }
    }

    /// Provide terse descriptions of the errors.
    fn message(&self) -> &str {
        match *self {
            DiskError::InvalidLayout => "image size matches no known disk layout",
        }
    }
}

impl PartialEq<io::Error> for DiskError {
    fn eq(&self, other: &io::Error) -> bool {
        match DiskError::from_io_error(other) {
            Some(ref e) if e == self => true,
            _ => false,
        }
    }
}

impl PartialEq<DiskError> for io::Error {
    fn eq(&self, other: &DiskError) -> bool {
        match DiskError::from_io_error(self) {
            Some(ref e) if e == other => true,
            _ => false,
        }
    }
}
