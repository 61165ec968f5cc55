use thiserror::Error;

/// Result alias used across the toolkit.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The closed error taxonomy.
///
/// Every fallible operation in the toolkit reports one of these. The numeric
/// codes are stable negative integers mirroring the negated POSIX `errno`
/// magnitudes for ease of diagnosis; callers are expected to match on the
/// symbolic variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, strum::EnumIter)]
#[repr(i32)]
pub enum Error {
    /// The requested entry does not exist.
    #[error("entry not found")]
    NotFound = -2,
    /// An iteration callback asked to stop early.
    #[error("iteration interrupted by callback")]
    Interrupted = -4,
    /// The underlying file or device reported a failure.
    #[error("i/o failure")]
    IoFailure = -5,
    /// The allocator could not satisfy a request.
    #[error("out of memory")]
    OutOfMemory = -12,
    /// The entry is already present.
    #[error("entry already exists")]
    AlreadyExists = -17,
    /// An argument violates the operation's contract.
    #[error("invalid argument")]
    InvalidArgument = -22,
    /// A numeric argument is outside the domain of the operation.
    #[error("argument outside operation domain")]
    DomainError = -33,
    /// A result or position does not fit the representable range.
    #[error("result out of range")]
    OutOfRange = -34,
    /// The operation is not implemented by this handler.
    #[error("not implemented")]
    NotImplemented = -38,
    /// No data is available.
    #[error("no data available")]
    NoData = -61,
}

impl Error {
    /// Stable numeric code of the error; always negative.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Error {
    type Error = i32;

    /// Recover a taxonomy member from its numeric code.
    fn try_from(code: i32) -> core::result::Result<Self, i32> {
        use Error::*;
        match code {
            -2 => Ok(NotFound),
            -4 => Ok(Interrupted),
            -5 => Ok(IoFailure),
            -12 => Ok(OutOfMemory),
            -17 => Ok(AlreadyExists),
            -22 => Ok(InvalidArgument),
            -33 => Ok(DomainError),
            -34 => Ok(OutOfRange),
            -38 => Ok(NotImplemented),
            -61 => Ok(NoData),
            other => Err(other),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Map an io error onto the taxonomy, keeping the kinds that have an
    /// exact counterpart.
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => Error::NotFound,
            ErrorKind::Interrupted => Error::Interrupted,
            ErrorKind::OutOfMemory => Error::OutOfMemory,
            ErrorKind::AlreadyExists => Error::AlreadyExists,
            ErrorKind::InvalidInput => Error::InvalidArgument,
            ErrorKind::Unsupported => Error::NotImplemented,
            _ => Error::IoFailure,
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_are_negative_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for err in Error::iter() {
            assert!(err.code() < 0, "{err:?} must carry a negative code");
            assert!(seen.insert(err.code()), "duplicate code for {err:?}");
        }
    }

    #[test]
    fn code_round_trip() {
        for err in Error::iter() {
            assert_eq!(Error::try_from(err.code()), Ok(err));
        }
        assert_eq!(Error::try_from(0), Err(0));
        assert_eq!(Error::try_from(-1), Err(-1));
    }

    #[test]
    fn io_error_mapping() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(err), Error::NotFound);

        let err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert_eq!(Error::from(err), Error::IoFailure);
    }
}
