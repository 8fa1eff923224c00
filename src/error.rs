/*!
 * Errors that can be returned by tournament operations
 */

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::deadpool::{BuildError, PoolError};

use crate::models::PlayerId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Db(DieselError),
    Pool(PoolError),
    PoolBuild(BuildError),
    UnknownPlayer(PlayerId),
    SelfMatch(PlayerId),
    OddPlayerCount(usize),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection or query failure
    Storage,
    /// Foreign key, uniqueness or check violation, or a rejected match report
    Constraint,
    /// Operation called on a tournament state it cannot handle
    Precondition,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnknownPlayer(id) => write!(f, "no player registered with id {}", id),
            Self::SelfMatch(id) => write!(f, "player {} cannot play against themselves", id),
            Self::OddPlayerCount(n) => {
                write!(f, "cannot pair an odd number of players ({} registered)", n)
            }
            _ => match self.source() {
                Some(error) => write!(f, "{}", error),
                None => Ok(()),
            },
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            Self::Pool(e) => Some(e),
            Self::PoolBuild(e) => Some(e),
            Self::UnknownPlayer(_) | Self::SelfMatch(_) | Self::OddPlayerCount(_) => None,
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Db(DieselError::DatabaseError(kind, _)) => match kind {
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation => ErrorKind::Constraint,
                _ => ErrorKind::Storage,
            },
            Self::Db(_) | Self::Pool(_) | Self::PoolBuild(_) => ErrorKind::Storage,
            Self::UnknownPlayer(_) | Self::SelfMatch(_) => ErrorKind::Constraint,
            Self::OddPlayerCount(_) => ErrorKind::Precondition,
        }
    }
}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Error {
        Error::Db(e)
    }
}

impl From<PoolError> for Error {
    fn from(e: PoolError) -> Error {
        Error::Pool(e)
    }
}

impl From<BuildError> for Error {
    fn from(e: BuildError) -> Error {
        Error::PoolBuild(e)
    }
}
