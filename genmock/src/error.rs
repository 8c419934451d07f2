use std::error::Error as StdError;
use std::sync::Arc;

/// Error placeholder shared by every member that returns `Result`.
///
/// Recorder slots of fallible members store `Result<T, genmock::Error>`
/// whatever error type the trait declares; the generated method converts it
/// with `?`, so the declared error type must implement `From<genmock::Error>`.
/// `Box<dyn Error + Send + Sync>` and `std::io::Error` already do.
#[derive(Debug, Clone, thiserror::Error)]
#[error(transparent)]
pub struct Error {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Message(String);

impl Error {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Error carrying only a message
    pub fn msg<M>(message: M) -> Self
    where
        M: std::fmt::Display,
    {
        Self::new(Message(message.to_string()))
    }

    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}
