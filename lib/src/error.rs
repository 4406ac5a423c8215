use std::{fmt, io};
use std::panic::Location;
use std::convert::Infallible;
use std::error::Error as StdError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A message with key/value context, optionally caused by an earlier error.
///
/// Errors form a chain: the outermost error describes what the caller was
/// doing, each `cause` describes what went wrong underneath it.
#[derive(Debug, Clone)]
pub struct Error {
    message: String,
    parameters: Vec<(Option<String>, String)>,
    cause: Option<Box<Error>>,
    location: &'static Location<'static>,
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    #[track_caller]
    pub fn new<M: fmt::Display>(message: M) -> Self {
        Error {
            message: message.to_string(),
            parameters: vec![],
            cause: None,
            location: Location::caller(),
        }
    }

    /// Attaches a `key: value` line to this error.
    pub fn with<K: fmt::Display, V: fmt::Display>(mut self, key: K, value: V) -> Self {
        self.parameters.push((Some(key.to_string()), value.to_string()));
        self
    }

    /// Attaches an unlabeled context line to this error.
    pub fn note<V: fmt::Display>(mut self, value: V) -> Self {
        self.parameters.push((None, value.to_string()));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parameters(&self) -> &[(Option<String>, String)] {
        &self.parameters
    }

    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// Makes `self` the deepest cause of `context` and returns `context`.
    pub fn chain(self, mut context: Error) -> Self {
        fn bury(error: Error, behind: &mut Error) {
            match behind.cause.as_mut() {
                Some(cause) => bury(error, cause),
                None => behind.cause = Some(Box::new(error)),
            }
        }

        bury(self, &mut context);
        context
    }

    fn write_nested(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = " ".repeat(depth * 4);
        let newline = format!("\n{indent}");

        writeln!(f, "{indent}{}", self.message.replace('\n', &newline))?;
        if let Some(cause) = &self.cause {
            cause.write_nested(f, depth + 1)?;
        }

        for (key, value) in &self.parameters {
            let value = value.replace('\n', &newline);
            match key {
                Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                None => writeln!(f, "{indent}{value}")?,
            }
        }

        if std::env::var_os("RUST_BACKTRACE").is_some() {
            writeln!(f, "{indent}[{}]", self.location)?;
        }

        Ok(())
    }
}

impl ErrorDetail for &(dyn StdError + Send + Sync) {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let mut context = vec![];
        let mut source = self.source();
        while let Some(e) = source {
            context.push((None, e.to_string()));
            source = e.source();
        }

        context
    }
}

impl ErrorDetail for Box<dyn StdError + Send + Sync> {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let error: &(dyn StdError + Send + Sync) = &**self;
        error.context()
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($T:ty) => {
        impl $crate::error::ErrorDetail for $T {
            fn context(&self) -> Vec<(Option<String>, String)> {
                let error: &(dyn std::error::Error + Send + Sync) = self;
                $crate::error::ErrorDetail::context(&error)
            }
        }
    }
}

pub(crate) use impl_error_detail_with_std_error;

impl_error_detail_with_std_error!(io::Error);
impl_error_detail_with_std_error!(toml::de::Error);
impl_error_detail_with_std_error!(jwalk::Error);

impl ErrorDetail for String { }
impl ErrorDetail for &str { }

impl ErrorDetail for Infallible { }

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            message: format!("{detail:#}"),
            parameters: detail.context(),
            cause: None,
            location: Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_nested(f, 0)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

/// Builds an [`Error`](crate::error::Error) from a message and optional
/// `"key" => value` pairs or bare values.
///
/// ```
/// let error = folio::error!("failed to read file", "path" => "a.toml");
/// assert_eq!(error.message(), "failed to read file");
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr $(,)?) => ($crate::error::Error::new($msg));

    ($msg:expr, $($rest:tt)+) => ({
        #[allow(unused_mut)]
        let mut error = $crate::error::Error::new($msg);
        $crate::error!(@param error $($rest)+);
        error
    });

    (@param $e:ident $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $e = $e.with($key, $value);
        $($crate::error!(@param $e $($rest)*);)?
    };

    (@param $e:ident $value:expr $(, $($rest:tt)*)?) => {
        $e = $e.note($value);
        $($crate::error!(@param $e $($rest)*);)?
    };

    (@param $e:ident) => { };
}

pub trait Chainable<T> {
    fn chain(self, other: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, other: impl Into<Error>) -> Result<T> {
        self.map_err(|e| e.into().chain(other.into()))
    }

    #[track_caller]
    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>,
    {
        self.map_err(|e| e.into().chain(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_collects_parameters() {
        let error = error!("failed to load", "path" => "x.toml", "bare note");
        assert_eq!(error.message(), "failed to load");
        assert_eq!(error.parameters(), &[
            (Some("path".to_string()), "x.toml".to_string()),
            (None, "bare note".to_string()),
        ]);
    }

    #[test]
    fn chain_nests_causes() {
        let io = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let result: Result<()> = Err(io).chain(error!("failed to read settings"));
        let error = result.unwrap_err();

        assert_eq!(error.message(), "failed to read settings");
        assert_eq!(error.cause().unwrap().message(), "no such file");

        let display = error.to_string();
        assert!(display.starts_with("failed to read settings\n    no such file"));
    }

    #[test]
    fn chain_appends_to_deepest_cause() {
        let inner = error!("inner");
        let middle = inner.chain(error!("middle"));
        let outer = middle.chain(error!("outer"));

        assert_eq!(outer.message(), "outer");
        assert_eq!(outer.cause().unwrap().message(), "middle");
        assert_eq!(outer.cause().unwrap().cause().unwrap().message(), "inner");
    }
}
