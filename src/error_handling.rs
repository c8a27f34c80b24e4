use std::path::PathBuf;
use std::fmt::{Debug, Display};

pub trait ErrorType: Display + Debug + PartialEq {}

// Where in a grammar source something went wrong. Lines are 0-based.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize
}

impl Location {
    pub fn line(line: usize) -> Self {
        Location { file: None, line }
    }

    pub fn in_file(file: PathBuf, line: usize) -> Self {
        Location { file: Some(file), line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file.display(), self.line),
            None => write!(f, "line {}", self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.location, self.error)
    }
}

impl<T: ErrorType> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;
