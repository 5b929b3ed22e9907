use crate::item::Item;
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum MineError {
    /// A transaction or weight line that isn't the expected number type.
    InputParse {
        path: String,
        line: usize,
        content: String,
    },
    /// An item with no entry in the weight file. Never returned as an
    /// error; built only so it can be logged.
    MissingWeight { item: Item, transaction: usize },
    Io { path: String, source: io::Error },
}

impl MineError {
    pub fn io(path: &str, source: io::Error) -> MineError {
        MineError::Io {
            path: String::from(path),
            source,
        }
    }

    pub fn parse(path: &str, line: usize, content: &str) -> MineError {
        MineError::InputParse {
            path: String::from(path),
            line,
            content: String::from(content),
        }
    }
}

impl fmt::Display for MineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MineError::InputParse {
                path,
                line,
                content,
            } => write!(f, "{}:{}: can't parse {:?}", path, line, content),
            MineError::MissingWeight { item, transaction } => write!(
                f,
                "item {} in transaction {} has no weight",
                item, transaction
            ),
            MineError::Io { path, source } => write!(f, "{}: {}", path, source),
        }
    }
}

impl Error for MineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MineError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
