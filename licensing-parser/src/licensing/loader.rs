//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file or string and runs the parser on
//! it. Used by the CLI and by the integration tests.
//!
//! ```rust
//! use licensing_parser::licensing::loader::DocumentLoader;
//!
//! let forest = DocumentLoader::from_string("פרק 1\n2.1 כללי\n").parse();
//! assert_eq!(forest.len(), 1);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::licensing::ast::Forest;
use crate::licensing::pipeline::SectionParser;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },
}

pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path. The file must be UTF-8; a leading BOM is dropped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8(bytes).map_err(|_| LoaderError::Encoding {
            path: path.to_path_buf(),
        })?;
        Ok(Self::from_string(source))
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        let source: String = source.into();
        let source = match source.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => source,
        };
        DocumentLoader { source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse with the built-in vocabulary.
    pub fn parse(&self) -> Forest {
        self.parse_with(&SectionParser::new())
    }

    pub fn parse_with(&self, parser: &SectionParser) -> Forest {
        parser.parse_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_string_strips_bom() {
        let loader = DocumentLoader::from_string("\u{feff}פרק 1");
        assert_eq!(loader.source(), "פרק 1");
    }

    #[test]
    fn test_missing_file() {
        let err = DocumentLoader::from_path("/nonexistent/spec.txt")
            .err()
            .unwrap();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x41]).unwrap();
        let err = DocumentLoader::from_path(file.path()).err().unwrap();
        assert!(matches!(err, LoaderError::Encoding { .. }));
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "פרק 1\n2.1 כללי\n2.2 נוסף\n").unwrap();
        let forest = DocumentLoader::from_path(file.path()).unwrap().parse();
        assert_eq!(forest.len(), 2);
    }
}
