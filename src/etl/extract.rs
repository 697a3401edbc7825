//! Extractor trait for reading a dataset from a source

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to read a whole batch from sources like:
/// - Delimited text files
/// - Database tables
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for LineExtractor {
///     type Output = Vec<String>;
///
///     fn extract(&self) -> Result<Self::Output> {
///         let content = std::fs::read_to_string(&self.path)?;
///         Ok(content.lines().map(String::from).collect())
///     }
/// }
/// ```
pub trait Extractor {
    /// The type produced by a single extraction
    type Output;

    /// Extract everything from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (I/O, parsing, etc.)
    fn extract(&self) -> Result<Self::Output>;
}
