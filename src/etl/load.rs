//! Loader trait for writing data to destinations

use eyre::Result;

/// Loader trait for loading data to a destination
///
/// The loader takes ownership of its input; once handed over, the producing
/// stage keeps no reference to it.
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::Loader;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineLoader {
///     path: PathBuf,
/// }
///
/// impl Loader for LineLoader {
///     type Input = Vec<String>;
///
///     fn load(&self, input: Self::Input) -> Result<usize> {
///         std::fs::write(&self.path, input.join("\n"))?;
///         Ok(input.len())
///     }
/// }
/// ```
pub trait Loader {
    /// The type accepted by the destination
    type Input;

    /// Load the input to the destination
    ///
    /// Returns the number of records written
    ///
    /// # Errors
    /// Returns an error if loading fails (connection, I/O, constraint, etc.)
    fn load(&self, input: Self::Input) -> Result<usize>;
}
