use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Portability analysis is deliberately forgiving: absent catalog entries, unknown doc ids and
/// unresolvable assembly references all degrade to negative lookups or soft
/// [`crate::diagnostics::Diagnostics`] entries. The variants here are reserved for conditions that
/// make a request or an input document unusable.
///
/// # Error Categories
///
/// ## Request Errors
/// - [`Error::UnknownTarget`] - A requested target platform is not known to the catalog
///
/// ## Input Errors
/// - [`Error::Malformed`] - Invalid version strings, target names or catalog content
/// - [`Error::JsonError`] - Catalog, configuration or breaking change documents failed to deserialize
/// - [`Error::FileError`] - Filesystem I/O errors while reading documents or writing reports
///
/// # Examples
///
/// ```rust,no_run
/// use portscope::{Error, engine::TargetResolver, catalog::CatalogIndex};
/// use std::sync::Arc;
///
/// # fn run(catalog: Arc<CatalogIndex>) {
/// let resolver = TargetResolver::new(catalog, ".NET Framework");
/// match resolver.map_targets_to_explicit_versions(&["NotARealPlatform"]) {
///     Ok(targets) => println!("Resolved {} targets", targets.len()),
///     Err(Error::UnknownTarget(target)) => eprintln!("Unknown target: {}", target),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A requested target platform could not be resolved.
    ///
    /// Raised when a user-supplied target identifier, or identifier and version combination,
    /// is not present in the catalog. This is fatal to the whole analysis request. Entries in
    /// the configured default target list never raise this error, they are skipped instead.
    ///
    /// The associated value names the offending target.
    #[error("Unknown target - {0}")]
    UnknownTarget(String),

    /// The input is damaged and could not be parsed.
    ///
    /// Covers version strings, target names, and catalog entries that do not follow the
    /// expected format. The error includes the source location where the malformation was
    /// detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading catalog documents or while
    /// report writers emit their output.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from `serde_json` while reading or writing a JSON document.
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),
}
