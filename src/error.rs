//! Error types for toolpath loading
//!
//! Error codes follow the pattern `E<category><number>`:
//!
//! - **E1xxx**: I/O errors
//! - **E2xxx**: document content errors
//! - **E3xxx**: export errors
//!
//! Malformed axis words and unrecognized command lines are deliberately *not*
//! errors: the parser tolerates them by inheriting the running position
//! (modal G-code semantics) or skipping the line. The only document-level
//! failure is a parse that produces no extrusion at all.

use std::io;
use thiserror::Error;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when loading or exporting a toolpath
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while reading a G-code file
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    /// - File is not valid UTF-8
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document parsed but produced no extrusion layers
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - The file contains only comments or travel moves
    /// - Every move retracts (E decreasing) or leaves E unchanged
    /// - The file is not a print job at all (e.g. a CNC program)
    ///
    /// This is a valid parse outcome, not a crash: the current scene is left
    /// untouched and the condition is reported to the user once.
    #[error("[E2001] document contains no extrusion moves")]
    EmptyDocument,

    /// Image encoding failed during preview export
    ///
    /// **Error Code**: E3001
    #[error("[E3001] image export error: {0}")]
    Image(#[from] image::ImageError),
}
