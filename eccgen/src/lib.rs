//! SECDED code generator.
//!
//! Loads pre-computed generator (G) and parity-check (H) matrices for a set of
//! message widths, compiles them into DSLX XOR-chain expressions and splices
//! those into encoder and decoder templates.

pub mod bit_matrix;
pub mod code;
pub mod compiler;
pub mod config;
pub mod expr;
pub mod logging;
pub mod matrix_file;
pub mod store;
pub mod template;

use std::path::PathBuf;

// Re-export main types
pub use bit_matrix::{BitMatrix, BitMatrixError};
pub use code::{Code, CodeError};
pub use compiler::{decoder_fragments, encoder_fragments, FragmentMap};
pub use config::{generate, GenerateConfig, TemplateJob, DEFAULT_WIDTHS};
pub use matrix_file::{HeaderField, MatrixFile, Symbol};
pub use store::{CodeBook, MatrixStore};
pub use template::Template;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EccError>;

#[derive(Error, Debug)]
pub enum EccError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Missing code for k={width}: {detail}")]
    MissingCode { width: usize, detail: String },
    #[error("Parse error in {}:{line}: {detail}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        detail: String,
    },
    #[error("Invalid {symbol} matrix in {}: {detail}", path.display())]
    Validation {
        path: PathBuf,
        symbol: Symbol,
        detail: String,
    },
    #[error(
        "{symbol} shape {actual:?} does not match expected {expected:?} for {}",
        path.display()
    )]
    Shape {
        path: PathBuf,
        symbol: Symbol,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error(
        "G and H matrices have different {field} ({g_value} vs {h_value}): {} and {}",
        g_path.display(),
        h_path.display()
    )]
    Consistency {
        field: HeaderField,
        g_path: PathBuf,
        h_path: PathBuf,
        g_value: usize,
        h_value: usize,
    },
    #[error("Template error in {}:{line}: {detail}", path.display())]
    Template {
        path: PathBuf,
        line: usize,
        detail: String,
    },
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Matrix error: {0}")]
    Matrix(#[from] BitMatrixError),
}

impl EccError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EccError::Io {
            path: path.into(),
            source,
        }
    }
}
