use {
    crate::{Code, EccError, HeaderField, MatrixFile, Result, Symbol},
    std::{collections::BTreeMap, path::PathBuf},
    tracing::{debug, info, info_span, warn},
};

/// Codes keyed by message length `k`.
pub type CodeBook = BTreeMap<usize, Code>;

/// Directory of persisted `hsiao_{G,H}_k<k>.txt` matrix pairs.
#[derive(Debug, Clone)]
pub struct MatrixStore {
    dir: PathBuf,
}

impl MatrixStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the `symbol` matrix for message width `k`.
    pub fn path_for(&self, k: usize, symbol: Symbol) -> PathBuf {
        self.dir.join(format!("hsiao_{symbol}_k{k}.txt"))
    }

    /// Load and validate one code per requested width. The first failure
    /// aborts the load.
    pub fn load(&self, widths: &[usize]) -> Result<CodeBook> {
        let mut codes = CodeBook::new();
        for &width in widths {
            let code = self.load_one(width)?;
            if code.k() != width {
                warn!(width, declared = code.k(), "matrix files declare a different k");
            }
            info!(k = code.k(), r = code.r(), n = code.n(), "loaded code");
            codes.insert(code.k(), code);
        }
        Ok(codes)
    }

    /// Load the (G, H) pair for one width.
    pub fn load_one(&self, width: usize) -> Result<Code> {
        if width == 0 {
            return Err(EccError::InvalidArgument(format!(
                "k must be positive, got {width}"
            )));
        }
        let _span = info_span!("load", k = width).entered();

        let g_path = self.path_for(width, Symbol::G);
        let h_path = self.path_for(width, Symbol::H);
        for path in [&g_path, &h_path] {
            if !path.is_file() {
                return Err(EccError::MissingCode {
                    width,
                    detail: format!("{} not found", path.display()),
                });
            }
        }

        let g = MatrixFile::read(&g_path, Symbol::G)?;
        debug!(path = %g_path.display(), "parsed generator matrix");
        let h = MatrixFile::read(&h_path, Symbol::H)?;
        debug!(path = %h_path.display(), "parsed parity-check matrix");

        for field in HeaderField::ALL {
            let (g_value, h_value) = (g.field(field), h.field(field));
            if g_value != h_value {
                return Err(EccError::Consistency {
                    field,
                    g_path,
                    h_path,
                    g_value,
                    h_value,
                });
            }
        }

        Code::new(g.matrix, h.matrix).map_err(|err| {
            let symbol = err.symbol();
            EccError::Validation {
                path: match symbol {
                    Symbol::G => g_path.clone(),
                    Symbol::H => h_path.clone(),
                },
                symbol,
                detail: err.to_string(),
            }
        })
    }
}
