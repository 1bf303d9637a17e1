use {
    crate::{BitMatrix, Symbol},
    thiserror::Error,
};

/// Structural defects that make a (G, H) pair unusable for code generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("H has {h_cols} columns but G has {g_cols}")]
    ColumnMismatch { g_cols: usize, h_cols: usize },
    #[error("codeword length n={n} is not k + r = {k} + {r}")]
    LengthMismatch { k: usize, r: usize, n: usize },
    #[error("parity column {column} (parity bit {parity}) has no nonzero entries")]
    EmptyParityColumn { parity: usize, column: usize },
    #[error("row {row} (syndrome bit {syndrome}) has no nonzero entries")]
    EmptySyndromeRow { row: usize, syndrome: usize },
}

impl CodeError {
    /// The matrix the defect was found in.
    pub fn symbol(&self) -> Symbol {
        match self {
            CodeError::EmptySyndromeRow { .. } | CodeError::ColumnMismatch { .. } => Symbol::H,
            _ => Symbol::G,
        }
    }
}

/// A systematic linear block code: `k` message bits, `r` parity bits.
///
/// `G` is `k x n` with the identity in its first `k` columns, `H` is `r x n`.
/// Every parity column of `G` and every row of `H` has at least one nonzero
/// entry, so every compiled XOR chain is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    k: usize,
    r: usize,
    n: usize,
    g: BitMatrix,
    h: BitMatrix,
}

impl Code {
    pub fn new(g: BitMatrix, h: BitMatrix) -> Result<Self, CodeError> {
        let k = g.rows();
        let r = h.rows();
        let n = g.cols();

        if h.cols() != n {
            return Err(CodeError::ColumnMismatch {
                g_cols: n,
                h_cols: h.cols(),
            });
        }
        if n != k + r {
            return Err(CodeError::LengthMismatch { k, r, n });
        }

        if let Some(parity) = (0..r).find(|&i| g.col_ones(k + i).next().is_none()) {
            return Err(CodeError::EmptyParityColumn {
                parity,
                column: k + parity,
            });
        }
        if let Some(row) = (0..r).find(|&i| h.row_ones(i).next().is_none()) {
            return Err(CodeError::EmptySyndromeRow {
                row,
                syndrome: r - 1 - row,
            });
        }

        Ok(Self { k, r, n, g, h })
    }

    /// Message length
    pub fn k(&self) -> usize {
        self.k
    }
    /// Parity bit count
    pub fn r(&self) -> usize {
        self.r
    }
    /// Codeword length
    pub fn n(&self) -> usize {
        self.n
    }
    pub fn g(&self) -> &BitMatrix {
        &self.g
    }
    pub fn h(&self) -> &BitMatrix {
        &self.h
    }
}
