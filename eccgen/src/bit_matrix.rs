use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitMatrixError {
    #[error("Invalid matrix dimensions")]
    InvalidDimensions,
    #[error("Index ({row}, {col}) out of bounds")]
    IndexOutOfBounds { row: usize, col: usize },
}

/// Dense binary matrix over GF(2) with a fixed shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    n_rows: usize,
    n_cols: usize,
    /// Bits packed into u32s, each row stored in consecutive words
    data: Vec<u32>,
    words_per_row: usize,
}

impl BitMatrix {
    /// Allocate an all-zero matrix of the given shape.
    pub fn allocate(n_rows: usize, n_cols: usize) -> Result<Self, BitMatrixError> {
        if n_rows == 0 || n_cols == 0 {
            return Err(BitMatrixError::InvalidDimensions);
        }

        let words_per_row = n_cols.div_ceil(32);
        let data = vec![0u32; n_rows * words_per_row];

        Ok(Self {
            n_rows,
            n_cols,
            data,
            words_per_row,
        })
    }

    /// Build a matrix from rows of bits. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, BitMatrixError> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return Err(BitMatrixError::InvalidDimensions);
        }

        let mut matrix = Self::allocate(rows.len(), n_cols)?;
        for (row, bits) in rows.iter().enumerate() {
            matrix.set_row(row, bits)?;
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.n_rows
    }
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Get an element. Reads outside the matrix return `false`.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.n_rows || col >= self.n_cols {
            return false;
        }

        let word_index = row * self.words_per_row + col / 32;
        let bit_index = col % 32;

        (self.data[word_index] & (1u32 << bit_index)) != 0
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<(), BitMatrixError> {
        if row >= self.n_rows || col >= self.n_cols {
            return Err(BitMatrixError::IndexOutOfBounds { row, col });
        }

        let word_index = row * self.words_per_row + col / 32;
        let mask = 1u32 << (col % 32);

        if value {
            self.data[word_index] |= mask;
        } else {
            self.data[word_index] &= !mask;
        }

        Ok(())
    }

    /// Set a row from a bit vector
    pub fn set_row(&mut self, row: usize, bits: &[bool]) -> Result<(), BitMatrixError> {
        if bits.len() != self.n_cols {
            return Err(BitMatrixError::InvalidDimensions);
        }

        for (col, &bit) in bits.iter().enumerate() {
            self.set(row, col, bit)?;
        }

        Ok(())
    }

    /// Get a row as a bit vector
    pub fn row(&self, row: usize) -> Vec<bool> {
        (0..self.n_cols).map(|col| self.get(row, col)).collect()
    }

    /// Get a column as a bit vector, top row first
    pub fn column(&self, col: usize) -> Vec<bool> {
        (0..self.n_rows).map(|row| self.get(row, col)).collect()
    }

    /// Ascending column indices of the ones in `row`.
    pub fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_cols).filter(move |&col| self.get(row, col))
    }

    /// Ascending row indices of the ones in `col`.
    pub fn col_ones(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_rows).filter(move |&row| self.get(row, col))
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|word| word.count_ones() as usize).sum()
    }
}
