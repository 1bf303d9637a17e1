#![allow(dead_code)]

use {
    eccgen::{BitMatrix, MatrixFile, MatrixStore, Symbol},
    std::{fs, path::Path},
};

/// Parse rows written as strings of '0'/'1'.
pub fn bits(rows: &[&str]) -> BitMatrix {
    let rows: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| row.chars().map(|c| c == '1').collect())
        .collect();
    BitMatrix::from_rows(&rows).unwrap()
}

/// Write one matrix file for nominal width `width` with the given header.
pub fn write_matrix(
    dir: &Path,
    width: usize,
    symbol: Symbol,
    (k, r, n): (usize, usize, usize),
    rows: &[&str],
) {
    let file = MatrixFile {
        symbol,
        k,
        r,
        n,
        matrix: bits(rows),
    };
    file.write(&MatrixStore::new(dir).path_for(width, symbol))
        .unwrap();
}

/// The (7,4) Hamming code.
pub fn write_hamming_7_4(dir: &Path) {
    let shape = (4, 3, 7);
    write_matrix(
        dir,
        4,
        Symbol::G,
        shape,
        &["1000110", "0100101", "0010011", "0001111"],
    );
    write_matrix(dir, 4, Symbol::H, shape, &["1101100", "1011010", "0111001"]);
}

/// The (3,1) repetition code.
pub fn write_repetition_3_1(dir: &Path) {
    let shape = (1, 2, 3);
    write_matrix(dir, 1, Symbol::G, shape, &["111"]);
    write_matrix(dir, 1, Symbol::H, shape, &["110", "101"]);
}

pub const ENCODER_TEMPLATE: &str = "\
const MAX_PARITY_WIDTH = u32:8;

pub fn encode_3_1(m: u1) -> uN[MAX_PARITY_WIDTH] {
{{ secded_enc_3_1 }}
}

pub fn encode_7_4(m: u4) -> uN[MAX_PARITY_WIDTH] {
{{secded_enc_7_4}}
}
";

pub const DECODER_TEMPLATE: &str = "\
pub fn decode_3_1(cw: u3) -> (uN[MAX_PARITY_WIDTH], uN[24]) {
{{ secded_dec_syndrome_3_1 }}
{{ secded_dec_H_3_1 }}
    (syndrome, parity_check_matrix)
}
{{ secded_dec_syndrome_16_11 }}
";

pub fn write_templates(dir: &Path) {
    fs::write(dir.join("enc.x.jinja2"), ENCODER_TEMPLATE).unwrap();
    fs::write(dir.join("dec.x.jinja2"), DECODER_TEMPLATE).unwrap();
}
