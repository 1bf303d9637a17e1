//! Compiles a [`Code`] into DSLX encoder and decoder fragments.
//!
//! All three compilations enumerate items in ascending index order and then
//! concatenate them in descending order, so the item produced last ends up as
//! the most significant chunk. Each full concatenation is widened to
//! `uN[MAX_PARITY_WIDTH]` so every code fits the same output slot.

use {
    crate::{
        expr::{Binding, Block, Expr, Tail, Ty, MAX_PARITY_WIDTH},
        Code, CodeBook, EccError, Result,
    },
    std::collections::BTreeMap,
    tracing::debug,
};

/// Message bits in the encoder template
pub const MESSAGE: &str = "m";
/// Received codeword bits in the decoder template
pub const CODEWORD: &str = "cw";

/// Fragment name -> generated DSLX, ordered by name.
pub type FragmentMap = BTreeMap<String, String>;

pub fn encoder_fragment_name(code: &Code) -> String {
    format!("secded_enc_{}_{}", code.n(), code.k())
}

pub fn syndrome_fragment_name(code: &Code) -> String {
    format!("secded_dec_syndrome_{}_{}", code.n(), code.k())
}

pub fn parity_check_fragment_name(code: &Code) -> String {
    format!("secded_dec_H_{}_{}", code.n(), code.k())
}

fn max_parity_width() -> Ty {
    Ty::Named(MAX_PARITY_WIDTH)
}

fn xor_of(base: &'static str, indices: impl Iterator<Item = usize>) -> Expr {
    let terms: Vec<Expr> = indices.map(|index| Expr::BitSlice { base, index }).collect();
    debug_assert!(!terms.is_empty(), "Code guarantees non-empty XOR chains");
    Expr::Xor(terms)
}

/// Concatenate `prefix_<count-1> ++ ... ++ prefix_0`.
fn descending_concat(prefix: &str, count: usize) -> Expr {
    Expr::Concat(
        (0..count)
            .rev()
            .map(|i| Expr::ident(format!("{prefix}_{i}")))
            .collect(),
    )
}

/// Parity bit `i` is the XOR of the message bits selected by column `k + i`
/// of G. The identity block of G needs no logic.
pub fn compile_encoder(code: &Code) -> Block {
    let g = code.g();
    let bindings = (0..code.r())
        .map(|i| {
            Binding::new(
                format!("parity_{i}"),
                xor_of(MESSAGE, g.col_ones(code.k() + i)),
            )
        })
        .collect();

    Block {
        bindings,
        tail: Tail::Value(descending_concat("parity", code.r()).cast(max_parity_width())),
    }
}

/// Row `i` of H computes syndrome bit `r - 1 - i`: row 0 is the most
/// significant syndrome bit.
pub fn compile_syndrome(code: &Code) -> Block {
    let h = code.h();
    let r = code.r();
    let bindings = (0..r)
        .map(|row| {
            Binding::new(
                format!("syndrome_{}", r - 1 - row),
                xor_of(CODEWORD, h.row_ones(row)),
            )
        })
        .collect();

    Block {
        bindings,
        tail: Tail::Let(Binding::new(
            "syndrome",
            descending_concat("syndrome", r).cast(max_parity_width()),
        )),
    }
}

/// Column `j` of H as a `u<r>` constant, top row as the most significant bit.
pub fn compile_parity_check_columns(code: &Code) -> Block {
    let h = code.h();
    let bindings = (0..code.n())
        .map(|col| {
            let literal = Expr::Literal { bits: h.column(col) };
            Binding::new(
                format!("parity_check_matrix_{col}"),
                literal.cast(max_parity_width()),
            )
        })
        .collect();

    Block {
        bindings,
        tail: Tail::Let(Binding::new(
            "parity_check_matrix",
            descending_concat("parity_check_matrix", code.n()),
        )),
    }
}

fn lookup(codes: &CodeBook, width: usize) -> Result<&Code> {
    codes.get(&width).ok_or_else(|| EccError::MissingCode {
        width,
        detail: "no code was loaded for this width".to_string(),
    })
}

/// Encoder fragments for every width. Fails without producing anything if a
/// width has no code.
pub fn encoder_fragments(codes: &CodeBook, widths: &[usize]) -> Result<FragmentMap> {
    let mut fragments = FragmentMap::new();
    for &width in widths {
        let code = lookup(codes, width)?;
        let name = encoder_fragment_name(code);
        debug!(width, %name, "compiled encoder fragment");
        fragments.insert(name, compile_encoder(code).to_string());
    }
    Ok(fragments)
}

/// Syndrome and parity-check-column fragments for every width, all or nothing.
pub fn decoder_fragments(codes: &CodeBook, widths: &[usize]) -> Result<FragmentMap> {
    let mut fragments = FragmentMap::new();
    for &width in widths {
        let code = lookup(codes, width)?;
        let syndrome = syndrome_fragment_name(code);
        let columns = parity_check_fragment_name(code);
        debug!(width, %syndrome, %columns, "compiled decoder fragments");
        fragments.insert(syndrome, compile_syndrome(code).to_string());
        fragments.insert(columns, compile_parity_check_columns(code).to_string());
    }
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{code::tests::hamming_7_4, expr::INDENT},
        std::collections::HashMap,
    };

    /// Evaluate an XOR chain of bit slices against `bits`.
    fn eval_xor(expr: &Expr, bits: &[bool]) -> bool {
        match expr {
            Expr::Xor(terms) => terms.iter().fold(false, |acc, term| match term {
                Expr::BitSlice { index, .. } => acc ^ bits[*index],
                other => panic!("unexpected XOR term {other:?}"),
            }),
            other => panic!("expected XOR, got {other:?}"),
        }
    }

    /// Evaluate each binding of `block`, then the MSB-first bits of its
    /// concatenated tail.
    fn eval_block(block: &Block, bits: &[bool]) -> Vec<bool> {
        let env: HashMap<&str, bool> = block
            .bindings
            .iter()
            .map(|b| (b.name.as_str(), eval_xor(&b.value, bits)))
            .collect();
        let concat = match block.tail_value() {
            Expr::Cast { value, .. } => value.as_ref(),
            other => other,
        };
        match concat {
            Expr::Concat(parts) => parts
                .iter()
                .map(|part| match part {
                    Expr::Ident(name) => env[name.as_str()],
                    other => panic!("unexpected concat part {other:?}"),
                })
                .collect(),
            other => panic!("expected concat, got {other:?}"),
        }
    }

    fn encode(code: &Code, message: &[bool]) -> Vec<bool> {
        (0..code.n())
            .map(|col| code.g().col_ones(col).fold(false, |acc, row| acc ^ message[row]))
            .collect()
    }

    #[test]
    fn test_encoder_text() {
        let code = hamming_7_4();
        let expected = [
            "let parity_0 = m[0+:u1] ^ m[1+:u1] ^ m[3+:u1];",
            "let parity_1 = m[0+:u1] ^ m[2+:u1] ^ m[3+:u1];",
            "let parity_2 = m[1+:u1] ^ m[2+:u1] ^ m[3+:u1];",
            "(parity_2 ++ parity_1 ++ parity_0) as uN[MAX_PARITY_WIDTH]",
        ]
        .map(|line| format!("{INDENT}{line}"))
        .join("\n");
        assert_eq!(compile_encoder(&code).to_string(), expected);
    }

    #[test]
    fn test_encoder_bit_ordering() {
        let block = compile_encoder(&hamming_7_4());
        let names: Vec<&str> = block.bindings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["parity_0", "parity_1", "parity_2"]);
        assert_eq!(
            block.tail_value(),
            &Expr::Concat(vec![
                Expr::ident("parity_2"),
                Expr::ident("parity_1"),
                Expr::ident("parity_0"),
            ])
            .cast(Ty::Named(MAX_PARITY_WIDTH))
        );
    }

    #[test]
    fn test_encoder_matches_generator() {
        let code = hamming_7_4();
        let block = compile_encoder(&code);
        for value in 0u32..16 {
            let message: Vec<bool> = (0..4).map(|bit| value >> bit & 1 == 1).collect();
            let codeword = encode(&code, &message);
            // MSB first: parity_{r-1} .. parity_0
            let expected: Vec<bool> = codeword[4..].iter().rev().copied().collect();
            assert_eq!(eval_block(&block, &message), expected);
        }
    }

    #[test]
    fn test_syndrome_relabeling() {
        let code = hamming_7_4();
        let block = compile_syndrome(&code);
        assert_eq!(
            block.binding("syndrome_2").unwrap().to_string(),
            "let syndrome_2 = cw[0+:u1] ^ cw[1+:u1] ^ cw[3+:u1] ^ cw[4+:u1];"
        );
        assert_eq!(
            block.binding("syndrome_0").unwrap().to_string(),
            "let syndrome_0 = cw[1+:u1] ^ cw[2+:u1] ^ cw[3+:u1] ^ cw[6+:u1];"
        );
        assert_eq!(block.bindings[0].name, "syndrome_2");
        assert!(block.to_string().ends_with(
            "let syndrome = (syndrome_2 ++ syndrome_1 ++ syndrome_0) as uN[MAX_PARITY_WIDTH];"
        ));
    }

    #[test]
    fn test_single_error_syndrome_matches_column() {
        let code = hamming_7_4();
        let syndrome = compile_syndrome(&code);
        let columns = compile_parity_check_columns(&code);

        let codeword = encode(&code, &[true, false, true, true]);
        assert_eq!(eval_block(&syndrome, &codeword), vec![false; 3]);

        for j in 0..code.n() {
            let mut received = codeword.clone();
            received[j] = !received[j];
            let column = columns
                .binding(&format!("parity_check_matrix_{j}"))
                .unwrap();
            assert_eq!(
                Some(eval_block(&syndrome, &received).as_slice()),
                column.value.literal_bits()
            );
        }
    }

    #[test]
    fn test_parity_check_columns_text() {
        let text = compile_parity_check_columns(&hamming_7_4()).to_string();
        let lines: Vec<&str> = text.lines().map(str::trim_start).collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "let parity_check_matrix_0 = u3:0b110 as uN[MAX_PARITY_WIDTH];"
        );
        assert_eq!(
            lines[6],
            "let parity_check_matrix_6 = u3:0b001 as uN[MAX_PARITY_WIDTH];"
        );
        assert_eq!(
            lines[7],
            "let parity_check_matrix = parity_check_matrix_6 ++ parity_check_matrix_5 ++ \
             parity_check_matrix_4 ++ parity_check_matrix_3 ++ parity_check_matrix_2 ++ \
             parity_check_matrix_1 ++ parity_check_matrix_0;"
        );
    }

    #[test]
    fn test_fragment_maps() {
        let codes: CodeBook = [(4, hamming_7_4())].into_iter().collect();

        let enc = encoder_fragments(&codes, &[4]).unwrap();
        assert_eq!(enc.keys().collect::<Vec<_>>(), ["secded_enc_7_4"]);

        let dec = decoder_fragments(&codes, &[4]).unwrap();
        assert_eq!(
            dec.keys().collect::<Vec<_>>(),
            ["secded_dec_H_7_4", "secded_dec_syndrome_7_4"]
        );
    }

    #[test]
    fn test_missing_width_fails_whole_map() {
        let codes: CodeBook = [(4, hamming_7_4())].into_iter().collect();
        match decoder_fragments(&codes, &[4, 32]).unwrap_err() {
            EccError::MissingCode { width, .. } => assert_eq!(width, 32),
            other => panic!("expected missing code, got {other:?}"),
        }
    }
}
