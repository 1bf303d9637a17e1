//! Structured intermediate form for generated DSLX and its text rendering.

use std::fmt;

/// Indentation applied to every generated line.
pub const INDENT: &str = "            ";

/// Width constant shared by every supported code, defined by the templates.
pub const MAX_PARITY_WIDTH: &str = "MAX_PARITY_WIDTH";

/// DSLX bit types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    /// `u<w>`
    Bits(usize),
    /// `uN[<name>]`
    Named(&'static str),
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Bits(width) => write!(f, "u{width}"),
            Ty::Named(name) => write!(f, "uN[{name}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// One bit of `base`, emitted `base[index+:u1]`
    BitSlice { base: &'static str, index: usize },
    Xor(Vec<Expr>),
    /// Concatenation, first operand most significant
    Concat(Vec<Expr>),
    /// Constant with `bits[0]` as the most significant bit
    Literal { bits: Vec<bool> },
    Cast { value: Box<Expr>, ty: Ty },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn cast(self, ty: Ty) -> Self {
        Expr::Cast {
            value: Box::new(self),
            ty,
        }
    }

    /// Decode a literal back into its bits, MSB first.
    pub fn literal_bits(&self) -> Option<&[bool]> {
        match self {
            Expr::Literal { bits } => Some(bits.as_slice()),
            Expr::Cast { value, .. } => value.literal_bits(),
            _ => None,
        }
    }

    fn is_compound(&self) -> bool {
        matches!(self, Expr::Xor(_) | Expr::Concat(_))
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::BitSlice { base, index } => write!(f, "{base}[{index}+:u1]"),
            Expr::Xor(terms) => join(f, terms, " ^ "),
            Expr::Concat(parts) => join(f, parts, " ++ "),
            Expr::Literal { bits } => {
                write!(f, "{}:0b", Ty::Bits(bits.len()))?;
                for &bit in bits {
                    f.write_str(if bit { "1" } else { "0" })?;
                }
                Ok(())
            }
            Expr::Cast { value, ty } if value.is_compound() => write!(f, "({value}) as {ty}"),
            Expr::Cast { value, ty } => write!(f, "{value} as {ty}"),
        }
    }
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {};", self.name, self.value)
    }
}

/// Last statement of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tail {
    /// Block evaluates to this expression
    Value(Expr),
    /// Block ends by binding a name the template refers to
    Let(Binding),
}

/// A run of bindings followed by a tail, rendered one statement per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub bindings: Vec<Binding>,
    pub tail: Tail,
}

impl Block {
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }

    /// Expression of the tail, whether bound or not.
    pub fn tail_value(&self) -> &Expr {
        match &self.tail {
            Tail::Value(value) => value,
            Tail::Let(binding) => &binding.value,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for binding in &self.bindings {
            writeln!(f, "{INDENT}{binding}")?;
        }
        match &self.tail {
            Tail::Value(value) => write!(f, "{INDENT}{value}"),
            Tail::Let(binding) => write!(f, "{INDENT}{binding}"),
        }
    }
}
