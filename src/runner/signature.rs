//! Declared signatures and arity introspection.
//!
//! Rust closures carry no runtime parameter list, so a callable-under-test declares its signature explicitly.
//! The runner only needs two facts from it: how many inputs each case must supply, and whether that count is
//! checked at all.

use std::fmt;
use std::str::FromStr;

/// How a declared parameter binds arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Required positional parameter.
    Positional,
    /// Parameter with a default value.
    Defaulted,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

/// Number of inputs each test case must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many inputs.
    Fixed(usize),
    /// Defaulted or variadic parameters: the input count is not checked.
    Variable,
}

impl Arity {
    pub fn is_variable(self) -> bool {
        matches!(self, Arity::Variable)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{n}"),
            Arity::Variable => f.write_str("variable"),
        }
    }
}

impl FromStr for Arity {
    type Err = String;

    /// Parse `variable` (or `*`) or a non-negative parameter count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "variable" | "var" | "*" => Ok(Arity::Variable),
            other => other
                .parse::<usize>()
                .map(Arity::Fixed)
                .map_err(|_| format!("invalid arity '{other}': expected a count or 'variable'")),
        }
    }
}

/// The declared parameter list of a callable-under-test.
///
/// ## Examples
/// ```rust
/// use algoesup::runner::{Arity, Signature};
///
/// let add = Signature::new().param("a").param("b");
/// assert_eq!(add.arity(), Arity::Fixed(2));
///
/// let method = Signature::method().param("a");
/// assert_eq!(method.arity(), Arity::Fixed(1));
///
/// let with_default = Signature::new().param("a").defaulted("b");
/// assert_eq!(with_default.arity(), Arity::Variable);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Param>,
    bound_receiver: bool,
}

impl Signature {
    /// Create an empty signature (a zero-parameter function).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the signature of a bound method: the receiver is declared but never supplied by a test case.
    pub fn method() -> Self {
        Self {
            params: vec![Param {
                name: "self".to_string(),
                kind: ParamKind::Positional,
            }],
            bound_receiver: true,
        }
    }

    /// Shorthand for `count` required positional parameters.
    pub fn positional(count: usize) -> Self {
        (0..count).fold(Self::new(), |sig, i| sig.param(format!("arg{i}")))
    }

    /// Shorthand for a signature that only takes `*args`.
    pub fn variadic() -> Self {
        Self::new().var_args("args")
    }

    pub fn param(self, name: impl Into<String>) -> Self {
        self.with(name, ParamKind::Positional)
    }

    pub fn defaulted(self, name: impl Into<String>) -> Self {
        self.with(name, ParamKind::Defaulted)
    }

    pub fn var_args(self, name: impl Into<String>) -> Self {
        self.with(name, ParamKind::VarPositional)
    }

    pub fn var_kwargs(self, name: impl Into<String>) -> Self {
        self.with(name, ParamKind::VarKeyword)
    }

    fn with(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind,
        });
        self
    }

    /// Parameters a caller supplies, i.e. without the bound receiver.
    pub fn params(&self) -> &[Param] {
        let skip = usize::from(self.bound_receiver && !self.params.is_empty());
        &self.params[skip..]
    }

    pub fn is_method(&self) -> bool {
        self.bound_receiver
    }

    /// Derive the arity test cases are checked against.
    ///
    /// ## Returns
    /// - `Arity::Variable` if any parameter is defaulted or variadic.
    /// - `Arity::Fixed(n)` otherwise, where `n` excludes a bound receiver.
    pub fn arity(&self) -> Arity {
        let params = self.params();
        if params.iter().any(|p| p.kind != ParamKind::Positional) {
            Arity::Variable
        } else {
            Arity::Fixed(params.len())
        }
    }
}
