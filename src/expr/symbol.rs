
//! Named leaves: free variables and named constants.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A validated symbol name: a letter followed by zero or more letters,
/// digits, or apostrophes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Var(String);

/// A named leaf of an expression tree.
///
/// A `Variable` is an unbound name, eligible as a differentiation
/// target. A `Constant` is a named value placeholder which always
/// differentiates to zero. Both substitute from the evaluation point
/// when bound.
///
/// Equality and hashing are by name alone, so a variable and a
/// constant sharing a name are the same symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Symbol {
  Variable(Var),
  Constant(Var),
}

#[derive(Clone, Debug)]
pub struct TryFromStringError {
  original_string: String,
}

static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z][a-zA-Z0-9']*$").unwrap()
});

impl Var {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Symbol {
  pub fn variable(name: impl Into<String>) -> Option<Symbol> {
    Var::new(name).map(Symbol::Variable)
  }

  pub fn constant(name: impl Into<String>) -> Option<Symbol> {
    Var::new(name).map(Symbol::Constant)
  }

  pub fn name(&self) -> &Var {
    match self {
      Symbol::Variable(v) => v,
      Symbol::Constant(v) => v,
    }
  }
}

impl TryFrom<String> for Var {
  type Error = TryFromStringError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(TryFromStringError { original_string: name })
    }
  }
}

impl From<Var> for String {
  fn from(v: Var) -> Self {
    v.0
  }
}

impl From<Var> for Symbol {
  fn from(v: Var) -> Self {
    Symbol::Variable(v)
  }
}

impl PartialEq for Symbol {
  fn eq(&self, other: &Symbol) -> bool {
    self.name() == other.name()
  }
}

impl Eq for Symbol {}

impl Hash for Symbol {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name().hash(state);
  }
}

impl Display for Var {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", &self.0)
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl Display for TryFromStringError {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "Invalid symbol name: {:?}", self.original_string)
  }
}

impl StdError for TryFromStringError {}
