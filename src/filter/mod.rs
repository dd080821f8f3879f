//! Platform filter matching
//!
//! Fragments restrict themselves to a platform with an LDAP-style
//! `Eclipse-PlatformFilter` header such as
//! `(& (osgi.ws=win32) (osgi.os=win32) (osgi.arch=x86))`.
//!
//! The expression is parsed once into a [`Filter`] tree and evaluated against a
//! [`PlatformDescriptor`]. Only `=`, `&`, `|` and `!` are supported; values are
//! compared with case-sensitive string equality, so `*` is an ordinary
//! character and version ranges are opaque strings.

mod parser;

use std::fmt;

use thiserror::Error;

use crate::domain::PlatformDescriptor;

/// Parsed platform filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Equals { key: String, value: String },
}

/// Malformed filter expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at position {position} in filter '{expression}'")]
pub struct FilterSyntaxError {
    pub expression: String,
    /// Byte offset into `expression`
    pub position: usize,
    pub reason: String,
}

impl Filter {
    /// Parse a filter expression
    pub fn parse(expression: &str) -> Result<Self, FilterSyntaxError> {
        parser::Parser::new(expression).parse()
    }

    /// Evaluate the filter against a platform descriptor
    pub fn matches(&self, platform: &PlatformDescriptor) -> bool {
        match self {
            Filter::And(operands) => operands.iter().all(|f| f.matches(platform)),
            Filter::Or(operands) => operands.iter().any(|f| f.matches(platform)),
            Filter::Not(operand) => !operand.matches(platform),
            Filter::Equals { key, value } => platform.get(key) == Some(value.as_str()),
        }
    }
}

/// Parse `expression` and evaluate it against `platform`
pub fn matches(expression: &str, platform: &PlatformDescriptor) -> Result<bool, FilterSyntaxError> {
    Ok(Filter::parse(expression)?.matches(platform))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(operands) => {
                write!(f, "(&")?;
                for operand in operands {
                    write!(f, "{operand}")?;
                }
                write!(f, ")")
            }
            Filter::Or(operands) => {
                write!(f, "(|")?;
                for operand in operands {
                    write!(f, "{operand}")?;
                }
                write!(f, ")")
            }
            Filter::Not(operand) => write!(f, "(!{operand})"),
            Filter::Equals { key, value } => {
                write!(f, "({key}=")?;
                for c in value.chars() {
                    if matches!(c, '(' | ')' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, ")")
            }
        }
    }
}
