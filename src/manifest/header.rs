//! OSGi header value grammar
//!
//! ```text
//! header    = clause ( "," clause )*
//! clause    = value ( ";" value )* ( ";" parameter )*
//! parameter = name ":=" argument      (directive)
//!           | name "=" argument       (attribute)
//! argument  = token | quoted-string
//! ```
//!
//! Separators inside double quotes are literal. Quotes are removed from
//! arguments; `\` escapes the next character inside a quoted string.

/// One comma-separated clause of a header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderElement {
    values: Vec<String>,
    attributes: Vec<(String, String)>,
    directives: Vec<(String, String)>,
}

impl HeaderElement {
    /// First bare value (a symbolic name or package name)
    pub fn value(&self) -> &str {
        self.values.first().map_or("", String::as_str)
    }

    /// All bare values of the clause
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn directive(&self, name: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a header value into its clauses
///
/// An empty or blank value yields no clauses.
pub fn parse_header(value: &str) -> Result<Vec<HeaderElement>, String> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_unquoted(value, ',')?
        .into_iter()
        .map(parse_clause)
        .collect()
}

fn parse_clause(clause: &str) -> Result<HeaderElement, String> {
    let clause = clause.trim();
    if clause.is_empty() {
        return Err("empty clause".to_string());
    }

    let mut element = HeaderElement::default();
    for part in split_unquoted(clause, ';')? {
        let part = part.trim();
        if part.is_empty() {
            return Err(format!("empty entry in clause '{clause}'"));
        }

        match find_unquoted(part, '=') {
            Some(eq) => {
                let (name, directive) = match part[..eq].strip_suffix(':') {
                    Some(name) => (name.trim(), true),
                    None => (part[..eq].trim(), false),
                };
                if name.is_empty() {
                    return Err(format!("parameter without a name in clause '{clause}'"));
                }
                let argument = unquote(part[eq + 1..].trim())?;
                if directive {
                    element.directives.push((name.to_string(), argument));
                } else {
                    element.attributes.push((name.to_string(), argument));
                }
            }
            None => {
                if !element.attributes.is_empty() || !element.directives.is_empty() {
                    return Err(format!("value '{part}' follows a parameter"));
                }
                element.values.push(unquote(part)?);
            }
        }
    }

    if element.values.is_empty() {
        return Err(format!("clause '{clause}' has no value"));
    }

    Ok(element)
}

/// Split on `sep` where it appears outside double quotes
fn split_unquoted(input: &str, sep: char) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err(format!("unterminated quote in '{input}'"));
    }
    parts.push(&input[start..]);
    Ok(parts)
}

fn find_unquoted(input: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    for (index, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == target && !in_quotes => return Some(index),
            _ => {}
        }
    }
    None
}

fn unquote(token: &str) -> Result<String, String> {
    let Some(inner) = token.strip_prefix('"') else {
        return Ok(token.to_string());
    };
    let Some(inner) = inner.strip_suffix('"') else {
        return Err(format!("unterminated quote in '{token}'"));
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}
