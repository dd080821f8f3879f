//! JAR manifest text format
//!
//! A manifest is a sequence of `Name: value` lines. A line starting with a
//! single space continues the previous value. The main section ends at the
//! first blank line; per-entry sections after it are ignored.

/// Syntax error in the manifest text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSyntaxError {
    /// 1-based line number
    pub line: usize,
    /// Header the error belongs to, if known
    pub header: Option<String>,
    pub reason: String,
}

/// Main attributes of a parsed manifest, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, ManifestSyntaxError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut attributes: Vec<(String, String)> = Vec::new();

        for (index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line_no = index + 1;

            if line.is_empty() {
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                match attributes.last_mut() {
                    Some((_, value)) => value.push_str(continuation),
                    None => {
                        return Err(ManifestSyntaxError {
                            line: line_no,
                            header: None,
                            reason: "continuation line without a preceding header".to_string(),
                        });
                    }
                }
                continue;
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(ManifestSyntaxError {
                    line: line_no,
                    header: None,
                    reason: format!("expected 'Name: value', found '{line}'"),
                });
            };

            if !is_valid_name(name) {
                return Err(ManifestSyntaxError {
                    line: line_no,
                    header: Some(name.to_string()),
                    reason: "invalid header name".to_string(),
                });
            }

            let value = value.strip_prefix(' ').unwrap_or(value);
            attributes.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            attributes.push((name.to_string(), value.to_string()));
        }

        Ok(Self { attributes })
    }

    /// Look up a main attribute; header names are case-insensitive
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
