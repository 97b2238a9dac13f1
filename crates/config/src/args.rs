//! Schema-driven token parser with environment fallbacks

use getsecret_core::{EnvironmentVariables, Error, Result};
use indexmap::IndexMap;

/// A resolved option value. The variant of an option's default decides how
/// every override of that option is coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Coerce `raw` to the same kind as `self`.
    pub fn replace(&self, name: &str, raw: &str) -> Result<OptionValue> {
        match self {
            OptionValue::Flag(_) => Ok(OptionValue::Flag(is_truthy(raw))),
            OptionValue::Number(_) => {
                raw.trim()
                    .parse::<f64>()
                    .map(OptionValue::Number)
                    .map_err(|e| {
                        Error::configuration(format!(
                            "option '{name}' expects a number, got '{raw}': {e}"
                        ))
                    })
            }
            OptionValue::Text(_) => Ok(OptionValue::Text(raw.to_string())),
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

fn is_truthy(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// One declared option: its long name, short aliases, literal default and the
/// environment variable that may override the default.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default: OptionValue,
    pub env: &'static str,
}

impl OptionSpec {
    #[must_use]
    pub fn flag(
        name: &'static str,
        aliases: &'static [&'static str],
        default: bool,
        env: &'static str,
    ) -> Self {
        Self {
            name,
            aliases,
            default: OptionValue::Flag(default),
            env,
        }
    }

    #[must_use]
    pub fn number(
        name: &'static str,
        aliases: &'static [&'static str],
        default: f64,
        env: &'static str,
    ) -> Self {
        Self {
            name,
            aliases,
            default: OptionValue::Number(default),
            env,
        }
    }

    #[must_use]
    pub fn text(
        name: &'static str,
        aliases: &'static [&'static str],
        default: &str,
        env: &'static str,
    ) -> Self {
        Self {
            name,
            aliases,
            default: OptionValue::Text(default.to_string()),
            env,
        }
    }

    fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

/// Options resolved against a schema plus the untouched delegate command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    values: IndexMap<&'static str, OptionValue>,
    remainder: String,
}

impl ParsedArgs {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// The delegate command line, space-joined
    #[must_use]
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn flag(&self, name: &str) -> Result<bool> {
        self.get(name)
            .and_then(OptionValue::as_flag)
            .ok_or_else(|| missing(name, "boolean"))
    }

    pub fn number(&self, name: &str) -> Result<f64> {
        self.get(name)
            .and_then(OptionValue::as_number)
            .ok_or_else(|| missing(name, "number"))
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        self.get(name)
            .and_then(OptionValue::as_text)
            .ok_or_else(|| missing(name, "string"))
    }
}

fn missing(name: &str, kind: &str) -> Error {
    Error::configuration(format!("option '{name}' is not a declared {kind} option"))
}

/// Parse `tokens` against `schema`.
///
/// Each option starts from its environment variable (when set and non-empty)
/// or its literal default; option tokens then override it. Parsing stops at
/// the first token that does not start with `-`; that token and the rest form
/// the remainder. A bare `--` also stops parsing and is itself dropped, as
/// conventional flag parsers treat the terminator, so `aws-get-secret -- echo $X`
/// and `aws-get-secret echo $X` run the same command.
pub fn parse(
    tokens: &[String],
    schema: &[OptionSpec],
    env: &EnvironmentVariables,
) -> Result<ParsedArgs> {
    let mut values = IndexMap::with_capacity(schema.len());
    for spec in schema {
        let value = match env.get_non_empty(spec.env) {
            Some(raw) => {
                tracing::trace!(
                    option = spec.name,
                    env = spec.env,
                    "option default taken from environment"
                );
                spec.default.replace(spec.name, raw)?
            }
            None => spec.default.clone(),
        };
        values.insert(spec.name, value);
    }

    let mut index = 0;
    while index < tokens.len() {
        let token = tokens[index].as_str();
        if token == "--" {
            return Ok(ParsedArgs {
                values,
                remainder: tokens[index + 1..].join(" "),
            });
        }
        if !token.starts_with('-') {
            return Ok(ParsedArgs {
                values,
                remainder: tokens[index..].join(" "),
            });
        }

        let stripped = token
            .strip_prefix("--")
            .or_else(|| token.strip_prefix('-'))
            .unwrap_or(token);
        let (key, inline) = match stripped.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (stripped, None),
        };
        let spec = schema
            .iter()
            .find(|spec| spec.matches(key))
            .ok_or_else(|| Error::unknown_option(token))?;

        let current = values
            .get(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.default.clone());
        let value = match (inline, &current) {
            (Some(raw), _) => current.replace(spec.name, raw)?,
            (None, OptionValue::Flag(_)) => OptionValue::Flag(true),
            (None, _) => {
                index += 1;
                let raw = tokens.get(index).ok_or_else(|| {
                    Error::configuration(format!("option {token} requires a value"))
                })?;
                current.replace(spec.name, raw)?
            }
        };
        values.insert(spec.name, value);
        index += 1;
    }

    Ok(ParsedArgs {
        values,
        remainder: String::new(),
    })
}
