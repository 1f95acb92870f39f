//! Element display templates.
//!
//! A template is literal text around exactly one quantity placeholder:
//! `{}` prints the quantity in its shortest exact form, `{:.N}` prints it
//! with `N` decimal places. `{{` and `}}` produce literal braces.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    prefix: String,
    suffix: String,
    precision: Option<u32>,
}

/// Largest precision accepted in `{:.N}`.
const MAX_PRECISION: u32 = 12;

impl Template {
    pub fn parse(source: &str) -> Result<Self, String> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut precision = None;
        let mut seen = false;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    if seen { suffix.push('{') } else { prefix.push('{') }
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    if seen { suffix.push('}') } else { prefix.push('}') }
                }
                '{' => {
                    if seen {
                        return Err("more than one placeholder".to_string());
                    }
                    let mut spec = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        spec.push(c);
                    }
                    if !closed {
                        return Err("unclosed placeholder".to_string());
                    }
                    precision = parse_spec(&spec)?;
                    seen = true;
                }
                '}' => return Err("unmatched '}'".to_string()),
                c => {
                    if seen { suffix.push(c) } else { prefix.push(c) }
                }
            }
        }

        if !seen {
            return Err("no quantity placeholder".to_string());
        }
        Ok(Self {
            source: source.to_string(),
            prefix,
            suffix,
            precision,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute `quantity` into the template.
    pub fn fill(&self, quantity: Decimal) -> String {
        let number = match self.precision {
            Some(dp) => {
                let rounded = quantity.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
                format!("{:.*}", dp as usize, rounded)
            }
            None => quantity.normalize().to_string(),
        };
        format!("{}{}{}", self.prefix, number, self.suffix)
    }
}

fn parse_spec(spec: &str) -> Result<Option<u32>, String> {
    if spec.is_empty() {
        return Ok(None);
    }
    let digits = spec
        .strip_prefix(":.")
        .ok_or_else(|| format!("unsupported format spec '{}'", spec))?;
    let dp: u32 = digits
        .parse()
        .map_err(|_| format!("bad precision '{}'", digits))?;
    if dp > MAX_PRECISION {
        return Err(format!("precision {} exceeds {}", dp, MAX_PRECISION));
    }
    Ok(Some(dp))
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn plain_placeholder() {
        let t = Template::parse("{} dollar").unwrap();
        assert_eq!(t.fill(dec!(3)), "3 dollar");
        assert_eq!(t.fill(dec!(2.50)), "2.5 dollar");
    }

    #[test]
    fn fixed_precision() {
        let t = Template::parse("${:.2}").unwrap();
        assert_eq!(t.fill(dec!(1.05)), "$1.05");
        assert_eq!(t.fill(dec!(3)), "$3.00");
        assert_eq!(t.fill(dec!(0.125)), "$0.13");
    }

    #[test]
    fn escaped_braces() {
        let t = Template::parse("{{{}}} aurei").unwrap();
        assert_eq!(t.fill(dec!(4)), "{4} aurei");
    }

    #[test]
    fn rejects_bad_templates() {
        assert!(Template::parse("dollars").is_err());
        assert!(Template::parse("{} and {}").is_err());
        assert!(Template::parse("{:x}").is_err());
        assert!(Template::parse("{:.99}").is_err());
        assert!(Template::parse("{ ").is_err());
        assert!(Template::parse("} {}").is_err());
    }
}
