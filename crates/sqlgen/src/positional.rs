//! Named (`:name`) to positional (`$n`) placeholder translation.
//!
//! The builder's public contract is named placeholders. Drivers such as
//! `tokio-postgres` expect `$1, $2, ...` and an ordered parameter slice, so the
//! translation happens here, at the driver boundary, without touching the
//! builder's output.

use crate::builder::Parameters;
use crate::error::{SqlGenError, SqlGenResult};
use crate::value::Value;
use std::fmt::Write;
use tokio_postgres::types::ToSql;

/// SQL with `$n` placeholders and the values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl PositionalQuery {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Placeholder name at the start of `rest`.
///
/// Names may contain dots (`:u.id` for a qualified column). The longest dotted
/// prefix with a bound value wins, so `:u.id.x` still resolves `u.id` when only
/// that name is bound. With no bound candidate the whole dotted name is used.
fn placeholder_name<'a>(rest: &'a str, params: &Parameters) -> &'a str {
    let mut ends = Vec::new();
    let mut end = 0;
    let mut chars = rest.char_indices().peekable();
    while let Some((j, c)) = chars.next() {
        if is_ident_char(c) {
            end = j + c.len_utf8();
        } else if c == '.' && matches!(chars.peek(), Some((_, n)) if is_ident_start(*n)) {
            ends.push(end);
        } else {
            break;
        }
    }
    ends.push(end);

    ends.iter()
        .rev()
        .map(|&e| &rest[..e])
        .find(|name| params.contains_key(*name))
        .unwrap_or(&rest[..end])
}

/// Rewrite `:name` placeholders as `$n`.
///
/// - Names are numbered by first occurrence; a repeated name reuses its index.
/// - Dotted names (`:u.id`) match the longest bound name.
/// - `::type` casts, quoted literals/identifiers and comments are copied as-is.
/// - A placeholder with no entry in `params` fails with
///   [`SqlGenError::UnboundParameter`]. Unreferenced entries are ignored.
pub fn named_to_positional(sql: &str, params: &Parameters) -> SqlGenResult<PositionalQuery> {
    let mut out = String::with_capacity(sql.len());
    let mut order: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    let mut chars = sql.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\'' | '"' => {
                out.push(c);
                for (_, next) in chars.by_ref() {
                    out.push(next);
                    if next == c {
                        break;
                    }
                }
            }
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                out.push(c);
                for (_, next) in chars.by_ref() {
                    out.push(next);
                    if next == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                out.push(c);
                let mut prev = '\0';
                for (_, next) in chars.by_ref() {
                    out.push(next);
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            ':' if matches!(chars.peek(), Some((_, ':'))) => {
                out.push_str("::");
                chars.next();
            }
            ':' if matches!(chars.peek(), Some((_, n)) if is_ident_start(*n)) => {
                let name = placeholder_name(&sql[i + 1..], params);
                let end = i + 1 + name.len();
                while chars.next_if(|(j, _)| *j < end).is_some() {}

                let idx = match order.iter().position(|seen| *seen == name) {
                    Some(pos) => pos + 1,
                    None => {
                        let value = params
                            .get(name)
                            .ok_or_else(|| SqlGenError::UnboundParameter(name.to_string()))?;
                        order.push(name);
                        values.push(value.clone());
                        order.len()
                    }
                };
                let _ = write!(&mut out, "${idx}");
            }
            _ => out.push(c),
        }
    }

    Ok(PositionalQuery {
        sql: out,
        params: values,
    })
}
