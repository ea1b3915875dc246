//! Clause fragment inputs.
//!
//! Every list-shaped builder operation (`add_select`, `add_group`, `add_sort`,
//! `add_extra`, `add_where_not_null`) accepts either one fragment or a sequence
//! of fragments through [`IntoFragments`].

/// Conversion into an ordered list of raw SQL fragments.
///
/// A single empty string yields no fragments. Elements of a sequence are kept
/// as given, in order.
pub trait IntoFragments {
    fn into_fragments(self) -> Vec<String>;
}

impl IntoFragments for &str {
    fn into_fragments(self) -> Vec<String> {
        if self.is_empty() {
            Vec::new()
        } else {
            vec![self.to_string()]
        }
    }
}

impl IntoFragments for String {
    fn into_fragments(self) -> Vec<String> {
        if self.is_empty() {
            Vec::new()
        } else {
            vec![self]
        }
    }
}

impl IntoFragments for &String {
    fn into_fragments(self) -> Vec<String> {
        self.as_str().into_fragments()
    }
}

impl<T: Into<String>> IntoFragments for Vec<T> {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: AsRef<str>> IntoFragments for &[T] {
    fn into_fragments(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<T: Into<String>, const N: usize> IntoFragments for [T; N] {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: IntoFragments> IntoFragments for Option<T> {
    fn into_fragments(self) -> Vec<String> {
        self.map(IntoFragments::into_fragments).unwrap_or_default()
    }
}

/// Join SQL pieces with single spaces, trimming each and dropping blank ones.
///
/// ```
/// use sqlgen::concat_sql;
///
/// let sql = concat_sql(["SELECT *", "  FROM users ", "", "WHERE id = :id"]);
/// assert_eq!(sql, "SELECT * FROM users WHERE id = :id");
/// ```
pub fn concat_sql<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref().trim();
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
