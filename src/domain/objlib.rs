//! Object library tokens and their IFS path form.

use crate::domain::project::DEFAULT_CURLIB;

/// Reserved token meaning "the job's current library".
pub const CURLIB_KEYWORD: &str = "*CURLIB";

/// Library objects land in when no current library is set.
pub const FALLBACK_LIBRARY: &str = "QGPL";

/// Resolve `*CURLIB` against the project's current library.
pub fn resolve_library<'a>(objlib: &'a str, curlib: &'a str) -> &'a str {
    if !objlib.eq_ignore_ascii_case(CURLIB_KEYWORD) {
        return objlib;
    }
    if curlib.eq_ignore_ascii_case(DEFAULT_CURLIB) || curlib.trim().is_empty() {
        FALLBACK_LIBRARY
    } else {
        curlib
    }
}

/// Whether `name` is a valid system library name.
pub fn is_library_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= 10
        && (first.is_ascii_alphabetic() || matches!(first, '$' | '#' | '@'))
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '$' | '#' | '@' | '_' | '.'))
}

/// Translate an object library token into the `/QSYS.LIB/<LIB>.LIB` form make
/// uses to locate compiled objects.
///
/// Tokens that are neither a library name nor `*CURLIB` come back unchanged.
pub fn objlib_to_path(objlib: &str, curlib: &str) -> String {
    let library = resolve_library(objlib, curlib);
    if is_library_name(library) {
        format!("/QSYS.LIB/{}.LIB", library.to_uppercase())
    } else {
        library.to_string()
    }
}

/// Expand `&NAME` references using `lookup`; unknown names stay verbatim.
pub fn expand_variables<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len =
            after.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_')).unwrap_or(after.len());
        let name = &after[..name_len];

        match (name.is_empty(), lookup(name)) {
            (false, Some(replacement)) => out.push_str(&replacement),
            _ => {
                out.push('&');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}
