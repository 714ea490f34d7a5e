//! Splitting legacy type expressions into the names they mention.

/// Named components of a legacy type expression, in order of appearance.
///
/// Generic heads are included, numeric array lengths and lifetimes are not,
/// and the `T::` / `<T as Trait>::` qualifiers are dropped.
///
/// ```
/// use chain_metadata::registry::type_names;
///
/// assert_eq!(
///     type_names("Vec<(T::AccountId, Balance)>"),
///     vec!["Vec", "AccountId", "Balance"],
/// );
/// assert_eq!(type_names("[u8; 32]"), vec!["u8"]);
/// ```
pub fn type_names(expression: &str) -> Vec<String> {
    let expression = strip_trait_casts(expression);
    let mut names = Vec::new();
    let mut current = String::new();
    let mut in_lifetime = false;

    let mut flush = |current: &mut String, in_lifetime: bool| {
        if !current.is_empty() && !in_lifetime {
            if let Some(name) = normalize(current) {
                names.push(name);
            }
        }
        current.clear();
    };

    for ch in expression.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == ':' {
            current.push(ch);
        } else {
            flush(&mut current, in_lifetime);
            in_lifetime = ch == '\'';
        }
    }
    flush(&mut current, in_lifetime);

    names
}

fn normalize(token: &str) -> Option<String> {
    let mut token = token.trim_matches(':');
    while let Some(rest) = token.strip_prefix("T::") {
        token = rest;
    }
    if token.is_empty() || token.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(token.to_string())
}

/// `<T as Trait>::Name` becomes `Name`.
fn strip_trait_casts(expression: &str) -> String {
    let mut out = expression.to_string();
    while let Some(start) = out.find("<T as ") {
        match out[start..].find(">::") {
            Some(end) => out.replace_range(start..start + end + 3, ""),
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(type_names("Balance"), vec!["Balance"]);
        assert_eq!(type_names("T::Balance"), vec!["Balance"]);
    }

    #[test]
    fn test_nested_generics_and_tuples() {
        assert_eq!(
            type_names("Option<Vec<(T::AccountId, Compact<Balance>)>>"),
            vec!["Option", "Vec", "AccountId", "Compact", "Balance"]
        );
        assert_eq!(
            type_names("BTreeMap<u32, Vec<u8>>"),
            vec!["BTreeMap", "u32", "Vec", "u8"]
        );
    }

    #[test]
    fn test_arrays_and_lifetimes() {
        assert_eq!(type_names("[u8; 32]"), vec!["u8"]);
        assert_eq!(type_names("&'static [u8]"), vec!["u8"]);
    }

    #[test]
    fn test_trait_cast_qualifier() {
        assert_eq!(
            type_names("<T as Trait>::Balance"),
            vec!["Balance"]
        );
        assert_eq!(
            type_names("Vec<<T as Config>::AccountId>"),
            vec!["Vec", "AccountId"]
        );
    }

    #[test]
    fn test_empty_and_unit() {
        assert!(type_names("").is_empty());
        assert!(type_names("()").is_empty());
    }
}
