//! Street name normalisation used for every textual comparison

const QUOTES: [char; 4] = ['\'', '"', '\u{2018}', '\u{2019}'];

/// Canonical form of a street name: quotes removed, whitespace collapsed,
/// upper case.
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !QUOTES.contains(c)).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Whether two names refer to the same street after normalisation
pub fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn strips_quotes_and_case() {
        assert_eq!(normalize_name("Test'n Ln"), "TESTN LN");
        assert_eq!(normalize_name("  A\u{2019}n   St "), "AN ST");
        assert!(same_name("O'Connor Dr", "OCONNOR DR"));
    }

    proptest! {
        #[test]
        fn normalisation_is_idempotent(name in "[A-Za-z' ]{0,24}") {
            let once = normalize_name(&name);
            prop_assert_eq!(normalize_name(&once), once.clone());
        }

        #[test]
        fn quotes_and_case_do_not_matter(name in "[A-Za-z ]{1,16}", at in 0usize..16) {
            let mut quoted = name.to_lowercase();
            let at = at.min(quoted.len());
            quoted.insert(at, '\'');
            prop_assert!(same_name(&quoted, &name));
        }
    }
}
