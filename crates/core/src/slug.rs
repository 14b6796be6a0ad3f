//! URL slug derivation for published-content entities.
//!
//! Slugs are derived once, at first save, from the human-entered title and
//! are immutable afterwards. Uniqueness is enforced solely by the storage
//! layer's unique index: two entities with identical titles produce the
//! same slug and the second insert fails. There is deliberately no
//! disambiguation suffix (`-2`, `-3`, …).

/// Derive a URL-safe slug from a title.
///
/// Lowercases the input, maps every run of non-alphanumeric characters to a
/// single hyphen, and trims leading/trailing hyphens.
///
/// `slugify("Hello World!!")` == `"hello-world"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_stripped_and_spaces_become_hyphens() {
        assert_eq!(slugify("Hello World!!"), "hello-world");
    }

    #[test]
    fn runs_of_separators_collapse_to_one_hyphen() {
        assert_eq!(slugify("Rust --- and   SQL"), "rust-and-sql");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(slugify("  ...Senior Engineer?  "), "senior-engineer");
    }

    #[test]
    fn already_clean_titles_pass_through_lowercased() {
        assert_eq!(slugify("CodeCrafted"), "codecrafted");
        assert_eq!(slugify("devboard-2"), "devboard-2");
    }

    #[test]
    fn identical_titles_derive_identical_slugs() {
        // The storage layer's unique index is what rejects the duplicate.
        assert_eq!(slugify("My Post"), slugify("My Post"));
    }

    #[test]
    fn empty_and_symbol_only_titles_yield_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
