//! Property-based tests for path composition.
//!
//! These tests use proptest to generate random configuration values and
//! verify that destination paths never escape the docs root.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{destination_dir, encode_workspace_prefix, resolve_docs_path};
    use proptest::prelude::*;
    use std::path::{Component, Path};

    // ============================================================================
    // destination_dir property tests
    // ============================================================================

    proptest! {
        /// Property: every destination starts with the docs root
        #[test]
        fn destination_is_under_docs_root(
            collection in ".*",
            subdir in proptest::option::of(".*"),
            title in ".*",
        ) {
            let root = Path::new("/srv/docs");
            let dest = destination_dir(root, &collection, subdir.as_deref(), &title);
            prop_assert!(dest.starts_with(root), "{} escaped the root", dest.display());
        }

        /// Property: composed destinations never contain `..` components
        #[test]
        fn destination_has_no_parent_components(
            collection in "[a-z./]{0,12}",
            subdir in proptest::option::of("[a-z./]{0,12}"),
            title in "[a-z./]{0,12}",
        ) {
            let dest = destination_dir(Path::new("docs"), &collection, subdir.as_deref(), &title);
            prop_assert!(!dest.components().any(|c| c == Component::ParentDir));
        }

        /// Property: simple names compose to exactly root/collection/title
        #[test]
        fn simple_names_compose_exactly(
            collection in "[a-zA-Z0-9_-]{1,16}",
            title in "[a-zA-Z0-9_-]{1,16}",
        ) {
            let dest = destination_dir(Path::new("docs"), &collection, None, &title);
            prop_assert_eq!(dest, Path::new("docs").join(&collection).join(&title));
        }

        /// Property: a simple target subdir sits between collection and title
        #[test]
        fn target_subdir_sits_between(
            collection in "[a-z]{1,8}",
            subdir in "[a-z]{1,8}",
            title in "[a-z]{1,8}",
        ) {
            let dest = destination_dir(Path::new("docs"), &collection, Some(&subdir), &title);
            prop_assert_eq!(dest, Path::new("docs").join(&collection).join(&subdir).join(&title));
        }

        /// Property: resolved docs paths stay inside the fetched root
        #[test]
        fn docs_path_stays_in_fetched_root(docs_path in ".*") {
            let root = Path::new("/tmp/ws-1234");
            prop_assert!(resolve_docs_path(root, &docs_path).starts_with(root));
        }

        /// Property: workspace prefixes never contain path separators
        #[test]
        fn workspace_prefix_has_no_separators(name in ".*") {
            let prefix = encode_workspace_prefix(&name);
            prop_assert!(!prefix.contains('/'));
            prop_assert!(!prefix.contains('\\'));
            prop_assert!(!prefix.is_empty());
        }
    }
}
