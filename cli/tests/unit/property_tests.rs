//! Property tests for command rendering and package normalization.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use povfab_cli::domain::{PackageList, RemoteCommand};
use proptest::prelude::*;

proptest! {
    /// Any argument survives rendering as exactly one shell word, with or
    /// without privilege escalation.
    #[test]
    fn prop_render_preserves_argument_boundaries(
        args in proptest::collection::vec("[ -~]{0,20}", 1usize..6),
        sudo in proptest::bool::ANY,
    ) {
        let command = RemoteCommand::new(args.clone()).sudo_if(sudo);
        let mut words = shell_words::split(&command.render()).expect("valid shell line");
        if sudo {
            prop_assert_eq!(&words[..4], &["sudo", "-H", "--", "sh"]);
            let inner = words.pop().expect("inner line");
            words = shell_words::split(&inner).expect("valid inner line");
        }
        prop_assert_eq!(words, args);
    }

    /// Environment values survive quoting intact.
    #[test]
    fn prop_env_values_are_quoted(value in "[ -~]{0,30}") {
        let command = RemoteCommand::new(["env"]).env("SSH_AUTH_SOCK", value.clone());
        let words = shell_words::split(&command.command_line()).expect("valid shell line");
        prop_assert_eq!(&words[0], &format!("SSH_AUTH_SOCK={value}"));
    }

    /// Normalization keeps first occurrences in order and drops duplicates.
    #[test]
    fn prop_package_list_is_deduplicated(names in proptest::collection::vec("[a-c]", 0usize..12)) {
        let list = PackageList::from(names.as_slice());
        let mut seen = Vec::new();
        for name in &names {
            if !seen.contains(name) {
                seen.push(name.clone());
            }
        }
        prop_assert_eq!(list.as_slice(), seen.as_slice());
    }
}
