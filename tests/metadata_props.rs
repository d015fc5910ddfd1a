//! Property tests for release body decomposition.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use relbridge::metadata::{
    RELEASE_LABELS, RepoLocation, extract, parse_asset_links, parse_headers, split_changelog,
};
use relbridge::version::is_newer;

fn text_without_delimiter() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:*\n-]{0,80}"
}

proptest! {
    #[test]
    fn every_label_always_present(body in "[ -~\n]{0,200}") {
        let headers = parse_headers(&body, RELEASE_LABELS);
        prop_assert_eq!(headers.len(), RELEASE_LABELS.len());
        for label in RELEASE_LABELS {
            prop_assert!(headers.contains_key(*label));
        }
    }

    #[test]
    fn recognized_value_is_recovered(value in "[a-zA-Z0-9.]{1,20}") {
        let body = format!("Intro line\nRequiresPHP: {}\nmore text", value);
        let headers = parse_headers(&body, RELEASE_LABELS);
        prop_assert_eq!(&headers["RequiresPHP"], &value);
        prop_assert_eq!(&headers["Tested"], "");
    }

    #[test]
    fn no_delimiter_means_no_changelog(body in text_without_delimiter()) {
        prop_assert_eq!(split_changelog(&body), "");
    }

    #[test]
    fn single_delimiter_yields_tail(
        head in text_without_delimiter(),
        tail in "[a-zA-Z0-9 .,*-]{0,80}",
    ) {
        let body = format!("{}|||{}", head, tail);
        prop_assert_eq!(split_changelog(&body), tail.trim());
    }

    #[test]
    fn repeated_delimiter_means_no_changelog(
        a in text_without_delimiter(),
        b in text_without_delimiter(),
        c in text_without_delimiter(),
    ) {
        let body = format!("{}|||{}|||{}", a, b, c);
        prop_assert_eq!(split_changelog(&body), "");
    }

    #[test]
    fn asset_links_stay_in_repo_namespace(
        labels in prop::collection::btree_set("[a-z0-9]{1,6}", 1..5),
    ) {
        let location = RepoLocation::github("o", "r");
        let value = labels
            .iter()
            .map(|l| format!("{}|/assets/{}.png", l, l))
            .collect::<Vec<_>>()
            .join(",");

        let links = parse_asset_links(&value, &location).unwrap();
        prop_assert_eq!(links.len(), labels.len());
        for (label, url) in &links {
            prop_assert_eq!(url, &format!("https://github.com/o/r/assets/{}.png", label));
        }
    }

    #[test]
    fn version_bump_is_newer(major in 0u64..50, minor in 0u64..50, patch in 0u64..50) {
        let installed = format!("{}.{}.{}", major, minor, patch);
        let bumped = format!("{}.{}.{}", major, minor, patch + 1);
        prop_assert!(is_newer(&bumped, &installed));
        prop_assert!(!is_newer(&installed, &bumped));
        prop_assert!(!is_newer(&installed, &installed));
    }
}

#[test]
fn test_readme_example_links() {
    let meta = extract(
        "Icons: 1x|/a.png,2x|/b.png",
        &RepoLocation::github("o", "r"),
    )
    .unwrap();
    let icons = meta.icons.unwrap();
    assert_eq!(icons["1x"], "https://github.com/o/r/a.png");
    assert_eq!(icons["2x"], "https://github.com/o/r/b.png");
    assert_eq!(meta.banners, None);
}
