// tests/version_proptest.rs
use proptest::prelude::*;
use tpg_release::domain::version::{check_progression, ReleaseVersion};
use tpg_release::error::InputError;
use tpg_release::release_version::next_minor_version;

fn tag(v: (u64, u64, u64)) -> String {
    format!("v{}.{}.{}", v.0, v.1, v.2)
}

proptest! {
    #[test]
    fn progression_matches_numeric_ordering(
        a in (0u64..200, 0u64..200, 0u64..200),
        b in (0u64..200, 0u64..200, 0u64..200),
    ) {
        let result = check_progression(&tag(a), &tag(b));
        if a > b {
            prop_assert!(result.is_ok());
        } else {
            let is_not_newer = matches!(result, Err(InputError::NotNewer { .. }));
            prop_assert!(is_not_newer);
        }
    }

    #[test]
    fn parsed_version_displays_as_given(v in (0u64..100_000, 0u64..100_000, 0u64..100_000)) {
        let parsed = ReleaseVersion::parse("release_version", &tag(v)).unwrap();
        prop_assert_eq!(parsed.to_string(), tag(v));
    }

    #[test]
    fn tags_without_v_prefix_are_rejected(v in (0u64..1000, 0u64..1000, 0u64..1000)) {
        let bare = format!("{}.{}.{}", v.0, v.1, v.2);
        let is_invalid = matches!(
            ReleaseVersion::parse("release_version", &bare),
            Err(InputError::InvalidFormat { .. })
        );
        prop_assert!(is_invalid);
    }

    #[test]
    fn next_minor_is_always_newer(v in (0u64..1000, 0u64..1000, 0u64..1000)) {
        let latest = tag(v);
        let next = next_minor_version(&latest).unwrap();
        prop_assert!(check_progression(&next.to_string(), &latest).is_ok());
        prop_assert_eq!(next.patch(), 0);
    }
}
