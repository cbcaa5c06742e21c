//! Naming policy for the artifacts of one fold run.
//!
//! Every name derives from a sanitized slug of the source container's name
//! plus a UTC timestamp with second resolution:
//!
//! ```text
//! final image          devc_to_docker/<slug>:<timestamp>
//! intermediate image   <final image>-stage
//! disposable container devc-to-docker-<slug>-<timestamp>   (max 60 chars)
//! ```

use chrono::{DateTime, Utc};

/// Repository used for default final image tags.
pub const IMAGE_REPOSITORY: &str = "devc_to_docker";

/// Prefix of disposable container names.
pub const CONTAINER_PREFIX: &str = "devc-to-docker";

/// Suffix appended to the final tag to derive the intermediate tag.
pub const STAGE_SUFFIX: &str = "-stage";

/// Longest disposable container name this tool generates.
pub const MAX_CONTAINER_NAME_LEN: usize = 60;

const FALLBACK_SLUG: &str = "container";

/// Replace every character outside `[A-Za-z0-9_.-]` with `-` and trim
/// leading/trailing `-` and `.`. Falls back to `container` when nothing
/// survives.
///
/// ```
/// use devc_core::sanitize_slug;
///
/// assert_eq!(sanitize_slug("My App!"), "My-App");
/// assert_eq!(sanitize_slug("!!!"), "container");
/// ```
pub fn sanitize_slug(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c| c == '-' || c == '.');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Format a UTC instant as `YYYYMMDDHHMMSS`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Identity of one fold run: the slug and timestamp every default name is
/// built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    pub slug: String,
    pub timestamp: String,
}

impl RunIdentity {
    pub fn new(container_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            slug: sanitize_slug(container_name),
            timestamp: timestamp(now),
        }
    }

    pub fn default_final_tag(&self) -> String {
        format!("{IMAGE_REPOSITORY}/{}:{}", self.slug, self.timestamp)
    }

    pub fn intermediate_tag_for(final_tag: &str) -> String {
        format!("{final_tag}{STAGE_SUFFIX}")
    }

    /// Name of the disposable container.
    ///
    /// Long slugs are cut to [`MAX_CONTAINER_NAME_LEN`] by keeping the
    /// prefix. Two runs whose names only differ past the cut collide; no
    /// collision detection is attempted.
    pub fn disposable_container_name(&self) -> String {
        let name = format!("{CONTAINER_PREFIX}-{}-{}", self.slug, self.timestamp);
        name.chars().take(MAX_CONTAINER_NAME_LEN).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn default_tags_for_spaced_name() {
        let id = RunIdentity::new("My App!", at(2024, 1, 1, 12, 0, 0));
        assert_eq!(id.slug, "My-App");
        assert_eq!(id.timestamp, "20240101120000");
        assert_eq!(id.default_final_tag(), "devc_to_docker/My-App:20240101120000");
        assert_eq!(
            RunIdentity::intermediate_tag_for(&id.default_final_tag()),
            "devc_to_docker/My-App:20240101120000-stage"
        );
    }

    #[test]
    fn sanitize_trims_dots_and_dashes() {
        assert_eq!(sanitize_slug("..hidden--"), "hidden");
        assert_eq!(sanitize_slug("vsc-proj_1.2"), "vsc-proj_1.2");
        assert_eq!(sanitize_slug(""), "container");
        assert_eq!(sanitize_slug("-.-"), "container");
        assert_eq!(sanitize_slug("naïve box"), "na-ve-box");
    }

    #[test]
    fn timestamp_is_zero_padded() {
        assert_eq!(timestamp(at(2025, 3, 4, 5, 6, 7)), "20250304050607");
    }

    #[test]
    fn disposable_name_short() {
        let id = RunIdentity::new("proj", at(2024, 1, 1, 12, 0, 0));
        assert_eq!(
            id.disposable_container_name(),
            "devc-to-docker-proj-20240101120000"
        );
    }

    #[test]
    fn disposable_name_truncated_to_limit() {
        let id = RunIdentity::new(&"x".repeat(80), at(2024, 1, 1, 12, 0, 0));
        let name = id.disposable_container_name();
        assert_eq!(name.len(), MAX_CONTAINER_NAME_LEN);
        assert!(name.starts_with("devc-to-docker-xxxx"));
        assert!(!name.contains("20240101120000"));
    }

    proptest! {
        #[test]
        fn slug_is_identifier_safe(name in ".{0,64}") {
            let slug = sanitize_slug(&name);
            prop_assert!(!slug.is_empty());
            prop_assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')));
            prop_assert!(!slug.starts_with(['-', '.']));
            prop_assert!(!slug.ends_with(['-', '.']));
        }

        #[test]
        fn disposable_name_never_exceeds_limit(name in ".{0,128}") {
            let id = RunIdentity::new(&name, Utc::now());
            prop_assert!(id.disposable_container_name().chars().count() <= MAX_CONTAINER_NAME_LEN);
        }
    }
}
