// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Formats build information for `--version`.
pub fn format_build_info() -> String {
    // "rustc 1.88.0 (extra info)"
    let rust_version = built_info::RUSTC_VERSION
        .split_whitespace()
        .find(|part| part.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .unwrap_or("unknown");

    let dirty = built_info::GIT_DIRTY.unwrap_or(false);
    let git_revision = built_info::GIT_COMMIT_HASH.unwrap_or("unknown");
    let revision = if dirty {
        format!("{git_revision}-dirty")
    } else {
        git_revision.to_string()
    };

    format!(
        "{} {} (rustc {rust_version}, {} build, revision {revision}, tag {})",
        built_info::PKG_NAME,
        built_info::PKG_VERSION,
        built_info::PROFILE,
        built_info::GIT_VERSION.unwrap_or("unknown"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format_contains_required_fields() {
        let version_info = format_build_info();

        assert!(version_info.starts_with(built_info::PKG_NAME));
        assert!(version_info.contains(built_info::PKG_VERSION));
        assert!(version_info.contains("rustc "));
        assert!(version_info.contains(built_info::PROFILE));
        assert!(version_info.contains("revision "));
    }
}
