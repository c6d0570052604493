//! Storage layout for game versions.
//!
//! Every uploaded version gets its own directory, `{slug}/v{n}`, holding a
//! fixed set of file names. Directories are written once and never
//! overwritten; a new upload always receives a new version number.

/// File name of the game bundle inside a version directory.
pub const GAME_ARCHIVE_FILE: &str = "game.zip";

/// File name of the optional thumbnail inside a version directory.
pub const THUMBNAIL_FILE: &str = "thumbnail.png";

/// Human-facing label for a version number (`3` -> `"v3"`).
pub fn version_label(version_number: i32) -> String {
    format!("v{version_number}")
}

/// Directory holding every asset of one version: `{slug}/v{n}`.
///
/// # Examples
///
/// ```
/// use playhub_core::versioning::version_dir;
///
/// assert_eq!(version_dir("my-game", 1), "my-game/v1");
/// ```
pub fn version_dir(game_slug: &str, version_number: i32) -> String {
    format!("{game_slug}/{}", version_label(version_number))
}

/// Path of the game archive for a version: `{slug}/v{n}/game.zip`.
pub fn archive_path(game_slug: &str, version_number: i32) -> String {
    format!("{}/{GAME_ARCHIVE_FILE}", version_dir(game_slug, version_number))
}

/// Path of the thumbnail for a version: `{slug}/v{n}/thumbnail.png`.
pub fn thumbnail_path(game_slug: &str, version_number: i32) -> String {
    format!("{}/{THUMBNAIL_FILE}", version_dir(game_slug, version_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_layout() {
        assert_eq!(version_dir("my-game", 1), "my-game/v1");
        assert_eq!(archive_path("my-game", 1), "my-game/v1/game.zip");
        assert_eq!(thumbnail_path("my-game", 12), "my-game/v12/thumbnail.png");
    }

    #[test]
    fn label_prefixes_v() {
        assert_eq!(version_label(7), "v7");
    }
}
