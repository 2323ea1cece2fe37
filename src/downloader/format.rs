use crate::app_state::Selection;

/// Builds the yt-dlp `--format` selector for a confirmed selection.
///
/// Shape: `[height<=<ceiling>]/bestvideo+<worstaudio|bestaudio>`.
pub fn format_descriptor(selection: &Selection) -> String {
    format!(
        "[height<={}]/bestvideo+{}",
        selection.video.height_ceiling(),
        selection.audio.selector()
    )
}
