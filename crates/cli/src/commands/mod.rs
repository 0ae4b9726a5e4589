//! CLI command implementations.

use std::path::{Path, PathBuf};

pub mod analyze;
pub mod fix;
pub mod review;

/// Default output path: `<stem>_corrected.pptx` alongside the input.
pub(crate) fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "presentation".into());
    input.with_file_name(format!("{stem}_corrected.pptx"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_sits_next_to_input() {
        let out = default_output_path(Path::new("/decks/Test deck.pptx"));
        assert_eq!(out, Path::new("/decks/Test deck_corrected.pptx"));
    }

    #[test]
    fn bare_filename_gets_suffix() {
        let out = default_output_path(Path::new("deck.pptx"));
        assert_eq!(out, Path::new("deck_corrected.pptx"));
    }
}
