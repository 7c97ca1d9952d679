//! The drop boundary: extension filtering and per-file status lines.

use crate::convert::{ConversionEngine, Outcome};
use crate::options::ConversionOptions;
use std::path::{Path, PathBuf};

/// Extensions accepted from a drop. Anything else is reported as invalid
/// without reaching the engine.
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["mp4", "webm", "avi", "mov", "flv", "mkv", "mpeg", "wmv"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Run one dropped batch through the engine, one file at a time, and return a
/// status line per path. A failed or cancelled file never stops the batch.
pub fn process_drop(
    engine: &ConversionEngine,
    paths: &[PathBuf],
    options: &ConversionOptions,
    confirm_overwrite: &dyn Fn(&str) -> bool,
) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            if !is_supported(path) {
                return "Invalid file type. Please drag a supported video file.".to_string();
            }
            match engine.convert(path, options, confirm_overwrite) {
                Outcome::Completed(output) => {
                    let name = output
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| output.display().to_string());
                    format!("Converted to GIF: {}", name)
                }
                Outcome::Cancelled => "Conversion canceled.".to_string(),
                Outcome::Failed(e) => format!("Conversion failed: {}", e),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_supported_extension() {
        for ext in SUPPORTED_EXTENSIONS {
            assert!(is_supported(Path::new(&format!("clip.{}", ext))), "{}", ext);
        }
    }

    #[test]
    fn extension_matching_ignores_case() {
        assert!(is_supported(Path::new("CLIP.MP4")));
        assert!(is_supported(Path::new("clip.Mov")));
    }

    #[test]
    fn rejects_unknown_and_missing_extensions() {
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("clip.gif")));
        assert!(!is_supported(Path::new("clip")));
    }

    #[test]
    fn unsupported_files_get_the_invalid_status_without_engine_work() {
        // Points at a binary that does not exist; an engine call would fail,
        // not report an invalid file type.
        let engine = ConversionEngine::with_ffmpeg("/nonexistent/ffmpeg", "GIFs");
        let opts = ConversionOptions::default();

        let statuses = process_drop(
            &engine,
            &[PathBuf::from("notes.txt")],
            &opts,
            &|_| panic!("no confirmation expected"),
        );

        assert_eq!(
            statuses,
            vec!["Invalid file type. Please drag a supported video file.".to_string()]
        );
    }
}
