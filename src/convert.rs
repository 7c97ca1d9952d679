//! The conversion engine: one source video in, one looping GIF out.

use crate::ffmpeg;
use crate::options::ConversionOptions;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// One conversion attempt, from drop to outcome. Built at the start of
/// [`ConversionEngine::convert`], used for argument construction and log
/// correlation, and discarded with the call.
#[derive(Debug)]
struct ConversionJob {
    id: Uuid,
    source: PathBuf,
    output: PathBuf,
    options: ConversionOptions,
}

/// Terminal state of a single conversion attempt.
#[derive(Debug)]
pub enum Outcome {
    /// The GIF was written to the contained path.
    Completed(PathBuf),
    /// The user declined to overwrite an existing GIF. Nothing was touched.
    Cancelled,
    Failed(ConvertError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// ffmpeg could not be located or spawned.
    #[error("{0}")]
    Tool(String),
    #[error("Failed to create output directory {}: {}", .0.display(), .1)]
    OutputDir(PathBuf, #[source] std::io::Error),
    /// ffmpeg ran but exited non-zero.
    #[error("FFmpeg failed (exit {code}): {stderr}")]
    Encode { code: i32, stderr: String },
}

/// Turns source videos into GIFs under a fixed output directory.
///
/// The engine assumes every path handed to it is a legitimate video source;
/// extension filtering happens at the drop boundary (see [`crate::batch`]).
pub struct ConversionEngine {
    /// Explicit ffmpeg executable. `None` resolves from the environment on
    /// each call, so a tool installed mid-session is picked up.
    ffmpeg: Option<String>,
    output_dir: PathBuf,
}

impl ConversionEngine {
    /// Engine writing into `output_dir`, with ffmpeg resolved from the
    /// environment.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: None,
            output_dir: output_dir.into(),
        }
    }

    /// Engine invoking a specific ffmpeg executable.
    pub fn with_ffmpeg(ffmpeg: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: Some(ffmpeg.into()),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where `source` ends up: `<output_dir>/<stem>.gif`. Only the final
    /// extension is replaced, so `my.clip.mp4` becomes `my.clip.gif`.
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .unwrap_or_else(|| source.as_os_str())
            .to_string_lossy();
        self.output_dir.join(format!("{}.gif", stem))
    }

    /// Convert `source` into an animated GIF.
    ///
    /// Reads a snapshot of `options`, resolves an overwrite conflict through
    /// `confirm_overwrite` (blocking until answered), then runs a single
    /// synchronous ffmpeg pass. The call blocks the current thread for the
    /// duration of the transcode.
    pub fn convert(
        &self,
        source: &Path,
        options: &ConversionOptions,
        confirm_overwrite: &dyn Fn(&str) -> bool,
    ) -> Outcome {
        let job = ConversionJob {
            id: Uuid::new_v4(),
            source: source.to_path_buf(),
            output: self.output_path_for(source),
            options: options.clone(),
        };

        info!(
            job = %job.id,
            source = %job.source.display(),
            output = %job.output.display(),
            "starting conversion"
        );

        if job.output.exists()
            && !job.options.overwrite_existing
            && !confirm_overwrite("File already exists. Do you want to overwrite?")
        {
            info!(job = %job.id, "overwrite declined");
            return Outcome::Cancelled;
        }

        match self.run_ffmpeg(&job) {
            Ok(()) => {
                info!(job = %job.id, "conversion finished");
                Outcome::Completed(job.output)
            }
            Err(e) => {
                warn!(job = %job.id, error = %e, "conversion failed");
                Outcome::Failed(e)
            }
        }
    }

    fn run_ffmpeg(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let program = match &self.ffmpeg {
            Some(path) => path.clone(),
            None => ffmpeg::get_ffmpeg().map_err(ConvertError::Tool)?,
        };

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ConvertError::OutputDir(self.output_dir.clone(), e))?;

        let mut cmd = ffmpeg::hidden_command(&program);
        cmd.args(build_args(&job.source, &job.output, &job.options));

        let output = ffmpeg::run(cmd).map_err(ConvertError::Tool)?;
        if !output.status.success() {
            return Err(ConvertError::Encode {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Build the filter graph: rate sampling, optional lanczos downscale, then the
/// two-pass palette split. The stream is duplicated, one copy feeds
/// `palettegen`, and the other is re-encoded against that palette.
pub fn build_filter(options: &ConversionOptions) -> String {
    let scale_filter = match &options.scale {
        Some(width) => format!("scale={}:-1:flags=lanczos,", width),
        None => String::new(),
    };
    format!(
        "fps={},{}split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse",
        options.frame_rate, scale_filter
    )
}

/// Build the full ffmpeg argument vector.
///
/// `-y` is always passed: any confirmation needed already happened before the
/// invocation. `-t` clips the input rather than the output, so it must precede
/// `-i`.
pub fn build_args(source: &Path, output: &Path, options: &ConversionOptions) -> Vec<String> {
    let mut args = vec!["-y".to_string(), "-v".to_string(), "error".to_string()];
    if let Some(limit) = &options.duration_limit {
        args.push("-t".to_string());
        args.push(limit.clone());
    }
    args.extend([
        "-i".to_string(),
        source.to_string_lossy().to_string(),
        "-vf".to_string(),
        build_filter(options),
        "-loop".to_string(),
        "0".to_string(),
        output.to_string_lossy().to_string(),
    ]);
    args
}
