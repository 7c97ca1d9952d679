//! Locating and spawning the external ffmpeg binary.

use std::path::Path;
use std::process::{Command, Output, Stdio};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

/// Windows flag to prevent child processes from creating visible console windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

/// Create a Command that won't spawn a visible console window on Windows.
pub fn hidden_command<S: AsRef<std::ffi::OsStr>>(program: S) -> Command {
    let mut cmd = Command::new(program);
    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);
    cmd
}

/// Find the ffmpeg executable.
/// Checks: bundled alongside exe, PATH, common install locations
fn find_ffmpeg() -> Option<String> {
    let exe_name = if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" };

    // Check if bundled next to our executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let bundled = dir.join(exe_name);
            if bundled.exists() {
                return Some(bundled.to_string_lossy().to_string());
            }
        }
    }

    // Check PATH
    let on_path = hidden_command("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if matches!(on_path, Ok(status) if status.success()) {
        return Some("ffmpeg".to_string());
    }

    // Common install locations
    #[cfg(windows)]
    let common_paths = [
        r"C:\ffmpeg\bin\ffmpeg.exe",
        r"C:\Program Files\ffmpeg\bin\ffmpeg.exe",
        r"C:\tools\ffmpeg\bin\ffmpeg.exe",
    ];
    #[cfg(not(windows))]
    let common_paths = [
        "/usr/local/bin/ffmpeg",
        "/opt/homebrew/bin/ffmpeg",
        "/usr/bin/ffmpeg",
    ];
    for path in &common_paths {
        if Path::new(path).exists() {
            return Some(path.to_string());
        }
    }

    None
}

pub fn get_ffmpeg() -> Result<String, String> {
    find_ffmpeg().ok_or_else(|| {
        "FFmpeg not found. Please install FFmpeg and ensure it is in your PATH.".to_string()
    })
}

/// Spawn a command with piped stdout/stderr and wait for it to exit.
pub fn run(mut cmd: Command) -> Result<Output, String> {
    let child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn ffmpeg: {}", e))?;

    child
        .wait_with_output()
        .map_err(|e| format!("FFmpeg process failed: {}", e))
}
