//! Description of the user's platform, so suggested commands fit it.

use std::fmt;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// `macOS`, `Linux`, `FreeBSD`, ...
    pub os: String,
    /// OS or kernel release; empty when unknown
    pub release: String,
    pub shell: String,
}

impl SystemInfo {
    pub fn new(os: impl Into<String>, release: impl Into<String>, shell: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            release: release.into(),
            shell: shell.into(),
        }
    }

    /// Detect the running platform. Failures leave `release` empty.
    pub fn detect(shell: impl Into<String>) -> Self {
        let (os, release) = detect_os();
        Self::new(os, release, shell)
    }

    /// `OS: <os> <release>, Shell: <shell>`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.release.is_empty() {
            write!(f, "OS: {}, Shell: {}", self.os, self.shell)
        } else {
            write!(f, "OS: {} {}, Shell: {}", self.os, self.release, self.shell)
        }
    }
}

fn detect_os() -> (String, String) {
    #[cfg(target_os = "macos")]
    {
        ("macOS".to_string(), command_output("sw_vers", &["-productVersion"]))
    }
    #[cfg(target_os = "linux")]
    {
        let release = std::fs::read_to_string("/proc/sys/kernel/osrelease")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| command_output("uname", &["-r"]));
        ("Linux".to_string(), release)
    }
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "linux"))))]
    {
        (os_display_name(), command_output("uname", &["-r"]))
    }
    #[cfg(not(unix))]
    {
        (os_display_name(), String::new())
    }
}

#[cfg_attr(any(target_os = "macos", target_os = "linux"), allow(dead_code))]
fn os_display_name() -> String {
    match std::env::consts::OS {
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        other => other.to_string(),
    }
}

#[cfg_attr(not(unix), allow(dead_code))]
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_default()
}
