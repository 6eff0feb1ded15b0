//! Desktop notifications
//!
//! Best effort: a missing `osascript`/`notify-send` or a failed spawn is
//! ignored. Set `PACKUP_NO_NOTIFY` to turn them off.

use std::process::{Command, Stdio};

pub const NO_NOTIFY_ENV: &str = "PACKUP_NO_NOTIFY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub message: &'static str,
}

pub const WEBPACK_READY: Notification = Notification {
    title: "Webpack is ready",
    message: "You can now start editing your code",
};

pub const REFRESH_BROWSER: Notification = Notification {
    title: "Please refresh your browser",
    message: "The generated files have now been uploaded",
};

pub const BUILD_ERROR: Notification = Notification {
    title: "There was an error during the build",
    message: "Please check the console for more information",
};

pub const BUILD_SUCCESS: Notification = Notification {
    title: "Build was successful",
    message: "The production files are ready",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    /// Enabled unless `--no-notify` was passed or `PACKUP_NO_NOTIFY` is set
    pub fn from_env(no_notify_flag: bool) -> Self {
        let env_disabled = std::env::var_os(NO_NOTIFY_ENV).is_some_and(|v| !v.is_empty());
        Self {
            enabled: !no_notify_flag && !env_disabled,
        }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn notify(&self, notification: &Notification) {
        if !self.enabled {
            return;
        }
        if let Some(mut cmd) = notify_command(notification) {
            let _ = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
        }
    }
}

/// Platform command showing `notification`, if the platform has one
pub(crate) fn notify_command(notification: &Notification) -> Option<Command> {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(format!(
            "display notification {} with title {}",
            applescript_string(notification.message),
            applescript_string(notification.title)
        ));
        Some(cmd)
    } else if cfg!(unix) {
        let mut cmd = Command::new("notify-send");
        cmd.arg(notification.title).arg(notification.message);
        Some(cmd)
    } else {
        None
    }
}

fn applescript_string(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
