//! Installing the webpack toolchain with npm

use std::path::Path;
use std::process::{Command, Stdio};

use crate::bundler::TOOLCHAIN_PACKAGES;
use crate::error::{PackupError, PackupResult};

/// `npm install --save-dev <toolchain>` run inside `project_dir`
pub fn install_command(project_dir: &Path) -> Command {
    let mut cmd = Command::new(crate::shell::npm_program());
    cmd.arg("install")
        .args(TOOLCHAIN_PACKAGES)
        .arg("--save-dev")
        .current_dir(project_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

/// Run the install with npm's output shown to the user.
///
/// With `keep_stdout_clean` npm's stdout goes to stderr so NDJSON on stdout
/// stays parseable.
pub fn install_toolchain(
    project_dir: &Path,
    verbose: bool,
    keep_stdout_clean: bool,
) -> PackupResult<()> {
    let mut cmd = install_command(project_dir);
    if keep_stdout_clean {
        cmd.stdout(Stdio::from(std::io::stderr()));
    }
    if verbose {
        eprintln!("$ {}", crate::shell::display_command(&cmd));
    }

    let status = cmd.status()?;

    if status.success() {
        Ok(())
    } else {
        Err(PackupError::InstallFailed {
            status: status.to_string(),
        })
    }
}
