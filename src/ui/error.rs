use packup::transport::CONNECTION_HINTS;
use packup::PackupError;

use crate::ui::blocks::error::ErrorBlock;

fn packup_error_block(err: &PackupError) -> ErrorBlock {
    match err {
        PackupError::DirectoryNotFound { path } => {
            ErrorBlock::new("the following folder does not exist")
                .with_subject(path.display().to_string())
                .with_hint("Check `src` and `build` in project.config.json")
        }
        PackupError::ConfigNotFound { path } => ErrorBlock::new("project config not found")
            .with_subject(path.display().to_string())
            .with_hint("Run `packup init` to set up the project"),
        PackupError::InvalidConfig { file, message } => ErrorBlock::new(message.clone())
            .with_subject(file.display().to_string())
            .with_hint("Fix the JSON and try again"),
        PackupError::BundlerSpawn { program, message } => {
            ErrorBlock::new(format!("webpack could not be started: {}", message))
                .with_subject(program.clone())
                .with_hint("Run `packup init` or `npm install` to install the toolchain")
        }
        PackupError::InstallFailed { status } => {
            ErrorBlock::new(format!("npm install failed ({})", status))
                .with_hint("See the npm output above")
        }
        PackupError::Transport(message) => CONNECTION_HINTS
            .iter()
            .fold(ErrorBlock::new(message.clone()), |block, hint| {
                block.with_hint(*hint)
            }),
        other => ErrorBlock::new(other.to_string()),
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let block = match err.downcast_ref::<PackupError>() {
        Some(packup) => packup_error_block(packup),
        None => {
            let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
            ErrorBlock::new(chain.join(": "))
        }
    };
    block.render(supports_color, supports_unicode)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = crate::ui::json::emit(&serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
        }));
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
