//! webpack configuration for a project
//!
//! One config per build mode. JavaScript under `<src>/js` goes through
//! babel (and eslint via its plugin); styles under `<src>/styles` are
//! compiled by sass, run through postcss/autoprefixer and extracted into
//! `[name].css`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::json;

use super::render::Js;
use super::Mode;
use crate::config::ProjectPaths;
use crate::error::PackupResult;
use crate::resolver::EntrySet;

/// Where generated config modules and stats files are written
pub const CACHE_DIR: &str = "node_modules/.cache/packup";

/// npm packages the generated config requires
pub const TOOLCHAIN_PACKAGES: [&str; 16] = [
    "webpack",
    "webpack-cli",
    "@babel/core",
    "@babel/preset-env",
    "babel-loader",
    "eslint",
    "eslint-webpack-plugin",
    "css-loader",
    "postcss",
    "postcss-loader",
    "autoprefixer",
    "sass",
    "sass-loader",
    "mini-css-extract-plugin",
    "css-minimizer-webpack-plugin",
    "terser-webpack-plugin",
];

/// Browsers autoprefixer targets
const BROWSERS: [&str; 3] = [">1%", "last 4 versions", "Firefox ESR"];

/// A plugin constructor imported at the top of the module
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSpec {
    /// Local binding name in the generated module
    pub ident: &'static str,
    /// npm module to require
    pub module: &'static str,
    /// Named export to destructure, if the constructor isn't the default export
    pub member: Option<&'static str>,
    pub options: Option<serde_json::Value>,
}

impl PluginSpec {
    fn import_line(&self) -> String {
        match self.member {
            Some(member) if member == self.ident => {
                format!("const {{ {} }} = require({:?});", member, self.module)
            }
            Some(member) => format!(
                "const {{ {}: {} }} = require({:?});",
                member, self.ident, self.module
            ),
            None => format!("const {} = require({:?});", self.ident, self.module),
        }
    }

    fn instance(&self) -> Js {
        let args = self.options.iter().map(Js::from_json).collect();
        Js::New(self.ident.to_string(), args)
    }
}

/// Everything needed to render a webpack config module
#[derive(Debug, Clone, PartialEq)]
pub struct WebpackConfig {
    pub mode: Mode,
    pub entry: BTreeMap<String, PathBuf>,
    pub src_root: PathBuf,
    pub output_path: PathBuf,
}

impl WebpackConfig {
    pub fn new(mode: Mode, paths: &ProjectPaths, entries: &EntrySet) -> Self {
        Self {
            mode,
            entry: entries.entries.clone(),
            src_root: paths.src.clone(),
            output_path: paths.build.clone(),
        }
    }

    /// Source maps are only produced for production builds
    pub fn devtool(&self) -> Option<&'static str> {
        match self.mode {
            Mode::Development => None,
            Mode::Production => Some("source-map"),
        }
    }

    fn source_maps(&self) -> bool {
        self.devtool().is_some()
    }

    pub fn plugins(&self) -> Vec<PluginSpec> {
        vec![
            PluginSpec {
                ident: "MiniCssExtractPlugin",
                module: "mini-css-extract-plugin",
                member: None,
                options: Some(json!({ "filename": "[name].css" })),
            },
            PluginSpec {
                ident: "ESLintPlugin",
                module: "eslint-webpack-plugin",
                member: None,
                options: Some(json!({
                    "extensions": ["js", "jsx"],
                    "context": self.src_root.join("js").to_string_lossy(),
                    "failOnError": self.mode == Mode::Production,
                })),
            },
            PluginSpec {
                ident: "ProgressPlugin",
                module: "webpack",
                member: Some("ProgressPlugin"),
                options: None,
            },
        ]
    }

    pub fn minimizers(&self) -> Vec<PluginSpec> {
        match self.mode {
            Mode::Development => Vec::new(),
            Mode::Production => vec![
                PluginSpec {
                    ident: "TerserPlugin",
                    module: "terser-webpack-plugin",
                    member: None,
                    options: Some(json!({
                        "extractComments": false,
                        "terserOptions": {
                            "compress": { "comparisons": false },
                            "output": { "comments": false },
                        },
                    })),
                },
                PluginSpec {
                    ident: "CssMinimizerPlugin",
                    module: "css-minimizer-webpack-plugin",
                    member: None,
                    options: None,
                },
            ],
        }
    }

    fn js_rule(&self) -> Js {
        Js::object([
            ("test", Js::Regex(r"\.(js|jsx)$".to_string())),
            ("include", path_js(&self.src_root.join("js"))),
            ("loader", Js::str("babel-loader")),
            (
                "options",
                Js::from_json(&json!({
                    "babelrc": false,
                    "presets": ["@babel/preset-env"],
                })),
            ),
        ])
    }

    fn style_rule(&self) -> Js {
        let maps = self.source_maps();
        let ident_name = match self.mode {
            Mode::Development => "[name]",
            Mode::Production => "[local]",
        };

        Js::object([
            ("test", Js::Regex(r"\.(css|scss|sass)$".to_string())),
            ("include", path_js(&self.src_root.join("styles"))),
            (
                "use",
                Js::array([
                    Js::Raw("MiniCssExtractPlugin.loader".to_string()),
                    Js::from_json(&json!({
                        "loader": "css-loader",
                        "options": {
                            "importLoaders": 2,
                            "sourceMap": maps,
                            "modules": { "localIdentName": ident_name },
                        },
                    })),
                    Js::from_json(&json!({
                        "loader": "postcss-loader",
                        "options": {
                            "sourceMap": maps,
                            "postcssOptions": {
                                "plugins": [["autoprefixer", { "overrideBrowserslist": BROWSERS, "flexbox": "no-2009" }]],
                            },
                        },
                    })),
                    Js::from_json(&json!({
                        "loader": "sass-loader",
                        "options": { "sourceMap": maps },
                    })),
                ]),
            ),
        ])
    }

    pub fn to_js(&self) -> Js {
        let entry = Js::Object(
            self.entry
                .iter()
                .map(|(name, path)| (name.clone(), path_js(path)))
                .collect(),
        );

        let devtool = match self.devtool() {
            Some(d) => Js::str(d),
            None => Js::Bool(false),
        };

        let minimizers = self.minimizers();
        let optimization = Js::object([
            ("minimize", Js::Bool(!minimizers.is_empty())),
            (
                "minimizer",
                Js::Array(minimizers.iter().map(PluginSpec::instance).collect()),
            ),
        ]);

        Js::object([
            ("mode", Js::str(self.mode.as_str())),
            ("devtool", devtool),
            ("entry", entry),
            (
                "output",
                Js::object([
                    ("path", path_js(&self.output_path)),
                    ("filename", Js::str("[name].js")),
                    ("chunkFilename", Js::str("[name].[chunkhash:8].chunk.js")),
                ]),
            ),
            (
                "resolve",
                Js::from_json(&json!({
                    "modules": ["node_modules"],
                    "extensions": [".js", ".json", ".jsx"],
                })),
            ),
            (
                "module",
                Js::object([
                    ("strictExportPresence", Js::Bool(true)),
                    ("rules", Js::array([self.js_rule(), self.style_rule()])),
                ]),
            ),
            (
                "plugins",
                Js::Array(self.plugins().iter().map(PluginSpec::instance).collect()),
            ),
            ("optimization", optimization),
            // The stats file drives filtering and uploads, so assets stay in.
            (
                "stats",
                Js::from_json(&json!({
                    "preset": "errors-warnings",
                    "assets": true,
                    "cachedAssets": true,
                    "relatedAssets": true,
                })),
            ),
        ])
    }

    /// Render the CommonJS module webpack loads with `--config`
    pub fn render_module(&self) -> String {
        let mut out = String::new();
        out.push_str("// Generated by packup for ");
        out.push_str(self.mode.as_str());
        out.push_str(" builds. Regenerated on every run.\n");
        out.push_str("\"use strict\";\n\n");

        let mut imports: Vec<String> = Vec::new();
        for plugin in self.plugins().iter().chain(self.minimizers().iter()) {
            let line = plugin.import_line();
            if !imports.contains(&line) {
                imports.push(line);
            }
        }
        for line in &imports {
            out.push_str(line);
            out.push('\n');
        }

        out.push_str("\nmodule.exports = ");
        out.push_str(&self.to_js().render());
        out.push_str(";\n");
        out
    }

    /// Path of the generated module inside a project
    pub fn module_path(&self, project_dir: &Path) -> PathBuf {
        project_dir
            .join(CACHE_DIR)
            .join(format!("webpack.{}.config.js", self.mode.as_str()))
    }

    /// Write the module into the project's cache folder
    pub fn write_module(&self, project_dir: &Path) -> PackupResult<PathBuf> {
        let path = self.module_path(project_dir);
        crate::fs::atomic_write(&path, self.render_module().as_bytes())?;
        Ok(path)
    }
}

fn path_js(path: &Path) -> Js {
    Js::Str(path.to_string_lossy().into_owned())
}
