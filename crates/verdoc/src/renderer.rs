// Copyright 2026 Oxide Computer Company

//! Rendering an exported documentation tree into HTML.

use crate::errors::RenderError;
use camino::Utf8Path;
use fs_err as fs;
use regex::Regex;
use std::{process::Command, sync::LazyLock};

/// The root document name used when the config file does not set one.
const DEFAULT_ROOT_DOC: &str = "contents";

/// Matches an uncommented `master_doc` or `root_doc` assignment.
static ROOT_DOC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:master_doc|root_doc)\s*=\s*["']([^"']+)["']"#)
        .expect("root doc pattern is valid")
});

/// The result of rendering one version's documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocs {
    /// The landing page file name relative to the build directory
    /// (e.g., `"contents.html"`).
    pub landing_page: String,
}

/// Renders one exported documentation tree into a target directory.
pub trait DocBuilder {
    /// Renders `source` into `target`, creating `target` if needed.
    ///
    /// `source` is the directory containing the renderer config and the
    /// documentation sources. The returned landing page must exist
    /// inside `target` on success.
    fn build(
        &self,
        source: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<RenderedDocs, RenderError>;
}

/// Reads the root document name from a renderer config file.
///
/// Looks for a `master_doc` or `root_doc` assignment with a quoted
/// string value; the first one wins. Absent any, the renderer default
/// of `"contents"` applies.
pub fn root_doc_from_config(config: &Utf8Path) -> Result<String, RenderError> {
    let contents = fs::read_to_string(config).map_err(|source| {
        RenderError::ConfigRead { path: config.to_owned(), source }
    })?;

    let root_doc = ROOT_DOC_RE
        .captures(&contents)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_ROOT_DOC.to_string());
    Ok(root_doc)
}

/// A [`DocBuilder`] that runs an external renderer command.
///
/// The renderer is invoked as `<program> <args..> <source> <target>`,
/// with the source and target directories appended as the final two
/// arguments. The landing page name is `<root doc>.html`, where the
/// root doc comes from the config file (`conf.py` by default) at the
/// top of the source tree.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    config_file: String,
}

impl CommandBuilder {
    /// Creates a builder that runs `program` with no extra arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            config_file: "conf.py".to_string(),
        }
    }

    /// Appends one renderer argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends renderer arguments.
    pub fn args(
        mut self,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the config file name the landing page is derived from.
    pub fn config_file(mut self, name: impl Into<String>) -> Self {
        self.config_file = name.into();
        self
    }
}

impl DocBuilder for CommandBuilder {
    fn build(
        &self,
        source: &Utf8Path,
        target: &Utf8Path,
    ) -> Result<RenderedDocs, RenderError> {
        fs::create_dir_all(target).map_err(|error| RenderError::CreateDir {
            path: target.to_owned(),
            source: error,
        })?;

        let root_doc = root_doc_from_config(&source.join(&self.config_file))?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(source.as_str())
            .arg(target.as_str())
            .output()
            .map_err(|error| RenderError::SpawnFailed {
                program: self.program.clone(),
                source: error,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::RendererFailed {
                program: self.program.clone(),
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let landing_page = format!("{root_doc}.html");
        let landing_path = target.join(&landing_page);
        match landing_path.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                return Err(RenderError::MissingLandingPage {
                    path: landing_path,
                });
            }
            Err(source) => {
                return Err(RenderError::Io { path: landing_path, source });
            }
        }

        Ok(RenderedDocs { landing_page })
    }
}
