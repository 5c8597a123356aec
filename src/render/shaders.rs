//! Shader program loading.
//!
//! `ShaderProgramLoader::load` reads a vertex and a fragment source, compiles
//! both, links them and always hands back the program together with every
//! diagnostic the driver produced. Compile or link failure is recorded on the
//! returned `ProgramReport` rather than aborting the load; `load_checked`
//! turns that into an error for callers that want one.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::driver::{ProgramHandle, ShaderDriver, StageHandle, StageKind};
use crate::utils::error::ShaderError;

/// What to do when a shader file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePolicy {
    /// Compile an empty source and let the driver report the failure.
    #[default]
    Lenient,
    /// Fail before any driver object is created.
    Strict,
}

/// Shader text exactly as it was read, plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    path: PathBuf,
    text: String,
}

impl ShaderSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path, policy: SourcePolicy) -> Result<Self, ShaderError> {
        match fs::read(path) {
            Ok(bytes) => {
                let text = match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
                };
                Ok(Self::new(path, text))
            }
            Err(err) => match policy {
                SourcePolicy::Lenient => {
                    warn!(
                        "Cannot read shader {} ({}), compiling empty source",
                        path.display(),
                        err
                    );
                    Ok(Self::new(path, String::new()))
                }
                SourcePolicy::Strict => Err(ShaderError::SourceNotFound {
                    path: path.to_path_buf(),
                    source: err,
                }),
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub kind: StageKind,
    pub path: PathBuf,
    pub compiled: bool,
    pub log: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub linked: bool,
    pub log: String,
}

/// Outcome of one load. The program handle is valid even when a stage failed;
/// releasing it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramReport {
    pub program: ProgramHandle,
    pub vertex: StageReport,
    pub fragment: StageReport,
    pub link: LinkReport,
}

impl ProgramReport {
    pub fn is_ok(&self) -> bool {
        self.vertex.compiled && self.fragment.compiled && self.link.linked
    }

    pub fn into_program(self) -> Result<ProgramHandle, ShaderError> {
        for stage in [self.vertex, self.fragment] {
            if !stage.compiled {
                return Err(ShaderError::Compilation {
                    stage: stage.kind,
                    path: stage.path,
                    log: stage.log,
                });
            }
        }
        if !self.link.linked {
            return Err(ShaderError::Linking(self.link.log));
        }
        Ok(self.program)
    }
}

pub struct ShaderProgramLoader<'d, D: ShaderDriver> {
    driver: &'d mut D,
    policy: SourcePolicy,
}

impl<'d, D: ShaderDriver> ShaderProgramLoader<'d, D> {
    pub fn new(driver: &'d mut D) -> Self {
        Self {
            driver,
            policy: SourcePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SourcePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn load(
        &mut self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<ProgramReport, ShaderError> {
        let vertex = ShaderSource::read(vertex_path.as_ref(), self.policy)?;
        let fragment = ShaderSource::read(fragment_path.as_ref(), self.policy)?;
        self.load_sources(&vertex, &fragment)
    }

    /// Like `load`, but only returns programs that compiled and linked.
    /// A failed program is released before the error is returned.
    pub fn load_checked(
        &mut self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<ProgramHandle, ShaderError> {
        let report = self.load(vertex_path, fragment_path)?;
        let program = report.program;
        report.into_program().map_err(|err| {
            self.driver.release_program(program);
            err
        })
    }

    pub fn load_sources(
        &mut self,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<ProgramReport, ShaderError> {
        let vertex_stage = self.driver.create_stage(StageKind::Vertex)?;
        let fragment_stage = match self.driver.create_stage(StageKind::Fragment) {
            Ok(stage) => stage,
            Err(err) => {
                self.driver.release_stage(vertex_stage);
                return Err(err);
            }
        };

        let vertex_report = self.compile(vertex_stage, StageKind::Vertex, vertex);
        let fragment_report = self.compile(fragment_stage, StageKind::Fragment, fragment);

        info!("Linking program");
        let program = match self.driver.create_program() {
            Ok(program) => program,
            Err(err) => {
                self.driver.release_stage(vertex_stage);
                self.driver.release_stage(fragment_stage);
                return Err(err);
            }
        };
        self.driver.attach_stage(program, vertex_stage);
        self.driver.attach_stage(program, fragment_stage);
        self.driver.link_program(program);

        let link = LinkReport {
            linked: self.driver.link_status(program),
            log: clean_log(self.driver.program_log(program)),
        };
        emit("program link", link.linked, &link.log);

        self.driver.release_stage(vertex_stage);
        self.driver.release_stage(fragment_stage);

        Ok(ProgramReport {
            program,
            vertex: vertex_report,
            fragment: fragment_report,
            link,
        })
    }

    fn compile(&mut self, stage: StageHandle, kind: StageKind, source: &ShaderSource) -> StageReport {
        info!("Compiling shader : {}", source.path().display());
        self.driver.compile_stage(stage, source.text());

        let report = StageReport {
            kind,
            path: source.path().to_path_buf(),
            compiled: self.driver.compile_status(stage),
            log: clean_log(self.driver.stage_log(stage)),
        };
        emit(&format!("{kind} shader"), report.compiled, &report.log);
        report
    }
}

// Drivers pad info logs with trailing newlines and NULs.
fn clean_log(log: String) -> String {
    let trimmed = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());
    if trimmed.len() == log.len() {
        log
    } else {
        trimmed.to_owned()
    }
}

fn emit(what: &str, ok: bool, log: &str) {
    match (ok, log.is_empty()) {
        (true, true) => info!("{what}: ok"),
        (true, false) => warn!("{what}: ok with diagnostics:\n{log}"),
        (false, _) => error!("{what}: failed:\n{log}"),
    }
}
