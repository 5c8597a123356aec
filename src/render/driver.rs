//! The narrow slice of the graphics driver the shader loader talks to.
//!
//! Shader and program objects are driver-owned integers. They are wrapped in
//! distinct handle types so a stage can never be passed where a program is
//! expected.

use glow::HasContext;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::utils::error::ShaderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub fn gl_enum(self) -> u32 {
        match self {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A compiled (or failed) shader stage object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageHandle(NonZeroU32);

/// A linked (or failed) program object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(NonZeroU32);

impl StageHandle {
    pub fn new(id: NonZeroU32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0.get()
    }

    pub fn native(self) -> glow::NativeShader {
        glow::NativeShader(self.0)
    }
}

impl ProgramHandle {
    pub fn new(id: NonZeroU32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0.get()
    }

    pub fn native(self) -> glow::NativeProgram {
        glow::NativeProgram(self.0)
    }
}

impl From<glow::NativeShader> for StageHandle {
    fn from(shader: glow::NativeShader) -> Self {
        Self(shader.0)
    }
}

impl From<glow::NativeProgram> for ProgramHandle {
    fn from(program: glow::NativeProgram) -> Self {
        Self(program.0)
    }
}

pub trait ShaderDriver {
    fn create_stage(&mut self, kind: StageKind) -> Result<StageHandle, ShaderError>;
    fn compile_stage(&mut self, stage: StageHandle, source: &str);
    fn compile_status(&self, stage: StageHandle) -> bool;
    fn stage_log(&self, stage: StageHandle) -> String;
    /// Marks the stage for deletion. Attached stages are freed once detached.
    fn release_stage(&mut self, stage: StageHandle);

    fn create_program(&mut self) -> Result<ProgramHandle, ShaderError>;
    fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle);
    fn link_program(&mut self, program: ProgramHandle);
    fn link_status(&self, program: ProgramHandle) -> bool;
    fn program_log(&self, program: ProgramHandle) -> String;
    fn release_program(&mut self, program: ProgramHandle);
}

/// `ShaderDriver` backed by a live OpenGL context.
pub struct GlDriver {
    gl: Arc<glow::Context>,
}

impl GlDriver {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

// The context is current on this thread for as long as the driver lives, and
// every handle passed in was produced by the same context.
impl ShaderDriver for GlDriver {
    fn create_stage(&mut self, kind: StageKind) -> Result<StageHandle, ShaderError> {
        let shader = unsafe { self.gl.create_shader(kind.gl_enum()) }.map_err(ShaderError::Driver)?;
        Ok(shader.into())
    }

    fn compile_stage(&mut self, stage: StageHandle, source: &str) {
        unsafe {
            self.gl.shader_source(stage.native(), source);
            self.gl.compile_shader(stage.native());
        }
    }

    fn compile_status(&self, stage: StageHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(stage.native()) }
    }

    fn stage_log(&self, stage: StageHandle) -> String {
        unsafe { self.gl.get_shader_info_log(stage.native()) }
    }

    fn release_stage(&mut self, stage: StageHandle) {
        unsafe { self.gl.delete_shader(stage.native()) }
    }

    fn create_program(&mut self) -> Result<ProgramHandle, ShaderError> {
        let program = unsafe { self.gl.create_program() }.map_err(ShaderError::Driver)?;
        Ok(program.into())
    }

    fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle) {
        unsafe { self.gl.attach_shader(program.native(), stage.native()) }
    }

    fn link_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.link_program(program.native()) }
    }

    fn link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(program.native()) }
    }

    fn program_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(program.native()) }
    }

    fn release_program(&mut self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(program.native()) }
    }
}

/// In-memory driver for tests. Compiles anything that is non-empty, has a
/// `main` entry point and balanced braces.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;

    struct FakeStage {
        kind: StageKind,
        compiled: bool,
        log: String,
    }

    struct FakeProgram {
        attached: Vec<StageHandle>,
        linked: bool,
        log: String,
    }

    #[derive(Default)]
    pub struct FakeDriver {
        next_id: u32,
        stages: HashMap<StageHandle, FakeStage>,
        programs: HashMap<ProgramHandle, FakeProgram>,
        pub refuse_allocation: bool,
        pub stages_created: usize,
        pub compiled_sources: Vec<String>,
    }

    impl FakeDriver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn live_stages(&self) -> usize {
            self.stages.len()
        }

        pub fn live_programs(&self) -> usize {
            self.programs.len()
        }

        fn next(&mut self) -> NonZeroU32 {
            self.next_id += 1;
            NonZeroU32::new(self.next_id).unwrap()
        }

        fn check(source: &str) -> Result<(), String> {
            if source.trim().is_empty() {
                return Err("0:1(1): error: syntax error, unexpected end of file".into());
            }
            let open = source.matches('{').count();
            let close = source.matches('}').count();
            if open != close {
                let line = source.lines().count();
                return Err(format!(
                    "0:{line}(1): error: syntax error, unexpected end of file, expecting '}}'"
                ));
            }
            if !source.contains("void main") {
                return Err("0:0(0): error: main function not defined".into());
            }
            Ok(())
        }
    }

    impl ShaderDriver for FakeDriver {
        fn create_stage(&mut self, kind: StageKind) -> Result<StageHandle, ShaderError> {
            if self.refuse_allocation {
                return Err(ShaderError::Driver("out of shader objects".into()));
            }
            let handle = StageHandle::new(self.next());
            self.stages.insert(
                handle,
                FakeStage {
                    kind,
                    compiled: false,
                    log: String::new(),
                },
            );
            self.stages_created += 1;
            Ok(handle)
        }

        fn compile_stage(&mut self, stage: StageHandle, source: &str) {
            self.compiled_sources.push(source.to_owned());
            let stage = self.stages.get_mut(&stage).expect("unknown stage");
            match Self::check(source) {
                Ok(()) => {
                    stage.compiled = true;
                    stage.log.clear();
                }
                Err(log) => {
                    stage.compiled = false;
                    stage.log = log;
                }
            }
        }

        fn compile_status(&self, stage: StageHandle) -> bool {
            self.stages[&stage].compiled
        }

        fn stage_log(&self, stage: StageHandle) -> String {
            self.stages[&stage].log.clone()
        }

        fn release_stage(&mut self, stage: StageHandle) {
            self.stages.remove(&stage);
        }

        fn create_program(&mut self) -> Result<ProgramHandle, ShaderError> {
            if self.refuse_allocation {
                return Err(ShaderError::Driver("out of program objects".into()));
            }
            let handle = ProgramHandle::new(self.next());
            self.programs.insert(
                handle,
                FakeProgram {
                    attached: Vec::new(),
                    linked: false,
                    log: String::new(),
                },
            );
            Ok(handle)
        }

        fn attach_stage(&mut self, program: ProgramHandle, stage: StageHandle) {
            assert!(self.stages.contains_key(&stage), "attaching a released stage");
            self.programs
                .get_mut(&program)
                .expect("unknown program")
                .attached
                .push(stage);
        }

        fn link_program(&mut self, program: ProgramHandle) {
            let attached = self.programs[&program].attached.clone();
            let mut kinds = Vec::new();
            let mut log = String::new();
            for stage in &attached {
                let stage = &self.stages[stage];
                kinds.push(stage.kind);
                if !stage.compiled {
                    log = format!("error: linking with uncompiled/unspecialized {} shader", stage.kind);
                }
            }
            if log.is_empty() && !(kinds.contains(&StageKind::Vertex) && kinds.contains(&StageKind::Fragment)) {
                log = "error: program lacks a vertex or fragment shader".into();
            }
            let program = self.programs.get_mut(&program).expect("unknown program");
            program.linked = log.is_empty();
            program.log = log;
        }

        fn link_status(&self, program: ProgramHandle) -> bool {
            self.programs[&program].linked
        }

        fn program_log(&self, program: ProgramHandle) -> String {
            self.programs[&program].log.clone()
        }

        fn release_program(&mut self, program: ProgramHandle) {
            self.programs.remove(&program);
        }
    }
}
