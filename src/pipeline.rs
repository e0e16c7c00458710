//! End-to-end compilation: declaration events → Program → output text.

use miette::Diagnostic;
use relang_core::DataModel;
use relang_syntax::DeclEvent;
use relang_syntax::tree::{self, SourceFile};
use thiserror::Error;

use crate::backend::{CppSyntax, EmitConfig, EmitError, TargetSyntax, emit_program};
use crate::builder::{BuildError, BuilderOptions, SemanticBuilder};
use crate::model::Program;

/// Options for one compilation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Target data model; fixes primitive and pointer sizes for layout and size assertions.
    pub data_model: DataModel,
    pub builder: BuilderOptions,
    pub emit: EmitConfig,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_model(mut self, data_model: DataModel) -> Self {
        self.data_model = data_model;
        self
    }

    pub fn with_builder(mut self, builder: BuilderOptions) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_emit(mut self, emit: EmitConfig) -> Self {
        self.emit = emit;
        self
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),
}

impl CompileError {
    pub fn is_internal(&self) -> bool {
        match self {
            CompileError::Build(err) => err.is_internal(),
            CompileError::Emit(_) => true,
        }
    }
}

/// Build the Program Model for the C++ target without emitting it.
pub fn check_events(events: &[DeclEvent], options: &CompileOptions) -> Result<Program, BuildError> {
    let sizes = CppSyntax.type_sizes(options.data_model);
    SemanticBuilder::new(sizes).with_options(options.builder).build(events)
}

/// Compile an event stream to a C++ header.
pub fn compile_events(events: &[DeclEvent], options: &CompileOptions) -> Result<String, CompileError> {
    let program = check_events(events, options)?;
    Ok(emit_program(&program, &CppSyntax, &options.emit)?)
}

/// Compile a declaration tree to a C++ header.
pub fn compile_source_file(file: &SourceFile, options: &CompileOptions) -> Result<String, CompileError> {
    compile_events(&tree::flatten(file), options)
}
