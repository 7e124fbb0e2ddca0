use std::{io, path::PathBuf};

use crate::{config::Config, error::Result};

mod constructor;
mod cxx;
mod object_call;
mod protect;
mod wrap_function;

pub use constructor::*;
pub use object_call::*;
pub use protect::*;
pub use wrap_function::*;

/// A renderer produces exactly one generated source file: it declares where
/// the file lives and writes that file's content.
pub trait Renderer {
    fn name(&self) -> &str;

    /// The file this renderer generates, derived from the output directory
    /// in `ctx`. The runner logs this path and opens the writer handed to
    /// `render`.
    fn out_file(&self, ctx: &RenderContext) -> PathBuf;

    /// Writes the generated content. Implementations never touch the
    /// filesystem; all file handling belongs to the runner.
    fn render(&self, ctx: &RenderContext, out: &mut dyn io::Write) -> Result<()>;
}

#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Absolute path to the root of the project (where codegen.toml lives).
    pub root: PathBuf,

    /// Configuration for the generator from the codegen.toml file.
    pub config: Config,
}

impl RenderContext {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// The directory all generated files are placed under.
    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.codegen.out_dir)
    }

    /// Highest argument count the generated templates are expanded for.
    pub fn max_arity(&self) -> usize {
        self.config.codegen.max_arity
    }
}

/// The builtin renderers in generation order. Appending here is the only
/// step needed to put a new generated file into the default run.
pub fn default_set() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(ObjectCallHpp),
        Box::new(ObjectCallIpp),
        Box::new(ProtectHpp),
        Box::new(ProtectIpp),
        Box::new(ConstructorHpp),
        Box::new(WrapFunctionHpp),
        Box::new(WrapFunctionIpp),
    ]
}

#[cfg(test)]
pub(crate) fn render_to_string(renderer: &dyn Renderer, max_arity: usize) -> String {
    use std::str::FromStr;

    let source = format!("[codegen]\nmax-arity = {}", max_arity);
    let config = Config::from_str(&source).expect("config failed to parse");
    let ctx = RenderContext::new(PathBuf::from("."), config);
    let mut out = Vec::new();

    renderer
        .render(&ctx, &mut out)
        .expect("renderer failed to render");

    String::from_utf8(out).expect("rendered output was not utf-8")
}
