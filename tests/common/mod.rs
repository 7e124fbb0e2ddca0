use husk_codegen::{
    error::Result,
    render::{RenderContext, Renderer},
};
use std::{cell::RefCell, io::Write, path::PathBuf, rc::Rc};

#[derive(Clone, Default)]
pub struct TestRenderer(Rc<RefCell<Option<RenderContext>>>);

impl TestRenderer {
    #[allow(dead_code)] // Avoid a false positive on the dead code analysis.
    pub fn context(&self) -> RenderContext {
        self.0.borrow_mut().take().expect("context was not set")
    }
}

impl Renderer for TestRenderer {
    fn name(&self) -> &str {
        "test_renderer"
    }

    fn out_file(&self, ctx: &RenderContext) -> PathBuf {
        ctx.out_dir().join("test_renderer.txt")
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn Write) -> Result<()> {
        *self.0.borrow_mut() = Some(ctx.clone());
        writeln!(out, "test renderer output")?;

        Ok(())
    }
}

#[allow(dead_code)] // Avoid a false positive on the dead code analysis.
pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn name(&self) -> &str {
        "failing_renderer"
    }

    fn out_file(&self, ctx: &RenderContext) -> PathBuf {
        ctx.out_dir().join("failing_renderer.txt")
    }

    fn render(&self, _ctx: &RenderContext, _out: &mut dyn Write) -> Result<()> {
        anyhow::bail!("this renderer always fails")
    }
}
