use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    config::Config,
    error::{GenerationError, Result},
    render::{self, RenderContext, Renderer},
};

/// Sequences renderers and reports progress: one `Generating <path>` line
/// per renderer before it executes, a single completion line once every
/// file has been written, and an abort on the first failure.
pub struct Generator {
    /// The root directory of the project being generated into.
    pub root: PathBuf,
    /// Build configuration for the generator.
    pub config: Config,

    /// Renderers used to produce the generated sources, in generation order.
    renderers: Vec<Box<dyn Renderer>>,
}

impl Generator {
    pub fn load(root: impl Into<PathBuf>) -> Result<Generator> {
        let root = root.into();
        let config_location = root.join("codegen.toml");

        let config = if config_location.exists() {
            Config::load(config_location)?
        } else {
            Config::default()
        };

        Ok(Generator::load_with_config(root, config))
    }

    pub fn load_with_config(root: impl Into<PathBuf>, config: Config) -> Generator {
        Generator {
            root: root.into(),
            config,
            renderers: Vec::new(),
        }
    }

    /// Appends a renderer to the end of the generation order.
    pub fn with_renderer(&mut self, renderer: impl Renderer + 'static) -> &mut Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Appends the builtin renderer set.
    pub fn with_default_renderers(&mut self) -> &mut Self {
        self.renderers.extend(render::default_set());
        self
    }

    /// Runs every registered renderer, reporting progress on stdout.
    pub fn run(&self) -> Result<(), GenerationError> {
        let stdout = io::stdout();
        let mut progress = stdout.lock();

        self.run_with_progress(&mut progress)
    }

    /// Runs every registered renderer in order. Each renderer's progress
    /// line is written before the renderer executes, so a failing renderer
    /// still shows up in the output; renderers after the failure produce
    /// nothing, and the completion line is only written when all of them
    /// succeed.
    pub fn run_with_progress(
        &self,
        progress: &mut dyn Write,
    ) -> Result<(), GenerationError> {
        if self.renderers.is_empty() {
            return Err(GenerationError::NoRenderers);
        }

        let ctx = RenderContext::new(self.root.clone(), self.config.clone());

        for renderer in &self.renderers {
            let out_file = renderer.out_file(&ctx);
            writeln!(progress, "Generating {}", out_file.display())?;

            render_to_file(renderer.as_ref(), &ctx, &out_file).map_err(|source| {
                GenerationError::Renderer {
                    name: renderer.name().to_string(),
                    path: out_file.clone(),
                    source,
                }
            })?;
        }

        writeln!(progress, "Code generation complete")?;

        Ok(())
    }
}

fn render_to_file(renderer: &dyn Renderer, ctx: &RenderContext, out_file: &Path) -> Result<()> {
    if let Some(parent) = out_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let file = File::create(out_file)
        .with_context(|| format!("Failed to create {}", out_file.display()))?;
    let mut writer = BufWriter::new(file);

    renderer.render(ctx, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", out_file.display()))?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    struct StaticRenderer {
        name: &'static str,
        content: &'static str,
    }

    impl Renderer for StaticRenderer {
        fn name(&self) -> &str {
            self.name
        }

        fn out_file(&self, ctx: &RenderContext) -> PathBuf {
            ctx.out_dir().join(format!("{}.hpp", self.name))
        }

        fn render(&self, _ctx: &RenderContext, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "{}", self.content)?;

            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn name(&self) -> &str {
            "failing"
        }

        fn out_file(&self, ctx: &RenderContext) -> PathBuf {
            ctx.out_dir().join("failing.hpp")
        }

        fn render(&self, _ctx: &RenderContext, _out: &mut dyn Write) -> Result<()> {
            anyhow::bail!("this renderer always fails")
        }
    }

    fn progress_lines(progress: &[u8]) -> Vec<String> {
        String::from_utf8(progress.to_vec())
            .expect("progress should be utf-8")
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn reports_progress_in_registration_order() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut generator = Generator::load_with_config(dir.path(), Config::default());
        generator.with_renderer(StaticRenderer {
            name: "first",
            content: "// first",
        });
        generator.with_renderer(StaticRenderer {
            name: "second",
            content: "// second",
        });

        let mut progress: Vec<u8> = Vec::new();
        generator
            .run_with_progress(&mut progress)
            .expect("run should succeed");

        let expected = vec![
            format!(
                "Generating {}",
                dir.path().join("include/first.hpp").display()
            ),
            format!(
                "Generating {}",
                dir.path().join("include/second.hpp").display()
            ),
            String::from("Code generation complete"),
        ];

        assert_eq!(expected, progress_lines(&progress));
    }

    #[test]
    fn writes_renderer_output_to_its_declared_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut generator = Generator::load_with_config(dir.path(), Config::default());
        generator.with_renderer(StaticRenderer {
            name: "first",
            content: "// first",
        });

        generator
            .run_with_progress(&mut io::sink())
            .expect("run should succeed");

        let content = fs::read_to_string(dir.path().join("include/first.hpp"))
            .expect("generated file should be readable");

        assert_eq!("// first\n", content);
    }

    #[test]
    fn stops_at_the_first_failing_renderer() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut generator = Generator::load_with_config(dir.path(), Config::default());
        generator.with_renderer(StaticRenderer {
            name: "first",
            content: "// first",
        });
        generator.with_renderer(FailingRenderer);
        generator.with_renderer(StaticRenderer {
            name: "last",
            content: "// last",
        });

        let mut progress: Vec<u8> = Vec::new();
        let error = generator
            .run_with_progress(&mut progress)
            .expect_err("run should fail");

        let lines = progress_lines(&progress);
        assert_eq!(2, lines.len());
        assert_eq!(
            format!(
                "Generating {}",
                dir.path().join("include/failing.hpp").display()
            ),
            lines[1]
        );
        assert!(matches!(error, GenerationError::Renderer { .. }));
        assert!(error.to_string().contains("failing"));
        assert!(dir.path().join("include/first.hpp").exists());
        assert!(!dir.path().join("include/last.hpp").exists());
    }

    #[test]
    fn rejects_an_empty_renderer_list() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let generator = Generator::load_with_config(dir.path(), Config::default());

        let mut progress: Vec<u8> = Vec::new();
        let error = generator
            .run_with_progress(&mut progress)
            .expect_err("run should fail");

        assert!(matches!(error, GenerationError::NoRenderers));
        assert!(progress.is_empty());
    }
}
