use std::{io::Write, path::PathBuf};

use super::{cxx, RenderContext, Renderer};
use crate::error::Result;

/// The `Constructor` class template: one partial specialization per arity,
/// each wrapping `new T(...)` for use as a Ruby allocator.
pub struct ConstructorHpp;

impl ConstructorHpp {
    const NAME: &str = "constructor-hpp";
    const FILE: &str = "husk/Constructor.hpp";
}

impl Renderer for ConstructorHpp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn out_file(&self, ctx: &RenderContext) -> PathBuf {
        ctx.out_dir().join(Self::FILE)
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn Write) -> Result<()> {
        let guard = cxx::include_guard(Self::FILE);

        writeln!(out, "#ifndef {}", guard)?;
        writeln!(out, "#define {}", guard)?;
        writeln!(out)?;
        writeln!(out, "{}", cxx::BANNER)?;
        writeln!(out)?;
        writeln!(out, "#include \"Object_defn.hpp\"")?;
        writeln!(out, "#include \"detail/ruby.hpp\"")?;
        writeln!(out)?;
        writeln!(out, "namespace husk")?;
        writeln!(out, "{{")?;
        writeln!(out)?;
        writeln!(out, "// Wraps a C++ constructor so it can be registered as the allocator for a")?;
        writeln!(out, "// Ruby class. The trailing Dummy_T slot keeps the highest-arity partial")?;
        writeln!(out, "// specialization below distinct from the primary template.")?;
        writeln!(out)?;
        writeln!(out, "template<typename T,")?;
        for n in 1..=ctx.max_arity() {
            writeln!(out, "         typename Arg{}_T = void,", n)?;
        }
        writeln!(out, "         typename Dummy_T = void>")?;
        writeln!(out, "class Constructor;")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename T", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "class Constructor<{}>",
                cxx::prepend("T", &cxx::type_list(arity))
            )?;
            writeln!(out, "{{")?;
            writeln!(out, "public:")?;
            writeln!(
                out,
                "  static void construct({})",
                cxx::prepend("Object self", &cxx::value_params(arity))
            )?;
            writeln!(out, "  {{")?;
            writeln!(
                out,
                "    DATA_PTR(self.value()) = new T({});",
                cxx::arg_names(arity)
            )?;
            writeln!(out, "  }}")?;
            writeln!(out, "}};")?;
        }

        writeln!(out)?;
        writeln!(out, "}} // namespace husk")?;
        writeln!(out)?;
        writeln!(out, "#endif // {}", guard)?;

        Ok(())
    }
}
