use std::{io::Write, path::PathBuf};

use super::{cxx, RenderContext, Renderer};
use crate::error::Result;

/// Declarations for `object_call`, the typed method-call helper on Ruby
/// objects.
pub struct ObjectCallHpp;

impl ObjectCallHpp {
    const NAME: &str = "object-call-hpp";
    const FILE: &str = "husk/detail/object_call.hpp";
}

impl Renderer for ObjectCallHpp {
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
        writeln!(out, "#include \"../Identifier.hpp\"")?;
        writeln!(out, "#include \"ruby.hpp\"")?;
        writeln!(out)?;
        writeln!(out, "namespace husk")?;
        writeln!(out, "{{")?;
        writeln!(out)?;
        writeln!(out, "class Object;")?;
        writeln!(out)?;
        writeln!(out, "namespace detail")?;
        writeln!(out, "{{")?;
        writeln!(out)?;
        writeln!(out, "// Calls a method on a Ruby object, converting each argument with to_ruby")?;
        writeln!(out, "// and the result back with from_ruby.")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename Ret_T", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "Ret_T object_call({});",
                cxx::prepend(
                    "Object const& receiver, Identifier method",
                    &cxx::const_ref_params(arity)
                )
            )?;
        }

        writeln!(out)?;
        writeln!(out, "}} // namespace detail")?;
        writeln!(out, "}} // namespace husk")?;
        writeln!(out)?;
        writeln!(out, "#include \"object_call.ipp\"")?;
        writeln!(out)?;
        writeln!(out, "#endif // {}", guard)?;

        Ok(())
    }
}

/// Definitions backing the `object_call` declarations: marshal the
/// arguments, dispatch through `protect`, convert the result.
pub struct ObjectCallIpp;

impl ObjectCallIpp {
    const NAME: &str = "object-call-ipp";
    const FILE: &str = "husk/detail/object_call.ipp";
}

impl Renderer for ObjectCallIpp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn out_file(&self, ctx: &RenderContext) -> PathBuf {
        ctx.out_dir().join(Self::FILE)
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", cxx::BANNER)?;
        writeln!(out)?;
        writeln!(out, "#include \"../Object_defn.hpp\"")?;
        writeln!(out, "#include \"from_ruby.hpp\"")?;
        writeln!(out, "#include \"protect.hpp\"")?;
        writeln!(out, "#include \"to_ruby.hpp\"")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename Ret_T", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "inline Ret_T husk::detail::object_call({})",
                cxx::prepend(
                    "Object const& receiver, Identifier method",
                    &cxx::const_ref_params(arity)
                )
            )?;
            writeln!(out, "{{")?;

            if arity == 0 {
                writeln!(
                    out,
                    "  VALUE result = protect(rb_funcall2, receiver.value(), method.id(), 0, static_cast<VALUE const*>(0));"
                )?;
            } else {
                writeln!(out, "  VALUE args[{}];", arity)?;
                for n in 1..=arity {
                    writeln!(out, "  args[{}] = to_ruby(arg{});", n - 1, n)?;
                }
                writeln!(
                    out,
                    "  VALUE result = protect(rb_funcall2, receiver.value(), method.id(), {}, args);",
                    arity
                )?;
            }

            writeln!(out, "  return from_ruby<Ret_T>(result);")?;
            writeln!(out, "}}")?;
        }

        Ok(())
    }
}
