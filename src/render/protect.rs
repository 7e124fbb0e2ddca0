use std::{io::Write, path::PathBuf};

use super::{cxx, RenderContext, Renderer};
use crate::error::Result;

/// Declarations for `protect`, the exception-safe bridge into the Ruby C
/// API.
pub struct ProtectHpp;

impl ProtectHpp {
    const NAME: &str = "protect-hpp";
    const FILE: &str = "husk/detail/protect.hpp";
}

impl Renderer for ProtectHpp {
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
        writeln!(out, "#include \"ruby.hpp\"")?;
        writeln!(out)?;
        writeln!(out, "namespace husk")?;
        writeln!(out, "{{")?;
        writeln!(out, "namespace detail")?;
        writeln!(out, "{{")?;
        writeln!(out)?;
        writeln!(out, "// Calls fun with the given arguments inside rb_protect, translating any")?;
        writeln!(out, "// Ruby exception that escapes into a husk::Exception.")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename Fun", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "VALUE protect({});",
                cxx::prepend("Fun fun", &cxx::const_ref_params(arity))
            )?;
        }

        writeln!(out)?;
        writeln!(out, "}} // namespace detail")?;
        writeln!(out, "}} // namespace husk")?;
        writeln!(out)?;
        writeln!(out, "#include \"protect.ipp\"")?;
        writeln!(out)?;
        writeln!(out, "#endif // {}", guard)?;

        Ok(())
    }
}

/// Definitions backing the `protect` declarations: wrap the call in a
/// `Ruby_Function` so it can cross `rb_protect` as a single callback.
pub struct ProtectIpp;

impl ProtectIpp {
    const NAME: &str = "protect-ipp";
    const FILE: &str = "husk/detail/protect.ipp";
}

impl Renderer for ProtectIpp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn out_file(&self, ctx: &RenderContext) -> PathBuf {
        ctx.out_dir().join(Self::FILE)
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", cxx::BANNER)?;
        writeln!(out)?;
        writeln!(out, "#include \"ruby_function.hpp\"")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename Fun", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "inline VALUE husk::detail::protect({})",
                cxx::prepend("Fun fun", &cxx::const_ref_params(arity))
            )?;
            writeln!(out, "{{")?;
            writeln!(
                out,
                "  Ruby_Function<{}> call({});",
                cxx::prepend("Fun", &cxx::type_list(arity)),
                cxx::prepend("fun", &cxx::arg_names(arity))
            )?;
            writeln!(out, "  return call.invoke();")?;
            writeln!(out, "}}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::render::render_to_string;

    #[test]
    fn declarations_take_const_references() {
        let output = render_to_string(&ProtectHpp, 3);

        assert_eq!(
            "#ifndef Husk__detail__protect__hpp_",
            output.lines().next().expect("output was empty")
        );
        assert_eq!(4, output.matches("VALUE protect(").count());
        assert!(output.contains(
            "template<typename Fun, typename Arg1_T, typename Arg2_T>\n\
             VALUE protect(Fun fun, Arg1_T const& arg1, Arg2_T const& arg2);"
        ));
    }

    #[test]
    fn definitions_wrap_the_call_in_a_ruby_function() {
        let output = render_to_string(&ProtectIpp, 1);

        let expected = r#"// This is a generated file. Do not edit it by hand.
// Rerun huskgen after changing the generator instead.

#include "ruby_function.hpp"

template<typename Fun>
inline VALUE husk::detail::protect(Fun fun)
{
  Ruby_Function<Fun> call(fun);
  return call.invoke();
}

template<typename Fun, typename Arg1_T>
inline VALUE husk::detail::protect(Fun fun, Arg1_T const& arg1)
{
  Ruby_Function<Fun, Arg1_T> call(fun, arg1);
  return call.invoke();
}
"#;

        assert_eq!(expected, output);
    }
}
