use std::{io::Write, path::PathBuf};

use super::{cxx, RenderContext, Renderer};
use crate::error::Result;

/// Declarations for `wrap_function`, which adapts a free function pointer
/// for registration with Ruby.
pub struct WrapFunctionHpp;

impl WrapFunctionHpp {
    const NAME: &str = "wrap-function-hpp";
    const FILE: &str = "husk/detail/wrap_function.hpp";
}

impl Renderer for WrapFunctionHpp {
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
        writeln!(out, "#include \"wrapped_function.hpp\"")?;
        writeln!(out)?;
        writeln!(out, "namespace husk")?;
        writeln!(out, "{{")?;
        writeln!(out, "namespace detail")?;
        writeln!(out, "{{")?;
        writeln!(out)?;
        writeln!(out, "// Builds the Wrapped_Function adapter for a free function. The returned")?;
        writeln!(out, "// pointer is owned by the method registry once registered.")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename Ret_T", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "Wrapped_Function* wrap_function(Ret_T (*func)({}));",
                cxx::type_list(arity)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "}} // namespace detail")?;
        writeln!(out, "}} // namespace husk")?;
        writeln!(out)?;
        writeln!(out, "#include \"wrap_function.ipp\"")?;
        writeln!(out)?;
        writeln!(out, "#endif // {}", guard)?;

        Ok(())
    }
}

/// Definitions backing the `wrap_function` declarations.
pub struct WrapFunctionIpp;

impl WrapFunctionIpp {
    const NAME: &str = "wrap-function-ipp";
    const FILE: &str = "husk/detail/wrap_function.ipp";
}

impl Renderer for WrapFunctionIpp {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn out_file(&self, ctx: &RenderContext) -> PathBuf {
        ctx.out_dir().join(Self::FILE)
    }

    fn render(&self, ctx: &RenderContext, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", cxx::BANNER)?;
        writeln!(out)?;
        writeln!(out, "#include \"auto_function_wrapper.hpp\"")?;

        for arity in 0..=ctx.max_arity() {
            writeln!(out)?;
            writeln!(
                out,
                "template<{}>",
                cxx::prepend("typename Ret_T", &cxx::typenames(arity))
            )?;
            writeln!(
                out,
                "inline husk::detail::Wrapped_Function* husk::detail::wrap_function(Ret_T (*func)({}))",
                cxx::type_list(arity)
            )?;
            writeln!(out, "{{")?;
            writeln!(
                out,
                "  return new Auto_Function_Wrapper<{}>(func);",
                cxx::prepend("Ret_T", &cxx::type_list(arity))
            )?;
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
    fn declares_function_pointer_overloads() {
        let output = render_to_string(&WrapFunctionHpp, 2);

        assert_eq!(
            "#ifndef Husk__detail__wrap_function__hpp_",
            output.lines().next().expect("output was empty")
        );
        assert_eq!(3, output.matches("Wrapped_Function* wrap_function(").count());
        assert!(output.contains(
            "template<typename Ret_T, typename Arg1_T, typename Arg2_T>\n\
             Wrapped_Function* wrap_function(Ret_T (*func)(Arg1_T, Arg2_T));"
        ));
    }

    #[test]
    fn definitions_allocate_the_matching_adapter() {
        let output = render_to_string(&WrapFunctionIpp, 1);

        let expected = r#"// This is a generated file. Do not edit it by hand.
// Rerun huskgen after changing the generator instead.

#include "auto_function_wrapper.hpp"

template<typename Ret_T>
inline husk::detail::Wrapped_Function* husk::detail::wrap_function(Ret_T (*func)())
{
  return new Auto_Function_Wrapper<Ret_T>(func);
}

template<typename Ret_T, typename Arg1_T>
inline husk::detail::Wrapped_Function* husk::detail::wrap_function(Ret_T (*func)(Arg1_T))
{
  return new Auto_Function_Wrapper<Ret_T, Arg1_T>(func);
}
"#;

        assert_eq!(expected, output);
    }
}
