/// Comment placed at the top of every generated file.
pub(crate) const BANNER: &str = "// This is a generated file. Do not edit it by hand.\n\
                                 // Rerun huskgen after changing the generator instead.";

/// Include guard in the house style, e.g. `Husk__detail__protect__hpp_` for
/// `husk/detail/protect.hpp`.
pub(crate) fn include_guard(out_file: &str) -> String {
    let mut guard = String::with_capacity(out_file.len() + 8);

    for (index, c) in out_file.chars().enumerate() {
        match c {
            '/' | '.' => guard.push_str("__"),
            c if index == 0 => guard.extend(c.to_uppercase()),
            c => guard.push(c),
        }
    }

    guard.push('_');
    guard
}

/// Joins a fixed leading parameter with a possibly empty arity list.
pub(crate) fn prepend(lead: &str, rest: &str) -> String {
    if rest.is_empty() {
        lead.to_string()
    } else {
        format!("{}, {}", lead, rest)
    }
}

/// `typename Arg1_T, typename Arg2_T, ...`
pub(crate) fn typenames(arity: usize) -> String {
    join(arity, |n| format!("typename Arg{}_T", n))
}

/// `Arg1_T, Arg2_T, ...`
pub(crate) fn type_list(arity: usize) -> String {
    join(arity, |n| format!("Arg{}_T", n))
}

/// `Arg1_T const& arg1, Arg2_T const& arg2, ...`
pub(crate) fn const_ref_params(arity: usize) -> String {
    join(arity, |n| format!("Arg{}_T const& arg{}", n, n))
}

/// `Arg1_T arg1, Arg2_T arg2, ...`
pub(crate) fn value_params(arity: usize) -> String {
    join(arity, |n| format!("Arg{}_T arg{}", n, n))
}

/// `arg1, arg2, ...`
pub(crate) fn arg_names(arity: usize) -> String {
    join(arity, |n| format!("arg{}", n))
}

fn join(arity: usize, part: impl Fn(usize) -> String) -> String {
    (1..=arity).map(part).collect::<Vec<_>>().join(", ")
}
