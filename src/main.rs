#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

use clap::{Arg, Command};
use husk_codegen::generate::Generator;

fn main() -> husk_codegen::error::Result<()> {
    let matches = Command::new("huskgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates the arity-expanded C++ sources for the husk bindings")
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Project root to generate into; read codegen.toml from here")
                .default_value("."),
        )
        .get_matches();

    let Some(root) = matches.get_one::<String>("root") else {
        anyhow::bail!("A project root is required");
    };

    let mut generator = Generator::load(root)?;
    generator.with_default_renderers();
    generator.run()?;

    Ok(())
}
