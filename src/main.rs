use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as ClapParser;
use log::info;

use javasst::dump;
use javasst::parser::Parser;

/// Compiler front end for the JavaSST teaching language.
#[derive(ClapParser, Debug)]
#[command(version, about)]
struct Args {
    /// JavaSST source file to compile
    file: PathBuf,

    /// Print the AST after a successful parse
    #[arg(long)]
    dump_ast: bool,

    /// Print the symbol table after a successful parse
    #[arg(long)]
    dump_symbols: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let file = args.file.display().to_string();
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read '{file}'"))?;

    let program = match Parser::new(&file, &source).and_then(|p| p.parse()) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("parsed class '{}' from {file}", program.class.name);

    if args.dump_ast {
        print!("{}", dump::ast(&program));
    }
    if args.dump_symbols {
        print!("{}", dump::symbols(&program));
    }

    Ok(ExitCode::SUCCESS)
}
