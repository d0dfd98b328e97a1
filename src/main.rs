use std::path::PathBuf;

use structopt::StructOpt;

mod error;
mod pipeline;
mod symbol_table;

#[derive(Debug, StructOpt)]
#[structopt(name = "frontgen", about = "Teaching-grade compiler front-end generator")]
enum CLOptions {
    /// Build a scanner from regular definitions and tokenize a source file.
    Lexical {
        #[structopt(parse(from_os_str))]
        definitions: PathBuf,
        #[structopt(parse(from_os_str))]
        source: PathBuf,
        #[structopt(parse(from_os_str))]
        tokens_out: Option<PathBuf>,
    },
    /// Build an SLR(1) parser from a grammar and parse a token file.
    Syntactic {
        #[structopt(parse(from_os_str))]
        grammar: PathBuf,
        #[structopt(parse(from_os_str))]
        tokens: PathBuf,
    },
}

fn main() {
    let options = CLOptions::from_args();
    let result = match &options {
        CLOptions::Lexical { definitions, source, tokens_out } => {
            pipeline::run_lexical(definitions, source, tokens_out.as_ref()).map(|_| ())
        }
        CLOptions::Syntactic { grammar, tokens } => pipeline::run_syntactic(grammar, tokens),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
