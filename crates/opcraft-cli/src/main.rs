//! `opcraft`: compile an instruction set definition into decoder source.
//!
//! ```text
//! opcraft opcodes.yaml opcodes_gen.h
//! opcraft opcodes.json decode.rs --backend rust --dispatch-fn decode
//! ```

use std::{error::Error, fs, path::Path, path::PathBuf};

use clap::{Parser, ValueEnum};
use log::info;
use opcraft::{
    emit::{Backend, CppBackend, CppConfig, RustBackend, RustConfig},
    isa::InstructionSet,
    serde::IsaDef,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Yaml,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    Cpp,
    Rust,
}

#[derive(Debug, Parser)]
#[command(version, about = "Generate an instruction decoder from a definition file")]
struct Args {
    /// Instruction set definition (YAML or JSON).
    definition: PathBuf,
    /// Output file.
    outfile: PathBuf,
    /// Definition format; guessed from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<InputFormat>,
    #[arg(long, value_enum, default_value_t = BackendKind::Cpp)]
    backend: BackendKind,
    /// Name of the generated dispatch function.
    #[arg(long)]
    dispatch_fn: Option<String>,
    /// Fail when two instructions' encodings overlap.
    #[arg(long)]
    deny_ambiguous: bool,
}

fn input_format(args: &Args) -> InputFormat {
    args.format.unwrap_or_else(|| {
        match args.definition.extension().and_then(|ext| ext.to_str()) {
            Some("json") => InputFormat::Json,
            _ => InputFormat::Yaml,
        }
    })
}

fn load(path: &Path, format: InputFormat) -> Result<IsaDef, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let def = match format {
        InputFormat::Yaml => serde_yaml::from_str(&text)?,
        InputFormat::Json => serde_json::from_str(&text)?,
    };
    Ok(def)
}

fn backend(args: &Args) -> Box<dyn Backend> {
    match args.backend {
        BackendKind::Cpp => {
            let mut config = CppConfig::default();
            if let Some(name) = &args.dispatch_fn {
                config.dispatch_fn = name.clone();
            }
            Box::new(CppBackend::new(config))
        }
        BackendKind::Rust => {
            let mut config = RustConfig::default();
            if let Some(name) = &args.dispatch_fn {
                config.dispatch_fn = name.clone();
            }
            Box::new(RustBackend::new(config))
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let def = load(&args.definition, input_format(args))?;
    let set = InstructionSet::try_from(def)?;

    if args.deny_ambiguous {
        let ambiguities = set.dispatch_table().ambiguities();
        if let Some(first) = ambiguities.first() {
            return Err(format!("{} ambiguous encoding(s), first: {first}", ambiguities.len()).into());
        }
    }

    let output = backend(args).render(&set);
    fs::write(&args.outfile, output)?;
    info!(
        "wrote {} instruction(s) to {}",
        set.len(),
        args.outfile.display()
    );

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
