use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::{bail, IntoDiagnostic, Result};

use nal::{assembler, image, Cpu, ExecState, OpcodeTable};

/// Nal is an assembler & simulator toolchain for the NAL 8-bit teaching machine.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a `.nal` file to assemble and run
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a `.nal` source or `.nac` raw-image file and print the final machine state
    Run {
        /// `.nal` or `.nac` file to run
        name: PathBuf,
        /// Opcode table as a JSON mnemonic -> code object (defaults to builtin)
        #[arg(short, long)]
        table: Option<PathBuf>,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
    },
    /// Create a raw `.nac` memory image to run later or load into other tools
    Compile {
        /// `.nal` file to compile
        name: PathBuf,
        /// Destination to output the .nac image
        dest: Option<PathBuf>,
        /// Opcode table as a JSON mnemonic -> code object (defaults to builtin)
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
    /// Check a `.nal` file without running or outputting an image
    Check {
        /// File to check
        name: PathBuf,
        /// Opcode table as a JSON mnemonic -> code object (defaults to builtin)
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    use MsgColor::*;
    let args = Args::parse();

    if let Some(command) = args.command {
        match command {
            Command::Run {
                name,
                table,
                minimal,
            } => run(&name, table.as_deref(), minimal),
            Command::Compile { name, dest, table } => {
                file_message(Green, "Assembling", &name);
                let table = load_table(table.as_deref())?;
                let contents = fs::read_to_string(&name).into_diagnostic()?;
                let source = assembler::read(&contents)?;
                let image_text = assembler::assemble(source, &table)?;

                let out_file_name = dest.unwrap_or_else(|| name.with_extension("nac"));
                fs::write(&out_file_name, image_text).into_diagnostic()?;

                message(Green, "Finished", "emit raw image");
                file_message(Green, "Saved", &out_file_name);
                Ok(())
            }
            Command::Check { name, table } => {
                file_message(Green, "Checking", &name);
                let table = load_table(table.as_deref())?;
                let contents = fs::read_to_string(&name).into_diagnostic()?;
                let source = assembler::read(&contents)?;
                let _ = assembler::assemble(source, &table)?;
                message(Green, "Success", "no errors found!");
                Ok(())
            }
        }
    } else if let Some(path) = args.path {
        run(&path, None, false)
    } else {
        println!("\n~ nal v{VERSION} ~");
        println!("{SHORT_INFO}");
        Ok(())
    }
}

#[allow(unused)]
enum MsgColor {
    Green,
    Cyan,
    Red,
}

fn file_message(color: MsgColor, left: &str, right: &Path) {
    let right = format!("target {}", right.display());
    message(color, left, &right);
}

fn message<S>(color: MsgColor, left: S, right: S)
where
    S: Colorize + std::fmt::Display,
{
    let left = match color {
        MsgColor::Green => left.green(),
        MsgColor::Cyan => left.cyan(),
        MsgColor::Red => left.red(),
    };
    println!("{left:>12} {right}");
}

fn run(name: &Path, table: Option<&Path>, minimal: bool) -> Result<()> {
    if !minimal {
        file_message(MsgColor::Green, "Loading", name);
    }

    let program = match name.extension().and_then(|ext| ext.to_str()) {
        Some("nac") => {
            let contents = fs::read_to_string(name).into_diagnostic()?;
            image::parse(&contents)?
        }
        Some("nal") => {
            let table = load_table(table)?;
            let contents = fs::read_to_string(name).into_diagnostic()?;
            let source = assembler::read(&contents)?;
            let image_text = assembler::assemble(source, &table)?;
            image::parse(&image_text)?
        }
        Some(_) => bail!("File has unknown extension. Exiting..."),
        None => bail!("File has no extension. Exiting..."),
    };

    let mut cpu = Cpu::new();
    cpu.load(&program)?;

    if !minimal {
        message(MsgColor::Green, "Running", "loaded image");
    }
    let state = cpu.run().clone();

    if minimal {
        println!("{}", cpu.out());
    } else {
        print!("{cpu}");
    }

    match state {
        ExecState::Faulted(fault) => {
            if !minimal {
                message(MsgColor::Red, "Faulted", fault.to_string().as_str());
            }
            Err(fault.into())
        }
        _ => {
            if !minimal {
                println!("\n{:>12}", "Halted".cyan());
                file_message(MsgColor::Green, "Completed", name);
            }
            Ok(())
        }
    }
}

fn load_table(path: Option<&Path>) -> Result<OpcodeTable> {
    match path {
        Some(path) => Ok(OpcodeTable::load(path)?),
        None => Ok(OpcodeTable::builtin()),
    }
}

const SHORT_INFO: &str = r"
Welcome to nal, a toolchain for the NAL 8-bit teaching machine:
an assembler from mnemonic source to raw memory images, and a
simulator that executes those images to a halt or fault.
Please use `-h` or `--help` to access the usage instructions.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
