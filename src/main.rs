use forth32::{
    lang::codegen::Compiler,
    runtime::{error, interpreter::ForthInterpreter},
};
use std::{env::args, fs, process::exit};

/// Print how the program is meant to be invoked.
fn print_usage(program: &str) {
    eprintln!("Usage: {} compile <input.fs> <output.asm>", program);
    eprintln!("       {} run <input.fs>", program);
}

/// Compile a script to an assembly file and explain how to finish the build
/// with the external toolchain.
fn compile_command(input: &str, output: &str) -> error::Result<()> {
    let asm = Compiler::new().compile_file(input)?;

    fs::write(output, asm)?;

    println!("Successfully compiled {} to {}", input, output);
    println!();
    println!("To assemble and run:");
    println!("nasm -felf32 {} -o forth.o", output);
    println!("gcc -m32 forth.o -o forth");
    println!("./forth");

    Ok(())
}

/// Interpret a script directly, then show the final stack state.
fn run_command(input: &str) -> error::Result<()> {
    let mut interpreter = ForthInterpreter::new();

    interpreter.process_source_file(input)?;
    interpreter.print_stack();

    Ok(())
}

fn main() -> error::Result<()> {
    let args: Vec<String> = args().collect();

    match args.get(1).map(String::as_str) {
        Some("compile") if args.len() == 4 => compile_command(&args[2], &args[3]),
        Some("run") if args.len() == 3 => run_command(&args[2]),

        _ => {
            print_usage(&args[0]);
            exit(2);
        }
    }
}
