use std::{
    env, fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use spore::{Vm, VmOptions};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(path) => run_file(path),
        None => run_repl(),
    }
}

fn run_file(path: &str) -> ExitCode {
    let source = match fs::read(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut vm = Vm::new(VmOptions::default());
    match vm.evaluate(&source) {
        Ok(value) => {
            println!("{}", vm.print_value(value));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Reads one line of source at a time from stdin, evaluating each as a
/// complete top-level program and printing its result. A failed evaluation
/// prints the error and continues with the next line rather than exiting —
/// an error aborts only the current evaluation.
fn run_repl() -> ExitCode {
    let mut vm = Vm::new(VmOptions::default());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("spore> ");
        let _ = stdout.flush();

        let mut line = String::new();
        let bytes_read = match stdin.lock().read_line(&mut line) {
            Ok(n) => n,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        };
        if bytes_read == 0 {
            return ExitCode::SUCCESS;
        }
        if line.trim().is_empty() {
            continue;
        }

        match vm.evaluate(line.as_bytes()) {
            Ok(value) => println!("{}", vm.print_value(value)),
            Err(err) => eprintln!("error: {err}"),
        }
    }
}
