mod log;

use failure::Error;
use itertools::join;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use fec::{Heap, Interpreter, Reader, RunError};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Opt {
    #[structopt(short, long)]
    debug: bool,

    #[structopt(short, long, default_value = "64000", help = "size of the object arena in bytes")]
    memory: usize,

    #[structopt(name = "FILE", parse(from_os_str), help = "file to run instead of starting a prompt")]
    file: Option<PathBuf>,
}

const HISTFILE: &str = ".fec_hist";

fn main() {
    let opt = Opt::from_args();
    if opt.debug {
        log::debug(format!("set options: {:?}", opt))
    }

    let mut interpreter = match Interpreter::with_heap(Heap::from_region_size(opt.memory), io::stdout()) {
        Ok(interpreter) => interpreter,
        Err(err) => {
            log::error(err);
            process::exit(1);
        }
    };

    if opt.debug {
        log::debug(format!(
            "arena: {} cells, {} in use after startup",
            interpreter.heap().capacity(),
            interpreter.heap().used_count()
        ));
    }

    let status = match &opt.file {
        Some(path) => run_file(&mut interpreter, path, &opt),
        None => repl(&mut interpreter, &opt),
    };
    process::exit(status);
}

fn run_file(interpreter: &mut Interpreter, path: &Path, opt: &Opt) -> i32 {
    if opt.debug {
        log::info(format!("running {:?}...", path));
    }

    let result = interpreter.run_file(path);
    if let Err(err) = interpreter.fresh_line().and_then(|_| interpreter.flush()) {
        log::warn(err);
    }

    match result {
        Ok(_) => {
            if opt.debug {
                log::info("run_file: done");
            }
            0
        }
        Err(err) => {
            report(interpreter, &err, opt);
            1
        }
    }
}

fn repl(interpreter: &mut Interpreter, opt: &Opt) -> i32 {
    let mut rl = Editor::<()>::new();
    if let Err(err) = rl.load_history(HISTFILE) {
        log::warn(format!("error opening history file: {}", err));
    }

    let prompt = format!("{}fec λ{} ", "\x1b[1;94m", log::RESET);
    let mut status = 0;

    loop {
        let input = rl.readline(&prompt);

        match input {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }

                if line.starts_with('>') && line.len() > 1 {
                    println!("{}", command(interpreter, &line[1..]));
                    continue;
                }

                rl.add_history_entry(line.as_str());
                if let Err(err) = eval_line(interpreter, &line) {
                    report(interpreter, &err, opt);
                    // nothing is ever freed, so there is no way back from this
                    if let Some(RunError::ArenaExhausted(_)) = err.downcast_ref::<RunError>() {
                        status = 1;
                        break;
                    }
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }

            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }

            Err(err) => {
                log::error(err);
                status = 1;
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTFILE) {
        log::warn(format!("error saving history file: {}", err));
    }
    status
}

/// evaluate every expression on a line, echoing each result on its own line
fn eval_line(interpreter: &mut Interpreter, line: &str) -> Result<(), Error> {
    let mut reader = Reader::new(line.chars());
    while let Some(expr) = interpreter.read(&mut reader)? {
        let result = interpreter.eval_top(expr)?;
        interpreter.fresh_line()?;
        interpreter.write(result)?;
    }
    interpreter.fresh_line()?;
    interpreter.flush()
}

fn report(interpreter: &mut Interpreter, err: &Error, opt: &Opt) {
    if let Err(why) = interpreter.fresh_line().and_then(|_| interpreter.flush()) {
        log::warn(why);
    }
    log::error(err);

    if opt.debug {
        for &frame in interpreter.backtrace() {
            log::debug(format!("  in {}", interpreter.to_display(frame)));
        }
    }
}

fn command(interpreter: &Interpreter, cmd: &str) -> String {
    match cmd {
        "symbols" => join(
            interpreter
                .interned_symbols()
                .into_iter()
                .map(|sym| interpreter.to_display(sym)),
            ", ",
        ),
        "memory" => {
            let heap = interpreter.heap();
            format!("{} of {} cells in use", heap.used_count(), heap.capacity())
        }
        _ => "invalid command".to_owned(),
    }
}
