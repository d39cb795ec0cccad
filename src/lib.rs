#[macro_use]
extern crate failure_derive;

mod arithmetic;
mod builtins;
pub mod env;
mod eval;
pub mod errors;
mod file;
pub mod heap;
pub mod parser;
mod printer;
mod symbol;
pub mod values;

use failure::Error;
use std::io::{self, Write};

pub use crate::env::Env;
pub use crate::errors::{ParseError, RunError};
pub use crate::eval::{Frame, MAX_DEPTH};
pub use crate::heap::Heap;
pub use crate::parser::{CharSource, IoChars, Reader};
pub use crate::values::{Cell, ObjRef, Primitive, Type};

use crate::printer::Output;

/// An interpreter session. It owns the arena, the symbol list, the call
/// list and the output sink, so independent sessions never share state.
pub struct Interpreter<W: Write = io::Stdout> {
    heap: Heap,
    /// pair-chain of every interned symbol, newest first
    symbols: ObjRef,
    calls: Vec<Frame>,
    backtrace: Vec<ObjRef>,
    out: Output<W>,
}

impl Interpreter {
    /// create a new Interpreter with `cells` arena cells, printing to stdout
    pub fn new(cells: usize) -> Result<Interpreter, Error> {
        Interpreter::with_output(cells, io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    /// create a new Interpreter with `cells` arena cells, printing to `out`
    pub fn with_output(cells: usize, out: W) -> Result<Interpreter<W>, Error> {
        Interpreter::with_heap(Heap::new(cells), out)
    }

    /// create a new Interpreter on top of a fresh arena and bind the globals
    pub fn with_heap(heap: Heap, out: W) -> Result<Interpreter<W>, Error> {
        let mut interpreter = Interpreter {
            heap,
            symbols: ObjRef::NIL,
            calls: Vec::new(),
            backtrace: Vec::new(),
            out: Output::new(out),
        };

        let t = interpreter.symbol("t")?;
        interpreter.set(t, t)?;
        let nil = interpreter.symbol("nil")?;
        interpreter.set(nil, ObjRef::NIL)?;

        for &prim in Primitive::ALL.iter() {
            let value = interpreter.heap.alloc(Cell::Prim(prim))?;
            let sym = interpreter.symbol(prim.name())?;
            interpreter.set(sym, value)?;
        }

        Ok(interpreter)
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn number(&mut self, n: f32) -> Result<ObjRef, Error> {
        self.heap.alloc(Cell::Number(n))
    }

    pub fn string(&mut self, text: &str) -> Result<ObjRef, Error> {
        self.heap.alloc(Cell::Str(text.to_owned()))
    }

    pub fn cons(&mut self, car: ObjRef, cdr: ObjRef) -> Result<ObjRef, Error> {
        self.heap.cons(car, cdr)
    }

    /// build a proper list out of a slice of objects
    pub fn list(&mut self, items: &[ObjRef]) -> Result<ObjRef, Error> {
        items
            .iter()
            .rev()
            .try_fold(ObjRef::NIL, |tail, &item| self.heap.cons(item, tail))
    }

    /// read and evaluate every expression in a string, returning the last result
    pub fn run(&mut self, code: &str) -> Result<ObjRef, Error> {
        self.run_source(&mut Reader::new(code.chars()))
    }
}

// }}}
