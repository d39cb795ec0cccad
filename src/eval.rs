use failure::Error;
use std::io::Write;

use crate::env::Env;
use crate::errors::RunError;
use crate::values::{Cell, ObjRef};
use crate::Interpreter;

/// deepest nesting of pending applications (and of lists the reader accepts)
pub const MAX_DEPTH: usize = 256;

/// a pending application on the call list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub expr: ObjRef,
}

impl<W: Write> Interpreter<W> {
    /// evaluate an expression against the empty environment
    pub fn eval_top(&mut self, expr: ObjRef) -> Result<ObjRef, Error> {
        self.backtrace.clear();
        self.eval(expr, &Env::new())
    }

    /// evaluate a structured s-expression
    pub fn eval(&mut self, expr: ObjRef, env: &Env) -> Result<ObjRef, Error> {
        match *self.heap.get(expr) {
            Cell::Symbol { .. } => self.resolve_symbol(expr, env),

            Cell::Pair(head, args) => {
                if self.calls.is_empty() {
                    self.backtrace.clear();
                }

                self.calls.push(Frame { expr });
                let result = if self.calls.len() > MAX_DEPTH {
                    Err(RunError::CallStackOverflow(MAX_DEPTH).into())
                } else {
                    self.run_proc(head, args, env)
                };

                // keep the call list as it stood at the innermost failure
                if result.is_err() && self.backtrace.is_empty() {
                    self.backtrace = self.calls.iter().rev().map(|frame| frame.expr).collect();
                }
                self.calls.pop();
                result
            }

            _ => Ok(expr),
        }
    }

    /// look a symbol up in `env`, then in its global binding
    fn resolve_symbol(&self, sym: ObjRef, env: &Env) -> Result<ObjRef, Error> {
        if let Some(value) = env.lookup(sym) {
            return Ok(value);
        }

        match self.global(sym) {
            Some(value) => Ok(value),
            None => Err(RunError::UnboundSymbol(self.to_display(sym)))?,
        }
    }

    /// call a procedure
    fn run_proc(&mut self, head: ObjRef, args: ObjRef, env: &Env) -> Result<ObjRef, Error> {
        let proc = self.eval(head, env)?;

        if let Cell::Prim(prim) = *self.heap.get(proc) {
            return self.call_primitive(prim, args, env);
        }

        Err(RunError::UncallableValue {
            name: self.to_display(head),
            typename: self.heap.type_of(proc).to_string(),
        })?
    }

    /// take the next expression off an argument list and evaluate it
    pub(crate) fn eval_next_arg(&mut self, args: &mut ObjRef, env: &Env, name: &str) -> Result<ObjRef, Error> {
        match *self.heap.get(*args) {
            Cell::Pair(arg, rest) => {
                *args = rest;
                self.eval(arg, env)
            }
            _ => Err(RunError::TypeError {
                name: name.to_owned(),
                expected: "list".to_owned(),
                got: self.heap.type_of(*args).to_string(),
            })?,
        }
    }

    /// the applications currently being evaluated, outermost first
    pub fn call_stack(&self) -> &[Frame] {
        &self.calls
    }

    /// the call list captured at the most recent failure, innermost first
    pub fn backtrace(&self) -> &[ObjRef] {
        &self.backtrace
    }
}
