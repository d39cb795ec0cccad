use failure::Error;
use std::io::Write;

use crate::errors::RunError;
use crate::values::{Cell, ObjRef};
use crate::Interpreter;

impl<W: Write> Interpreter<W> {
    /// intern a symbol: return the existing symbol with this name, or
    /// allocate a new one and put it at the front of the symbol list
    pub fn symbol(&mut self, name: &str) -> Result<ObjRef, Error> {
        let mut node = self.symbols;
        while let Cell::Pair(sym, next) = *self.heap.get(node) {
            if self.symbol_name(sym) == Some(name) {
                return Ok(sym);
            }
            node = next;
        }

        let text = self.heap.alloc(Cell::Str(name.to_owned()))?;
        let assoc = self.heap.cons(text, ObjRef::NIL)?;
        let sym = self.heap.alloc(Cell::Symbol { assoc, bound: false })?;
        self.symbols = self.heap.cons(sym, self.symbols)?;
        Ok(sym)
    }

    /// the name a symbol was interned under
    pub fn symbol_name(&self, sym: ObjRef) -> Option<&str> {
        match self.heap.get(sym) {
            Cell::Symbol { assoc, .. } => match self.heap.get(self.heap.car(*assoc)?) {
                Cell::Str(name) => Some(name.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    /// bind a symbol's global value, overwriting any previous binding
    pub fn set(&mut self, sym: ObjRef, value: ObjRef) -> Result<(), Error> {
        let assoc = match self.heap.get_mut(sym) {
            Cell::Symbol { assoc, bound } => {
                *bound = true;
                *assoc
            }
            other => Err(RunError::TypeError {
                name: "set".to_owned(),
                expected: "symbol".to_owned(),
                got: other.get_type().to_string(),
            })?,
        };
        self.heap.set_cdr(assoc, value);
        Ok(())
    }

    /// a symbol's global value, or None if it was never bound
    pub fn global(&self, sym: ObjRef) -> Option<ObjRef> {
        match self.heap.get(sym) {
            Cell::Symbol { assoc, bound: true } => self.heap.cdr(*assoc),
            _ => None,
        }
    }

    /// every interned symbol, newest first
    pub fn interned_symbols(&self) -> Vec<ObjRef> {
        let mut found = Vec::new();
        let mut node = self.symbols;
        while let Cell::Pair(sym, next) = *self.heap.get(node) {
            found.push(sym);
            node = next;
        }
        found
    }
}
