use failure::Error;
use itertools::join;
use std::io::{self, Write};

use crate::values::{format_number, Cell, ObjRef};
use crate::Interpreter;

/// the output sink, remembering whether the last thing written ended a line
pub(crate) struct Output<W> {
    inner: W,
    line_start: bool,
}

impl<W: Write> Output<W> {
    pub fn new(inner: W) -> Output<W> {
        Output {
            inner,
            line_start: true,
        }
    }

    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        if let Some(last) = text.chars().last() {
            self.line_start = last == '\n';
        }
        self.inner.write_all(text.as_bytes())
    }
}

impl<W: Write> Interpreter<W> {
    /// represent an object as a human-friendly string
    pub fn to_display(&self, obj: ObjRef) -> String {
        match self.heap.get(obj) {
            Cell::Number(n)     => format_number(*n),
            Cell::Nil           => "nil".to_owned(),
            Cell::Symbol { .. } => self.symbol_name(obj).unwrap_or_default().to_owned(),
            Cell::Str(s)        => s.clone(),
            Cell::Prim(p)       => format!("<primitive {}>", p.name()),
            Cell::Free { .. }   => "<free>".to_owned(),
            Cell::Pair(..)      => self.list_to_display(obj),
        }
    }

    fn list_to_display(&self, list: ObjRef) -> String {
        let mut items = Vec::new();
        let mut node = list;
        while let Cell::Pair(car, cdr) = *self.heap.get(node) {
            items.push(self.to_display(car));
            node = cdr;
        }

        // improper tail
        if !node.is_nil() {
            items.push(".".to_owned());
            items.push(self.to_display(node));
        }

        format!("({})", join(items, " "))
    }

    /// write an object's textual form to the output
    pub fn write(&mut self, obj: ObjRef) -> Result<(), Error> {
        let text = self.to_display(obj);
        self.out.write_str(&text)?;
        Ok(())
    }

    /// start a new line unless the output is already at the start of one
    pub fn fresh_line(&mut self) -> Result<(), Error> {
        if !self.out.line_start {
            self.out.write_str("\n")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.out.inner.flush()?;
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.out.inner
    }

    pub fn into_output(self) -> W {
        self.out.inner
    }
}
