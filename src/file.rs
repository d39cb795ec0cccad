use failure::Error;

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::parser::{CharSource, IoChars, Reader};
use crate::values::ObjRef;
use crate::Interpreter;

impl<W: Write> Interpreter<W> {
    /// alternate read and eval until the source runs dry, stopping at the
    /// first error
    pub fn run_source<S: CharSource>(&mut self, reader: &mut Reader<S>) -> Result<ObjRef, Error> {
        let mut result = ObjRef::NIL;
        while let Some(expr) = self.read(reader)? {
            result = self.eval_top(expr)?;
        }
        Ok(result)
    }

    /// run each expression of a file
    pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ObjRef, Error> {
        let file = File::open(path)?;
        let mut reader = Reader::new(IoChars::new(BufReader::new(file)));
        self.run_source(&mut reader)
    }
}
