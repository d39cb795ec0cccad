use failure::Error;
use std::io::{self, Read, Write};
use std::str::Chars;

use crate::errors::ParseError;
use crate::eval::MAX_DEPTH;
use crate::values::{Cell, ObjRef};
use crate::Interpreter;

/// longest symbol or number token the reader accepts
pub const MAX_TOKEN_LEN: usize = 63;

/// anything the reader can pull characters from, one at a time
pub trait CharSource {
    /// the next character, or None at the end of the stream
    fn next_char(&mut self) -> Result<Option<char>, Error>;
}

impl<'a> CharSource for Chars<'a> {
    fn next_char(&mut self) -> Result<Option<char>, Error> {
        Ok(self.next())
    }
}

/// a byte stream read as one character per byte
pub struct IoChars<R> {
    bytes: io::Bytes<R>,
}

impl<R: Read> IoChars<R> {
    pub fn new(reader: R) -> IoChars<R> {
        IoChars { bytes: reader.bytes() }
    }
}

impl<R: Read> CharSource for IoChars<R> {
    fn next_char(&mut self) -> Result<Option<char>, Error> {
        match self.bytes.next() {
            Some(byte) => Ok(Some(char::from(byte?))),
            None => Ok(None),
        }
    }
}

/// a character source plus the one character of lookahead a token scan
/// can overshoot into
pub struct Reader<S> {
    source: S,
    pushback: Option<char>,
}

impl<S: CharSource> Reader<S> {
    pub fn new(source: S) -> Reader<S> {
        Reader {
            source,
            pushback: None,
        }
    }

    fn next_char(&mut self) -> Result<Option<char>, Error> {
        match self.pushback.take() {
            Some(c) => Ok(Some(c)),
            None => self.source.next_char(),
        }
    }

    fn unread(&mut self, c: char) {
        self.pushback = Some(c);
    }
}

/// one step of reading: an object, a closing paren, or the end of the input
enum Datum {
    Object(ObjRef),
    Close,
    End,
}

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

pub fn is_delimiter(c: char) -> bool {
    is_space(c) || c == '(' || c == ')'
}

impl<W: Write> Interpreter<W> {
    /// read the next top-level expression, or None once the input is used up
    pub fn read<S: CharSource>(&mut self, reader: &mut Reader<S>) -> Result<Option<ObjRef>, Error> {
        self.backtrace.clear();
        match self.read_datum(reader, 0)? {
            Datum::Object(obj) => Ok(Some(obj)),
            Datum::Close => Err(ParseError::UnexpectedParen)?,
            Datum::End => Ok(None),
        }
    }

    fn read_datum<S: CharSource>(&mut self, reader: &mut Reader<S>, depth: usize) -> Result<Datum, Error> {
        let mut chr = reader.next_char()?;
        while let Some(c) = chr {
            if !is_space(c) {
                break;
            }
            chr = reader.next_char()?;
        }

        let obj = match chr {
            None => return Ok(Datum::End),
            Some(')') => return Ok(Datum::Close),
            Some('(') => self.read_list(reader, depth + 1)?,
            Some('"') => self.read_string(reader)?,
            Some(c) => self.read_atom(reader, c)?,
        };
        Ok(Datum::Object(obj))
    }

    /// read list elements up to the matching ')', appending at the tail
    fn read_list<S: CharSource>(&mut self, reader: &mut Reader<S>, depth: usize) -> Result<ObjRef, Error> {
        if depth > MAX_DEPTH {
            Err(ParseError::TooDeep(MAX_DEPTH))?
        }

        let mut head = ObjRef::NIL;
        let mut tail = ObjRef::NIL;
        loop {
            let obj = match self.read_datum(reader, depth)? {
                Datum::Object(obj) => obj,
                Datum::Close => return Ok(head),
                Datum::End => Err(ParseError::UnterminatedList)?,
            };

            let cell = self.heap.cons(obj, ObjRef::NIL)?;
            if head.is_nil() {
                head = cell;
            } else {
                self.heap.set_cdr(tail, cell);
            }
            tail = cell;
        }
    }

    fn read_string<S: CharSource>(&mut self, reader: &mut Reader<S>) -> Result<ObjRef, Error> {
        let mut text = String::new();
        loop {
            match reader.next_char()? {
                None => Err(ParseError::UnterminatedString)?,
                Some('"') => break,
                Some('\\') => match reader.next_char()? {
                    None => Err(ParseError::UnterminatedString)?,
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(c) => text.push(c),
                },
                Some(c) => text.push(c),
            }
        }
        self.heap.alloc(Cell::Str(text))
    }

    /// read a number or a symbol starting with `first`
    fn read_atom<S: CharSource>(&mut self, reader: &mut Reader<S>, first: char) -> Result<ObjRef, Error> {
        let mut token = String::new();
        let mut len = 0;
        let mut chr = Some(first);

        while let Some(c) = chr {
            if is_delimiter(c) {
                reader.unread(c);
                break;
            }
            if len == MAX_TOKEN_LEN {
                Err(ParseError::TokenTooLong(MAX_TOKEN_LEN))?
            }
            token.push(c);
            len += 1;
            chr = reader.next_char()?;
        }

        match token.parse::<f32>() {
            Ok(n) => self.heap.alloc(Cell::Number(n)),
            Err(_) => self.symbol(&token),
        }
    }
}
