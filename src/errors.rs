use failure::Fail;

#[derive(Debug, Fail)]
pub enum ParseError {
    #[fail(display = "unterminated list")]
    UnterminatedList,

    #[fail(display = "unterminated string literal")]
    UnterminatedString,

    #[fail(display = "encountered erroneous ')'")]
    UnexpectedParen,

    #[fail(display = "token longer than {} characters", _0)]
    TokenTooLong(usize),

    #[fail(display = "lists nested deeper than {} levels", _0)]
    TooDeep(usize),
}

#[derive(Debug, Fail)]
pub enum RunError {
    #[fail(display = "arena exhausted: all {} cells are in use", _0)]
    ArenaExhausted(usize),

    #[fail(display = "unbound symbol `{}`", _0)]
    UnboundSymbol(String),

    #[fail(display = "{}: expected a {}, got a {} instead", name, expected, got)]
    TypeError {
        name: String,
        expected: String,
        got: String
    },

    #[fail(display = "value `{}` (of type {}) is uncallable", name, typename)]
    UncallableValue { name: String, typename: String },

    #[fail(display = "call stack exceeded {} frames", _0)]
    CallStackOverflow(usize),
}
