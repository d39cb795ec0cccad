use std::fmt;

/// number of significant digits used when printing a number
pub const PRECISION: usize = 7;

/// a handle to a cell in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef(pub(crate) u32);

impl ObjRef {
    /// the one nil object. it lives in slot 0 and is never handed out by the allocator
    pub const NIL: ObjRef = ObjRef(0);

    pub fn is_nil(self) -> bool {
        self == ObjRef::NIL
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// the builtin procedures, selected by opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Print,
    Add,
    Sub,
    Mul,
    Div,
}

impl Primitive {
    pub const ALL: [Primitive; 5] = [
        Primitive::Print,
        Primitive::Add,
        Primitive::Sub,
        Primitive::Mul,
        Primitive::Div,
    ];

    /// the global symbol this primitive is bound to
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Print => "print",
            Primitive::Add   => "+",
            Primitive::Sub   => "-",
            Primitive::Mul   => "*",
            Primitive::Div   => "/",
        }
    }
}

/// representation of a single arena cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Pair(ObjRef, ObjRef),
    Free { next: Option<ObjRef> },
    Nil,
    Number(f32),
    /// `assoc` is a pair of (name-string . global-value)
    Symbol { assoc: ObjRef, bound: bool },
    Str(String),
    Prim(Primitive),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Pair,
    Free,
    Nil,
    Number,
    Symbol,
    Str,
    Prim,
}

impl Cell {
    pub fn get_type(&self) -> Type {
        match self {
            Cell::Pair(..)       => Type::Pair,
            Cell::Free { .. }    => Type::Free,
            Cell::Nil            => Type::Nil,
            Cell::Number(_)      => Type::Number,
            Cell::Symbol { .. }  => Type::Symbol,
            Cell::Str(_)         => Type::Str,
            Cell::Prim(_)        => Type::Prim,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Type::Pair   => "pair",
            Type::Free   => "free",
            Type::Nil    => "nil",
            Type::Number => "number",
            Type::Symbol => "symbol",
            Type::Str    => "string",
            Type::Prim   => "primitive",
        };
        write!(f, "{}", name)
    }
}

/// format a number the way C's `%.7g` does
pub fn format_number(n: f32) -> String {
    let n = f64::from(n);

    if n.is_nan() {
        return "nan".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let sci = format!("{:.*e}", PRECISION - 1, n);
    let (mantissa, exp) = match sci.find('e') {
        Some(i) => (&sci[..i], sci[i + 1..].parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, n)).to_owned()
    }
}

fn trim_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_without_fraction() {
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(-24.0), "-24");
        assert_eq!(format_number(1234567.0), "1234567");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn fractions_keep_seven_significant_digits() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(3.14159265), "3.141593");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn large_and_small_numbers_use_exponents() {
        assert_eq!(format_number(12345678.0), "1.234568e+07");
        assert_eq!(format_number(1e10), "1e+10");
        assert_eq!(format_number(0.00001), "1e-05");
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(format_number(std::f32::INFINITY), "inf");
        assert_eq!(format_number(std::f32::NEG_INFINITY), "-inf");
        assert_eq!(format_number(std::f32::NAN), "nan");
    }

    #[test]
    fn primitive_names() {
        let names: Vec<&str> = Primitive::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["print", "+", "-", "*", "/"]);
    }
}
