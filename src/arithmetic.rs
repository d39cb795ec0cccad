use crate::values::Primitive;

// because math is hard

/// the binary operators behind the arithmetic primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

use self::ArithOp::*;

impl ArithOp {
    /// the operator a primitive folds with, or None for non-arithmetic primitives
    pub fn of(prim: Primitive) -> Option<ArithOp> {
        match prim {
            Primitive::Add   => Some(Add),
            Primitive::Sub   => Some(Sub),
            Primitive::Mul   => Some(Mul),
            Primitive::Div   => Some(Div),
            Primitive::Print => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
        }
    }

    /// fold one more operand into the running result
    pub fn apply(self, acc: f32, n: f32) -> f32 {
        match self {
            Add => acc + n,
            Sub => acc - n,
            Mul => acc * n,
            Div => acc / n,
        }
    }

    /// the result of an operator called with no arguments at all
    pub fn identity(self) -> f32 {
        match self {
            Add | Sub => 0.0,
            Mul | Div => 1.0,
        }
    }
}
