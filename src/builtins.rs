use failure::Error;
use std::io::Write;

use crate::arithmetic::ArithOp;
use crate::env::Env;
use crate::errors::RunError;
use crate::values::{Cell, ObjRef, Primitive, Type};
use crate::Interpreter;

impl<W: Write> Interpreter<W> {
    /// run a primitive on its unevaluated argument list
    pub(crate) fn call_primitive(&mut self, prim: Primitive, args: ObjRef, env: &Env) -> Result<ObjRef, Error> {
        match ArithOp::of(prim) {
            Some(op) => self.math(op, args, env),
            None => self.print(args, env),
        }
    }

    // {{{ output
    /// write each argument, separated by single spaces, and return the last one
    /// usage: (print <expr> <expr> ...)
    fn print(&mut self, mut args: ObjRef, env: &Env) -> Result<ObjRef, Error> {
        let mut result = ObjRef::NIL;

        while !args.is_nil() {
            result = self.eval_next_arg(&mut args, env, "print")?;
            self.write(result)?;
            if self.heap.type_of(args) == Type::Pair {
                self.out.write_str(" ")?;
            }
        }

        Ok(result)
    }
    // }}}

    // {{{ math
    /// left-fold the arguments, seeded with the first one
    /// usage: (+ <num> <num> ...)
    ///        (- <num> <num> ...)
    ///        (* <num> <num> ...)
    ///        (/ <num> <num> ...)
    fn math(&mut self, op: ArithOp, mut args: ObjRef, env: &Env) -> Result<ObjRef, Error> {
        if args.is_nil() {
            return self.heap.alloc(Cell::Number(op.identity()));
        }

        let mut acc = self.next_number(op, &mut args, env)?;
        while !args.is_nil() {
            let n = self.next_number(op, &mut args, env)?;
            acc = op.apply(acc, n);
        }

        self.heap.alloc(Cell::Number(acc))
    }

    fn next_number(&mut self, op: ArithOp, args: &mut ObjRef, env: &Env) -> Result<f32, Error> {
        let value = self.eval_next_arg(args, env, op.name())?;
        match self.heap.number(value) {
            Some(n) => Ok(n),
            None => Err(RunError::TypeError {
                name: op.name().to_owned(),
                expected: "number".to_owned(),
                got: self.heap.type_of(value).to_string(),
            })?,
        }
    }
    // }}}
}

#[cfg(test)]
mod tests {
    use crate::errors::RunError;
    use crate::Interpreter;

    fn interpreter() -> Interpreter<Vec<u8>> {
        Interpreter::with_output(1024, Vec::new()).unwrap()
    }

    fn eval_number(interp: &mut Interpreter<Vec<u8>>, code: &str) -> f32 {
        let result = interp.run(code).unwrap();
        match interp.heap().number(result) {
            Some(n) => n,
            None => panic!("`{}` gave {}", code, interp.to_display(result)),
        }
    }

    #[test]
    fn arithmetic_folds_left() {
        let mut interp = interpreter();
        assert_eq!(eval_number(&mut interp, "(+ 1 2 3)"), 6.0);
        assert_eq!(eval_number(&mut interp, "(* 2 3 4)"), 24.0);
        assert_eq!(eval_number(&mut interp, "(- 10 1 2)"), 7.0);
        assert_eq!(eval_number(&mut interp, "(/ 100 5 2)"), 10.0);
    }

    #[test]
    fn single_argument_is_returned_as_is() {
        let mut interp = interpreter();
        assert_eq!(eval_number(&mut interp, "(- 5)"), 5.0);
        assert_eq!(eval_number(&mut interp, "(/ 4)"), 4.0);
    }

    #[test]
    fn no_arguments_give_the_identity() {
        let mut interp = interpreter();
        assert_eq!(eval_number(&mut interp, "(+)"), 0.0);
        assert_eq!(eval_number(&mut interp, "(-)"), 0.0);
        assert_eq!(eval_number(&mut interp, "(*)"), 1.0);
        assert_eq!(eval_number(&mut interp, "(/)"), 1.0);
    }

    #[test]
    fn dividing_by_zero_is_infinite() {
        let mut interp = interpreter();
        assert_eq!(eval_number(&mut interp, "(/ 1 0)"), std::f32::INFINITY);
        assert!(eval_number(&mut interp, "(/ 0 0)").is_nan());
    }

    #[test]
    fn arithmetic_rejects_non_numbers() {
        let mut interp = interpreter();
        let err = interp.run("(+ 1 print)").unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::TypeError { name, expected, got }) => {
                assert_eq!(name, "+");
                assert_eq!(expected, "number");
                assert_eq!(got, "primitive");
            }
            other => panic!("expected TypeError, got {:?}", other),
        }
    }

    #[test]
    fn print_separates_with_single_spaces() {
        let mut interp = interpreter();
        let result = interp.run("(print 1 2 3)").unwrap();
        assert_eq!(interp.heap().number(result), Some(3.0));
        assert_eq!(interp.output(), b"1 2 3");
    }

    #[test]
    fn print_evaluates_its_arguments() {
        let mut interp = interpreter();
        interp.run("(print (+ 1 2) \"apples\" (/ 1 3) nil)").unwrap();
        assert_eq!(String::from_utf8_lossy(interp.output()), "3 apples 0.3333333 nil");
    }

    #[test]
    fn print_with_no_arguments() {
        let mut interp = interpreter();
        assert!(interp.run("(print)").unwrap().is_nil());
        assert!(interp.output().is_empty());
    }

    #[test]
    fn print_writes_no_separator_before_an_improper_tail() {
        let mut interp = interpreter();
        let print = interp.symbol("print").unwrap();
        let one = interp.number(1.0).unwrap();
        let two = interp.number(2.0).unwrap();
        let args = interp.cons(one, two).unwrap();
        let expr = interp.cons(print, args).unwrap();

        match interp.eval_top(expr).unwrap_err().downcast::<RunError>() {
            Ok(RunError::TypeError { expected, .. }) => assert_eq!(expected, "list"),
            other => panic!("expected TypeError, got {:?}", other),
        }
        assert_eq!(interp.output(), b"1");
    }

    #[test]
    fn print_returns_its_last_argument() {
        let mut interp = interpreter();
        assert_eq!(eval_number(&mut interp, "(+ 1 (print 5))"), 6.0);
        assert_eq!(interp.output(), b"5");
    }
}
