use std::fmt::Debug;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use crate::interpreter::{Interpreter, Unwind};
use crate::object::{Object, Callable};
use crate::error::RuntimeError;
use crate::stmt::Stmt;
use crate::token::Token;

/// A user-defined function or method. `params`/`body` are shared with the
/// declaring AST node rather than cloned per call; `closure` is the environment
/// captured at the point the `fun` statement (or method) was declared.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Rc<Vec<Token>>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(
        name: Token,
        params: Rc<Vec<Token>>,
        body: Rc<Vec<Stmt>>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Returns a copy of this function whose closure encloses the original one and
    /// additionally defines `this` as the given instance -- how methods become
    /// receiver-bound when looked up off an instance.
    pub fn bind(&self, instance: Object) -> Function {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));
        environment.borrow_mut().define("this", instance);

        Function {
            name: self.name.clone(),
            params: Rc::clone(&self.params),
            body: Rc::clone(&self.body),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    fn bound_this(&self) -> Object {
        self.closure.borrow().get_at(0, &Token::from("this"))
            .expect("initializer's closure to have 'this' bound")
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));

        for (param, arg) in self.params.iter().zip(arguments) {
            environment.borrow_mut().define(&param.lexeme, arg);
        }

        match interpreter.execute_block(&self.body, environment) {
            Ok(()) => {
                if self.is_initializer {
                    Ok(self.bound_this())
                } else {
                    Ok(Object::from(crate::literal::Literal::Nil))
                }
            }
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    Ok(self.bound_this())
                } else {
                    Ok(value)
                }
            }
            Err(Unwind::Break) => unreachable!("resolver rejects 'break' outside of a loop"),
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// A function implemented in Rust and exposed to Lox code under a fixed name.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter<'_>, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The built-ins defined into every global environment. `clock` is the sole
    /// native the language exposes.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::from("clock"),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap()
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
