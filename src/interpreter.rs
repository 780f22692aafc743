use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{Error, ErrorState, RuntimeError};
use crate::expr::Expr;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::{Token, Type};

/// Non-local control flow threaded up through statement execution. `Error` carries
/// a genuine diagnosable `RuntimeError`; `Return`/`Break` are not errors, just a way
/// to unwind out of nested blocks without every caller checking a flag.
#[derive(Debug)]
pub enum Unwind {
    Return(Object),
    Break,
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

/// Restores the interpreter's current environment when a block-scoped execution
/// finishes, including when it unwinds early via `?`.
struct EnvironmentGuard<'env> {
    environment: &'env mut Rc<RefCell<Environment>>,
    previous: Option<Rc<RefCell<Environment>>>,
}

impl<'env> EnvironmentGuard<'env> {
    fn new(environment: &'env mut Rc<RefCell<Environment>>, new_environment: Rc<RefCell<Environment>>) -> Self {
        let previous = Some(std::mem::replace(environment, new_environment));
        EnvironmentGuard { environment, previous }
    }
}

impl<'env> Drop for EnvironmentGuard<'env> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            *self.environment = previous;
        }
    }
}

/// Tree-walking evaluator. Holds the global and current environments, the
/// resolver-populated scope-distance table, and the sink that `print` writes to.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            globals.borrow_mut().define(&native.name.lexeme.clone(), Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records that `name`'s occurrence resolves `depth` scopes up from where it's used.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    /// Runs a program's top-level statements, stopping and reporting on the first
    /// runtime error -- matching the behavior of stopping interpretation rather
    /// than continuing past a broken statement.
    pub fn interpret(&mut self, statements: &[Stmt], errors: &ErrorState) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Unwind::Error(error)) => {
                    error.throw(errors);
                    return;
                }
                Err(Unwind::Return(_)) | Err(Unwind::Break) => {
                    unreachable!("resolver rejects 'return'/'break' outside of a function/loop")
                }
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(())
            }

            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                writeln!(self.output, "{value}").expect("writing to output to succeed");
                Ok(())
            }

            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Object::from(Literal::Nil),
                };

                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(())
            }

            Stmt::Block(data) => {
                let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                self.execute_block(&data.statements, environment)
            }

            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    match self.execute(&data.body) {
                        Ok(()) => {}
                        Err(Unwind::Break) => break,
                        Err(other) => return Err(other),
                    }
                }
                Ok(())
            }

            Stmt::Break(_) => Err(Unwind::Break),

            Stmt::Function(data) => {
                let function = Function::new(
                    data.name.clone(),
                    Rc::new(data.params.clone()),
                    Rc::new(data.body.clone()),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
                Ok(())
            }

            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::from(Literal::Nil),
                };

                Err(Unwind::Return(value))
            }

            Stmt::Class(data) => {
                let superclass = match &data.superclass {
                    Some(expr) => {
                        let value = self.evaluate(expr)?;
                        match value {
                            Object::Class(class) => Some(class),
                            _ => {
                                let Expr::Variable(variable) = expr else { unreachable!() };
                                return Err(RuntimeError {
                                    token: variable.name.clone(),
                                    message: "Superclass must be a class.".to_string(),
                                }.into());
                            }
                        }
                    }
                    None => None,
                };

                self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

                let method_environment = match &superclass {
                    Some(superclass) => {
                        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                        environment.borrow_mut().define("super", Object::from(Rc::clone(superclass)));
                        environment
                    }
                    None => Rc::clone(&self.environment),
                };

                let mut methods = HashMap::new();
                for method in &data.methods {
                    let Stmt::Function(method) = method else { unreachable!() };

                    let function = Function::new(
                        method.name.clone(),
                        Rc::new(method.params.clone()),
                        Rc::new(method.body.clone()),
                        Rc::clone(&method_environment),
                        method.name.lexeme == "init",
                    );

                    methods.insert(method.name.lexeme.clone(), Rc::new(function));
                }

                let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods)));

                self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
                Ok(())
            }
        }
    }

    /// Executes `statements` in a fresh environment enclosing `environment`'s
    /// enclosing chain, restoring the previous environment on the way out --
    /// including when a statement unwinds early via `return`/`break`/error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Unwind> {
        let _guard = EnvironmentGuard::new(&mut self.environment, environment);

        for statement in statements {
            self.execute(statement)?;
        }

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Object::from(literal.clone())),

            Expr::Grouping(data) => self.evaluate(&data.expr),

            Expr::Unary(data) => {
                let right = self.evaluate(&data.expr)?;

                match data.operator.r#type {
                    Type::Minus => (-right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: "Operand must be a number.".to_string(),
                    }),
                    Type::Bang => Ok(Object::from(!right.is_truthy())),
                    _ => unreachable!("parser only produces '-'/'!' unary operators"),
                }
            }

            Expr::Binary(data) => {
                let left = self.evaluate(&data.left)?;
                let right = self.evaluate(&data.right)?;

                match data.operator.r#type {
                    Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: "Operands must be two numbers or two strings.".to_string(),
                    }),
                    Type::Minus => (left - right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: "Operands must be numbers.".to_string(),
                    }),
                    Type::Star => (left * right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: "Operands must be numbers.".to_string(),
                    }),
                    Type::Slash => (left / right).ok_or_else(|| RuntimeError {
                        token: data.operator.clone(),
                        message: "Operands must be numbers.".to_string(),
                    }),
                    Type::Greater => self.compare(&left, &right, &data.operator, |o| o == std::cmp::Ordering::Greater),
                    Type::GreaterEqual => self.compare(&left, &right, &data.operator, |o| o != std::cmp::Ordering::Less),
                    Type::Less => self.compare(&left, &right, &data.operator, |o| o == std::cmp::Ordering::Less),
                    Type::LessEqual => self.compare(&left, &right, &data.operator, |o| o != std::cmp::Ordering::Greater),
                    Type::BangEqual => Ok(Object::from(left != right)),
                    Type::EqualEqual => Ok(Object::from(left == right)),
                    _ => unreachable!("parser only produces these operators in binary position"),
                }
            }

            Expr::Logical(data) => {
                let left = self.evaluate(&data.left)?;

                match data.operator.r#type {
                    Type::Or if left.is_truthy() => Ok(left),
                    Type::Or => self.evaluate(&data.right),
                    Type::And if !left.is_truthy() => Ok(left),
                    Type::And => self.evaluate(&data.right),
                    _ => unreachable!("parser only produces 'and'/'or' logical operators"),
                }
            }

            Expr::Variable(data) => self.look_up_variable(&data.name),

            Expr::Assign(data) => {
                let value = self.evaluate(&data.value)?;

                match self.locals.get(&data.name) {
                    Some(&distance) => self.environment.borrow_mut().assign_at(distance, &data.name, value.clone()),
                    None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call(data) => {
                let callee = self.evaluate(&data.callee)?;

                let mut arguments = Vec::with_capacity(data.arguments.len());
                for argument in &data.arguments {
                    arguments.push(self.evaluate(argument)?);
                }

                self.call(callee, arguments, &data.paren)
            }

            Expr::Get(data) => {
                let object = self.evaluate(&data.object)?;

                match &object {
                    Object::Instance(instance) => instance.borrow().get(&data.name, &object),
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances have properties.".to_string(),
                    }),
                }
            }

            Expr::Set(data) => {
                let object = self.evaluate(&data.object)?;

                let Object::Instance(instance) = &object else {
                    return Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances have fields.".to_string(),
                    });
                };

                let value = self.evaluate(&data.value)?;
                instance.borrow_mut().set(&data.name, value.clone());
                Ok(value)
            }

            Expr::This(data) => self.look_up_variable(&data.keyword),

            Expr::Super(data) => {
                let distance = *self.locals.get(&data.keyword)
                    .expect("resolver to have resolved every 'super' occurrence");

                let superclass = match self.environment.borrow().get_at(distance, &data.keyword)? {
                    Object::Class(class) => class,
                    _ => unreachable!("'super' always resolves to a class"),
                };

                let this_token = Token::from("this");
                let instance = self.environment.borrow().get_at(distance - 1, &this_token)?;

                let method = superclass.borrow().get_method(&data.method.lexeme)
                    .ok_or_else(|| RuntimeError {
                        token: data.method.clone(),
                        message: format!("Undefined property '{}'.", data.method.lexeme),
                    })?;

                Ok(Object::from(method.bind(instance)))
            }
        }
    }

    fn compare(
        &self,
        left: &Object,
        right: &Object,
        operator: &Token,
        matches: impl Fn(std::cmp::Ordering) -> bool,
    ) -> Result<Object, RuntimeError> {
        left.partial_cmp(right)
            .map(|ordering| Object::from(matches(ordering)))
            .ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            })
    }

    fn look_up_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    /// Invokes a callee value. Classes are special-cased here rather than going
    /// through `Callable`: constructing an `Instance` needs a shared `Rc` handle to
    /// the class, which `Callable::call`'s `&self` receiver can't provide, but this
    /// call site already holds that handle from evaluating the callee expression.
    fn call(&mut self, callee: Object, arguments: Vec<Object>, paren: &Token) -> Result<Object, RuntimeError> {
        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(function) => function.arity(),
            Object::Class(class) => class.borrow().arity(),
            _ => {
                return Err(RuntimeError {
                    token: paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                });
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: paren.clone(),
                message: format!("Expected {arity} arguments but got {}.", arguments.len()),
            });
        }

        match callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(function) => function.call(self, arguments),
            Object::Class(class) => {
                let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(&class))));

                if let Some(initializer) = class.borrow().get_method("init") {
                    initializer.bind(Object::from(Rc::clone(&instance))).call(self, arguments)?;
                }

                Ok(Object::from(instance))
            }
            _ => unreachable!("arity check above already rejected non-callables"),
        }
    }
}
