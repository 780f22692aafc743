#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping, closures, first-class functions, and classes with single inheritance. Rocks
//! is a tree-walk interpreter with a hand-written recursive descent parser.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node directly, rather than first lowering it to bytecode. This is
//! generally easier to implement than a bytecode compiler, but slower to run.
//!
//! This project is inspired by the [Crafting Interpreters](https://craftinginterpreters.com/) book
//! by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an iterator over the characters
//! in the source code. It is a simple state machine that returns the next token in the source code
//! when called.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected character.
//! Scan errors are reported as soon as they are encountered, and scanning continues past them so
//! the user can see more than one mistake per run.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically an
//! [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of code
//! that do not produce a value but instead perform some action.
//!
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError), and
//! recovers from them by synchronizing to the next statement boundary so later errors are still found.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is a static pass over the AST that
//! binds each variable reference to the number of scopes it sits above its declaration, so the
//! interpreter never has to search an environment chain at runtime. The resolver is implemented in
//! the [`resolver`](resolver) module. It also rejects a handful of uses that are only detectable
//! with static scope information -- reading a local from its own initializer, `this`/`super` outside
//! a class, `return` outside a function, `break` outside a loop -- reported as a
//! [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The final step is interpreting: walking the AST and evaluating each node. The interpreter is
//! implemented in the [`interpreter`](interpreter) module. It reports errors as a
//! [`RuntimeError`](error::RuntimeError) -- the scanner, parser, and resolver catch what they can
//! ahead of time, but things like adding a string to a number can only be caught while running.
//! The interpreter manages variable scope through a chain of [`Environment`](environment::Environment)s.

use std::{fs, process};
use std::io::Write;
use std::rc::Rc;

use tracing::debug;

pub mod error;
pub mod token;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod function;
pub mod resolver;
pub mod class;

use error::ErrorState;
use parser::Parser;
use scanner::Scanner;
use resolver::Resolver;
use interpreter::Interpreter;

/// The Rocks interpreter, bound to a single output sink. `'a` lets tests and `main`
/// both choose where `print` writes: a `Vec<u8>` buffer in tests, stdout otherwise.
#[allow(non_camel_case_types)]
pub struct rocks<'a> {
    interpreter: Interpreter<'a>,
}

impl<'a> rocks<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        rocks {
            interpreter: Interpreter::new(output),
        }
    }

    /// Reads and runs a whole script file, exiting the process with 65 on a
    /// scan/parse/resolve error or 70 on a runtime error (matching jlox's exit codes).
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("could not read file '{path}': {err}"));

        let errors = ErrorState::new();
        self.run(contents, &errors);

        if errors.did_runtime_error() {
            process::exit(70);
        }
        if errors.did_error() {
            process::exit(65);
        }
    }

    /// Runs an interactive REPL, keeping history in `~/.rocks_history`. Each line is
    /// its own run with a fresh `ErrorState`, so a mistake on one line never blocks
    /// later lines from being evaluated.
    pub fn run_prompt(&mut self) {
        let history_path = home::home_dir()
            .map(|mut home| {
                home.push(".rocks_history");
                home
            });

        let mut editor = rustyline::DefaultEditor::new()
            .expect("rustyline to initialize the terminal");

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    let errors = ErrorState::new();
                    self.run(line, &errors);
                }
                Err(rustyline::error::ReadlineError::Interrupted)
                | Err(rustyline::error::ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error reading line: {err}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: String, errors: &Rc<ErrorState>) {
        let mut scanner = Scanner::new(&source, Rc::clone(errors));
        let tokens = scanner.scan_tokens();
        debug!(count = tokens.len(), "scanned tokens");

        if errors.did_error() {
            return;
        }

        let mut parser = Parser::new(tokens, Rc::clone(errors));
        let statements = parser.parse();
        debug!(count = statements.len(), "parsed statements");

        if errors.did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, Rc::clone(errors));
        resolver.resolve(&statements);

        if errors.did_error() {
            return;
        }

        self.interpreter.interpret(&statements, errors);
    }
}
