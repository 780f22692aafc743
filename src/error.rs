use std::cell::Cell;
use std::rc::Rc;

use crate::token::{Token, Type};

/// Sticky error flags for one run of the pipeline. Threaded through the
/// scanner/parser/resolver/interpreter as an `Rc` rather than kept as process-wide
/// statics, so two `rocks` instances (e.g. concurrent tests) never share state.
#[derive(Debug, Default)]
pub struct ErrorState {
    had_error: Cell<bool>,
    had_runtime_error: Cell<bool>,
}

impl ErrorState {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// True if a scan, parse, resolve, or runtime error was reported.
    pub fn did_error(&self) -> bool {
        self.had_error.get() || self.had_runtime_error.get()
    }

    pub fn did_runtime_error(&self) -> bool {
        self.had_runtime_error.get()
    }

    /// Used between REPL lines to forget the previous line's errors.
    pub fn reset(&self) {
        self.had_error.set(false);
        self.had_runtime_error.set(false);
    }

    fn mark_error(&self) {
        self.had_error.set(true);
    }

    fn mark_runtime_error(&self) {
        self.had_runtime_error.set(true);
    }
}

/// Every diagnosable error type implements this to print itself and flip the
/// appropriate sticky flag.
pub trait Error {
    fn throw(&self, state: &ErrorState);
}

/// An error encountered while scanning.
#[derive(Debug)]
pub struct ScanError {
    pub location: crate::token::Location,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self, state: &ErrorState) {
        eprintln!(
            "[line {line}:{column}] Error: {message}",
            line = self.location.line + 1,
            column = self.location.column + 1,
            message = self.message
        );

        state.mark_error();
    }
}

/// An error encountered while parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self, state: &ErrorState) {
        if self.token.r#type == Type::EOF {
            eprintln!(
                "[line {line}:{column}] Error at end: {message}",
                line = self.token.location.line,
                column = self.token.location.column,
                message = self.message
            );
        } else {
            eprintln!(
                "[line {line}:{column}] Error at '{lexeme}': {message}",
                line = self.token.location.line,
                column = self.token.location.column,
                lexeme = self.token.lexeme,
                message = self.message
            );
        }

        state.mark_error();
    }
}

/// An error encountered while resolving lexical scope.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self, state: &ErrorState) {
        eprintln!(
            "[line {line}:{column}] Error at '{lexeme}': {message}",
            line = self.token.location.line,
            column = self.token.location.column,
            lexeme = self.token.lexeme,
            message = self.message
        );

        state.mark_error();
    }
}

/// An error encountered while evaluating the program.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self, state: &ErrorState) {
        eprintln!(
            "[line {line}:{column}] Error at '{lexeme}': {message}",
            line = self.token.location.line,
            column = self.token.location.column,
            lexeme = self.token.lexeme,
            message = self.message
        );

        state.mark_runtime_error();
    }
}
