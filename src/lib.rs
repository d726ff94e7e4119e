//! # Tiny BASIC
//!
//! A memory-constrained, line-numbered Tiny BASIC interpreter core.
//!
//! ## Pipeline
//!
//! A program lives in a fixed-size [`store::CodeStore`] as a sequence of
//! `linenum | body | NUL` records kept in ascending line-number order.
//! Running a program walks that store record by record, handing each
//! statement's body to [`dispatch::dispatch`], which recognizes the leading
//! keyword and calls the matching handler in [`dispatch::handlers`].
//! Handlers that need a computed value call [`eval::evaluate`], a five-phase
//! expression evaluator over [`vars::Variables`], the interpreter's 26-slot
//! variable table.
//!
//! [`interpreter::Interpreter`] owns all of this plus the three injected
//! ports (character I/O, the optional memory bridge, the optional
//! persistence adapter) an embedding binary supplies.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tinybasic::config::Config;
//! use tinybasic::interpreter::Interpreter;
//! use tinybasic::io::{NullMemoryPort, StdioPort, FsPersistence};
//!
//! let mut interp = Interpreter::new(Config::default(), StdioPort::new(), NullMemoryPort, FsPersistence);
//! interp.shell_loop();
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod io;
pub mod literal;
pub mod store;
pub mod vars;
