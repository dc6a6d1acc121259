//! # Canvas HTML Compiler
//!
//! Serializes a rendered [`VirtualDomDocument`](canvas_evaluator::VirtualDomDocument)
//! to HTML. Attribute and style order come from the virtual DOM's ordered
//! maps, so identical trees always produce identical markup.

mod compiler;


pub use compiler::{compile_node_to_html, compile_to_html, escape_html, CompileError, CompileOptions};
