//! Invoice views

pub mod assembler;

pub use assembler::assemble_invoice_view;
