//! Shared opcode types produced by compilation.

pub mod opcode;
