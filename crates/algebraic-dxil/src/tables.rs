//! Compiled rule tables, one module per pass.

pub mod algebraic;
pub mod lower_16bit_conv;
pub mod lower_8bit_conv;
