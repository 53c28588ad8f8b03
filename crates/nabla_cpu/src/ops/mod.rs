pub mod binary;
pub mod copy;
pub mod matmul;
pub mod reduction;
pub mod unary;
