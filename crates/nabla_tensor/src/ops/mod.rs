pub mod binary;
pub mod matmul;
pub mod reduction;
pub mod scalar;
pub mod shape;
pub mod unary;
