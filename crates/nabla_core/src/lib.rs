pub mod array;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod scalar;
pub mod storage;

pub use nabla_cpu as cpu;
