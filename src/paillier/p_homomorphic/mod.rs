pub mod p_homomorphic;

pub use p_homomorphic::{p_add, p_mul_const, p_rerandomize};
