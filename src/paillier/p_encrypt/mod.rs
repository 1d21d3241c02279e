pub mod p_encrypt;

pub use p_encrypt::{p_encrypt, p_encrypt_with_nonce, random_nonce};
