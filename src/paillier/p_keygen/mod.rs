pub mod p_config;
pub mod p_keygen;

pub use p_config::{KeyGenConfig, MIN_KEY_BITS, DEFAULT_KEY_BITS};
pub use p_keygen::{PublicKey, PrivateKey, KeyPair, KeyPairGenerator, p_keygen};
