pub mod crypto_system;

pub use crypto_system::PaillierCryptoSystem;
