// Déclaration des modules
pub mod crypto_error;
pub mod paillier;
pub mod rng;
pub mod crypto_system;

pub use crate::paillier::math;
pub use crate::paillier::p_keygen;
pub use crate::paillier::p_encrypt;
pub use crate::paillier::p_decrypt;
pub use crate::paillier::p_homomorphic;

// Chiffré : résidu de n² ; clair : entier signé (décodage par seuil)
pub type Ciphertext = num_bigint::BigUint;
pub type Plaintext  = num_bigint::BigInt;

// Types et génération de clés
pub use p_keygen::{KeyGenConfig, KeyPairGenerator, KeyPair, PublicKey, PrivateKey};

// Opérations en style fonctionnel
pub use p_keygen::p_keygen::p_keygen;
pub use p_encrypt::p_encrypt::{p_encrypt, p_encrypt_with_nonce};
pub use p_decrypt::p_decrypt::{p_decrypt, p_decrypt_raw};
pub use p_homomorphic::{p_add, p_mul_const, p_rerandomize};

// Façade avec source d'aléa partagée
pub use crypto_system::PaillierCryptoSystem;
pub use rng::SharedRng;

// Erreur centralisée
pub use crypto_error::{CryptoError, Result};
