// ============================================================================
// PaillierCryptoSystem — façade : une paire de clés + une source d'aléa
//
// Les clés sont immuables ; seule la source d'aléa est mutable, protégée par
// SharedRng. La façade est Send + Sync dès que R: Send et peut donc être
// partagée via Arc entre threads de chiffrement.
// ============================================================================

use num_bigint::BigUint;
use rand_core::{CryptoRng, OsRng, RngCore};
use log::debug;

use crate::paillier::p_keygen::{KeyGenConfig, KeyPair, PublicKey, p_keygen};
use crate::paillier::p_encrypt::p_encrypt;
use crate::paillier::p_homomorphic::{p_add, p_mul_const, p_rerandomize};
use crate::rng::SharedRng;
use crate::crypto_error::Result;
use crate::{Ciphertext, Plaintext};

#[derive(Clone, Debug)]
pub struct PaillierCryptoSystem<R = OsRng> {
    key_pair: KeyPair,
    rng:      SharedRng<R>,
}

impl PaillierCryptoSystem<OsRng> {
    /// Génère une paire de clés avec l'entropie système.
    pub fn new(config: KeyGenConfig) -> Result<Self> {
        Self::with_rng(config, OsRng)
    }
}

impl<R> PaillierCryptoSystem<R>
where
    R: RngCore + CryptoRng,
{
    /// Génère une paire de clés avec la source fournie, conservée ensuite
    /// pour tous les chiffrements.
    pub fn with_rng(config: KeyGenConfig, rng: R) -> Result<Self> {
        let shared = SharedRng::new(rng);
        let key_pair = shared.with_rng(|r| p_keygen(config, r))?;
        Ok(Self::from_keypair(key_pair, shared))
    }

    /// Réutilise une paire existante. Passer un clone de `rng` pour partager
    /// une source entre plusieurs façades, ou un SharedRng neuf pour une
    /// source indépendante.
    pub fn from_keypair(key_pair: KeyPair, rng: SharedRng<R>) -> Self {
        debug!(
            "façade Paillier prête (n de {} bits)",
            key_pair.public_key().n().bits()
        );
        PaillierCryptoSystem { key_pair, rng }
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    /// Module n
    pub fn modulus(&self) -> &BigUint {
        self.key_pair.public_key().n()
    }

    pub fn encrypt(&self, m: &Plaintext) -> Result<Ciphertext> {
        let pk = self.public_key();
        self.rng.with_rng(|r| p_encrypt(m, pk, r))
    }

    pub fn decrypt(&self, c: &Ciphertext) -> Result<Plaintext> {
        self.key_pair.decrypt(c)
    }

    /// D(add(c1, c2)) = (m1 + m2) mod n
    pub fn add(&self, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext> {
        p_add(c1, c2, self.public_key())
    }

    /// D(multiply_by_constant(c, k)) = (m · k) mod n, sans révéler k ≡ 0 ou k ≡ 1
    pub fn multiply_by_constant(&self, c: &Ciphertext, k: &Plaintext) -> Result<Ciphertext> {
        let pk = self.public_key();
        self.rng.with_rng(|r| p_mul_const(c, k, pk, r))
    }

    pub fn rerandomize(&self, c: &Ciphertext) -> Result<Ciphertext> {
        let pk = self.public_key();
        self.rng.with_rng(|r| p_rerandomize(c, pk, r))
    }
}
