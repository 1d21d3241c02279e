use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;
use log::{debug, trace, warn};

use crate::paillier::math::{l_function, gcd, lcm, mod_inverse, random_bits, generate_prime};
use crate::paillier::p_keygen::p_config::KeyGenConfig;
use crate::paillier::p_encrypt::p_encrypt;
use crate::paillier::p_decrypt::{p_decrypt, p_decrypt_raw};
use crate::crypto_error::{CryptoError, Result};
use crate::{Ciphertext, Plaintext};

// ============================================================================
// Clé publique Paillier — pas de données secrètes, pas de zeroize nécessaire
//
// Champs privés au crate : une clé n'est construite que par KeyPairGenerator
// et n'est jamais modifiée ensuite.
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n:          BigUint,
    pub(crate) n_squared:  BigUint,
    pub(crate) g:          BigUint,
    pub(crate) bit_length: u64,
}

impl PublicKey {
    /// Module de chiffrement n = p·q
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Taille utilisée pour tirer les aléas r du chiffrement
    pub fn bit_length(&self) -> u64 {
        self.bit_length
    }

    /// Chiffre m avec un aléa frais tiré de `rng`. Voir [`p_encrypt`].
    pub fn encrypt<R>(&self, m: &Plaintext, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        p_encrypt(m, self, rng)
    }
}

// ============================================================================
// Helper : remet un BigUint à zéro.
//
// num-bigint n'expose pas son buffer interne : l'effacement est au mieux
// (le Vec est vidé, pas écrasé octet par octet).
// ============================================================================
fn zeroize_biguint(n: &mut BigUint) {
    n.set_zero();
    *n = BigUint::default();
}

// ============================================================================
// Clé privée Paillier — ZEROISÉE À LA DESTRUCTION
// ============================================================================
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) lambda: BigUint,
    pub(crate) mu:     BigUint,
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.lambda);
        zeroize_biguint(&mut self.mu);
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// Jamais lambda ni mu dans les logs ou les messages de panique
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("lambda", &"<masqué>")
            .field("mu", &"<masqué>")
            .finish()
    }
}

// ============================================================================
// Paire de clés
//
// La clé publique se partage (clone), la clé privée reste dans la paire.
// ============================================================================
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub(crate) public_key:     PublicKey,
    pub(crate) private_key:    PrivateKey,
    pub(crate) sign_threshold: Option<BigUint>,
}

impl KeyPair {
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn sign_threshold(&self) -> Option<&BigUint> {
        self.sign_threshold.as_ref()
    }

    /// Déchiffre c avec décodage signé selon le seuil. Voir [`p_decrypt`].
    pub fn decrypt(&self, c: &Ciphertext) -> Result<Plaintext> {
        p_decrypt(c, self)
    }

    /// Résidu brut dans [0, n), sans décodage signé.
    pub fn decrypt_raw(&self, c: &Ciphertext) -> Result<BigUint> {
        p_decrypt_raw(c, &self.public_key, &self.private_key)
    }
}

// ============================================================================
// Générateur de paires de clés
// ============================================================================
#[derive(Clone, Debug, Default)]
pub struct KeyPairGenerator {
    config: KeyGenConfig,
}

impl KeyPairGenerator {
    pub fn new(config: KeyGenConfig) -> Self {
        KeyPairGenerator { config }
    }

    // ------------------------------------------------------------------------
    // Génération complète :
    //   1. p, q premiers distincts de bit_length/2 bits
    //   2. n = p·q, n² = n·n
    //   3. lambda = lcm(p-1, q-1)
    //   4. g tiré dans [0, 2^bit_length) jusqu'à gcd(L(g^lambda mod n²), n) = 1
    //   5. mu = L(g^lambda mod n²)^-1 mod n
    // ------------------------------------------------------------------------
    pub fn generate<R>(&self, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.config.validate()?;

        let half = self.config.bit_length / 2;
        let certainty = self.config.primality_certainty;
        debug!(
            "génération d'une clé Paillier de {} bits (premiers de {} bits, certitude {})",
            self.config.bit_length, half, certainty
        );

        let (p, q) = self.draw_primes(rng)?;
        self.assemble(p, q, self.config.bit_length, rng)
    }

    // Deux premiers distincts de bit_length/2 bits
    fn draw_primes<R>(&self, rng: &mut R) -> Result<(BigUint, BigUint)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let half = self.config.bit_length / 2;
        let certainty = self.config.primality_certainty;

        let p = generate_prime(half, certainty, rng)?;
        let mut q = generate_prime(half, certainty, rng)?;
        while p == q {
            q = generate_prime(half, certainty, rng)?;
        }
        Ok((p, q))
    }

    // ------------------------------------------------------------------------
    // Étapes 2 à 5 sur des premiers fournis par l'appelant.
    //
    // La taille d'aléa retenue est celle de n (et non config.bit_length),
    // pour que l'échantillonnage par rejet de r reste efficace.
    // ------------------------------------------------------------------------
    pub fn from_primes<R>(&self, p: BigUint, q: BigUint, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let bit_length = (&p * &q).bits();
        self.assemble(p, q, bit_length, rng)
    }

    fn assemble<R>(&self, p: BigUint, q: BigUint, bit_length: u64, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let two = BigUint::from(2u32);
        if p == q || p <= two || q <= two {
            return Err(CryptoError::InvalidPrimes);
        }

        let n         = &p * &q;
        let n_squared = &n * &n;

        let p_minus_1 = &p - BigUint::one();
        let q_minus_1 = &q - BigUint::one();

        // Garantit que n est inversible modulo n² et que L est bien défini
        if !gcd(&n, &(&p_minus_1 * &q_minus_1)).is_one() {
            return Err(CryptoError::InvalidPrimes);
        }

        let lambda = lcm(&p_minus_1, &q_minus_1);

        let (g, mu) = self.find_generator(&n, &n_squared, &lambda, bit_length, rng)?;

        Ok(KeyPair {
            public_key:     PublicKey { n, n_squared, g, bit_length },
            private_key:    PrivateKey { lambda, mu },
            sign_threshold: self.config.sign_threshold.clone(),
        })
    }

    // ------------------------------------------------------------------------
    // Recherche de g par tirage aléatoire.
    //
    // Rejet préalable des g non inversibles modulo n (dont g = 0) : g^lambda
    // mod n² n'est alors jamais nul et L s'applique sans sous-dépassement.
    // Converge en quelques tirages ; max_generator_attempts borne la boucle.
    // ------------------------------------------------------------------------
    fn find_generator<R>(
        &self,
        n: &BigUint,
        n_squared: &BigUint,
        lambda: &BigUint,
        bit_length: u64,
        rng: &mut R,
    ) -> Result<(BigUint, BigUint)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut attempts = 0u32;

        loop {
            if let Some(cap) = self.config.max_generator_attempts {
                if attempts >= cap {
                    warn!("recherche du générateur abandonnée après {} tentatives", attempts);
                    return Err(CryptoError::GenerationFailed { attempts });
                }
            }
            attempts = attempts.saturating_add(1);

            let g = random_bits(bit_length, rng)?;
            if !gcd(&g, n).is_one() {
                trace!("candidat g rejeté (non inversible modulo n), tentative {}", attempts);
                continue;
            }

            let l_g_lambda = l_function(&g.modpow(lambda, n_squared), n);
            if !gcd(&l_g_lambda, n).is_one() {
                trace!("candidat g rejeté (L(g^lambda) non inversible), tentative {}", attempts);
                continue;
            }

            let mu = mod_inverse(&l_g_lambda, n)?;
            debug!("générateur g accepté après {} tentative(s)", attempts);
            return Ok((g, mu));
        }
    }
}

// ============================================================================
// Raccourci fonctionnel : KeyPairGenerator::new(config).generate(rng)
// ============================================================================
pub fn p_keygen<R>(config: KeyGenConfig, rng: &mut R) -> Result<KeyPair>
where
    R: RngCore + CryptoRng + ?Sized,
{
    KeyPairGenerator::new(config).generate(rng)
}
