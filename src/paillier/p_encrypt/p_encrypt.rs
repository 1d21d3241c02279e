use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand_core::{CryptoRng, RngCore};
use crate::paillier::p_keygen::PublicKey;
use crate::paillier::math::{gcd, random_bits};
use crate::crypto_error::{CryptoError, Result};
use crate::{Ciphertext, Plaintext};

// ---------------------------------------------------------------------------
// Aléa de chiffrement r
//
// Tiré dans [0, 2^bit_length) et retiré tant que r >= n, r = 0 ou
// gcd(r, n) != 1. Le résultat est uniforme sur Z*_n.
// ---------------------------------------------------------------------------
pub fn random_nonce<R>(pk: &PublicKey, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    loop {
        let r = random_bits(pk.bit_length, rng)?;
        if is_valid_nonce(&r, pk) {
            return Ok(r);
        }
    }
}

fn is_valid_nonce(r: &BigUint, pk: &PublicKey) -> bool {
    !r.is_zero() && r < &pk.n && gcd(r, &pk.n).is_one()
}

// Ramène m dans [0, n) ; |m| >= n est refusé.
//
// Pour m < 0, g^(m + n) et g^m diffèrent d'un facteur g^n, qui est une
// puissance n-ième : le déchiffrement est identique.
fn encode_plaintext(m: &Plaintext, n: &BigUint) -> Result<BigUint> {
    if m.magnitude() >= n {
        return Err(CryptoError::PlaintextOutOfRange);
    }
    if m.is_negative() {
        return m
            .mod_floor(&BigInt::from(n.clone()))
            .to_biguint()
            .ok_or(CryptoError::NegativeConversion);
    }
    Ok(m.magnitude().clone())
}

// ---------------------------------------------------------------------------
// Chiffrement Paillier : c = g^m * r^n  mod n²
//
// Consomme de l'aléa frais à chaque appel : deux chiffrements du même m
// donnent deux chiffrés différents (avec probabilité écrasante).
// Retourne Err(CryptoError::PlaintextOutOfRange) si |m| >= n.
// ---------------------------------------------------------------------------
pub fn p_encrypt<R>(m: &Plaintext, pk: &PublicKey, rng: &mut R) -> Result<Ciphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let m_enc = encode_plaintext(m, &pk.n)?;
    let r = random_nonce(pk, rng)?;
    Ok(raw_encrypt(&m_enc, &r, pk))
}

/// Chiffrement déterministe avec un aléa r choisi par l'appelant.
///
/// Réservé aux vecteurs de test reproductibles : réutiliser r pour deux
/// messages casse la sécurité sémantique.
pub fn p_encrypt_with_nonce(m: &Plaintext, r: &BigUint, pk: &PublicKey) -> Result<Ciphertext> {
    let m_enc = encode_plaintext(m, &pk.n)?;
    if !is_valid_nonce(r, pk) {
        return Err(CryptoError::InvalidNonce);
    }
    Ok(raw_encrypt(&m_enc, r, pk))
}

fn raw_encrypt(m: &BigUint, r: &BigUint, pk: &PublicKey) -> Ciphertext {
    let g_m = pk.g.modpow(m, &pk.n_squared);
    let r_n = r.modpow(&pk.n, &pk.n_squared);
    (&g_m * &r_n) % &pk.n_squared
}
