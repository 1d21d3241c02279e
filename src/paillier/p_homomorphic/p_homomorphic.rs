use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use log::trace;
use crate::paillier::p_encrypt::p_encrypt;
use crate::paillier::p_keygen::PublicKey;
use crate::crypto_error::{CryptoError, Result};
use crate::{Ciphertext, Plaintext};

fn check_ciphertext(c: &Ciphertext, pk: &PublicKey) -> Result<()> {
    if c.is_zero() || c >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Addition homomorphique : E(m1) · E(m2) mod n² = E((m1 + m2) mod n)
// ---------------------------------------------------------------------------
pub fn p_add(c1: &Ciphertext, c2: &Ciphertext, pk: &PublicKey) -> Result<Ciphertext> {
    check_ciphertext(c1, pk)?;
    check_ciphertext(c2, pk)?;
    Ok((c1 * c2) % &pk.n_squared)
}

// ---------------------------------------------------------------------------
// Re-randomisation : c · E(0) mod n², même clair, chiffré indépendant de c
// ---------------------------------------------------------------------------
pub fn p_rerandomize<R>(c: &Ciphertext, pk: &PublicKey, rng: &mut R) -> Result<Ciphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let zero = p_encrypt(&BigInt::zero(), pk, rng)?;
    p_add(c, &zero, pk)
}

// ---------------------------------------------------------------------------
// Multiplication par une constante claire : E(m)^k mod n² = E(m·k mod n)
//
// k est d'abord réduit modulo n (k négatif accepté). Deux cas particuliers
// sur la valeur réduite :
//   k ≡ 0 : c^0 = 1 quel que soit c, ce qui révèle k. On renvoie E(0) frais.
//   k ≡ 1 : c^1 = c, ce qui révèle k. On renvoie c re-randomisé.
// ---------------------------------------------------------------------------
pub fn p_mul_const<R>(c: &Ciphertext, k: &Plaintext, pk: &PublicKey, rng: &mut R) -> Result<Ciphertext>
where
    R: RngCore + CryptoRng + ?Sized,
{
    check_ciphertext(c, pk)?;

    let k_mod: BigUint = k
        .mod_floor(&BigInt::from(pk.n.clone()))
        .to_biguint()
        .ok_or(CryptoError::NegativeConversion)?;

    if k_mod.is_zero() {
        trace!("constante nulle : chiffrement frais de 0");
        return p_encrypt(&BigInt::zero(), pk, rng);
    }

    if k_mod.is_one() {
        trace!("constante unité : re-randomisation du chiffré");
        return p_rerandomize(c, pk, rng);
    }

    Ok(c.modpow(&k_mod, &pk.n_squared))
}
