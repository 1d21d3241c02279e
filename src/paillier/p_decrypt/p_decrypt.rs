use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use crate::paillier::math::l_function;
use crate::paillier::p_keygen::{KeyPair, PrivateKey, PublicKey};
use crate::crypto_error::{CryptoError, Result};
use crate::{Ciphertext, Plaintext};

// ---------------------------------------------------------------------------
// Déchiffrement brut : m = L(c^lambda mod n²) · mu  mod n
//
// Refuse c hors de ]0, n²[ et les c multiples de n (c^lambda mod n² = 0),
// pour lesquels L n'est pas défini.
// ---------------------------------------------------------------------------
pub fn p_decrypt_raw(c: &Ciphertext, pk: &PublicKey, sk: &PrivateKey) -> Result<BigUint> {
    if c.is_zero() || c >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let c_lambda = c.modpow(&sk.lambda, &pk.n_squared);
    if c_lambda.is_zero() {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    let l_c_lambda = l_function(&c_lambda, &pk.n);
    Ok((&l_c_lambda * &sk.mu) % &pk.n)
}

// ---------------------------------------------------------------------------
// Décodage signé : un résidu strictement supérieur au seuil représente m - n.
// Sans seuil, le résidu est rendu tel quel.
// ---------------------------------------------------------------------------
pub fn decode_signed(m: BigUint, n: &BigUint, threshold: Option<&BigUint>) -> Plaintext {
    match threshold {
        Some(t) if &m > t => BigInt::from(m) - BigInt::from(n.clone()),
        _ => BigInt::from(m),
    }
}

/// Déchiffre c avec la paire de clés, puis applique son seuil de décodage signé.
pub fn p_decrypt(c: &Ciphertext, kp: &KeyPair) -> Result<Plaintext> {
    let m = p_decrypt_raw(c, &kp.public_key, &kp.private_key)?;
    Ok(decode_signed(m, &kp.public_key.n, kp.sign_threshold.as_ref()))
}
