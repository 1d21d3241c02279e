use num_bigint::BigUint;
use crate::crypto_error::{CryptoError, Result};

// Taille minimale de n acceptée (16 bits par premier).
// Suffisant pour les clés de test de 64 bits ; viser >= 2048 en production.
pub const MIN_KEY_BITS: u64 = 32;

pub const DEFAULT_KEY_BITS: u64 = 1024;

// ============================================================================
// Paramètres de génération de clés
//
// Tous optionnels : Default donne 1024 bits, "probable prime" (certitude 0),
// seuil de décodage signé = i64::MAX, recherche de g non plafonnée.
// La source d'aléa n'est pas ici : elle est passée à generate().
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Taille de n en bits (paire, chaque premier en a la moitié)
    pub bit_length: u64,
    /// 0 → table de rounds selon la taille, > 0 → erreur <= 2^-certitude
    pub primality_certainty: u32,
    /// Résidus déchiffrés > seuil renvoyés comme m - n ; None → résidu brut
    pub sign_threshold: Option<BigUint>,
    /// Plafond de la boucle de recherche de g ; None → non borné
    pub max_generator_attempts: Option<u32>,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        KeyGenConfig {
            bit_length:             DEFAULT_KEY_BITS,
            primality_certainty:    0,
            sign_threshold:         Some(BigUint::from(i64::MAX as u64)),
            max_generator_attempts: None,
        }
    }
}

impl KeyGenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_length(mut self, bits: u64) -> Self {
        self.bit_length = bits;
        self
    }

    pub fn primality_certainty(mut self, certainty: u32) -> Self {
        self.primality_certainty = certainty;
        self
    }

    pub fn sign_threshold(mut self, threshold: Option<BigUint>) -> Self {
        self.sign_threshold = threshold;
        self
    }

    pub fn max_generator_attempts(mut self, cap: Option<u32>) -> Self {
        self.max_generator_attempts = cap;
        self
    }

    /// Vérifie la taille de clé avant toute génération coûteuse.
    pub fn validate(&self) -> Result<()> {
        if self.bit_length < MIN_KEY_BITS {
            return Err(CryptoError::KeySizeTooSmall {
                requested: self.bit_length,
                minimum:   MIN_KEY_BITS,
            });
        }
        if self.bit_length % 2 != 0 {
            return Err(CryptoError::OddKeySize(self.bit_length));
        }
        Ok(())
    }
}
