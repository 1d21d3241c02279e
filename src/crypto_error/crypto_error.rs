// ===========================================================================
// Gestion centralisée des erreurs cryptographiques
//
// Tous les modules utilisent ce type au lieu de panic!/assert!/unwrap().
// L'appelant reçoit une Err(...) et décide de la suite.
// ===========================================================================

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    // --- Erreurs de paramètres d'entrée ---
    /// |m| >= n : hors domaine plaintext Paillier
    #[error("Le message doit vérifier |m| < n")]
    PlaintextOutOfRange,

    /// Le chiffré n'est pas dans ]0, n²[ ou ne se déchiffre pas
    #[error("Le chiffré doit être dans ]0, n²[ et inversible modulo n")]
    CiphertextOutOfRange,

    /// Aléa r fourni hors de ]0, n[ ou non inversible modulo n
    #[error("L'aléa r doit être dans ]0, n[ et premier avec n")]
    InvalidNonce,

    // --- Erreurs de configuration ---
    #[error("Taille de clé {requested} bits insuffisante, minimum requis : {minimum} bits")]
    KeySizeTooSmall { requested: u64, minimum: u64 },

    #[error("Taille de clé {0} bits impaire : n = p·q exige une taille paire")]
    OddKeySize(u64),

    // --- Erreurs de génération ---
    /// La recherche du générateur g a atteint le plafond configuré
    #[error("Aucun générateur g valide après {attempts} tentatives")]
    GenerationFailed { attempts: u32 },

    /// p = q, ou gcd(n, (p-1)(q-1)) != 1
    #[error("Premiers p et q inutilisables pour construire une clé Paillier")]
    InvalidPrimes,

    #[error("Source d'aléa défaillante : {0}")]
    RandomSource(String),

    // --- Erreurs mathématiques internes ---
    /// L'inverse modulaire n'existe pas (gcd != 1)
    #[error("Impossible de calculer l'inverse modulaire (gcd != 1)")]
    NoModularInverse,

    /// Conversion BigInt -> BigUint échouée (résultat négatif, invariant interne)
    #[error("Conversion interne BigInt -> BigUint : résultat négatif inattendu")]
    NegativeConversion,

    // --- Concurrence ---
    /// Mutex de la source d'aléa empoisonné (thread paniqué pendant un tirage)
    #[error("Verrou de la source d'aléa empoisonné")]
    LockPoisoned,
}

impl From<rand_core::Error> for CryptoError {
    fn from(e: rand_core::Error) -> Self {
        CryptoError::RandomSource(e.to_string())
    }
}
