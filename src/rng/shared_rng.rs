// ============================================================================
// SharedRng — source d'aléa partageable entre threads
//
// Chaque chiffrement consomme de l'aléa frais : une source unique partagée
// par plusieurs threads doit être sérialisée. Arc<Mutex<R>> :
//   - Arc<T>    : clone = incrément d'un compteur atomique, transmissible
//   - Mutex<T>  : un seul tirage à la fois (tout accès à un RNG est une
//                 écriture, un RwLock n'apporterait rien)
//
// Pour des sources indépendantes par thread, créer un SharedRng par thread.
// ============================================================================

use std::sync::{Arc, Mutex, MutexGuard};
use rand_core::{CryptoRng, OsRng, RngCore};
use crate::crypto_error::{CryptoError, Result};

#[derive(Debug)]
pub struct SharedRng<R = OsRng> {
    inner: Arc<Mutex<R>>,
}

// Clone manuel : ne pas exiger R: Clone, seul l'Arc est dupliqué
impl<R> Clone for SharedRng<R> {
    fn clone(&self) -> Self {
        SharedRng { inner: Arc::clone(&self.inner) }
    }
}

impl<R> SharedRng<R>
where
    R: RngCore + CryptoRng,
{
    pub fn new(rng: R) -> Self {
        SharedRng { inner: Arc::new(Mutex::new(rng)) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, R>> {
        self.inner.lock().map_err(|_| CryptoError::LockPoisoned)
    }

    // -----------------------------------------------------------------------
    // Prête la source le temps d'une opération, sans la sortir du verrou.
    //
    // Usage typique :
    //   let c = shared.with_rng(|rng| p_encrypt(&m, &pk, rng))?;
    // -----------------------------------------------------------------------
    pub fn with_rng<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut R) -> Result<T>,
    {
        let mut guard = self.lock()?;
        f(&mut *guard)
    }
}

impl Default for SharedRng<OsRng> {
    fn default() -> Self {
        Self::new(OsRng)
    }
}
