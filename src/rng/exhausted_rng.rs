// Source d'aléa de test : `budget` octets, puis try_fill_bytes échoue.
// Sert à vérifier que chaque tirage de la bibliothèque passe par le
// chemin faillible.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore};

pub struct ExhaustedRng {
    inner:  ChaCha20Rng,
    budget: usize,
}

impl ExhaustedRng {
    pub fn new(budget: usize) -> Self {
        ExhaustedRng { inner: ChaCha20Rng::seed_from_u64(99), budget }
    }
}

impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill_bytes(&mut b);
        u32::from_le_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill_bytes(&mut b);
        u64::from_le_bytes(b)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("tirage infaillible sur une source épuisée : {e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
        if dest.len() > self.budget {
            self.budget = 0;
            return Err(rand_core::Error::new("source d'aléa épuisée"));
        }
        self.budget -= dest.len();
        self.inner.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ExhaustedRng {}
