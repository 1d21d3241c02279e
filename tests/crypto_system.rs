// ============================================================================
// Scénarios de bout en bout sur la façade, clés de 64 bits
// ============================================================================

use std::sync::Arc;
use std::thread;

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use paillier_cryptosystem::{
    CryptoError, KeyGenConfig, PaillierCryptoSystem, SharedRng,
};

fn system_with_bits(seed: u64, bits: u64) -> PaillierCryptoSystem<ChaCha20Rng> {
    let cfg = KeyGenConfig::new().bit_length(bits);
    PaillierCryptoSystem::with_rng(cfg, ChaCha20Rng::seed_from_u64(seed)).unwrap()
}

fn system(seed: u64) -> PaillierCryptoSystem<ChaCha20Rng> {
    system_with_bits(seed, 64)
}

// n de 128 bits : le seuil par défaut (i64::MAX) laisse toute la plage i64
// des deux côtés du décodage signé
fn signed_system(seed: u64) -> PaillierCryptoSystem<ChaCha20Rng> {
    system_with_bits(seed, 128)
}

fn big(v: i64) -> BigInt {
    BigInt::from(v)
}

#[test]
fn test_decrypt() {
    let sys = system(100);
    let c = sys.encrypt(&big(10)).unwrap();
    assert_eq!(sys.decrypt(&c).unwrap(), big(10));
}

#[test]
fn test_homomorphic_addition() {
    let sys = system(101);
    let c = sys
        .add(&sys.encrypt(&big(102)).unwrap(), &sys.encrypt(&big(203)).unwrap())
        .unwrap();
    assert_eq!(sys.decrypt(&c).unwrap(), big(305));
}

#[test]
fn test_homomorphic_constant_multiplication() {
    let sys = system(102);
    let c = sys.multiply_by_constant(&sys.encrypt(&big(14)).unwrap(), &big(203)).unwrap();
    assert_eq!(sys.decrypt(&c).unwrap(), big(2842));
}

#[test]
fn test_constant_multiplication_with_0() {
    let sys = system(103);
    let c = sys.encrypt(&big(15)).unwrap();
    let product = sys.multiply_by_constant(&c, &big(0)).unwrap();

    // c^0 vaudrait 1 pour tout c
    assert!(!product.is_one());
    assert_ne!(product, c);
    assert_eq!(sys.decrypt(&product).unwrap(), big(0));
}

#[test]
fn test_constant_multiplication_with_1() {
    let sys = system(104);
    let c = sys.encrypt(&big(16)).unwrap();
    let product = sys.multiply_by_constant(&c, &big(1)).unwrap();

    // c^1 vaudrait c
    assert_ne!(product, c);
    assert_eq!(sys.decrypt(&product).unwrap(), big(16));
}

#[test]
fn test_probabilistic_encryption() {
    let sys = system(105);
    let a = sys.encrypt(&big(42)).unwrap();
    let b = sys.encrypt(&big(42)).unwrap();
    assert_ne!(a, b);
    assert_eq!(sys.decrypt(&a).unwrap(), sys.decrypt(&b).unwrap());
}

#[test]
fn test_roundtrip_and_addition_sweep() {
    let sys = signed_system(106);
    let values = [0i64, 1, 2, 255, 65_536, 1 << 40, -1, -1000, i64::MAX, -i64::MAX];
    for &m in &values {
        let c = sys.encrypt(&big(m)).unwrap();
        assert_eq!(sys.decrypt(&c).unwrap(), big(m), "m = {m}");
    }
    for pair in values.windows(2) {
        let (m1, m2) = (pair[0] as i128, pair[1] as i128);
        let sum = m1 + m2;
        if sum.abs() > i64::MAX as i128 {
            continue;
        }
        let c = sys
            .add(&sys.encrypt(&big(pair[0])).unwrap(), &sys.encrypt(&big(pair[1])).unwrap())
            .unwrap();
        assert_eq!(sys.decrypt(&c).unwrap(), BigInt::from(sum), "{m1} + {m2}");
    }
}

#[test]
fn test_signed_sum_crosses_zero() {
    let sys = signed_system(107);
    let c = sys
        .add(&sys.encrypt(&big(-500)).unwrap(), &sys.encrypt(&big(200)).unwrap())
        .unwrap();
    assert_eq!(sys.decrypt(&c).unwrap(), big(-300));

    let c = sys.multiply_by_constant(&sys.encrypt(&big(25)).unwrap(), &big(-4)).unwrap();
    assert_eq!(sys.decrypt(&c).unwrap(), big(-100));
}

#[test]
fn test_unsigned_decoding_returns_residue() {
    let cfg = KeyGenConfig::new().bit_length(64).sign_threshold(None);
    let sys = PaillierCryptoSystem::with_rng(cfg, ChaCha20Rng::seed_from_u64(108)).unwrap();
    let c = sys.encrypt(&big(-1)).unwrap();
    let expected = BigInt::from(sys.modulus().clone()) - 1;
    assert_eq!(sys.decrypt(&c).unwrap(), expected);
}

#[test]
fn test_invalid_inputs_rejected() {
    let sys = system(109);
    let n = BigInt::from(sys.modulus().clone());
    assert_eq!(sys.encrypt(&n), Err(CryptoError::PlaintextOutOfRange));

    let n_squared = sys.public_key().n_squared().clone();
    assert_eq!(sys.decrypt(&n_squared), Err(CryptoError::CiphertextOutOfRange));
    assert_eq!(
        sys.add(&BigUint::from(0u32), &BigUint::one()),
        Err(CryptoError::CiphertextOutOfRange)
    );
}

#[test]
fn test_generation_cap_reported() {
    let cfg = KeyGenConfig::new().bit_length(64).max_generator_attempts(Some(0));
    let res = PaillierCryptoSystem::with_rng(cfg, ChaCha20Rng::seed_from_u64(110));
    assert_eq!(res.unwrap_err(), CryptoError::GenerationFailed { attempts: 0 });
}

#[test]
fn test_concurrent_encryption_shared_facade() {
    let sys = Arc::new(system(111));
    let handles: Vec<_> = (0..4i64).map(|t| {
        let s = Arc::clone(&sys);
        thread::spawn(move || {
            (0..10i64)
                .map(|i| s.encrypt(&big(t * 100 + i)).unwrap())
                .collect::<Vec<_>>()
        })
    }).collect();

    let mut total = sys.encrypt(&big(0)).unwrap();
    for h in handles {
        for c in h.join().unwrap() {
            total = sys.add(&total, &c).unwrap();
        }
    }
    // somme de t·100 + i pour t < 4, i < 10 : 10·600 + 4·45
    assert_eq!(sys.decrypt(&total).unwrap(), big(6180));
}

#[test]
fn test_independent_sources_per_thread() {
    let sys = system(112);
    let kp = sys.key_pair().clone();
    let handles: Vec<_> = (0..3u64).map(|t| {
        let kp = kp.clone();
        thread::spawn(move || {
            let own = SharedRng::new(ChaCha20Rng::seed_from_u64(1000 + t));
            let local = PaillierCryptoSystem::from_keypair(kp, own);
            local.encrypt(&big(7)).unwrap()
        })
    }).collect();

    let cts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_ne!(cts[0], cts[1]);
    assert_ne!(cts[1], cts[2]);
    for c in &cts {
        assert_eq!(sys.decrypt(c).unwrap(), big(7));
    }
}
