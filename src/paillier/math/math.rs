use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use log::debug;
use crate::crypto_error::{CryptoError, Result};

// ---------------------------------------------------------------------------
// Table de petits premiers impairs (crible préliminaire, jusqu'à 1021)
// ---------------------------------------------------------------------------
const SMALL_PRIMES: &[u64] = &[
       3,    5,    7,   11,   13,   17,   19,   23,   29,   31,   37,   41,   43,   47,
      53,   59,   61,   67,   71,   73,   79,   83,   89,   97,  101,  103,  107,  109,
     113,  127,  131,  137,  139,  149,  151,  157,  163,  167,  173,  179,  181,  191,
     193,  197,  199,  211,  223,  227,  229,  233,  239,  241,  251,  257,  263,  269,
     271,  277,  281,  283,  293,  307,  311,  313,  317,  331,  337,  347,  349,  353,
     359,  367,  373,  379,  383,  389,  397,  401,  409,  419,  421,  431,  433,  439,
     443,  449,  457,  461,  463,  467,  479,  487,  491,  499,  503,  509,  521,  523,
     541,  547,  557,  563,  569,  571,  577,  587,  593,  599,  601,  607,  613,  617,
     619,  631,  641,  643,  647,  653,  659,  661,  673,  677,  683,  691,  701,  709,
     719,  727,  733,  739,  743,  751,  757,  761,  769,  773,  787,  797,  809,  811,
     821,  823,  827,  829,  839,  853,  857,  859,  863,  877,  881,  883,  887,  907,
     911,  919,  929,  937,  941,  947,  953,  967,  971,  977,  983,  991,  997, 1009,
    1013, 1019, 1021,
];

// Fonction L(u) = (u-1)/n  (division entière)
//
// L'appelant garantit u >= 1 : keygen et decrypt rejettent u = 0 en amont.
pub fn l_function(u: &BigUint, n: &BigUint) -> BigUint {
    (u - BigUint::one()) / n
}

// Calcule le pgcd de deux nombres
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

// ---------------------------------------------------------------------------
// Inverse modulaire de a mod n via Bézout (a·x + n·y = gcd(a, n)).
// Retourne Err(CryptoError::NoModularInverse) si gcd(a, n) != 1.
// ---------------------------------------------------------------------------
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() {
        return Err(CryptoError::NoModularInverse);
    }

    let a_big = BigInt::from(a.clone());
    let n_big = BigInt::from(n.clone());
    let egcd  = a_big.extended_gcd(&n_big);

    if !egcd.gcd.is_one() {
        return Err(CryptoError::NoModularInverse);
    }

    // mod_floor ramène x dans [0, n) même si Bézout le donne négatif
    egcd.x
        .mod_floor(&n_big)
        .to_biguint()
        .ok_or(CryptoError::NegativeConversion)
}

// ---------------------------------------------------------------------------
// Entier uniforme dans [0, 2^bits)
//
// Passe par try_fill_bytes : une défaillance de la source remonte comme
// CryptoError::RandomSource au lieu de paniquer.
// ---------------------------------------------------------------------------
pub fn random_bits<R>(bits: u64, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bits == 0 {
        return Ok(BigUint::zero());
    }

    let len = ((bits + 7) / 8) as usize;
    let mut bytes = vec![0u8; len];
    rng.try_fill_bytes(&mut bytes)?;

    // Masque les bits excédentaires de l'octet de poids fort (little-endian)
    let excess = (len as u64) * 8 - bits;
    if excess > 0 {
        bytes[len - 1] &= 0xFF >> excess;
    }

    Ok(BigUint::from_bytes_le(&bytes))
}

// ---------------------------------------------------------------------------
// Plafond de rounds : au-delà, l'erreur (<= 2^-256) n'a plus de sens
pub const MAX_MILLER_RABIN_ROUNDS: u32 = 128;

// Nombre de rounds Miller-Rabin
//
// certainty > 0 : probabilité d'erreur <= 2^-certainty, chaque round
//                 divisant l'erreur par 4 au moins, plafonné à
//                 MAX_MILLER_RABIN_ROUNDS.
// certainty = 0 : table dépendant de la taille, comme un "probable prime"
//                 de bibliothèque (les grands candidats aléatoires ont une
//                 probabilité d'erreur par round bien inférieure à 1/4).
// ---------------------------------------------------------------------------
pub fn miller_rabin_rounds(nbits: u64, certainty: u32) -> u32 {
    if certainty > 0 {
        let rounds = certainty / 2 + certainty % 2;
        return rounds.min(MAX_MILLER_RABIN_ROUNDS);
    }
    match nbits {
        0..=99    => 50,
        100..=255 => 27,
        256..=511 => 15,
        512..=767 => 8,
        768..=1023 => 4,
        _         => 2,
    }
}

// ---------------------------------------------------------------------------
// Premier probable d'exactement nbits bits.
//
// Les deux bits de poids fort sont forcés à 1 : p, q >= 1,5·2^(nbits-1),
// donc n = p·q a exactement 2·nbits bits. Bit 0 forcé à 1 (impair).
// Crible par SMALL_PRIMES puis Miller-Rabin.
// ---------------------------------------------------------------------------
pub fn generate_prime<R>(nbits: u64, certainty: u32, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if nbits < 2 {
        return Err(CryptoError::KeySizeTooSmall { requested: nbits, minimum: 2 });
    }

    let rounds = miller_rabin_rounds(nbits, certainty);
    let mut candidates = 0u64;

    loop {
        candidates += 1;

        let mut candidate = random_bits(nbits, rng)?;
        candidate.set_bit(nbits - 1, true);
        candidate.set_bit(nbits - 2, true);
        candidate.set_bit(0, true);

        if is_divisible_by_small_prime(&candidate) {
            continue;
        }

        if is_probable_prime(&candidate, rounds, rng)? {
            debug!(
                "premier de {} bits trouvé après {} candidats ({} rounds Miller-Rabin)",
                nbits, candidates, rounds
            );
            return Ok(candidate);
        }
    }
}

// Vérifie si n est divisible par un des petits premiers de la table.
// Un petit premier lui-même n'est pas rejeté.
fn is_divisible_by_small_prime(n: &BigUint) -> bool {
    for &p in SMALL_PRIMES {
        let bp = BigUint::from(p);
        if n == &bp {
            return false;
        }
        if (n % &bp).is_zero() {
            return true;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Test de Miller-Rabin à `rounds` témoins aléatoires dans [2, n-2].
//
// Témoins tirés par rejet via random_bits : une source défaillante remonte
// en CryptoError::RandomSource.
// ---------------------------------------------------------------------------
pub fn is_probable_prime<R>(n: &BigUint, rounds: u32, rng: &mut R) -> Result<bool>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if n <= &BigUint::one() { return Ok(false); }
    if n == &BigUint::from(2u32) || n == &BigUint::from(3u32) { return Ok(true); }
    if n.is_even() { return Ok(false); }
    if SMALL_PRIMES.iter().any(|&p| n == &BigUint::from(p)) { return Ok(true); }

    let n_minus_1 = n - BigUint::one();
    let mut d = n_minus_1.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    'witness: for _ in 0..rounds {
        let a = random_witness(n, rng)?;
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 0..r.saturating_sub(1) {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return Ok(false);
    }
    Ok(true)
}

// Témoin uniforme dans [2, n-2], n impair >= 5
fn random_witness<R>(n: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let two = BigUint::from(2u32);
    let upper = n - &two;
    loop {
        let a = random_bits(n.bits(), rng)?;
        if a >= two && a <= upper {
            return Ok(a);
        }
    }
}
