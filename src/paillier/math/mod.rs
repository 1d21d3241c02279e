// Réexporte les primitives arithmétiques utilisées par keygen, encrypt et decrypt

mod math;

pub use math::{
    l_function, gcd, lcm, mod_inverse,
    random_bits,
    generate_prime, is_probable_prime, miller_rabin_rounds,
};
