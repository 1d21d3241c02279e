pub mod shared_rng;

#[cfg(test)]
mod exhausted_rng;

pub use shared_rng::SharedRng;

#[cfg(test)]
pub(crate) use exhausted_rng::ExhaustedRng;
