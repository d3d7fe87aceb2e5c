//! `rand`-backed verification code values.

use rand::Rng;

use crate::domain::CODE_SPACE;
use crate::domain::ports::CodeGenerator;

/// Draws from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngCodeGenerator;

impl CodeGenerator for ThreadRngCodeGenerator {
    fn next_value(&self) -> u32 {
        rand::thread_rng().gen_range(0..CODE_SPACE)
    }
}
