//! Modular arithmetic toolkit.
//!
//! All results are canonical residues in `[0, n)`. Inputs without a defined
//! answer are rejected with an [`OracleError`] rather than answered wrongly.

use serde::{Deserialize, Serialize};

use crate::question_engine::error::OracleError;

/// One congruence `x ≡ remainder (mod modulus)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Congruence {
    pub remainder: i64,
    pub modulus: i64,
}

/// Unique solution of a congruence system: `x ≡ value (mod modulus)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrtSolution {
    pub value: i64,
    pub modulus: i64,
}

/// Greatest common divisor of the magnitudes. `gcd(a, 0) = |a|`, which is
/// why the result is unsigned: `|i64::MIN|` does not fit in an `i64`.
pub fn gcd(a: i64, b: i64) -> u64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn are_coprime(x: i64, y: i64) -> bool {
    gcd(x, y) == 1
}

/// `((x % n) + n) % n`, i.e. the residue of `x` in `[0, n)`.
pub fn normalize(x: i64, n: i64) -> Result<i64, OracleError> {
    if n <= 0 {
        return Err(OracleError::InvalidModulus(n));
    }
    Ok(x.rem_euclid(n))
}

/// Inverse of `a` modulo `n` via the extended Euclidean algorithm.
pub fn modular_inverse(a: i64, n: i64) -> Result<i64, OracleError> {
    if n <= 0 {
        return Err(OracleError::InvalidModulus(n));
    }
    // Invariant: old_s * a ≡ old_r (mod n), carried in i128 to avoid overflow.
    let (mut old_r, mut r) = (i128::from(a.rem_euclid(n)), i128::from(n));
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        // n == 1 is the one modulus where every residue (all zero) is invertible.
        if n == 1 {
            return Ok(0);
        }
        return Err(OracleError::NotInvertible { a, n });
    }
    Ok(old_s.rem_euclid(i128::from(n)) as i64)
}

/// `a^b mod n` by square-and-multiply, reducing every product mod `n`.
pub fn modular_exponentiation(a: i64, b: i64, n: i64) -> Result<i64, OracleError> {
    if n <= 0 {
        return Err(OracleError::InvalidModulus(n));
    }
    if b < 0 {
        return Err(OracleError::NegativeExponent(b));
    }
    let n = i128::from(n);
    let mut base = i128::from(a).rem_euclid(n);
    let mut exponent = b;
    let mut result = 1 % n;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % n;
        }
        base = base * base % n;
        exponent >>= 1;
    }
    Ok(result as i64)
}

/// Solve a system with pairwise-coprime moduli by CRT reconstruction:
/// `x = Σ r_i · M_i · (M_i⁻¹ mod m_i)  (mod M)` with `M_i = M / m_i`.
pub fn solve_crt(congruences: &[Congruence]) -> Result<CrtSolution, OracleError> {
    if congruences.is_empty() {
        return Err(OracleError::EmptySystem);
    }
    for (i, c) in congruences.iter().enumerate() {
        if c.modulus <= 0 {
            return Err(OracleError::InvalidModulus(c.modulus));
        }
        for other in &congruences[..i] {
            if !are_coprime(c.modulus, other.modulus) {
                return Err(OracleError::NotCoprime(other.modulus, c.modulus));
            }
        }
    }

    let product = congruences
        .iter()
        .try_fold(1i64, |acc, c| acc.checked_mul(c.modulus))
        .ok_or(OracleError::Overflow)?;

    let total = i128::from(product);
    let mut x = 0i128;
    for c in congruences {
        let basis = product / c.modulus;
        let inverse = modular_inverse(basis, c.modulus)?;
        let term = i128::from(c.remainder.rem_euclid(c.modulus)) * i128::from(basis) % total;
        x = (x + term * i128::from(inverse)) % total;
    }
    Ok(CrtSolution { value: x.rem_euclid(total) as i64, modulus: product })
}
