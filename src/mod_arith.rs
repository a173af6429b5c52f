use std::fmt::Debug;
use std::ops::{Rem, Sub};
use num::{CheckedAdd, One};

/// Size of the 15-bit value domain every argument and result lives in.
pub const MODULUS: u16 = 32768;

pub fn reduce<T>(a: T, m: T) -> T
    where T: Rem<Output = T>
{
    a % m
}

pub fn mod_add<T>(a: &T, b: &T, m: T) -> T
    where T: CheckedAdd + Rem<Output = T> + Copy + Debug
{
    let (ra, rb) = (*a % m, *b % m);
    match ra.checked_add(&rb) {
        None => panic!("mod_add overflowed with {:?}+{:?}%{:?}", a, b, m),
        Some(ab) => ab % m
    }
}

pub fn mod_inc<T>(a: T, m: T) -> T
    where T: CheckedAdd + Rem<Output = T> + One + Copy + Debug
{
    mod_add(&a, &T::one(), m)
}

/// Steps down by one, wrapping 0 to `m - 1`.
pub fn mod_dec<T>(a: T, m: T) -> T
    where T: CheckedAdd + Rem<Output = T> + Sub<Output = T> + One + Copy + Debug
{
    mod_add(&a, &(m - T::one()), m)
}
