//! The eight symmetries of the square board.
//!
//! A symmetry is an index from 0 to 7 whose bits select the reflections that make it up: bit 0 flips the
//! rows, bit 1 mirrors the columns and bit 2 transposes rows with columns. They are applied in that order.

pub const NUM_SYMMETRIES: usize = 8;

const FLIP_VERTICAL: usize = 0b001;
const MIRROR_HORIZONTAL: usize = 0b010;
const TRANSPOSE: usize = 0b100;

pub fn transform_bits(bits: u64, symmetry: usize) -> u64 {
    debug_assert!(symmetry < NUM_SYMMETRIES);

    let mut bits = bits;

    if symmetry & FLIP_VERTICAL != 0 {
        bits = flip_vertical(bits);
    }

    if symmetry & MIRROR_HORIZONTAL != 0 {
        bits = mirror_horizontal(bits);
    }

    if symmetry & TRANSPOSE != 0 {
        bits = transpose(bits);
    }

    bits
}

/// The symmetry that undoes `symmetry`. Only the two quarter turns are not their own inverse.
pub fn inverse(symmetry: usize) -> usize {
    match symmetry {
        0b101 => 0b110,
        0b110 => 0b101,
        s => s,
    }
}

fn flip_vertical(bits: u64) -> u64 {
    bits.swap_bytes()
}

fn mirror_horizontal(bits: u64) -> u64 {
    const K1: u64 = 0x5555_5555_5555_5555;
    const K2: u64 = 0x3333_3333_3333_3333;
    const K4: u64 = 0x0f0f_0f0f_0f0f_0f0f;

    let bits = ((bits >> 1) & K1) | ((bits & K1) << 1);
    let bits = ((bits >> 2) & K2) | ((bits & K2) << 2);
    ((bits >> 4) & K4) | ((bits & K4) << 4)
}

// Swaps row and column, reflecting about the a1-h8 diagonal.
fn transpose(bits: u64) -> u64 {
    const K1: u64 = 0x5500_5500_5500_5500;
    const K2: u64 = 0x3333_0000_3333_0000;
    const K4: u64 = 0x0f0f_0f0f_0000_0000;

    let mut bits = bits;
    let t = K4 & (bits ^ (bits << 28));
    bits ^= t ^ (t >> 28);
    let t = K2 & (bits ^ (bits << 14));
    bits ^= t ^ (t >> 14);
    let t = K1 & (bits ^ (bits << 7));
    bits ^= t ^ (t >> 7);
    bits
}
