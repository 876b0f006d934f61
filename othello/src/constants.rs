pub const BOARD_WIDTH: usize = 8;
pub const BOARD_HEIGHT: usize = 8;
pub const NUM_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// Empty squares of the standard starting position.
pub const INITIAL_EMPTY_COUNT: usize = NUM_SQUARES - 4;

pub const CENTI_DISKS_PER_DISK: i32 = 100;

pub const ASCII_LETTER_A: u8 = 97;
