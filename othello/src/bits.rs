// Square index is row * 8 + col, so a column step is one bit and a row step is a byte.
// East and west moves must not wrap into the neighbouring row.

pub(crate) const NOT_A_FILE: u64 = 0xfefe_fefe_fefe_fefe;
pub(crate) const NOT_H_FILE: u64 = 0x7f7f_7f7f_7f7f_7f7f;

macro_rules! shift_north {
    ($exp:expr) => {
        $exp << BOARD_WIDTH
    };
}

macro_rules! shift_south {
    ($exp:expr) => {
        $exp >> BOARD_WIDTH
    };
}

macro_rules! shift_east {
    ($exp:expr) => {
        ($exp << 1) & crate::bits::NOT_A_FILE
    };
}

macro_rules! shift_west {
    ($exp:expr) => {
        ($exp >> 1) & crate::bits::NOT_H_FILE
    };
}

macro_rules! shift_north_east {
    ($exp:expr) => {
        ($exp << (BOARD_WIDTH + 1)) & crate::bits::NOT_A_FILE
    };
}

macro_rules! shift_north_west {
    ($exp:expr) => {
        ($exp << (BOARD_WIDTH - 1)) & crate::bits::NOT_H_FILE
    };
}

macro_rules! shift_south_east {
    ($exp:expr) => {
        ($exp >> (BOARD_WIDTH - 1)) & crate::bits::NOT_A_FILE
    };
}

macro_rules! shift_south_west {
    ($exp:expr) => {
        ($exp >> (BOARD_WIDTH + 1)) & crate::bits::NOT_H_FILE
    };
}
