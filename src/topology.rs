//! Fixed LED topology of the card
//!
//! Rough map of the LEDs with their shift-register bit numbers:
//!
//! ```text
//!  19W                                        16W
//!                     17W        / \                       27W
//!                              < 32Y >
//!                               |/ \|
//!          18W
//!                                                  26W
//!                                   06R                     25W
//!                  15W
//!       31W
//!                            33Y                      20W
//!                                                                24W
//!               30W                     13G
//!                                                   21W
//!     29W                  05R
//!
//!
//!                                    34Y                       22W
//!          28W                                14G
//!                           12G
//!                                         04R
//!    07W               03R                                 23W
//!
//!                                  36Y           11G
//!
//!                           10G             37Y
//!
//!                                     02R
//!                    38Y        09G             39Y
//!
//!                                         08G
//!                   00R        35Y                   01R
//! ```
//!
//! Every table here is checked at compile time: indices must be below
//! [`LEDS_NUM`], the groups must partition the LEDs, and every line must be
//! terminated by [`LEDS_IDX_INVALID`].

/// Number of LEDs
pub const LEDS_NUM: usize = 40;

/// Invalid LED index, terminates variable-length lines
pub const LEDS_IDX_INVALID: u8 = 255;

/// Number of LED brightness values
pub const LEDS_BR_NUM: usize = 64;

/// Maximum LED brightness value
#[allow(clippy::cast_possible_truncation)]
pub const LEDS_BR_MAX: u8 = (LEDS_BR_NUM - 1) as u8;

/// Number of bytes holding one bit per LED
pub const LEDS_BYTES: usize = LEDS_NUM.div_ceil(8);

/// Number of star LEDs
pub const STARS_NUM: usize = 18;

/// Star LEDs, left-to-right, top-to-bottom
pub const STARS_LIST: [u8; STARS_NUM] = [
    19, 17, 16, 27, 18, 26, 25, 31, 15, 20, 24, 29, 30, 21, 28, 22, 7, 23,
];

/// Number of topper LEDs
pub const TOPPER_NUM: usize = 1;

/// The tree-topper star
pub const TOPPER_LIST: [u8; TOPPER_NUM] = [32];

/// Number of ball LEDs
pub const BALLS_NUM: usize = 21;

/// Ball LEDs, top-to-bottom
pub const BALLS_LIST: [u8; BALLS_NUM] = [
    6, 33, 13, 5, 34, 14, 12, 4, 3, 36, 11, 10, 37, 2, 38, 9, 39, 0, 35, 8, 1,
];

/// Size of the largest LED group
pub const GROUP_MAX: usize = BALLS_NUM;

/// Maximum length of a ball SW-NE line, including the terminator
pub const BALLS_SWNE_LINE_LEN: usize = 6;

/// Number of ball SW-NE lines
pub const BALLS_SWNE_LINE_NUM: usize = 7;

/// Ball lines running from south-west to north-east, top-left first
pub const BALLS_SWNE_LINE_LIST: [[u8; BALLS_SWNE_LINE_LEN]; BALLS_SWNE_LINE_NUM] = [
    line([33, 6]),
    line([5, 13]),
    line([3, 12, 34]),
    line([38, 10, 36, 4, 14]),
    line([0, 9, 2, 37, 11]),
    line([35, 8, 39]),
    line([1]),
];

/// Maximum length of a ball row, including the terminator
pub const BALLS_ROW_LEN: usize = 4;

/// Number of ball rows
pub const BALLS_ROW_NUM: usize = 12;

/// Horizontal rows of balls, top-to-bottom, each left-to-right
pub const BALLS_ROW_LIST: [[u8; BALLS_ROW_LEN]; BALLS_ROW_NUM] = [
    line([6]),
    line([33]),
    line([13]),
    line([5]),
    line([34, 14]),
    line([3, 12, 4]),
    line([36, 11]),
    line([10, 37]),
    line([2]),
    line([38, 9, 39]),
    line([8]),
    line([0, 35, 1]),
];

/// Maximum length of a star column, including the terminator
pub const STARS_COLUMN_LEN: usize = 4;

/// Number of star columns
pub const STARS_COLUMN_NUM: usize = 7;

/// Vertical columns of stars, left-to-right, each top-to-bottom
pub const STARS_COLUMN_LIST: [[u8; STARS_COLUMN_LEN]; STARS_COLUMN_NUM] = [
    line([19, 29, 7]),
    line([18, 31, 28]),
    line([17, 15, 30]),
    line([16]),
    line([26, 20, 21]),
    line([27, 25, 23]),
    line([24, 22]),
];

/// Number of balls of each color
pub const BALLS_COLOR_NUM: usize = 7;

/// Red balls
pub const BALLS_RED_LIST: [u8; BALLS_COLOR_NUM] = [6, 5, 4, 3, 2, 0, 1];

/// Green balls
pub const BALLS_GREEN_LIST: [u8; BALLS_COLOR_NUM] = [13, 14, 12, 11, 10, 9, 8];

/// Yellow balls
pub const BALLS_YELLOW_LIST: [u8; BALLS_COLOR_NUM] = [33, 34, 36, 37, 38, 39, 35];

/// Ball color groups, in cycling order
pub const BALLS_COLOR_LIST: [&[u8]; 3] = [&BALLS_RED_LIST, &BALLS_GREEN_LIST, &BALLS_YELLOW_LIST];

/// Pad a list of LED indices with the invalid index, terminating it
const fn line<const N: usize, const LEN: usize>(leds: [u8; N]) -> [u8; LEN] {
    assert!(N < LEN, "line must leave room for the terminator");
    let mut out = [LEDS_IDX_INVALID; LEN];
    let mut i = 0;
    while i < N {
        out[i] = leds[i];
        i += 1;
    }
    out
}

/// Iterate over the LED indices of a terminated line
pub fn line_leds(line: &[u8]) -> impl Iterator<Item = u8> + '_ {
    line.iter().copied().take_while(|&idx| idx != LEDS_IDX_INVALID)
}

/// Number of LEDs in a terminated line
pub fn line_len(line: &[u8]) -> usize {
    line_leds(line).count()
}

const fn check_group(list: &[u8], seen: &mut [bool; LEDS_NUM]) {
    let mut i = 0;
    while i < list.len() {
        let idx = list[i] as usize;
        assert!(idx < LEDS_NUM, "LED index out of range");
        assert!(!seen[idx], "LED belongs to more than one group");
        seen[idx] = true;
        i += 1;
    }
}

const fn check_lines<const LEN: usize>(lines: &[[u8; LEN]], group: &[u8]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < lines.len() {
        assert!(lines[i][LEN - 1] == LEDS_IDX_INVALID, "line is not terminated");
        let mut j = 0;
        while lines[i][j] != LEDS_IDX_INVALID {
            assert!(contains(group, lines[i][j]), "line LED outside its group");
            total += 1;
            j += 1;
        }
        while j < LEN {
            assert!(lines[i][j] == LEDS_IDX_INVALID, "LED after the terminator");
            j += 1;
        }
        i += 1;
    }
    total
}

const fn contains(list: &[u8], idx: u8) -> bool {
    let mut i = 0;
    while i < list.len() {
        if list[i] == idx {
            return true;
        }
        i += 1;
    }
    false
}

const _: () = {
    let mut seen = [false; LEDS_NUM];
    check_group(&STARS_LIST, &mut seen);
    check_group(&TOPPER_LIST, &mut seen);
    check_group(&BALLS_LIST, &mut seen);
    let mut i = 0;
    while i < LEDS_NUM {
        assert!(seen[i], "LED not assigned to a group");
        i += 1;
    }

    assert!(check_lines(&BALLS_SWNE_LINE_LIST, &BALLS_LIST) == BALLS_NUM);
    assert!(check_lines(&BALLS_ROW_LIST, &BALLS_LIST) == BALLS_NUM);
    assert!(check_lines(&STARS_COLUMN_LIST, &STARS_LIST) == STARS_NUM);

    let mut colors = [false; LEDS_NUM];
    let mut c = 0;
    while c < BALLS_COLOR_LIST.len() {
        check_group(BALLS_COLOR_LIST[c], &mut colors);
        let mut j = 0;
        while j < BALLS_COLOR_LIST[c].len() {
            assert!(contains(&BALLS_LIST, BALLS_COLOR_LIST[c][j]));
            j += 1;
        }
        c += 1;
    }
};
