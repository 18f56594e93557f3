//! Boot-protocol keycode tables and modifier masks.
//!
//! Usage ids come straight off the wire (slot bytes of the interrupt
//! report); the tables translate them to ASCII for consumers that want
//! printable input rather than raw usages.

/// Bit assignments of the report's modifier byte.
pub mod modifier {
    pub const L_CONTROL: u8 = 0x01;
    pub const L_SHIFT: u8 = 0x02;
    pub const L_ALT: u8 = 0x04;
    pub const L_GUI: u8 = 0x08;
    pub const R_CONTROL: u8 = 0x10;
    pub const R_SHIFT: u8 = 0x20;
    pub const R_ALT: u8 = 0x40;
    pub const R_GUI: u8 = 0x80;

    pub const CONTROL: u8 = L_CONTROL | R_CONTROL;
    pub const SHIFT: u8 = L_SHIFT | R_SHIFT;
    pub const ALT: u8 = L_ALT | R_ALT;
    pub const GUI: u8 = L_GUI | R_GUI;
}

/// HID usage ids of the keyboard/keypad page.
pub mod usage {
    pub const ERROR_ROLLOVER: u8 = 0x01;

    pub const KEY_A: u8 = 0x04;
    pub const KEY_B: u8 = 0x05;
    pub const KEY_C: u8 = 0x06;
    pub const KEY_D: u8 = 0x07;
    pub const KEY_E: u8 = 0x08;
    pub const KEY_F: u8 = 0x09;
    pub const KEY_G: u8 = 0x0a;
    pub const KEY_H: u8 = 0x0b;
    pub const KEY_I: u8 = 0x0c;
    pub const KEY_J: u8 = 0x0d;
    pub const KEY_K: u8 = 0x0e;
    pub const KEY_L: u8 = 0x0f;
    pub const KEY_M: u8 = 0x10;
    pub const KEY_N: u8 = 0x11;
    pub const KEY_O: u8 = 0x12;
    pub const KEY_P: u8 = 0x13;
    pub const KEY_Q: u8 = 0x14;
    pub const KEY_R: u8 = 0x15;
    pub const KEY_S: u8 = 0x16;
    pub const KEY_T: u8 = 0x17;
    pub const KEY_U: u8 = 0x18;
    pub const KEY_V: u8 = 0x19;
    pub const KEY_W: u8 = 0x1a;
    pub const KEY_X: u8 = 0x1b;
    pub const KEY_Y: u8 = 0x1c;
    pub const KEY_Z: u8 = 0x1d;

    pub const KEY_1: u8 = 0x1e;
    pub const KEY_2: u8 = 0x1f;
    pub const KEY_3: u8 = 0x20;
    pub const KEY_4: u8 = 0x21;
    pub const KEY_5: u8 = 0x22;
    pub const KEY_6: u8 = 0x23;
    pub const KEY_7: u8 = 0x24;
    pub const KEY_8: u8 = 0x25;
    pub const KEY_9: u8 = 0x26;
    pub const KEY_0: u8 = 0x27;

    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2a;
    pub const TAB: u8 = 0x2b;
    pub const SPACE: u8 = 0x2c;

    pub const F1: u8 = 0x3a;
    pub const F2: u8 = 0x3b;
    pub const F3: u8 = 0x3c;
    pub const F4: u8 = 0x3d;
    pub const F5: u8 = 0x3e;
    pub const F6: u8 = 0x3f;
    pub const F7: u8 = 0x40;
    pub const F8: u8 = 0x41;
    pub const F9: u8 = 0x42;
    pub const F10: u8 = 0x43;
    pub const F11: u8 = 0x44;
    pub const F12: u8 = 0x45;

    pub const ARROW_RIGHT: u8 = 0x4f;
    pub const ARROW_LEFT: u8 = 0x50;
    pub const ARROW_DOWN: u8 = 0x51;
    pub const ARROW_UP: u8 = 0x52;
}

#[rustfmt::skip]
const KEYCODE_MAP: [u8; 256] = [
    0,     0,     0,     0,     b'a',  b'b',  b'c',  b'd',  // 0
    b'e',  b'f',  b'g',  b'h',  b'i',  b'j',  b'k',  b'l',  // 8
    b'm',  b'n',  b'o',  b'p',  b'q',  b'r',  b's',  b't',  // 16
    b'u',  b'v',  b'w',  b'x',  b'y',  b'z',  b'1',  b'2',  // 24
    b'3',  b'4',  b'5',  b'6',  b'7',  b'8',  b'9',  b'0',  // 32
    b'\n', 0x08,  0x08,  b'\t', b' ',  b'-',  b'=',  b'[',  // 40
    b']',  b'\\', 0,     b';',  b'\'', b'`',  b',',  b'.',  // 48
    b'/',  0,     0,     0,     0,     0,     0,     0,     // 56
    0,     0,     0,     0,     0,     0,     0,     0,     // 64
    0,     0,     0,     0,     0,     0,     0,     0,     // 72
    0,     0,     0,     0,     b'/',  b'*',  b'-',  b'+',  // 80
    b'\n', b'1',  b'2',  b'3',  b'4',  b'5',  b'6',  b'7',  // 88
    b'8',  b'9',  b'0',  b'.',  b'\\', 0,     0,     b'=',  // 96
    0,     0,     0,     0,     0,     0,     0,     0,     // 104
    0,     0,     0,     0,     0,     0,     0,     0,     // 112
    0,     0,     0,     0,     0,     0,     0,     0,     // 120
    0,     0,     0,     0,     0,     0,     0,     0,     // 128
    0,     b'\\', 0,     0,     0,     0,     0,     0,     // 136
    0,     0,     0,     0,     0,     0,     0,     0,     // 144
    0,     0,     0,     0,     0,     0,     0,     0,     // 152
    0,     0,     0,     0,     0,     0,     0,     0,     // 160
    0,     0,     0,     0,     0,     0,     0,     0,     // 168
    0,     0,     0,     0,     0,     0,     0,     0,     // 176
    0,     0,     0,     0,     0,     0,     0,     0,     // 184
    0,     0,     0,     0,     0,     0,     0,     0,     // 192
    0,     0,     0,     0,     0,     0,     0,     0,     // 200
    0,     0,     0,     0,     0,     0,     0,     0,     // 208
    0,     0,     0,     0,     0,     0,     0,     0,     // 216
    0,     0,     0,     0,     0,     0,     0,     0,     // 224
    0,     0,     0,     0,     0,     0,     0,     0,     // 232
    0,     0,     0,     0,     0,     0,     0,     0,     // 240
    0,     0,     0,     0,     0,     0,     0,     0,     // 248
];

#[rustfmt::skip]
const KEYCODE_MAP_SHIFTED: [u8; 256] = [
    0,     0,     0,     0,     b'A',  b'B',  b'C',  b'D',  // 0
    b'E',  b'F',  b'G',  b'H',  b'I',  b'J',  b'K',  b'L',  // 8
    b'M',  b'N',  b'O',  b'P',  b'Q',  b'R',  b'S',  b'T',  // 16
    b'U',  b'V',  b'W',  b'X',  b'Y',  b'Z',  b'!',  b'@',  // 24
    b'#',  b'$',  b'%',  b'^',  b'&',  b'*',  b'(',  b')',  // 32
    b'\n', 0x08,  0x08,  b'\t', b' ',  b'_',  b'+',  b'{',  // 40
    b'}',  b'|',  0,     b':',  b'"',  b'~',  b'<',  b'>',  // 48
    b'?',  0,     0,     0,     0,     0,     0,     0,     // 56
    0,     0,     0,     0,     0,     0,     0,     0,     // 64
    0,     0,     0,     0,     0,     0,     0,     0,     // 72
    0,     0,     0,     0,     b'/',  b'*',  b'-',  b'+',  // 80
    b'\n', b'1',  b'2',  b'3',  b'4',  b'5',  b'6',  b'7',  // 88
    b'8',  b'9',  b'0',  b'.',  b'\\', 0,     0,     b'=',  // 96
    0,     0,     0,     0,     0,     0,     0,     0,     // 104
    0,     0,     0,     0,     0,     0,     0,     0,     // 112
    0,     0,     0,     0,     0,     0,     0,     0,     // 120
    0,     0,     0,     0,     0,     0,     0,     0,     // 128
    0,     b'|',  0,     0,     0,     0,     0,     0,     // 136
    0,     0,     0,     0,     0,     0,     0,     0,     // 144
    0,     0,     0,     0,     0,     0,     0,     0,     // 152
    0,     0,     0,     0,     0,     0,     0,     0,     // 160
    0,     0,     0,     0,     0,     0,     0,     0,     // 168
    0,     0,     0,     0,     0,     0,     0,     0,     // 176
    0,     0,     0,     0,     0,     0,     0,     0,     // 184
    0,     0,     0,     0,     0,     0,     0,     0,     // 192
    0,     0,     0,     0,     0,     0,     0,     0,     // 200
    0,     0,     0,     0,     0,     0,     0,     0,     // 208
    0,     0,     0,     0,     0,     0,     0,     0,     // 216
    0,     0,     0,     0,     0,     0,     0,     0,     // 224
    0,     0,     0,     0,     0,     0,     0,     0,     // 232
    0,     0,     0,     0,     0,     0,     0,     0,     // 240
    0,     0,     0,     0,     0,     0,     0,     0,     // 248
];

/// Translates a usage id to ASCII under the given modifier byte.
///
/// Either shift bit selects the shifted table. Returns `None` for usages
/// with no printable mapping (function keys, arrows, the error sentinels).
pub fn ascii(keycode: u8, modifier: u8) -> Option<char> {
    let table = if modifier & modifier::SHIFT != 0 {
        &KEYCODE_MAP_SHIFTED
    } else {
        &KEYCODE_MAP
    };
    match table[keycode as usize] {
        0 => None,
        byte => Some(byte as char),
    }
}
