//! Morse encoding table.
//!
//! Covers the ASCII segment from `'!'` up to two slots past `'Z'`.
//! `'_'` lives in the first slot after `'Z'`, the second one is a
//! reserved empty entry and marks the last supported code. Anything
//! above that in a message stream is a directive.
//!
//! Patterns are packed LSB first: bit 0 is the first element sent,
//! `1` is a dit and `0` is a dah. The packed table is expanded into
//! typed [`CharacterEncoding`]s at compile time.

use core::fmt;

/// First code with a table slot.
pub const FIRST_CODE: u8 = b'!';

/// Slot used for `'_'` and for every out-of-range code.
pub const UNDERSCORE_SLOT: u8 = b'Z' + 1;

/// Last code with a table slot. Bytes above this are directives.
pub const LAST_CODE: u8 = b'Z' + 2;

/// Longest supported character, in elements.
pub const MAX_ELEMENTS: usize = 7;

const TABLE_LEN: usize = (LAST_CODE - FIRST_CODE) as usize + 1;

/// Keying element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Dit,
    Dah,
}

impl Element {
    /// Length of the element in dits.
    #[inline]
    pub const fn units(self) -> u32 {
        match self {
            Element::Dit => crate::timing::DIT,
            Element::Dah => crate::timing::DAH,
        }
    }

    /// Symbol used in dot/dash notation.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Element::Dit => '.',
            Element::Dah => '-',
        }
    }
}

/// Element pattern of one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterEncoding {
    count: u8,
    pattern: [Element; MAX_ELEMENTS],
}

impl CharacterEncoding {
    /// Entry for an unsupported code: no elements.
    pub const EMPTY: Self = Self {
        count: 0,
        pattern: [Element::Dah; MAX_ELEMENTS],
    };

    /// Expand a packed `(bits, len)` pair.
    pub const fn from_packed(bits: u8, len: u8) -> Self {
        let count = if len as usize > MAX_ELEMENTS {
            MAX_ELEMENTS as u8
        } else {
            len
        };
        let mut pattern = [Element::Dah; MAX_ELEMENTS];
        let mut i = 0;
        while i < MAX_ELEMENTS {
            if (bits >> i) & 1 == 1 {
                pattern[i] = Element::Dit;
            }
            i += 1;
        }
        Self { count, pattern }
    }

    /// Number of elements (0 = unsupported).
    #[inline]
    pub const fn count(&self) -> u8 {
        self.count
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Full pattern storage, including slots past `count`.
    #[inline]
    pub const fn pattern(&self) -> &[Element; MAX_ELEMENTS] {
        &self.pattern
    }

    /// Walk the elements in send order.
    #[inline]
    pub fn elements(&self) -> Elements {
        Elements {
            pattern: self.pattern,
            index: 0,
            remaining: self.count,
        }
    }

    /// Total keyed length in dits, without gaps.
    pub fn keyed_units(&self) -> u32 {
        self.elements().map(Element::units).sum()
    }
}

impl fmt::Display for CharacterEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for element in self.elements() {
            f.write_char(element.symbol())?;
        }
        Ok(())
    }
}

/// Keyer progress through one character.
///
/// Created per character and dropped once the last element is sent.
#[derive(Clone, Debug)]
pub struct Elements {
    pattern: [Element; MAX_ELEMENTS],
    index: u8,
    remaining: u8,
}

impl Elements {
    /// Index of the next element to send.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Elements not yet sent.
    #[inline]
    pub fn remaining(&self) -> u8 {
        self.remaining
    }
}

impl Iterator for Elements {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.remaining == 0 {
            return None;
        }
        let element = self.pattern[self.index as usize];
        self.index += 1;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Elements {}

// (bits, len) from '!' to the reserved slot after '_'.
#[rustfmt::skip]
const PACKED: [(u8, u8); TABLE_LEN] = [
    // !            "            #            $            %            &            '            (
    (0x0a, 6), (0x2d, 6), (0x00, 0), (0x37, 7), (0x00, 0), (0x07, 3), (0x21, 6), (0x12, 5),
    // )            *            +            ,            -            .            /            0
    (0x12, 6), (0x00, 0), (0x15, 5), (0x0c, 6), (0x1e, 6), (0x15, 6), (0x16, 5), (0x00, 5),
    // 1            2            3            4            5            6            7            8
    (0x01, 5), (0x03, 5), (0x07, 5), (0x0f, 5), (0x1f, 5), (0x1e, 5), (0x1c, 5), (0x18, 5),
    // 9            :            ;            <            =            >            ?            @
    (0x10, 5), (0x38, 6), (0x2a, 6), (0x00, 0), (0x0e, 5), (0x00, 0), (0x33, 6), (0x29, 6),
    // A            B            C            D            E            F            G            H
    (0x01, 2), (0x0e, 4), (0x0a, 4), (0x06, 3), (0x01, 1), (0x0b, 4), (0x04, 3), (0x0f, 4),
    // I            J            K            L            M            N            O            P
    (0x03, 2), (0x01, 4), (0x02, 3), (0x0d, 4), (0x00, 2), (0x02, 2), (0x00, 3), (0x09, 4),
    // Q            R            S            T            U            V            W            X
    (0x04, 4), (0x05, 3), (0x07, 3), (0x00, 1), (0x03, 3), (0x07, 4), (0x01, 3), (0x06, 4),
    // Y            Z            _            reserved
    (0x02, 4), (0x0c, 4), (0x13, 6), (0x00, 0),
];

const fn build_table() -> [CharacterEncoding; TABLE_LEN] {
    let mut table = [CharacterEncoding::EMPTY; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = CharacterEncoding::from_packed(PACKED[i].0, PACKED[i].1);
        i += 1;
    }
    table
}

/// Typed encoding table, indexed by `code - FIRST_CODE`.
pub static TABLE: [CharacterEncoding; TABLE_LEN] = build_table();

/// Whether a stream byte is Morse text (as opposed to a directive).
#[inline]
pub const fn is_literal(code: u8) -> bool {
    code <= LAST_CODE
}

/// Table slot for `code` after underscore remapping and range clamping.
#[inline]
pub const fn slot(code: u8) -> u8 {
    if code == b'_' || code > LAST_CODE || code < FIRST_CODE {
        UNDERSCORE_SLOT
    } else {
        code
    }
}

/// Encoding for `code`.
///
/// Never fails: unknown codes map to the underscore pattern, table gaps
/// return an empty encoding.
#[inline]
pub fn lookup(code: u8) -> CharacterEncoding {
    TABLE[(slot(code) - FIRST_CODE) as usize]
}
