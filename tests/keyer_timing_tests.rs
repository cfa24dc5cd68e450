//! Keyer timing tests: exact on/off sequences in dit units.

mod common;

use common::{pulses, pulses_in_dits, recorder, Event};
use fn_beacon::keyer::{character_units, CwKeyer};
use fn_beacon::morse::{self, FIRST_CODE, LAST_CODE, MAX_ELEMENTS};
use fn_beacon::timing::{self, dit_duration_us, Timing};

const DIT_20: u32 = 60_000;

fn send(codes: &[u8], wpm: u8) -> Vec<Event> {
    let (trace, output, delay) = recorder();
    let mut keyer = CwKeyer::new(output, delay);
    for &code in codes {
        keyer.send_character(code, wpm);
    }
    let events = trace.borrow().clone();
    events
}

#[test]
fn test_dit_formula_across_range() {
    for wpm in 5..=30u8 {
        let dit = dit_duration_us(wpm);
        assert_eq!(dit, 1_200_000 / u32::from(wpm));
        let timing = Timing::for_wpm(wpm);
        assert_eq!(timing.dah_us(), 3 * dit);
        assert_eq!(timing.element_gap_us(), dit);
        assert_eq!(timing.letter_gap_us(), 3 * dit);
        assert_eq!(timing.word_gap_us(), 9 * dit);
    }
    assert_eq!(dit_duration_us(20), DIT_20);
    assert_eq!(dit_duration_us(0), timing::SECOND_US);
}

#[test]
fn test_letter_a_at_20_wpm() {
    let events = send(b"A", 20);
    assert_eq!(
        pulses_in_dits(&events, DIT_20),
        [(true, 1), (false, 1), (true, 3), (false, 4)]
    );
}

#[test]
fn test_each_on_phase_is_one_delay_call() {
    let events = send(b"0", 20);
    // five dahs: Key(true), Delay, Key(false), Delay
    let on_delays: Vec<_> = events
        .windows(2)
        .filter_map(|w| match w {
            [Event::Key(true), Event::Delay(us)] => Some(*us),
            _ => None,
        })
        .collect();
    assert_eq!(on_delays, [3 * DIT_20; 5]);
}

#[test]
fn test_space_is_single_word_gap() {
    let events = send(b" ", 20);
    assert_eq!(events, [Event::Delay(9 * DIT_20)]);
}

#[test]
fn test_ampersand_prefix() {
    let events = send(b"&", 20);
    assert_eq!(
        pulses_in_dits(&events, DIT_20),
        [
            (true, 1),
            (false, 3),
            (true, 1),
            (false, 1),
            (true, 1),
            (false, 1),
            (true, 1),
            (false, 4),
        ]
    );
}

#[test]
fn test_unsupported_code_keeps_letter_space() {
    let events = send(b"#", 20);
    assert_eq!(events, [Event::Delay(3 * DIT_20)]);
}

#[test]
fn test_zero_wpm_is_silent() {
    assert!(send(b"PARIS ", 0).is_empty());
}

#[test]
fn test_underscore_and_out_of_range_sound_alike() {
    let underscore = pulses(&send(b"_", 20));
    for code in [b'a', b'z', 0x7f, 0xff, b'\n', 0x01] {
        assert_eq!(pulses(&send(&[code], 20)), underscore, "code {:#04x}", code);
    }
    // ..--.-
    assert_eq!(
        pulses_in_dits(&send(b"_", 20), DIT_20),
        [
            (true, 1),
            (false, 1),
            (true, 1),
            (false, 1),
            (true, 3),
            (false, 1),
            (true, 3),
            (false, 1),
            (true, 1),
            (false, 1),
            (true, 3),
            (false, 4),
        ]
    );
}

#[test]
fn test_character_units_match_trace() {
    for &code in b"KE0FF/B" {
        let total: u64 = pulses(&send(&[code], 20)).iter().map(|(_, us)| us).sum();
        assert_eq!(total, u64::from(character_units(code)) * u64::from(DIT_20));
    }
}

#[test]
fn test_table_against_reference() {
    const REFERENCE: &[(u8, &str)] = &[
        (b'A', ".-"), (b'B', "-..."), (b'C', "-.-."), (b'D', "-.."),
        (b'E', "."), (b'F', "..-."), (b'G', "--."), (b'H', "...."),
        (b'I', ".."), (b'J', ".---"), (b'K', "-.-"), (b'L', ".-.."),
        (b'M', "--"), (b'N', "-."), (b'O', "---"), (b'P', ".--."),
        (b'Q', "--.-"), (b'R', ".-."), (b'S', "..."), (b'T', "-"),
        (b'U', "..-"), (b'V', "...-"), (b'W', ".--"), (b'X', "-..-"),
        (b'Y', "-.--"), (b'Z', "--.."),
        (b'0', "-----"), (b'1', ".----"), (b'2', "..---"), (b'3', "...--"),
        (b'4', "....-"), (b'5', "....."), (b'6', "-...."), (b'7', "--..."),
        (b'8', "---.."), (b'9', "----."),
        (b'!', "-.-.--"), (b'"', ".-..-."), (b'$', "...-..-"), (b'\'', ".----."),
        (b'(', "-.--."), (b')', "-.--.-"), (b'+', ".-.-."), (b',', "--..--"),
        (b'-', "-....-"), (b'.', ".-.-.-"), (b'/', "-..-."), (b':', "---..."),
        (b';', "-.-.-."), (b'=', "-...-"), (b'?', "..--.."), (b'@', ".--.-."),
        (b'_', "..--.-"),
        // keyer adds the E
        (b'&', "..."),
    ];

    for &(code, expected) in REFERENCE {
        assert_eq!(
            morse::lookup(code).to_string(),
            expected,
            "'{}'",
            code as char
        );
    }
}

#[test]
fn test_table_counts_consistent() {
    for code in FIRST_CODE..=LAST_CODE {
        let encoding = morse::lookup(code);
        assert!(usize::from(encoding.count()) <= MAX_ELEMENTS);
        assert_eq!(encoding.elements().len(), usize::from(encoding.count()));
        assert_eq!(encoding.to_string().len(), usize::from(encoding.count()));
    }
}
