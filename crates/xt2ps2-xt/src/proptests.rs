use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::receiver::tests::FakeLines;
use crate::{scancode, XtConfig, XtKeyboardSession};

fn send(session: &mut XtKeyboardSession, lines: &mut FakeLines, t: &mut u32, byte: u8) {
    *t = t.wrapping_add(1000);
    let mut bits = vec![false, true];
    bits.extend((0..8).map(|n| byte & (1 << n) != 0));
    for bit in bits {
        lines.data = bit;
        session.on_clock_falling_edge(lines, *t);
        *t = t.wrapping_add(100);
    }
    session.task(lines);
}

fn scan_code() -> impl Strategy<Value = u8> {
    (1u8..=scancode::MAX_CODE, any::<bool>())
        .prop_map(|(base, brk)| if brk { base | scancode::BREAK_BIT } else { base })
}

proptest! {
    #[test]
    fn repeats_are_filtered_and_order_kept(codes in prop::collection::vec(scan_code(), 0..64)) {
        let config = XtConfig {
            por_on_enable: false,
            ..XtConfig::default()
        };
        let mut lines = FakeLines::default();
        let mut session = XtKeyboardSession::new(&config).unwrap();
        session.enable(&mut lines);
        let mut t = 0;
        send(&mut session, &mut lines, &mut t, scancode::BAT_COMPLETE);
        prop_assert!(session.is_detected());

        let mut down = BTreeSet::new();
        let mut expected = Vec::new();
        let mut got = Vec::new();
        for code in codes {
            let base = scancode::base_code(code);
            if scancode::is_break(code) {
                down.remove(&base);
                expected.push(code);
            } else if down.insert(base) {
                expected.push(code);
            }

            send(&mut session, &mut lines, &mut t, code);
            prop_assert!(!lines.clock_held);
            got.extend(std::iter::from_fn(|| session.next_scan_code()));
        }
        prop_assert_eq!(got, expected);
    }
}
