use sccpatch_core::passes::{patch_calls, patch_channel_locations, patch_mapper};
use sccpatch_core::reloc::{read_u16_le, relocate};
use sccpatch_core::scan::IgnoreSet;

#[test]
fn indexed_load_operand_moves_to_0ee00h() {
    let mut buf: [u8; 4] = [0xDD, 0x21, 0x34, 0xE0];
    let n = patch_channel_locations(&mut buf, 0..4, &IgnoreSet::new(), 0x0E00).unwrap();
    assert_eq!(n, 1, "the `21 34 E0` tail must not be relocated a second time");
    assert_eq!(buf, [0xDD, 0x21, 0x34, 0xEE]);
}

#[test]
fn every_immediate_load_form_is_relocated() {
    let mut buf: Vec<u8> = Vec::new();
    for op in [0x01, 0x11, 0x21, 0x32, 0x3A, 0x22, 0x2A] {
        buf.extend_from_slice(&[op, 0x20, 0xE1, 0x00]);
    }
    let len = buf.len();
    let n = patch_channel_locations(&mut buf, 0..len, &IgnoreSet::new(), 0x0E00).unwrap();
    assert_eq!(n, 7);
    for chunk in buf.chunks(4) {
        assert_eq!(&chunk[1..3], &[0x20, 0xEF]);
    }
}

#[test]
fn ignored_offsets_keep_their_operands() {
    let mut buf = vec![0u8; 16];
    buf[2..5].copy_from_slice(&[0x21, 0x00, 0xE0]);
    buf[8..12].copy_from_slice(&[0xDD, 0x21, 0x10, 0xE2]);
    let ignore: IgnoreSet = [8usize].into_iter().collect();

    let n = patch_channel_locations(&mut buf, 0..16, &ignore, 0x0E00).unwrap();

    assert_eq!(&buf[3..5], &[0x00, 0xEE]);
    // Offset 8 is ignored; 9 still sees `21 10 E2` and is relocated as an
    // immediate load, exactly as the unguarded scan would.
    assert_eq!(n, 2);
    assert_eq!(&buf[8..10], &[0xDD, 0x21]);
    assert_eq!(&buf[10..12], &[0x10, 0xF0]);
}

#[test]
fn ignored_offset_alone_is_left_untouched() {
    let mut buf: [u8; 5] = [0x00, 0x2A, 0x44, 0xE1, 0x00];
    let ignore: IgnoreSet = [1usize].into_iter().collect();
    let n = patch_channel_locations(&mut buf, 0..5, &ignore, 0x0E00).unwrap();
    assert_eq!(n, 0);
    assert_eq!(buf, [0x00, 0x2A, 0x44, 0xE1, 0x00]);
}

#[test]
fn operand_may_extend_past_scan_range() {
    let mut buf: [u8; 4] = [0x00, 0x21, 0x00, 0xE0];
    patch_channel_locations(&mut buf, 0..2, &IgnoreSet::new(), 0x0E00).unwrap();
    assert_eq!(buf, [0x00, 0x21, 0x00, 0xEE]);
}

#[test]
fn relocate_undoes_with_negated_delta() {
    for addr in [0x0000u16, 0x00FF, 0xE034, 0xF100, 0xFFFF] {
        for delta in [1i32, 0x0E00, -0xC000, 0x7FFF, -1, 0x1_0000] {
            let mut buf: [u8; 4] = [0xAA, 0x00, 0x00, 0xBB];
            buf[1..3].copy_from_slice(&addr.to_le_bytes());
            let before = buf;
            relocate(&mut buf, 1, delta).unwrap();
            relocate(&mut buf, 1, -delta).unwrap();
            assert_eq!(buf, before, "addr={addr:04x} delta={delta}");
        }
    }
}

#[test]
fn relocate_wraps_mod_65536() {
    let mut buf: [u8; 2] = [0x00, 0xF0];
    relocate(&mut buf, 0, 0x2000).unwrap();
    assert_eq!(read_u16_le(&buf, 0).unwrap(), 0x1000);
}

#[test]
fn mapper_select_moves_to_konami5_register() {
    let mut buf: [u8; 3] = [0x32, 0x00, 0x60];
    assert_eq!(patch_mapper(&mut buf).unwrap(), 1);
    assert_eq!(buf, [0x32, 0x00, 0x70]);
}

#[test]
fn mapper_changes_each_site_once_by_0x10() {
    let mut buf: Vec<u8> = vec![
        0x32, 0x00, 0x60, //
        0x00, //
        0x32, 0x00, 0x80, //
        0x32, 0x00, 0xA0, //
        0x32, 0x00, 0x50, // not a Konami4 register
    ];
    let before = buf.clone();
    assert_eq!(patch_mapper(&mut buf).unwrap(), 3);
    assert_eq!(buf[2], before[2] + 0x10);
    assert_eq!(buf[6], before[6] + 0x10);
    assert_eq!(buf[9], before[9] + 0x10);
    assert_eq!(buf[12], 0x50);

    // Konami5 values are outside the select set, so a second pass finds
    // nothing; the pass must only ever run on a freshly composed image.
    let once = buf.clone();
    assert_eq!(patch_mapper(&mut buf).unwrap(), 0);
    assert_eq!(buf, once);
}

#[test]
fn psg_call_points_at_replacement() {
    let mut buf: [u8; 3] = [0xCD, 0x93, 0x00];
    assert_eq!(patch_calls(&mut buf, 0..3, 0x7EE8).unwrap(), 1);
    assert_eq!(buf, [0xCD, 0xE8, 0x7E]);
}

#[test]
fn psg_calls_outside_range_are_kept() {
    let mut buf: [u8; 6] = [0xCD, 0x93, 0x00, 0xCD, 0x93, 0x00];
    assert_eq!(patch_calls(&mut buf, 1..6, 0x7EE8).unwrap(), 1);
    assert_eq!(buf, [0xCD, 0x93, 0x00, 0xCD, 0xE8, 0x7E]);
}
