use sccpatch_core::fragment::{format, merge_fragments, FragmentNaming};
use sccpatch_core::{Fragment, PatchError, RomImage};

#[test]
fn named_fragment_lands_at_decoded_offset() {
    let naming = FragmentNaming::new("vkiller_patch", ".bin", 6);
    let offset = naming.decode_offset("vkiller_patch01a3f0.bin").unwrap();
    assert_eq!(offset, 0x1a3f0);

    let mut rom = RomImage::from_vec(vec![0x55; 0x1a400]);
    let frag = Fragment::new("vkiller_patch01a3f0.bin", offset, vec![1, 2, 3, 4]);
    merge_fragments(&mut rom, &[frag]).unwrap();

    let bytes = rom.as_slice();
    assert_eq!(&bytes[0x1a3f0..0x1a3f4], &[1, 2, 3, 4]);
    assert!(bytes[..0x1a3f0].iter().all(|&b| b == 0x55));
    assert!(bytes[0x1a3f4..].iter().all(|&b| b == 0x55));
}

#[test]
fn default_width_matches_assembler_output() {
    let naming = FragmentNaming::new("vkiller_patch", ".bin", 5);
    assert_eq!(naming.decode_offset("vkiller_patch1a3f0.bin").unwrap(), 0x1a3f0);
}

#[test]
fn malformed_offset_is_a_decoding_error() {
    let naming = FragmentNaming::new("vkiller_patch", ".bin", 5);
    let err = naming.decode_offset("vkiller_patchzz3f0.bin").unwrap_err();
    assert!(matches!(err, PatchError::Decoding(_)));
}

#[test]
fn structured_fragment_merges_like_named_one() {
    let enc = format::encode(&Fragment::new("x", 4, vec![0xC9]));
    assert!(format::is_structured(&enc));
    let frag = format::decode("x.spf", &enc).unwrap();

    let mut rom = RomImage::from_vec(vec![0u8; 8]);
    merge_fragments(&mut rom, &[frag]).unwrap();
    assert_eq!(rom.as_slice(), &[0, 0, 0, 0, 0xC9, 0, 0, 0]);
}

#[test]
fn structured_fragment_with_wrong_len_is_rejected() {
    let mut enc = format::encode(&Fragment::new("x", 0, vec![1, 2]));
    // Bump len without fixing the payload, then re-seal the crc.
    enc[8] = 3;
    let body = enc.len() - 4;
    let mut h = crc32fast::Hasher::new();
    h.update(&enc[..body]);
    let crc = h.finalize();
    enc[body..].copy_from_slice(&crc.to_le_bytes());

    let err = format::decode("x", &enc).unwrap_err();
    assert!(matches!(err, PatchError::Fragment(_)));
}
