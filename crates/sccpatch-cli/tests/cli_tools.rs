// crates/sccpatch-cli/tests/cli_tools.rs

use std::fs;
use std::process::Command;

use sccpatch_core::fragment::format;
use sccpatch_core::Profile;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sccpatch"))
}

#[test]
fn profile_dump_is_the_builtin_profile() {
    let out = bin().args(["profile", "dump"]).output().expect("spawn");
    assert!(out.status.success());
    let p: Profile = toml::from_str(&String::from_utf8_lossy(&out.stdout)).unwrap();
    assert_eq!(p, Profile::default());
}

#[test]
fn fragment_pack_then_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("vkiller_patch1a3f0.bin");
    let spf = dir.path().join("kick.spf");
    fs::write(&raw, [0x3Eu8, 0x90, 0xC9]).unwrap();

    let out = bin()
        .args(["fragment", "pack", "--in", raw.to_str().unwrap(), "--out", spf.to_str().unwrap()])
        .output()
        .expect("spawn");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let frag = format::decode("kick.spf", &fs::read(&spf).unwrap()).unwrap();
    assert_eq!(frag.offset, 0x1a3f0);
    assert_eq!(frag.bytes, vec![0x3E, 0x90, 0xC9]);

    let out = bin()
        .args(["fragment", "inspect", "--in", spf.to_str().unwrap()])
        .output()
        .expect("spawn");
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("offset   = 0x1a3f0"), "{text}");
    assert!(text.contains("len      = 3"), "{text}");
}

#[test]
fn scan_lists_mapper_writes() {
    let dir = tempfile::tempdir().unwrap();
    let img = dir.path().join("img.rom");
    fs::write(&img, [0x00u8, 0x32, 0x00, 0xA0, 0x32, 0x00, 0x60]).unwrap();

    let out = bin()
        .args(["scan", "--in", img.to_str().unwrap(), "--set", "mapper"])
        .output()
        .expect("spawn");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "{text}");
    assert!(lines[0].starts_with("0x00001 mapper-select"));
    assert!(lines[0].ends_with("= a0h"));
    assert!(lines[1].starts_with("0x00004 mapper-select"));
}

#[test]
fn scan_channel_range_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    let img = dir.path().join("img.rom");
    fs::write(&img, [0xDDu8, 0x21, 0x34, 0xE0, 0x00]).unwrap();

    let out = bin()
        .args(["scan", "--in", img.to_str().unwrap(), "--start", "0", "--end", "0x5"])
        .output()
        .expect("spawn");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("0x00000 indexed-load"), "{text}");
    assert!(text.contains("= e034h"), "{text}");
}
