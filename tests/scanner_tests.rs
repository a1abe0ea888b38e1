use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use footage_tools::scanner;

#[test]
fn test_find_files_matches_extension_case_insensitively() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let nested = root.join("PRIVATE/AVCHD/BDMV/STREAM");
    fs::create_dir_all(&nested).unwrap();

    fs::write(nested.join("00000.MTS"), "v").unwrap();
    fs::write(root.join("00001.mts"), "v").unwrap();
    fs::write(root.join("notes.txt"), "t").unwrap();

    let files = scanner::find_files_with_extension(root, "MTS");
    assert_eq!(files.len(), 2);
    // Sorted by path
    assert!(files[0] < files[1]);
}

#[test]
fn test_pair_clips_keeps_unconverted_raw_files() {
    let raw = vec![
        PathBuf::from("/footage/00000.MTS"),
        PathBuf::from("/footage/00001.MTS"),
    ];
    let converted = vec![
        PathBuf::from("/footage_s/00000.mp4"),
        // 00002 has no raw counterpart and must be ignored
        PathBuf::from("/footage_s/00002.mp4"),
    ];

    let clips = scanner::pair_clips(&raw, &converted);
    assert_eq!(clips.len(), 2);

    assert_eq!(clips[0].id, "00000");
    assert_eq!(
        clips[0].converted_path,
        Some(PathBuf::from("/footage_s/00000.mp4"))
    );

    assert_eq!(clips[1].id, "00001");
    assert_eq!(clips[1].converted_path, None);
}

#[test]
fn test_derive_directories_from_converted_dir() {
    let (raw, converted) = scanner::derive_directories(&PathBuf::from("/videos/shoot_s"));
    assert_eq!(raw, PathBuf::from("/videos/shoot"));
    assert_eq!(converted, Some(PathBuf::from("/videos/shoot_s")));

    let (raw, converted) = scanner::derive_directories(&PathBuf::from("/videos/shoot_c"));
    assert_eq!(raw, PathBuf::from("/videos/shoot"));
    assert_eq!(converted, Some(PathBuf::from("/videos/shoot_c")));
}

#[test]
fn test_derive_directories_finds_existing_sibling() {
    let tmp = tempdir().unwrap();
    let raw_dir = tmp.path().join("shoot");
    let converted_dir = tmp.path().join("shoot_s");
    fs::create_dir_all(&raw_dir).unwrap();
    fs::create_dir_all(&converted_dir).unwrap();

    let (raw, converted) = scanner::derive_directories(&raw_dir);
    assert_eq!(raw, raw_dir);
    assert_eq!(converted, Some(converted_dir));
}

#[test]
fn test_derive_directories_without_converted_sibling() {
    let tmp = tempdir().unwrap();
    let raw_dir = tmp.path().join("shoot");
    fs::create_dir_all(&raw_dir).unwrap();

    let (raw, converted) = scanner::derive_directories(&raw_dir);
    assert_eq!(raw, raw_dir);
    assert_eq!(converted, None);
}
