use std::fs;
use tempfile::tempdir;

use footage_tools::{convert, scanner};

#[test]
fn test_plan_skips_already_converted_clips() {
    let tmp = tempdir().unwrap();
    let raw_dir = tmp.path().join("shoot");
    let out_dir = tmp.path().join("shoot_s");
    fs::create_dir_all(&raw_dir).unwrap();
    fs::create_dir_all(&out_dir).unwrap();

    for id in ["00000", "00001", "00002"] {
        fs::write(raw_dir.join(format!("{}.MTS", id)), "raw").unwrap();
    }
    // 00001 was converted in an earlier run.
    fs::write(out_dir.join("00001.mp4"), "converted").unwrap();

    let raw_files = scanner::find_files_with_extension(&raw_dir, "MTS");
    let (jobs, skipped) = convert::plan(&raw_files, &out_dir, "mp4");

    assert_eq!(skipped, 1);
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|job| !job.output.exists()));
    assert!(jobs
        .iter()
        .all(|job| job.output.extension().unwrap() == "mp4"));
    assert!(!jobs
        .iter()
        .any(|job| job.input.file_name().unwrap() == "00001.MTS"));
}

#[test]
fn test_plan_preserves_base_filenames() {
    let tmp = tempdir().unwrap();
    let raw_dir = tmp.path().join("shoot");
    let out_dir = tmp.path().join("shoot_c");
    fs::create_dir_all(&raw_dir).unwrap();

    fs::write(raw_dir.join("00042.MTS"), "raw").unwrap();

    let raw_files = scanner::find_files_with_extension(&raw_dir, "MTS");
    let (jobs, skipped) = convert::plan(&raw_files, &out_dir, "mp4");

    assert_eq!(skipped, 0);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].output, out_dir.join("00042.mp4"));
}
