//! Tests for atomic file copy operations

use mirra::executor::copy_file_atomic;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn set_file_mtime(path: &Path, mtime: SystemTime) {
    let filetime_mtime = filetime::FileTime::from_system_time(mtime);
    filetime::set_file_mtime(path, filetime_mtime).expect("Failed to set mtime");
}

#[test]
fn test_copy_basic_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    let content = b"Hello, mirra! This is a test file.";
    fs::write(&src_path, content).expect("Failed to create source file");

    let dest_path = root.join("dest.txt");
    let bytes_copied =
        copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    assert_eq!(bytes_copied, content.len() as u64);
    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        content
    );
}

#[test]
fn test_copy_creates_parent_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    fs::write(&src_path, b"test content").expect("Failed to create source file");

    let dest_path = root.join("a/b/c/dest.txt");
    copy_file_atomic(&src_path, &dest_path)
        .expect("copy_file_atomic should create parent directories");

    assert!(dest_path.exists());
    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        b"test content"
    );
}

#[test]
fn test_copy_preserves_mtime() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    fs::write(&src_path, b"test content").expect("Failed to create source file");

    let mtime = SystemTime::now() - Duration::from_secs(3600);
    set_file_mtime(&src_path, mtime);

    let dest_path = root.join("dest.txt");
    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    let src_mtime = fs::metadata(&src_path)
        .expect("Failed to read src metadata")
        .modified()
        .expect("Failed to get src mtime");
    let dest_mtime = fs::metadata(&dest_path)
        .expect("Failed to read dest metadata")
        .modified()
        .expect("Failed to get dest mtime");

    let diff = if src_mtime > dest_mtime {
        src_mtime.duration_since(dest_mtime).unwrap()
    } else {
        dest_mtime.duration_since(src_mtime).unwrap()
    };

    assert!(
        diff < Duration::from_secs(2),
        "mtime should be preserved (diff: {:?})",
        diff
    );
}

#[test]
#[cfg(unix)]
fn test_copy_preserves_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("script.sh");
    fs::write(&src_path, b"#!/bin/sh\necho hi\n").expect("Failed to create source file");
    fs::set_permissions(&src_path, fs::Permissions::from_mode(0o755))
        .expect("Failed to set source permissions");

    let dest_path = root.join("dest.sh");
    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    let dest_mode = fs::metadata(&dest_path)
        .expect("Failed to read dest metadata")
        .permissions()
        .mode();
    assert_eq!(dest_mode & 0o777, 0o755);
}

#[test]
fn test_copy_overwrites_existing_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    fs::write(&src_path, b"fresh content").expect("Failed to create source file");

    let dest_path = root.join("dest.txt");
    fs::write(&dest_path, b"stale content that is longer").expect("Failed to create dest file");

    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        b"fresh content"
    );
}

#[test]
fn test_copy_zero_byte_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("empty.txt");
    fs::write(&src_path, b"").expect("Failed to create source file");

    let dest_path = root.join("dest.txt");
    let bytes_copied =
        copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    assert_eq!(bytes_copied, 0);
    assert!(dest_path.exists());
    assert_eq!(
        fs::metadata(&dest_path)
            .expect("Failed to read dest metadata")
            .len(),
        0
    );
}

#[test]
fn test_copy_leaves_no_staging_files_behind() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.txt");
    fs::write(&src_path, b"payload").expect("Failed to create source file");

    let dest_dir = root.join("out");
    copy_file_atomic(&src_path, &dest_dir.join("dest.txt"))
        .expect("copy_file_atomic should succeed");

    let names: Vec<String> = fs::read_dir(&dest_dir)
        .expect("Failed to list dest dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["dest.txt".to_string()]);
}

#[test]
fn test_failed_copy_cleans_up_staging_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let dest_dir = root.join("out");
    fs::create_dir(&dest_dir).expect("Failed to create dest dir");

    let result = copy_file_atomic(&root.join("does-not-exist.txt"), &dest_dir.join("dest.txt"));
    assert!(result.is_err(), "copying a missing source should fail");

    let leftovers = fs::read_dir(&dest_dir)
        .expect("Failed to list dest dir")
        .count();
    assert_eq!(leftovers, 0, "a failed copy must not leave staging files");
}
