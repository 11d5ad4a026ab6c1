//! Listing tests against real tool output.
//!
//! The line parsers have unit tests of their own; these check that the
//! parsed sets come out right when fed by the actual `tar tf` and
//! `unzip -l` table formats.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use unz::{list_top_level, Archive};

fn have(tool: &str) -> bool {
    which::which(tool).is_ok()
}

fn create_tar_gz(path: &Path, names: &[&str]) {
    let file = fs::File::create(path).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for name in names {
        let mut header = tar::Header::new_gnu();
        header.set_path(name).unwrap();
        if name.ends_with('/') {
            header.set_entry_type(tar::EntryType::Directory);
            header.set_size(0);
            header.set_mode(0o755);
        } else {
            header.set_size(4);
            header.set_mode(0o644);
        }
        header.set_cksum();
        if name.ends_with('/') {
            builder.append(&header, &[][..]).unwrap();
        } else {
            builder.append(&header, &b"data"[..]).unwrap();
        }
    }

    builder.into_inner().unwrap().finish().unwrap();
}

#[test]
fn test_list_tar_single_folder() {
    if !have("tar") || !have("gzip") {
        eprintln!("skipping: tar/gzip not installed");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("project.tar.gz");
    create_tar_gz(
        &path,
        &["project/", "project/readme.txt", "project/src/main.rs"],
    );

    let archive = Archive::open(&path).unwrap();
    let top_level = list_top_level(&archive).unwrap();

    assert_eq!(top_level.len(), 1);
    assert!(top_level.contains("project/"));
}

#[test]
fn test_list_tar_multiple_entries() {
    if !have("tar") || !have("gzip") {
        eprintln!("skipping: tar/gzip not installed");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("stuff.tar.gz");
    create_tar_gz(&path, &["a.txt", "b.txt", "sub/", "sub/c.txt"]);

    let archive = Archive::open(&path).unwrap();
    let top_level = list_top_level(&archive).unwrap();

    let entries: Vec<&str> = top_level.iter().map(|s| s.as_str()).collect();
    assert_eq!(entries, vec!["a.txt", "b.txt", "sub/"]);
}

#[test]
fn test_list_zip() {
    if !have("unzip") {
        eprintln!("skipping: unzip not installed");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("archive.zip");
    let file = fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options: zip::write::FileOptions<()> = zip::write::FileOptions::default();
    zip.add_directory("data", options).unwrap();
    zip.start_file("data/hello.txt", options).unwrap();
    zip.write_all(b"hello").unwrap();
    zip.start_file("top.txt", options).unwrap();
    zip.write_all(b"top").unwrap();
    zip.finish().unwrap();

    let archive = Archive::open(&path).unwrap();
    let top_level = list_top_level(&archive).unwrap();

    let entries: Vec<&str> = top_level.iter().map(|s| s.as_str()).collect();
    assert_eq!(entries, vec!["data/", "top.txt"]);
}

#[test]
fn test_list_corrupt_archive_is_empty() {
    if !have("tar") {
        eprintln!("skipping: tar not installed");
        return;
    }

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("bad.tar.gz");
    fs::write(&path, b"garbage").unwrap();

    let archive = Archive::open(&path).unwrap();
    let top_level = list_top_level(&archive).unwrap();

    assert!(top_level.is_empty());
}
