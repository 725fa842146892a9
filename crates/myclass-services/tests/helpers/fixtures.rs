use std::io::Write;
use std::path::{Path, PathBuf};

use myclass_services::PickedFile;

/// Write a minimal PDF under `dir` and return a picked-file handle for it.
pub fn picked_pdf(dir: &Path, name: &str) -> PickedFile {
    let path = write_file(dir, name, b"%PDF-1.4\n%%EOF\n");
    PickedFile {
        name: name.to_string(),
        content_type: "application/pdf".to_string(),
        path,
    }
}

/// Write a small MP4-shaped file under `dir` and return a picked-file handle.
pub fn picked_mp4(dir: &Path, name: &str) -> PickedFile {
    // ftyp box header is enough for a fixture; nothing parses the payload.
    let mut data = vec![0x00, 0x00, 0x00, 0x18];
    data.extend_from_slice(b"ftypmp42");
    data.extend_from_slice(&[0u8; 64]);
    let path = write_file(dir, name, &data);
    PickedFile {
        name: name.to_string(),
        content_type: "video/mp4".to_string(),
        path,
    }
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture file");
    file.write_all(data).expect("write fixture file");
    path
}
