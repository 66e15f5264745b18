//! 알파벳 정의 파일 탐색
//!
//! 디렉토리를 직접 순회하여 `*.json` 파일을 찾습니다 (glob 미사용).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AlphonicError, Result};

/// 번들 알파벳 (파일 이름, JSON)
pub(crate) const BUNDLED_ALPHABETS: [(&str, &str); 3] = [
    ("din5009.json", include_str!("../../alphabets/din5009.json")),
    ("lapd.json", include_str!("../../alphabets/lapd.json")),
    ("nato.json", include_str!("../../alphabets/nato.json")),
];

fn is_json_file(path: &Path) -> bool {
    path.is_file() && path.extension().map(|ext| ext == "json").unwrap_or(false)
}

/// 디렉토리 안의 `*.json` 파일 목록 (이름순 정렬)
///
/// 디렉토리가 아니면 `InvalidArgument`
pub fn alphabet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AlphonicError::InvalidArgument(format!(
            "디렉토리가 아닙니다: {}",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|source| AlphonicError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AlphonicError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if is_json_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    log::trace!("{}: 알파벳 파일 {}개", dir.display(), files.len());
    Ok(files)
}
