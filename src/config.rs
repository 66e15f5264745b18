//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AlphonicError, Result};

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const CONFIG_ENV: &str = "ALPHONIC_CONFIG";

/// Alphonic 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AlphonicConfig {
    /// 알파벳 정의 파일을 찾을 디렉토리 (비어 있으면 번들 알파벳 사용)
    #[serde(default)]
    pub alphabet_dirs: Vec<PathBuf>,
    /// 잘못된 알파벳 파일을 건너뛸지 여부
    #[serde(default = "default_skip_invalid")]
    pub skip_invalid: bool,
    /// 코드를 지정하지 않았을 때 사용할 알파벳
    #[serde(default = "default_alphabet")]
    pub default_alphabet: String,
    /// 변환할 수 없는 문자/단어를 그대로 남길지 여부
    #[serde(default)]
    pub return_missing: bool,
    /// 로케일 해석 시 같은 언어의 다른 지역으로 대체할지 여부
    #[serde(default)]
    pub sideshift: bool,
}

fn default_skip_invalid() -> bool {
    true
}

fn default_alphabet() -> String {
    "ALPHONIC-NATO".to_string()
}

impl Default for AlphonicConfig {
    fn default() -> Self {
        Self {
            alphabet_dirs: Vec::new(),
            skip_invalid: default_skip_invalid(),
            default_alphabet: default_alphabet(),
            return_missing: false,
            sideshift: false,
        }
    }
}

/// 설정 파일 경로: $ALPHONIC_CONFIG 또는 ~/.config/alphonic/config.json
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    home.join(".config").join("alphonic").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> AlphonicConfig {
    load_config_from(&config_path())
}

/// 지정한 경로에서 설정 로드
pub fn load_config_from(path: &Path) -> AlphonicConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용 ({}): {}", path.display(), e);
            AlphonicConfig::default()
        }),
        Err(_) => AlphonicConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &AlphonicConfig) -> Result<()> {
    save_config_to(config, &config_path())
}

/// 지정한 경로에 설정 저장 (상위 디렉토리 생성)
pub fn save_config_to(config: &AlphonicConfig, path: &Path) -> Result<()> {
    let io_error = |source| AlphonicError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).map_err(io_error)?;
    log::debug!("설정 저장: {}", path.display());
    Ok(())
}
