//! 알파벳 로드/변환 에러 정의

use std::path::PathBuf;

/// Alphonic 에러
#[derive(Debug, thiserror::Error)]
pub enum AlphonicError {
    /// JSON 파싱 실패, 스키마 위반, 심볼/표현 충돌
    #[error("잘못된 알파벳{}", detail_suffix(.0))]
    InvalidAlphabet(Option<String>),

    /// 레지스트리에 없는 알파벳 코드
    #[error("알파벳을 찾을 수 없습니다: {0}")]
    AlphabetNotFound(String),

    /// 정확/상위/사이드시프트/와일드카드 어느 쪽으로도 해석되지 않는 로케일
    #[error("로케일을 찾을 수 없습니다: {0}")]
    LocaleNotFound(String),

    /// 형식이 잘못된 로케일 태그 (구성 요소 4개 이상 등)
    #[error("잘못된 로케일: {0}")]
    InvalidLocale(String),

    /// 잘못된 인자 (디렉토리가 아닌 경로 등)
    #[error("잘못된 인자: {0}")]
    InvalidArgument(String),

    /// 설정 직렬화 실패
    #[error("직렬화 실패: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 파일 읽기/쓰기 실패
    #[error("파일 입출력 오류 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(": {}", d),
        _ => String::new(),
    }
}

impl AlphonicError {
    /// 상세 정보 없는 InvalidAlphabet
    pub fn invalid_alphabet() -> Self {
        AlphonicError::InvalidAlphabet(None)
    }

    /// 상세 정보가 있는 InvalidAlphabet
    pub fn invalid_alphabet_with(detail: impl Into<String>) -> Self {
        AlphonicError::InvalidAlphabet(Some(detail.into()))
    }
}

pub type Result<T> = std::result::Result<T, AlphonicError>;
