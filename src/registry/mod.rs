//! 알파벳 레지스트리
//!
//! 여러 알파벳을 코드(대문자)로 보관하고 변환 요청을 해당 알파벳에 위임합니다.
//!
//! # 사용 예시
//!
//! ```
//! use alphonic::Alphonic;
//!
//! let mut alphonic = Alphonic::new();
//! alphonic.load_default_alphabets().unwrap();
//! assert_eq!(
//!     alphonic.phonetify("nato", "alphonic-nato", None, false).unwrap(),
//!     "November Alfa Tango Oscar"
//! );
//! ```

mod loader;

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::AlphonicConfig;
use crate::core::alphabet::Alphabet;
use crate::error::{AlphonicError, Result};

pub use loader::alphabet_files;

/// 알파벳 레지스트리
#[derive(Debug, Default)]
pub struct Alphonic {
    /// 코드 -> 알파벳
    alphabets: BTreeMap<String, Alphabet>,
}

impl Alphonic {
    /// 빈 레지스트리 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정에 따라 알파벳을 로드한 레지스트리 생성
    ///
    /// 디렉토리가 지정되지 않았으면 번들 알파벳을 사용합니다.
    pub fn from_config(config: &AlphonicConfig) -> Result<Self> {
        let mut alphonic = Self::new();
        if config.alphabet_dirs.is_empty() {
            alphonic.load_default_alphabets()?;
        } else {
            alphonic.load_alphabets(&config.alphabet_dirs, config.skip_invalid)?;
        }
        Ok(alphonic)
    }

    /// 번들 알파벳 (NATO, LAPD, DIN 5009) 로드
    pub fn load_default_alphabets(&mut self) -> Result<usize> {
        let mut staged = Vec::with_capacity(loader::BUNDLED_ALPHABETS.len());
        for (name, json) in loader::BUNDLED_ALPHABETS {
            let alphabet = Alphabet::from_json(json).map_err(|e| with_file_detail(e, name))?;
            staged.push(alphabet);
        }
        Ok(self.register_all(staged))
    }

    /// 디렉토리들의 `*.json` 파일을 알파벳으로 로드
    ///
    /// 잘못된 알파벳 파일은 `skip_invalid`면 건너뛰고, 아니면 파일 경로를 담은
    /// `InvalidAlphabet`으로 전체 작업이 실패합니다. 실패하면 아무것도 등록되지 않습니다.
    /// 로드한 알파벳 수를 반환합니다.
    pub fn load_alphabets<I, P>(&mut self, directories: I, skip_invalid: bool) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut staged = Vec::new();

        for dir in directories {
            for file in alphabet_files(dir.as_ref())? {
                match Alphabet::from_file(&file) {
                    Ok(alphabet) => staged.push(alphabet),
                    Err(e @ AlphonicError::InvalidAlphabet(_)) => {
                        if skip_invalid {
                            log::warn!("잘못된 알파벳 파일 건너뜀: {} ({})", file.display(), e);
                            continue;
                        }
                        return Err(with_file_detail(e, &file.display().to_string()));
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(self.register_all(staged))
    }

    fn register_all(&mut self, alphabets: Vec<Alphabet>) -> usize {
        let count = alphabets.len();
        for alphabet in alphabets {
            log::debug!("알파벳 등록: {}", alphabet.code());
            self.add_alphabet_from_object(alphabet);
        }
        count
    }

    /// 알파벳 등록 (같은 코드가 있으면 교체하고 이전 알파벳 반환)
    pub fn add_alphabet_from_object(&mut self, alphabet: Alphabet) -> Option<Alphabet> {
        self.alphabets.insert(alphabet.code().to_string(), alphabet)
    }

    /// JSON 문자열로 알파벳 등록
    pub fn add_alphabet_from_json(&mut self, json_str: &str) -> Result<()> {
        self.add_alphabet_from_object(Alphabet::from_json(json_str)?);
        Ok(())
    }

    /// JSON 파일로 알파벳 등록
    pub fn add_alphabet_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.add_alphabet_from_object(Alphabet::from_file(path)?);
        Ok(())
    }

    /// 코드로 알파벳 조회 (대소문자 무시)
    pub fn alphabet(&self, code: &str) -> Result<&Alphabet> {
        let code = code.to_uppercase();
        self.alphabets
            .get(&code)
            .ok_or(AlphonicError::AlphabetNotFound(code))
    }

    /// 직접 수정용 알파벳 조회 (대소문자 무시)
    pub fn alphabet_mut(&mut self, code: &str) -> Result<&mut Alphabet> {
        let code = code.to_uppercase();
        self.alphabets
            .get_mut(&code)
            .ok_or(AlphonicError::AlphabetNotFound(code))
    }

    /// 등록된 모든 알파벳
    pub fn get_alphabets(&self) -> &BTreeMap<String, Alphabet> {
        &self.alphabets
    }

    /// 등록된 알파벳 코드 (정렬)
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.alphabets.keys().map(String::as_str)
    }

    pub fn get_title(&self, code: &str, locale: Option<&str>) -> Result<Option<&str>> {
        self.alphabet(code)?.title(locale)
    }

    pub fn get_description(&self, code: &str, locale: Option<&str>) -> Result<Option<&str>> {
        self.alphabet(code)?.description(locale)
    }

    pub fn get_source(&self, code: &str, locale: Option<&str>) -> Result<Option<&str>> {
        self.alphabet(code)?.source(locale)
    }

    /// 지정한 알파벳으로 변환
    pub fn phonetify(
        &self,
        text: &str,
        code: &str,
        locale: Option<&str>,
        return_missing: bool,
    ) -> Result<String> {
        self.alphabet(code)?.phonetify(text, locale, return_missing)
    }

    /// 지정한 알파벳으로 역변환
    pub fn unphonetify(
        &self,
        text: &str,
        code: &str,
        locale: Option<&str>,
        return_missing: bool,
    ) -> Result<String> {
        self.alphabet(code)?.unphonetify(text, locale, return_missing)
    }

    /// 알파벳에서 요청된 로케일 해석
    ///
    /// 빈 요청은 `None` (기본 로케일 사용). 자세한 규칙은 [`Alphabet::resolve_locale`] 참고.
    pub fn locale_search(
        &self,
        code: &str,
        requested: &str,
        sideshift: bool,
    ) -> Result<Option<String>> {
        self.alphabet(code)?.resolve_locale(requested, sideshift)
    }
}

/// InvalidAlphabet 상세 정보에 파일 이름을 붙임
fn with_file_detail(error: AlphonicError, file: &str) -> AlphonicError {
    match error {
        AlphonicError::InvalidAlphabet(Some(detail)) => {
            AlphonicError::invalid_alphabet_with(format!("{} ({})", file, detail))
        }
        AlphonicError::InvalidAlphabet(None) => AlphonicError::invalid_alphabet_with(file),
        other => other,
    }
}
