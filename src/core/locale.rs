//! 로케일 태그 정규화 및 분해
//!
//! BCP-47 유사 규칙: 언어는 소문자, 지역은 대문자, 문자 체계(script)는 첫 글자만 대문자.
//! `eN-Us` -> `en-US`, `Uz-cyRl-uZ` -> `uz-Cyrl-UZ`

use crate::error::{AlphonicError, Result};

/// 와일드카드(기본) 로케일
pub const WILDCARD_LOCALE: &str = "*";

/// 로케일 태그의 최대 구성 요소 수 (언어-문자체계-지역)
const MAX_LOCALE_PARTS: usize = 3;

/// 4글자 알파벳 구성 요소는 문자 체계(script)
fn is_script_subtag(part: &str) -> bool {
    part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic())
}

/// 첫 글자만 대문자
fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// 로케일 태그 대소문자 정규화
///
/// # Examples
/// ```
/// use alphonic::format_locale;
/// assert_eq!(format_locale("eN"), "en");
/// assert_eq!(format_locale("eN-Us"), "en-US");
/// assert_eq!(format_locale("Uz-cyRl-uZ"), "uz-Cyrl-UZ");
/// ```
pub fn format_locale(tag: &str) -> String {
    tag.trim()
        .split('-')
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                part.to_lowercase()
            } else if is_script_subtag(part) {
                title_case(part)
            } else {
                part.to_uppercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// 분해된 로케일 태그
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    /// 언어 (en, uz, ...)
    pub language: String,
    /// 문자 체계 (Cyrl, Latn, ...)
    pub script: Option<String>,
    /// 지역 (US, GB, ...)
    pub territory: Option<String>,
    /// 변형 (1996, ...)
    pub variant: Option<String>,
}

impl LocaleTag {
    /// 로케일 태그를 언어/문자체계/지역/변형으로 분해
    ///
    /// 언어 뒤의 구성 요소는 순서와 관계없이 4글자 알파벳이면 문자 체계,
    /// 나머지는 지역, 그다음은 변형으로 분류합니다 (`sr-RS-Latn`, `de-CH-1996`).
    /// 구성 요소가 4개 이상이거나 비어 있는 구성 요소가 있으면 `InvalidLocale`
    pub fn parse(tag: &str) -> Result<Self> {
        let formatted = format_locale(tag);
        let parts: Vec<&str> = formatted.split('-').collect();

        if parts.len() > MAX_LOCALE_PARTS || parts.iter().any(|p| p.is_empty()) {
            return Err(AlphonicError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut territory = None;
        let mut variant = None;
        for part in &parts[1..] {
            let slot = if is_script_subtag(part) && script.is_none() {
                &mut script
            } else if territory.is_none() {
                &mut territory
            } else {
                &mut variant
            };
            *slot = Some(part.to_string());
        }

        Ok(Self {
            language: parts[0].to_string(),
            script,
            territory,
            variant,
        })
    }

    /// 지역 또는 문자 체계가 붙은 태그인지 (en-US, uz-Cyrl)
    pub fn is_qualified(&self) -> bool {
        self.script.is_some() || self.territory.is_some() || self.variant.is_some()
    }

    /// 와일드카드 로케일인지
    pub fn is_wildcard(&self) -> bool {
        self.language == WILDCARD_LOCALE
    }
}

impl std::fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(ref script) = self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(ref territory) = self.territory {
            write!(f, "-{}", territory)?;
        }
        if let Some(ref variant) = self.variant {
            write!(f, "-{}", variant)?;
        }
        Ok(())
    }
}
