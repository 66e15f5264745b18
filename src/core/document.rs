//! 알파벳 정의 문서 (JSON) 디코딩 및 검증
//!
//! # 파일 형식
//! ```json
//! {
//!   "code": "NATO",
//!   "title": { "en": ["NATO Phonetic Alphabet", "ICAO Alphabet"] },
//!   "description": "...",
//!   "source": "https://...",
//!   "case_sensitive": false,
//!   "alphabets": { "en": { "A": "Alfa", "B": "Bravo" } }
//! }
//! ```
//!
//! `alphabets`는 로케일별 테이블 대신 `{ "A": "Alfa" }` 형태의 단일 테이블일 수도 있으며,
//! 이 경우 와일드카드 로케일(`*`)로 취급합니다.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::locale::{format_locale, LocaleTag, WILDCARD_LOCALE};
use crate::error::{AlphonicError, Result};

/// 로케일별 텍스트 항목: 문자열 하나 또는 문자열 목록 (목록이면 첫 항목 사용)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextEntry {
    One(String),
    Many(Vec<String>),
}

impl TextEntry {
    /// 대표 문자열
    pub fn first(&self) -> Option<&str> {
        match self {
            TextEntry::One(s) => Some(s.as_str()),
            TextEntry::Many(list) => list.first().map(String::as_str),
        }
    }
}

/// 제목/설명/출처 메타데이터: 단일 문자열 또는 로케일별 매핑
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Single(String),
    PerLocale(BTreeMap<String, TextEntry>),
}

impl LocalizedText {
    /// 해석된 로케일에 맞는 텍스트
    ///
    /// 단일 문자열이면 그대로, 매핑이면 해당 로케일 -> 와일드카드 -> 첫 항목 순으로 선택
    pub fn get(&self, locale: &str) -> Option<&str> {
        match self {
            LocalizedText::Single(s) => Some(s.as_str()),
            LocalizedText::PerLocale(map) => map
                .get(locale)
                .or_else(|| map.get(WILDCARD_LOCALE))
                .or_else(|| map.values().next())
                .and_then(TextEntry::first),
        }
    }

    /// 로케일 키를 정규화한 사본
    fn normalized(self) -> Self {
        match self {
            LocalizedText::Single(s) => LocalizedText::Single(s),
            LocalizedText::PerLocale(map) => LocalizedText::PerLocale(
                map.into_iter()
                    .map(|(locale, entry)| (format_locale(&locale), entry))
                    .collect(),
            ),
        }
    }
}

/// `alphabets` 필드: 로케일별 테이블 또는 단일 테이블
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SymbolTables {
    Localized(BTreeMap<String, BTreeMap<String, String>>),
    Flat(BTreeMap<String, String>),
}

/// 역직렬화 직후의 원본 문서
#[derive(Debug, Deserialize)]
struct RawDocument {
    code: String,
    #[serde(default)]
    title: Option<LocalizedText>,
    #[serde(default)]
    description: Option<LocalizedText>,
    #[serde(default)]
    source: Option<LocalizedText>,
    #[serde(default)]
    case_sensitive: bool,
    alphabets: SymbolTables,
}

/// 검증을 마친 알파벳 정의 문서
#[derive(Debug, Clone)]
pub struct AlphabetDocument {
    pub code: String,
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub source: Option<LocalizedText>,
    pub case_sensitive: bool,
    /// (정규화된 로케일, [(심볼, 표현)]) 목록
    pub tables: Vec<(String, Vec<(String, String)>)>,
}

impl AlphabetDocument {
    /// JSON 문자열에서 문서 디코딩 및 검증
    pub fn from_json(json_str: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| AlphonicError::invalid_alphabet_with(format!("JSON 파싱 오류: {}", e)))?;

        Self::from_json_value(value)
    }

    /// serde_json::Value에서 문서 생성
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawDocument = serde_json::from_value(value)
            .map_err(|e| AlphonicError::invalid_alphabet_with(format!("스키마 위반: {}", e)))?;

        let code = raw.code.trim().to_string();
        if code.is_empty() {
            return Err(AlphonicError::invalid_alphabet_with("빈 알파벳 코드"));
        }

        let localized = match raw.alphabets {
            SymbolTables::Localized(map) => map,
            SymbolTables::Flat(table) => {
                let mut map = BTreeMap::new();
                map.insert(WILDCARD_LOCALE.to_string(), table);
                map
            }
        };

        if localized.is_empty() {
            return Err(AlphonicError::invalid_alphabet_with("alphabets 필드가 비어 있습니다"));
        }

        let mut tables: Vec<(String, Vec<(String, String)>)> = Vec::with_capacity(localized.len());
        for (locale, table) in localized {
            let locale = validate_locale(&locale)?;
            if tables.iter().any(|(l, _)| *l == locale) {
                return Err(AlphonicError::invalid_alphabet_with(format!(
                    "중복된 로케일: {}",
                    locale
                )));
            }

            let mut pairs = Vec::with_capacity(table.len());
            for (symbol, representation) in table {
                validate_pair(&symbol, &representation)?;
                pairs.push((symbol, representation));
            }
            tables.push((locale, pairs));
        }

        Ok(Self {
            code,
            title: raw.title.map(LocalizedText::normalized),
            description: raw.description.map(LocalizedText::normalized),
            source: raw.source.map(LocalizedText::normalized),
            case_sensitive: raw.case_sensitive,
            tables,
        })
    }
}

/// 로케일 키 검증 후 정규화된 태그 반환
fn validate_locale(locale: &str) -> Result<String> {
    let formatted = format_locale(locale);
    if formatted == WILDCARD_LOCALE {
        return Ok(formatted);
    }
    LocaleTag::parse(&formatted).map_err(|_| {
        AlphonicError::invalid_alphabet_with(format!("잘못된 로케일 키: {}", locale))
    })?;
    Ok(formatted)
}

/// 심볼은 정확히 한 글자, 표현은 비어 있지 않은 문자열
fn validate_pair(symbol: &str, representation: &str) -> Result<()> {
    if symbol.chars().count() != 1 {
        return Err(AlphonicError::invalid_alphabet_with(format!(
            "심볼은 한 글자여야 합니다: {:?}",
            symbol
        )));
    }
    if representation.trim().is_empty() {
        return Err(AlphonicError::invalid_alphabet_with(format!(
            "빈 표현: {:?}",
            symbol
        )));
    }
    Ok(())
}
