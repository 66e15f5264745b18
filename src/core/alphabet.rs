//! 음성 알파벳 하나: 심볼 테이블(로케일별) 관리와 변환/역변환
//!
//! "NATO" -> "November Alfa Tango Oscar" 와 그 역방향을 데이터(JSON)로 정의된 테이블만으로 수행합니다.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use super::document::{AlphabetDocument, LocalizedText};
use super::locale::{format_locale, LocaleTag, WILDCARD_LOCALE};
use super::symbol_table::{fold_case, reverse_key, SymbolTable};
use super::whitespace::{clean_whitespace, map_lines, normalize_representation};
use crate::error::{AlphonicError, Result};

/// 대소문자 비구분 역방향 테이블 캐시
///
/// 알파벳이 변경되면 `dirty`가 켜지고, 다음 조회 때 다시 만들어집니다.
#[derive(Debug)]
struct FoldedReverseCache {
    dirty: bool,
    tables: HashMap<String, HashMap<String, String>>,
}

impl FoldedReverseCache {
    fn new() -> Self {
        Self {
            dirty: true,
            tables: HashMap::new(),
        }
    }
}

/// 음성 알파벳
#[derive(Debug)]
pub struct Alphabet {
    /// 레지스트리 참조용 코드 (대문자)
    code: String,
    title: Option<LocalizedText>,
    description: Option<LocalizedText>,
    source: Option<LocalizedText>,
    /// false면 심볼/표현 조회를 모두 대문자로 접음
    case_sensitive: bool,
    /// 등록 순서대로의 로케일 목록
    locales: Vec<String>,
    /// 로케일 -> 심볼 테이블
    tables: HashMap<String, SymbolTable>,
    folded: RwLock<FoldedReverseCache>,
}

impl Alphabet {
    /// 검증된 문서로부터 알파벳 생성
    pub fn from_document(document: AlphabetDocument) -> Result<Self> {
        let mut alphabet = Self {
            code: document.code.to_uppercase(),
            title: document.title,
            description: document.description,
            source: document.source,
            case_sensitive: document.case_sensitive,
            locales: Vec::new(),
            tables: HashMap::new(),
            folded: RwLock::new(FoldedReverseCache::new()),
        };

        for (locale, pairs) in document.tables {
            alphabet.add_symbols(pairs, &[locale.as_str()], true)?;
        }

        log::debug!(
            "알파벳 로드: {} (로케일 {:?})",
            alphabet.code,
            alphabet.locales
        );
        Ok(alphabet)
    }

    /// JSON 문자열에서 알파벳 생성
    pub fn from_json(json_str: &str) -> Result<Self> {
        Self::from_document(AlphabetDocument::from_json(json_str)?)
    }

    /// serde_json::Value에서 알파벳 생성
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Self::from_document(AlphabetDocument::from_json_value(value)?)
    }

    /// JSON 파일에서 알파벳 생성
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AlphonicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    // --- 메타데이터 ---

    pub fn code(&self) -> &str {
        &self.code
    }

    /// 제목 (로케일별 매핑이면 해석된 로케일의 항목, 목록이면 첫 항목)
    pub fn title(&self, locale: Option<&str>) -> Result<Option<&str>> {
        self.localized(self.title.as_ref(), locale)
    }

    pub fn description(&self, locale: Option<&str>) -> Result<Option<&str>> {
        self.localized(self.description.as_ref(), locale)
    }

    pub fn source(&self, locale: Option<&str>) -> Result<Option<&str>> {
        self.localized(self.source.as_ref(), locale)
    }

    fn localized<'a>(
        &self,
        text: Option<&'a LocalizedText>,
        locale: Option<&str>,
    ) -> Result<Option<&'a str>> {
        let resolved = self.locale_or_default(locale)?;
        Ok(text.and_then(|t| t.get(&resolved)))
    }

    // --- 대소문자 ---

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// 대소문자 구분 여부 변경
    ///
    /// 기존 심볼 키는 다시 접지 않으므로, 변경 후에는 보통 심볼을 새로 추가해야 합니다.
    pub fn set_case_sensitivity(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
        self.mark_dirty();
    }

    /// 대소문자 설정에 맞춘 조회 키 (한 글자는 한 글자로 유지)
    fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(fold_case(text))
        }
    }

    fn fold_eq(&self, a: &str, b: &str) -> bool {
        self.fold(a) == self.fold(b)
    }

    fn mark_dirty(&mut self) {
        let cache = self
            .folded
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.dirty = true;
    }

    // --- 로케일 ---

    /// 알파벳에 정의된 로케일 (등록 순서)
    pub fn get_locales(&self) -> &[String] {
        &self.locales
    }

    /// 기본 로케일: 와일드카드가 있으면 `*`, 없으면 첫 로케일
    pub fn get_default_locale(&self) -> &str {
        if self.has_locale(WILDCARD_LOCALE) {
            return WILDCARD_LOCALE;
        }
        self.locales
            .first()
            .map(String::as_str)
            .unwrap_or(WILDCARD_LOCALE)
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// 로케일의 심볼 수
    pub fn symbol_count(&self, locale: Option<&str>) -> Result<usize> {
        let (_, table) = self.table_for(locale)?;
        Ok(table.len())
    }

    /// 요청된 로케일을 이 알파벳의 로케일로 해석
    ///
    /// 1. 빈 요청 -> `None` (기본 로케일 사용)
    /// 2. 정규화 후 정확히 일치
    /// 3. 지역/문자체계가 붙은 태그: `sideshift`면 같은 언어의 다른 로케일, 아니면 언어만의 로케일
    /// 4. 와일드카드 `*`
    /// 5. 그 외 `LocaleNotFound`
    ///
    /// 구성 요소가 4개 이상인 태그는 `InvalidLocale`
    pub fn resolve_locale(&self, requested: &str, sideshift: bool) -> Result<Option<String>> {
        if requested.trim().is_empty() {
            return Ok(None);
        }

        let formatted = format_locale(requested);
        if self.has_locale(&formatted) {
            return Ok(Some(formatted));
        }

        let tag = LocaleTag::parse(&formatted)?;
        if tag.is_qualified() {
            if sideshift {
                let mut candidates: Vec<&String> = self.locales.iter().collect();
                candidates.sort();
                let shifted = candidates.into_iter().find(|locale| {
                    LocaleTag::parse(locale)
                        .map(|other| !other.is_wildcard() && other.language == tag.language)
                        .unwrap_or(false)
                });
                if let Some(locale) = shifted {
                    log::trace!("로케일 사이드시프트: {} -> {}", formatted, locale);
                    return Ok(Some(format_locale(locale)));
                }
            } else if self.has_locale(&tag.language) {
                return Ok(Some(tag.language));
            }
        }

        if self.has_locale(WILDCARD_LOCALE) {
            return Ok(Some(WILDCARD_LOCALE.to_string()));
        }

        Err(AlphonicError::LocaleNotFound(requested.to_string()))
    }

    /// 로케일 인자 해석 (None/빈 문자열이면 기본 로케일)
    fn locale_or_default(&self, locale: Option<&str>) -> Result<String> {
        let resolved = match locale {
            Some(requested) => self.resolve_locale(requested, false)?,
            None => None,
        };
        Ok(resolved.unwrap_or_else(|| self.get_default_locale().to_string()))
    }

    fn table_for(&self, locale: Option<&str>) -> Result<(String, &SymbolTable)> {
        let resolved = self.locale_or_default(locale)?;
        let table = self
            .tables
            .get(&resolved)
            .ok_or_else(|| AlphonicError::LocaleNotFound(resolved.clone()))?;
        Ok((resolved, table))
    }

    /// 심볼 추가 대상 로케일 목록 (빈 목록/빈 문자열이면 기본 로케일)
    fn target_locales(&self, locales: &[&str]) -> Result<Vec<String>> {
        let mut targets: Vec<String> = Vec::with_capacity(locales.len().max(1));
        for locale in locales {
            let target = if locale.trim().is_empty() {
                self.get_default_locale().to_string()
            } else {
                let formatted = format_locale(locale);
                if formatted != WILDCARD_LOCALE {
                    LocaleTag::parse(&formatted)?;
                }
                formatted
            };
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        if targets.is_empty() {
            targets.push(self.get_default_locale().to_string());
        }
        Ok(targets)
    }

    // --- 심볼 추가 ---

    /// 심볼 하나를 스테이징 테이블에 적용
    ///
    /// `overwrite`가 false이고 이미 있는 심볼이면 `Ok(false)`.
    /// 표현이 다른 심볼에 이미 묶여 있으면 `InvalidAlphabet`.
    fn stage_symbol(
        &self,
        table: &mut SymbolTable,
        locale: &str,
        symbol: &str,
        representation: &str,
        overwrite: bool,
    ) -> Result<bool> {
        let symbol = self.fold(symbol).into_owned();
        if !overwrite && table.contains_symbol(&symbol) {
            return Ok(false);
        }

        let representation = normalize_representation(representation);
        if symbol.is_empty() || representation.is_empty() {
            return Err(AlphonicError::invalid_alphabet_with(format!(
                "빈 심볼 또는 표현: {:?} -> {:?}",
                symbol, representation
            )));
        }

        let key = reverse_key(&representation);
        if let Some(bound) = table.bound_symbol(&key, self.case_sensitive) {
            if !self.fold_eq(bound, &symbol) {
                log::debug!(
                    "표현 충돌 ({}): {:?}는 이미 {:?}에 할당됨",
                    locale,
                    representation,
                    bound
                );
                return Err(AlphonicError::invalid_alphabet_with(format!(
                    "표현 충돌 ({}): {:?}는 이미 {:?}에 할당되어 있습니다",
                    locale, representation, bound
                )));
            }
        }

        table.insert(symbol, representation);
        Ok(true)
    }

    /// 스테이징된 테이블을 반영 (모든 로케일 검증을 통과한 후에만 호출)
    fn commit(&mut self, staged: Vec<(String, SymbolTable)>) {
        for (locale, table) in staged {
            if !self.has_locale(&locale) {
                self.locales.push(locale.clone());
            }
            self.tables.insert(locale, table);
        }
        self.mark_dirty();
    }

    fn staging_table(&self, locale: &str) -> SymbolTable {
        self.tables.get(locale).cloned().unwrap_or_else(SymbolTable::new)
    }

    /// 심볼 하나 추가
    ///
    /// 여러 로케일에 한 번에 추가할 수 있으며, 전부 성공하거나 전부 반영되지 않습니다.
    /// 빈 로케일 목록은 기본 로케일을 의미합니다.
    ///
    /// - `overwrite`가 false이고 대상 로케일 중 하나라도 이미 심볼이 있으면 `Ok(false)` (변경 없음)
    /// - 표현이 다른 심볼에 이미 할당되어 있으면 `InvalidAlphabet` (변경 없음)
    pub fn add_symbol(
        &mut self,
        symbol: &str,
        representation: &str,
        locales: &[&str],
        overwrite: bool,
    ) -> Result<bool> {
        let targets = self.target_locales(locales)?;
        let mut staged = Vec::with_capacity(targets.len());

        for locale in targets {
            let mut table = self.staging_table(&locale);
            if !self.stage_symbol(&mut table, &locale, symbol, representation, overwrite)? {
                return Ok(false);
            }
            staged.push((locale, table));
        }

        self.commit(staged);
        Ok(true)
    }

    /// 심볼 여러 개 추가
    ///
    /// `overwrite`가 false면 이미 있는 심볼은 건너뜁니다.
    /// 충돌이 하나라도 있으면 아무것도 반영하지 않습니다. 추가된 심볼 수를 반환합니다.
    pub fn add_symbols<I, S, R>(&mut self, pairs: I, locales: &[&str], overwrite: bool) -> Result<usize>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: AsRef<str>,
    {
        let targets = self.target_locales(locales)?;
        let pairs: Vec<(S, R)> = pairs.into_iter().collect();
        let mut staged = Vec::with_capacity(targets.len());
        let mut added = 0;

        for locale in targets {
            let mut table = self.staging_table(&locale);
            for (symbol, representation) in &pairs {
                if self.stage_symbol(
                    &mut table,
                    &locale,
                    symbol.as_ref(),
                    representation.as_ref(),
                    overwrite,
                )? {
                    added += 1;
                }
            }
            staged.push((locale, table));
        }

        self.commit(staged);
        Ok(added)
    }

    // --- 조회 ---

    /// 심볼의 표현 (없으면 `None`)
    pub fn get_symbol_representation(
        &self,
        symbol: &str,
        locale: Option<&str>,
    ) -> Result<Option<&str>> {
        let (_, table) = self.table_for(locale)?;
        Ok(table.representation(&self.fold(symbol)))
    }

    /// 표현(또는 하이픈으로 이은 여러 단어 표현)의 심볼 (없으면 `None`)
    pub fn get_symbol_from_representation(
        &self,
        token: &str,
        locale: Option<&str>,
    ) -> Result<Option<String>> {
        let (resolved, table) = self.table_for(locale)?;
        Ok(self.symbol_in(&resolved, table, token))
    }

    fn symbol_in(&self, locale: &str, table: &SymbolTable, token: &str) -> Option<String> {
        if self.case_sensitive {
            return table.symbol(token).map(str::to_string);
        }
        self.folded_lookup(locale, &fold_case(token))
    }

    /// 대소문자 비구분 역방향 조회 (캐시가 오래되었으면 재생성)
    fn folded_lookup(&self, locale: &str, key: &str) -> Option<String> {
        {
            let cache = self
                .folded
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !cache.dirty {
                return cache.tables.get(locale).and_then(|t| t.get(key)).cloned();
            }
        }

        let mut cache = self
            .folded
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if cache.dirty {
            cache.tables = self
                .tables
                .iter()
                .map(|(locale, table)| (locale.clone(), table.folded_reverse()))
                .collect();
            cache.dirty = false;
            log::trace!("{}: 대소문자 비구분 역방향 테이블 재생성", self.code);
        }
        cache.tables.get(locale).and_then(|t| t.get(key)).cloned()
    }

    // --- 변환 ---

    /// 문자열을 음성 표현으로 변환
    ///
    /// 줄 단위로 처리하며, 각 문자의 표현을 공백 하나로 잇습니다.
    /// 표현이 없는 문자는 `return_missing`이면 그대로 두고, 아니면 버립니다.
    ///
    /// # Examples
    /// ```
    /// use alphonic::Alphabet;
    ///
    /// let alpha = Alphabet::from_json(r#"{"code": "nato", "alphabets": {"A": "Alfa", "N": "November", "T": "Tango", "O": "Oscar"}}"#).unwrap();
    /// assert_eq!(alpha.phonetify("nato", None, false).unwrap(), "November Alfa Tango Oscar");
    /// assert_eq!(alpha.phonetify("A:", None, true).unwrap(), "Alfa :");
    /// ```
    pub fn phonetify(&self, text: &str, locale: Option<&str>, return_missing: bool) -> Result<String> {
        let (_, table) = self.table_for(locale)?;
        let cleaned = clean_whitespace(text);

        Ok(map_lines(&cleaned, |line| {
            let mut parts: Vec<Cow<'_, str>> = Vec::with_capacity(line.len());
            for c in line.chars() {
                let symbol = c.to_string();
                let representation = table.representation(&self.fold(&symbol));
                match representation {
                    Some(representation) => parts.push(Cow::Borrowed(representation)),
                    None if return_missing => parts.push(Cow::Owned(symbol)),
                    None => {}
                }
            }
            parts.join(" ")
        }))
    }

    /// 음성 표현을 원래 문자열로 역변환
    ///
    /// 여러 단어 표현("New York")은 토큰 분리 전에 하나의 토큰("New-York")으로 합칩니다.
    /// 단어 수가 많은 표현부터 적용하여 짧은 표현에 가려지지 않게 합니다.
    pub fn unphonetify(
        &self,
        text: &str,
        locale: Option<&str>,
        return_missing: bool,
    ) -> Result<String> {
        let (resolved, table) = self.table_for(locale)?;
        let cleaned = clean_whitespace(text);

        Ok(map_lines(&cleaned, |line| {
            let words: Vec<String> = line
                .split(' ')
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();

            let mut result = String::with_capacity(words.len());
            for token in self.join_multiword(table, words) {
                match self.symbol_in(&resolved, table, &token) {
                    Some(symbol) => result.push_str(&symbol),
                    None if return_missing => result.push_str(&token),
                    None => {}
                }
            }
            result
        }))
    }

    /// 알려진 여러 단어 표현을 하이픈으로 이은 단일 토큰으로 치환
    fn join_multiword(&self, table: &SymbolTable, mut words: Vec<String>) -> Vec<String> {
        for (count, group) in table.multiword_groups() {
            for representation in group {
                if words.len() < count {
                    continue;
                }
                let parts: Vec<&str> = representation.split(' ').collect();
                let mut joined = Vec::with_capacity(words.len());
                let mut i = 0;
                while i < words.len() {
                    let matches = i + count <= words.len()
                        && words[i..i + count]
                            .iter()
                            .zip(&parts)
                            .all(|(word, part)| self.fold_eq(word, part));
                    if matches {
                        joined.push(words[i..i + count].join("-"));
                        i += count;
                    } else {
                        joined.push(std::mem::take(&mut words[i]));
                        i += 1;
                    }
                }
                words = joined;
            }
        }
        words
    }
}
