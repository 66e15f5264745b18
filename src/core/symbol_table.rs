//! 로케일 하나의 심볼 <-> 표현 테이블

use std::collections::{BTreeMap, HashMap};

use super::whitespace::{clean_representation, word_count};

/// 역방향 조회 키: 여러 단어 표현은 공백 대신 하이픈 사용
pub(crate) fn reverse_key(representation: &str) -> String {
    if word_count(representation) > 1 {
        clean_representation(representation)
    } else {
        representation.to_string()
    }
}

/// 대소문자 비구분 비교용 대문자 변환
///
/// 대문자가 한 글자로 대응되지 않는 문자(`ß` -> `SS`)는 그대로 둡니다.
/// 한 글자 심볼이 접힌 뒤에도 한 글자로 남습니다.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}

/// 한 로케일의 심볼 테이블
///
/// 심볼 키는 대소문자 비구분 알파벳이면 이미 대문자로 접힌 상태로 들어옵니다.
#[derive(Debug, Clone, Default)]
pub(crate) struct SymbolTable {
    /// 심볼 -> 표현
    symbols: HashMap<String, String>,
    /// 역방향 키 -> 심볼
    reverse: HashMap<String, String>,
    /// 단어 수 -> 여러 단어 표현 목록
    multiword: BTreeMap<usize, Vec<String>>,
    /// 대문자로 접은 역방향 키 -> 원래 역방향 키들
    folded_keys: HashMap<String, Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 심볼의 표현
    pub fn representation(&self, symbol: &str) -> Option<&str> {
        self.symbols.get(symbol).map(String::as_str)
    }

    /// 역방향 키의 심볼 (대소문자 구분)
    pub fn symbol(&self, reverse_key: &str) -> Option<&str> {
        self.reverse.get(reverse_key).map(String::as_str)
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// 이미 이 역방향 키에 묶인 심볼
    ///
    /// `case_sensitive`가 false이면 대문자로 접어서 비교합니다.
    pub fn bound_symbol(&self, reverse_key: &str, case_sensitive: bool) -> Option<&str> {
        if case_sensitive {
            return self.symbol(reverse_key);
        }
        self.folded_keys
            .get(&fold_case(reverse_key))
            .and_then(|keys| keys.first())
            .and_then(|key| self.symbol(key))
    }

    /// 심볼 등록 (기존 심볼이면 교체)
    ///
    /// 교체되는 이전 표현의 역방향 항목과 여러 단어 항목은 제거합니다.
    pub fn insert(&mut self, symbol: String, representation: String) {
        if let Some(previous) = self.symbols.get(&symbol).cloned() {
            if previous != representation {
                self.remove_representation(&symbol, &previous);
            }
        }

        let count = word_count(&representation);
        if count > 1 {
            let group = self.multiword.entry(count).or_default();
            if !group.contains(&representation) {
                group.push(representation.clone());
            }
        }

        let key = reverse_key(&representation);
        let originals = self.folded_keys.entry(fold_case(&key)).or_default();
        if !originals.contains(&key) {
            originals.push(key.clone());
        }
        self.reverse.insert(key, symbol.clone());
        self.symbols.insert(symbol, representation);
    }

    fn remove_representation(&mut self, symbol: &str, representation: &str) {
        let key = reverse_key(representation);
        if self.reverse.get(&key).map(String::as_str) == Some(symbol) {
            self.reverse.remove(&key);

            let folded = fold_case(&key);
            if let Some(originals) = self.folded_keys.get_mut(&folded) {
                originals.retain(|k| *k != key);
                if originals.is_empty() {
                    self.folded_keys.remove(&folded);
                }
            }
        }

        let count = word_count(representation);
        if let Some(group) = self.multiword.get_mut(&count) {
            group.retain(|r| r != representation);
            if group.is_empty() {
                self.multiword.remove(&count);
            }
        }
    }

    /// 여러 단어 표현 그룹 (단어 수가 많은 순)
    pub fn multiword_groups(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.multiword
            .iter()
            .rev()
            .map(|(count, group)| (*count, group.as_slice()))
    }

    /// 대문자로 접은 역방향 테이블
    pub fn folded_reverse(&self) -> HashMap<String, String> {
        self.reverse
            .iter()
            .map(|(key, symbol)| (fold_case(key), fold_case(symbol)))
            .collect()
    }
}
