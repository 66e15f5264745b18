//! 공백 정규화 및 줄 단위 처리
//!
//! 변환(phonetify)과 역변환(unphonetify) 모두 같은 정규화를 거쳐야
//! 입력의 우발적인 공백과 관계없이 왕복 결과가 안정적입니다.

/// 줄 종결 문자인지 확인 (`\r`, `\n`)
fn is_line_terminator(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// 공백 정규화
///
/// 1. 일반 공백/줄 종결 문자가 아닌 공백류(탭 등)는 공백 하나로 치환
/// 2. 줄 종결 문자 앞뒤의 공백 제거
/// 3. 연속된 공백은 하나로 축약
///
/// # Examples
/// ```
/// use alphonic::core::whitespace::clean_whitespace;
/// assert_eq!(clean_whitespace("NA \tT\tO"), "NA T O");
/// assert_eq!(clean_whitespace("NA  \n  TO"), "NA\nTO");
/// ```
pub fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut after_terminator = false;

    for c in text.chars() {
        if is_line_terminator(c) {
            // 줄 종결 문자 앞의 공백은 버림
            pending_space = false;
            after_terminator = true;
            result.push(c);
        } else if c.is_whitespace() {
            // 줄 종결 문자 바로 뒤의 공백도 버림
            if !after_terminator {
                pending_space = true;
            }
        } else {
            if pending_space {
                result.push(' ');
                pending_space = false;
            }
            after_terminator = false;
            result.push(c);
        }
    }

    if pending_space {
        result.push(' ');
    }

    result
}

/// 표현(representation) 정규화: 공백 정규화 후 단어 사이를 공백 하나로 맞춤
pub fn normalize_representation(representation: &str) -> String {
    clean_whitespace(representation)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 여러 단어로 된 표현의 공백을 하이픈으로 치환 ("New York" -> "New-York")
pub fn clean_representation(representation: &str) -> String {
    representation.replace(' ', "-")
}

/// 표현의 단어 수
pub fn word_count(representation: &str) -> usize {
    representation.split(' ').filter(|w| !w.is_empty()).count()
}

/// 줄 단위로 변환 함수를 적용하고 원래 줄 구분자로 다시 합침
///
/// `\n` 기준으로 나누고, CRLF 입력이면 각 줄 끝의 `\r`을 보존합니다.
pub fn map_lines<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    text.split('\n')
        .map(|line| match line.strip_suffix('\r') {
            Some(body) => {
                let mut out = f(body);
                out.push('\r');
                out
            }
            None => f(line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
