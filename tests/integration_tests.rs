//! 통합 테스트 - 알파벳 로드, 변환/역변환, 로케일 해석

use std::fs;
use std::path::Path;

use alphonic::{Alphabet, Alphonic, AlphonicError};
use tempfile::TempDir;

const NATO: &str = r#"{"code": "TESTALPHA","title": {"en": "NATO Phonetic Alphabet"},"description": "A test alphabet.","source": "http://www.worthwelle.com","alphabets": {"en": {"A": "Alfa","N": "November","T": "Tango","O": "Oscar"}}}"#;
const SIDESHIFT: &str = r#"{"code": "LOCALES","alphabets": {"en-GB": {"A": "Alfa", "B": "Bravo"}, "en-CA": {"A": "Alfa", "B": "Bravo"}}}"#;
const WILDCARD: &str = r#"{"code": "WILDCARD","alphabets": {"*": {"A": "Alpha", "B": "Bravo"}, "en-GB": {"A": "Alfa", "B": "Bravo"}, "en-CA": {"A": "Alfa", "B": "Bravo"}}}"#;
const UNICODE: &str = r#"{"code": "BRAILLE-FR","alphabets": {"en": {"I": "⠊","J": "⠚"}}}"#;
const NO_LOCALE: &str = r#"{"code": "NOLOCALE","title": {"en": "NATO Phonetic Alphabet"},"description": "A test alphabet.","alphabets": {"A": "Alfa","N": "November","T": "Tango","O": "Oscar"}}"#;
const TWO_LOCALE: &str = r#"{"code": "TWOLOCALE","title": {"en": ["NATO Phonetic Alphabet","Another Title"]},"description": "A test alphabet.","alphabets": {"en": {"A": "Alfa","N": "November","T": "Tango","O": "Oscar"}, "*": {"A": "Alfa","N": "November","T": "Tango","O": "Oscar", ":": "Colon"}}}"#;
const INVALID_CODE: &str = r#"{"code": 123,"title": {"en": "NATO Phonetic Alphabet"},"alphabets": {"en": {"A": "Alfa","B": "Bravo","C": "Charlie"}}}"#;
const INVALID_JSON: &str = r#"{"code": "INVALIDJSON","title": {"en": "NATO Phonetic Alphabet"},"alphabets": {"en": {"A": "Alfa","B": "Bravo","C": "Charlie""#;

/// alphabets/ 와 invalid/ 디렉토리를 가진 임시 트리
struct Fixture {
    root: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let write = |dir: &str, name: &str, content: &str| {
            let dir = root.path().join(dir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(name), content).unwrap();
        };

        write("alphabets", "nato.json", NATO);
        write("alphabets", "sideshift.json", SIDESHIFT);
        write("alphabets", "wildcard.json", WILDCARD);
        write("alphabets", "unicode_alpha.json", UNICODE);
        write("alphabets", "no_locale_alpha.json", NO_LOCALE);
        write("alphabets", "two_locale_alpha.json", TWO_LOCALE);
        write("alphabets", "README.md", "not an alphabet");
        write("invalid", "invalid_nato.json", INVALID_CODE);
        write("invalid", "invalid_json.json", INVALID_JSON);

        Self { root }
    }

    fn dir(&self, name: &str) -> std::path::PathBuf {
        self.root.path().join(name)
    }

    fn file(&self, dir: &str, name: &str) -> std::path::PathBuf {
        self.dir(dir).join(name)
    }
}

fn load(path: &Path) -> Alphonic {
    let mut alphonic = Alphonic::new();
    alphonic.add_alphabet_from_file(path).unwrap();
    alphonic
}

#[test]
fn test_load_alphabet_from_file() {
    let fixture = Fixture::new();
    let alpha = Alphabet::from_file(fixture.file("alphabets", "nato.json")).unwrap();
    assert_eq!(alpha.code(), "TESTALPHA");
}

#[test]
fn test_load_invalid_alphabet_files() {
    let fixture = Fixture::new();
    assert!(matches!(
        Alphabet::from_file(fixture.file("invalid", "invalid_nato.json")),
        Err(AlphonicError::InvalidAlphabet(_))
    ));
    assert!(matches!(
        Alphabet::from_file(fixture.file("invalid", "invalid_json.json")),
        Err(AlphonicError::InvalidAlphabet(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let fixture = Fixture::new();
    assert!(matches!(
        Alphabet::from_file(fixture.file("alphabets", "missing.json")),
        Err(AlphonicError::Io { .. })
    ));
}

#[test]
fn test_load_no_locale_and_two_locale_alphabets() {
    let fixture = Fixture::new();
    let alpha = Alphabet::from_file(fixture.file("alphabets", "no_locale_alpha.json")).unwrap();
    assert_eq!(
        alpha.phonetify("nato", None, false).unwrap(),
        "November Alfa Tango Oscar"
    );

    let alpha = Alphabet::from_file(fixture.file("alphabets", "two_locale_alpha.json")).unwrap();
    assert_eq!(
        alpha.phonetify("nato", None, false).unwrap(),
        "November Alfa Tango Oscar"
    );
}

#[test]
fn test_load_alphabets_from_directory() {
    let fixture = Fixture::new();
    let mut alphonic = Alphonic::new();
    let loaded = alphonic.load_alphabets([fixture.dir("alphabets")], false).unwrap();

    assert_eq!(loaded, 6);
    assert_eq!(
        alphonic.get_title("TESTALPHA", None).unwrap(),
        Some("NATO Phonetic Alphabet")
    );
    assert_eq!(alphonic.phonetify("ij", "braille-fr", None, false).unwrap(), "⠊ ⠚");
}

#[test]
fn test_load_invalid_alphabets_fails_with_path() {
    let fixture = Fixture::new();
    let mut alphonic = Alphonic::new();
    let result = alphonic.load_alphabets([fixture.dir("invalid"), fixture.dir("alphabets")], false);

    match result {
        Err(AlphonicError::InvalidAlphabet(Some(detail))) => {
            assert!(detail.contains("invalid_json.json"));
        }
        other => panic!("InvalidAlphabet 기대, 실제: {:?}", other),
    }
    // 실패하면 아무것도 등록되지 않음
    assert!(alphonic.get_alphabets().is_empty());
}

#[test]
fn test_load_alphabets_skip_invalid() {
    let fixture = Fixture::new();
    let mut alphonic = Alphonic::new();
    let loaded = alphonic
        .load_alphabets([fixture.dir("invalid"), fixture.dir("alphabets")], true)
        .unwrap();

    assert_eq!(loaded, 6);
    assert!(!alphonic.get_alphabets().is_empty());
}

#[test]
fn test_load_alphabets_bad_argument() {
    let fixture = Fixture::new();
    let mut alphonic = Alphonic::new();
    assert!(matches!(
        alphonic.load_alphabets([fixture.file("alphabets", "nato.json")], false),
        Err(AlphonicError::InvalidArgument(_))
    ));
}

#[test]
fn test_add_alphabet_from_json() {
    let mut alphonic = Alphonic::new();
    alphonic.add_alphabet_from_json(NATO).unwrap();
    assert_eq!(
        alphonic.get_description("TESTALPHA", None).unwrap(),
        Some("A test alphabet.")
    );
    assert_eq!(
        alphonic.get_source("TESTALPHA", None).unwrap(),
        Some("http://www.worthwelle.com")
    );
}

#[test]
fn test_alphabet_not_found_is_case_insensitive() {
    let mut alphonic = Alphonic::new();
    alphonic.add_alphabet_from_json(NATO).unwrap();
    assert!(alphonic.alphabet("testAlpha").is_ok());
    assert!(matches!(
        alphonic.get_title("nato", None),
        Err(AlphonicError::AlphabetNotFound(_))
    ));
}

#[test]
fn test_locale_search_exact() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "nato.json"));
    assert_eq!(
        alphonic.locale_search("TESTALPHA", "en", false).unwrap().as_deref(),
        Some("en")
    );
    assert_eq!(alphonic.locale_search("TESTALPHA", "", false).unwrap(), None);
}

#[test]
fn test_locale_search_umbrella() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "nato.json"));
    assert_eq!(
        alphonic.locale_search("TESTALPHA", "en-US", false).unwrap().as_deref(),
        Some("en")
    );
}

#[test]
fn test_locale_search_sideshift() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "sideshift.json"));
    assert_eq!(
        alphonic.locale_search("LOCALES", "en-US", true).unwrap().as_deref(),
        Some("en-CA")
    );
}

#[test]
fn test_locale_search_wildcard() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "wildcard.json"));
    assert_eq!(
        alphonic.locale_search("WILDCARD", "uz-Cyrl-UZ", false).unwrap().as_deref(),
        Some("*")
    );
}

#[test]
fn test_locale_search_not_found() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "sideshift.json"));
    assert!(matches!(
        alphonic.locale_search("LOCALES", "en-US", false),
        Err(AlphonicError::LocaleNotFound(_))
    ));
    // 하위 로케일만 있는 알파벳에서 상위 언어 검색
    assert!(matches!(
        alphonic.locale_search("LOCALES", "en", false),
        Err(AlphonicError::LocaleNotFound(_))
    ));
}

#[test]
fn test_locale_search_invalid() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "nato.json"));
    assert!(matches!(
        alphonic.locale_search("TESTALPHA", "en-en-en-en", false),
        Err(AlphonicError::InvalidLocale(_))
    ));
}

#[test]
fn test_phonetify_with_non_default_locale() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "wildcard.json"));
    assert_eq!(
        alphonic.phonetify("AB", "WILDCARD", Some("en-GB"), false).unwrap(),
        "Alfa Bravo"
    );
    assert_eq!(
        alphonic.unphonetify("Alfa Bravo", "WILDCARD", Some("en-GB"), false).unwrap(),
        "AB"
    );
    assert_eq!(
        alphonic.phonetify("AB", "WILDCARD", None, false).unwrap(),
        "Alpha Bravo"
    );
}

#[test]
fn test_empty_input() {
    let mut alphonic = Alphonic::new();
    alphonic.add_alphabet_from_json(NATO).unwrap();
    assert_eq!(alphonic.phonetify("", "TESTALPHA", None, false).unwrap(), "");
    assert_eq!(alphonic.unphonetify("", "TESTALPHA", None, false).unwrap(), "");
}

#[test]
fn test_multi_line_preservation() {
    let mut alphonic = Alphonic::new();
    alphonic.load_default_alphabets().unwrap();
    let encoded = alphonic.phonetify("AB\nCD", "ALPHONIC-NATO", None, false).unwrap();
    assert_eq!(encoded, "Alfa Bravo\nCharlie Delta");
    assert_eq!(encoded.matches('\n').count(), 1);
}

#[test]
fn test_bundled_nato_round_trip() {
    let mut alphonic = Alphonic::new();
    alphonic.load_default_alphabets().unwrap();

    let input = "Hello World 42\nx-ray.";
    let encoded = alphonic.phonetify(input, "alphonic-nato", None, false).unwrap();
    assert_eq!(
        encoded,
        "Hotel Echo Lima Lima Oscar Whiskey Oscar Romeo Lima Delta Fower Two\nX-ray Dash Romeo Alfa Yankee Stop"
    );
    let decoded = alphonic.unphonetify(&encoded, "alphonic-nato", None, false).unwrap();
    assert_eq!(decoded, "HELLOWORLD42\nX-RAY.");
}

#[test]
fn test_bundled_din5009_multiword_and_locales() {
    let mut alphonic = Alphonic::new();
    alphonic.load_default_alphabets().unwrap();

    let encoded = alphonic.phonetify("Bär", "ALPHONIC-DIN5009", Some("de"), false).unwrap();
    assert_eq!(encoded, "Berlin Umlaut Aachen Rostock");
    assert_eq!(
        alphonic.unphonetify(&encoded, "ALPHONIC-DIN5009", Some("de"), false).unwrap(),
        "BÄR"
    );

    // de-CH는 상위 언어 de로 해석
    assert_eq!(
        alphonic.phonetify("Bär", "ALPHONIC-DIN5009", Some("de-CH"), false).unwrap(),
        "Berlin Umlaut Aachen Rostock"
    );
    assert_eq!(
        alphonic.phonetify("Bär", "ALPHONIC-DIN5009", Some("de-AT"), false).unwrap(),
        "Berta Ärger Richard"
    );
    assert_eq!(
        alphonic.get_title("ALPHONIC-DIN5009", Some("de-at")).unwrap(),
        Some("Buchstabiertafel nach ÖNORM A 1081")
    );
}

#[test]
fn test_bundled_din5009_sharp_s_round_trip() {
    let mut alphonic = Alphonic::new();
    alphonic.load_default_alphabets().unwrap();

    let encoded = alphonic.phonetify("Straße", "alphonic-din5009", Some("de"), false).unwrap();
    assert_eq!(encoded, "Salzwedel Tübingen Rostock Aachen Eszett Essen");
    assert_eq!(
        alphonic.unphonetify(&encoded, "alphonic-din5009", Some("de"), false).unwrap(),
        "STRAßE"
    );

    let encoded = alphonic.phonetify("ß", "alphonic-din5009", Some("de-AT"), false).unwrap();
    assert_eq!(encoded, "Scharfes S");
    assert_eq!(
        alphonic.unphonetify(&encoded, "alphonic-din5009", Some("de-AT"), false).unwrap(),
        "ß"
    );
}

#[test]
fn test_locale_search_three_part_tag() {
    let fixture = Fixture::new();
    let alphonic = load(&fixture.file("alphabets", "wildcard.json"));
    assert_eq!(
        alphonic.locale_search("WILDCARD", "en-GB-oxendict", false).unwrap().as_deref(),
        Some("*")
    );
    let alphonic = load(&fixture.file("alphabets", "nato.json"));
    assert_eq!(
        alphonic.locale_search("TESTALPHA", "en-US-posix", false).unwrap().as_deref(),
        Some("en")
    );
}
