//! Alphonic - 음성 알파벳 변환기
//!
//! TEXT가 없으면 표준 입력을 읽습니다.

use std::io::{self, Read};
use std::process;

use clap::{Args, Parser, Subcommand};

use alphonic::config::{config_path, load_config, save_config, AlphonicConfig};
use alphonic::Alphonic;

#[derive(Parser)]
#[command(name = "alphonic", version, about = "음성 알파벳 변환기 (NATO, LAPD, DIN 5009 ...)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 문자열을 음성 표현으로 변환
    Encode(ConvertArgs),
    /// 음성 표현을 문자열로 역변환
    Decode(ConvertArgs),
    /// 등록된 알파벳 목록
    List,
    /// 알파벳의 로케일 목록
    Locales {
        /// 알파벳 코드 (기본: 설정의 default_alphabet)
        #[arg(short, long = "alphabet")]
        alphabet: Option<String>,
    },
    /// 현재 설정을 설정 파일로 저장
    InitConfig,
}

#[derive(Args)]
struct ConvertArgs {
    /// 알파벳 코드 (기본: 설정의 default_alphabet)
    #[arg(short, long = "alphabet")]
    alphabet: Option<String>,
    /// 로케일 (예: en, de-AT)
    #[arg(short, long)]
    locale: Option<String>,
    /// 변환할 수 없는 문자/단어를 그대로 남김
    #[arg(short = 'm', long)]
    keep_missing: bool,
    /// 변환할 텍스트 (없으면 표준 입력)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

fn read_input(text: &[String]) -> io::Result<String> {
    if !text.is_empty() {
        return Ok(text.join(" "));
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    // 파이프 입력의 마지막 줄바꿈은 출력에서 다시 붙임
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

fn convert(
    alphonic: &Alphonic,
    config: &AlphonicConfig,
    args: &ConvertArgs,
    encode: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let code = args.alphabet.as_deref().unwrap_or(&config.default_alphabet);
    let return_missing = args.keep_missing || config.return_missing;
    let locale = match args.locale.as_deref() {
        Some(requested) => alphonic.locale_search(code, requested, config.sideshift)?,
        None => None,
    };

    let input = read_input(&args.text)?;
    let output = if encode {
        alphonic.phonetify(&input, code, locale.as_deref(), return_missing)?
    } else {
        alphonic.unphonetify(&input, code, locale.as_deref(), return_missing)?
    };
    Ok(output)
}

fn run(cli: Cli, config: AlphonicConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::InitConfig = cli.command {
        save_config(&config)?;
        println!("{}", config_path().display());
        return Ok(());
    }

    let alphonic = Alphonic::from_config(&config)?;

    match cli.command {
        Command::Encode(args) => println!("{}", convert(&alphonic, &config, &args, true)?),
        Command::Decode(args) => println!("{}", convert(&alphonic, &config, &args, false)?),
        Command::List => {
            for alphabet in alphonic.get_alphabets().values() {
                let title = alphabet.title(None)?.unwrap_or("");
                println!("{}\t{}", alphabet.code(), title);
            }
        }
        Command::Locales { alphabet } => {
            let code = alphabet.as_deref().unwrap_or(&config.default_alphabet);
            let alphabet = alphonic.alphabet(code)?;
            for locale in alphabet.get_locales() {
                let marker = if locale == alphabet.get_default_locale() { " (기본)" } else { "" };
                let count = alphabet.symbol_count(Some(locale.as_str()))?;
                println!("{}\t{}{}", locale, count, marker);
            }
        }
        Command::InitConfig => {}
    }

    Ok(())
}

fn main() {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config();

    if let Err(e) = run(cli, config) {
        eprintln!("오류: {}", e);
        process::exit(1);
    }
}
