//! 알파벳 변환 엔진

pub mod alphabet;
pub mod document;
pub mod locale;
mod symbol_table;
pub mod whitespace;
