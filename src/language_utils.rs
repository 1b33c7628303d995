//! Language utilities for ISO language code handling
//!
//! Validates and normalizes ISO 639-1 and ISO 639-2 codes, and maps a
//! language to the writing script its game text is expected to use.

use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO 639-2/B codes that differ from their 639-2/T form
const BIBLIOGRAPHIC_CODES: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Writing script a language is detected by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingScript {
    /// Kana or CJK ideographs
    Japanese,
    /// CJK ideographs
    Han,
    Hangul,
    Cyrillic,
    Greek,
    Arabic,
    Hebrew,
    Thai,
    /// Any alphabetic character
    Alphabetic,
}

impl WritingScript {
    /// Whether `c` belongs to this script
    pub fn contains(self, c: char) -> bool {
        let code = c as u32;
        match self {
            Self::Japanese => is_kana(code) || is_han(code),
            Self::Han => is_han(code),
            Self::Hangul => matches!(code, 0xAC00..=0xD7AF | 0x1100..=0x11FF | 0x3130..=0x318F),
            Self::Cyrillic => matches!(code, 0x0400..=0x052F),
            Self::Greek => matches!(code, 0x0370..=0x03FF | 0x1F00..=0x1FFF),
            Self::Arabic => matches!(code, 0x0600..=0x06FF | 0x0750..=0x077F),
            Self::Hebrew => matches!(code, 0x0590..=0x05FF),
            Self::Thai => matches!(code, 0x0E00..=0x0E7F),
            Self::Alphabetic => c.is_alphabetic(),
        }
    }
}

fn is_kana(code: u32) -> bool {
    matches!(code, 0x3040..=0x309F | 0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F)
}

fn is_han(code: u32) -> bool {
    matches!(code, 0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF | 0x20000..=0x2A6DF)
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&normalized_code) {
                return Ok(lang.to_639_3().to_string());
            }
        }
        3 => {
            if Language::from_639_3(&normalized_code).is_some() {
                return Ok(normalized_code);
            }
            if let Some((_, terminology)) = BIBLIOGRAPHIC_CODES.iter().find(|(b, _)| *b == normalized_code) {
                return Ok(terminology.to_string());
            }
        }
        _ => {}
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Writing script for a language code
pub fn script_for_language(code: &str) -> Result<WritingScript> {
    let normalized = normalize_to_part2t(code)?;
    let script = match normalized.as_str() {
        "jpn" => WritingScript::Japanese,
        "zho" | "cmn" | "yue" => WritingScript::Han,
        "kor" => WritingScript::Hangul,
        "rus" | "ukr" | "bel" | "bul" | "srp" | "mkd" | "kaz" | "kir" | "tgk" | "mon" => WritingScript::Cyrillic,
        "ell" => WritingScript::Greek,
        "ara" | "fas" | "urd" => WritingScript::Arabic,
        "heb" | "yid" => WritingScript::Hebrew,
        "tha" => WritingScript::Thai,
        _ => WritingScript::Alphabetic,
    };
    Ok(script)
}
