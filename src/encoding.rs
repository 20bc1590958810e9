//! # 文本编码模块
//!
//! 编解码器以"一个字符对应一个 8 bits 码点"为前提。
//! [`TextEncoding`] 负责在文本文件的字节与这种单字节字符序列之间转换，
//! 并在字符无法用单字节表示时立即报错，而不是静默截断。

use crate::error::StegoError;
use std::fmt;
use std::str::FromStr;

/// 支持的文本编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// 7-bit ASCII，码点范围 0..=0x7F。
    Ascii,
    /// ISO-8859-1，每个字节直接对应同值码点。
    Latin1,
    /// UTF-8 文件，但其中每个字符的码点必须不超过 0xFF。
    #[default]
    Utf8,
}

impl TextEncoding {
    /// 编码的规范名称。
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Latin1 => "latin-1",
            Self::Utf8 => "utf-8",
        }
    }

    /// 该编码下允许隐写的最大码点。
    pub fn max_code_point(self) -> u32 {
        match self {
            Self::Ascii => 0x7F,
            Self::Latin1 | Self::Utf8 => 0xFF,
        }
    }

    /// 检查字符是否可以作为单字节写入，返回其码点。
    pub fn code_point(self, index: usize, ch: char) -> Result<u8, StegoError> {
        let code_point = u32::from(ch);
        if code_point > self.max_code_point() {
            return Err(StegoError::EncodingMismatch {
                index,
                code_point,
                encoding: self.name(),
            });
        }
        Ok(code_point as u8)
    }

    /// 将文本文件的原始字节解码为字符串。
    ///
    /// # Errors
    ///
    /// * ASCII 下出现高于 0x7F 的字节时返回 [`StegoError::EncodingMismatch`]。
    /// * UTF-8 下字节序列不合法时返回 [`StegoError::InvalidUtf8`]。
    pub fn decode(self, bytes: &[u8]) -> Result<String, StegoError> {
        match self {
            Self::Ascii | Self::Latin1 => bytes
                .iter()
                .enumerate()
                .map(|(i, &byte)| self.code_point(i, char::from(byte)).map(char::from))
                .collect(),
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| StegoError::InvalidUtf8),
        }
    }

    /// 将字符串编码为要写入文本文件的字节。
    pub fn encode(self, text: &str) -> Result<Vec<u8>, StegoError> {
        match self {
            Self::Ascii | Self::Latin1 => text
                .chars()
                .enumerate()
                .map(|(i, ch)| self.code_point(i, ch))
                .collect(),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            _ => Err(StegoError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
