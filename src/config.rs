//! # 配置模块
//!
//! 配置分两层：
//!
//! * [`Settings`] 是 TOML 配置文件的原样映射，字段可以缺省。
//! * [`CodecConfig`] 是校验后的不可变配置，构造一次后按值传给
//!   分块器、嵌入器、提取器和组装器，没有任何全局状态。
//!
//! 配置文件格式：
//!
//! ```toml
//! [text]
//! encoding = "utf-8"
//! n_lowest_bit = 2
//! max_characters = 1024
//! ```

use crate::constants::{CHAR_BITS, DEFAULT_ENCODING, DEFAULT_MAX_CHARACTERS, DEFAULT_N_LOWEST_BIT};
use crate::encoding::TextEncoding;
use crate::error::StegoError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 配置文件的顶层结构。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub text: TextSettings,
}

/// `[text]` 表。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// 文本文件使用的编码名称。
    pub encoding: String,
    /// 每个颜色通道使用的最低位数。
    pub n_lowest_bit: u8,
    /// 可隐藏字符数的上限 (不含)。
    pub max_characters: usize,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            n_lowest_bit: DEFAULT_N_LOWEST_BIT,
            max_characters: DEFAULT_MAX_CHARACTERS,
        }
    }
}

impl Settings {
    /// 从 TOML 文件读取配置。
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file: {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// 校验并生成编解码器使用的配置。
    pub fn codec_config(&self) -> Result<CodecConfig, StegoError> {
        CodecConfig::new(
            self.text.n_lowest_bit,
            self.text.max_characters,
            self.text.encoding.parse()?,
        )
    }
}

/// 每个通道使用的最低位数 `n`。只允许 8 的因子，保证字符能整齐地切分成 chunk。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth(u8);

impl BitWidth {
    pub fn new(bits: u8) -> Result<Self, StegoError> {
        match bits {
            1 | 2 | 4 | 8 => Ok(Self(bits)),
            other => Err(StegoError::InvalidBitWidth(other)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 低 `n` 位的掩码，例如 `n = 2` 时为 `0b0000_0011`。
    pub fn low_mask(self) -> u8 {
        u8::MAX >> (CHAR_BITS - self.0)
    }

    /// 清除低 `n` 位的掩码，例如 `n = 2` 时为 `0b1111_1100`。
    pub fn high_mask(self) -> u8 {
        !self.low_mask()
    }

    /// 每个字符需要的 chunk 数，即 `8 / n`。
    pub fn chunks_per_char(self) -> usize {
        usize::from(CHAR_BITS / self.0)
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

/// 校验过的编解码配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    bits: BitWidth,
    max_characters: usize,
    encoding: TextEncoding,
}

impl CodecConfig {
    /// # Errors
    ///
    /// * `n_lowest_bit` 不是 1、2、4、8 之一时返回 [`StegoError::InvalidBitWidth`]。
    /// * `max_characters` 为 0 时返回 [`StegoError::InvalidCapacity`]。
    pub fn new(
        n_lowest_bit: u8,
        max_characters: usize,
        encoding: TextEncoding,
    ) -> Result<Self, StegoError> {
        if max_characters == 0 {
            return Err(StegoError::InvalidCapacity);
        }
        Ok(Self {
            bits: BitWidth::new(n_lowest_bit)?,
            max_characters,
            encoding,
        })
    }

    pub fn bits(&self) -> BitWidth {
        self.bits
    }

    pub fn max_characters(&self) -> usize {
        self.max_characters
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// 长度头部的位数 `R = ceil(log2(max_characters))`。
    ///
    /// 按 `max_characters - 1` 的二进制位长计算，与 `ceil(log2)` 相等，
    /// 并且恰好能表示所有合法长度 `0..max_characters`。
    pub fn header_bits(&self) -> u32 {
        usize::BITS - (self.max_characters - 1).leading_zeros()
    }

    /// 长度头部占用的 chunk 数 `ceil(R / n)`。
    pub fn header_chunks(&self) -> usize {
        self.header_bits().div_ceil(u32::from(self.bits.get())) as usize
    }

    /// 隐藏 `length` 个字符所需的 chunk (通道槽位) 总数。
    pub fn chunks_for(&self, length: usize) -> usize {
        self.header_chunks() + length * self.bits.chunks_per_char()
    }

    /// 在 `slots` 个通道槽位内最多能隐藏的字符数，同时受 `max_characters` 限制。
    pub fn max_text_len(&self, slots: usize) -> usize {
        let by_image = slots.saturating_sub(self.header_chunks()) / self.bits.chunks_per_char();
        by_image.min(self.max_characters - 1)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            bits: BitWidth(DEFAULT_N_LOWEST_BIT),
            max_characters: DEFAULT_MAX_CHARACTERS,
            encoding: TextEncoding::default(),
        }
    }
}
