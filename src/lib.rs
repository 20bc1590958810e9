//! # emage 库
//!
//! 本库包含多位 LSB 隐写工具的核心逻辑：
//! 把文本切分成 `n` bits 的 chunk，连同长度头部写入 RGB 像素各通道的最低位，
//! 并能在不依赖任何外部元数据的情况下把文本原样恢复。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod handler;
pub mod steganography;
