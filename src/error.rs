//! # 错误类型模块
//!
//! [`StegoError`] 覆盖配置校验、文本编码以及隐写编解码过程中的所有失败情况。
//! 命令处理层 (`handler`) 会再用 `anyhow` 为这些错误附加上下文。

use thiserror::Error;

/// 隐写编解码过程中可能出现的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StegoError {
    /// 文本长度没有严格小于 `max_characters`。
    #[error("message has {length} characters, but it must be shorter than {max} characters")]
    CapacityExceeded { length: usize, max: usize },

    /// 图像的通道槽位不足以容纳全部 chunk。
    #[error("not enough space in the image: {required} channel slots required, {available} available")]
    InsufficientCapacity { required: usize, available: usize },

    /// 解出的长度头部不合法 (超过上限或超出图像范围)。
    #[error(
        "malformed length header: decoded length {length} needs {required} channel slots, {available} available"
    )]
    MalformedHeader {
        length: usize,
        required: usize,
        available: usize,
    },

    /// 字符码点无法用所配置的单字节编码表示。
    #[error("character U+{code_point:04X} at index {index} cannot be represented in {encoding}")]
    EncodingMismatch {
        index: usize,
        code_point: u32,
        encoding: &'static str,
    },

    /// 直接传入嵌入器的 chunk 超出了 `n` bits 的取值范围。
    #[error("chunk {value} at index {index} does not fit in {bits} bits")]
    ChunkOutOfRange { index: usize, value: u8, bits: u8 },

    #[error("bit width {0} is not supported, expected one of 1, 2, 4, 8")]
    InvalidBitWidth(u8),

    #[error("max_characters must be at least 1")]
    InvalidCapacity,

    #[error("unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("text is not valid UTF-8")]
    InvalidUtf8,

    /// 输出格式不是无损格式，保存后会破坏最低位。
    #[error("unsupported or lossy image format: {0}")]
    UnsupportedImageFormat(String),
}
