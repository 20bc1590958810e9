//! # 隐写编解码模块
//!
//! 文本与像素之间的转换分为四个互相独立的步骤：
//!
//! ```text
//! text  --Chunker-->   chunks --Embedder-->  pixels
//! pixels --Extractor--> chunks --Assembler--> text
//! ```
//!
//! chunk 序列 = 长度头部 (`ceil(R / n)` 个 chunk) + 每个字符 `8 / n` 个 chunk，
//! 均为高位在前。

pub mod assembler;
pub mod chunker;
pub mod embedder;
pub mod extractor;

pub use assembler::Assembler;
pub use chunker::Chunker;
pub use embedder::Embedder;
pub use extractor::Extractor;

use crate::carrier::Carrier;
use crate::config::CodecConfig;
use crate::error::StegoError;

/// 将文本隐藏进载体，返回写入的通道槽位数。
pub fn hide<C: Carrier>(config: CodecConfig, text: &str, carrier: &mut C) -> Result<usize, StegoError> {
    let chunks = Chunker::new(config).chunk(text)?;
    Embedder::new(config).embed(&chunks, carrier)
}

/// 从载体中恢复文本。
pub fn reveal<C: Carrier>(config: CodecConfig, carrier: &C) -> Result<String, StegoError> {
    let chunks = Extractor::new(config).extract(carrier)?;
    Ok(Assembler::new(config).assemble(&chunks))
}
