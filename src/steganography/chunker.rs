use crate::config::CodecConfig;
use crate::constants::CHAR_BITS;
use crate::error::StegoError;

/// 把文本切分成 `n` bits 的 chunk 序列，前面附带长度头部。
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    config: CodecConfig,
}

impl Chunker {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// * 字符数不小于 `max_characters` 时返回 [`StegoError::CapacityExceeded`]。
    /// * 字符码点超出编码范围时返回 [`StegoError::EncodingMismatch`]。
    pub fn chunk(&self, text: &str) -> Result<Vec<u8>, StegoError> {
        let length = text.chars().count();
        if length >= self.config.max_characters() {
            return Err(StegoError::CapacityExceeded {
                length,
                max: self.config.max_characters(),
            });
        }

        let bits = self.config.bits();
        let n = u32::from(bits.get());
        let mask = bits.low_mask();

        let header_chunks = self.config.header_chunks();
        let mut chunks = Vec::with_capacity(self.config.chunks_for(length));

        chunks.extend(
            (0..header_chunks as u32)
                .rev()
                .map(|i| ((length >> (i * n)) as u8) & mask),
        );

        let encoding = self.config.encoding();
        for (index, ch) in text.chars().enumerate() {
            let code_point = encoding.code_point(index, ch)?;
            chunks.extend(
                (0..u32::from(CHAR_BITS) / n)
                    .rev()
                    .map(|i| (code_point >> (i * n)) & mask),
            );
        }

        log::debug!(
            "Chunked {} characters into {} header + {} payload chunks",
            length,
            header_chunks,
            chunks.len() - header_chunks
        );
        Ok(chunks)
    }
}
