use crate::carrier::Carrier;
use crate::config::CodecConfig;
use crate::error::StegoError;

/// 按嵌入时的顺序读回 chunk：先解长度头部，再读取恰好数量的负载 chunk。
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    config: CodecConfig,
}

impl Extractor {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// 读取长度头部，返回隐藏的字符数。
    ///
    /// # Errors
    ///
    /// * 载体连头部都放不下时返回 [`StegoError::InsufficientCapacity`]。
    pub fn read_length<C: Carrier>(&self, carrier: &C) -> Result<usize, StegoError> {
        let header_chunks = self.config.header_chunks();
        let available = carrier.slot_count();
        if header_chunks > available {
            return Err(StegoError::InsufficientCapacity {
                required: header_chunks,
                available,
            });
        }

        let n = usize::from(self.config.bits().get());
        let length = (0..header_chunks).fold(0usize, |length, index| {
            (length << n) | usize::from(self.recover(carrier, index))
        });
        Ok(length)
    }

    /// 只返回负载 chunk，头部在解析长度后即被丢弃。
    ///
    /// # Errors
    ///
    /// * 头部不完整时返回 [`StegoError::InsufficientCapacity`]。
    /// * 长度不小于 `max_characters`，或负载会越过图像末尾时返回
    ///   [`StegoError::MalformedHeader`]。此时不会读取任何负载通道。
    pub fn extract<C: Carrier>(&self, carrier: &C) -> Result<Vec<u8>, StegoError> {
        let length = self.read_length(carrier)?;
        let header_chunks = self.config.header_chunks();
        let available = carrier.slot_count();

        let payload_chunks = length.saturating_mul(self.config.bits().chunks_per_char());
        let required = header_chunks.saturating_add(payload_chunks);
        if length >= self.config.max_characters() || required > available {
            return Err(StegoError::MalformedHeader {
                length,
                required,
                available,
            });
        }

        log::debug!(
            "Header announces {} characters, reading {} payload chunks",
            length,
            payload_chunks
        );

        Ok((header_chunks..required)
            .map(|index| self.recover(carrier, index))
            .collect())
    }

    fn recover<C: Carrier>(&self, carrier: &C, index: usize) -> u8 {
        carrier.channel(index) & self.config.bits().low_mask()
    }
}
