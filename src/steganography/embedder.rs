use crate::carrier::Carrier;
use crate::config::{BitWidth, CodecConfig};
use crate::error::StegoError;

/// 将 chunk 序列写入载体各通道的最低 `n` 位。
#[derive(Debug, Clone, Copy)]
pub struct Embedder {
    config: CodecConfig,
}

impl Embedder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// 从第 0 个槽位开始依次写入全部 chunk，其余通道保持不变。
    ///
    /// 在修改任何像素之前先完成所有检查，失败时载体保持原样。
    ///
    /// # Errors
    ///
    /// * 槽位不足时返回 [`StegoError::InsufficientCapacity`]。
    /// * chunk 超出 `n` bits 时返回 [`StegoError::ChunkOutOfRange`]。
    pub fn embed<C: Carrier>(&self, chunks: &[u8], carrier: &mut C) -> Result<usize, StegoError> {
        let bits = self.config.bits();
        let available = carrier.slot_count();
        if chunks.len() > available {
            return Err(StegoError::InsufficientCapacity {
                required: chunks.len(),
                available,
            });
        }
        if let Some((index, &value)) = chunks
            .iter()
            .enumerate()
            .find(|&(_, &chunk)| chunk & bits.high_mask() != 0)
        {
            return Err(StegoError::ChunkOutOfRange {
                index,
                value,
                bits: bits.get(),
            });
        }

        let layout = carrier.layout();
        let pix = carrier.samples_mut();
        for (index, &chunk) in chunks.iter().enumerate() {
            modify(chunk, &mut pix[layout.offset(index)], bits);
        }

        log::debug!("Embedded {} chunks into {} available slots", chunks.len(), available);
        Ok(chunks.len())
    }
}

fn modify(chunk: u8, byte: &mut u8, bits: BitWidth) {
    *byte = (*byte & bits.high_mask()) | chunk;
}
