use crate::config::CodecConfig;

/// 将负载 chunk 按每字符 `8 / n` 个一组重新拼回字符。
#[derive(Debug, Clone, Copy)]
pub struct Assembler {
    config: CodecConfig,
}

impl Assembler {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// 末尾不足一组的 chunk 会被丢弃。
    pub fn assemble(&self, chunks: &[u8]) -> String {
        let bits = self.config.bits();
        let groups = chunks.chunks_exact(bits.chunks_per_char());

        let remainder = groups.remainder().len();
        if remainder != 0 {
            log::warn!("Dropping {} trailing chunks that do not form a whole character", remainder);
        }

        let n = u32::from(bits.get());
        groups
            .map(|group| {
                group
                    .iter()
                    .fold(0u32, |code_point, &chunk| (code_point << n) | u32::from(chunk))
            })
            .map(|code_point| char::from(code_point as u8))
            .collect()
    }
}
