/// 每个字符占用的位数。
/// 编码器只接受单字节字符，因此每个字符的码点必须能放进 8 bits。
pub const CHAR_BITS: u8 = 8;

/// 每个像素参与隐写的颜色通道数 (R, G, B)。
/// 即使图像带有 alpha 通道，alpha 也不会被修改。
pub const COLOR_CHANNELS: usize = 3;

/// 默认每个通道使用的最低位数。
pub const DEFAULT_N_LOWEST_BIT: u8 = 2;

/// 默认可隐藏的字符数上限 (不含)。
/// 1024 需要 10 bits 的长度头部，即 2 bits 宽度下的 5 个通道。
pub const DEFAULT_MAX_CHARACTERS: usize = 1024;

/// 默认的文本编码。
pub const DEFAULT_ENCODING: &str = "utf-8";

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
