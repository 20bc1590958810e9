//! # 载体图像模块
//!
//! 编解码器把图像视为一串线性的"通道槽位"：按行优先遍历像素，
//! 每个像素内按 R → G → B 排列。槽位 `k` 对应像素 `k / 3` 的第 `k % 3` 个通道，
//! 通过闭式计算直接换算成样本缓冲区中的偏移，不需要三重循环。

use crate::constants::COLOR_CHANNELS;
use crate::error::StegoError;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

/// 样本缓冲区中每个像素占用的字节数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLayout {
    stride: usize,
}

impl SampleLayout {
    pub const RGB: Self = Self { stride: 3 };
    pub const RGBA: Self = Self { stride: 4 };

    /// 长度为 `len` 的样本缓冲区中可用的通道槽位数。
    pub fn slot_count(self, len: usize) -> usize {
        (len / self.stride) * COLOR_CHANNELS
    }

    /// 槽位 `index` 在样本缓冲区中的偏移。
    pub fn offset(self, index: usize) -> usize {
        (index / COLOR_CHANNELS) * self.stride + index % COLOR_CHANNELS
    }
}

/// 可以承载隐写数据的像素网格。
pub trait Carrier {
    fn samples(&self) -> &[u8];

    fn samples_mut(&mut self) -> &mut [u8];

    fn layout(&self) -> SampleLayout;

    fn slot_count(&self) -> usize {
        self.layout().slot_count(self.samples().len())
    }

    fn channel(&self, index: usize) -> u8 {
        self.samples()[self.layout().offset(index)]
    }
}

impl Carrier for RgbImage {
    fn samples(&self) -> &[u8] {
        self.as_raw()
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        &mut **self
    }

    fn layout(&self) -> SampleLayout {
        SampleLayout::RGB
    }
}

impl Carrier for RgbaImage {
    fn samples(&self) -> &[u8] {
        self.as_raw()
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        &mut **self
    }

    fn layout(&self) -> SampleLayout {
        SampleLayout::RGBA
    }
}

/// 从文件加载的载体图像。带 alpha 的图像保留 alpha 通道且从不修改它。
#[derive(Debug, Clone, PartialEq)]
pub enum CoverImage {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl CoverImage {
    pub fn open(path: &Path) -> image::ImageResult<Self> {
        Ok(Self::from(image::open(path)?))
    }

    /// 以无损格式保存图像，格式由扩展名决定。
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let format = lossless_format(path)?;
        match self {
            Self::Rgb(img) => img.save_with_format(path, format)?,
            Self::Rgba(img) => img.save_with_format(path, format)?,
        }
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Rgb(img) => img.dimensions(),
            Self::Rgba(img) => img.dimensions(),
        }
    }
}

impl From<DynamicImage> for CoverImage {
    fn from(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            Self::Rgba(img.into_rgba8())
        } else {
            Self::Rgb(img.into_rgb8())
        }
    }
}

impl Carrier for CoverImage {
    fn samples(&self) -> &[u8] {
        match self {
            Self::Rgb(img) => img.samples(),
            Self::Rgba(img) => img.samples(),
        }
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Rgb(img) => img.samples_mut(),
            Self::Rgba(img) => img.samples_mut(),
        }
    }

    fn layout(&self) -> SampleLayout {
        match self {
            Self::Rgb(_) => SampleLayout::RGB,
            Self::Rgba(_) => SampleLayout::RGBA,
        }
    }
}

/// 根据扩展名确定输出格式，拒绝会破坏最低位的有损格式。
pub fn lossless_format(path: &Path) -> Result<ImageFormat, StegoError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| StegoError::UnsupportedImageFormat(path.display().to_string()))?;
    match format {
        ImageFormat::Png
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::WebP
        | ImageFormat::Qoi => Ok(format),
        other => Err(StegoError::UnsupportedImageFormat(format!("{other:?}"))),
    }
}
