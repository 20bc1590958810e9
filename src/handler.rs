//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、加载配置、调用核心隐写算法以及向用户报告结果。

use crate::carrier::{Carrier, CoverImage, lossless_format};
use crate::cli::{CapacityArgs, CodecArgs, HideArgs, RecoverArgs};
use crate::config::{CodecConfig, Settings};
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::steganography::{Assembler, Chunker, Embedder, Extractor};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本文件、把文本切分为 chunk、检查隐写空间是否足够、
/// 将 chunk 写入像素最低位，最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和编解码配置的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 配置文件无法读取或配置不合法。
/// * 无法读取输入的图像或文本文件。
/// * 文本过长，或包含无法用单字节表示的字符。
/// * 图像文件没有足够的空间来隐藏文本。
/// * 目标文件已存在且未指定 `--force`，或无法写入目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let config = resolve_config(&args.codec)?;
    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => default_output(&args.image, DOCTORED_PREFIX, "png")?,
    };
    lossless_format(&dest).with_context(|| {
        format!(
            "Refusing to write steganographic data to: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    check_overwrite(&dest, args.force)?;

    let mut picture = CoverImage::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let raw_text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;
    let text = config.encoding().decode(&raw_text).with_context(|| {
        format!(
            "Unable to decode text file {} as {}",
            args.text.to_string_lossy().red().bold(),
            config.encoding().to_string().green()
        )
    })?;

    let chunks = Chunker::new(config).chunk(&text).context("Unable to split the text into chunks")?;

    let required_space = chunks.len();
    let available_space = picture.slot_count();
    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    Embedder::new(config).embed(&chunks, &mut picture).with_context(|| {
        "Failed to hide the message in the image. \nThe image may be corrupt or too small."
    })?;

    create_parent(&dest)?;
    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    log::info!(
        "Wrote {} chunks ({} characters, {} bits per channel) into {}",
        required_space,
        text.chars().count(),
        config.bits().get(),
        dest.display()
    );

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、解析长度头部并读取负载 chunk、
/// 将 chunk 拼回文本，最后将恢复的文本内容写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和编解码配置的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 配置文件无法读取或配置不合法。
/// * 无法读取输入的图像文件。
/// * 长度头部损坏 (例如图像中并没有隐藏信息，或使用了不同的配置)。
/// * 目标文件已存在且未指定 `--force`，或无法写入目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let config = resolve_config(&args.codec)?;
    let text_path = match &args.text {
        Some(text) => text.clone(),
        None => default_output(&args.image, RECOVERED_PREFIX, "txt")?,
    };
    check_overwrite(&text_path, args.force)?;

    let picture = CoverImage::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let chunks = Extractor::new(config).extract(&picture).with_context(|| {
        format!(
            "Failed to recover the message from '{}'. \nThe image may not contain a hidden message or was hidden with a different configuration.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = Assembler::new(config).assemble(&chunks);
    let raw_text = config.encoding().encode(&text).with_context(|| {
        format!(
            "Recovered text cannot be written as {}",
            config.encoding().to_string().red().bold()
        )
    })?;

    create_parent(&text_path)?;
    fs::write(&text_path, raw_text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;
    log::info!(
        "Recovered {} characters from {} chunks into {}",
        text.chars().count(),
        chunks.len(),
        text_path.display()
    );

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑，打印图像的通道槽位数和可隐藏的最大字符数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let config = resolve_config(&args.codec)?;
    let picture = CoverImage::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = picture.dimensions();
    let slots = picture.slot_count();
    println!(
        "{}x{} image, {} channel slots, {} bits per channel: up to {} characters",
        width,
        height,
        slots,
        config.bits().get(),
        config.max_text_len(slots).to_string().green().bold()
    );
    Ok(())
}

/// 合并配置文件与命令行参数，得到校验后的编解码配置。
pub fn resolve_config(args: &CodecArgs) -> Result<CodecConfig> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(bits) = args.bits {
        settings.text.n_lowest_bit = bits;
    }
    if let Some(max_characters) = args.max_characters {
        settings.text.max_characters = max_characters;
    }
    if let Some(encoding) = &args.encoding {
        settings.text.encoding = encoding.clone();
    }

    let config = settings.codec_config().context("Invalid codec configuration")?;
    log::debug!("Using codec configuration: {:?}", config);
    Ok(config)
}

/// 在输入文件同目录下生成 `<prefix><stem>.<extension>` 形式的默认输出路径。
fn default_output(input: &Path, prefix: &str, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("Invalid input path: {}", input.to_string_lossy().red().bold()))?;
    let name = format!("{}{}.{}", prefix, stem.to_string_lossy(), extension);
    Ok(input.with_file_name(name))
}

fn check_overwrite(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).with_context(|| {
            format!(
                "Unable to create output directory: {}",
                dir.to_string_lossy().red().bold()
            )
        }),
        _ => Ok(()),
    }
}
