//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{Args, Parser};
use std::path::PathBuf;

/// 一款基于多位 LSB 隐写术的命令行工具，将文本按 chunk 隐藏在 RGB 图像的最低位中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于多位 LSB 隐写术的命令行工具。文本被切分成 n bits 的 chunk，连同长度头部一起写入无损图像 (如 PNG, BMP) 各颜色通道的最低 n 位。"
)]
pub struct Cli {
    /// 输出更多日志 (-v info, -vv debug, -vvv trace)。
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文本文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 查看图像在当前配置下最多能隐藏多少字符。
    Capacity(CapacityArgs),
}

/// 编解码配置相关的参数，命令行参数优先于配置文件。
#[derive(Args, Debug, Clone, Default)]
pub struct CodecArgs {
    /// TOML 配置文件路径。
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 每个颜色通道使用的最低位数 (1, 2, 4, 8)。
    #[arg(short = 'n', long)]
    pub bits: Option<u8>,

    /// 可隐藏字符数的上限 (不含)。
    #[arg(short, long)]
    pub max_characters: Option<usize>,

    /// 文本文件编码 (ascii, latin-1, utf-8)。
    #[arg(short, long)]
    pub encoding: Option<String>,
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 默认为输入图像同目录下的 `doctored_<name>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本后，保存文本内容的输出路径。
    /// 默认为图像同目录下的 `recovered_<name>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}
