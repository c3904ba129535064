//! Kampus 命令行问答
//!
//! 入口：初始化日志、加载配置与管线，逐行读取 stdin 提问并输出回复。
//! `:stats` 显示今日提问数，`:quit` 退出。

use anyhow::Context;
use kampus::{config::load_config_or_default, observability, PipelineBuilder};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let config_path = std::env::args().nth(1).map(Into::into);
    let cfg = load_config_or_default(config_path);
    let pipeline = PipelineBuilder::new(cfg)
        .build()
        .context("Failed to build pipeline")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        let output = match line {
            "" => continue,
            ":quit" => break,
            ":stats" => format!("Pertanyaan hari ini: {}", pipeline.today_count().await),
            question => pipeline.ask(question).await.reply,
        };
        stdout.write_all(format!("{}\n", output).as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
