use anyhow::Context;
use caskia_format::format_for_display;
use tokio::io::AsyncReadExt;

pub(crate) async fn run_format_mode(text: Option<String>) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("failed to read text from stdin")?;
            buffer
        }
    };
    println!("{}", format_for_display(&text));
    Ok(())
}
