use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一份画布文本文件
///
/// 文件名（去扩展名）即考试ID
#[derive(Debug, Clone)]
pub struct CanvasFile {
    pub exam_id: String,
    pub path: PathBuf,
    pub raw_text: String,
}

/// 读取单个画布文件
pub async fn load_canvas_file(path: &Path) -> Result<CanvasFile> {
    let raw_text = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取画布文件: {}", path.display()))?;

    let exam_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    if exam_id.is_empty() {
        anyhow::bail!("无法从文件名推导考试ID: {}", path.display());
    }

    Ok(CanvasFile {
        exam_id,
        path: path.to_path_buf(),
        raw_text,
    })
}

/// 从文件夹中加载所有画布文件
pub async fn load_all_canvas_files(folder_path: &str) -> Result<Vec<CanvasFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut canvas_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_canvas_file(&path).await {
                Ok(file) => {
                    canvas_files.push(file);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(canvas_files)
}
