use crate::core::Container;
use crate::domain::node::{escape_html, nodes_to_html, Node};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Writes a standalone HTML page whose `#root` element is the container.
/// The whole file is rewritten on every render.
#[derive(Debug, Clone)]
pub struct FileContainer {
    base_path: String,
    file_name: String,
    page_title: String,
}

impl FileContainer {
    pub fn new(base_path: String, file_name: String, page_title: String) -> Self {
        Self {
            base_path,
            file_name,
            page_title,
        }
    }

    pub fn full_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(&self.file_name)
    }
}

impl Container for FileContainer {
    async fn replace_content(&self, nodes: &[Node]) -> Result<()> {
        let full_path = self.full_path();

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let page = page_document(&self.page_title, &nodes_to_html(nodes));
        tracing::debug!("Writing {} bytes to {}", page.len(), full_path.display());
        tokio::fs::write(full_path, page).await?;
        Ok(())
    }
}

/// Keeps the last rendered content in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    nodes: Arc<Mutex<Vec<Node>>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn nodes(&self) -> Vec<Node> {
        self.nodes.lock().await.clone()
    }

    pub async fn html(&self) -> String {
        nodes_to_html(&self.nodes.lock().await)
    }
}

impl Container for MemoryContainer {
    async fn replace_content(&self, nodes: &[Node]) -> Result<()> {
        let mut current = self.nodes.lock().await;
        *current = nodes.to_vec();
        Ok(())
    }
}

pub fn page_document(title: &str, root_html: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<div id=\"app\"><div><h1 class=\"mb-8\">{title}</h1><div id=\"root\">{root_html}</div></div></div>\n</body>\n</html>\n"
    )
}
