use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, Lines},
};

use super::classes::Labels;

/// Read a file from the given path into a list of strings, skipping blank lines
pub async fn read_file(path: &str) -> io::Result<Vec<String>> {
    let mut r = file_reader(path).await?;
    let mut lines = Vec::new();

    while let Some(line) = r.next_line().await? {
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }

    Ok(lines)
}

/// Read a label file with one class name per line, in class id order
pub async fn read_labels(path: &str) -> io::Result<Labels> {
    let lines = read_file(path).await?;

    Ok(Labels::new(&lines))
}

async fn file_reader(path: &str) -> io::Result<Lines<io::BufReader<File>>> {
    let f = File::open(path).await?;

    Ok(io::BufReader::new(f).lines())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_read_labels_skips_blank_lines() {
        let path = std::env::temp_dir().join(format!("labels-{}.txt", std::process::id()));
        tokio::fs::write(&path, "AddToPlaylist\n\nGetWeather\nPlayMusic\n")
            .await
            .unwrap();

        let labels = read_labels(path.to_str().unwrap()).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(labels.len(), 3);
        assert_eq!(labels.label(1), Some("GetWeather"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = read_labels("/nonexistent/labels.txt").await;

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
