use std::path::Path;

use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, AsyncWriteExt, BufWriter, Lines},
};

/// Read a file from the given path into a list of strings
pub async fn read_file(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut r = file_reader(path.as_ref()).await?;
    let mut lines = Vec::new();

    while let Some(line) = r.next_line().await? {
        lines.push(line);
    }

    Ok(lines)
}

/// Write each string as its own line, replacing any existing file
pub async fn write_lines<S: AsRef<str>>(path: impl AsRef<Path>, lines: &[S]) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path.as_ref()).await?);

    for line in lines {
        w.write_all(line.as_ref().as_bytes()).await?;
        w.write_all(b"\n").await?;
    }

    w.flush().await
}

async fn file_reader(path: &Path) -> io::Result<Lines<io::BufReader<File>>> {
    let f = File::open(path).await?;

    Ok(io::BufReader::new(f).lines())
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn writes_and_reads_lines() {
        let path = scratch::dir("files").join("lines.txt");

        write_lines(&path, &["first", "", "third"]).await.unwrap();

        assert_eq!(read_file(&path).await.unwrap(), vec!["first", "", "third"]);
    }

    #[tokio::test]
    async fn missing_files_are_not_found() {
        let path = scratch::dir("files-missing").join("absent.txt");

        let err = read_file(&path).await.unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
