//! Parser for movie record files.
//!
//! Three layouts are accepted, picked by file extension:
//! - `.json`: a single JSON array of records
//! - `.jsonl` / `.ndjson`: one JSON record per line
//! - `.csv`: a header row naming the record fields, one record per row
//!
//! Column and key names match the serialized `MovieRecord` fields
//! (`id, title, rating, num_raters, quote, director, actors, release_date,
//! genres, link`). Missing optional columns and empty CSV cells become `None`.

use crate::error::{DataLoadError, Result};
use crate::types::MovieRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// On-disk layout of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    JsonArray,
    JsonLines,
    Csv,
}

impl RecordFormat {
    /// Detect the format from a file extension
    ///
    /// Example: "movies.csv" -> Ok(RecordFormat::Csv)
    ///          "movies.txt" -> Err(UnsupportedFormat)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(RecordFormat::JsonArray),
            "jsonl" | "ndjson" => Ok(RecordFormat::JsonLines),
            "csv" => Ok(RecordFormat::Csv),
            _ => Err(DataLoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a record file, detecting the format from its extension
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let format = RecordFormat::from_path(path)?;
    debug!("Parsing {} as {:?}", path.display(), format);
    match format {
        RecordFormat::JsonArray => parse_json_array(path),
        RecordFormat::JsonLines => parse_json_lines(path),
        RecordFormat::Csv => parse_csv(path),
    }
}

/// Parse a file holding one JSON array of records
pub fn parse_json_array(path: &Path) -> Result<Vec<MovieRecord>> {
    let reader = BufReader::new(open(path)?);
    serde_json::from_reader(reader).map_err(|e| DataLoadError::ParseError {
        file: file_name(path),
        line: e.line(),
        reason: e.to_string(),
    })
}

/// Parse a file with one JSON record per line
///
/// Blank lines are skipped.
pub fn parse_json_lines(path: &Path) -> Result<Vec<MovieRecord>> {
    let reader = BufReader::new(open(path)?);
    let mut movies = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }
        let movie = serde_json::from_str(line_trimmed).map_err(|e| DataLoadError::ParseError {
            file: file_name(path),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        movies.push(movie);
    }
    Ok(movies)
}

/// Parse a CSV file with a header row
pub fn parse_csv(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(open(path)?);
    let mut movies = Vec::new();

    for (idx, result) in reader.deserialize::<MovieRecord>().enumerate() {
        let movie = result.map_err(|e| DataLoadError::ParseError {
            file: file_name(path),
            // Header is line 1, so the n-th record sits on line n + 2
            // unless the reader knows better (multi-line quoted cells).
            line: e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2),
            reason: e.to_string(),
        })?;
        movies.push(movie);
    }
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            RecordFormat::from_path(Path::new("a/movies.JSON")).unwrap(),
            RecordFormat::JsonArray
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("movies.ndjson")).unwrap(),
            RecordFormat::JsonLines
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("movies.csv")).unwrap(),
            RecordFormat::Csv
        );
        assert!(matches!(
            RecordFormat::from_path(Path::new("movies.dat")),
            Err(DataLoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "movies.json",
            r#"[
                {"id": 1, "title": "肖申克的救赎", "rating": 9.7, "num_raters": 3000000,
                 "director": "弗兰克·德拉邦特", "actors": "蒂姆·罗宾斯, 摩根·弗里曼",
                 "release_date": "1994", "genres": "犯罪, 剧情"},
                {"id": 2, "title": "Untitled"}
            ]"#,
        );

        let movies = parse_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].rating, Some(9.7));
        assert_eq!(movies[0].release_date.as_deref(), Some("1994"));
        assert_eq!(movies[1].rating, None);
        assert_eq!(movies[1].actors, None);
    }

    #[test]
    fn test_parse_json_lines_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "movies.jsonl",
            "{\"id\": 1, \"title\": \"A\"}\n\n{\"id\": \"oops\"}\n",
        );

        match parse_movies(&path) {
            Err(DataLoadError::ParseError { file, line, .. }) => {
                assert_eq!(file, "movies.jsonl");
                assert_eq!(line, 3);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_csv_empty_cells_are_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "movies.csv",
            "id,title,rating,num_raters,quote,director,actors,release_date,genres,link\n\
             1,Heat,8.3,100,,Michael Mann,\"Al Pacino, Robert De Niro\",1995,\"Crime, Drama\",\n\
             2,Unknown,,,,,,未知,,\n",
        );

        let movies = parse_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].actors.as_deref(), Some("Al Pacino, Robert De Niro"));
        assert_eq!(movies[0].quote, None);
        assert_eq!(movies[1].rating, None);
        assert_eq!(movies[1].release_date.as_deref(), Some("未知"));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_movies(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
