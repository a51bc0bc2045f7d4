//! Command implementation for the boolmerge CLI.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};

use crate::cli::args::BoolmergeArgs;
use crate::cli::output::{render_report, write_report};
use crate::engine::Engine;
use crate::error::{BoolmergeError, Result};
use crate::query::parse_query;
use crate::util::lines::raw_lines;

/// Execute a CLI invocation.
pub fn execute_command(args: BoolmergeArgs) -> Result<()> {
    let config = args.engine_config();
    debug!("Engine configuration: {config:?}");

    let engine = Engine::open(&args.index_path, config)?;
    let queries = read_queries(&args.query_file)?;
    info!(
        "Loaded {} queries from {}",
        queries.len(),
        args.query_file.display()
    );

    let report = engine.run(args.top_k, &queries)?;
    let rendered = render_report(&report, &args)?;

    write_report(&args.output_log, &rendered)?;
    if engine.config().echo_report {
        print!("{rendered}");
    }

    Ok(())
}

/// Read a query file, one whitespace separated query per non-blank line.
pub fn read_queries<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| BoolmergeError::file_read(path, e))?;
    let reader = BufReader::new(file);

    let mut queries = Vec::new();
    for (line_num, line) in raw_lines(reader).enumerate() {
        let line = match line.map_err(|e| BoolmergeError::file_read(path, e))? {
            Ok(line) => line,
            Err(e) => {
                warn!("Skipping query line {}: {e}", line_num + 1);
                continue;
            }
        };
        let query = parse_query(&line);
        if !query.is_empty() {
            queries.push(query);
        }
    }

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_read_queries_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queries.txt");
        fs::write(&path, "cat dog\n\n   \nfish  cat cat\n").unwrap();

        let queries = read_queries(&path).unwrap();
        assert_eq!(
            queries,
            vec![vec!["cat", "dog"], vec!["fish", "cat", "cat"]]
        );
    }

    #[test]
    fn test_read_queries_skips_invalid_utf8_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queries.txt");
        fs::write(&path, b"cat dog\ncaf\xe9 dog\neel\n").unwrap();

        let queries = read_queries(&path).unwrap();
        assert_eq!(queries, vec![vec!["cat", "dog"], vec!["eel"]]);
    }

    #[test]
    fn test_read_queries_missing_file() {
        let err = read_queries("/nonexistent/queries.txt").unwrap_err();
        assert!(matches!(err, BoolmergeError::FileRead { .. }));
    }
}
