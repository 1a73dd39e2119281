//! Text input and output for the command-line front end.
//!
//! Input is whitespace-separated: `N M P`, then `N*M` values of A row-major,
//! then `M*P` values of B row-major. Line breaks carry no meaning.

use std::io::{Read, Write};
use std::str::SplitWhitespace;

use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;

/// The two operands read from one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub a: Matrix<i32>,
    pub b: Matrix<i32>,
}

/// Parse a problem from text.
///
/// ```
/// use rowmatmul::io::parse_problem;
///
/// let p = parse_problem("2 2 2\n1 2\n3 4\n5 6\n7 8\n").unwrap();
/// assert_eq!(p.a.shape(), (2, 2));
/// assert_eq!(p.b.row(1), &[7, 8]);
/// ```
pub fn parse_problem(text: &str) -> Result<Problem> {
    let mut tokens = text.split_whitespace();

    let n = next_dim(&mut tokens, "N")?;
    let m = next_dim(&mut tokens, "M")?;
    let p = next_dim(&mut tokens, "P")?;

    let a = read_matrix(&mut tokens, n, m, "A")?;
    let b = read_matrix(&mut tokens, m, p, "B")?;

    if let Some(extra) = tokens.next() {
        return Err(MatmulError::Parse(format!(
            "unexpected trailing token {:?} after matrix B",
            extra
        )));
    }

    Ok(Problem { a, b })
}

/// Read all of `reader` and parse it with [`parse_problem`].
pub fn read_problem<R: Read>(mut reader: R) -> Result<Problem> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_problem(&text)
}

/// Write `matrix` one row per line, values separated by spaces.
pub fn write_matrix<W: Write, T: std::fmt::Display>(mut out: W, matrix: &Matrix<T>) -> Result<()> {
    for row in matrix.iter_rows() {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the product under a `Result matrix C:` header line.
pub fn write_result<W: Write>(mut out: W, c: &Matrix<i64>) -> Result<()> {
    writeln!(out, "Result matrix C:")?;
    write_matrix(out, c)
}

fn next_dim(tokens: &mut SplitWhitespace<'_>, name: &str) -> Result<usize> {
    let token = tokens
        .next()
        .ok_or_else(|| MatmulError::Parse(format!("missing dimension {}", name)))?;
    token
        .parse()
        .map_err(|e| MatmulError::Parse(format!("dimension {} = {:?}: {}", name, token, e)))
}

fn read_matrix(
    tokens: &mut SplitWhitespace<'_>,
    rows: usize,
    cols: usize,
    name: &str,
) -> Result<Matrix<i32>> {
    let count = rows
        .checked_mul(cols)
        .ok_or_else(|| MatmulError::Parse(format!("matrix {} is too large", name)))?;

    let mut data = Vec::with_capacity(count);
    for idx in 0..count {
        let token = tokens.next().ok_or_else(|| {
            MatmulError::Parse(format!(
                "matrix {} ({}x{}) expects {} values, found {}",
                name, rows, cols, count, idx
            ))
        })?;
        let value = token.parse::<i32>().map_err(|e| {
            MatmulError::Parse(format!(
                "matrix {} [{}][{}] = {:?}: {}",
                name,
                idx / cols,
                idx % cols,
                token,
                e
            ))
        })?;
        data.push(value);
    }

    Matrix::from_vec(rows, cols, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rectangular() {
        let p = parse_problem("2 3 1  1 2 3 4 5 6  7 8 9").unwrap();
        assert_eq!(p.a.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(p.b.to_rows(), vec![vec![7], vec![8], vec![9]]);
    }

    #[test]
    fn test_parse_negative_values() {
        let p = parse_problem("1 1 1\n-3\n-4").unwrap();
        assert_eq!(p.a[(0, 0)], -3);
        assert_eq!(p.b[(0, 0)], -4);
    }

    #[test]
    fn test_missing_values() {
        let err = parse_problem("2 2 2 1 2 3 4 5 6 7").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("matrix B"), "{}", msg);
        assert!(msg.contains("found 3"), "{}", msg);
    }

    #[test]
    fn test_missing_dimension() {
        let err = parse_problem("2 2").unwrap_err();
        assert!(err.to_string().contains("missing dimension P"));
    }

    #[test]
    fn test_bad_token() {
        let err = parse_problem("1 1 1 x 2").unwrap_err();
        assert!(matches!(err, MatmulError::Parse(_)));
        assert!(err.to_string().contains("matrix A [0][0]"));
    }

    #[test]
    fn test_trailing_token_rejected() {
        assert!(parse_problem("1 1 1 2 3 4").is_err());
    }

    #[test]
    fn test_zero_inner_dimension() {
        let p = parse_problem("2 0 3").unwrap();
        assert_eq!(p.a.shape(), (2, 0));
        assert_eq!(p.b.shape(), (0, 3));
    }

    #[test]
    fn test_read_problem_from_reader() {
        let input = b"1 2 1\n3 4\n5\n6\n";
        let p = read_problem(&input[..]).unwrap();
        assert_eq!(p.a.row(0), &[3, 4]);
    }

    #[test]
    fn test_write_result_has_header() {
        let c = Matrix::from_rows(vec![vec![19i64, 22], vec![43, 50]]).unwrap();
        let mut out = Vec::new();
        write_result(&mut out, &c).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Result matrix C:\n19 22\n43 50\n"
        );
    }

    #[test]
    fn test_write_matrix() {
        let c = Matrix::from_rows(vec![vec![19i64, 22], vec![43, 50]]).unwrap();
        let mut out = Vec::new();
        write_matrix(&mut out, &c).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "19 22\n43 50\n");
    }
}
