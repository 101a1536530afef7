//! Column alignment for tab separated text.

use std::io::{self, Write};

/// Narrowest a column is padded to, padding included
const MIN_WIDTH: usize = 10;
/// Spaces added after the widest cell of a column
const PADDING: usize = 2;

/// Buffers tab separated lines and writes them out with aligned columns.
///
/// Every tab terminated cell is padded with spaces to the widest cell of its
/// column plus two, but never to less than ten.  Text after the last tab of a
/// line is written unpadded.  Nothing reaches the inner writer until
/// [`flush`](Write::flush), which dropping the writer also does.
#[derive(Debug)]
pub struct TableWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> TableWriter<W> {
    #[must_use]
    pub fn new(inner: W) -> Self {
        TableWriter {
            inner,
            buf: Vec::new(),
        }
    }

    fn write_table(&mut self) -> io::Result<()> {
        let text = String::from_utf8_lossy(&self.buf);
        let lines: Vec<Vec<&str>> = text
            .split('\n')
            .map(|line| line.split('\t').collect())
            .collect();

        let mut widths: Vec<usize> = Vec::new();
        for cells in &lines {
            // The last cell is not tab terminated
            let terminated = cells.split_last().map_or(&[][..], |(_, rest)| rest);
            for (column, cell) in terminated.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(column) {
                    Some(widest) => *widest = (*widest).max(width),
                    None => widths.push(width),
                }
            }
        }

        let mut out = String::with_capacity(self.buf.len());
        for (i, cells) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if let Some((last, terminated)) = cells.split_last() {
                for (cell, widest) in terminated.iter().zip(&widths) {
                    let width = MIN_WIDTH.max(widest + PADDING);
                    out.push_str(cell);
                    out.extend(std::iter::repeat(' ').take(width - cell.chars().count()));
                }
                out.push_str(last);
            }
        }

        self.inner.write_all(out.as_bytes())
    }
}

impl<W: Write> Write for TableWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let result = self.write_table();
            self.buf.clear();
            result?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for TableWriter<W> {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            if let Err(err) = self.flush() {
                tracing::error!("failed to flush table: {err}");
            }
        }
    }
}
