use std::io::{self, Write};

/// Writes the whole buffer and returns the number of bytes written, so callers can keep a
/// running total of the output length.
pub fn wrap_write<W: Write>(writer: &mut W, buf: &[u8]) -> io::Result<usize> {
    writer.write_all(buf)?;
    Ok(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_write_counts_bytes() {
        let mut buffer: Vec<u8> = Vec::new();
        let mut written = 0;
        written += wrap_write(&mut buffer, &[1, 2, 3]).unwrap();
        written += wrap_write(&mut buffer, &7u32.to_le_bytes()).unwrap();
        assert_eq!(written, 7);
        assert_eq!(buffer, vec![1, 2, 3, 7, 0, 0, 0]);
    }
}
