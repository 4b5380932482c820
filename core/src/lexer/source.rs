use std::io::BufRead;

/// Characters fed to the lexer.
pub type Source = Box<dyn Iterator<Item = char> + Send>;

/// Source over an in-memory text.
pub fn text_source<S: Into<String>>(text: S) -> Source {
    let chars: Vec<char> = text.into().chars().collect();
    Box::new(chars.into_iter())
}

/// Source decoding UTF-8 from a stream, one buffer at a time.
///
/// A read error ends the input; it is logged, not reported.
pub fn reader_source<R: BufRead + Send + 'static>(reader: R) -> Source {
    Box::new(Utf8Chars::new(reader))
}

/// Lossy UTF-8 decoder over a buffered stream.
pub struct Utf8Chars<R> {
    reader: R,
    pending: Vec<u8>,
    decoded: std::vec::IntoIter<char>,
    done: bool,
}

impl<R: BufRead> Utf8Chars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            decoded: Vec::new().into_iter(),
            done: false,
        }
    }

    /// Decode the pending bytes, invalid sequences replaced one by one.
    ///
    /// An incomplete sequence at the end stays pending for the next chunk.
    fn decode_pending(&mut self) -> String {
        let mut text = String::new();
        let mut start = 0;

        while start < self.pending.len() {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    text.push_str(valid);
                    start = self.pending.len();
                }
                Err(err) => {
                    let end = start + err.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.pending[start..end]));
                    match err.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            start = end + len;
                        }
                        None => {
                            start = end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        text
    }

    /// Decode the next chunk of the stream. Returns `false` at the end of input.
    fn fill(&mut self) -> bool {
        while !self.done {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    log::warn!("source read failed, treating as end of input: {err}");
                    self.done = true;
                    break;
                }
            };

            if chunk.is_empty() {
                self.done = true;
                break;
            }

            let len = chunk.len();
            self.pending.extend_from_slice(chunk);
            self.reader.consume(len);

            let text = self.decode_pending();
            if !text.is_empty() {
                self.decoded = text.chars().collect::<Vec<_>>().into_iter();
                return true;
            }
        }

        if self.pending.is_empty() {
            return false;
        }

        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.decoded = text.chars().collect::<Vec<_>>().into_iter();
        true
    }
}

impl<R: BufRead> Iterator for Utf8Chars<R> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(ch) = self.decoded.next() {
                return Some(ch);
            }
            if !self.fill() {
                return None;
            }
        }
    }
}
