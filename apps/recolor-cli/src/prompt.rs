//! Line-oriented interactive prompt
//!
//! Generic over the reader and writer so sessions can be driven from memory
//! in tests.

use crate::colors::parse_channel;
use recolor_core::{RecolorError, Rgb};
use std::io::{self, BufRead, Write};

pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `question` without a newline and read one line back
    ///
    /// End of input reads as an empty answer.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut answer = String::new();
        self.reader.read_line(&mut answer)?;
        Ok(answer.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Ask for red, green and blue in turn
    ///
    /// Stops asking at the first answer that is not an integer. Range is
    /// checked once all three are in.
    pub fn ask_color(&mut self) -> io::Result<Result<Rgb, RecolorError>> {
        let mut components = [0i64; 3];
        for (slot, name) in components.iter_mut().zip(["Red", "Green", "Blue"]) {
            let answer = self.ask(&format!("{} (0-255): ", name))?;
            match parse_channel(&name.to_lowercase(), &answer) {
                Ok(value) => *slot = value,
                Err(e) => return Ok(Err(e)),
            }
        }

        let [r, g, b] = components;
        Ok(Rgb::from_components(r, g, b))
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
