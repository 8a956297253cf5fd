// render.rs - Frame sinks for the headless loop

use std::io::{self, Write};

use anyhow::Result;
use life_core::Grid;

/// Consumes a read-only snapshot of each generation.
pub trait Renderer {
    fn render(&mut self, generation: u64, grid: &Grid) -> Result<()>;
}

/// Writes each generation as plaintext (`.` dead, `O` alive).
pub struct TextRenderer<W: Write> {
    out: W,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, generation: u64, grid: &Grid) -> Result<()> {
        writeln!(self.out, "Generation {generation} ({} alive)", grid.live_count())?;
        write!(self.out, "{grid}")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_grid() {
        let grid = Grid::parse(".O\nO.").unwrap();
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(3, &grid).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "Generation 3 (2 alive)\n.O\nO.\n\n");
    }
}
