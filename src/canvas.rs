use smart_leds::RGB8;

use crate::color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    OutOfBounds,
}

/// Drawing operations on a pixel buffer.
pub trait Canvas {
    fn clear(&mut self);
    fn fill_color(&mut self, color: RGB8);
    fn set(&mut self, i: usize, color: RGB8) -> Result<(), Error>;
}

impl<const N: usize> Canvas for [RGB8; N] {
    fn clear(&mut self) {
        self.fill(color::BLACK);
    }

    fn fill_color(&mut self, color: RGB8) {
        self.fill(color);
    }

    fn set(&mut self, i: usize, color: RGB8) -> Result<(), Error> {
        let rgb = self.get_mut(i).ok_or(Error::OutOfBounds)?;
        *rgb = color;
        Ok(())
    }
}
