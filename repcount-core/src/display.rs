//! Text display trait and error types.

use core::future::Future;

/// Error type for display operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// I2C/SPI bus error.
    Bus,
    /// Cursor outside the drawable area.
    OutOfBounds,
}

/// Cursor-based text display.
///
/// Drawing calls only touch the display's frame; nothing is visible until
/// [`update`](Self::update) pushes the frame to the panel.
pub trait TextDisplay {
    /// Initialise the panel.
    fn init(&mut self) -> impl Future<Output = Result<(), DisplayError>>;

    /// Blank the frame and move the cursor to the origin.
    fn clear(&mut self);

    /// Move the cursor to pixel position (`x`, `y`).
    fn set_cursor(&mut self, x: u8, y: u8) -> Result<(), DisplayError>;

    /// Draw `text` at the cursor and advance it.
    fn print_str(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Draw `value` in decimal at the cursor and advance it.
    fn print_int(&mut self, value: u16) -> Result<(), DisplayError>;

    /// Push the frame to the panel.
    fn update(&mut self) -> impl Future<Output = Result<(), DisplayError>>;
}
