pub mod ascii;
pub mod terminal;
